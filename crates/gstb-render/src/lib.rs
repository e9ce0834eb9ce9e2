//! # gstb-render — Print Views and Sharing
//!
//! Turns a [`gstb_core::BillState`] and its [`gstb_core::Totals`] into
//! something a person reads:
//!
//! - [`DocumentView`] — the pre-formatted snapshot both renderers share.
//!   Tier gating (watermark, logo) is decided here and nowhere else.
//! - [`render_text`] — fixed-width plain text.
//! - [`render_html`] — a standalone, print-ready HTML page.
//! - [`share_message`] and the [`ShareTarget`] seam.

pub mod error;
pub mod html;
pub mod share;
pub mod text;
pub mod view;

use std::fmt;
use std::str::FromStr;

use gstb_core::BillState;

pub use error::{RenderError, ShareError};
pub use html::render_html;
pub use share::{share_message, NoShareTarget, ShareMessage, ShareTarget};
pub use text::render_text;
pub use view::{DocumentView, WATERMARK_TEXT};

/// Output format of a print view.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Format {
    #[default]
    Text,
    Html,
}

impl Format {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Text => "text",
            Self::Html => "html",
        }
    }
}

impl fmt::Display for Format {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Format {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "text" | "txt" => Ok(Self::Text),
            "html" => Ok(Self::Html),
            other => Err(format!("unknown format '{other}', expected text or html")),
        }
    }
}

/// Compute totals for `state` and render it in `format`.
///
/// # Errors
///
/// [`RenderError`] if the HTML template fails.
pub fn render(state: &BillState, format: Format) -> Result<String, RenderError> {
    let view = DocumentView::new(state, &state.totals());
    match format {
        Format::Text => Ok(render_text(&view)),
        Format::Html => render_html(&view),
    }
}

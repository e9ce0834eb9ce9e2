//! HTML print view. A standalone page the browser can print to PDF.
//!
//! All user text is escaped by the template engine.

use askama::Template;

use crate::error::RenderError;
use crate::view::DocumentView;

#[derive(Template)]
#[template(path = "invoice.html")]
struct InvoicePage<'a> {
    v: &'a DocumentView,
}

/// Render the view as a complete HTML document.
///
/// # Errors
///
/// [`RenderError::Template`] if the template engine fails.
pub fn render_html(view: &DocumentView) -> Result<String, RenderError> {
    let html = InvoicePage { v: view }.render()?;
    tracing::debug!(invoice = %view.invoice_number, bytes = html.len(), "rendered html view");
    Ok(html)
}

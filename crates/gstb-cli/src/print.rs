//! # Render and Share Subcommands
//!
//! Print views go to stdout unless `--out` names a file, so they can be
//! piped (`gstb render | lp`).

use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::{Args, ValueEnum};

use gstb_render::{render, share_message, Format, NoShareTarget, ShareTarget};

use crate::{Session, EXIT_OK};

/// Output format for `gstb render`.
#[derive(Debug, Clone, Copy, Default, ValueEnum)]
pub enum RenderFormat {
    /// Fixed-width plain text.
    #[default]
    Text,
    /// Standalone printable HTML page.
    Html,
}

impl From<RenderFormat> for Format {
    fn from(f: RenderFormat) -> Self {
        match f {
            RenderFormat::Text => Format::Text,
            RenderFormat::Html => Format::Html,
        }
    }
}

/// Arguments for `gstb render`.
#[derive(Args, Debug, Default)]
pub struct RenderArgs {
    #[arg(long, value_enum, default_value = "text")]
    pub format: RenderFormat,
    /// Write to this file instead of stdout.
    #[arg(long)]
    pub out: Option<PathBuf>,
}

/// Execute `gstb render`.
pub fn run_render(args: &RenderArgs, session: &Session<'_>) -> Result<u8> {
    let bill = session.load();
    let format = Format::from(args.format);
    let document = render(&bill, format).context("failed to render invoice")?;

    match &args.out {
        Some(path) => {
            if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
                std::fs::create_dir_all(parent)
                    .with_context(|| format!("failed to create {}", parent.display()))?;
            }
            std::fs::write(path, &document)
                .with_context(|| format!("failed to write {}", path.display()))?;
            tracing::info!(path = %path.display(), %format, "rendered invoice");
            println!("OK: wrote {}", path.display());
        }
        None => print!("{document}"),
    }
    Ok(EXIT_OK)
}

/// Execute `gstb share`.
///
/// A terminal has no share sheet, so the message is printed for the user
/// to copy.
pub fn run_share(session: &Session<'_>) -> Result<u8> {
    run_share_with(session, &NoShareTarget)
}

/// Execute `gstb share` against a specific share target.
pub fn run_share_with(session: &Session<'_>, target: &dyn ShareTarget) -> Result<u8> {
    let bill = session.load();
    let message = share_message(&bill, &bill.totals());
    match target.share(&message) {
        Ok(()) => println!("OK: shared invoice {}", message.title),
        Err(e) => {
            eprintln!("note: {e}; copy the message below");
            println!("{}", message.text);
        }
    }
    Ok(EXIT_OK)
}

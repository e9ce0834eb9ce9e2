//! # Export and Import Subcommands
//!
//! Backups are the same JSON document the store persists, so a backup can
//! also be dropped in place as the state file.

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use clap::Args;

use gstb_store::{export_document, import_bytes};

use crate::{reject, Session, EXIT_OK};

/// Arguments for `gstb export`.
#[derive(Args, Debug, Default)]
pub struct ExportArgs {
    /// Directory to write the backup into (default: current directory).
    #[arg(long)]
    pub out: Option<PathBuf>,
}

/// Arguments for `gstb import`.
#[derive(Args, Debug)]
pub struct ImportArgs {
    /// Backup document to load.
    pub file: PathBuf,
}

/// Execute `gstb export`.
pub fn run_export(args: &ExportArgs, session: &Session<'_>) -> Result<u8> {
    let bill = session.load();
    let doc = export_document(&bill).context("failed to build backup document")?;

    let dir = args.out.as_deref().unwrap_or_else(|| Path::new("."));
    std::fs::create_dir_all(dir)
        .with_context(|| format!("failed to create output directory {}", dir.display()))?;
    let path = dir.join(&doc.file_name);
    std::fs::write(&path, &doc.bytes)
        .with_context(|| format!("failed to write backup {}", path.display()))?;

    tracing::info!(path = %path.display(), bytes = doc.bytes.len(), "exported backup");
    println!("OK: exported {}", path.display());
    Ok(EXIT_OK)
}

/// Execute `gstb import`.
pub fn run_import(args: &ImportArgs, session: &Session<'_>) -> Result<u8> {
    let bytes = std::fs::read(&args.file)
        .with_context(|| format!("failed to read {}", args.file.display()))?;
    let bill = match import_bytes(&bytes) {
        Ok(bill) => bill,
        Err(e) => {
            tracing::warn!(path = %args.file.display(), error = %e, "import rejected");
            return reject(e);
        }
    };
    session.commit(&bill)?;
    tracing::info!(invoice = %bill.invoice.number, "imported backup");
    println!(
        "OK: imported invoice {} ({} items)",
        bill.invoice.number,
        bill.invoice.items.len()
    );
    Ok(EXIT_OK)
}

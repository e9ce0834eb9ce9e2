//! # Unlock Subcommand
//!
//! Checks a license key against the configured policy and unlocks the Pro
//! tier. The check is local only.

use anyhow::Result;
use clap::Args;

use gstb_core::LicenseError;

use crate::{reject, Session, EXIT_FAILURE, EXIT_OK};

/// Arguments for `gstb unlock`.
#[derive(Args, Debug)]
pub struct UnlockArgs {
    /// License key, e.g. NSQ-2025-AB12CD.
    pub key: String,
}

/// Execute `gstb unlock`.
pub fn run_unlock(args: &UnlockArgs, session: &Session<'_>) -> Result<u8> {
    let mut bill = session.load();
    match bill.unlock(&session.config.license, args.key.trim()) {
        Ok(()) => {}
        Err(LicenseError::InvalidKey) => {
            tracing::debug!(prefix = %session.config.license.prefix, "license key rejected");
            return reject("invalid license key");
        }
        Err(e @ LicenseError::InvalidPolicy(_)) => {
            eprintln!("error: {e}");
            return Ok(EXIT_FAILURE);
        }
    }
    session.commit(&bill)?;
    println!("OK: Pro unlocked. Watermark removed; logo and custom GST rates enabled.");
    Ok(EXIT_OK)
}

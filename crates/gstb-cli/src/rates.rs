//! # Rates Subcommand
//!
//! Show the GST rates items may use, and manage the Pro custom catalogue.

use anyhow::Result;
use clap::{Args, Subcommand};

use gstb_core::{format_rate, DEFAULT_GST_RATES};

use crate::{reject, Session, EXIT_OK};

/// Arguments for `gstb rates`.
#[derive(Args, Debug, Default)]
pub struct RatesArgs {
    #[command(subcommand)]
    pub command: Option<RatesCommand>,
}

/// Rates subcommands. Without one, the allowed rates are listed.
#[derive(Subcommand, Debug)]
pub enum RatesCommand {
    /// Replace the custom rate catalogue (Pro).
    Set {
        /// Rates in percent, e.g. `0 3 5 12 18 28`.
        #[arg(required = true, num_args = 1.., allow_negative_numbers = true)]
        rates: Vec<f64>,
    },
    /// Drop the custom catalogue and return to the standard rates (Pro).
    Clear,
}

/// Execute the rates subcommand.
pub fn run_rates(args: &RatesArgs, session: &Session<'_>) -> Result<u8> {
    match &args.command {
        None => cmd_show(session),
        Some(RatesCommand::Set { rates }) => cmd_set(session, rates.clone()),
        Some(RatesCommand::Clear) => cmd_set(session, Vec::new()),
    }
}

fn cmd_show(session: &Session<'_>) -> Result<u8> {
    let bill = session.load();
    let rates = bill.gst_rates();
    let source = if rates.as_slice() == DEFAULT_GST_RATES.as_slice() { "standard" } else { "custom" };
    println!("{} ({source})", join_rates(&rates));
    Ok(EXIT_OK)
}

fn cmd_set(session: &Session<'_>, rates: Vec<f64>) -> Result<u8> {
    let mut bill = session.load();
    if let Err(e) = bill.set_custom_rates(rates) {
        return reject(e);
    }
    session.commit(&bill)?;
    let active = bill.gst_rates();
    tracing::info!(rates = ?active, "updated gst rate catalogue");
    println!("OK: GST rates now {}", join_rates(&active));
    Ok(EXIT_OK)
}

fn join_rates(rates: &[f64]) -> String {
    rates.iter().map(|r| format_rate(*r)).collect::<Vec<_>>().join(", ")
}

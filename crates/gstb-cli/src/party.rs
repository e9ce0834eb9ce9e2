//! # Profile and Client Subcommands
//!
//! Edit the business profile and the billed client. Changing either
//! party's state recomputes the supply type and resets the place of
//! supply.

use anyhow::Result;
use clap::Args;

use gstb_core::{ClientUpdate, ProfileUpdate};

use crate::{canonical_state, reject, Session, EXIT_OK};

/// Arguments for `gstb profile`.
#[derive(Args, Debug, Default)]
pub struct ProfileArgs {
    /// Business name.
    #[arg(long)]
    pub name: Option<String>,
    /// Owner or contact person.
    #[arg(long)]
    pub owner: Option<String>,
    #[arg(long)]
    pub phone: Option<String>,
    #[arg(long)]
    pub email: Option<String>,
    /// Postal address; use `\n` in the shell string for line breaks.
    #[arg(long)]
    pub address: Option<String>,
    #[arg(long)]
    pub gstin: Option<String>,
    /// State of registration (e.g. "Rajasthan").
    #[arg(long)]
    pub state: Option<String>,
    /// Logo URL. Pro only; pass "" to remove.
    #[arg(long)]
    pub logo: Option<String>,
}

/// Arguments for `gstb client`.
#[derive(Args, Debug, Default)]
pub struct ClientArgs {
    #[arg(long)]
    pub name: Option<String>,
    #[arg(long)]
    pub phone: Option<String>,
    #[arg(long)]
    pub email: Option<String>,
    #[arg(long)]
    pub address: Option<String>,
    #[arg(long)]
    pub gstin: Option<String>,
    /// Client state; pass "" to clear.
    #[arg(long)]
    pub state: Option<String>,
}

/// Execute `gstb profile`.
pub fn run_profile(args: &ProfileArgs, session: &Session<'_>) -> Result<u8> {
    let state_name = match args.state.as_deref().map(canonical_state).transpose() {
        Ok(s) => s,
        Err(e) => return reject(e),
    };

    let mut bill = session.load();
    let update = ProfileUpdate {
        biz_name: args.name.clone(),
        owner: args.owner.clone(),
        phone: args.phone.clone(),
        email: args.email.clone(),
        address: args.address.as_deref().map(unescape_newlines),
        gstin: args.gstin.as_deref().map(normalize_gstin),
        state: state_name,
        logo: args.logo.as_deref().map(|l| l.trim().to_string()),
    };
    if let Err(e) = bill.update_profile(update) {
        return reject(e);
    }
    session.commit(&bill)?;

    tracing::info!(business = %bill.profile.biz_name, "updated business profile");
    println!("OK: business profile updated");
    print_supply(&bill);
    Ok(EXIT_OK)
}

/// Execute `gstb client`.
pub fn run_client(args: &ClientArgs, session: &Session<'_>) -> Result<u8> {
    let state_name = match args.state.as_deref() {
        Some(s) if s.trim().is_empty() => Some(String::new()),
        Some(s) => match canonical_state(s) {
            Ok(name) => Some(name),
            Err(e) => return reject(e),
        },
        None => None,
    };

    let mut bill = session.load();
    bill.update_client(ClientUpdate {
        name: args.name.clone(),
        phone: args.phone.clone(),
        email: args.email.clone(),
        address: args.address.as_deref().map(unescape_newlines),
        gstin: args.gstin.as_deref().map(normalize_gstin),
        state: state_name,
    });
    session.commit(&bill)?;

    tracing::info!(client = %bill.client.name, "updated client");
    println!("OK: client updated");
    print_supply(&bill);
    Ok(EXIT_OK)
}

fn print_supply(bill: &gstb_core::BillState) {
    let mode = if bill.invoice.inter_state { "IGST" } else { "CGST + SGST" };
    println!(
        "Place of Supply: {} ({mode})",
        bill.invoice.place_of_supply
    );
}

/// GSTINs are upper-case alphanumerics.
fn normalize_gstin(gstin: &str) -> String {
    gstin.trim().to_ascii_uppercase()
}

/// Turn literal `\n` sequences from the shell into line breaks.
fn unescape_newlines(text: &str) -> String {
    text.replace("\\n", "\n")
}

//! # Bill Subcommands
//!
//! - `show` — Print the bill and its totals.
//! - `invoice` — Edit the invoice header (number, dates, notes, charges).
//! - `states` — List the state catalogue.
//! - `reset` — Start over from the default bill.

use anyhow::{Context, Result};
use chrono::NaiveDate;
use clap::Args;

use gstb_core::{format_inr, format_rate, BillState, IndianState, InvoiceUpdate};

use crate::{reject, Session, EXIT_OK};

/// Characters of an item id shown in listings.
pub const SHORT_ID_LEN: usize = 8;

/// Arguments for `gstb show`.
#[derive(Args, Debug, Default)]
pub struct ShowArgs {
    /// Print the totals breakdown as JSON.
    #[arg(long)]
    pub json: bool,
}

/// Arguments for `gstb invoice`.
#[derive(Args, Debug, Default)]
pub struct InvoiceArgs {
    /// Invoice number (e.g. "INV-1002").
    #[arg(long)]
    pub number: Option<String>,
    /// Invoice date, YYYY-MM-DD.
    #[arg(long, value_parser = parse_date, conflicts_with = "clear_date")]
    pub date: Option<NaiveDate>,
    /// Remove the invoice date.
    #[arg(long)]
    pub clear_date: bool,
    /// Due date, YYYY-MM-DD.
    #[arg(long, value_parser = parse_date, conflicts_with = "clear_due")]
    pub due: Option<NaiveDate>,
    /// Remove the due date.
    #[arg(long)]
    pub clear_due: bool,
    /// Place of supply. Reset on the next business or client state change.
    #[arg(long)]
    pub place_of_supply: Option<String>,
    /// Force IGST (`true`) or CGST + SGST (`false`) until the next state change.
    #[arg(long, action = clap::ArgAction::Set)]
    pub inter_state: Option<bool>,
    #[arg(long)]
    pub notes: Option<String>,
    #[arg(long)]
    pub terms: Option<String>,
    /// Flat pre-tax discount in rupees.
    #[arg(long, allow_negative_numbers = true)]
    pub discount: Option<f64>,
    /// Shipping charge in rupees (not taxed).
    #[arg(long, allow_negative_numbers = true)]
    pub shipping: Option<f64>,
}

/// Arguments for `gstb reset`.
#[derive(Args, Debug, Default)]
pub struct ResetArgs {
    /// Keep the Pro unlock and custom rates.
    #[arg(long)]
    pub keep_license: bool,
}

/// Parse a `YYYY-MM-DD` date.
pub fn parse_date(s: &str) -> Result<NaiveDate, String> {
    NaiveDate::parse_from_str(s.trim(), "%Y-%m-%d")
        .map_err(|_| format!("'{s}' is not a date (expected YYYY-MM-DD)"))
}

/// Execute `gstb show`.
pub fn run_show(args: &ShowArgs, session: &Session<'_>) -> Result<u8> {
    let bill = session.load();
    let totals = bill.totals();

    if args.json {
        let json = serde_json::to_string_pretty(&totals).context("failed to serialize totals")?;
        println!("{json}");
        return Ok(EXIT_OK);
    }

    let inv = &bill.invoice;
    println!("Business: {} ({})", bill.profile.biz_name, bill.profile.state);
    println!("Client:   {} ({})", bill.client.name, bill.client.state);
    println!(
        "Invoice:  {}  Date: {}  Due: {}",
        inv.number,
        date_or_dash(inv.date),
        date_or_dash(inv.due)
    );
    println!(
        "Place of Supply: {} ({})",
        inv.place_of_supply,
        if inv.inter_state { "IGST" } else { "CGST + SGST" }
    );
    println!("Tier: {}", if bill.pro_unlocked { "Pro" } else { "Free" });
    println!();

    if inv.items.is_empty() {
        println!("No items.");
    } else {
        println!("Items:");
        for item in &inv.items {
            println!("  {}", item_line(item));
        }
    }
    println!();

    println!("Subtotal:     {}", format_inr(totals.subtotal));
    println!("Discount:     {}", format_inr(totals.discount));
    println!("Taxable base: {}", format_inr(totals.taxable_base));
    println!("GST rate:     {}", format_rate(totals.weighted_gst_rate * 100.0));
    if inv.inter_state {
        println!("IGST:         {}", format_inr(totals.igst));
    } else {
        println!("CGST:         {}", format_inr(totals.cgst));
        println!("SGST:         {}", format_inr(totals.sgst));
    }
    println!("Shipping:     {}", format_inr(totals.shipping));
    println!("Total:        {}", format_inr(totals.grand_total));
    Ok(EXIT_OK)
}

/// One listing line for an item.
pub fn item_line(item: &gstb_core::LineItem) -> String {
    format!(
        "[{}] {}  HSN {}  {} × {} @ {} = {}",
        short_id(item.id.as_str()),
        if item.name.is_empty() { "(unnamed)" } else { item.name.as_str() },
        if item.hsn_code.is_empty() { "-" } else { item.hsn_code.as_str() },
        item.quantity,
        format_inr(item.unit_price),
        format_rate(item.gst_rate),
        format_inr(item.amount()),
    )
}

fn short_id(id: &str) -> &str {
    id.get(..SHORT_ID_LEN).unwrap_or(id)
}

fn date_or_dash(date: Option<NaiveDate>) -> String {
    date.map(|d| d.format("%Y-%m-%d").to_string())
        .unwrap_or_else(|| "-".to_string())
}

/// Execute `gstb invoice`.
pub fn run_invoice(args: &InvoiceArgs, session: &Session<'_>) -> Result<u8> {
    let mut bill = session.load();
    let update = InvoiceUpdate {
        number: args.number.as_deref().map(|n| n.trim().to_string()),
        date: if args.clear_date { Some(None) } else { args.date.map(Some) },
        due: if args.clear_due { Some(None) } else { args.due.map(Some) },
        place_of_supply: args.place_of_supply.clone(),
        inter_state: args.inter_state,
        notes: args.notes.clone(),
        terms: args.terms.clone(),
        discount: args.discount,
        shipping: args.shipping,
    };
    if let Err(e) = bill.update_invoice(update) {
        return reject(e);
    }
    session.commit(&bill)?;

    tracing::info!(invoice = %bill.invoice.number, "updated invoice header");
    println!("OK: invoice {} updated", bill.invoice.number);
    Ok(EXIT_OK)
}

/// Execute `gstb states`.
pub fn run_states() -> Result<u8> {
    for state in IndianState::all() {
        println!("{state}");
    }
    Ok(EXIT_OK)
}

/// Execute `gstb reset`.
pub fn run_reset(args: &ResetArgs, session: &Session<'_>) -> Result<u8> {
    let mut fresh = BillState::default();
    if args.keep_license {
        let old = session.load();
        fresh.pro_unlocked = old.pro_unlocked;
        fresh.license_key = old.license_key;
        fresh.custom_rates = old.custom_rates;
    }
    session.commit(&fresh)?;
    tracing::info!(keep_license = args.keep_license, "reset bill to defaults");
    println!("OK: bill reset to defaults");
    Ok(EXIT_OK)
}

//! # Item Subcommand
//!
//! Line-item operations. Item ids may be given in full or as any prefix
//! that matches exactly one item.

use anyhow::Result;
use clap::{Args, Subcommand};

use gstb_core::{BillState, ItemUpdate, LineItemId};

use crate::bill::item_line;
use crate::{reject, Session, EXIT_OK};

/// Arguments for `gstb item`.
#[derive(Args, Debug)]
pub struct ItemArgs {
    #[command(subcommand)]
    pub command: ItemCommand,
}

/// Item subcommands.
#[derive(Subcommand, Debug)]
pub enum ItemCommand {
    /// List the items in order.
    List,
    /// Append an item. Unset fields keep the blank-item defaults.
    Add(ItemFields),
    /// Change fields of an existing item.
    Update {
        /// Item id or unique id prefix.
        id: String,
        #[command(flatten)]
        fields: ItemFields,
    },
    /// Remove an item.
    Remove {
        /// Item id or unique id prefix.
        id: String,
    },
}

/// Editable item fields.
#[derive(Args, Debug, Default, Clone)]
pub struct ItemFields {
    /// Description of the goods or service.
    #[arg(long)]
    pub name: Option<String>,
    /// HSN/SAC code.
    #[arg(long)]
    pub hsn: Option<String>,
    /// Quantity.
    #[arg(long, allow_negative_numbers = true)]
    pub qty: Option<f64>,
    /// Unit price in rupees, before tax.
    #[arg(long, allow_negative_numbers = true)]
    pub price: Option<f64>,
    /// GST rate in percent; must be one of the allowed rates.
    #[arg(long, allow_negative_numbers = true)]
    pub gst: Option<f64>,
}

impl ItemFields {
    fn to_update(&self) -> ItemUpdate {
        ItemUpdate {
            name: self.name.clone(),
            hsn_code: self.hsn.as_deref().map(|h| h.trim().to_string()),
            quantity: self.qty,
            unit_price: self.price,
            gst_rate: self.gst,
        }
    }
}

/// Execute the item subcommand.
pub fn run_item(args: &ItemArgs, session: &Session<'_>) -> Result<u8> {
    match &args.command {
        ItemCommand::List => cmd_list(session),
        ItemCommand::Add(fields) => cmd_add(session, fields),
        ItemCommand::Update { id, fields } => cmd_update(session, id, fields),
        ItemCommand::Remove { id } => cmd_remove(session, id),
    }
}

/// Resolve a full id or unique prefix to an item id.
pub fn resolve_id(bill: &BillState, wanted: &str) -> Result<LineItemId, String> {
    let wanted = wanted.trim();
    if wanted.is_empty() {
        return Err("item id must not be empty".to_string());
    }
    if let Some(item) = bill.invoice.items.iter().find(|i| i.id.as_str() == wanted) {
        return Ok(item.id.clone());
    }
    let matches: Vec<&LineItemId> = bill
        .invoice
        .items
        .iter()
        .map(|i| &i.id)
        .filter(|id| id.as_str().starts_with(wanted))
        .collect();
    match matches.as_slice() {
        [id] => Ok((*id).clone()),
        [] => Err(format!("no item with id '{wanted}'")),
        _ => Err(format!("item id '{wanted}' is ambiguous ({} matches)", matches.len())),
    }
}

fn cmd_list(session: &Session<'_>) -> Result<u8> {
    let bill = session.load();
    if bill.invoice.items.is_empty() {
        println!("No items.");
    }
    for item in &bill.invoice.items {
        println!("{}", item_line(item));
    }
    Ok(EXIT_OK)
}

fn cmd_add(session: &Session<'_>, fields: &ItemFields) -> Result<u8> {
    let mut bill = session.load();
    let id = bill.add_item();
    if let Err(e) = bill.update_item(&id, fields.to_update()) {
        // Nothing saved; the blank item is discarded with `bill`.
        return reject(e);
    }
    session.commit(&bill)?;
    tracing::info!(item_id = %id, "added item");
    println!("OK: added item {id}");
    Ok(EXIT_OK)
}

fn cmd_update(session: &Session<'_>, id: &str, fields: &ItemFields) -> Result<u8> {
    let mut bill = session.load();
    let id = match resolve_id(&bill, id) {
        Ok(id) => id,
        Err(e) => return reject(e),
    };
    if let Err(e) = bill.update_item(&id, fields.to_update()) {
        return reject(e);
    }
    session.commit(&bill)?;
    tracing::info!(item_id = %id, "updated item");
    println!("OK: updated item {id}");
    Ok(EXIT_OK)
}

fn cmd_remove(session: &Session<'_>, id: &str) -> Result<u8> {
    let mut bill = session.load();
    let id = match resolve_id(&bill, id) {
        Ok(id) => id,
        Err(e) => return reject(e),
    };
    let removed = match bill.remove_item(&id) {
        Ok(item) => item,
        Err(e) => return reject(e),
    };
    session.commit(&bill)?;
    tracing::info!(item_id = %id, "removed item");
    println!("OK: removed item {id} ({})", removed.name);
    Ok(EXIT_OK)
}

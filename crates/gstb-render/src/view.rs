//! # Document View
//!
//! A display-ready snapshot of one invoice: every amount already formatted,
//! every optional block already decided. Both the text and HTML renderers
//! read only this struct, so the Pro-tier gating lives in one place:
//!
//! - the "free version" watermark is shown whenever the tier is locked,
//! - the business logo is shown only when unlocked and non-empty.

use gstb_core::{format_inr, format_rate, BillState, Totals};

/// Footer line shown on documents produced by the free tier.
pub const WATERMARK_TEXT: &str = "Made with GST Bill Maker — Free version";

/// Placeholder for an empty GSTIN.
pub const MISSING_GSTIN: &str = "—";

/// One row of the item table.
#[derive(Debug, Clone, PartialEq)]
pub struct ItemRow {
    /// 1-based position.
    pub index: usize,
    pub name: String,
    pub hsn_code: String,
    pub quantity: String,
    pub unit_price: String,
    pub gst_rate: String,
    pub amount: String,
}

/// One labelled line of the totals block.
#[derive(Debug, Clone, PartialEq)]
pub struct TotalLine {
    pub label: &'static str,
    pub value: String,
}

/// Name/address block for one party.
#[derive(Debug, Clone, PartialEq)]
pub struct PartyBlock {
    pub name: String,
    pub address_lines: Vec<String>,
    pub gstin: String,
    pub state: String,
    pub phone: String,
    pub email: String,
}

/// Everything a renderer needs, pre-formatted.
#[derive(Debug, Clone, PartialEq)]
pub struct DocumentView {
    pub business: PartyBlock,
    /// Logo URL, empty when the logo must not be shown.
    pub logo: String,
    pub client: PartyBlock,
    pub invoice_number: String,
    pub date: String,
    /// Due date, empty when not set.
    pub due: String,
    pub place_of_supply: String,
    /// `"IGST"` or `"CGST + SGST"`.
    pub tax_mode: &'static str,
    pub rows: Vec<ItemRow>,
    pub notes: String,
    pub terms: String,
    /// Subtotal, discount, shipping, then the tax lines.
    pub totals: Vec<TotalLine>,
    pub grand_total: String,
    pub watermark: bool,
}

impl DocumentView {
    /// Build the view for `state` with its computed `totals`.
    pub fn new(state: &BillState, totals: &Totals) -> Self {
        let inv = &state.invoice;
        let rows = inv
            .items
            .iter()
            .enumerate()
            .map(|(i, item)| ItemRow {
                index: i + 1,
                name: item.name.clone(),
                hsn_code: item.hsn_code.clone(),
                quantity: format_quantity(item.quantity),
                unit_price: format_inr(item.unit_price),
                gst_rate: format_rate(item.gst_rate),
                amount: format_inr(item.amount()),
            })
            .collect();

        let mut lines = vec![
            TotalLine { label: "Subtotal", value: format_inr(totals.subtotal) },
            TotalLine { label: "Discount", value: format_inr(totals.discount) },
            TotalLine { label: "Shipping", value: format_inr(totals.shipping) },
        ];
        if inv.inter_state {
            lines.push(TotalLine { label: "IGST", value: format_inr(totals.igst) });
        } else {
            lines.push(TotalLine { label: "CGST", value: format_inr(totals.cgst) });
            lines.push(TotalLine { label: "SGST", value: format_inr(totals.sgst) });
        }

        let show_logo = state.pro_unlocked && !state.profile.logo.trim().is_empty();

        Self {
            business: PartyBlock {
                name: state.profile.biz_name.clone(),
                address_lines: split_lines(&state.profile.address),
                gstin: gstin_or_dash(&state.profile.gstin),
                state: state.profile.state.clone(),
                phone: state.profile.phone.clone(),
                email: state.profile.email.clone(),
            },
            logo: if show_logo { state.profile.logo.trim().to_string() } else { String::new() },
            client: PartyBlock {
                name: state.client.name.clone(),
                address_lines: split_lines(&state.client.address),
                gstin: gstin_or_dash(&state.client.gstin),
                state: state.client.state.clone(),
                phone: state.client.phone.clone(),
                email: state.client.email.clone(),
            },
            invoice_number: inv.number.clone(),
            date: inv.date.map(|d| d.format("%Y-%m-%d").to_string()).unwrap_or_default(),
            due: inv.due.map(|d| d.format("%Y-%m-%d").to_string()).unwrap_or_default(),
            place_of_supply: inv.place_of_supply.clone(),
            tax_mode: if inv.inter_state { "IGST" } else { "CGST + SGST" },
            rows,
            notes: inv.notes.clone(),
            terms: inv.terms.clone(),
            totals: lines,
            grand_total: format_inr(totals.grand_total),
            watermark: !state.pro_unlocked,
        }
    }

    /// Whether a logo is to be shown.
    pub fn has_logo(&self) -> bool {
        !self.logo.is_empty()
    }

    /// Whether a due date is to be shown.
    pub fn has_due(&self) -> bool {
        !self.due.is_empty()
    }

    pub fn watermark_text(&self) -> &'static str {
        WATERMARK_TEXT
    }
}

fn gstin_or_dash(gstin: &str) -> String {
    let trimmed = gstin.trim();
    if trimmed.is_empty() {
        MISSING_GSTIN.to_string()
    } else {
        trimmed.to_string()
    }
}

fn split_lines(text: &str) -> Vec<String> {
    text.lines()
        .map(str::trim_end)
        .filter(|l| !l.is_empty())
        .map(str::to_string)
        .collect()
}

/// Quantities print without trailing zeros: `1`, `2.5`, `0.125`.
fn format_quantity(qty: f64) -> String {
    let qty = gstb_core::numeric::coerce(qty);
    if qty.fract() == 0.0 {
        format!("{qty:.0}")
    } else {
        let s = format!("{qty:.3}");
        s.trim_end_matches('0').trim_end_matches('.').to_string()
    }
}

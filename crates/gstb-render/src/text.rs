//! Plain-text print view, for terminals and `lp`.

use std::fmt::Write;

use crate::view::DocumentView;

const RULE_WIDTH: usize = 72;

/// Render the view as fixed-width plain text.
pub fn render_text(view: &DocumentView) -> String {
    let mut out = String::new();
    // Writing into a String cannot fail.
    let _ = write_document(&mut out, view);
    out
}

fn write_document(out: &mut String, v: &DocumentView) -> std::fmt::Result {
    let rule = "=".repeat(RULE_WIDTH);
    let thin = "-".repeat(RULE_WIDTH);

    writeln!(out, "{rule}")?;
    writeln!(out, "{}", v.business.name)?;
    for line in &v.business.address_lines {
        writeln!(out, "{line}")?;
    }
    writeln!(out, "GSTIN: {}", v.business.gstin)?;
    writeln!(out, "State: {}", v.business.state)?;
    if v.has_logo() {
        writeln!(out, "Logo: {}", v.logo)?;
    }
    writeln!(out, "{thin}")?;

    writeln!(out, "Bill To:")?;
    writeln!(out, "  {}", v.client.name)?;
    for line in &v.client.address_lines {
        writeln!(out, "  {line}")?;
    }
    writeln!(out, "  GSTIN: {}", v.client.gstin)?;
    writeln!(out, "  State: {}", v.client.state)?;
    writeln!(out)?;
    writeln!(out, "Invoice No: {}", v.invoice_number)?;
    writeln!(out, "Date: {}", v.date)?;
    if v.has_due() {
        writeln!(out, "Due: {}", v.due)?;
    }
    writeln!(out, "Place of Supply: {}", v.place_of_supply)?;
    writeln!(out, "{}", v.tax_mode)?;
    writeln!(out, "{thin}")?;

    writeln!(
        out,
        "{:>3}  {:<24} {:<8} {:>6} {:>12} {:>5} {:>14}",
        "#", "Item", "HSN/SAC", "Qty", "Rate", "GST", "Amount"
    )?;
    for row in &v.rows {
        writeln!(
            out,
            "{:>3}  {:<24} {:<8} {:>6} {:>12} {:>5} {:>14}",
            row.index,
            truncate(&row.name, 24),
            truncate(&row.hsn_code, 8),
            row.quantity,
            row.unit_price,
            row.gst_rate,
            row.amount
        )?;
    }
    writeln!(out, "{thin}")?;

    for line in &v.totals {
        writeln!(out, "{:>50}  {:>20}", line.label, line.value)?;
    }
    writeln!(out, "{:>50}  {:>20}", "Total", v.grand_total)?;
    writeln!(out, "{thin}")?;

    if !v.notes.is_empty() {
        writeln!(out, "Notes:")?;
        writeln!(out, "{}", v.notes)?;
    }
    if !v.terms.is_empty() {
        writeln!(out, "Terms:")?;
        writeln!(out, "{}", v.terms)?;
    }
    if v.watermark {
        writeln!(out)?;
        writeln!(out, "{:^width$}", v.watermark_text(), width = RULE_WIDTH)?;
    }
    writeln!(out, "{rule}")
}

fn truncate(s: &str, max: usize) -> String {
    if s.chars().count() <= max {
        s.to_string()
    } else {
        let mut t: String = s.chars().take(max.saturating_sub(1)).collect();
        t.push('…');
        t
    }
}

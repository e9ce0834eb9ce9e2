//! # Backup Documents
//!
//! Import and export of the whole bill as a pretty-printed JSON document.
//! The document format is the same one the persistence layer writes, so a
//! backup can also be dropped in as the state file.
//!
//! Import is all-or-nothing: a malformed document is rejected with an
//! [`ImportError`] and the caller keeps its current state.

use gstb_core::BillState;

use crate::error::{ExportError, ImportError};

/// An exported backup, ready to be written or offered for download.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExportedDocument {
    /// Suggested file name, derived from the invoice number.
    pub file_name: String,
    /// Document bytes (UTF-8 JSON).
    pub bytes: Vec<u8>,
}

/// Parse a bill from document text.
///
/// The top level must be a JSON object. Missing fields take their defaults
/// and loose numeric fields are normalized (see `gstb_core::numeric`).
///
/// # Errors
///
/// [`ImportError`] if the text is empty, not JSON, not an object, or has
/// fields of the wrong shape.
pub fn import_document(text: &str) -> Result<BillState, ImportError> {
    if text.trim().is_empty() {
        return Err(ImportError::Empty);
    }
    let value: serde_json::Value = serde_json::from_str(text)?;
    if !value.is_object() {
        return Err(ImportError::NotAnObject(json_kind(&value)));
    }
    let state: BillState = serde_json::from_value(value)?;
    tracing::debug!(
        invoice = %state.invoice.number,
        items = state.invoice.items.len(),
        "parsed bill document"
    );
    Ok(state)
}

/// Parse a bill from raw document bytes, as read from a backup file.
///
/// # Errors
///
/// [`ImportError::NotUtf8`] if the bytes are not UTF-8, otherwise as
/// [`import_document`].
pub fn import_bytes(bytes: &[u8]) -> Result<BillState, ImportError> {
    import_document(std::str::from_utf8(bytes)?)
}

/// Serialize a bill into a backup document.
///
/// # Errors
///
/// [`ExportError::Serialize`] if serialization fails.
pub fn export_document(state: &BillState) -> Result<ExportedDocument, ExportError> {
    let bytes = serde_json::to_vec_pretty(state)?;
    Ok(ExportedDocument {
        file_name: export_file_name(&state.invoice.number),
        bytes,
    })
}

/// File name for a backup of the given invoice: `gst-bill-<number>.json`.
///
/// Path separators and other characters that are unsafe in file names are
/// replaced with `-`.
pub fn export_file_name(invoice_number: &str) -> String {
    let safe: String = invoice_number
        .trim()
        .chars()
        .map(|c| match c {
            '/' | '\\' | ':' | '*' | '?' | '"' | '<' | '>' | '|' => '-',
            c if c.is_control() => '-',
            c => c,
        })
        .collect();
    format!("gst-bill-{safe}.json")
}

fn json_kind(value: &serde_json::Value) -> &'static str {
    match value {
        serde_json::Value::Null => "null",
        serde_json::Value::Bool(_) => "a boolean",
        serde_json::Value::Number(_) => "a number",
        serde_json::Value::String(_) => "a string",
        serde_json::Value::Array(_) => "an array",
        serde_json::Value::Object(_) => "an object",
    }
}

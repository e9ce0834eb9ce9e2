//! Error types for persistence and import/export.

use std::path::PathBuf;

use thiserror::Error;

/// Failure to write a snapshot.
///
/// Loading never fails (absent or corrupt data yields the default state),
/// so only saving has an error type.
#[derive(Error, Debug)]
pub enum StoreError {
    /// The state could not be serialized.
    #[error("failed to serialize bill state: {0}")]
    Serialize(#[from] serde_json::Error),

    /// Writing the snapshot file failed.
    #[error("failed to write {path}: {source}")]
    Write {
        /// Destination that could not be written.
        path: PathBuf,
        /// Underlying I/O error.
        #[source]
        source: std::io::Error,
    },
}

/// Rejection of an imported document. The caller's current state is untouched.
#[derive(Error, Debug)]
pub enum ImportError {
    /// The document is empty or whitespace.
    #[error("invalid document: empty input")]
    Empty,

    /// The document is not JSON, or not shaped like a bill.
    #[error("invalid document: {0}")]
    Malformed(#[from] serde_json::Error),

    /// The document bytes are not UTF-8 text.
    #[error("invalid document: not UTF-8 text: {0}")]
    NotUtf8(#[from] std::str::Utf8Error),

    /// The top-level JSON value is not an object.
    #[error("invalid document: expected a JSON object, found {0}")]
    NotAnObject(&'static str),
}

/// Failure to produce a backup document.
#[derive(Error, Debug)]
pub enum ExportError {
    /// The state could not be serialized.
    #[error("failed to serialize bill state: {0}")]
    Serialize(#[from] serde_json::Error),
}

//! # gstb-store — Persistence and Backups
//!
//! Everything that moves a [`gstb_core::BillState`] in or out of the
//! process:
//!
//! - [`StateStore`] — the injectable load/save seam, with a [`FileStore`]
//!   for the local disk and a [`MemoryStore`] for tests.
//! - [`import_document`] / [`import_bytes`] / [`export_document`] — backup
//!   documents.
//!
//! Loading never fails: absent or corrupt data yields the default state.
//! Importing does fail, so the caller can tell the user the document was
//! invalid while keeping the state they already had.

pub mod document;
pub mod error;
pub mod store;

pub use document::{
    export_document, export_file_name, import_bytes, import_document, ExportedDocument,
};
pub use error::{ExportError, ImportError, StoreError};
pub use store::{FileStore, MemoryStore, StateStore, STATE_FILE_NAME};

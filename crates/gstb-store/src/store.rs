//! # State Stores
//!
//! The persistence seam. The editing surface holds a `&dyn StateStore`,
//! loads once, mutates, and saves the full snapshot after every change
//! (last write wins).
//!
//! ## Loading is infallible
//!
//! A store that has nothing saved, cannot be read, or holds a document
//! that does not parse returns the built-in default state and logs the
//! reason at `warn`. The corrupt data is left in place until the next save
//! overwrites it.

use std::cell::RefCell;
use std::path::{Path, PathBuf};

use gstb_core::BillState;

use crate::document::import_document;
use crate::error::StoreError;

/// File name used for the persisted state inside a data directory.
pub const STATE_FILE_NAME: &str = "gst-bill-maker-v1.json";

/// Load/save of the full bill snapshot.
pub trait StateStore {
    /// Load the saved state, or the default state if none is usable.
    fn load(&self) -> BillState;

    /// Persist a full snapshot, replacing whatever was saved before.
    ///
    /// # Errors
    ///
    /// [`StoreError`] if the snapshot cannot be serialized or written.
    fn save(&self, state: &BillState) -> Result<(), StoreError>;
}

/// JSON snapshot in a single file on the local disk.
#[derive(Debug, Clone)]
pub struct FileStore {
    path: PathBuf,
}

impl FileStore {
    /// A store backed by the file at `path`. Nothing is touched until the
    /// first load or save.
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// A store using [`STATE_FILE_NAME`] inside `dir`.
    pub fn in_dir(dir: &Path) -> Self {
        Self::new(dir.join(STATE_FILE_NAME))
    }

    /// Path of the snapshot file.
    pub fn path(&self) -> &Path {
        &self.path
    }

    fn temp_path(&self) -> PathBuf {
        let mut name = self
            .path
            .file_name()
            .map(|n| n.to_os_string())
            .unwrap_or_else(|| STATE_FILE_NAME.into());
        name.push(".tmp");
        self.path.with_file_name(name)
    }

    fn write_err(&self, path: &Path) -> impl FnOnce(std::io::Error) -> StoreError {
        let path = path.to_path_buf();
        move |source| StoreError::Write { path, source }
    }
}

impl StateStore for FileStore {
    fn load(&self) -> BillState {
        let text = match std::fs::read_to_string(&self.path) {
            Ok(text) => text,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                tracing::debug!(path = %self.path.display(), "no saved state; using defaults");
                return BillState::default();
            }
            Err(e) => {
                tracing::warn!(path = %self.path.display(), error = %e, "cannot read saved state; using defaults");
                return BillState::default();
            }
        };
        match import_document(&text) {
            Ok(state) => {
                tracing::debug!(path = %self.path.display(), "loaded saved state");
                state
            }
            Err(e) => {
                tracing::warn!(path = %self.path.display(), error = %e, "saved state is corrupt; using defaults");
                BillState::default()
            }
        }
    }

    fn save(&self, state: &BillState) -> Result<(), StoreError> {
        let bytes = serde_json::to_vec_pretty(state)?;
        if let Some(parent) = self.path.parent().filter(|p| !p.as_os_str().is_empty()) {
            std::fs::create_dir_all(parent).map_err(self.write_err(parent))?;
        }
        // Write beside the target and rename so a crash never leaves a torn file.
        let tmp = self.temp_path();
        std::fs::write(&tmp, &bytes).map_err(self.write_err(&tmp))?;
        std::fs::rename(&tmp, &self.path).map_err(self.write_err(&self.path))?;
        tracing::debug!(path = %self.path.display(), bytes = bytes.len(), "saved state");
        Ok(())
    }
}

/// In-memory store holding the serialized snapshot text.
///
/// Keeps text rather than a `BillState` so tests can seed it with corrupt
/// data and observe exactly what a save produced.
#[derive(Debug, Default)]
pub struct MemoryStore {
    slot: RefCell<Option<String>>,
}

impl MemoryStore {
    /// An empty store.
    pub fn new() -> Self {
        Self::default()
    }

    /// A store pre-seeded with raw document text.
    pub fn with_raw(text: impl Into<String>) -> Self {
        Self {
            slot: RefCell::new(Some(text.into())),
        }
    }

    /// The raw text of the last save (or seed), if any.
    pub fn raw(&self) -> Option<String> {
        self.slot.borrow().clone()
    }
}

impl StateStore for MemoryStore {
    fn load(&self) -> BillState {
        match self.slot.borrow().as_deref() {
            None => BillState::default(),
            Some(text) => import_document(text).unwrap_or_else(|e| {
                tracing::warn!(error = %e, "stored state is corrupt; using defaults");
                BillState::default()
            }),
        }
    }

    fn save(&self, state: &BillState) -> Result<(), StoreError> {
        let text = serde_json::to_string(state)?;
        *self.slot.borrow_mut() = Some(text);
        Ok(())
    }
}

//! # gstb-cli — GST Bill Maker Command-Line Interface
//!
//! The editing surface over the bill held by a [`StateStore`]. Every
//! command performs one load → mutate → save cycle:
//!
//! ```bash
//! gstb profile --name "Sharma Sealcoating" --state Rajasthan
//! gstb client --name "Acme" --state Gujarat
//! gstb item add --name "Crack filling" --hsn 9954 --qty 2 --price 800 --gst 18
//! gstb show
//! gstb render --format html --out invoice.html
//! ```
//!
//! ## Exit codes
//!
//! - `0` success,
//! - `1` rejected input (bad key, document, item id, amount, rate or state),
//! - `2` operational failure (I/O, configuration).
//!
//! ## Crate Policy
//!
//! - Argument parsing is separated from the handlers.
//! - Handlers delegate to the library crates; no tax or validation logic here.

pub mod backup;
pub mod bill;
pub mod config;
pub mod item;
pub mod license;
pub mod party;
pub mod print;
pub mod rates;

use std::fmt::Display;
use std::str::FromStr;

use anyhow::{Context, Result};

use gstb_core::{BillState, IndianState};
use gstb_store::StateStore;

pub use config::AppConfig;

/// Exit code for success.
pub const EXIT_OK: u8 = 0;
/// Exit code for rejected input.
pub const EXIT_REJECTED: u8 = 1;
/// Exit code for operational failures.
pub const EXIT_FAILURE: u8 = 2;

/// What every handler runs against.
pub struct Session<'a> {
    pub store: &'a dyn StateStore,
    pub config: &'a AppConfig,
}

impl<'a> Session<'a> {
    pub fn new(store: &'a dyn StateStore, config: &'a AppConfig) -> Self {
        Self { store, config }
    }

    /// Load the current bill.
    pub fn load(&self) -> BillState {
        self.store.load()
    }

    /// Persist the bill.
    ///
    /// # Errors
    ///
    /// Fails if the store cannot write.
    pub fn commit(&self, state: &BillState) -> Result<()> {
        self.store.save(state).context("failed to save bill state")
    }
}

/// Report rejected input on stderr and return [`EXIT_REJECTED`].
pub fn reject(reason: impl Display) -> Result<u8> {
    eprintln!("error: {reason}");
    Ok(EXIT_REJECTED)
}

/// Resolve a state name against the catalogue, returning its canonical form.
pub fn canonical_state(name: &str) -> std::result::Result<String, gstb_core::GstbError> {
    IndianState::from_str(name).map(|s| s.as_str().to_string())
}

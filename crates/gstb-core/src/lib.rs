//! # gstb-core — GST Bill Maker Core
//!
//! Types and pure logic for an offline GST invoice: the bill model, the
//! tax calculator, supply-type derivation, typed editor operations and the
//! offline license gate. Persistence, import/export and rendering live in
//! the collaborator crates and only ever see a [`BillState`].
//!
//! ## Key Design Principles
//!
//! 1. **The calculator is total.** [`tax::compute`] never fails and never
//!    returns `NaN`. Loose numeric input is normalized in one place,
//!    [`numeric`], at the calculator boundary and at the wire boundary.
//!
//! 2. **Typed updates, no path strings.** Every edit goes through a patch
//!    struct ([`ProfileUpdate`], [`ClientUpdate`], [`InvoiceUpdate`],
//!    [`ItemUpdate`]) and is validated before anything is written.
//!
//! 3. **Supply type follows the parties.** Changing either party's state
//!    recomputes `inter_state` and resets the place of supply.
//!
//! 4. **Wire compatibility.** The serialized form keeps the camelCase field
//!    names of existing backups.
//!
//! ## Crate Policy
//!
//! - No dependencies on other `gstb-*` crates (this is the leaf of the DAG).
//! - No I/O.
//! - No `panic!()` or `.unwrap()` outside tests.

pub mod editor;
pub mod error;
pub mod identity;
pub mod jurisdiction;
pub mod license;
pub mod model;
pub mod money;
pub mod numeric;
pub mod rates;
pub mod tax;

// Re-export primary types for ergonomic imports.
pub use editor::{ClientUpdate, InvoiceUpdate, ItemUpdate, ProfileUpdate};
pub use error::{EditError, GstbError, LicenseError};
pub use identity::LineItemId;
pub use jurisdiction::{derive_supply, IndianState, SupplyJurisdiction, INDIAN_STATE_COUNT};
pub use license::LicensePolicy;
pub use model::{BillState, BusinessProfile, Client, Invoice, LineItem};
pub use money::{format_amount, format_inr, format_rate};
pub use rates::{DEFAULT_GST_RATES, DEFAULT_ITEM_GST_RATE};
pub use tax::{compute, Totals};

//! # Error Types
//!
//! Error enums for the editing and licensing surfaces. All use `thiserror`
//! for derive-based `Display` and `Error` implementations.
//!
//! The tax calculator has no error type: it is total over every numeric
//! input and never fails.

use thiserror::Error;

/// Top-level error type for the GST Bill Maker core.
#[derive(Error, Debug)]
pub enum GstbError {
    /// An editor operation was rejected.
    #[error("edit rejected: {0}")]
    Edit(#[from] EditError),

    /// A license key failed the offline format check.
    #[error("license error: {0}")]
    License(#[from] LicenseError),

    /// A state name is not in the Indian state catalogue.
    #[error("unknown Indian state or union territory: {0:?}")]
    UnknownState(String),
}

/// Rejection of a typed editor update.
///
/// A rejected update leaves the state exactly as it was before the call.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum EditError {
    /// No line item carries the given identifier.
    #[error("no line item with id {0}")]
    ItemNotFound(String),

    /// An amount was negative or not a finite number.
    #[error("{field} must be a finite, non-negative amount (got {value})")]
    InvalidAmount {
        /// Name of the rejected field.
        field: &'static str,
        /// The value that was supplied.
        value: f64,
    },

    /// The GST rate is not in the active rate catalogue.
    #[error("GST rate {rate}% is not one of the allowed rates {allowed:?}")]
    RateNotAllowed {
        /// The rejected rate.
        rate: f64,
        /// The catalogue in force when the update was attempted.
        allowed: Vec<f64>,
    },

    /// A custom rate catalogue entry is outside 0..=100 or not finite.
    #[error("custom GST rate {0} must be between 0 and 100")]
    InvalidCustomRate(f64),

    /// The feature is only available once the Pro tier is unlocked.
    #[error("{0} requires Pro; unlock with a license key first")]
    ProRequired(&'static str),
}

/// Failure of the offline license-key check.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum LicenseError {
    /// The key does not match the license format.
    #[error("invalid license key")]
    InvalidKey,

    /// The license policy itself could not be compiled into a pattern.
    #[error("invalid license policy: {0}")]
    InvalidPolicy(String),
}

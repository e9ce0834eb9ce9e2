//! # Offline License Gate
//!
//! Unlocks the Pro tier (no watermark, business logo, custom GST rates)
//! when a key matches the license format:
//!
//! ```text
//! <PREFIX>-<YEAR>-<6 × [A-Z0-9]>        e.g. NSQ-2025-AB12CD
//! ```
//!
//! This is a plain string-pattern match done entirely on the device. There
//! is no signature, no purchase record and no server round-trip; anyone who
//! knows the format can produce a key. Sellers change the prefix and year
//! list through [`LicensePolicy`].

use regex::Regex;
use serde::{Deserialize, Serialize};

use crate::error::LicenseError;
use crate::model::BillState;

/// Default key prefix.
pub const DEFAULT_LICENSE_PREFIX: &str = "NSQ";

/// Years accepted by default.
pub const DEFAULT_LICENSE_YEARS: [u16; 2] = [2025, 2026];

/// Which keys unlock the Pro tier.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct LicensePolicy {
    /// Literal prefix before the first dash.
    pub prefix: String,
    /// Accepted year segments.
    pub years: Vec<u16>,
}

impl Default for LicensePolicy {
    fn default() -> Self {
        Self {
            prefix: DEFAULT_LICENSE_PREFIX.to_string(),
            years: DEFAULT_LICENSE_YEARS.to_vec(),
        }
    }
}

impl LicensePolicy {
    /// Compile the policy into an anchored pattern.
    ///
    /// # Errors
    ///
    /// [`LicenseError::InvalidPolicy`] if the prefix is empty or no years
    /// are listed.
    pub fn pattern(&self) -> Result<Regex, LicenseError> {
        if self.prefix.trim().is_empty() {
            return Err(LicenseError::InvalidPolicy("prefix must not be empty".into()));
        }
        if self.years.is_empty() {
            return Err(LicenseError::InvalidPolicy("at least one year is required".into()));
        }
        let years = self
            .years
            .iter()
            .map(u16::to_string)
            .collect::<Vec<_>>()
            .join("|");
        let source = format!(
            "^{}-(?:{})-[A-Z0-9]{{6}}$",
            regex::escape(self.prefix.trim()),
            years
        );
        Regex::new(&source).map_err(|e| LicenseError::InvalidPolicy(e.to_string()))
    }

    /// Check a key against the policy.
    ///
    /// # Errors
    ///
    /// [`LicenseError::InvalidKey`] if the key does not match, or
    /// [`LicenseError::InvalidPolicy`] if the policy is unusable.
    pub fn validate(&self, key: &str) -> Result<(), LicenseError> {
        if self.pattern()?.is_match(key) {
            Ok(())
        } else {
            Err(LicenseError::InvalidKey)
        }
    }
}

impl BillState {
    /// Unlock the Pro tier with `key`.
    ///
    /// On success the key is stored and the unlock flag set. On failure
    /// nothing changes.
    ///
    /// # Errors
    ///
    /// See [`LicensePolicy::validate`].
    pub fn unlock(&mut self, policy: &LicensePolicy, key: &str) -> Result<(), LicenseError> {
        policy.validate(key)?;
        self.pro_unlocked = true;
        self.license_key = key.to_string();
        tracing::info!("pro tier unlocked");
        Ok(())
    }
}

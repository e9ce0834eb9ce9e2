//! # Line Item Identifiers
//!
//! Opaque identifiers for line items. New items get a random UUID-derived
//! id; ids read from stored or imported documents are kept verbatim, since
//! backups written by older versions use short base-36 ids.

use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Identifier of a line item, unique within one invoice.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct LineItemId(String);

impl LineItemId {
    /// Generate a fresh random identifier.
    pub fn generate() -> Self {
        Self(Uuid::new_v4().simple().to_string())
    }

    /// Wrap an existing identifier string.
    pub fn from_string(value: impl Into<String>) -> Self {
        Self(value.into())
    }

    /// Access the identifier string.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl Default for LineItemId {
    fn default() -> Self {
        Self::generate()
    }
}

impl std::fmt::Display for LineItemId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for LineItemId {
    fn from(value: &str) -> Self {
        Self(value.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn generated_ids_are_unique() {
        let a = LineItemId::generate();
        let b = LineItemId::generate();
        assert_ne!(a, b);
        assert_eq!(a.as_str().len(), 32);
    }

    #[test]
    fn legacy_ids_survive_serde() {
        let id: LineItemId = serde_json::from_str(r#""k3x9a1b""#).unwrap();
        assert_eq!(id.as_str(), "k3x9a1b");
        assert_eq!(serde_json::to_string(&id).unwrap(), r#""k3x9a1b""#);
    }

    #[test]
    fn display_matches_inner_string() {
        let id = LineItemId::from("abc1234");
        assert_eq!(format!("{id}"), "abc1234");
    }
}

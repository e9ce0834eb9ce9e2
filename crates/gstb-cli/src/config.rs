//! # CLI Configuration
//!
//! Resolution order, later wins:
//!
//! 1. built-in defaults,
//! 2. the YAML file given with `--config`,
//! 3. environment variables,
//! 4. the `--state-file` flag (applied by the caller).
//!
//! ```yaml
//! state_file: /home/me/bills/state.json
//! license:
//!   prefix: NSQ
//!   years: [2025, 2026]
//! ```
//!
//! Variables:
//! - `GSTB_STATE_FILE` — path of the persisted state.
//! - `GSTB_DATA_DIR` — directory for the state file when no explicit path
//!   is set (default: `.gstb`).
//! - `GSTB_LICENSE_PREFIX` — license key prefix.
//! - `GSTB_LICENSE_YEARS` — comma-separated accepted years.

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use serde::Deserialize;

use gstb_core::LicensePolicy;
use gstb_store::STATE_FILE_NAME;

/// Data directory used when neither a state file nor `GSTB_DATA_DIR` is set.
pub const DEFAULT_DATA_DIR: &str = ".gstb";

/// Resolved settings for one invocation.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct AppConfig {
    /// Explicit path of the persisted state.
    #[serde(default)]
    pub state_file: Option<PathBuf>,

    /// License key format.
    #[serde(default)]
    pub license: LicensePolicy,

    /// Directory holding the state file when `state_file` is unset.
    #[serde(skip)]
    pub data_dir: Option<PathBuf>,
}

impl AppConfig {
    /// Load the config file (if any) and apply the process environment.
    ///
    /// # Errors
    ///
    /// Fails if a named config file cannot be read or parsed, or an
    /// environment variable holds an unusable value.
    pub fn load(path: Option<&Path>) -> Result<Self> {
        let mut config = match path {
            Some(path) => {
                let text = std::fs::read_to_string(path)
                    .with_context(|| format!("failed to read config file {}", path.display()))?;
                Self::from_yaml(&text)
                    .with_context(|| format!("invalid config file {}", path.display()))?
            }
            None => Self::default(),
        };
        config.apply_env(|key| std::env::var(key).ok())?;
        tracing::debug!(?config, "resolved configuration");
        Ok(config)
    }

    /// Parse a YAML config document. An empty document means defaults.
    ///
    /// # Errors
    ///
    /// Fails on malformed YAML or unknown keys.
    pub fn from_yaml(text: &str) -> Result<Self> {
        if text.trim().is_empty() {
            return Ok(Self::default());
        }
        Ok(serde_yaml::from_str(text)?)
    }

    /// Override fields from environment variables read through `lookup`.
    ///
    /// # Errors
    ///
    /// Fails if `GSTB_LICENSE_YEARS` holds a non-numeric entry.
    pub fn apply_env(&mut self, lookup: impl Fn(&str) -> Option<String>) -> Result<()> {
        let set = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());

        if let Some(path) = set("GSTB_STATE_FILE") {
            self.state_file = Some(PathBuf::from(path));
        }
        if let Some(dir) = set("GSTB_DATA_DIR") {
            self.data_dir = Some(PathBuf::from(dir));
        }
        if let Some(prefix) = set("GSTB_LICENSE_PREFIX") {
            self.license.prefix = prefix.trim().to_string();
        }
        if let Some(years) = set("GSTB_LICENSE_YEARS") {
            self.license.years = parse_years(&years)?;
        }
        Ok(())
    }

    /// Path of the persisted state after all overrides.
    pub fn state_path(&self) -> PathBuf {
        match &self.state_file {
            Some(path) => path.clone(),
            None => self
                .data_dir
                .clone()
                .unwrap_or_else(|| PathBuf::from(DEFAULT_DATA_DIR))
                .join(STATE_FILE_NAME),
        }
    }
}

fn parse_years(list: &str) -> Result<Vec<u16>> {
    list.split(',')
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(|s| {
            s.parse::<u16>()
                .with_context(|| format!("GSTB_LICENSE_YEARS: '{s}' is not a year"))
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn env(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key: &str| map.get(key).cloned()
    }

    #[test]
    fn defaults_point_into_data_dir() {
        let config = AppConfig::default();
        assert_eq!(config.state_path(), Path::new(".gstb").join(STATE_FILE_NAME));
        assert_eq!(config.license, LicensePolicy::default());
    }

    #[test]
    fn yaml_sets_fields() {
        let config = AppConfig::from_yaml(
            "state_file: /tmp/bill.json\nlicense:\n  prefix: ABC\n  years: [2030]\n",
        )
        .unwrap();
        assert_eq!(config.state_path(), PathBuf::from("/tmp/bill.json"));
        assert_eq!(config.license.prefix, "ABC");
        assert_eq!(config.license.years, vec![2030]);
    }

    #[test]
    fn empty_yaml_is_default() {
        assert_eq!(AppConfig::from_yaml("  \n").unwrap(), AppConfig::default());
    }

    #[test]
    fn unknown_keys_are_rejected() {
        assert!(AppConfig::from_yaml("state_fle: x.json\n").is_err());
        assert!(AppConfig::from_yaml("license:\n  prefx: X\n").is_err());
    }

    #[test]
    fn env_overrides_file() {
        let mut config = AppConfig::from_yaml("state_file: a.json\n").unwrap();
        config
            .apply_env(env(&[
                ("GSTB_STATE_FILE", "b.json"),
                ("GSTB_LICENSE_PREFIX", " XYZ "),
                ("GSTB_LICENSE_YEARS", "2027, 2028"),
            ]))
            .unwrap();
        assert_eq!(config.state_path(), PathBuf::from("b.json"));
        assert_eq!(config.license.prefix, "XYZ");
        assert_eq!(config.license.years, vec![2027, 2028]);
    }

    #[test]
    fn data_dir_applies_only_without_explicit_file() {
        let mut config = AppConfig::default();
        config.apply_env(env(&[("GSTB_DATA_DIR", "/var/gstb")])).unwrap();
        assert_eq!(config.state_path(), Path::new("/var/gstb").join(STATE_FILE_NAME));

        config.state_file = Some(PathBuf::from("x.json"));
        assert_eq!(config.state_path(), PathBuf::from("x.json"));
    }

    #[test]
    fn blank_env_values_are_ignored() {
        let mut config = AppConfig::default();
        config.apply_env(env(&[("GSTB_LICENSE_PREFIX", "  ")])).unwrap();
        assert_eq!(config.license.prefix, "NSQ");
    }

    #[test]
    fn bad_year_list_is_an_error() {
        let mut config = AppConfig::default();
        assert!(config.apply_env(env(&[("GSTB_LICENSE_YEARS", "2025,soon")])).is_err());
    }
}

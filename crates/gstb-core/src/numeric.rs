//! # Numeric Normalization
//!
//! The single place where loose numeric input becomes a number the tax
//! calculator can use. The rule is the same everywhere:
//!
//! - finite numbers pass through unchanged,
//! - `NaN`, `±inf`, missing values, `null`, empty or non-numeric text are `0`.
//!
//! [`coerce`] is applied by the calculator to every field it reads.
//! [`parse_text`] is what the editing surface uses for typed input, and the
//! [`lenient`] serde adapter applies the same rule to stored and imported
//! documents so that a hand-edited backup with `"qty": "2"` or
//! `"price": null` still loads.

/// Normalize a number: finite values pass through, anything else is zero.
#[inline]
pub fn coerce(value: f64) -> f64 {
    if value.is_finite() {
        value
    } else {
        0.0
    }
}

/// Parse free-form text as an amount.
///
/// Surrounding whitespace is ignored. Empty or unparseable text yields `0`,
/// as does text that parses to a non-finite value (`"inf"`, `"NaN"`).
pub fn parse_text(text: &str) -> f64 {
    let trimmed = text.trim();
    if trimmed.is_empty() {
        return 0.0;
    }
    trimmed.parse::<f64>().map(coerce).unwrap_or(0.0)
}

/// Serde adapter for lenient numeric fields.
///
/// Use with `#[serde(default, deserialize_with = "crate::numeric::lenient::deserialize")]`.
/// Accepts a JSON number, numeric text, a boolean (`true` is `1`), or
/// `null`; anything else deserializes to `0` instead of failing the whole
/// document.
pub mod lenient {
    use serde::de::IgnoredAny;
    use serde::{Deserialize, Deserializer};

    #[derive(Deserialize)]
    #[serde(untagged)]
    enum Raw {
        Number(f64),
        Text(String),
        Flag(bool),
        Other(IgnoredAny),
    }

    /// Deserialize a lenient number. See the module docs for the accepted forms.
    pub fn deserialize<'de, D>(deserializer: D) -> Result<f64, D::Error>
    where
        D: Deserializer<'de>,
    {
        let raw = Option::<Raw>::deserialize(deserializer)?;
        Ok(match raw {
            Some(Raw::Number(n)) => super::coerce(n),
            Some(Raw::Text(s)) => super::parse_text(&s),
            Some(Raw::Flag(true)) => 1.0,
            Some(Raw::Flag(false)) | Some(Raw::Other(_)) | None => 0.0,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde::Deserialize;

    #[derive(Deserialize)]
    struct Holder {
        #[serde(default, deserialize_with = "lenient::deserialize")]
        value: f64,
    }

    fn read_value(json: &str) -> f64 {
        serde_json::from_str::<Holder>(json).unwrap().value
    }

    #[test]
    fn coerce_passes_finite_values() {
        assert_eq!(coerce(12.5), 12.5);
        assert_eq!(coerce(-3.0), -3.0);
        assert_eq!(coerce(0.0), 0.0);
    }

    #[test]
    fn coerce_zeroes_non_finite_values() {
        assert_eq!(coerce(f64::NAN), 0.0);
        assert_eq!(coerce(f64::INFINITY), 0.0);
        assert_eq!(coerce(f64::NEG_INFINITY), 0.0);
    }

    #[test]
    fn parse_text_handles_typed_input() {
        assert_eq!(parse_text("2500"), 2500.0);
        assert_eq!(parse_text("  12.75 "), 12.75);
        assert_eq!(parse_text(""), 0.0);
        assert_eq!(parse_text("abc"), 0.0);
        assert_eq!(parse_text("inf"), 0.0);
        assert_eq!(parse_text("NaN"), 0.0);
    }

    #[test]
    fn lenient_accepts_numbers() {
        assert_eq!(read_value(r#"{"value": 3}"#), 3.0);
        assert_eq!(read_value(r#"{"value": 2.25}"#), 2.25);
    }

    #[test]
    fn lenient_accepts_numeric_text() {
        assert_eq!(read_value(r#"{"value": "18"}"#), 18.0);
        assert_eq!(read_value(r#"{"value": " 4.5 "}"#), 4.5);
    }

    #[test]
    fn lenient_zeroes_missing_null_and_garbage() {
        assert_eq!(read_value(r#"{}"#), 0.0);
        assert_eq!(read_value(r#"{"value": null}"#), 0.0);
        assert_eq!(read_value(r#"{"value": "twelve"}"#), 0.0);
        assert_eq!(read_value(r#"{"value": [1, 2]}"#), 0.0);
        assert_eq!(read_value(r#"{"value": {"n": 1}}"#), 0.0);
    }

    #[test]
    fn lenient_reads_booleans_like_numbers() {
        assert_eq!(read_value(r#"{"value": true}"#), 1.0);
        assert_eq!(read_value(r#"{"value": false}"#), 0.0);
    }
}

//! # GST Rate Catalogue
//!
//! The discrete set of GST percentages an item may carry. The standard
//! slabs apply unless the Pro tier has configured its own catalogue.

use crate::error::EditError;

/// Standard GST slabs, in percent.
pub const DEFAULT_GST_RATES: [f64; 5] = [0.0, 5.0, 12.0, 18.0, 28.0];

/// Rate given to a newly added line item, in percent.
pub const DEFAULT_ITEM_GST_RATE: f64 = 18.0;

const RATE_EPSILON: f64 = 1e-9;

/// Whether `rate` is one of the entries in `catalogue`.
pub fn is_allowed(rate: f64, catalogue: &[f64]) -> bool {
    rate.is_finite() && catalogue.iter().any(|r| (r - rate).abs() < RATE_EPSILON)
}

/// Validate and canonicalize a custom catalogue: every entry must be a
/// finite percentage in `0..=100`. The result is sorted ascending with
/// duplicates removed.
///
/// # Errors
///
/// Returns [`EditError::InvalidCustomRate`] for the first entry out of range.
pub fn normalize_catalogue(rates: Vec<f64>) -> Result<Vec<f64>, EditError> {
    if let Some(bad) = rates
        .iter()
        .copied()
        .find(|r| !r.is_finite() || *r < 0.0 || *r > 100.0)
    {
        return Err(EditError::InvalidCustomRate(bad));
    }
    let mut rates = rates;
    rates.sort_by(|a, b| a.total_cmp(b));
    rates.dedup_by(|a, b| (*a - *b).abs() < RATE_EPSILON);
    Ok(rates)
}

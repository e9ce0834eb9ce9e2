//! # GST Tax Calculator
//!
//! Pure derivation of invoice totals from the item list, the flat discount,
//! the shipping fee and the supply type. Recomputed on every read and never
//! stored.
//!
//! ## Derivation
//!
//! ```text
//! subtotal       = Σ qty × price
//! taxable_base   = max(subtotal − discount, 0)
//! weighted_rate  = Σ (qty × price / subtotal) × gst / 100      (0 if subtotal ≤ 0)
//! total_gst      = taxable_base × weighted_rate
//! intra-state    : cgst = sgst = total_gst / 2, igst = 0
//! inter-state    : igst = total_gst,            cgst = sgst = 0
//! grand_total    = taxable_base + shipping + total_gst
//! ```
//!
//! The discount applies to the invoice as a whole, so tax is taken on the
//! discounted base at the revenue-weighted blend of the item rates rather
//! than line by line. Shipping is not taxed.
//!
//! Every numeric input passes through [`numeric::coerce`] first, and so
//! does every intermediate that can overflow (line products, sums, the
//! tax itself). That makes the calculator total: no input makes it fail or
//! return `NaN` or an infinity.

use serde::{Deserialize, Serialize};

use crate::model::{BillState, LineItem};
use crate::numeric;

/// Derived invoice totals. All amounts in rupees, unrounded.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Totals {
    pub subtotal: f64,
    pub discount: f64,
    pub shipping: f64,
    /// `max(subtotal − discount, 0)`.
    pub taxable_base: f64,
    /// Blended GST rate as a fraction (0.18 for 18%).
    pub weighted_gst_rate: f64,
    pub total_gst: f64,
    pub cgst: f64,
    pub sgst: f64,
    pub igst: f64,
    pub grand_total: f64,
}

/// Sum of line amounts.
pub fn subtotal(items: &[LineItem]) -> f64 {
    numeric::coerce(items.iter().map(LineItem::amount).sum())
}

/// Revenue-weighted GST rate across `items`, as a fraction.
///
/// Each item contributes its rate in proportion to its share of the
/// pre-discount subtotal. Zero when the subtotal is not positive.
pub fn weighted_gst_rate(items: &[LineItem]) -> f64 {
    let sub = subtotal(items);
    if sub <= 0.0 {
        return 0.0;
    }
    numeric::coerce(
        items
            .iter()
            .map(|item| (item.amount() / sub) * (numeric::coerce(item.gst_rate) / 100.0))
            .sum(),
    )
}

/// Compute the totals for an invoice snapshot.
pub fn compute(items: &[LineItem], discount: f64, shipping: f64, inter_state: bool) -> Totals {
    let discount = numeric::coerce(discount);
    let shipping = numeric::coerce(shipping);

    let subtotal = subtotal(items);
    let taxable_base = numeric::coerce(subtotal - discount).max(0.0);
    let weighted_gst_rate = weighted_gst_rate(items);
    let total_gst = numeric::coerce(taxable_base * weighted_gst_rate);

    let (cgst, sgst, igst) = if inter_state {
        (0.0, 0.0, total_gst)
    } else {
        let half = total_gst / 2.0;
        (half, half, 0.0)
    };

    Totals {
        subtotal,
        discount,
        shipping,
        taxable_base,
        weighted_gst_rate,
        total_gst,
        cgst,
        sgst,
        igst,
        grand_total: numeric::coerce(taxable_base + shipping + total_gst),
    }
}

impl BillState {
    /// Totals for the current snapshot.
    pub fn totals(&self) -> Totals {
        let invoice = &self.invoice;
        let totals = compute(
            &invoice.items,
            invoice.discount,
            invoice.shipping,
            invoice.inter_state,
        );
        tracing::trace!(
            items = invoice.items.len(),
            subtotal = totals.subtotal,
            total_gst = totals.total_gst,
            grand_total = totals.grand_total,
            "computed totals"
        );
        totals
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::identity::LineItemId;

    const EPS: f64 = 1e-9;

    fn item(qty: f64, price: f64, gst: f64) -> LineItem {
        LineItem {
            id: LineItemId::generate(),
            name: String::new(),
            hsn_code: String::new(),
            quantity: qty,
            unit_price: price,
            gst_rate: gst,
        }
    }

    fn close(a: f64, b: f64) -> bool {
        (a - b).abs() < EPS
    }

    #[test]
    fn single_item_intra_state() {
        let t = compute(&[item(1.0, 2500.0, 18.0)], 0.0, 0.0, false);
        assert!(close(t.subtotal, 2500.0));
        assert!(close(t.total_gst, 450.0));
        assert!(close(t.cgst, 225.0));
        assert!(close(t.sgst, 225.0));
        assert_eq!(t.igst, 0.0);
        assert!(close(t.grand_total, 2950.0));
    }

    #[test]
    fn single_item_inter_state() {
        let t = compute(&[item(1.0, 2500.0, 18.0)], 0.0, 0.0, true);
        assert!(close(t.igst, 450.0));
        assert_eq!(t.cgst, 0.0);
        assert_eq!(t.sgst, 0.0);
        assert!(close(t.grand_total, 2950.0));
    }

    #[test]
    fn mixed_rates_blend_by_revenue() {
        let items = [item(1.0, 1000.0, 0.0), item(1.0, 1000.0, 18.0)];
        let t = compute(&items, 0.0, 0.0, false);
        assert!(close(t.subtotal, 2000.0));
        assert!(close(t.weighted_gst_rate, 0.09));
        assert!(close(t.total_gst, 180.0));
        assert!(close(t.grand_total, 2180.0));
    }

    #[test]
    fn discount_is_applied_before_tax() {
        let t = compute(&[item(2.0, 500.0, 18.0)], 200.0, 0.0, false);
        assert!(close(t.taxable_base, 800.0));
        assert!(close(t.total_gst, 144.0));
        assert!(close(t.grand_total, 944.0));
    }

    #[test]
    fn discount_larger_than_subtotal_clamps_to_zero() {
        let t = compute(&[item(1.0, 100.0, 28.0)], 500.0, 50.0, false);
        assert_eq!(t.taxable_base, 0.0);
        assert_eq!(t.total_gst, 0.0);
        assert!(close(t.grand_total, 50.0));
        assert!(close(t.discount, 500.0));
    }

    #[test]
    fn shipping_is_not_taxed() {
        let t = compute(&[item(1.0, 1000.0, 18.0)], 0.0, 100.0, false);
        assert!(close(t.total_gst, 180.0));
        assert!(close(t.grand_total, 1280.0));
    }

    #[test]
    fn empty_invoice_is_all_zero() {
        let t = compute(&[], 0.0, 0.0, false);
        assert_eq!(t.subtotal, 0.0);
        assert_eq!(t.weighted_gst_rate, 0.0);
        assert_eq!(t.grand_total, 0.0);
    }

    #[test]
    fn non_finite_inputs_read_as_zero() {
        let items = [
            item(f64::NAN, 100.0, 18.0),
            item(2.0, f64::INFINITY, 18.0),
            item(1.0, 300.0, f64::NAN),
        ];
        let t = compute(&items, f64::NAN, f64::NEG_INFINITY, false);
        assert!(close(t.subtotal, 300.0));
        assert_eq!(t.weighted_gst_rate, 0.0);
        assert_eq!(t.discount, 0.0);
        assert_eq!(t.shipping, 0.0);
        assert!(close(t.grand_total, 300.0));
        assert!(t.grand_total.is_finite());
    }

    #[test]
    fn overflowing_finite_inputs_stay_finite() {
        let items = [item(1e200, 1e200, 18.0), item(1.0, 1000.0, 18.0)];
        let t = compute(&items, 0.0, 0.0, false);
        assert!(close(t.subtotal, 1000.0));
        assert!(close(t.weighted_gst_rate, 0.18));
        assert!(close(t.grand_total, 1180.0));
        for v in [t.subtotal, t.weighted_gst_rate, t.total_gst, t.cgst, t.sgst, t.grand_total] {
            assert!(v.is_finite());
        }
    }

    #[test]
    fn overflowing_sums_stay_finite() {
        let items = [item(1.0, 1e308, 18.0), item(1.0, 1e308, 18.0)];
        let t = compute(&items, -1e308, 1e308, true);
        for v in [
            t.subtotal,
            t.taxable_base,
            t.weighted_gst_rate,
            t.total_gst,
            t.igst,
            t.grand_total,
        ] {
            assert!(v.is_finite());
        }

        let t = compute(&[item(1.0, 1e300, 1e300)], 0.0, 0.0, false);
        assert!(t.total_gst.is_finite());
        assert!(t.grand_total.is_finite());
    }

    #[test]
    fn zero_priced_items_do_not_divide_by_zero() {
        let t = compute(&[item(3.0, 0.0, 18.0)], 0.0, 0.0, true);
        assert_eq!(t.weighted_gst_rate, 0.0);
        assert_eq!(t.igst, 0.0);
    }

    #[test]
    fn bill_state_totals_follow_inter_state_flag() {
        let mut state = BillState::default();
        state.invoice.inter_state = true;
        let t = state.totals();
        assert!(close(t.igst, 450.0));
        assert_eq!(t.cgst, 0.0);
    }

    #[test]
    fn totals_serialize_camel_case() {
        let t = compute(&[item(1.0, 100.0, 5.0)], 0.0, 0.0, false);
        let json = serde_json::to_value(t).unwrap();
        assert!(json.get("grandTotal").is_some());
        assert!(json.get("weightedGstRate").is_some());
        assert!(json.get("taxableBase").is_some());
    }
}

#[cfg(test)]
mod proptests {
    use super::*;
    use crate::identity::LineItemId;
    use proptest::prelude::*;

    fn line_item() -> impl Strategy<Value = LineItem> {
        (
            0u32..50,
            0u32..100_000,
            prop::sample::select(vec![0.0, 5.0, 12.0, 18.0, 28.0]),
        )
            .prop_map(|(qty, paise, gst)| LineItem {
                id: LineItemId::generate(),
                name: String::new(),
                hsn_code: String::new(),
                quantity: f64::from(qty),
                unit_price: f64::from(paise) / 100.0,
                gst_rate: gst,
            })
    }

    fn tolerance(scale: f64) -> f64 {
        1e-9 * scale.abs().max(1.0)
    }

    proptest! {
        /// Intra-state supplies split the tax evenly and never populate IGST.
        #[test]
        fn intra_state_split(items in prop::collection::vec(line_item(), 0..8),
                             discount in 0u32..10_000, shipping in 0u32..1_000) {
            let t = compute(&items, f64::from(discount), f64::from(shipping), false);
            prop_assert_eq!(t.igst, 0.0);
            prop_assert_eq!(t.cgst, t.sgst);
            prop_assert!((t.cgst + t.sgst - t.total_gst).abs() <= tolerance(t.total_gst));
        }

        /// Inter-state supplies put the whole tax into IGST.
        #[test]
        fn inter_state_split(items in prop::collection::vec(line_item(), 0..8),
                             discount in 0u32..10_000) {
            let t = compute(&items, f64::from(discount), 0.0, true);
            prop_assert_eq!(t.cgst, 0.0);
            prop_assert_eq!(t.sgst, 0.0);
            prop_assert_eq!(t.igst, t.total_gst);
        }

        /// The taxable base is never negative and never exceeds the subtotal.
        #[test]
        fn taxable_base_is_clamped(items in prop::collection::vec(line_item(), 0..8),
                                   discount in 0u32..1_000_000) {
            let t = compute(&items, f64::from(discount), 0.0, false);
            prop_assert!(t.taxable_base >= 0.0);
            prop_assert!(t.taxable_base <= t.subtotal + tolerance(t.subtotal));
            if f64::from(discount) >= t.subtotal {
                prop_assert_eq!(t.taxable_base, 0.0);
                prop_assert_eq!(t.total_gst, 0.0);
            }
        }

        /// A uniform rate is reproduced exactly by the weighted blend.
        #[test]
        fn uniform_rate_matches_flat_tax(items in prop::collection::vec(line_item(), 1..8),
                                         rate in prop::sample::select(vec![0.0, 5.0, 12.0, 18.0, 28.0])) {
            let items: Vec<LineItem> = items
                .into_iter()
                .map(|mut i| { i.gst_rate = rate; i })
                .collect();
            let t = compute(&items, 0.0, 0.0, false);
            let expected = t.subtotal * rate / 100.0;
            prop_assert!((t.total_gst - expected).abs() <= tolerance(expected));
        }

        /// The grand total always reconciles with its parts.
        #[test]
        fn grand_total_reconciles(items in prop::collection::vec(line_item(), 0..8),
                                  discount in 0u32..10_000, shipping in 0u32..1_000,
                                  inter in any::<bool>()) {
            let t = compute(&items, f64::from(discount), f64::from(shipping), inter);
            let parts = t.taxable_base + t.shipping + t.cgst + t.sgst + t.igst;
            prop_assert!((t.grand_total - parts).abs() <= tolerance(t.grand_total));
        }
    }
}

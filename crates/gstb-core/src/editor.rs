//! # Editor Operations
//!
//! Typed updates for every entity in the bill. Each entity has a patch
//! struct whose fields are all `Option`; `None` leaves a field untouched.
//! Updates are validated in full before anything is written, so a rejected
//! update leaves the state exactly as it was.
//!
//! Changing the business or client state recomputes the supply type and
//! resets the place of supply (see [`crate::jurisdiction::derive_supply`]).

use chrono::NaiveDate;

use crate::error::EditError;
use crate::identity::LineItemId;
use crate::jurisdiction::derive_supply;
use crate::model::{BillState, LineItem};
use crate::rates::{self, DEFAULT_GST_RATES};

/// Patch for [`crate::model::BusinessProfile`].
#[derive(Debug, Clone, Default)]
pub struct ProfileUpdate {
    pub biz_name: Option<String>,
    pub owner: Option<String>,
    pub phone: Option<String>,
    pub email: Option<String>,
    pub address: Option<String>,
    pub gstin: Option<String>,
    pub state: Option<String>,
    /// Pro only when non-empty; clearing the logo is always allowed.
    pub logo: Option<String>,
}

/// Patch for [`crate::model::Client`].
#[derive(Debug, Clone, Default)]
pub struct ClientUpdate {
    pub name: Option<String>,
    pub phone: Option<String>,
    pub email: Option<String>,
    pub address: Option<String>,
    pub gstin: Option<String>,
    pub state: Option<String>,
}

/// Patch for the invoice header and invoice-level amounts.
///
/// `date` and `due` are doubly optional: `Some(None)` clears the date.
#[derive(Debug, Clone, Default)]
pub struct InvoiceUpdate {
    pub number: Option<String>,
    pub date: Option<Option<NaiveDate>>,
    pub due: Option<Option<NaiveDate>>,
    /// Free-text place of supply. Setting it leaves `inter_state` as it is;
    /// only a business or client state change recomputes the supply type.
    pub place_of_supply: Option<String>,
    /// Manual override of the supply type; holds until the next state change.
    pub inter_state: Option<bool>,
    pub notes: Option<String>,
    pub terms: Option<String>,
    pub discount: Option<f64>,
    pub shipping: Option<f64>,
}

/// Patch for one [`LineItem`].
#[derive(Debug, Clone, Default)]
pub struct ItemUpdate {
    pub name: Option<String>,
    pub hsn_code: Option<String>,
    pub quantity: Option<f64>,
    pub unit_price: Option<f64>,
    pub gst_rate: Option<f64>,
}

fn check_amount(field: &'static str, value: Option<f64>) -> Result<(), EditError> {
    match value {
        Some(v) if !v.is_finite() || v < 0.0 => Err(EditError::InvalidAmount { field, value: v }),
        _ => Ok(()),
    }
}

fn apply<T>(slot: &mut T, value: Option<T>) {
    if let Some(v) = value {
        *slot = v;
    }
}

impl BillState {
    /// The GST rates an item may currently be given.
    ///
    /// Custom rates apply only while the Pro tier is unlocked and the custom
    /// catalogue is non-empty; otherwise the standard slabs apply.
    pub fn gst_rates(&self) -> Vec<f64> {
        match &self.custom_rates {
            Some(custom) if self.pro_unlocked && !custom.is_empty() => custom.clone(),
            _ => DEFAULT_GST_RATES.to_vec(),
        }
    }

    /// Recompute the supply type from the two state fields and reset the
    /// place of supply.
    pub fn recompute_jurisdiction(&mut self) {
        let supply = derive_supply(&self.profile.state, &self.client.state);
        tracing::debug!(
            business_state = %self.profile.state,
            client_state = %self.client.state,
            inter_state = supply.inter_state,
            "recomputed supply jurisdiction"
        );
        self.invoice.inter_state = supply.inter_state;
        self.invoice.place_of_supply = supply.place_of_supply;
    }

    /// Apply a business profile patch.
    ///
    /// # Errors
    ///
    /// [`EditError::ProRequired`] when setting a non-empty logo while locked.
    pub fn update_profile(&mut self, update: ProfileUpdate) -> Result<(), EditError> {
        if let Some(logo) = &update.logo {
            if !logo.is_empty() && !self.pro_unlocked {
                return Err(EditError::ProRequired("business logo"));
            }
        }
        let state_changed = update.state.is_some();
        let p = &mut self.profile;
        apply(&mut p.biz_name, update.biz_name);
        apply(&mut p.owner, update.owner);
        apply(&mut p.phone, update.phone);
        apply(&mut p.email, update.email);
        apply(&mut p.address, update.address);
        apply(&mut p.gstin, update.gstin);
        apply(&mut p.state, update.state);
        apply(&mut p.logo, update.logo);
        if state_changed {
            self.recompute_jurisdiction();
        }
        Ok(())
    }

    /// Apply a client patch.
    pub fn update_client(&mut self, update: ClientUpdate) {
        let state_changed = update.state.is_some();
        let c = &mut self.client;
        apply(&mut c.name, update.name);
        apply(&mut c.phone, update.phone);
        apply(&mut c.email, update.email);
        apply(&mut c.address, update.address);
        apply(&mut c.gstin, update.gstin);
        apply(&mut c.state, update.state);
        if state_changed {
            self.recompute_jurisdiction();
        }
    }

    /// Apply an invoice header patch.
    ///
    /// # Errors
    ///
    /// [`EditError::InvalidAmount`] for a negative or non-finite discount
    /// or shipping fee.
    pub fn update_invoice(&mut self, update: InvoiceUpdate) -> Result<(), EditError> {
        check_amount("discount", update.discount)?;
        check_amount("shipping", update.shipping)?;
        let inv = &mut self.invoice;
        apply(&mut inv.number, update.number);
        apply(&mut inv.date, update.date);
        apply(&mut inv.due, update.due);
        apply(&mut inv.place_of_supply, update.place_of_supply);
        apply(&mut inv.inter_state, update.inter_state);
        apply(&mut inv.notes, update.notes);
        apply(&mut inv.terms, update.terms);
        apply(&mut inv.discount, update.discount);
        apply(&mut inv.shipping, update.shipping);
        Ok(())
    }

    /// Append a blank line item and return its id.
    pub fn add_item(&mut self) -> LineItemId {
        let item = LineItem::blank();
        let id = item.id.clone();
        self.invoice.items.push(item);
        tracing::debug!(item_id = %id, "added line item");
        id
    }

    /// Apply a patch to the item with the given id.
    ///
    /// # Errors
    ///
    /// - [`EditError::ItemNotFound`] if no item has that id.
    /// - [`EditError::InvalidAmount`] for a negative or non-finite quantity or price.
    /// - [`EditError::RateNotAllowed`] if the GST rate is not in [`Self::gst_rates`].
    pub fn update_item(&mut self, id: &LineItemId, update: ItemUpdate) -> Result<(), EditError> {
        check_amount("quantity", update.quantity)?;
        check_amount("unit price", update.unit_price)?;
        if let Some(rate) = update.gst_rate {
            let allowed = self.gst_rates();
            if !rates::is_allowed(rate, &allowed) {
                return Err(EditError::RateNotAllowed { rate, allowed });
            }
        }
        let item = self
            .invoice
            .items
            .iter_mut()
            .find(|item| &item.id == id)
            .ok_or_else(|| EditError::ItemNotFound(id.to_string()))?;
        apply(&mut item.name, update.name);
        apply(&mut item.hsn_code, update.hsn_code);
        apply(&mut item.quantity, update.quantity);
        apply(&mut item.unit_price, update.unit_price);
        apply(&mut item.gst_rate, update.gst_rate);
        Ok(())
    }

    /// Remove the item with the given id, returning it.
    ///
    /// # Errors
    ///
    /// [`EditError::ItemNotFound`] if no item has that id.
    pub fn remove_item(&mut self, id: &LineItemId) -> Result<LineItem, EditError> {
        let pos = self
            .invoice
            .items
            .iter()
            .position(|item| &item.id == id)
            .ok_or_else(|| EditError::ItemNotFound(id.to_string()))?;
        tracing::debug!(item_id = %id, "removed line item");
        Ok(self.invoice.items.remove(pos))
    }

    /// Replace the custom GST rate catalogue. Pro only.
    ///
    /// Existing items keep their rates even if the new catalogue no longer
    /// lists them; only later edits are checked against it.
    ///
    /// # Errors
    ///
    /// - [`EditError::ProRequired`] while locked.
    /// - [`EditError::InvalidCustomRate`] for an entry outside `0..=100`.
    pub fn set_custom_rates(&mut self, custom: Vec<f64>) -> Result<(), EditError> {
        if !self.pro_unlocked {
            return Err(EditError::ProRequired("custom GST rates"));
        }
        let custom = rates::normalize_catalogue(custom)?;
        self.custom_rates = if custom.is_empty() { None } else { Some(custom) };
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn fresh() -> BillState {
        BillState::default_on(NaiveDate::from_ymd_opt(2025, 4, 1).unwrap())
    }

    #[test]
    fn client_state_change_recomputes_supply() {
        let mut state = fresh();
        state.update_client(ClientUpdate {
            state: Some("Gujarat".into()),
            ..Default::default()
        });
        assert!(state.invoice.inter_state);
        assert_eq!(state.invoice.place_of_supply, "Gujarat");

        state.update_client(ClientUpdate {
            state: Some("Rajasthan".into()),
            ..Default::default()
        });
        assert!(!state.invoice.inter_state);
        assert_eq!(state.invoice.place_of_supply, "Rajasthan");
    }

    #[test]
    fn business_state_change_recomputes_supply() {
        let mut state = fresh();
        state
            .update_profile(ProfileUpdate {
                state: Some("Kerala".into()),
                ..Default::default()
            })
            .unwrap();
        assert!(state.invoice.inter_state);
        assert_eq!(state.invoice.place_of_supply, "Rajasthan");
    }

    #[test]
    fn empty_client_state_uses_business_state_for_supply() {
        let mut state = fresh();
        state.update_client(ClientUpdate {
            state: Some(String::new()),
            ..Default::default()
        });
        assert!(state.invoice.inter_state);
        assert_eq!(state.invoice.place_of_supply, "Rajasthan");
    }

    #[test]
    fn non_state_fields_do_not_touch_supply() {
        let mut state = fresh();
        state.invoice.inter_state = true;
        state.invoice.place_of_supply = "Goa".into();
        state.update_client(ClientUpdate {
            name: Some("New Client".into()),
            ..Default::default()
        });
        assert!(state.invoice.inter_state);
        assert_eq!(state.invoice.place_of_supply, "Goa");
        assert_eq!(state.client.name, "New Client");
    }

    #[test]
    fn editing_place_of_supply_keeps_supply_type() {
        let mut state = fresh();
        assert!(!state.invoice.inter_state);
        state
            .update_invoice(InvoiceUpdate {
                place_of_supply: Some("Gujarat".into()),
                ..Default::default()
            })
            .unwrap();
        assert_eq!(state.invoice.place_of_supply, "Gujarat");
        assert!(!state.invoice.inter_state);
    }

    #[test]
    fn manual_override_holds_until_state_change() {
        let mut state = fresh();
        state
            .update_invoice(InvoiceUpdate {
                inter_state: Some(true),
                ..Default::default()
            })
            .unwrap();
        assert!(state.invoice.inter_state);
        state.update_client(ClientUpdate {
            state: Some("Rajasthan".into()),
            ..Default::default()
        });
        assert!(!state.invoice.inter_state);
    }

    #[test]
    fn logo_requires_pro() {
        let mut state = fresh();
        let err = state
            .update_profile(ProfileUpdate {
                biz_name: Some("Changed".into()),
                logo: Some("https://example.com/logo.png".into()),
                ..Default::default()
            })
            .unwrap_err();
        assert_eq!(err, EditError::ProRequired("business logo"));
        assert_eq!(state.profile.biz_name, "Your Business Name");

        state.pro_unlocked = true;
        state
            .update_profile(ProfileUpdate {
                logo: Some("https://example.com/logo.png".into()),
                ..Default::default()
            })
            .unwrap();
        assert_eq!(state.profile.logo, "https://example.com/logo.png");
    }

    #[test]
    fn clearing_logo_is_always_allowed() {
        let mut state = fresh();
        state.profile.logo = "old.png".into();
        state
            .update_profile(ProfileUpdate {
                logo: Some(String::new()),
                ..Default::default()
            })
            .unwrap();
        assert!(state.profile.logo.is_empty());
    }

    #[test]
    fn invoice_amounts_are_validated() {
        let mut state = fresh();
        let err = state
            .update_invoice(InvoiceUpdate {
                number: Some("INV-2".into()),
                discount: Some(-5.0),
                ..Default::default()
            })
            .unwrap_err();
        assert!(matches!(err, EditError::InvalidAmount { field: "discount", .. }));
        assert_eq!(state.invoice.number, "INV-1001");

        assert!(state
            .update_invoice(InvoiceUpdate {
                shipping: Some(f64::NAN),
                ..Default::default()
            })
            .is_err());
    }

    #[test]
    fn invoice_dates_can_be_cleared() {
        let mut state = fresh();
        let due = NaiveDate::from_ymd_opt(2025, 5, 1).unwrap();
        state
            .update_invoice(InvoiceUpdate {
                due: Some(Some(due)),
                ..Default::default()
            })
            .unwrap();
        assert_eq!(state.invoice.due, Some(due));
        state
            .update_invoice(InvoiceUpdate {
                due: Some(None),
                ..Default::default()
            })
            .unwrap();
        assert_eq!(state.invoice.due, None);
    }

    #[test]
    fn add_update_remove_item() {
        let mut state = fresh();
        let id = state.add_item();
        assert_eq!(state.invoice.items.len(), 2);
        state
            .update_item(
                &id,
                ItemUpdate {
                    name: Some("Primer".into()),
                    quantity: Some(3.0),
                    unit_price: Some(120.0),
                    gst_rate: Some(12.0),
                    ..Default::default()
                },
            )
            .unwrap();
        let item = state.invoice.item(&id).unwrap();
        assert_eq!(item.name, "Primer");
        assert_eq!(item.amount(), 360.0);
        assert_eq!(item.gst_rate, 12.0);

        let removed = state.remove_item(&id).unwrap();
        assert_eq!(removed.name, "Primer");
        assert_eq!(state.invoice.items.len(), 1);
    }

    #[test]
    fn unknown_item_is_reported() {
        let mut state = fresh();
        let missing = LineItemId::from("nope");
        assert_eq!(
            state.update_item(&missing, ItemUpdate::default()),
            Err(EditError::ItemNotFound("nope".into()))
        );
        assert!(state.remove_item(&missing).is_err());
    }

    #[test]
    fn item_rate_must_be_in_catalogue() {
        let mut state = fresh();
        let id = state.invoice.items[0].id.clone();
        let err = state
            .update_item(
                &id,
                ItemUpdate {
                    gst_rate: Some(7.0),
                    ..Default::default()
                },
            )
            .unwrap_err();
        assert!(matches!(err, EditError::RateNotAllowed { rate, .. } if rate == 7.0));
        assert_eq!(state.invoice.items[0].gst_rate, 18.0);
    }

    #[test]
    fn item_amounts_are_validated() {
        let mut state = fresh();
        let id = state.invoice.items[0].id.clone();
        assert!(state
            .update_item(
                &id,
                ItemUpdate {
                    quantity: Some(-1.0),
                    ..Default::default()
                },
            )
            .is_err());
        assert_eq!(state.invoice.items[0].quantity, 1.0);
    }

    #[test]
    fn custom_rates_require_pro() {
        let mut state = fresh();
        assert_eq!(
            state.set_custom_rates(vec![3.0]),
            Err(EditError::ProRequired("custom GST rates"))
        );
        assert_eq!(state.gst_rates(), DEFAULT_GST_RATES.to_vec());
    }

    #[test]
    fn custom_rates_replace_catalogue_when_unlocked() {
        let mut state = fresh();
        state.pro_unlocked = true;
        state.set_custom_rates(vec![18.0, 3.0, 0.25]).unwrap();
        assert_eq!(state.gst_rates(), vec![0.25, 3.0, 18.0]);

        let id = state.invoice.items[0].id.clone();
        state
            .update_item(
                &id,
                ItemUpdate {
                    gst_rate: Some(3.0),
                    ..Default::default()
                },
            )
            .unwrap();
        assert_eq!(state.invoice.items[0].gst_rate, 3.0);

        state.set_custom_rates(Vec::new()).unwrap();
        assert_eq!(state.custom_rates, None);
        assert_eq!(state.gst_rates(), DEFAULT_GST_RATES.to_vec());
    }

    #[test]
    fn custom_rates_ignored_while_locked() {
        let mut state = fresh();
        state.custom_rates = Some(vec![3.0]);
        assert_eq!(state.gst_rates(), DEFAULT_GST_RATES.to_vec());
    }
}

//! # Invoice Model
//!
//! The complete bill state: business profile, client, invoice with its
//! line items, and the Pro-tier flags. The whole graph is persisted,
//! exported and imported as one JSON document.
//!
//! ## Wire Format
//!
//! Field names on the wire are the camelCase names used by existing
//! backups (`bizName`, `placeOfSupply`, `qty`, `price`, `gst`, ...).
//! Every struct falls back to its defaults for missing fields, numeric
//! fields go through [`crate::numeric::lenient`], and dates are
//! `YYYY-MM-DD` strings where an empty string means "not set".

use chrono::{NaiveDate, Utc};
use serde::{Deserialize, Serialize};

use crate::identity::LineItemId;
use crate::numeric;
use crate::rates::DEFAULT_ITEM_GST_RATE;

/// State preselected for both parties in a fresh bill.
pub const DEFAULT_STATE: &str = "Rajasthan";

/// Invoice number of a fresh bill.
pub const DEFAULT_INVOICE_NUMBER: &str = "INV-1001";

/// The business issuing the invoice.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct BusinessProfile {
    pub biz_name: String,
    pub owner: String,
    pub phone: String,
    pub email: String,
    pub address: String,
    pub gstin: String,
    pub state: String,
    /// Logo image URL. Only rendered when the Pro tier is unlocked.
    pub logo: String,
}

impl Default for BusinessProfile {
    fn default() -> Self {
        Self {
            biz_name: "Your Business Name".to_string(),
            owner: "Owner Name".to_string(),
            phone: String::new(),
            email: String::new(),
            address: String::new(),
            gstin: String::new(),
            state: DEFAULT_STATE.to_string(),
            logo: String::new(),
        }
    }
}

/// The party being billed.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct Client {
    pub name: String,
    pub phone: String,
    pub email: String,
    pub address: String,
    pub gstin: String,
    pub state: String,
}

impl Default for Client {
    fn default() -> Self {
        Self {
            name: "Client Name".to_string(),
            phone: String::new(),
            email: String::new(),
            address: String::new(),
            gstin: String::new(),
            state: DEFAULT_STATE.to_string(),
        }
    }
}

/// One billed line. The line amount is `quantity × unit_price`, exclusive of tax.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LineItem {
    #[serde(default)]
    pub id: LineItemId,
    #[serde(default)]
    pub name: String,
    /// HSN (goods) or SAC (services) classification code. Stored, never computed on.
    #[serde(default, rename = "hsn")]
    pub hsn_code: String,
    #[serde(default, rename = "qty", deserialize_with = "numeric::lenient::deserialize")]
    pub quantity: f64,
    #[serde(default, rename = "price", deserialize_with = "numeric::lenient::deserialize")]
    pub unit_price: f64,
    /// GST rate in percent.
    #[serde(default, rename = "gst", deserialize_with = "numeric::lenient::deserialize")]
    pub gst_rate: f64,
}

impl LineItem {
    /// A blank line: quantity 1, price 0, the default GST rate and a fresh id.
    pub fn blank() -> Self {
        Self {
            id: LineItemId::generate(),
            name: String::new(),
            hsn_code: String::new(),
            quantity: 1.0,
            unit_price: 0.0,
            gst_rate: DEFAULT_ITEM_GST_RATE,
        }
    }

    /// Line amount before tax. Non-finite inputs, and a product that
    /// overflows, read as zero.
    pub fn amount(&self) -> f64 {
        numeric::coerce(numeric::coerce(self.quantity) * numeric::coerce(self.unit_price))
    }
}

/// Invoice header, items and invoice-level adjustments.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct Invoice {
    pub number: String,
    #[serde(with = "date_or_empty")]
    pub date: Option<NaiveDate>,
    #[serde(with = "date_or_empty")]
    pub due: Option<NaiveDate>,
    pub place_of_supply: String,
    /// `true` when IGST applies instead of CGST + SGST.
    pub inter_state: bool,
    pub notes: String,
    pub terms: String,
    /// Items in display order.
    #[serde(default)]
    pub items: Vec<LineItem>,
    #[serde(deserialize_with = "numeric::lenient::deserialize")]
    pub shipping: f64,
    /// Flat pre-tax discount in rupees.
    #[serde(deserialize_with = "numeric::lenient::deserialize")]
    pub discount: f64,
}

impl Invoice {
    fn default_on(today: NaiveDate) -> Self {
        Self {
            number: DEFAULT_INVOICE_NUMBER.to_string(),
            date: Some(today),
            due: None,
            place_of_supply: DEFAULT_STATE.to_string(),
            inter_state: false,
            notes: "Thank you for your business.".to_string(),
            terms: "Payment due upon receipt.".to_string(),
            items: vec![LineItem {
                id: LineItemId::generate(),
                name: "Driveway Sealcoating".to_string(),
                hsn_code: "9954".to_string(),
                quantity: 1.0,
                unit_price: 2500.0,
                gst_rate: 18.0,
            }],
            shipping: 0.0,
            discount: 0.0,
        }
    }

    /// Look up an item by id.
    pub fn item(&self, id: &LineItemId) -> Option<&LineItem> {
        self.items.iter().find(|item| &item.id == id)
    }
}

impl Default for Invoice {
    fn default() -> Self {
        Self::default_on(Utc::now().date_naive())
    }
}

/// The full persisted snapshot.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct BillState {
    pub profile: BusinessProfile,
    pub client: Client,
    pub invoice: Invoice,
    /// Whether a valid license key has unlocked the Pro tier.
    pub pro_unlocked: bool,
    pub license_key: String,
    /// Pro-only GST rate catalogue replacing the standard slabs.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub custom_rates: Option<Vec<f64>>,
}

impl BillState {
    /// The built-in starting state, dated `today`.
    pub fn default_on(today: NaiveDate) -> Self {
        Self {
            profile: BusinessProfile::default(),
            client: Client::default(),
            invoice: Invoice::default_on(today),
            pro_unlocked: false,
            license_key: String::new(),
            custom_rates: None,
        }
    }
}

impl Default for BillState {
    fn default() -> Self {
        Self::default_on(Utc::now().date_naive())
    }
}

/// `Option<NaiveDate>` as a `YYYY-MM-DD` string, with `""` (or `null`) for `None`.
///
/// Reading is lenient: a date that does not parse, or a value that is not a
/// string at all, loads as `None` so one bad field never discards a bill.
pub mod date_or_empty {
    use chrono::NaiveDate;
    use serde::de::IgnoredAny;
    use serde::{Deserialize, Deserializer, Serializer};

    const FORMAT: &str = "%Y-%m-%d";

    #[derive(Deserialize)]
    #[serde(untagged)]
    enum Raw {
        Text(String),
        Other(IgnoredAny),
    }

    pub fn serialize<S>(date: &Option<NaiveDate>, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        match date {
            Some(d) => serializer.collect_str(&d.format(FORMAT)),
            None => serializer.serialize_str(""),
        }
    }

    pub fn deserialize<'de, D>(deserializer: D) -> Result<Option<NaiveDate>, D::Error>
    where
        D: Deserializer<'de>,
    {
        let text = match Option::<Raw>::deserialize(deserializer)? {
            Some(Raw::Text(text)) => text,
            Some(Raw::Other(_)) => {
                tracing::warn!("ignoring non-text date");
                return Ok(None);
            }
            None => return Ok(None),
        };
        let trimmed = text.trim();
        if trimmed.is_empty() {
            return Ok(None);
        }
        match NaiveDate::parse_from_str(trimmed, FORMAT) {
            Ok(date) => Ok(Some(date)),
            Err(e) => {
                tracing::warn!(date = %trimmed, error = %e, "ignoring unparseable date");
                Ok(None)
            }
        }
    }
}

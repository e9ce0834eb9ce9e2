//! # Jurisdiction — States and Supply Type
//!
//! Defines the `IndianState` catalogue offered by the editing surface and
//! the derivation of the supply type (intra- vs inter-state) from the
//! business and client state fields.
//!
//! State fields in the stored model are free text: a client with no state
//! yet is legal, and old backups may carry spellings outside the catalogue.
//! The derivation therefore compares the raw strings, and the catalogue is
//! only used to validate new input.

use serde::{Deserialize, Serialize};
use std::str::FromStr;

use crate::error::GstbError;

/// Indian states and union territories selectable for a business or client.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum IndianState {
    #[serde(rename = "Andhra Pradesh")]
    AndhraPradesh,
    #[serde(rename = "Arunachal Pradesh")]
    ArunachalPradesh,
    #[serde(rename = "Assam")]
    Assam,
    #[serde(rename = "Bihar")]
    Bihar,
    #[serde(rename = "Chhattisgarh")]
    Chhattisgarh,
    #[serde(rename = "Delhi")]
    Delhi,
    #[serde(rename = "Goa")]
    Goa,
    #[serde(rename = "Gujarat")]
    Gujarat,
    #[serde(rename = "Haryana")]
    Haryana,
    #[serde(rename = "Himachal Pradesh")]
    HimachalPradesh,
    #[serde(rename = "Jammu & Kashmir")]
    JammuAndKashmir,
    #[serde(rename = "Jharkhand")]
    Jharkhand,
    #[serde(rename = "Karnataka")]
    Karnataka,
    #[serde(rename = "Kerala")]
    Kerala,
    #[serde(rename = "Madhya Pradesh")]
    MadhyaPradesh,
    #[serde(rename = "Maharashtra")]
    Maharashtra,
    #[serde(rename = "Manipur")]
    Manipur,
    #[serde(rename = "Meghalaya")]
    Meghalaya,
    #[serde(rename = "Mizoram")]
    Mizoram,
    #[serde(rename = "Nagaland")]
    Nagaland,
    #[serde(rename = "Odisha")]
    Odisha,
    #[serde(rename = "Puducherry")]
    Puducherry,
    #[serde(rename = "Punjab")]
    Punjab,
    #[serde(rename = "Rajasthan")]
    Rajasthan,
    #[serde(rename = "Sikkim")]
    Sikkim,
    #[serde(rename = "Tamil Nadu")]
    TamilNadu,
    #[serde(rename = "Telangana")]
    Telangana,
    #[serde(rename = "Tripura")]
    Tripura,
    #[serde(rename = "Uttarakhand")]
    Uttarakhand,
    #[serde(rename = "Uttar Pradesh")]
    UttarPradesh,
    #[serde(rename = "West Bengal")]
    WestBengal,
}

/// Number of entries in the state catalogue.
pub const INDIAN_STATE_COUNT: usize = 31;

impl IndianState {
    /// All states in display (alphabetical) order.
    pub fn all() -> &'static [IndianState] {
        &[
            Self::AndhraPradesh,
            Self::ArunachalPradesh,
            Self::Assam,
            Self::Bihar,
            Self::Chhattisgarh,
            Self::Delhi,
            Self::Goa,
            Self::Gujarat,
            Self::Haryana,
            Self::HimachalPradesh,
            Self::JammuAndKashmir,
            Self::Jharkhand,
            Self::Karnataka,
            Self::Kerala,
            Self::MadhyaPradesh,
            Self::Maharashtra,
            Self::Manipur,
            Self::Meghalaya,
            Self::Mizoram,
            Self::Nagaland,
            Self::Odisha,
            Self::Puducherry,
            Self::Punjab,
            Self::Rajasthan,
            Self::Sikkim,
            Self::TamilNadu,
            Self::Telangana,
            Self::Tripura,
            Self::Uttarakhand,
            Self::UttarPradesh,
            Self::WestBengal,
        ]
    }

    /// The display name, identical to the serialized form.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::AndhraPradesh => "Andhra Pradesh",
            Self::ArunachalPradesh => "Arunachal Pradesh",
            Self::Assam => "Assam",
            Self::Bihar => "Bihar",
            Self::Chhattisgarh => "Chhattisgarh",
            Self::Delhi => "Delhi",
            Self::Goa => "Goa",
            Self::Gujarat => "Gujarat",
            Self::Haryana => "Haryana",
            Self::HimachalPradesh => "Himachal Pradesh",
            Self::JammuAndKashmir => "Jammu & Kashmir",
            Self::Jharkhand => "Jharkhand",
            Self::Karnataka => "Karnataka",
            Self::Kerala => "Kerala",
            Self::MadhyaPradesh => "Madhya Pradesh",
            Self::Maharashtra => "Maharashtra",
            Self::Manipur => "Manipur",
            Self::Meghalaya => "Meghalaya",
            Self::Mizoram => "Mizoram",
            Self::Nagaland => "Nagaland",
            Self::Odisha => "Odisha",
            Self::Puducherry => "Puducherry",
            Self::Punjab => "Punjab",
            Self::Rajasthan => "Rajasthan",
            Self::Sikkim => "Sikkim",
            Self::TamilNadu => "Tamil Nadu",
            Self::Telangana => "Telangana",
            Self::Tripura => "Tripura",
            Self::Uttarakhand => "Uttarakhand",
            Self::UttarPradesh => "Uttar Pradesh",
            Self::WestBengal => "West Bengal",
        }
    }
}

impl std::fmt::Display for IndianState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for IndianState {
    type Err = GstbError;

    /// Parse a display name, ignoring ASCII case and surrounding whitespace.
    /// `and` is accepted in place of `&` ("Jammu and Kashmir").
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let wanted = s.trim().replace(" and ", " & ");
        Self::all()
            .iter()
            .copied()
            .find(|state| state.as_str().eq_ignore_ascii_case(&wanted))
            .ok_or_else(|| GstbError::UnknownState(s.to_string()))
    }
}

/// Supply classification derived from the business and client states.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SupplyJurisdiction {
    /// `true` when the business and client are in different states (IGST).
    pub inter_state: bool,
    /// The state the supply is attributed to.
    pub place_of_supply: String,
}

/// Derive the supply classification from the two state fields.
///
/// The supply is inter-state whenever the strings differ, including when
/// the client state is still empty. Place of supply is the client state,
/// or the business state if the client has none.
pub fn derive_supply(business_state: &str, client_state: &str) -> SupplyJurisdiction {
    let place_of_supply = if client_state.is_empty() {
        business_state
    } else {
        client_state
    };
    SupplyJurisdiction {
        inter_state: business_state != client_state,
        place_of_supply: place_of_supply.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn catalogue_has_expected_size() {
        assert_eq!(IndianState::all().len(), INDIAN_STATE_COUNT);
    }

    #[test]
    fn as_str_matches_serde() {
        for state in IndianState::all() {
            let json = serde_json::to_string(state).unwrap();
            assert_eq!(json, format!("\"{}\"", state.as_str()));
            let back: IndianState = serde_json::from_str(&json).unwrap();
            assert_eq!(*state, back);
        }
    }

    #[test]
    fn parse_is_case_insensitive() {
        assert_eq!("tamil nadu".parse::<IndianState>().unwrap(), IndianState::TamilNadu);
        assert_eq!("  DELHI ".parse::<IndianState>().unwrap(), IndianState::Delhi);
    }

    #[test]
    fn parse_accepts_and_for_ampersand() {
        assert_eq!(
            "Jammu and Kashmir".parse::<IndianState>().unwrap(),
            IndianState::JammuAndKashmir
        );
    }

    #[test]
    fn parse_rejects_unknown() {
        assert!("Atlantis".parse::<IndianState>().is_err());
        assert!("".parse::<IndianState>().is_err());
    }

    #[test]
    fn same_state_is_intra_state() {
        let supply = derive_supply("Rajasthan", "Rajasthan");
        assert!(!supply.inter_state);
        assert_eq!(supply.place_of_supply, "Rajasthan");
    }

    #[test]
    fn different_states_are_inter_state() {
        let supply = derive_supply("Rajasthan", "Gujarat");
        assert!(supply.inter_state);
        assert_eq!(supply.place_of_supply, "Gujarat");
    }

    #[test]
    fn empty_client_state_falls_back_to_business() {
        let supply = derive_supply("Kerala", "");
        assert!(supply.inter_state);
        assert_eq!(supply.place_of_supply, "Kerala");
    }
}

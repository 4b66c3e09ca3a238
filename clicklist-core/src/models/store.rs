//! Store metadata returned by the authenticate endpoint.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use super::de::string_or_number;

// ============================================================================
// Store Information
// ============================================================================

/// Retailer-assigned store identity.
///
/// Only used at login to synthesize the store-selection cookies; the client
/// does not keep it afterwards.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StoreInformation {
    /// Store number within the division.
    #[serde(default, deserialize_with = "string_or_number")]
    pub store_number: String,
    /// Division number.
    #[serde(default, deserialize_with = "string_or_number")]
    pub division_number: String,
    /// Store record id.
    #[serde(default, deserialize_with = "string_or_number")]
    pub record_id: String,
    /// Local display name (e.g. "Kroger Marketplace Eastgate").
    #[serde(default)]
    pub local_name: String,
    /// Street address.
    #[serde(default)]
    pub address: StoreAddress,
    /// Phone number.
    #[serde(default)]
    pub phone_number: String,
    /// Fields not modelled above.
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl StoreInformation {
    /// Store code as used by the storefront: division followed by store number.
    pub fn store_code(&self) -> String {
        format!("{}{}", self.division_number, self.store_number)
    }
}

/// Store street address.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StoreAddress {
    /// First address line.
    #[serde(default, alias = "addressLineOne", alias = "addressLine1")]
    pub address_line: String,
    /// City.
    #[serde(default)]
    pub city: String,
    /// State code.
    #[serde(default)]
    pub state: String,
    /// ZIP code.
    #[serde(default, alias = "zip")]
    pub zip_code: String,
}

impl StoreAddress {
    /// Single-line address: `"<line>, <city>, <state> <zip>"`.
    pub fn formatted(&self) -> String {
        format!(
            "{}, {}, {} {}",
            self.address_line, self.city, self.state, self.zip_code
        )
    }
}

// ============================================================================
// Tests
// ============================================================================

//! JSON output formatting.

use anyhow::Result;
use clicklist_core::AuthenticateResponse;
use serde::Serialize;
use serde_json::Value;

// ============================================================================
// Output Types
// ============================================================================

/// Result of `clicklist login`.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct LoginOutput {
    pub email: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub first_name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub store: Option<StoreOutput>,
}

/// The shopper's pickup store.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct StoreOutput {
    pub code: String,
    pub name: String,
    pub address: String,
}

impl LoginOutput {
    /// Extracts what the user cares about from the authenticate response.
    pub fn from_response(email: &str, response: &AuthenticateResponse) -> Self {
        let profile = response.user_profile.as_ref();
        let email = profile
            .map(|p| p.email_address.as_str())
            .filter(|e| !e.is_empty())
            .unwrap_or(email)
            .to_string();

        Self {
            email,
            first_name: profile.and_then(|p| p.first_name.clone()),
            store: response.store_information().map(|info| StoreOutput {
                code: info.store_code(),
                name: info.local_name.clone(),
                address: info.address.formatted(),
            }),
        }
    }
}

/// Result of `clicklist remove`. `removed` is the server's response, or
/// null when the item was not in the cart.
#[derive(Debug, Serialize)]
pub struct RemoveOutput {
    pub upc: String,
    pub removed: Option<Value>,
}

// ============================================================================
// Formatter
// ============================================================================

/// JSON formatter.
pub struct JsonFormatter {
    pretty: bool,
}

impl JsonFormatter {
    /// Creates a new JSON formatter.
    pub fn new(pretty: bool) -> Self {
        Self { pretty }
    }

    /// Formats any serializable value.
    pub fn format<T: Serialize + ?Sized>(&self, data: &T) -> Result<String> {
        let json = if self.pretty {
            serde_json::to_string_pretty(data)?
        } else {
            serde_json::to_string(data)?
        };
        Ok(json)
    }
}

//! Catalog items returned by the favorites and recent-purchases endpoints.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::error::CoreError;

/// A favorite or recently purchased product.
///
/// Immutable snapshot of what the server returned. Display metadata the
/// client does not interpret (description, images, size, ...) stays in
/// [`extra`](Self::extra) and is sent back verbatim when the item is added
/// to the cart.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CatalogItem {
    /// Universal product code.
    pub upc: String,
    /// Current price, as sent by the server (usually a decimal string).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub current_price: Option<Value>,
    /// Whether the current price is a promotional ("yellow tag") price.
    #[serde(default)]
    pub current_price_is_yellow_tag: bool,
    /// Display fields not modelled above.
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl CatalogItem {
    /// Creates an item with just a product code and price.
    pub fn new(upc: impl Into<String>, current_price: impl Into<Value>) -> Self {
        Self {
            upc: upc.into(),
            current_price: Some(current_price.into()),
            ..Self::default()
        }
    }

    /// Parses [`current_price`](Self::current_price) as a unit price.
    ///
    /// # Errors
    ///
    /// Returns `CoreError::InvalidPrice` if the price is missing, is not a
    /// number or numeric string, or is not finite.
    pub fn unit_price(&self) -> Result<f64, CoreError> {
        let price = match &self.current_price {
            Some(Value::Number(n)) => n.as_f64(),
            Some(Value::String(s)) => s.trim().trim_start_matches('$').parse::<f64>().ok(),
            _ => None,
        };

        match price {
            Some(p) if p.is_finite() && p >= 0.0 => Ok(p),
            _ => Err(CoreError::InvalidPrice(format!(
                "item {} has price {}",
                self.upc,
                self.current_price
                    .as_ref()
                    .map_or_else(|| "<missing>".to_string(), ToString::to_string)
            ))),
        }
    }

    /// Returns a display field from [`extra`](Self::extra) as a string.
    pub fn display_field(&self, key: &str) -> Option<&str> {
        self.extra.get(key).and_then(Value::as_str)
    }

    /// Best-effort human readable name.
    pub fn display_name(&self) -> &str {
        ["description", "name", "title"]
            .iter()
            .find_map(|key| self.display_field(key))
            .unwrap_or(&self.upc)
    }
}

// ============================================================================
// Tests
// ============================================================================

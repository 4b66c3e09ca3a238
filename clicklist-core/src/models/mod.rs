//! Domain models for `ClickList`.
//!
//! ## Submodules
//!
//! - [`account`] - Authenticate request/response and user profile
//! - [`store`] - Store metadata (StoreInformation, StoreAddress)
//! - [`catalog`] - Catalog items returned by favorites / recent purchases
//! - [`cart`] - Cart and cart items
//! - [`quantity`] - Validated item quantity

mod account;
mod cart;
mod catalog;
mod quantity;
mod store;

pub use account::{AuthenticateRequest, AuthenticateResponse, Credentials, StoreEnvelope, UserProfile};
pub use cart::{Cart, CartItem};
pub use catalog::CatalogItem;
pub use quantity::Quantity;
pub use store::{StoreAddress, StoreInformation};

#[cfg(test)]
mod serde_tests;

/// Serde helpers shared by the wire models.
pub(crate) mod de {
    use serde::{Deserialize, Deserializer};
    use serde_json::Value;

    /// Accepts a JSON string or number and stores it as a string.
    ///
    /// The API is inconsistent about identifiers: store numbers and order
    /// ids show up both quoted and bare.
    pub fn string_or_number<'de, D>(deserializer: D) -> Result<String, D::Error>
    where
        D: Deserializer<'de>,
    {
        match Value::deserialize(deserializer)? {
            Value::String(s) => Ok(s),
            Value::Number(n) => Ok(n.to_string()),
            Value::Null => Ok(String::new()),
            other => Err(serde::de::Error::custom(format!(
                "expected string or number, got {other}"
            ))),
        }
    }

    /// Optional variant of [`string_or_number`]; `null` and `""` become `None`.
    pub fn opt_string_or_number<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
    where
        D: Deserializer<'de>,
    {
        let s = string_or_number(deserializer)?;
        Ok(if s.is_empty() { None } else { Some(s) })
    }

    /// Accepts a non-negative integer given as a number or a numeric string.
    /// `null` becomes 0.
    pub fn u32_or_string<'de, D>(deserializer: D) -> Result<u32, D::Error>
    where
        D: Deserializer<'de>,
    {
        let value = Value::deserialize(deserializer)?;
        let parsed = match &value {
            Value::Null => Some(0),
            Value::Number(n) => n.as_u64().and_then(|n| u32::try_from(n).ok()),
            Value::String(s) => s.trim().parse::<u32>().ok(),
            _ => None,
        };
        parsed.ok_or_else(|| {
            serde::de::Error::custom(format!("expected non-negative integer, got {value}"))
        })
    }

    /// Accepts a price given as a number or a string (`"1.99"`, `"$1.99"`).
    /// `null` and `""` become `None`.
    pub fn opt_f64_or_string<'de, D>(deserializer: D) -> Result<Option<f64>, D::Error>
    where
        D: Deserializer<'de>,
    {
        let value = Value::deserialize(deserializer)?;
        match &value {
            Value::Null => Ok(None),
            Value::Number(n) => Ok(n.as_f64()),
            Value::String(s) if s.trim().is_empty() => Ok(None),
            Value::String(s) => s
                .trim()
                .trim_start_matches('$')
                .parse::<f64>()
                .map(Some)
                .map_err(|_| serde::de::Error::custom(format!("expected price, got {value}"))),
            _ => Err(serde::de::Error::custom(format!("expected price, got {value}"))),
        }
    }
}

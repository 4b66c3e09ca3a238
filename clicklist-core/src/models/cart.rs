//! Cart and cart items.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use super::de::{opt_f64_or_string, opt_string_or_number, u32_or_string};

// ============================================================================
// Cart
// ============================================================================

/// The current cart, as returned by the cart endpoint.
///
/// Never authoritative between calls: cart mutations always re-read it.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Cart {
    /// Order identifier, present once the server has opened an order.
    #[serde(
        default,
        deserialize_with = "opt_string_or_number",
        skip_serializing_if = "Option::is_none"
    )]
    pub order_id: Option<String>,
    /// Items in cart order.
    #[serde(default)]
    pub cart_items: Vec<CartItem>,
    /// Fields not modelled above (totals, fees, ...).
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl Cart {
    /// Finds the cart entry for a product code.
    pub fn find(&self, upc: &str) -> Option<&CartItem> {
        self.cart_items.iter().find(|item| item.upc == upc)
    }

    /// Quantity of `upc` currently in the cart (0 when absent).
    pub fn quantity_of(&self, upc: &str) -> u32 {
        self.find(upc).map_or(0, |item| item.quantity)
    }

    /// Returns true if the cart has no items.
    pub fn is_empty(&self) -> bool {
        self.cart_items.is_empty()
    }

    /// Total number of units across all items, saturating at `u32::MAX`.
    pub fn total_units(&self) -> u32 {
        self.cart_items
            .iter()
            .fold(0, |total, item| total.saturating_add(item.quantity))
    }
}

// ============================================================================
// Cart Item
// ============================================================================

/// A single cart entry.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CartItem {
    /// Universal product code; unique within a cart.
    pub upc: String,
    /// Units in the cart.
    #[serde(default, deserialize_with = "u32_or_string")]
    pub quantity: u32,
    /// Price per unit.
    #[serde(
        default,
        deserialize_with = "opt_f64_or_string",
        skip_serializing_if = "Option::is_none"
    )]
    pub unit_price: Option<f64>,
    /// `unit_price * quantity` as computed by the server.
    #[serde(
        default,
        deserialize_with = "opt_f64_or_string",
        skip_serializing_if = "Option::is_none"
    )]
    pub total_price: Option<f64>,
    /// Whether the store may substitute this item.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub allow_substitutes: Option<bool>,
    /// Whether the price is promotional.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub price_is_yellow_tag: Option<bool>,
    /// Display fields carried over from the catalog item.
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

// ============================================================================
// Tests
// ============================================================================

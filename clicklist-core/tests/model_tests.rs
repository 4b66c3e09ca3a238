//! Integration tests for the public model API.

use clicklist_core::{Cart, CatalogItem, CoreError, Quantity};
use serde_json::json;

#[test]
fn test_quantity_rejects_non_numeric_input() {
    let err = "two".parse::<Quantity>().unwrap_err();
    assert!(matches!(err, CoreError::InvalidQuantity(_)));
}

#[test]
fn test_price_times_quantity() {
    let item = CatalogItem::new("0001111041700", "2.50");
    let quantity: Quantity = "3".parse().unwrap();
    let total = item.unit_price().unwrap() * f64::from(quantity.get());
    assert!((total - 7.5).abs() < f64::EPSILON);
}

#[test]
fn test_cart_lookup_by_upc() {
    let cart: Cart = serde_json::from_value(json!({
        "orderId": "42",
        "cartItems": [{"upc": "0001111041700", "quantity": 2}]
    }))
    .unwrap();

    assert_eq!(cart.quantity_of("0001111041700"), 2);
    assert!(cart.find("0000000000000").is_none());
}

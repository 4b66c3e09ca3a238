//! Serde tests for the wire models.
//!
//! The server's payloads carry many fields the client does not model; these
//! tests check that those fields survive a parse / re-serialize cycle so the
//! cart endpoints receive what the catalog endpoints sent.

use serde_json::json;

use crate::{AuthenticateResponse, Cart, CartItem, CatalogItem, StoreInformation};

// ============================================================================
// Catalog Items
// ============================================================================

#[test]
fn test_favorites_list_parses() {
    let body = json!([
        {"upc": "0001111041700", "currentPrice": "1.99", "currentPriceIsYellowTag": false},
        {"upc": "0004900000044", "currentPrice": 0.99, "currentPriceIsYellowTag": true, "brand": "Coke"}
    ]);

    let items: Vec<CatalogItem> = serde_json::from_value(body).unwrap();
    assert_eq!(items.len(), 2);
    assert_eq!(items[1].display_field("brand"), Some("Coke"));
    assert!(items[1].current_price_is_yellow_tag);
}

#[test]
fn test_catalog_item_requires_upc() {
    let result: Result<CatalogItem, _> = serde_json::from_value(json!({"currentPrice": "1.00"}));
    assert!(result.is_err());
}

// ============================================================================
// Cart
// ============================================================================

#[test]
fn test_cart_item_preserves_display_fields() {
    let body = json!({
        "upc": "0001111041700",
        "quantity": 2,
        "unitPrice": 1.99,
        "allowSubstitutes": true,
        "description": "Milk",
        "size": "1 gal"
    });

    let item: CartItem = serde_json::from_value(body.clone()).unwrap();
    assert_eq!(item.quantity, 2);
    assert_eq!(serde_json::to_value(&item).unwrap(), body);
}

#[test]
fn test_cart_item_string_numbers() {
    let cart: Cart = serde_json::from_value(json!({
        "cartItems": [
            {"upc": "1", "quantity": "2", "unitPrice": "1.99", "totalPrice": "$3.98"},
            {"upc": "2", "quantity": 1, "unitPrice": "", "totalPrice": null}
        ]
    }))
    .unwrap();

    let first = &cart.cart_items[0];
    assert_eq!(first.quantity, 2);
    assert_eq!(first.unit_price, Some(1.99));
    assert_eq!(first.total_price, Some(3.98));

    let second = &cart.cart_items[1];
    assert_eq!(second.quantity, 1);
    assert!(second.unit_price.is_none());
    assert!(second.total_price.is_none());
    assert_eq!(cart.total_units(), 3);
}

#[test]
fn test_cart_item_rejects_bad_quantity() {
    for quantity in [json!("two"), json!(-1), json!(1.5)] {
        let result = serde_json::from_value::<CartItem>(json!({"upc": "1", "quantity": quantity}));
        assert!(result.is_err(), "accepted {quantity}");
    }
}

#[test]
fn test_cart_without_items_field() {
    let cart: Cart = serde_json::from_value(json!({"orderId": "A1"})).unwrap();
    assert!(cart.cart_items.is_empty());
    assert_eq!(cart.order_id.as_deref(), Some("A1"));
}

// ============================================================================
// Authenticate
// ============================================================================

#[test]
fn test_successful_authenticate_response() {
    let body = json!({
        "hasErrors": false,
        "store": {
            "storeInformation": {
                "storeNumber": "00352",
                "divisionNumber": "014",
                "recordId": "81",
                "localName": "Eastgate",
                "address": {"addressLineOne": "4530 Eastgate Blvd", "city": "Cincinnati", "state": "OH", "zipCode": "45245"},
                "phoneNumber": "5135550100"
            }
        },
        "userProfile": {"emailAddress": "shopper@example.com", "firstName": "Pat"}
    });

    let response: AuthenticateResponse = serde_json::from_value(body).unwrap();
    assert!(!response.has_errors);
    let info: &StoreInformation = response.store_information().unwrap();
    assert_eq!(info.local_name, "Eastgate");
    assert_eq!(info.address.zip_code, "45245");
    let profile = response.user_profile.unwrap();
    assert_eq!(profile.email_address, "shopper@example.com");
    assert_eq!(profile.first_name.as_deref(), Some("Pat"));
}

#[test]
fn test_failed_authenticate_response_has_no_store() {
    let response: AuthenticateResponse =
        serde_json::from_value(json!({"hasErrors": true})).unwrap();
    assert!(response.has_errors);
    assert!(response.store_information().is_none());
    assert!(response.error_message().is_none());
}

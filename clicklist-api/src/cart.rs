//! Cart mutations.
//!
//! Both mutations are read-modify-write: the current cart is fetched first
//! and the payload is computed from it. Concurrent writers to the same cart
//! (another browser tab, another client) can interleave between the read
//! and the write; the server has the last word.

use clicklist_core::{Cart, CatalogItem, Quantity};
use clicklist_fetch::ApiRequest;
use serde::{Serialize, Serializer};
use serde_json::{Map, Value};
use tracing::{debug, error, info, instrument};

use crate::client::ClickListClient;
use crate::error::ClickListError;

// ============================================================================
// Decorated Item
// ============================================================================

/// A catalog item with the cart fields the add endpoint expects.
///
/// Serializes as the catalog item's own fields with the cart fields laid
/// over them.
#[derive(Debug, Clone, PartialEq)]
pub struct DecoratedItem {
    /// The item as listed by the catalog.
    pub item: CatalogItem,
    /// Units already in the cart before this add.
    pub quantity_in_cart: u32,
    /// Units being added.
    pub quantity: Quantity,
    /// Parsed `currentPrice`.
    pub unit_price: f64,
    /// `unit_price * quantity`.
    pub total_price: f64,
    /// Copied from `currentPriceIsYellowTag`.
    pub price_is_yellow_tag: bool,
    /// Always true.
    pub allow_substitutes: bool,
}

impl DecoratedItem {
    /// Builds the payload for adding `quantity` units of `item` to `cart`.
    pub fn new(item: CatalogItem, cart: &Cart, quantity: Quantity, unit_price: f64) -> Self {
        Self {
            quantity_in_cart: cart.quantity_of(&item.upc),
            total_price: unit_price * f64::from(quantity.get()),
            price_is_yellow_tag: item.current_price_is_yellow_tag,
            allow_substitutes: true,
            quantity,
            unit_price,
            item,
        }
    }

    /// Product code.
    pub fn upc(&self) -> &str {
        &self.item.upc
    }

    /// The JSON object sent to the cart-item endpoint.
    pub fn to_payload(&self) -> Result<Map<String, Value>, serde_json::Error> {
        let mut payload = match serde_json::to_value(&self.item)? {
            Value::Object(map) => map,
            _ => Map::new(),
        };

        payload.insert("quantityInCart".into(), self.quantity_in_cart.into());
        payload.insert("show".into(), Value::Bool(true));
        payload.insert("productId".into(), Value::Null);
        payload.insert("quantity".into(), self.quantity.get().into());
        payload.insert("allowSubstitutes".into(), self.allow_substitutes.into());
        payload.insert("unitPrice".into(), self.unit_price.into());
        payload.insert("totalPrice".into(), self.total_price.into());
        payload.insert("priceIsYellowTag".into(), self.price_is_yellow_tag.into());
        Ok(payload)
    }
}

impl Serialize for DecoratedItem {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        self.to_payload()
            .map_err(serde::ser::Error::custom)?
            .serialize(serializer)
    }
}

/// Outcome of [`ClickListClient::add_to_cart`].
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AddToCartResult {
    /// The payload that was sent.
    pub item: DecoratedItem,
    /// Units in the cart after the add, computed locally.
    pub quantity: u32,
}

// ============================================================================
// Mutations
// ============================================================================

impl ClickListClient {
    /// Adds `quantity` units of `item` to the cart.
    ///
    /// `quantity` accepts anything convertible to a [`Quantity`]: integers,
    /// integral floats, numeric strings. Quantity and price are validated
    /// before anything is sent. The returned quantity is the cart's prior
    /// quantity for this product plus `quantity`.
    #[instrument(skip(self, item, quantity), fields(method = "add_to_cart", upc = %item.upc))]
    pub async fn add_to_cart<Q>(
        &mut self,
        item: &CatalogItem,
        quantity: Q,
    ) -> Result<AddToCartResult, ClickListError>
    where
        Q: TryInto<Quantity>,
        ClickListError: From<Q::Error>,
    {
        self.try_add_to_cart(item, quantity)
            .await
            .inspect_err(|e| error!(error = %e, "Add to cart failed"))
    }

    async fn try_add_to_cart<Q>(
        &mut self,
        item: &CatalogItem,
        quantity: Q,
    ) -> Result<AddToCartResult, ClickListError>
    where
        Q: TryInto<Quantity>,
        ClickListError: From<Q::Error>,
    {
        let quantity: Quantity = quantity.try_into()?;
        let unit_price = item.unit_price()?;
        self.ensure_logged_in()?;

        let cart = self.cart().await?;
        let decorated = DecoratedItem::new(item.clone(), &cart, quantity, unit_price);
        let new_total = decorated
            .quantity_in_cart
            .checked_add(quantity.get())
            .ok_or_else(|| {
                ClickListError::InvalidArgument(format!(
                    "adding {quantity} to {} units in the cart overflows",
                    decorated.quantity_in_cart
                ))
            })?;
        self.remember_order(&cart);

        let request =
            ApiRequest::post(self.config.endpoints.cart_item.as_str()).json(&decorated)?;
        let _: Value = self.send_authorized(request).await?;

        info!(
            quantity = quantity.get(),
            in_cart = new_total,
            "Item added to cart"
        );
        Ok(AddToCartResult {
            item: decorated,
            quantity: new_total,
        })
    }

    /// Removes the cart entry for `upc`.
    ///
    /// Returns `Ok(None)` without a write when the product is not in the
    /// cart. Otherwise posts the located entry with `strategy=deleteItem`
    /// and returns the server's response body.
    #[instrument(skip(self), fields(method = "remove_from_cart"))]
    pub async fn remove_from_cart(&mut self, upc: &str) -> Result<Option<Value>, ClickListError> {
        self.try_remove_from_cart(upc)
            .await
            .inspect_err(|e| error!(error = %e, "Remove from cart failed"))
    }

    async fn try_remove_from_cart(&mut self, upc: &str) -> Result<Option<Value>, ClickListError> {
        self.ensure_logged_in()?;

        let cart = self.cart().await?;
        let Some(entry) = cart.find(upc).cloned() else {
            debug!("Item not in cart");
            return Ok(None);
        };
        self.remember_order(&cart);

        let request = ApiRequest::post(self.config.endpoints.cart_item.as_str())
            .query("strategy", "deleteItem")
            .json(&entry)?;
        let body: Value = self.send_authorized(request).await?;

        info!(removed = entry.quantity, "Item removed from cart");
        Ok(Some(body))
    }

    /// Copies the cart's order id into the order cookie.
    fn remember_order(&mut self, cart: &Cart) {
        let (Some(order_id), Some(session)) = (cart.order_id.as_deref(), self.session.as_mut())
        else {
            return;
        };
        session.jar.set(
            self.executor.base_host(),
            self.config.order_cookie.as_str(),
            order_id,
        );
        debug!(order_id, "Order cookie set");
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clicklist_core::CartItem;
    use serde_json::json;

    fn cart_with(upc: &str, quantity: u32) -> Cart {
        Cart {
            order_id: Some("ORD-1".to_string()),
            cart_items: vec![CartItem {
                upc: upc.to_string(),
                quantity,
                ..CartItem::default()
            }],
            ..Cart::default()
        }
    }

    #[test]
    fn test_decorate_overlays_cart_fields() {
        let mut item = CatalogItem::new("0001111041700", "2.50");
        item.current_price_is_yellow_tag = true;
        item.extra.insert("description".into(), json!("Milk"));
        item.extra.insert("quantity".into(), json!(99));

        let decorated = DecoratedItem::new(
            item,
            &cart_with("0001111041700", 2),
            Quantity::new(3).unwrap(),
            2.5,
        );
        let payload = serde_json::to_value(&decorated).unwrap();

        assert_eq!(payload["upc"], "0001111041700");
        assert_eq!(payload["description"], "Milk");
        assert_eq!(payload["currentPrice"], "2.50");
        assert_eq!(payload["quantityInCart"], 2);
        assert_eq!(payload["quantity"], 3);
        assert_eq!(payload["show"], true);
        assert_eq!(payload["productId"], Value::Null);
        assert_eq!(payload["allowSubstitutes"], true);
        assert_eq!(payload["unitPrice"], 2.5);
        assert_eq!(payload["totalPrice"], 7.5);
        assert_eq!(payload["priceIsYellowTag"], true);
    }

    #[test]
    fn test_decorate_absent_item_has_zero_in_cart() {
        let decorated = DecoratedItem::new(
            CatalogItem::new("222", 1.25),
            &cart_with("111", 4),
            Quantity::new(2).unwrap(),
            1.25,
        );
        assert_eq!(decorated.quantity_in_cart, 0);
        assert!((decorated.total_price - 2.5).abs() < f64::EPSILON);
        assert!(!decorated.price_is_yellow_tag);
        assert_eq!(decorated.upc(), "222");
    }

    #[test]
    fn test_result_serializes_item_payload() {
        let decorated = DecoratedItem::new(
            CatalogItem::new("1", "1.00"),
            &Cart::default(),
            Quantity::new(1).unwrap(),
            1.0,
        );
        let result = AddToCartResult {
            item: decorated,
            quantity: 1,
        };
        let json = serde_json::to_value(&result).unwrap();
        assert_eq!(json["quantity"], 1);
        assert_eq!(json["item"]["unitPrice"], 1.0);
    }
}

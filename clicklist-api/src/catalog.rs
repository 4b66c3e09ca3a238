//! Authenticated reads: favorites, recent purchases, cart.
//!
//! Each read is a single `GET` carrying the session cookies and the CSRF
//! header. Nothing is cached; every call hits the server.

use clicklist_core::{Cart, CatalogItem};
use clicklist_fetch::ApiRequest;
use tracing::{debug, error, instrument};

use crate::client::ClickListClient;
use crate::error::ClickListError;

impl ClickListClient {
    /// Lists the shopper's favorite items.
    #[instrument(skip(self), fields(method = "favorites"))]
    pub async fn favorites(&mut self) -> Result<Vec<CatalogItem>, ClickListError> {
        let path = self.config.endpoints.favorites.clone();
        self.fetch_items(path).await
    }

    /// Lists recently purchased items.
    #[instrument(skip(self), fields(method = "recent_purchases"))]
    pub async fn recent_purchases(&mut self) -> Result<Vec<CatalogItem>, ClickListError> {
        let path = self.config.endpoints.recent_purchases.clone();
        self.fetch_items(path).await
    }

    /// Fetches the current cart.
    #[instrument(skip(self), fields(method = "cart"))]
    pub async fn cart(&mut self) -> Result<Cart, ClickListError> {
        let request = ApiRequest::get(self.config.endpoints.cart.as_str());
        let cart: Option<Cart> = self
            .send_authorized(request)
            .await
            .inspect_err(|e| error!(error = %e, "Cart read failed"))?;

        let cart = cart.unwrap_or_default();
        debug!(
            items = cart.cart_items.len(),
            order_id = cart.order_id.as_deref().unwrap_or("-"),
            "Cart fetched"
        );
        Ok(cart)
    }

    async fn fetch_items(&mut self, path: String) -> Result<Vec<CatalogItem>, ClickListError> {
        let items: Option<Vec<CatalogItem>> = self
            .send_authorized(ApiRequest::get(path))
            .await
            .inspect_err(|e| error!(error = %e, "Item list read failed"))?;

        let items = items.unwrap_or_default();
        debug!(count = items.len(), "Items fetched");
        Ok(items)
    }
}

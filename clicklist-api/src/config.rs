//! Client configuration.
//!
//! Everything the protocol needs to know about the server lives here: the
//! base origin, endpoint paths, the cookie and header names that carry the
//! session, and transport limits. The library never reads the environment;
//! callers build a [`ClientConfig`] (or deserialize one) and hand it over.

use clicklist_fetch::DEFAULT_MAX_REDIRECTS;
use clicklist_fetch::transport::{DEFAULT_TIMEOUT_SECS, USER_AGENT};
use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Default base origin.
pub const DEFAULT_BASE_URL: &str = "https://www.kroger.com";

/// Default name of the anti-forgery cookie.
pub const DEFAULT_CSRF_COOKIE: &str = "XSRF-TOKEN";

/// Default name of the anti-forgery request header.
pub const DEFAULT_CSRF_HEADER: &str = "X-XSRF-TOKEN";

/// Default name of the order-identifier cookie.
pub const DEFAULT_ORDER_COOKIE: &str = "OrderId";

// ============================================================================
// Endpoints
// ============================================================================

/// Endpoint paths, relative to the base origin.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct Endpoints {
    /// `POST` credentials.
    pub authenticate: String,
    /// `GET` favorite items.
    pub favorites: String,
    /// `GET` recently purchased items.
    pub recent_purchases: String,
    /// `GET` the current cart.
    pub cart: String,
    /// `POST` a cart item (add, or remove with `strategy=deleteItem`).
    pub cart_item: String,
    /// `GET` that walks the online-shopping redirect chain.
    pub online_shopping_redirect: String,
    /// Value of the `redirectUrl` query parameter.
    pub store_setup: String,
}

impl Default for Endpoints {
    fn default() -> Self {
        Self {
            authenticate: "/user/authenticate".to_string(),
            favorites: "/storecatalog/clicklistbeta/api/items/personalized/myFavorites"
                .to_string(),
            recent_purchases:
                "/storecatalog/clicklistbeta/api/items/personalized/recentPurchases/quick"
                    .to_string(),
            cart: "/storecatalog/clicklistbeta/api/cart".to_string(),
            cart_item: "/storecatalog/clicklistbeta/api/cart/item".to_string(),
            online_shopping_redirect: "/onlineshopping/redirect".to_string(),
            store_setup: "/storecatalog/clicklistbeta/#/storesetup".to_string(),
        }
    }
}

// ============================================================================
// Client Config
// ============================================================================

/// Configuration for a [`ClickListClient`](crate::ClickListClient).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct ClientConfig {
    /// Base origin every path is resolved against.
    pub base_url: String,
    /// Endpoint paths.
    pub endpoints: Endpoints,
    /// Cookie the CSRF token is read from after store setup.
    pub csrf_cookie: String,
    /// Header the CSRF token is sent in.
    pub csrf_header: String,
    /// Cookie that carries the order identifier.
    pub order_cookie: String,
    /// Hop bound for followed redirects.
    pub max_redirects: usize,
    /// Per-request timeout in seconds.
    pub timeout_secs: u64,
    /// `User-Agent` header.
    pub user_agent: String,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            endpoints: Endpoints::default(),
            csrf_cookie: DEFAULT_CSRF_COOKIE.to_string(),
            csrf_header: DEFAULT_CSRF_HEADER.to_string(),
            order_cookie: DEFAULT_ORDER_COOKIE.to_string(),
            max_redirects: DEFAULT_MAX_REDIRECTS,
            timeout_secs: DEFAULT_TIMEOUT_SECS,
            user_agent: USER_AGENT.to_string(),
        }
    }
}

impl ClientConfig {
    /// Creates the default configuration.
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the base origin.
    #[must_use]
    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into();
        self
    }

    /// Replaces the endpoint paths.
    #[must_use]
    pub fn with_endpoints(mut self, endpoints: Endpoints) -> Self {
        self.endpoints = endpoints;
        self
    }

    /// Sets the CSRF cookie and header names.
    #[must_use]
    pub fn with_csrf_names(mut self, cookie: impl Into<String>, header: impl Into<String>) -> Self {
        self.csrf_cookie = cookie.into();
        self.csrf_header = header.into();
        self
    }

    /// Sets the order-identifier cookie name.
    #[must_use]
    pub fn with_order_cookie(mut self, name: impl Into<String>) -> Self {
        self.order_cookie = name.into();
        self
    }

    /// Sets the redirect hop bound.
    #[must_use]
    pub fn with_max_redirects(mut self, max_redirects: usize) -> Self {
        self.max_redirects = max_redirects;
        self
    }

    /// Sets the per-request timeout, rounded up to whole seconds (at least 1).
    #[must_use]
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        let secs = timeout.as_secs() + u64::from(timeout.subsec_nanos() > 0);
        self.timeout_secs = secs.max(1);
        self
    }

    /// Sets the user agent.
    #[must_use]
    pub fn with_user_agent(mut self, user_agent: impl Into<String>) -> Self {
        self.user_agent = user_agent.into();
        self
    }

    /// Per-request timeout. A zero `timeout_secs` counts as one second.
    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs.max(1))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = ClientConfig::default();
        assert_eq!(config.base_url, "https://www.kroger.com");
        assert_eq!(config.csrf_cookie, "XSRF-TOKEN");
        assert_eq!(config.csrf_header, "X-XSRF-TOKEN");
        assert_eq!(config.order_cookie, "OrderId");
        assert_eq!(config.max_redirects, 20);
        assert_eq!(config.timeout(), Duration::from_secs(30));
        assert_eq!(config.endpoints.cart_item, "/storecatalog/clicklistbeta/api/cart/item");
    }

    #[test]
    fn test_partial_json_keeps_defaults() {
        let config: ClientConfig =
            serde_json::from_str(r#"{"baseUrl":"http://localhost:8080","timeoutSecs":5}"#).unwrap();
        assert_eq!(config.base_url, "http://localhost:8080");
        assert_eq!(config.timeout_secs, 5);
        assert_eq!(config.csrf_cookie, DEFAULT_CSRF_COOKIE);
        assert_eq!(config.endpoints, Endpoints::default());
    }

    #[test]
    fn test_builders() {
        let config = ClientConfig::new()
            .with_base_url("http://shop.test")
            .with_csrf_names("csrf", "X-Csrf")
            .with_order_cookie("Order")
            .with_max_redirects(3)
            .with_timeout(Duration::from_secs(7))
            .with_user_agent("test");

        assert_eq!(config.base_url, "http://shop.test");
        assert_eq!(config.csrf_header, "X-Csrf");
        assert_eq!(config.order_cookie, "Order");
        assert_eq!(config.max_redirects, 3);
        assert_eq!(config.timeout_secs, 7);
        assert_eq!(config.user_agent, "test");
    }

    #[test]
    fn test_sub_second_timeout_rounds_up() {
        let config = ClientConfig::new().with_timeout(Duration::from_millis(500));
        assert_eq!(config.timeout(), Duration::from_secs(1));

        let config = ClientConfig::new().with_timeout(Duration::from_millis(2500));
        assert_eq!(config.timeout_secs, 3);

        let config = ClientConfig::new().with_timeout(Duration::ZERO);
        assert_eq!(config.timeout(), Duration::from_secs(1));
    }

    #[test]
    fn test_zero_timeout_field_is_clamped() {
        let config = ClientConfig {
            timeout_secs: 0,
            ..ClientConfig::default()
        };
        assert_eq!(config.timeout(), Duration::from_secs(1));
    }
}

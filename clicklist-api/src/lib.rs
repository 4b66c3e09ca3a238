// Lint configuration for this crate
#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]
#![allow(clippy::must_use_candidate)]
#![allow(clippy::missing_errors_doc)]

//! # `ClickList` API
//!
//! Session-authenticated client for the `ClickList` storefront.
//!
//! The client logs in once, keeping the cookies and CSRF token the server
//! hands out in a [`Session`], and replays them on every later call:
//!
//! - [`ClickListClient::login`] - Authenticate, set store cookies, run store setup
//! - [`ClickListClient::favorites`] / [`ClickListClient::recent_purchases`] /
//!   [`ClickListClient::cart`] - Authenticated reads
//! - [`ClickListClient::add_to_cart`] / [`ClickListClient::remove_from_cart`] -
//!   Read-modify-write cart mutations
//! - [`ClickListClient::logout`] - Forget the session locally
//!
//! ## Example
//!
//! ```ignore
//! use clicklist_api::{ClickListClient, ClientConfig};
//!
//! let mut client = ClickListClient::new(ClientConfig::default())?;
//! client.login("shopper@example.com", "hunter2").await?;
//!
//! let favorites = client.favorites().await?;
//! if let Some(item) = favorites.first() {
//!     let added = client.add_to_cart(item, 2).await?;
//!     println!("{} now in cart", added.quantity);
//! }
//! ```

pub mod cart;
pub mod catalog;
pub mod client;
pub mod config;
pub mod error;
pub mod session;
pub mod store_cookies;

pub use cart::{AddToCartResult, DecoratedItem};
pub use client::ClickListClient;
pub use config::{ClientConfig, Endpoints};
pub use error::ClickListError;
pub use session::Session;
pub use store_cookies::{StoreCookie, StoreCookies};

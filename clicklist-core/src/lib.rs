// Lint configuration for this crate
#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]
#![allow(clippy::must_use_candidate)]

//! # `ClickList` Core
//!
//! Core types and models for the `ClickList` client.
//!
//! This crate provides the wire models shared by the other `ClickList`
//! crates:
//!
//! - Account types (authenticate request/response, user profile)
//! - Store metadata returned at login
//! - Catalog items (favorites, recent purchases)
//! - Cart and cart items
//! - [`Quantity`], the validated item count used by cart mutations
//!
//! Every wire model keeps the fields it does not name in an `extra` map, so
//! re-serializing a model reproduces what the server sent.
//!
//! ## Key Types
//!
//! - [`AuthenticateResponse`] - Login result with store and profile
//! - [`StoreInformation`] - Store identity used to build store cookies
//! - [`CatalogItem`] - Favorite / recent purchase entry
//! - [`Cart`] / [`CartItem`] - Current cart contents

pub mod error;
pub mod models;

// Re-export error types
pub use error::CoreError;

// Re-export all model types
pub use models::{
    // Account types
    AuthenticateRequest,
    AuthenticateResponse,
    Credentials,
    StoreEnvelope,
    UserProfile,
    // Store types
    StoreAddress,
    StoreInformation,
    // Catalog & cart
    Cart,
    CartItem,
    CatalogItem,
    Quantity,
};

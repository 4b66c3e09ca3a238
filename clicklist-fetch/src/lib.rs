// Lint configuration for this crate
#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]
#![allow(clippy::must_use_candidate)]
#![allow(clippy::missing_errors_doc)]

//! # `ClickList` Fetch
//!
//! HTTP plumbing for the `ClickList` client.
//!
//! - [`cookies::CookieJar`] - Per-domain cookie state, serializable for reuse
//! - [`transport::Transport`] - "Send one request" seam, with a
//!   [`transport::ReqwestTransport`] implementation
//! - [`executor::RequestExecutor`] - Builds requests against a base origin,
//!   replays and records cookies, applies the redirect policy and parses JSON
//!
//! ## Example
//!
//! ```ignore
//! use std::sync::Arc;
//! use clicklist_fetch::{ApiRequest, CookieJar, RequestExecutor, ReqwestTransport};
//!
//! let executor = RequestExecutor::new(
//!     Arc::new(ReqwestTransport::new()?),
//!     "https://www.kroger.com".parse()?,
//! );
//! let mut jar = CookieJar::new();
//! let cart = executor
//!     .execute(&mut jar, &ApiRequest::get("/storecatalog/clicklistbeta/api/cart"))
//!     .await?;
//! ```

pub mod cookies;
pub mod error;
pub mod executor;
pub mod transport;

// Re-export key types at crate root
pub use cookies::CookieJar;
pub use error::FetchError;
pub use executor::{ApiRequest, RawResponse, RedirectPolicy, RequestExecutor, DEFAULT_MAX_REDIRECTS};
pub use transport::{ReqwestTransport, Transport, TransportRequest, TransportResponse};

// Re-export the HTTP types that appear in the public API
pub use reqwest::{header, Method, StatusCode};

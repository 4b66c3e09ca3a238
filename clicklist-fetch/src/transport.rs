//! Transport seam: "send one HTTP request, give me the response".
//!
//! The executor owns redirects and cookies, so a transport must do neither:
//! it sends exactly the request it is handed and returns the raw status,
//! headers and body. [`ReqwestTransport`] is the production implementation;
//! tests plug in scripted transports.

use async_trait::async_trait;
use reqwest::{header::HeaderMap, redirect, Client, Method, StatusCode};
use std::time::Duration;
use tracing::{debug, instrument};
use url::Url;

use crate::error::FetchError;

/// Default request timeout.
pub const DEFAULT_TIMEOUT_SECS: u64 = 30;

/// User agent string for `ClickList`.
pub const USER_AGENT: &str = concat!("ClickList/", env!("CARGO_PKG_VERSION"));

// ============================================================================
// Request / Response
// ============================================================================

/// A fully resolved request.
#[derive(Debug, Clone)]
pub struct TransportRequest {
    /// HTTP method.
    pub method: Method,
    /// Absolute URL, query included.
    pub url: Url,
    /// Headers, `Cookie` included.
    pub headers: HeaderMap,
    /// Encoded body.
    pub body: Option<Vec<u8>>,
}

/// A raw response.
#[derive(Debug, Clone)]
pub struct TransportResponse {
    /// Response status.
    pub status: StatusCode,
    /// Response headers (all `Set-Cookie` values preserved).
    pub headers: HeaderMap,
    /// Response body as text.
    pub body: String,
}

// ============================================================================
// Transport Trait
// ============================================================================

/// Sends a single HTTP request.
#[async_trait]
pub trait Transport: Send + Sync {
    /// Sends `request` and returns the response without following redirects.
    async fn send(&self, request: TransportRequest) -> Result<TransportResponse, FetchError>;
}

// ============================================================================
// Reqwest Transport
// ============================================================================

/// [`Transport`] backed by `reqwest`.
///
/// Automatic redirects and reqwest's own cookie store are disabled; the
/// executor handles both.
#[derive(Debug, Clone)]
pub struct ReqwestTransport {
    inner: Client,
}

impl ReqwestTransport {
    /// Creates a transport with the default timeout and user agent.
    pub fn new() -> Result<Self, FetchError> {
        Self::with_options(Duration::from_secs(DEFAULT_TIMEOUT_SECS), USER_AGENT)
    }

    /// Creates a transport with a custom timeout and user agent.
    pub fn with_options(timeout: Duration, user_agent: &str) -> Result<Self, FetchError> {
        let client = Client::builder()
            .timeout(timeout)
            .user_agent(user_agent)
            .redirect(redirect::Policy::none())
            .build()?;

        Ok(Self { inner: client })
    }

    /// Returns the inner reqwest client for advanced operations.
    pub fn inner(&self) -> &Client {
        &self.inner
    }
}

#[async_trait]
impl Transport for ReqwestTransport {
    #[instrument(skip(self, request), fields(method = %request.method, url = %request.url))]
    async fn send(&self, request: TransportRequest) -> Result<TransportResponse, FetchError> {
        let mut builder = self
            .inner
            .request(request.method, request.url)
            .headers(request.headers);
        if let Some(body) = request.body {
            builder = builder.body(body);
        }

        let response = builder.send().await?;
        let status = response.status();
        let headers = response.headers().clone();
        let body = response.text().await?;
        debug!(status = %status, len = body.len(), "Response received");

        Ok(TransportResponse {
            status,
            headers,
            body,
        })
    }
}

//! Fetch error types.

use reqwest::StatusCode;
use thiserror::Error;

/// Error type for transport and executor operations.
#[derive(Debug, Error)]
pub enum FetchError {
    /// Network or connection failure while issuing the request.
    #[error("HTTP error: {0}")]
    Transport(#[from] reqwest::Error),

    /// Transport failure reported by a non-reqwest transport.
    #[error("Transport error: {0}")]
    TransportFailed(String),

    /// Server answered with a non-2xx/3xx status.
    #[error("HTTP {status}: {}", truncate(.body))]
    HttpStatus {
        /// Response status.
        status: StatusCode,
        /// Raw response body, for diagnostics.
        body: String,
    },

    /// Server redirected a call that must not be redirected.
    ///
    /// On authenticate and data calls a redirect means the session was not
    /// accepted (the server bounces to its sign-in page).
    #[error("Unexpected redirect ({status}) to {}", .location.as_deref().unwrap_or("<no location>"))]
    UnexpectedRedirect {
        /// Response status.
        status: StatusCode,
        /// `Location` header, if any.
        location: Option<String>,
    },

    /// Redirect chain exceeded the configured bound.
    #[error("Too many redirects (limit {0})")]
    TooManyRedirects(usize),

    /// URL could not be built or resolved.
    #[error("Invalid URL: {0}")]
    InvalidUrl(String),

    /// Header name or value could not be encoded.
    #[error("Invalid header: {0}")]
    InvalidHeader(String),

    /// Response body is not the JSON the caller expected.
    #[error("Invalid JSON response: {message}")]
    InvalidJson {
        /// Parser message.
        message: String,
        /// Raw response body, for diagnostics.
        body: String,
    },

    /// Request body serialization failed.
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

impl FetchError {
    /// HTTP status attached to this error, if any.
    pub fn status(&self) -> Option<StatusCode> {
        match self {
            Self::HttpStatus { status, .. } | Self::UnexpectedRedirect { status, .. } => {
                Some(*status)
            }
            Self::Transport(e) => e.status(),
            _ => None,
        }
    }

    /// Returns true if the request never produced a response.
    pub fn is_transport(&self) -> bool {
        matches!(self, Self::Transport(_) | Self::TransportFailed(_))
    }
}

/// Keeps error lines readable when the server returns a full HTML page.
fn truncate(body: &str) -> String {
    const MAX: usize = 200;
    if body.chars().count() <= MAX {
        body.to_string()
    } else {
        let head: String = body.chars().take(MAX).collect();
        format!("{head}...")
    }
}

//! `ClickList` protocol errors.

use clicklist_core::CoreError;
use clicklist_fetch::{FetchError, StatusCode};
use std::convert::Infallible;
use thiserror::Error;

/// Errors surfaced by [`ClickListClient`](crate::ClickListClient) operations.
///
/// Nothing is recovered internally: every variant reaches the caller.
#[derive(Debug, Error)]
pub enum ClickListError {
    /// Transport, HTTP status, redirect or body parsing failure.
    #[error(transparent)]
    Fetch(#[from] FetchError),

    /// The authenticate call answered 200 with `hasErrors: true`.
    #[error("Authentication failed: {0}")]
    AuthenticationFailed(String),

    /// The store-setup redirect chain finished without the CSRF cookie.
    #[error("Session token cookie {cookie:?} not found after store setup")]
    SessionTokenMissing {
        /// Cookie name that was searched for.
        cookie: String,
    },

    /// An authenticated operation was called without a session.
    #[error("Not logged in")]
    NotLoggedIn,

    /// Caller input failed validation.
    #[error("Invalid argument: {0}")]
    InvalidArgument(String),

    /// Response was well-formed JSON but not the expected shape.
    #[error("Invalid response: {0}")]
    InvalidResponse(String),
}

impl ClickListError {
    /// Returns true if logging in again could fix this error.
    ///
    /// Covers missing sessions, rejected credentials, and data calls the
    /// server bounced to sign-in (redirect, 401, 403).
    pub fn requires_login(&self) -> bool {
        match self {
            Self::NotLoggedIn | Self::AuthenticationFailed(_) | Self::SessionTokenMissing { .. } => {
                true
            }
            Self::Fetch(FetchError::UnexpectedRedirect { .. }) => true,
            Self::Fetch(e) => matches!(
                e.status(),
                Some(StatusCode::UNAUTHORIZED | StatusCode::FORBIDDEN)
            ),
            _ => false,
        }
    }
}

impl From<CoreError> for ClickListError {
    fn from(err: CoreError) -> Self {
        match err {
            CoreError::InvalidQuantity(_) | CoreError::InvalidPrice(_) => {
                Self::InvalidArgument(err.to_string())
            }
            CoreError::InvalidData(_) | CoreError::Serialization(_) => {
                Self::InvalidResponse(err.to_string())
            }
        }
    }
}

impl From<Infallible> for ClickListError {
    fn from(never: Infallible) -> Self {
        match never {}
    }
}

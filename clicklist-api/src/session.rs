//! Session state and the login handshake.
//!
//! Logging in is three strictly sequential steps:
//!
//! 1. **Authenticate** - post the credentials; a 200 with `hasErrors` is a
//!    rejected login.
//! 2. **Store cookies** - derive the store-selection cookies from the
//!    response's store record and put them in the jar.
//! 3. **Store setup** - walk the online-shopping redirect chain, which makes
//!    the server issue the CSRF cookie, then read that cookie.
//!
//! The handshake runs on a fresh jar. The session is only installed on the
//! client once all three steps succeed.

use chrono::{DateTime, Utc};
use clicklist_core::{AuthenticateRequest, AuthenticateResponse};
use clicklist_fetch::{ApiRequest, CookieJar, RedirectPolicy};
use serde::{Deserialize, Serialize};
use tracing::{debug, error, info, instrument};

use crate::client::ClickListClient;
use crate::error::ClickListError;
use crate::store_cookies::StoreCookies;

// ============================================================================
// Session
// ============================================================================

/// Authenticated state: the cookie jar plus the CSRF token read from it.
///
/// A plain value. Callers can take it out of a client, serialize it, and
/// restore it into another client later.
#[derive(Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Session {
    /// Cookies replayed on every request.
    pub jar: CookieJar,
    /// Anti-forgery token sent as a request header.
    pub csrf_token: String,
    /// When the handshake completed.
    #[serde(default = "Utc::now")]
    pub established_at: DateTime<Utc>,
}

impl Session {
    /// Creates a session established now.
    pub fn new(jar: CookieJar, csrf_token: impl Into<String>) -> Self {
        Self {
            jar,
            csrf_token: csrf_token.into(),
            established_at: Utc::now(),
        }
    }
}

impl std::fmt::Debug for Session {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Session")
            .field("cookies", &self.jar.len())
            .field("csrf_token", &"<redacted>")
            .field("established_at", &self.established_at)
            .finish()
    }
}

// ============================================================================
// Login
// ============================================================================

impl ClickListClient {
    /// Logs in and installs a new session.
    ///
    /// Any existing session is dropped first, so a failed login always
    /// leaves the client logged out. Returns the authenticate response,
    /// which carries the user profile and store record.
    #[instrument(skip(self, password), fields(method = "login"))]
    pub async fn login(
        &mut self,
        email: &str,
        password: &str,
    ) -> Result<AuthenticateResponse, ClickListError> {
        self.session = None;

        match self.establish_session(email, password).await {
            Ok((session, response)) => {
                info!(cookies = session.jar.len(), "Logged in");
                self.session = Some(session);
                Ok(response)
            }
            Err(e) => {
                error!(error = %e, "Login failed");
                Err(e)
            }
        }
    }

    async fn establish_session(
        &self,
        email: &str,
        password: &str,
    ) -> Result<(Session, AuthenticateResponse), ClickListError> {
        let mut jar = CookieJar::new();

        let response = self.authenticate(&mut jar, email, password).await?;
        let store = response.store_information().ok_or_else(|| {
            ClickListError::InvalidResponse(
                "authenticate response has no store.storeInformation".to_string(),
            )
        })?;

        let cookies = StoreCookies::from_store(store);
        cookies.apply(&mut jar, self.executor.base_host());
        debug!(count = cookies.len(), store = %store.store_code(), "Store cookies set");

        let csrf_token = self.setup_store(&mut jar).await?;
        Ok((Session::new(jar, csrf_token), response))
    }

    /// Step 1: post the credentials.
    async fn authenticate(
        &self,
        jar: &mut CookieJar,
        email: &str,
        password: &str,
    ) -> Result<AuthenticateResponse, ClickListError> {
        let request = ApiRequest::post(self.config.endpoints.authenticate.as_str())
            .json(&AuthenticateRequest::new(email, password))?;
        let response: AuthenticateResponse = self.executor.execute_as(jar, &request).await?;

        if response.has_errors {
            let message = response
                .error_message()
                .unwrap_or_else(|| "credentials rejected".to_string());
            return Err(ClickListError::AuthenticationFailed(message));
        }

        debug!("Credentials accepted");
        Ok(response)
    }

    /// Step 3: follow the store-setup redirects and read the CSRF cookie.
    async fn setup_store(&self, jar: &mut CookieJar) -> Result<String, ClickListError> {
        let endpoints = &self.config.endpoints;
        let request = ApiRequest::get(endpoints.online_shopping_redirect.as_str())
            .query("redirectUrl", endpoints.store_setup.as_str())
            .redirect(RedirectPolicy::Follow);
        let landing = self.executor.execute_raw(jar, &request).await?;
        debug!(url = %landing.url, "Store setup finished");

        match jar.find(&self.config.csrf_cookie) {
            Some(token) if !token.is_empty() => Ok(token.to_string()),
            _ => Err(ClickListError::SessionTokenMissing {
                cookie: self.config.csrf_cookie.clone(),
            }),
        }
    }
}

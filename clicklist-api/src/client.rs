//! The `ClickList` client.
//!
//! A [`ClickListClient`] owns the request executor and at most one
//! [`Session`]. Operations are spread across modules by concern:
//! login in [`session`](crate::session), reads in
//! [`catalog`](crate::catalog), mutations in [`cart`](crate::cart).

use clicklist_fetch::{ApiRequest, RequestExecutor, ReqwestTransport, Transport};
use serde::de::DeserializeOwned;
use std::sync::Arc;
use tracing::{debug, info, instrument};
use url::Url;

use crate::config::ClientConfig;
use crate::error::ClickListError;
use crate::session::Session;

/// Session-authenticated client for the `ClickList` storefront API.
///
/// Every method that touches the session takes `&mut self`, so calls on
/// one client are serialized. Separate clients are separate sessions.
#[derive(Debug)]
pub struct ClickListClient {
    pub(crate) executor: RequestExecutor,
    pub(crate) config: ClientConfig,
    pub(crate) session: Option<Session>,
}

impl ClickListClient {
    /// Creates a client that talks HTTP through `reqwest`.
    pub fn new(config: ClientConfig) -> Result<Self, ClickListError> {
        let transport = ReqwestTransport::with_options(config.timeout(), &config.user_agent)?;
        Self::with_transport(config, Arc::new(transport))
    }

    /// Creates a client on top of a custom [`Transport`].
    pub fn with_transport(
        config: ClientConfig,
        transport: Arc<dyn Transport>,
    ) -> Result<Self, ClickListError> {
        let base_url = Url::parse(&config.base_url).map_err(|e| {
            ClickListError::InvalidArgument(format!("base URL {:?}: {e}", config.base_url))
        })?;
        if base_url.host_str().is_none() {
            return Err(ClickListError::InvalidArgument(format!(
                "base URL {:?} has no host",
                config.base_url
            )));
        }

        let executor =
            RequestExecutor::new(transport, base_url).with_max_redirects(config.max_redirects);

        Ok(Self {
            executor,
            config,
            session: None,
        })
    }

    /// The configuration this client was built with.
    pub fn config(&self) -> &ClientConfig {
        &self.config
    }

    /// Host that synthesized cookies are stored under.
    pub fn base_host(&self) -> &str {
        self.executor.base_host()
    }

    // ========================================================================
    // Session lifecycle
    // ========================================================================

    /// Returns true if a session is installed.
    pub fn is_logged_in(&self) -> bool {
        self.session.is_some()
    }

    /// The current session, if any.
    pub fn session(&self) -> Option<&Session> {
        self.session.as_ref()
    }

    /// Removes and returns the session, leaving the client logged out.
    pub fn take_session(&mut self) -> Option<Session> {
        self.session.take()
    }

    /// Installs a previously saved session.
    ///
    /// The session is not checked against the server; a stale session shows
    /// up as an error on the next call.
    #[instrument(skip(self, session), fields(method = "restore_session"))]
    pub fn restore_session(&mut self, session: Session) -> Result<(), ClickListError> {
        if session.csrf_token.is_empty() {
            return Err(ClickListError::SessionTokenMissing {
                cookie: self.config.csrf_cookie.clone(),
            });
        }
        debug!(cookies = session.jar.len(), "Session restored");
        self.session = Some(session);
        Ok(())
    }

    /// Forgets the session. Nothing is sent to the server.
    #[instrument(skip(self), fields(method = "logout"))]
    pub fn logout(&mut self) {
        if self.session.take().is_some() {
            info!("Logged out");
        } else {
            debug!("Logout without a session");
        }
    }

    // ========================================================================
    // Authorized requests
    // ========================================================================

    /// Fails with [`ClickListError::NotLoggedIn`] when there is no session.
    pub(crate) fn ensure_logged_in(&self) -> Result<(), ClickListError> {
        if self.session.is_some() {
            Ok(())
        } else {
            Err(ClickListError::NotLoggedIn)
        }
    }

    /// Sends `request` with the session cookies and CSRF header and
    /// deserializes the JSON body.
    pub(crate) async fn send_authorized<T: DeserializeOwned>(
        &mut self,
        request: ApiRequest,
    ) -> Result<T, ClickListError> {
        let session = self.session.as_mut().ok_or(ClickListError::NotLoggedIn)?;
        let request = request.header(self.config.csrf_header.clone(), session.csrf_token.clone());
        Ok(self.executor.execute_as(&mut session.jar, &request).await?)
    }
}

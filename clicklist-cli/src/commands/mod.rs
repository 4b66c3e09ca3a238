//! CLI command implementations.

pub mod cart;
pub mod config;
pub mod items;
pub mod login;

use anyhow::Result;
use clicklist_api::{ClickListClient, ClickListError};
use clicklist_store::{SessionStore, Settings, StoredSession, default_settings_path};
use std::path::PathBuf;
use thiserror::Error;
use tracing::{debug, warn};

/// Settings and stores shared by every command.
pub struct AppContext {
    /// Loaded settings.
    pub settings: Settings,
    /// Where the settings came from.
    pub settings_path: PathBuf,
    /// Saved session.
    pub sessions: SessionStore,
}

impl AppContext {
    /// Loads settings from `path` (or the default location).
    pub async fn load(path: Option<PathBuf>) -> Result<Self> {
        let settings_path = path.unwrap_or_else(default_settings_path);
        let settings = Settings::load(&settings_path).await?;
        let sessions = SessionStore::new(settings.session_path());

        Ok(Self {
            settings,
            settings_path,
            sessions,
        })
    }

    /// A client with no session.
    pub fn client(&self) -> Result<ClickListClient> {
        Ok(ClickListClient::new(self.settings.client.clone())?)
    }

    /// A client with the saved session restored, plus the account email.
    pub async fn logged_in_client(&self) -> Result<(ClickListClient, String)> {
        let stored = self
            .sessions
            .load()
            .await?
            .ok_or(ClickListError::NotLoggedIn)?;
        debug!(email = %stored.email, age_secs = stored.age().num_seconds(), "Using saved session");

        let mut client = self.client()?;
        client.restore_session(stored.session)?;
        Ok((client, stored.email))
    }

    /// Saves the client's session, then hands back `result`.
    ///
    /// Runs on failure too: a failed call may still have rotated cookies.
    /// A save error is only logged when the call itself failed.
    pub async fn finish<T, E>(
        &self,
        client: &ClickListClient,
        email: &str,
        result: Result<T, E>,
    ) -> Result<T>
    where
        E: Into<anyhow::Error>,
    {
        let saved = self.save_session(client, email).await;
        match result {
            Ok(value) => saved.map(|()| value),
            Err(e) => {
                if let Err(save_err) = saved {
                    warn!(error = %save_err, "Could not save session");
                }
                Err(e.into())
            }
        }
    }

    /// Writes the client's current session back to disk.
    async fn save_session(&self, client: &ClickListClient, email: &str) -> Result<()> {
        if let Some(session) = client.session() {
            self.sessions
                .save(&StoredSession::new(email, session.clone()))
                .await?;
        }
        Ok(())
    }
}

/// The product code is neither a favorite nor a recent purchase.
#[derive(Debug, Error)]
#[error("Item {upc} is not in your favorites or recent purchases")]
pub struct ItemNotFound {
    /// Requested product code.
    pub upc: String,
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use clicklist_api::{ClientConfig, Session};
    use serde_json::json;
    use tempfile::TempDir;

    fn context(dir: &TempDir) -> AppContext {
        AppContext {
            settings: Settings::default(),
            settings_path: dir.path().join("settings.json"),
            sessions: SessionStore::new(dir.path().join("session.json")),
        }
    }

    fn client_with_rotated_cookie() -> ClickListClient {
        let session: Session = serde_json::from_value(json!({
            "jar": { "www.kroger.com": { "sid": "rotated" } },
            "csrfToken": "csrf-123"
        }))
        .unwrap();
        let mut client = ClickListClient::new(ClientConfig::default()).unwrap();
        client.restore_session(session).unwrap();
        client
    }

    #[tokio::test]
    async fn test_finish_saves_session_when_call_failed() {
        let dir = tempfile::tempdir().unwrap();
        let ctx = context(&dir);
        let client = client_with_rotated_cookie();

        let failed: Result<(), ClickListError> =
            Err(ClickListError::InvalidResponse("cart unavailable".to_string()));
        let err = ctx.finish(&client, "pat@example.com", failed).await.unwrap_err();
        assert!(matches!(
            err.downcast_ref::<ClickListError>(),
            Some(ClickListError::InvalidResponse(_))
        ));

        let stored = ctx.sessions.load().await.unwrap().unwrap();
        assert_eq!(stored.email, "pat@example.com");
        assert_eq!(stored.session.jar, client.session().unwrap().jar);
    }

    #[tokio::test]
    async fn test_finish_saves_session_and_returns_value() {
        let dir = tempfile::tempdir().unwrap();
        let ctx = context(&dir);
        let client = client_with_rotated_cookie();

        let value = ctx
            .finish(&client, "pat@example.com", Ok::<_, ClickListError>(3))
            .await
            .unwrap();
        assert_eq!(value, 3);
        assert!(ctx.sessions.load().await.unwrap().is_some());
    }

    #[tokio::test]
    async fn test_finish_without_session_writes_nothing() {
        let dir = tempfile::tempdir().unwrap();
        let ctx = context(&dir);
        let client = ClickListClient::new(ClientConfig::default()).unwrap();

        ctx.finish(&client, "pat@example.com", Ok::<_, ClickListError>(()))
            .await
            .unwrap();
        assert!(ctx.sessions.load().await.unwrap().is_none());
    }
}

//! Saved session.
//!
//! Lets the CLI log in once and reuse the cookie jar and CSRF token on later
//! runs. The file holds live credentials and is written owner-only.

use chrono::{DateTime, Utc};
use clicklist_api::Session;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use tracing::{debug, info, instrument};

use crate::error::StoreError;
use crate::persistence::{default_session_path, load_json, remove_file, save_json};

/// What goes on disk: the session plus who it belongs to.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StoredSession {
    /// Account the session was established for.
    pub email: String,
    /// When the file was written.
    pub saved_at: DateTime<Utc>,
    /// The session itself.
    pub session: Session,
}

impl StoredSession {
    /// Wraps a session, stamped now.
    pub fn new(email: impl Into<String>, session: Session) -> Self {
        Self {
            email: email.into(),
            saved_at: Utc::now(),
            session,
        }
    }

    /// Time since the session was established.
    pub fn age(&self) -> chrono::Duration {
        Utc::now() - self.session.established_at
    }
}

/// Reads and writes the session file.
#[derive(Debug, Clone)]
pub struct SessionStore {
    path: PathBuf,
}

impl SessionStore {
    /// Creates a store backed by `path`.
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// Creates a store at the default cache location.
    pub fn default_location() -> Self {
        Self::new(default_session_path())
    }

    /// Backing file.
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Writes the session, replacing any previous one.
    #[instrument(skip(self, stored), fields(path = %self.path.display()))]
    pub async fn save(&self, stored: &StoredSession) -> Result<(), StoreError> {
        save_json(&self.path, stored).await?;
        info!(email = %stored.email, "Session saved");
        Ok(())
    }

    /// Reads the session. `Ok(None)` if none has been saved.
    #[instrument(skip(self), fields(path = %self.path.display()))]
    pub async fn load(&self) -> Result<Option<StoredSession>, StoreError> {
        match load_json::<StoredSession>(&self.path).await {
            Ok(stored) => {
                debug!(email = %stored.email, cookies = stored.session.jar.len(), "Session loaded");
                Ok(Some(stored))
            }
            Err(e) if e.is_not_found() => {
                debug!("No saved session");
                Ok(None)
            }
            Err(e) => Err(e),
        }
    }

    /// Deletes the session file. Returns false if there was none.
    #[instrument(skip(self), fields(path = %self.path.display()))]
    pub async fn delete(&self) -> Result<bool, StoreError> {
        let removed = remove_file(&self.path).await?;
        if removed {
            info!("Session deleted");
        }
        Ok(removed)
    }
}

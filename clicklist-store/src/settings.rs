//! User settings.
//!
//! Stored as JSON at [`default_settings_path`]. Every field has a default,
//! so a partial or empty file is valid and unknown keys are ignored.

use clicklist_api::ClientConfig;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use tracing::{debug, info};

use crate::error::StoreError;
use crate::persistence::{default_session_path, default_settings_path, load_json, save_json};

// ============================================================================
// Settings Types
// ============================================================================

/// User preferences.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    /// Client configuration: base URL, endpoints, timeouts.
    pub client: ClientConfig,

    /// Default log level when neither `--verbose` nor `RUST_LOG` is given.
    pub log_level: LogLevel,

    /// Where the session is saved. `None` uses the cache directory.
    pub session_path: Option<PathBuf>,
}

impl Settings {
    /// Loads settings from `path`, falling back to defaults if the file is
    /// missing.
    ///
    /// A file that exists but cannot be parsed is an error, so typos are not
    /// silently ignored.
    pub async fn load(path: &Path) -> Result<Self, StoreError> {
        if !path.exists() {
            debug!(path = %path.display(), "Settings file not found, using defaults");
            return Ok(Self::default());
        }

        info!(path = %path.display(), "Loading settings");
        let settings: Self = load_json(path).await?;
        settings.validate()?;
        Ok(settings)
    }

    /// Loads settings from the default path.
    pub async fn load_default() -> Result<Self, StoreError> {
        Self::load(&default_settings_path()).await
    }

    /// Saves settings to `path`.
    pub async fn save(&self, path: &Path) -> Result<(), StoreError> {
        save_json(path, self).await?;
        info!(path = %path.display(), "Settings saved");
        Ok(())
    }

    /// Resolved session file location.
    pub fn session_path(&self) -> PathBuf {
        self.session_path.clone().unwrap_or_else(default_session_path)
    }

    /// Rejects values the client cannot work with.
    pub fn validate(&self) -> Result<(), StoreError> {
        if self.client.base_url.trim().is_empty() {
            return Err(StoreError::Config("client.baseUrl is empty".to_string()));
        }
        if self.client.timeout_secs == 0 {
            return Err(StoreError::Config(
                "client.timeoutSecs must be at least 1".to_string(),
            ));
        }
        Ok(())
    }
}

/// Log level.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum LogLevel {
    /// Errors only.
    Error,
    /// Warnings and errors.
    #[default]
    Warn,
    /// Informational messages.
    Info,
    /// Debug output.
    Debug,
    /// Everything.
    Trace,
}

impl LogLevel {
    /// Directive string understood by `tracing_subscriber::EnvFilter`.
    pub fn as_str(self) -> &'static str {
        match self {
            LogLevel::Error => "error",
            LogLevel::Warn => "warn",
            LogLevel::Info => "info",
            LogLevel::Debug => "debug",
            LogLevel::Trace => "trace",
        }
    }
}

impl std::fmt::Display for LogLevel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let settings = Settings::default();
        assert_eq!(settings.log_level, LogLevel::Warn);
        assert_eq!(settings.client, ClientConfig::default());
        assert!(settings.session_path().ends_with("session.json"));
        assert!(settings.validate().is_ok());
    }

    #[test]
    fn test_log_level_names() {
        let level: LogLevel = serde_json::from_str("\"debug\"").unwrap();
        assert_eq!(level, LogLevel::Debug);
        assert_eq!(LogLevel::Trace.to_string(), "trace");
    }

    #[test]
    fn test_validate_rejects_zero_timeout() {
        let mut settings = Settings::default();
        settings.client.timeout_secs = 0;
        assert!(matches!(settings.validate(), Err(StoreError::Config(_))));
    }
}

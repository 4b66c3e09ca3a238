// Lint configuration for this crate
#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]
#![allow(clippy::must_use_candidate)]
#![allow(clippy::missing_errors_doc)]

//! # `ClickList` Store
//!
//! On-disk state for the `ClickList` CLI.
//!
//! - **Settings**: client configuration and log level, JSON in the config dir
//! - **SessionStore**: the logged-in session, JSON in the cache dir
//! - **Persistence**: atomic, owner-only JSON file helpers
//!
//! ## Usage
//!
//! ```ignore
//! use clicklist_store::{SessionStore, Settings, StoredSession};
//!
//! let settings = Settings::load_default().await?;
//! let store = SessionStore::new(settings.session_path());
//!
//! if let Some(stored) = store.load().await? {
//!     client.restore_session(stored.session)?;
//! }
//! ```

pub mod error;
pub mod persistence;
pub mod session_store;
pub mod settings;

pub use error::StoreError;
pub use persistence::{
    default_cache_dir, default_config_dir, default_session_path, default_settings_path,
    load_json, load_json_or_default, remove_file, save_json,
};
pub use session_store::{SessionStore, StoredSession};
pub use settings::{LogLevel, Settings};

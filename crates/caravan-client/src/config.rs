//! # Client Configuration
//!
//! TOML configuration for the client: where the local cache lives and
//! whether to seed it on startup.
//!
//! ## Configuration File Format
//! ```toml
//! # client.toml
//! database_path = "/home/rep/.local/share/caravan/caravan.db"
//! sync_on_startup = true
//! ```
//!
//! Loading is forgiving: a missing or unreadable file falls back to
//! defaults with a warning, because the client must come up offline on a
//! fresh install.

use directories::ProjectDirs;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use thiserror::Error;
use tracing::{debug, warn};

use caravan_db::DbConfig;

// =============================================================================
// Config Error
// =============================================================================

/// Configuration load/save failures.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// Failed to read or parse the config file.
    #[error("failed to load config: {0}")]
    Load(String),

    /// Failed to serialize or write the config file.
    #[error("failed to save config: {0}")]
    Save(String),
}

impl From<std::io::Error> for ConfigError {
    fn from(err: std::io::Error) -> Self {
        ConfigError::Load(err.to_string())
    }
}

impl From<toml::de::Error> for ConfigError {
    fn from(err: toml::de::Error) -> Self {
        ConfigError::Load(err.to_string())
    }
}

impl From<toml::ser::Error> for ConfigError {
    fn from(err: toml::ser::Error) -> Self {
        ConfigError::Save(err.to_string())
    }
}

// =============================================================================
// Client Config
// =============================================================================

/// Complete client configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ClientConfig {
    /// Path of the SQLite cache database file.
    #[serde(default = "default_database_path")]
    pub database_path: PathBuf,

    /// Whether the embedding app should run a full seed on startup.
    #[serde(default = "default_sync_on_startup")]
    pub sync_on_startup: bool,
}

fn default_database_path() -> PathBuf {
    ProjectDirs::from("com", "Caravan", "caravan")
        .map(|dirs| dirs.data_dir().join("caravan.db"))
        .unwrap_or_else(|| PathBuf::from("./caravan.db"))
}

fn default_sync_on_startup() -> bool {
    true
}

impl Default for ClientConfig {
    fn default() -> Self {
        ClientConfig {
            database_path: default_database_path(),
            sync_on_startup: default_sync_on_startup(),
        }
    }
}

impl ClientConfig {
    /// Platform default location of the config file
    /// (e.g. `~/.config/caravan/client.toml` on Linux).
    pub fn default_path() -> Option<PathBuf> {
        ProjectDirs::from("com", "Caravan", "caravan")
            .map(|dirs| dirs.config_dir().join("client.toml"))
    }

    /// Loads the config from the given path, or the platform default
    /// location, falling back to defaults when the file is missing or
    /// unreadable.
    pub fn load_or_default(path: Option<PathBuf>) -> Self {
        let path = match path.or_else(Self::default_path) {
            Some(path) => path,
            None => return Self::default(),
        };

        if !path.exists() {
            debug!(path = %path.display(), "No config file, using defaults");
            return Self::default();
        }

        match Self::load(&path) {
            Ok(config) => config,
            Err(err) => {
                warn!(path = %path.display(), error = %err, "Config unreadable, using defaults");
                Self::default()
            }
        }
    }

    /// Loads the config from a TOML file.
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let raw = std::fs::read_to_string(path)?;
        Ok(toml::from_str(&raw)?)
    }

    /// Saves the config as TOML, creating parent directories as needed.
    pub fn save(&self, path: &Path) -> Result<(), ConfigError> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent).map_err(|e| ConfigError::Save(e.to_string()))?;
        }

        let raw = toml::to_string_pretty(self)?;
        std::fs::write(path, raw).map_err(|e| ConfigError::Save(e.to_string()))?;
        Ok(())
    }

    /// Derives the database configuration for this client config.
    pub fn db_config(&self) -> DbConfig {
        DbConfig::new(&self.database_path)
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use uuid::Uuid;

    fn scratch_path() -> PathBuf {
        std::env::temp_dir()
            .join(format!("caravan-config-{}", Uuid::new_v4()))
            .join("client.toml")
    }

    #[test]
    fn test_save_then_load_roundtrip() {
        let path = scratch_path();
        let config = ClientConfig {
            database_path: PathBuf::from("/tmp/elsewhere.db"),
            sync_on_startup: false,
        };

        config.save(&path).unwrap();
        let loaded = ClientConfig::load(&path).unwrap();

        assert_eq!(loaded.database_path, config.database_path);
        assert!(!loaded.sync_on_startup);

        std::fs::remove_dir_all(path.parent().unwrap()).ok();
    }

    #[test]
    fn test_missing_file_falls_back_to_defaults() {
        let config = ClientConfig::load_or_default(Some(scratch_path()));
        assert!(config.sync_on_startup);
    }

    #[test]
    fn test_partial_file_fills_in_defaults() {
        let path = scratch_path();
        std::fs::create_dir_all(path.parent().unwrap()).unwrap();
        std::fs::write(&path, "sync_on_startup = false\n").unwrap();

        let config = ClientConfig::load_or_default(Some(path.clone()));
        assert!(!config.sync_on_startup);
        assert_eq!(config.database_path, default_database_path());

        std::fs::remove_dir_all(path.parent().unwrap()).ok();
    }
}

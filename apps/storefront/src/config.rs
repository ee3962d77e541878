//! Storefront configuration.
//!
//! Configuration is loaded from environment variables with fallback to defaults.

use directories::ProjectDirs;
use serde::{Deserialize, Serialize};
use std::env;
use std::path::PathBuf;
use storefront_core::{DEFAULT_SEARCH_LIMIT, MAX_SEARCH_LIMIT};
use storefront_db::DbConfig;

/// Storefront configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AppConfig {
    /// SQLite catalog file (`:memory:` for an in-memory catalog)
    pub database_path: PathBuf,

    /// Maximum pooled connections
    pub max_connections: u32,

    /// Page size used when a search doesn't ask for one
    pub search_limit: u32,
}

impl AppConfig {
    /// Load configuration from environment variables.
    ///
    /// ## Variables
    /// - `STOREFRONT_DB_PATH` (default: platform data dir `storefront/storefront.db`)
    /// - `STOREFRONT_DB_MAX_CONNECTIONS` (default: 5)
    /// - `STOREFRONT_SEARCH_LIMIT` (default: 50, within 1..=500)
    pub fn load() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Builds the configuration from any key lookup (env vars in production).
    pub(crate) fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let database_path = match lookup("STOREFRONT_DB_PATH") {
            Some(path) if !path.trim().is_empty() => PathBuf::from(path),
            _ => default_database_path()?,
        };

        let config = AppConfig {
            database_path,

            max_connections: lookup("STOREFRONT_DB_MAX_CONNECTIONS")
                .unwrap_or_else(|| "5".to_string())
                .trim()
                .parse()
                .map_err(|_| ConfigError::InvalidValue("STOREFRONT_DB_MAX_CONNECTIONS".to_string()))?,

            search_limit: lookup("STOREFRONT_SEARCH_LIMIT")
                .unwrap_or_else(|| DEFAULT_SEARCH_LIMIT.to_string())
                .trim()
                .parse()
                .map_err(|_| ConfigError::InvalidValue("STOREFRONT_SEARCH_LIMIT".to_string()))?,
        };

        if config.max_connections == 0 {
            return Err(ConfigError::InvalidValue(
                "STOREFRONT_DB_MAX_CONNECTIONS".to_string(),
            ));
        }

        if !(1..=MAX_SEARCH_LIMIT).contains(&config.search_limit) {
            return Err(ConfigError::InvalidValue("STOREFRONT_SEARCH_LIMIT".to_string()));
        }

        Ok(config)
    }

    /// In-memory catalog with default limits (tests and demos).
    pub fn in_memory() -> Self {
        AppConfig {
            database_path: PathBuf::from(":memory:"),
            max_connections: 1,
            search_limit: DEFAULT_SEARCH_LIMIT,
        }
    }

    /// Pool settings derived from this configuration.
    pub fn db_config(&self) -> DbConfig {
        if self.database_path.as_os_str() == ":memory:" {
            DbConfig::in_memory()
        } else {
            DbConfig::new(&self.database_path).max_connections(self.max_connections)
        }
    }
}

/// Determines the catalog file path based on the platform.
///
/// ## Platform-Specific Paths
/// - **macOS**: `~/Library/Application Support/com.storefront.storefront/storefront.db`
/// - **Windows**: `%APPDATA%\storefront\storefront\data\storefront.db`
/// - **Linux**: `~/.local/share/storefront/storefront.db`
fn default_database_path() -> Result<PathBuf, ConfigError> {
    let proj_dirs = ProjectDirs::from("com", "storefront", "storefront")
        .ok_or(ConfigError::NoDataDir)?;

    let data_dir = proj_dirs.data_dir();

    std::fs::create_dir_all(data_dir)
        .map_err(|e| ConfigError::DataDir(format!("{}: {}", data_dir.display(), e)))?;

    Ok(data_dir.join("storefront.db"))
}

/// Configuration error types.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Invalid value for {0}")]
    InvalidValue(String),

    #[error("Could not determine app data directory")]
    NoDataDir,

    #[error("Could not create data directory {0}")]
    DataDir(String),
}

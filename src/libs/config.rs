//! Configuration for the taskboard application.
//!
//! Settings live in `config.json` inside the platform data directory resolved by
//! [`DataStorage`]. A missing file means defaults; environment variables override
//! what the file says so scripted use does not need to touch it.
//!
//! ## Settings
//!
//! - **database**: path of the SQLite file and the busy timeout that bounds how
//!   long a writer waits for the database lock
//! - **default_user**: identity used by the CLI when `--user` is not given
//!
//! ## Environment overrides
//!
//! - `TASKBOARD_DB`: database path
//! - `TASKBOARD_USER`: acting user id (read by clap on the `--user` flag)
//!
//! ```rust,no_run
//! use taskboard::libs::config::Config;
//!
//! let mut config = Config::read()?;
//! config.default_user = Some(1);
//! config.save()?;
//! # Ok::<(), anyhow::Error>(())
//! ```

use super::data_storage::DataStorage;
use anyhow::Result;
use serde::{Deserialize, Serialize};
use std::env;
use std::fs::{self, File};
use std::path::PathBuf;
use std::time::Duration;

pub const CONFIG_FILE_NAME: &str = "config.json";
pub const DB_FILE_NAME: &str = "taskboard.db";
pub const DB_PATH_ENV: &str = "TASKBOARD_DB";

/// Default time a transaction waits for the SQLite write lock.
pub const DEFAULT_BUSY_TIMEOUT_MS: u64 = 5_000;

#[derive(Serialize, Deserialize, Clone, Debug, PartialEq)]
#[serde(default)]
pub struct DatabaseConfig {
    /// Database file. `None` keeps it next to the config file.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub path: Option<PathBuf>,

    /// Milliseconds a transaction waits for a competing writer before it fails
    /// with a transaction failure. Repositions are never retried internally.
    pub busy_timeout_ms: u64,
}

impl Default for DatabaseConfig {
    fn default() -> Self {
        Self {
            path: None,
            busy_timeout_ms: DEFAULT_BUSY_TIMEOUT_MS,
        }
    }
}

impl DatabaseConfig {
    pub fn busy_timeout(&self) -> Duration {
        Duration::from_millis(self.busy_timeout_ms)
    }
}

#[derive(Serialize, Deserialize, Clone, Debug, Default, PartialEq)]
pub struct Config {
    #[serde(default)]
    pub database: DatabaseConfig,

    /// User the CLI acts as when no `--user` flag is given.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub default_user: Option<i64>,
}

impl Config {
    /// Loads the configuration file, falling back to defaults when it is absent.
    pub fn read() -> Result<Config> {
        Self::read_from(&DataStorage::new())
    }

    pub fn read_from(storage: &DataStorage) -> Result<Config> {
        let config_file_path = storage.get_path(CONFIG_FILE_NAME)?;
        if !config_file_path.exists() {
            return Ok(Config::default());
        }

        let config_str = fs::read_to_string(config_file_path)?;
        let config: Config = serde_json::from_str(&config_str)?;
        Ok(config)
    }

    pub fn save(&self) -> Result<()> {
        self.save_to(&DataStorage::new())
    }

    pub fn save_to(&self, storage: &DataStorage) -> Result<()> {
        let config_file_path = storage.get_path(CONFIG_FILE_NAME)?;
        let config_file = File::create(config_file_path)?;
        serde_json::to_writer_pretty(&config_file, &self)?;
        Ok(())
    }

    /// Resolves the database file: `TASKBOARD_DB`, then the configured path,
    /// then the data directory.
    pub fn database_path(&self, storage: &DataStorage) -> Result<PathBuf> {
        if let Ok(path) = env::var(DB_PATH_ENV) {
            if !path.is_empty() {
                return Ok(PathBuf::from(path));
            }
        }
        match &self.database.path {
            Some(path) => Ok(path.clone()),
            None => storage.get_path(DB_FILE_NAME),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_use_five_second_busy_timeout() {
        let config = Config::default();
        assert_eq!(config.database.busy_timeout(), Duration::from_secs(5));
        assert!(config.default_user.is_none());
    }

    #[test]
    fn missing_database_section_falls_back_to_defaults() {
        let config: Config = serde_json::from_str(r#"{ "default_user": 7 }"#).unwrap();
        assert_eq!(config.default_user, Some(7));
        assert_eq!(config.database, DatabaseConfig::default());
    }

    #[test]
    fn round_trips_through_storage() {
        let dir = tempfile::tempdir().unwrap();
        let storage = DataStorage::at(dir.path());

        let config = Config {
            database: DatabaseConfig {
                path: Some(dir.path().join("board.db")),
                busy_timeout_ms: 250,
            },
            default_user: Some(3),
        };
        config.save_to(&storage).unwrap();

        assert_eq!(Config::read_from(&storage).unwrap(), config);
    }
}

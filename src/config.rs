//! Runtime configuration.
//!
//! Values come from, in priority order: the TOML config file
//! (`speakeasy.toml`, or whatever `SPEAKEASY_CONFIG` points at), the
//! environment (`.env` is loaded first), then built-in defaults.
//!
//! ```toml
//! [database]
//! path = "data/speakeasy.sqlite3"
//!
//! [scheduler]
//! max_interval = 180
//! due_soon_days = 5
//! ```

use crate::error::Result;
use crate::srs::SchedulerConfig;
use serde::Deserialize;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};

pub const DEFAULT_CONFIG_PATH: &str = "speakeasy.toml";
pub const DEFAULT_DATABASE_PATH: &str = "speakeasy.sqlite3";

pub const CONFIG_PATH_ENV: &str = "SPEAKEASY_CONFIG";
pub const DATABASE_PATH_ENV: &str = "SPEAKEASY_DB_PATH";

#[derive(Debug, Default, Deserialize)]
struct ConfigFile {
    database: Option<DatabaseSection>,
    #[serde(default)]
    scheduler: SchedulerConfig,
}

#[derive(Debug, Deserialize)]
struct DatabaseSection {
    path: Option<String>,
}

#[derive(Clone, Debug, PartialEq)]
pub struct Config {
    pub database_path: PathBuf,
    pub scheduler: SchedulerConfig,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            database_path: PathBuf::from(DEFAULT_DATABASE_PATH),
            scheduler: SchedulerConfig::default(),
        }
    }
}

impl Config {
    /// Loads configuration from the default locations.
    pub fn load() -> Result<Self> {
        let _ = dotenvy::dotenv();

        let config_path = std::env::var(CONFIG_PATH_ENV).unwrap_or_else(|_| DEFAULT_CONFIG_PATH.to_string());
        Self::load_from(Path::new(&config_path))
    }

    /// Loads configuration using `path` as the config file. A missing file
    /// is not an error; a malformed one is.
    pub fn load_from(path: &Path) -> Result<Self> {
        let file = match std::fs::read_to_string(path) {
            Ok(contents) => Some(toml::from_str::<ConfigFile>(&contents)?),
            Err(e) if e.kind() == ErrorKind::NotFound => None,
            Err(e) => {
                tracing::warn!("Could not read config file {}: {}", path.display(), e);
                None
            }
        };

        Ok(Self::resolve(file, std::env::var(DATABASE_PATH_ENV).ok()))
    }

    fn resolve(file: Option<ConfigFile>, env_database_path: Option<String>) -> Self {
        let file = file.unwrap_or_default();

        let database_path = if let Some(path) = file.database.and_then(|db| db.path) {
            tracing::info!("Using database from config file: {}", path);
            PathBuf::from(path)
        } else if let Some(path) = env_database_path {
            tracing::info!("Using database from {}: {}", DATABASE_PATH_ENV, path);
            PathBuf::from(path)
        } else {
            tracing::info!("Using default database path: {}", DEFAULT_DATABASE_PATH);
            PathBuf::from(DEFAULT_DATABASE_PATH)
        };

        Self {
            database_path,
            scheduler: file.scheduler,
        }
    }
}

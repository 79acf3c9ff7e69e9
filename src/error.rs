//! Error type shared by the store, the JSON interchange and config loading.
//!
//! The scheduler itself never fails; everything in here comes from the
//! caller-side plumbing around it.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum Error {
    /// SQLite failure
    #[error("Database error: {0}")]
    Database(#[from] rusqlite::Error),
    /// File system failure
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    /// Malformed JSON on import, or a value that could not be serialized
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
    /// Malformed config file
    #[error("Config error: {0}")]
    Config(#[from] toml::de::Error),
    #[error("Item not found: {0}")]
    ItemNotFound(String),
    #[error("Item already exists: {0}")]
    DuplicateItem(String),
    /// An item whose state breaks the scheduling invariants
    #[error("Invalid item: {0}")]
    InvalidItem(String),
    /// A value in `app_state` that cannot be parsed
    #[error("Corrupt app state: {0}")]
    CorruptState(String),
    /// A stored unix timestamp that chrono cannot represent
    #[error("Invalid timestamp: {0}")]
    InvalidTimestamp(i64),
}

pub type Result<T> = std::result::Result<T, Error>;

//! Error types for liftlog-core

use thiserror::Error;

/// Main error type for the liftlog-core library
#[derive(Error, Debug)]
pub enum Error {
    /// Database error
    #[error("database error: {0}")]
    Database(#[from] rusqlite::Error),

    /// IO error
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// JSON error
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// Configuration error
    #[error("configuration error: {0}")]
    Config(String),

    /// A record submission missing the fields its record type requires
    #[error("invalid record: {0}")]
    InvalidRecord(String),

    /// Personal record not found
    #[error("personal record not found: {0}")]
    RecordNotFound(i64),
}

/// Result type alias for liftlog-core
pub type Result<T> = std::result::Result<T, Error>;

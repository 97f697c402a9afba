//! Error types for the persistence layer.

/// Errors that can occur in store operations.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// SQLite database error
    #[error("database error: {0}")]
    Database(#[from] sqlx::Error),

    /// Caller supplied a value the schema cannot represent
    #[error("invalid record: {0}")]
    InvalidRecord(String),

    /// General internal error
    #[error("{0}")]
    Internal(String),
}

/// Convenience Result type.
pub type Result<T> = std::result::Result<T, Error>;

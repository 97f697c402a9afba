//! Error types for the assistant crate.

use thiserror::Error;

/// Errors produced while generating or persisting reply suggestions.
#[derive(Error, Debug)]
pub enum Error {
    /// Missing or invalid configuration (API key, model name).
    #[error("configuration error: {0}")]
    Config(String),

    /// The completion provider rejected or failed the request.
    #[error("completion API error: {0}")]
    Api(String),

    /// The model replied, but nothing survived validation.
    #[error("no usable reply suggestions were generated")]
    NoSuggestions,

    /// Persisting suggestions failed.
    #[error("storage error: {0}")]
    Storage(#[from] roost_store::Error),
}

/// Result alias for assistant operations.
pub type Result<T> = std::result::Result<T, Error>;

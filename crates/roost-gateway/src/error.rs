//! Error types for roost-gateway.

use thiserror::Error;

/// Gateway error type — a small closed set so callers can branch on
/// kind instead of parsing message text.
#[derive(Debug, Error)]
pub enum Error {
    /// Credentials missing or malformed
    #[error("configuration error: {0}")]
    Config(String),

    /// Bad input rejected before any network call
    #[error("{0}")]
    Validation(String),

    /// Provider or transport failure, with the endpoint it hit
    #[error("provider error on {endpoint}: {message}")]
    Provider {
        /// Endpoint class the failing call belongs to
        endpoint: String,
        /// Underlying provider/transport message
        message: String,
    },

    /// Persistence failure during quota write-through or caching
    #[error("storage error: {0}")]
    Storage(#[from] roost_store::Error),
}

impl Error {
    pub(crate) fn provider(endpoint: &str, message: impl Into<String>) -> Self {
        Self::Provider {
            endpoint: endpoint.to_string(),
            message: message.into(),
        }
    }
}

/// Result type alias
pub type Result<T> = std::result::Result<T, Error>;

use crate::error::{Error, Result};
use serde::Deserialize;
use std::fmt;

/// X API v2 credentials.
///
/// All five values are required; [`XConfig::from_env`] fails fast at
/// construction rather than on the first provider call.
#[derive(Clone, Deserialize)]
pub struct XConfig {
    /// Developer app key (consumer key).
    pub api_key: String,
    /// Developer app secret (consumer secret).
    pub api_secret: String,
    /// OAuth 2.0 user-context access token (write + identity calls).
    pub access_token: String,
    /// Access token secret.
    pub access_token_secret: String,
    /// App-only bearer token (read calls).
    pub bearer_token: String,
}

impl XConfig {
    /// Create a new config with the full credential set.
    pub fn new(
        api_key: impl Into<String>,
        api_secret: impl Into<String>,
        access_token: impl Into<String>,
        access_token_secret: impl Into<String>,
        bearer_token: impl Into<String>,
    ) -> Self {
        Self {
            api_key: api_key.into(),
            api_secret: api_secret.into(),
            access_token: access_token.into(),
            access_token_secret: access_token_secret.into(),
            bearer_token: bearer_token.into(),
        }
    }

    /// Create config from `X_*` environment variables.
    pub fn from_env() -> Result<Self> {
        Ok(Self {
            api_key: require_env("X_API_KEY")?,
            api_secret: require_env("X_API_SECRET")?,
            access_token: require_env("X_ACCESS_TOKEN")?,
            access_token_secret: require_env("X_ACCESS_TOKEN_SECRET")?,
            bearer_token: require_env("X_BEARER_TOKEN")?,
        })
    }
}

impl fmt::Debug for XConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("XConfig")
            .field("api_key", &mask_secret(&self.api_key))
            .field("api_secret", &mask_secret(&self.api_secret))
            .field("access_token", &mask_secret(&self.access_token))
            .field("access_token_secret", &mask_secret(&self.access_token_secret))
            .field("bearer_token", &mask_secret(&self.bearer_token))
            .finish()
    }
}

fn require_env(name: &str) -> Result<String> {
    std::env::var(name).map_err(|_| Error::Config(format!("{name} not set")))
}

/// Keep the first and last four characters for log correlation.
fn mask_secret(secret: &str) -> String {
    let chars: Vec<char> = secret.chars().collect();
    if chars.len() <= 8 {
        return "****".to_string();
    }
    let head: String = chars[..4].iter().collect();
    let tail: String = chars[chars.len() - 4..].iter().collect();
    format!("{head}...{tail}")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_mask_secret() {
        assert_eq!(mask_secret("short"), "****");
        let masked = mask_secret("AAAA1234567890ZZZZ");
        assert_eq!(masked, "AAAA...ZZZZ");
    }

    #[test]
    fn test_debug_masks_credentials() {
        let config = XConfig::new(
            "key-123456789012",
            "secret-1234567890",
            "token-1234567890",
            "tsecret-123456789",
            "bearer-1234567890",
        );
        let debug = format!("{config:?}");
        assert!(!debug.contains("123456789012"));
        assert!(debug.contains("key-"));
    }
}

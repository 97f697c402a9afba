//! X API v2 client — the seam between the gateway and the wire.
//!
//! [`XApi`] is the mockable trait the gateway talks to; [`XClient`] is
//! the reqwest implementation. Rate-limit metadata is lifted off the
//! `x-rate-limit-*` response headers into a typed [`RateLimitInfo`]
//! before the body is consumed.

use crate::config::XConfig;
use crate::error::{Error, Result};
use crate::types::{CreateTweetResponse, PostedTweet, Profile, RateLimitInfo, Tweet, TweetPage};
use reqwest::header::HeaderMap;
use serde::{Deserialize, Serialize};

const API_BASE: &str = "https://api.x.com/2";
// v1.1 still serves the aggregate rate-limit snapshot; v2 has no equivalent.
const STATUS_BASE: &str = "https://api.x.com/1.1";

const TWEET_FIELDS: &str = "created_at,public_metrics,author_id,in_reply_to_user_id";
const USER_FIELDS: &str = "username,name,profile_image_url";

/// Provider operations the gateway depends on.
#[cfg_attr(test, mockall::automock)]
#[async_trait::async_trait]
pub trait XApi: Send + Sync {
    /// Publish a tweet, optionally threaded under `in_reply_to`.
    async fn create_tweet<'a>(
        &self,
        text: &str,
        in_reply_to: Option<&'a str>,
    ) -> Result<CreateTweetResponse>;

    /// The authenticated user's profile.
    async fn me(&self) -> Result<Profile>;

    /// One page of a user's timeline, most recent first.
    async fn user_tweets(&self, user_id: &str, max_results: u32) -> Result<TweetPage>;

    /// Recent-search page for an arbitrary query.
    async fn search_recent(&self, query: &str, max_results: u32) -> Result<TweetPage>;

    /// Provider-side aggregate rate-limit snapshot. May fail on tiers or
    /// providers that do not serve it; callers treat failure as absence.
    async fn rate_limit_snapshot(&self) -> Result<serde_json::Value>;
}

/// reqwest-backed [`XApi`] implementation.
pub struct XClient {
    http: reqwest::Client,
    config: XConfig,
    api_base: String,
    status_base: String,
}

impl XClient {
    /// Create a client over the given credentials.
    #[must_use]
    pub fn new(config: XConfig) -> Self {
        Self {
            http: reqwest::Client::new(),
            config,
            api_base: API_BASE.to_string(),
            status_base: STATUS_BASE.to_string(),
        }
    }

    /// Create a client from `X_*` environment variables.
    pub fn from_env() -> Result<Self> {
        Ok(Self::new(XConfig::from_env()?))
    }

    /// Override the API base URL (proxies, test servers).
    #[must_use]
    pub fn with_api_base(mut self, base: impl Into<String>) -> Self {
        self.api_base = base.into();
        self
    }
}

// ── Wire types ──────────────────────────────────────────────────

#[derive(Debug, Serialize)]
struct CreateTweetBody<'a> {
    text: &'a str,
    #[serde(skip_serializing_if = "Option::is_none")]
    reply: Option<ReplyRef<'a>>,
}

#[derive(Debug, Serialize)]
struct ReplyRef<'a> {
    in_reply_to_tweet_id: &'a str,
}

#[derive(Debug, Deserialize)]
struct DataEnvelope<T> {
    data: T,
}

#[derive(Debug, Deserialize)]
struct TweetListEnvelope {
    #[serde(default)]
    data: Vec<Tweet>,
}

#[derive(Debug, Deserialize)]
struct ProviderErrorBody {
    #[serde(default)]
    detail: Option<String>,
    #[serde(default)]
    title: Option<String>,
}

// ── Header helpers ──────────────────────────────────────────────

fn header_i64(headers: &HeaderMap, name: &str) -> Option<i64> {
    headers
        .get(name)
        .and_then(|v| v.to_str().ok())
        .and_then(|s| s.parse().ok())
}

/// Lift `x-rate-limit-*` headers into a typed window, if all present.
fn rate_limit_from_headers(headers: &HeaderMap) -> Option<RateLimitInfo> {
    Some(RateLimitInfo {
        remaining: header_i64(headers, "x-rate-limit-remaining")?,
        reset: header_i64(headers, "x-rate-limit-reset")?,
        limit: header_i64(headers, "x-rate-limit-limit")?,
    })
}

/// Surface the provider's own error message where it gives one.
async fn provider_error(endpoint: &str, resp: reqwest::Response) -> Error {
    let status = resp.status();
    let message = match resp.json::<ProviderErrorBody>().await {
        Ok(body) => body
            .detail
            .or(body.title)
            .unwrap_or_else(|| status.to_string()),
        Err(_) => status.to_string(),
    };
    Error::provider(endpoint, message)
}

impl XClient {
    async fn get_page(
        &self,
        endpoint: &str,
        url: String,
        query: &[(&str, String)],
    ) -> Result<TweetPage> {
        let resp = self
            .http
            .get(url)
            .bearer_auth(&self.config.bearer_token)
            .query(query)
            .send()
            .await
            .map_err(|e| Error::provider(endpoint, e.to_string()))?;

        if !resp.status().is_success() {
            return Err(provider_error(endpoint, resp).await);
        }

        let rate_limit = rate_limit_from_headers(resp.headers());
        let body: TweetListEnvelope = resp
            .json()
            .await
            .map_err(|e| Error::provider(endpoint, e.to_string()))?;

        Ok(TweetPage {
            tweets: body.data,
            rate_limit,
        })
    }
}

#[async_trait::async_trait]
impl XApi for XClient {
    async fn create_tweet<'a>(
        &self,
        text: &str,
        in_reply_to: Option<&'a str>,
    ) -> Result<CreateTweetResponse> {
        const ENDPOINT: &str = "tweets/create";

        let body = CreateTweetBody {
            text,
            reply: in_reply_to.map(|id| ReplyRef {
                in_reply_to_tweet_id: id,
            }),
        };

        let resp = self
            .http
            .post(format!("{}/tweets", self.api_base))
            .bearer_auth(&self.config.access_token)
            .json(&body)
            .send()
            .await
            .map_err(|e| Error::provider(ENDPOINT, e.to_string()))?;

        if !resp.status().is_success() {
            return Err(provider_error(ENDPOINT, resp).await);
        }

        let rate_limit = rate_limit_from_headers(resp.headers());
        let envelope: DataEnvelope<PostedTweet> = resp
            .json()
            .await
            .map_err(|e| Error::provider(ENDPOINT, e.to_string()))?;

        Ok(CreateTweetResponse {
            tweet: envelope.data,
            rate_limit,
        })
    }

    async fn me(&self) -> Result<Profile> {
        const ENDPOINT: &str = "users/me";

        let resp = self
            .http
            .get(format!("{}/users/me", self.api_base))
            .bearer_auth(&self.config.access_token)
            .query(&[("user.fields", USER_FIELDS)])
            .send()
            .await
            .map_err(|e| Error::provider(ENDPOINT, e.to_string()))?;

        if !resp.status().is_success() {
            return Err(provider_error(ENDPOINT, resp).await);
        }

        let envelope: DataEnvelope<Profile> = resp
            .json()
            .await
            .map_err(|e| Error::provider(ENDPOINT, e.to_string()))?;
        Ok(envelope.data)
    }

    async fn user_tweets(&self, user_id: &str, max_results: u32) -> Result<TweetPage> {
        self.get_page(
            "users/:id/tweets",
            format!("{}/users/{}/tweets", self.api_base, user_id),
            &[
                ("max_results", max_results.to_string()),
                ("tweet.fields", TWEET_FIELDS.to_string()),
            ],
        )
        .await
    }

    async fn search_recent(&self, query: &str, max_results: u32) -> Result<TweetPage> {
        self.get_page(
            "tweets/search/recent",
            format!("{}/tweets/search/recent", self.api_base),
            &[
                ("query", query.to_string()),
                ("max_results", max_results.to_string()),
                ("tweet.fields", TWEET_FIELDS.to_string()),
            ],
        )
        .await
    }

    async fn rate_limit_snapshot(&self) -> Result<serde_json::Value> {
        const ENDPOINT: &str = "application/rate_limit_status";

        let resp = self
            .http
            .get(format!(
                "{}/application/rate_limit_status.json",
                self.status_base
            ))
            .bearer_auth(&self.config.bearer_token)
            .query(&[("resources", "tweets,users")])
            .send()
            .await
            .map_err(|e| Error::provider(ENDPOINT, e.to_string()))?;

        if !resp.status().is_success() {
            return Err(provider_error(ENDPOINT, resp).await);
        }

        resp.json()
            .await
            .map_err(|e| Error::provider(ENDPOINT, e.to_string()))
    }
}

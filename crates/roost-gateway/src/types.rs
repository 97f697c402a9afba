//! Response and domain types for the X API v2 surface.

use chrono::{DateTime, TimeZone, Utc};
use roost_store::QuotaRecord;
use serde::{Deserialize, Serialize};

/// Rate-limit metadata the provider reports on a response.
///
/// Absence of this struct on a response is a normal condition (mocked or
/// degraded responses) and simply skips the quota write-through.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct RateLimitInfo {
    /// Calls left in the current window
    pub remaining: i64,
    /// Window expiry as unix epoch seconds
    pub reset: i64,
    /// Maximum calls per window
    pub limit: i64,
}

impl RateLimitInfo {
    /// Window expiry as a UTC timestamp.
    #[must_use]
    pub fn reset_at(&self) -> DateTime<Utc> {
        Utc.timestamp_opt(self.reset, 0)
            .single()
            .unwrap_or_else(Utc::now)
    }
}

/// A tweet as returned by timeline and search reads.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Tweet {
    /// Provider tweet id
    pub id: String,
    /// Tweet text
    pub text: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub created_at: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub author_id: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub public_metrics: Option<TweetMetrics>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub in_reply_to_user_id: Option<String>,
}

/// Engagement counts attached to a tweet.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct TweetMetrics {
    #[serde(default)]
    pub like_count: u64,
    #[serde(default)]
    pub retweet_count: u64,
    #[serde(default)]
    pub reply_count: u64,
    #[serde(default)]
    pub quote_count: u64,
}

/// The authenticated user's profile.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Profile {
    /// Provider user id
    pub id: String,
    /// Handle (without the `@`)
    pub username: String,
    /// Display name
    pub name: String,
    /// Avatar URL, when set
    #[serde(skip_serializing_if = "Option::is_none")]
    pub profile_image_url: Option<String>,
}

/// A tweet just published through the gateway.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PostedTweet {
    /// Provider tweet id
    pub id: String,
    /// Text as stored by the provider
    pub text: String,
}

/// Publish-call result with optional quota metadata.
#[derive(Debug, Clone)]
pub struct CreateTweetResponse {
    pub tweet: PostedTweet,
    pub rate_limit: Option<RateLimitInfo>,
}

/// One page of tweets with optional quota metadata.
#[derive(Debug, Clone)]
pub struct TweetPage {
    pub tweets: Vec<Tweet>,
    pub rate_limit: Option<RateLimitInfo>,
}

/// Outcome of a feed request that may be gated behind a paid API tier.
#[derive(Debug, Clone)]
pub enum Feed {
    /// The provider was called and returned tweets (provider order kept).
    Tweets(Vec<Tweet>),
    /// The deploy-time gate short-circuited the call.
    UpgradeRequired(UpgradeNotice),
}

/// Structured "requires upgrade" signal for gated endpoints.
#[derive(Debug, Clone, Serialize)]
pub struct UpgradeNotice {
    /// User-facing explanation
    pub message: String,
    /// The page size that was requested
    pub limit: u32,
}

/// Merged rate-limit view: persisted windows plus a best-effort live
/// snapshot (`None` when the provider call fails or is unsupported).
#[derive(Debug, Clone, Serialize)]
pub struct RateLimitStatus {
    pub stored: Vec<QuotaRecord>,
    pub live: Option<serde_json::Value>,
}

//! Persisted entity types.
//!
//! Timestamps serialize as RFC 3339 strings so quota rows keep the wire
//! shape the dashboard polls for display.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// One provider endpoint's current rate-limit window.
///
/// There is exactly one row per endpoint; writes overwrite counts in
/// place (last-write-wins), they never accumulate.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct QuotaRecord {
    /// Endpoint class identifier (e.g. `"tweets/create"`)
    pub endpoint: String,
    /// Calls left in the current window
    pub remaining: i64,
    /// When the current window expires
    pub reset_at: DateTime<Utc>,
    /// Maximum calls per window
    pub limit_total: i64,
    /// When this row was last written
    pub updated_at: DateTime<Utc>,
}

/// An AI-generated reply draft awaiting review.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Suggestion {
    /// Row id
    pub id: i64,
    /// Tweet the reply was drafted for
    pub original_tweet_id: String,
    /// Text of that tweet at generation time
    pub original_content: String,
    /// The drafted reply
    pub suggested_reply: String,
    /// Review state
    pub status: SuggestionStatus,
    /// Set once the suggestion is published
    #[serde(skip_serializing_if = "Option::is_none")]
    pub posted_at: Option<DateTime<Utc>>,
    /// When the suggestion was generated
    pub created_at: DateTime<Utc>,
}

/// Review state of a [`Suggestion`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SuggestionStatus {
    /// Awaiting review
    Pending,
    /// Published as a reply
    Posted,
}

impl SuggestionStatus {
    /// Stable string form used as the column value.
    #[must_use]
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Pending => "pending",
            Self::Posted => "posted",
        }
    }

    /// Parse a column value, defaulting unknown strings to `Pending`.
    #[must_use]
    pub fn from_str_lossy(s: &str) -> Self {
        match s {
            "posted" => Self::Posted,
            _ => Self::Pending,
        }
    }
}

impl std::fmt::Display for SuggestionStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A post queued for a future publish.
///
/// The background publisher is out of scope for this core, so rows stay
/// `pending`; `Posted`/`Failed` are representable for the process that
/// will eventually drain the queue.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ScheduledPost {
    /// Row id
    pub id: i64,
    /// Post text (at most 280 characters)
    pub content: String,
    /// When the post should go out
    pub scheduled_for: DateTime<Utc>,
    /// Publish state
    pub status: PostStatus,
    /// Provider id, set once published
    #[serde(skip_serializing_if = "Option::is_none")]
    pub tweet_id: Option<String>,
    /// When the post actually went out
    #[serde(skip_serializing_if = "Option::is_none")]
    pub posted_at: Option<DateTime<Utc>>,
    /// When the row was created
    pub created_at: DateTime<Utc>,
}

/// Publish state of a [`ScheduledPost`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PostStatus {
    /// Queued, not yet attempted
    Pending,
    /// Published successfully
    Posted,
    /// Publish attempt failed
    Failed,
}

impl PostStatus {
    /// Stable string form used as the column value.
    #[must_use]
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Pending => "pending",
            Self::Posted => "posted",
            Self::Failed => "failed",
        }
    }

    /// Parse a column value, defaulting unknown strings to `Pending`.
    #[must_use]
    pub fn from_str_lossy(s: &str) -> Self {
        match s {
            "posted" => Self::Posted,
            "failed" => Self::Failed,
            _ => Self::Pending,
        }
    }
}

impl std::fmt::Display for PostStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Cache row for a tweet published through Roost, for dashboard display.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CachedTweet {
    /// Provider tweet id
    pub tweet_id: String,
    /// Tweet text
    pub content: String,
    /// Like count at last refresh
    pub likes: i64,
    /// Retweet count at last refresh
    pub retweets: i64,
    /// Reply count at last refresh
    pub replies: i64,
    /// When the tweet was published
    pub posted_at: DateTime<Utc>,
}

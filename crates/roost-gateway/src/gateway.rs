//! The rate-limit-aware gateway.
//!
//! Wraps an [`XApi`] client and keeps local quota bookkeeping in sync
//! with provider-reported headroom: every operation that reports a
//! quota window writes it through to the store after the call.

use crate::client::XApi;
use crate::error::{Error, Result};
use crate::gate::UpgradeGate;
use crate::types::{Feed, PostedTweet, Profile, RateLimitInfo, RateLimitStatus, UpgradeNotice};
use roost_store::Store;
use std::sync::Arc;
use tracing::{debug, instrument, warn};

/// Hard content ceiling shared by publish and reply paths.
pub const MAX_CONTENT_CHARS: usize = 280;

/// Provider maximum page size for timeline and search reads.
pub const MAX_PAGE_SIZE: u32 = 100;

/// Endpoint class for publish calls (tweets and replies).
pub const EP_CREATE: &str = "tweets/create";
/// Endpoint class for timeline reads.
pub const EP_TIMELINE: &str = "users/:id/tweets";
/// Endpoint class for mention searches.
pub const EP_SEARCH: &str = "tweets/search/recent";

/// Rate-limit-aware wrapper over the social provider.
pub struct Gateway {
    api: Arc<dyn XApi>,
    store: Store,
    gate: UpgradeGate,
}

impl Gateway {
    /// Compose a gateway from its collaborators.
    pub fn new(api: Arc<dyn XApi>, store: Store, gate: UpgradeGate) -> Self {
        Self { api, store, gate }
    }

    /// Publish a tweet. Content is validated before any network call;
    /// on success the `tweets/create` quota window is written through
    /// and the tweet lands in the posted-tweets cache.
    #[instrument(skip(self, content), fields(chars = content.chars().count()))]
    pub async fn post_tweet(&self, content: &str) -> Result<PostedTweet> {
        validate_content(content, "tweet")?;

        let response = self.api.create_tweet(content, None).await?;
        self.record_quota(EP_CREATE, response.rate_limit).await?;
        self.store
            .cache_posted_tweet(&response.tweet.id, &response.tweet.text)
            .await?;

        debug!(id = %response.tweet.id, "tweet posted");
        Ok(response.tweet)
    }

    /// Reply to an existing tweet. Same validation as [`Self::post_tweet`];
    /// replies are not cached (only top-level posts feed the dashboard).
    #[instrument(skip(self, content))]
    pub async fn reply_to(&self, tweet_id: &str, content: &str) -> Result<PostedTweet> {
        if tweet_id.trim().is_empty() {
            return Err(Error::Validation("tweet id is required".to_string()));
        }
        validate_content(content, "reply")?;

        let response = self.api.create_tweet(content, Some(tweet_id)).await?;
        self.record_quota(EP_CREATE, response.rate_limit).await?;

        debug!(id = %response.tweet.id, "reply posted");
        Ok(response.tweet)
    }

    /// The authenticated user's recent tweets, provider order preserved.
    #[instrument(skip(self))]
    pub async fn my_tweets(&self, limit: u32) -> Result<Feed> {
        if self.gate.timeline {
            return Ok(Feed::UpgradeRequired(UpgradeNotice {
                message: "Timeline reads require an upgraded X API tier".to_string(),
                limit,
            }));
        }

        let limit = limit.clamp(1, MAX_PAGE_SIZE);
        let profile = self.api.me().await?;
        let page = self.api.user_tweets(&profile.id, limit).await?;
        self.record_quota(EP_TIMELINE, page.rate_limit).await?;
        Ok(Feed::Tweets(page.tweets))
    }

    /// Recent tweets mentioning the authenticated user.
    #[instrument(skip(self))]
    pub async fn mentions(&self, limit: u32) -> Result<Feed> {
        if self.gate.mentions {
            return Ok(Feed::UpgradeRequired(UpgradeNotice {
                message: "Mention search requires an upgraded X API tier".to_string(),
                limit,
            }));
        }

        let limit = limit.clamp(1, MAX_PAGE_SIZE);
        let profile = self.api.me().await?;
        let query = format!("@{}", profile.username);
        let page = self.api.search_recent(&query, limit).await?;
        self.record_quota(EP_SEARCH, page.rate_limit).await?;
        Ok(Feed::Tweets(page.tweets))
    }

    /// The authenticated user's profile. Read-only; no quota persisted.
    pub async fn identity(&self) -> Result<Profile> {
        self.api.me().await
    }

    /// Persisted quota windows merged with a best-effort live snapshot.
    /// Snapshot failure is masked as `live: None`, never an error.
    pub async fn rate_limit_status(&self) -> Result<RateLimitStatus> {
        let stored = self.store.list_quota().await?;
        let live = match self.api.rate_limit_snapshot().await {
            Ok(snapshot) => Some(snapshot),
            Err(e) => {
                warn!(error = %e, "live rate limit snapshot unavailable");
                None
            }
        };
        Ok(RateLimitStatus { stored, live })
    }

    /// Write through a provider-reported window. Absent or unusable
    /// metadata skips the write; it is not an error condition.
    async fn record_quota(&self, endpoint: &str, info: Option<RateLimitInfo>) -> Result<()> {
        let Some(info) = info else {
            debug!(endpoint, "response carried no rate limit metadata");
            return Ok(());
        };
        if info.limit < 1 {
            warn!(endpoint, limit = info.limit, "ignoring malformed rate limit metadata");
            return Ok(());
        }
        self.store
            .upsert_quota(endpoint, info.remaining, info.reset_at(), info.limit)
            .await?;
        Ok(())
    }
}

fn validate_content(content: &str, what: &str) -> Result<()> {
    if content.trim().is_empty() {
        return Err(Error::Validation(format!("{what} content is required")));
    }
    if content.chars().count() > MAX_CONTENT_CHARS {
        return Err(Error::Validation(format!(
            "{what} content exceeds {MAX_CONTENT_CHARS} characters"
        )));
    }
    Ok(())
}

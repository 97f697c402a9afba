//! Integration tests for Roost
//!
//! These tests verify the integration between the crates:
//! - roost-store: persistent quota, suggestion, and schedule state
//! - roost-gateway: write-through quota bookkeeping and upgrade gating
//! - roost-assistant: reply generation against the shared store

use std::sync::Arc;

use roost_assistant::{Completion, ReplyAssistant, SourceTweet};
use roost_gateway::{
    CreateTweetResponse, Error, Feed, Gateway, PostedTweet, Profile, RateLimitInfo, Result, Tweet,
    TweetPage, UpgradeGate, XApi,
};
use roost_store::{Store, SuggestionStatus};

// ============================================================================
// Seams
// ============================================================================

/// Canned provider: every call succeeds and reports the same quota window.
struct CannedApi {
    rate_limit: Option<RateLimitInfo>,
}

#[async_trait::async_trait]
impl XApi for CannedApi {
    async fn create_tweet<'a>(
        &self,
        text: &str,
        _in_reply_to: Option<&'a str>,
    ) -> Result<CreateTweetResponse> {
        Ok(CreateTweetResponse {
            tweet: PostedTweet {
                id: "900".to_string(),
                text: text.to_string(),
            },
            rate_limit: self.rate_limit,
        })
    }

    async fn me(&self) -> Result<Profile> {
        Ok(Profile {
            id: "7".to_string(),
            username: "sam".to_string(),
            name: "Sam".to_string(),
            profile_image_url: None,
        })
    }

    async fn user_tweets(&self, _user_id: &str, _max_results: u32) -> Result<TweetPage> {
        Ok(TweetPage {
            tweets: vec![Tweet {
                id: "1".to_string(),
                text: "first".to_string(),
                created_at: None,
                author_id: None,
                public_metrics: None,
                in_reply_to_user_id: None,
            }],
            rate_limit: self.rate_limit,
        })
    }

    async fn search_recent(&self, _query: &str, _max_results: u32) -> Result<TweetPage> {
        Ok(TweetPage {
            tweets: vec![],
            rate_limit: self.rate_limit,
        })
    }

    async fn rate_limit_snapshot(&self) -> Result<serde_json::Value> {
        Err(Error::Provider {
            endpoint: "application/rate_limit_status".to_string(),
            message: "not entitled".to_string(),
        })
    }
}

/// Completion seam returning a fixed numbered list.
struct CannedCompletion(&'static str);

#[async_trait::async_trait]
impl Completion for CannedCompletion {
    async fn complete(
        &self,
        _system: &str,
        _user: &str,
        _max_tokens: u32,
        _temperature: f32,
    ) -> roost_assistant::Result<String> {
        Ok(self.0.to_string())
    }
}

fn window(remaining: i64, limit: i64) -> Option<RateLimitInfo> {
    Some(RateLimitInfo {
        remaining,
        reset: 1_767_225_600,
        limit,
    })
}

// ============================================================================
// Gateway + Store Integration Tests
// ============================================================================

#[tokio::test]
async fn test_post_and_feeds_share_one_quota_table() {
    let store = Store::in_memory().await.unwrap();
    let gateway = Gateway::new(
        Arc::new(CannedApi {
            rate_limit: window(40, 50),
        }),
        store.clone(),
        UpgradeGate::open(),
    );

    gateway.post_tweet("hello").await.unwrap();
    let Feed::Tweets(tweets) = gateway.my_tweets(10).await.unwrap() else {
        panic!("expected tweets");
    };
    assert_eq!(tweets.len(), 1);

    let quota = store.list_quota().await.unwrap();
    let endpoints: Vec<&str> = quota.iter().map(|q| q.endpoint.as_str()).collect();
    assert!(endpoints.contains(&"tweets/create"));
    assert!(endpoints.contains(&"users/:id/tweets"));
    assert!(quota.iter().all(|q| q.remaining == 40 && q.limit_total == 50));
}

#[tokio::test]
async fn test_repeated_calls_overwrite_not_accumulate() {
    let store = Store::in_memory().await.unwrap();
    let gateway = Gateway::new(
        Arc::new(CannedApi {
            rate_limit: window(10, 50),
        }),
        store.clone(),
        UpgradeGate::open(),
    );

    gateway.post_tweet("one").await.unwrap();
    gateway.post_tweet("two").await.unwrap();

    let quota = store.list_quota().await.unwrap();
    assert_eq!(quota.len(), 1);
    assert_eq!(quota[0].remaining, 10);
}

#[tokio::test]
async fn test_status_masks_unentitled_live_snapshot() {
    let store = Store::in_memory().await.unwrap();
    let gateway = Gateway::new(
        Arc::new(CannedApi {
            rate_limit: window(40, 50),
        }),
        store.clone(),
        UpgradeGate::open(),
    );

    gateway.post_tweet("hello").await.unwrap();
    let status = gateway.rate_limit_status().await.unwrap();
    assert_eq!(status.stored.len(), 1);
    assert!(status.live.is_none());
}

#[tokio::test]
async fn test_gated_feed_never_reaches_store() {
    let store = Store::in_memory().await.unwrap();
    let gateway = Gateway::new(
        Arc::new(CannedApi {
            rate_limit: window(40, 50),
        }),
        store.clone(),
        UpgradeGate {
            timeline: true,
            mentions: true,
        },
    );

    assert!(matches!(
        gateway.my_tweets(10).await.unwrap(),
        Feed::UpgradeRequired(_)
    ));
    assert!(matches!(
        gateway.mentions(20).await.unwrap(),
        Feed::UpgradeRequired(_)
    ));
    assert!(store.list_quota().await.unwrap().is_empty());
}

// ============================================================================
// Assistant + Store Integration Tests
// ============================================================================

#[tokio::test]
async fn test_generated_replies_become_pending_suggestions() {
    let store = Store::in_memory().await.unwrap();
    let assistant = ReplyAssistant::new(
        Arc::new(CannedCompletion("1. Congrats!\n2. Keep going.")),
        store.clone(),
    );

    let tweet = SourceTweet {
        id: "1001".to_string(),
        text: "Shipped it".to_string(),
        author: None,
    };
    let replies = assistant
        .generate_suggestions(&tweet, None, 2)
        .await
        .unwrap();
    assert_eq!(replies, vec!["Congrats!", "Keep going."]);

    let stored = store
        .list_suggestions(SuggestionStatus::Pending)
        .await
        .unwrap();
    assert_eq!(stored.len(), 2);

    // posting one moves it out of the pending list
    assert!(store.mark_suggestion_posted(stored[0].id).await.unwrap());
    let pending = store
        .list_suggestions(SuggestionStatus::Pending)
        .await
        .unwrap();
    assert_eq!(pending.len(), 1);
    let posted = store
        .list_suggestions(SuggestionStatus::Posted)
        .await
        .unwrap();
    assert_eq!(posted.len(), 1);
}

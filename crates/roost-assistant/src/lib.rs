//! Roost Assistant — AI reply suggestion generation.
//!
//! Given a tweet, the assistant asks a chat-completion model for a few
//! candidate replies in the account's voice, validates them against the
//! 280-character ceiling, persists the survivors as pending suggestions,
//! and returns them. The completion provider is a trait seam so tests
//! never touch the network.

#![forbid(unsafe_code)]

pub mod completion;
pub mod error;

pub use completion::{AssistantConfig, Completion, OpenAiCompletion, DEFAULT_MODEL};
pub use error::{Error, Result};

use lazy_static::lazy_static;
use regex::Regex;
use roost_store::Store;
use serde::Deserialize;
use std::sync::Arc;
use tracing::{debug, instrument, warn};

/// Character ceiling a suggested reply must fit within.
pub const MAX_REPLY_CHARS: usize = 280;

/// Sampling temperature for reply generation.
pub const TEMPERATURE: f32 = 0.7;

/// Completion-token budget per generation request.
pub const MAX_COMPLETION_TOKENS: u32 = 500;

/// Voice and format instructions sent as the system prompt.
const SYSTEM_PERSONA: &str = "You write short reply tweets for a personal account. \
The voice is warm, encouraging, and direct. Keep every reply under 280 characters, \
use at most two hashtags, and skip em-dashes. Reply with a numbered list only, one \
suggestion per line, and nothing else.";

lazy_static! {
    static ref LIST_PREFIX: Regex = Regex::new(r"^\d+[.)]\s*").unwrap();
}

/// The tweet a reply is being drafted for.
#[derive(Debug, Clone, Deserialize)]
pub struct SourceTweet {
    /// Provider tweet id.
    pub id: String,
    /// Full tweet text.
    pub text: String,
    /// Display handle of the tweet's author, if known.
    pub author: Option<String>,
}

/// Generates, validates, and persists reply suggestions.
pub struct ReplyAssistant {
    completion: Arc<dyn Completion>,
    store: Store,
}

impl ReplyAssistant {
    /// Compose an assistant from a completion provider and the store.
    pub fn new(completion: Arc<dyn Completion>, store: Store) -> Self {
        Self { completion, store }
    }

    /// Generate up to `count` reply suggestions for `tweet`.
    ///
    /// Survivors are stored with status `pending` and returned in model
    /// order. Fails with [`Error::NoSuggestions`] when nothing usable
    /// comes back; in that case nothing is persisted.
    #[instrument(skip(self, tweet, context), fields(tweet_id = %tweet.id))]
    pub async fn generate_suggestions(
        &self,
        tweet: &SourceTweet,
        context: Option<&str>,
        count: usize,
    ) -> Result<Vec<String>> {
        let count = count.max(1);
        let prompt = build_user_prompt(tweet, context, count);

        let raw = self
            .completion
            .complete(SYSTEM_PERSONA, &prompt, MAX_COMPLETION_TOKENS, TEMPERATURE)
            .await?;

        let suggestions = parse_suggestions(&raw, count);
        if suggestions.is_empty() {
            warn!("model output contained no usable suggestions");
            return Err(Error::NoSuggestions);
        }

        self.store
            .insert_suggestions(&tweet.id, &tweet.text, &suggestions)
            .await?;

        debug!(count = suggestions.len(), "reply suggestions stored");
        Ok(suggestions)
    }
}

fn build_user_prompt(tweet: &SourceTweet, context: Option<&str>, count: usize) -> String {
    let author = tweet.author.as_deref().unwrap_or("user");
    let mut prompt = format!(
        "Draft {count} reply suggestions to this tweet by @{author}:\n\n\"{}\"",
        tweet.text
    );
    if let Some(context) = context {
        prompt.push_str(&format!("\n\nAdditional context: {context}"));
    }
    prompt
}

/// Pulls candidate replies out of the model's numbered list.
///
/// Lines are stripped of their `1.` / `2)` prefixes, trimmed, and
/// dropped when empty or over the character ceiling. At most `count`
/// survivors are kept, in output order.
fn parse_suggestions(raw: &str, count: usize) -> Vec<String> {
    raw.lines()
        .map(|line| LIST_PREFIX.replace(line.trim(), "").trim().to_string())
        .filter(|line| !line.is_empty() && line.chars().count() <= MAX_REPLY_CHARS)
        .take(count)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::completion::MockCompletion;
    use roost_store::SuggestionStatus;

    fn source_tweet() -> SourceTweet {
        SourceTweet {
            id: "1001".to_string(),
            text: "Just shipped my first Rust service!".to_string(),
            author: Some("devsam".to_string()),
        }
    }

    async fn assistant(completion: MockCompletion) -> (ReplyAssistant, Store) {
        let store = Store::in_memory().await.unwrap();
        (
            ReplyAssistant::new(Arc::new(completion), store.clone()),
            store,
        )
    }

    #[test]
    fn test_parse_strips_numbering_and_blank_lines() {
        let raw = "1) Great point!\n2) Love this.\n3) ";
        let parsed = parse_suggestions(raw, 2);
        assert_eq!(parsed, vec!["Great point!", "Love this."]);
    }

    #[test]
    fn test_parse_accepts_dot_numbering() {
        let raw = "1. First reply\n2. Second reply";
        let parsed = parse_suggestions(raw, 5);
        assert_eq!(parsed, vec!["First reply", "Second reply"]);
    }

    #[test]
    fn test_parse_drops_overlong_lines() {
        let long = "x".repeat(281);
        let raw = format!("1. Short and sweet\n2. {long}\n3. Also fine");
        let parsed = parse_suggestions(&raw, 3);
        assert_eq!(parsed, vec!["Short and sweet", "Also fine"]);
    }

    #[test]
    fn test_parse_caps_at_requested_count() {
        let raw = "1. a\n2. b\n3. c\n4. d";
        assert_eq!(parse_suggestions(raw, 2).len(), 2);
    }

    #[test]
    fn test_prompt_embeds_author_text_and_context() {
        let prompt = build_user_prompt(&source_tweet(), Some("they follow me"), 3);
        assert!(prompt.contains("Draft 3 reply suggestions"));
        assert!(prompt.contains("@devsam"));
        assert!(prompt.contains("Just shipped my first Rust service!"));
        assert!(prompt.contains("they follow me"));
    }

    #[test]
    fn test_prompt_defaults_unknown_author() {
        let tweet = SourceTweet {
            author: None,
            ..source_tweet()
        };
        assert!(build_user_prompt(&tweet, None, 2).contains("@user"));
    }

    #[tokio::test]
    async fn test_generate_persists_pending_suggestions() {
        let mut completion = MockCompletion::new();
        completion
            .expect_complete()
            .withf(|system, user, max_tokens, temperature| {
                system.contains("280 characters")
                    && user.contains("Draft 2 reply suggestions")
                    && *max_tokens == MAX_COMPLETION_TOKENS
                    && (*temperature - TEMPERATURE).abs() < f32::EPSILON
            })
            .times(1)
            .returning(|_, _, _, _| Ok("1) Congrats on shipping!\n2) Rust treats you well.".to_string()));

        let (assistant, store) = assistant(completion).await;
        let suggestions = assistant
            .generate_suggestions(&source_tweet(), None, 2)
            .await
            .unwrap();
        assert_eq!(suggestions.len(), 2);

        let stored = store
            .list_suggestions(SuggestionStatus::Pending)
            .await
            .unwrap();
        assert_eq!(stored.len(), 2);
        assert!(stored.iter().all(|s| s.original_tweet_id == "1001"));
        assert!(stored.iter().all(|s| s.status == SuggestionStatus::Pending));
    }

    #[tokio::test]
    async fn test_unusable_output_yields_no_suggestions_error() {
        let long = "x".repeat(300);
        let mut completion = MockCompletion::new();
        completion
            .expect_complete()
            .times(1)
            .returning(move |_, _, _, _| Ok(format!("1. {long}\n2.   ")));

        let (assistant, store) = assistant(completion).await;
        let err = assistant
            .generate_suggestions(&source_tweet(), None, 3)
            .await
            .unwrap_err();
        assert!(matches!(err, Error::NoSuggestions));

        // nothing persisted on failure
        let stored = store
            .list_suggestions(SuggestionStatus::Pending)
            .await
            .unwrap();
        assert!(stored.is_empty());
    }

    #[tokio::test]
    async fn test_zero_count_treated_as_one() {
        let mut completion = MockCompletion::new();
        completion
            .expect_complete()
            .withf(|_, user, _, _| user.contains("Draft 1 reply suggestions"))
            .times(1)
            .returning(|_, _, _, _| Ok("1. Only one.".to_string()));

        let (assistant, _store) = assistant(completion).await;
        let suggestions = assistant
            .generate_suggestions(&source_tweet(), None, 0)
            .await
            .unwrap();
        assert_eq!(suggestions, vec!["Only one."]);
    }

    #[tokio::test]
    async fn test_api_error_propagates() {
        let mut completion = MockCompletion::new();
        completion
            .expect_complete()
            .times(1)
            .returning(|_, _, _, _| Err(Error::Api("rate limited".to_string())));

        let (assistant, _store) = assistant(completion).await;
        let err = assistant
            .generate_suggestions(&source_tweet(), None, 2)
            .await
            .unwrap_err();
        assert!(matches!(err, Error::Api(_)));
    }
}

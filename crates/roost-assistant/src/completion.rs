//! Chat-completion provider seam.
//!
//! [`Completion`] is the narrow surface the assistant needs from an LLM:
//! one system prompt, one user prompt, one text answer. The production
//! implementation sits on async-openai; tests mock the trait.

use crate::error::{Error, Result};
use async_openai::{
    config::OpenAIConfig,
    types::chat::{
        ChatCompletionRequestMessage, ChatCompletionRequestSystemMessage,
        ChatCompletionRequestSystemMessageContent, ChatCompletionRequestUserMessage,
        ChatCompletionRequestUserMessageContent, CreateChatCompletionRequest,
    },
    Client,
};
use std::fmt;
use tracing::debug;

/// Default model for reply generation.
pub const DEFAULT_MODEL: &str = "gpt-4o-mini";

/// Configuration for the OpenAI-backed completion provider.
#[derive(Clone)]
pub struct AssistantConfig {
    /// API key for authentication.
    pub api_key: String,
    /// Model used for reply generation.
    pub model: String,
}

impl fmt::Debug for AssistantConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("AssistantConfig")
            .field("api_key", &mask_api_key(&self.api_key))
            .field("model", &self.model)
            .finish()
    }
}

impl AssistantConfig {
    /// Creates a configuration with the given API key and the default model.
    #[must_use]
    pub fn new(api_key: impl Into<String>) -> Self {
        Self {
            api_key: api_key.into(),
            model: DEFAULT_MODEL.to_string(),
        }
    }

    /// Reads `OPENAI_API_KEY` (required) and `ASSISTANT_MODEL` (optional).
    ///
    /// # Errors
    /// Returns [`Error::Config`] if `OPENAI_API_KEY` is not set.
    pub fn from_env() -> Result<Self> {
        let api_key = std::env::var("OPENAI_API_KEY")
            .map_err(|_| Error::Config("OPENAI_API_KEY not set".to_string()))?;
        let model =
            std::env::var("ASSISTANT_MODEL").unwrap_or_else(|_| DEFAULT_MODEL.to_string());
        Ok(Self {
            api_key,
            model,
        })
    }
}

/// Keep the first and last four characters for log correlation.
fn mask_api_key(key: &str) -> String {
    let chars: Vec<char> = key.chars().collect();
    if chars.len() <= 8 {
        return "****".to_string();
    }
    let head: String = chars[..4].iter().collect();
    let tail: String = chars[chars.len() - 4..].iter().collect();
    format!("{head}...{tail}")
}

/// Minimal chat-completion surface used by the assistant.
#[cfg_attr(test, mockall::automock)]
#[async_trait::async_trait]
pub trait Completion: Send + Sync {
    /// Runs one system + user exchange and returns the raw model text.
    async fn complete(
        &self,
        system: &str,
        user: &str,
        max_tokens: u32,
        temperature: f32,
    ) -> Result<String>;
}

/// async-openai implementation of [`Completion`].
pub struct OpenAiCompletion {
    client: Client<OpenAIConfig>,
    model: String,
}

impl OpenAiCompletion {
    /// Creates a provider from the given configuration.
    #[must_use]
    pub fn new(config: AssistantConfig) -> Self {
        let openai_config = OpenAIConfig::new().with_api_key(&config.api_key);
        Self {
            client: Client::with_config(openai_config),
            model: config.model,
        }
    }

    /// Creates a provider from environment variables.
    ///
    /// # Errors
    /// Returns error if `OPENAI_API_KEY` is not set.
    pub fn from_env() -> Result<Self> {
        Ok(Self::new(AssistantConfig::from_env()?))
    }
}

#[async_trait::async_trait]
impl Completion for OpenAiCompletion {
    async fn complete(
        &self,
        system: &str,
        user: &str,
        max_tokens: u32,
        temperature: f32,
    ) -> Result<String> {
        let messages: Vec<ChatCompletionRequestMessage> = vec![
            ChatCompletionRequestSystemMessage {
                content: ChatCompletionRequestSystemMessageContent::Text(system.to_string()),
                name: None,
            }
            .into(),
            ChatCompletionRequestUserMessage {
                content: ChatCompletionRequestUserMessageContent::Text(user.to_string()),
                name: None,
            }
            .into(),
        ];

        let request = CreateChatCompletionRequest {
            model: self.model.clone(),
            messages,
            max_completion_tokens: Some(max_tokens),
            temperature: Some(temperature),
            ..Default::default()
        };

        debug!(model = %self.model, "requesting chat completion");

        let response = self
            .client
            .chat()
            .create(request)
            .await
            .map_err(|e| Error::Api(e.to_string()))?;

        let choice = response
            .choices
            .first()
            .ok_or_else(|| Error::Api("no choices in completion response".to_string()))?;

        Ok(choice.message.content.clone().unwrap_or_default())
    }
}

//! OpenAI implementation of [`LlmClient`]: wraps openai-client with a fixed model.

use std::time::Duration;

use anyhow::Result;
use async_trait::async_trait;
use openai_client::ChatOptions;
use prompt::ChatMessage;
use tracing::instrument;

use super::{chat_message_to_openai, CompletionOptions, LlmClient, LlmConfig, DEFAULT_CHAT_MODEL};

/// [`LlmClient`] backed by [`openai_client::OpenAIClient`].
#[derive(Clone)]
pub struct OpenAILlmClient {
    client: openai_client::OpenAIClient,
    model: String,
}

impl OpenAILlmClient {
    pub fn new(api_key: String) -> Self {
        Self {
            client: openai_client::OpenAIClient::new(api_key),
            model: DEFAULT_CHAT_MODEL.to_string(),
        }
    }

    pub fn with_base_url(api_key: String, base_url: String) -> Self {
        Self {
            client: openai_client::OpenAIClient::with_base_url(api_key, base_url),
            model: DEFAULT_CHAT_MODEL.to_string(),
        }
    }

    /// Builds a client from an [`LlmConfig`] (key, base URL, model, timeout).
    pub fn from_config(config: &dyn LlmConfig) -> Self {
        let client = match config.base_url() {
            Some(url) => Self::with_base_url(config.api_key().to_string(), url.to_string()),
            None => Self::new(config.api_key().to_string()),
        };
        client
            .with_model(config.model().to_string())
            .with_timeout(config.timeout())
    }

    pub fn with_model(mut self, model: String) -> Self {
        self.model = model;
        self
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.client = self.client.with_timeout(timeout);
        self
    }

    pub fn model(&self) -> &str {
        &self.model
    }
}

#[async_trait]
impl LlmClient for OpenAILlmClient {
    #[instrument(skip(self, messages), fields(model = %self.model))]
    async fn get_llm_response_with_messages(
        &self,
        messages: Vec<ChatMessage>,
        options: CompletionOptions,
    ) -> Result<String> {
        let openai_messages = messages
            .iter()
            .map(chat_message_to_openai)
            .collect::<Result<Vec<_>>>()?;
        self.client
            .chat_completion(
                &self.model,
                openai_messages,
                ChatOptions {
                    temperature: options.temperature,
                    json_object: options.json_response,
                },
            )
            .await
    }
}

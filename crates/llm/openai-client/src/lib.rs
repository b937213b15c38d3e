//! # OpenAI API client
//!
//! Thin wrapper around [async-openai] for non-streaming chat completion with per-call
//! temperature, optional JSON-object response mode, and a request timeout.
//! Provides token masking for safe logging.

use std::sync::Arc;
use std::time::Duration;

use async_openai::{
    types::{CreateChatCompletionRequestArgs, ResponseFormat},
    Client,
};

pub use async_openai::types::{
    ChatCompletionRequestAssistantMessageArgs, ChatCompletionRequestMessage,
    ChatCompletionRequestSystemMessageArgs, ChatCompletionRequestUserMessageArgs,
};

/// Timeout applied when the caller does not set one.
pub const DEFAULT_CHAT_TIMEOUT: Duration = Duration::from_secs(60);

/// Masks an API key/token for safe logging: first 7 chars + "***" + last 4 chars.
/// Keys of length <= 11 become "***" so no segment leaks.
pub fn mask_token(token: &str) -> String {
    let len = token.len();
    if len <= 11 || !token.is_char_boundary(7) || !token.is_char_boundary(len - 4) {
        return "***".to_string();
    }
    format!("{}***{}", &token[..7], &token[len - 4..])
}

/// Per-request sampling options.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ChatOptions {
    pub temperature: f32,
    /// Ask the API for a single JSON object (`response_format: json_object`).
    pub json_object: bool,
}

impl Default for ChatOptions {
    fn default() -> Self {
        Self {
            temperature: 0.7,
            json_object: false,
        }
    }
}

/// OpenAI chat client. Wraps async-openai client; optionally holds API key for masked logging.
#[derive(Clone)]
pub struct OpenAIClient {
    client: Arc<Client<async_openai::config::OpenAIConfig>>,
    /// API key stored only for logging (masked). None when created via `with_client()`.
    api_key_for_logging: Option<String>,
    timeout: Duration,
}

impl OpenAIClient {
    /// Builds a client using the given API key and default API base URL.
    pub fn new(api_key: String) -> Self {
        let api_key_for_logging = Some(api_key.clone());
        let config = async_openai::config::OpenAIConfig::new().with_api_key(api_key);
        Self {
            client: Arc::new(Client::with_config(config)),
            api_key_for_logging,
            timeout: DEFAULT_CHAT_TIMEOUT,
        }
    }

    /// Builds a client with a custom base URL (e.g. for proxies or compatible endpoints).
    pub fn with_base_url(api_key: String, base_url: String) -> Self {
        let api_key_for_logging = Some(api_key.clone());
        let config = async_openai::config::OpenAIConfig::new()
            .with_api_key(api_key)
            .with_api_base(base_url);
        Self {
            client: Arc::new(Client::with_config(config)),
            api_key_for_logging,
            timeout: DEFAULT_CHAT_TIMEOUT,
        }
    }

    /// Builds a client from an existing async-openai client (no API key stored for logging).
    pub fn with_client(client: Client<async_openai::config::OpenAIConfig>) -> Self {
        Self {
            client: Arc::new(client),
            api_key_for_logging: None,
            timeout: DEFAULT_CHAT_TIMEOUT,
        }
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    pub fn timeout(&self) -> Duration {
        self.timeout
    }

    /// Sends a chat completion request and returns the first choice's content.
    ///
    /// Logs masked API key, request JSON (debug) and token usage. Errors on API failure,
    /// timeout, or a response without choices.
    pub async fn chat_completion(
        &self,
        model: &str,
        messages: Vec<ChatCompletionRequestMessage>,
        options: ChatOptions,
    ) -> anyhow::Result<String> {
        let masked = self
            .api_key_for_logging
            .as_deref()
            .map(mask_token)
            .unwrap_or_else(|| "***".to_string());

        tracing::info!(
            model = %model,
            message_count = messages.len(),
            temperature = options.temperature,
            json_object = options.json_object,
            api_key = %masked,
            "OpenAI chat_completion request"
        );

        let mut args = CreateChatCompletionRequestArgs::default();
        args.model(model)
            .messages(messages)
            .temperature(options.temperature);
        if options.json_object {
            args.response_format(ResponseFormat::JsonObject);
        }
        let request = args.build()?;

        if let Ok(json) = serde_json::to_string_pretty(&request) {
            tracing::debug!(request_json = %json, "OpenAI chat_completion request JSON");
        }

        let response = match tokio::time::timeout(self.timeout, self.client.chat().create(request))
            .await
        {
            Ok(result) => result?,
            Err(_) => anyhow::bail!(
                "OpenAI chat_completion timed out after {} seconds",
                self.timeout.as_secs()
            ),
        };

        if let Some(ref u) = response.usage {
            tracing::info!(
                prompt_tokens = u.prompt_tokens,
                completion_tokens = u.completion_tokens,
                total_tokens = u.total_tokens,
                "OpenAI chat_completion usage"
            );
        }

        match response.choices.into_iter().next() {
            Some(choice) => Ok(choice.message.content.unwrap_or_default()),
            None => anyhow::bail!("No response from OpenAI"),
        }
    }
}

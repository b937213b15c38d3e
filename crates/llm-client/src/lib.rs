//! # LLM client abstraction
//!
//! Defines the [`LlmClient`] trait and an OpenAI implementation. Transport-agnostic; used by the
//! direct-scoring analyzer, the dialogue responder and the recommendation resolver.
//!
//! Callers treat every returned string as untrusted text and parse it themselves.

use anyhow::Result;
use async_trait::async_trait;
use openai_client::{
    ChatCompletionRequestAssistantMessageArgs, ChatCompletionRequestMessage,
    ChatCompletionRequestSystemMessageArgs, ChatCompletionRequestUserMessageArgs,
};
use prompt::{ChatMessage, MessageRole};

mod config;
mod openai_llm;

pub use config::{EnvLlmConfig, LlmConfig, DEFAULT_CHAT_MODEL};
pub use openai_llm::OpenAILlmClient;

/// Sampling options for one completion.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CompletionOptions {
    pub temperature: f32,
    /// Request a single JSON object as the reply.
    pub json_response: bool,
}

impl CompletionOptions {
    pub fn text(temperature: f32) -> Self {
        Self {
            temperature,
            json_response: false,
        }
    }

    pub fn json(temperature: f32) -> Self {
        Self {
            temperature,
            json_response: true,
        }
    }
}

/// LLM client interface: request a completion from a list of messages.
#[async_trait]
pub trait LlmClient: Send + Sync {
    /// Returns the model reply text for the given messages (system/user/assistant).
    async fn get_llm_response_with_messages(
        &self,
        messages: Vec<ChatMessage>,
        options: CompletionOptions,
    ) -> Result<String>;

    /// `complete(systemPrompt, userMessage, temperature)`: one system message plus one user message.
    async fn complete(
        &self,
        system_prompt: &str,
        user_message: &str,
        options: CompletionOptions,
    ) -> Result<String> {
        self.get_llm_response_with_messages(
            vec![
                ChatMessage::system(system_prompt),
                ChatMessage::user(user_message),
            ],
            options,
        )
        .await
    }
}

/// Converts a single [`ChatMessage`] into OpenAI API message format.
fn chat_message_to_openai(msg: &ChatMessage) -> Result<ChatCompletionRequestMessage> {
    let content = msg.content.clone();
    let openai_msg: ChatCompletionRequestMessage = match msg.role {
        MessageRole::System => ChatCompletionRequestSystemMessageArgs::default()
            .content(content)
            .build()?
            .into(),
        MessageRole::User => ChatCompletionRequestUserMessageArgs::default()
            .content(content)
            .build()?
            .into(),
        MessageRole::Assistant => ChatCompletionRequestAssistantMessageArgs::default()
            .content(content)
            .build()?
            .into(),
    };
    Ok(openai_msg)
}

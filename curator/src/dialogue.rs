//! Dialogue responder: one short reply steering the conversation toward the missing tags.

use std::sync::Arc;

use llm_client::{CompletionOptions, LlmClient};
use muq_core::{CuratorError, Result, TagSet};
use prompt::dialogue;

use crate::config::DEFAULT_THINKING_MESSAGE;

pub struct DialogueResponder {
    llm: Arc<dyn LlmClient>,
    temperature: f32,
    placeholder: String,
}

impl DialogueResponder {
    pub fn new(llm: Arc<dyn LlmClient>) -> Self {
        Self {
            llm,
            temperature: 0.7,
            placeholder: DEFAULT_THINKING_MESSAGE.to_string(),
        }
    }

    pub fn with_temperature(mut self, temperature: f32) -> Self {
        self.temperature = temperature;
        self
    }

    pub fn with_placeholder(mut self, placeholder: impl Into<String>) -> Self {
        self.placeholder = placeholder.into();
        self
    }

    /// Reply used whenever [`reply`](Self::reply) fails.
    pub fn placeholder(&self) -> &str {
        &self.placeholder
    }

    /// Asks the model for the next line given the merged tags. An empty reply is an error so the
    /// caller substitutes the placeholder.
    pub async fn reply(&self, utterance: &str, tags: &TagSet) -> Result<String> {
        let system = dialogue::system_prompt(&tags.emotions, &tags.concepts, tags.can_recommend());
        let text = self
            .llm
            .complete(
                &system,
                &dialogue::user_message(utterance),
                CompletionOptions::text(self.temperature),
            )
            .await
            .map_err(|e| CuratorError::CompletionService(e.to_string()))?;

        let text = text.trim();
        if text.is_empty() {
            return Err(CuratorError::CompletionService(
                "dialogue reply was empty".to_string(),
            ));
        }
        Ok(text.to_string())
    }
}

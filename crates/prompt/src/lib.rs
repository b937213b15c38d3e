//! # Prompt
//!
//! Everything the curator says to the language model lives here:
//!
//! - [`dialogue`]: short steering reply given the current tag state
//! - [`scoring`]: direct per-label relevance scoring (the LLM analysis strategy)
//! - [`recommendation`]: book list generation from accumulated tags, including the JSON key
//!   schema the model is asked to answer in
//!
//! The functions only build strings; sending them and parsing the replies is the caller's job.
//!
//! ## External interactions
//!
//! - **AI models**: Output is sent to OpenAI-compatible chat completion APIs.

pub mod dialogue;
pub mod recommendation;
pub mod scoring;

/// Role of a message, one-to-one with OpenAI Chat Completions API `role` values.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MessageRole {
    System,
    User,
    Assistant,
}

/// A single chat message, one-to-one with one element of OpenAI `messages` array.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ChatMessage {
    pub role: MessageRole,
    pub content: String,
}

impl ChatMessage {
    pub fn system(content: impl Into<String>) -> Self {
        Self {
            role: MessageRole::System,
            content: content.into(),
        }
    }

    pub fn user(content: impl Into<String>) -> Self {
        Self {
            role: MessageRole::User,
            content: content.into(),
        }
    }

    pub fn assistant(content: impl Into<String>) -> Self {
        Self {
            role: MessageRole::Assistant,
            content: content.into(),
        }
    }
}

/// Placeholder written where a tag list is empty.
pub const NONE_YET: &str = "없음";

/// Joins labels with ", " or returns [`NONE_YET`].
pub(crate) fn join_or_none<S: AsRef<str>>(labels: &[S]) -> String {
    if labels.is_empty() {
        NONE_YET.to_string()
    } else {
        labels
            .iter()
            .map(|l| l.as_ref())
            .collect::<Vec<_>>()
            .join(", ")
    }
}

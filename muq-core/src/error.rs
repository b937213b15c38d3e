use thiserror::Error;

#[derive(Error, Debug)]
pub enum CuratorError {
    #[error("Invalid input: {0}")]
    InvalidInput(String),

    #[error("Embedding service error: {0}")]
    EmbeddingService(String),

    #[error("Completion service error: {0}")]
    CompletionService(String),

    /// The model's recommendation output failed JSON/shape validation. `raw` is the untouched
    /// model text so the failure can be reproduced.
    #[error("Recommendation parse error: {reason}")]
    RecommendationParse { reason: String, raw: String },

    #[error("Insufficient tags: need at least one emotion and one concept (emotions={emotions}, concepts={concepts})")]
    InsufficientTags { emotions: usize, concepts: usize },

    #[error("Cache unavailable: {0}")]
    CacheUnavailable(String),

    #[error("Lexicon error: {0}")]
    Lexicon(String),

    #[error("Storage error: {0}")]
    Storage(String),

    #[error("Request cancelled: {0}")]
    Cancelled(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

impl CuratorError {
    /// True for errors caused by the caller's request (bad body, empty text, premature
    /// recommendation). Everything else is a server-side failure.
    pub fn is_client_error(&self) -> bool {
        matches!(
            self,
            CuratorError::InvalidInput(_) | CuratorError::InsufficientTags { .. }
        )
    }

    /// Raw model output attached to a parse failure, if any.
    pub fn raw_output(&self) -> Option<&str> {
        match self {
            CuratorError::RecommendationParse { raw, .. } => Some(raw),
            _ => None,
        }
    }
}

pub type Result<T> = std::result::Result<T, CuratorError>;

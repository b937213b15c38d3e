//! Embedding configuration: trait and env-based implementation.

use anyhow::Result;
use std::env;

/// Model used when `EMBEDDING_MODEL` is unset. Lexicon embeddings must be regenerated when it changes.
pub const DEFAULT_EMBEDDING_MODEL: &str = "text-embedding-3-small";

/// Embedding service configuration interface.
pub trait EmbeddingConfig: Send + Sync {
    /// API key for the OpenAI-compatible embedding endpoint (OPENAI_API_KEY).
    fn openai_api_key(&self) -> &str;
    /// Optional base URL for an OpenAI-compatible endpoint (OPENAI_BASE_URL).
    fn openai_base_url(&self) -> Option<&str>;
    fn model(&self) -> &str;
}

/// Embedding config loaded from environment variables.
#[derive(Debug, Clone)]
pub struct EnvEmbeddingConfig {
    pub openai_api_key: String,
    pub openai_base_url: Option<String>,
    pub embedding_model: String,
}

impl EmbeddingConfig for EnvEmbeddingConfig {
    fn openai_api_key(&self) -> &str {
        &self.openai_api_key
    }
    fn openai_base_url(&self) -> Option<&str> {
        self.openai_base_url.as_deref().filter(|s| !s.is_empty())
    }
    fn model(&self) -> &str {
        &self.embedding_model
    }
}

impl EnvEmbeddingConfig {
    /// Load from environment variables.
    pub fn from_env() -> Result<Self> {
        let openai_api_key = env::var("OPENAI_API_KEY").unwrap_or_default();
        let openai_base_url = env::var("OPENAI_BASE_URL")
            .ok()
            .filter(|s| !s.trim().is_empty());
        let embedding_model = env::var("EMBEDDING_MODEL")
            .ok()
            .filter(|s| !s.trim().is_empty())
            .unwrap_or_else(|| DEFAULT_EMBEDDING_MODEL.to_string());
        Ok(Self {
            openai_api_key,
            openai_base_url,
            embedding_model,
        })
    }

    /// Validate config: an API key is required to reach the embedding endpoint.
    pub fn validate(&self) -> Result<()> {
        if self.openai_api_key.trim().is_empty() {
            anyhow::bail!("OPENAI_API_KEY is required for embeddings. Set it in .env or environment.");
        }
        Ok(())
    }
}

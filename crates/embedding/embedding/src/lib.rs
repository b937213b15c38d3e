//! # Text Embeddings
//!
//! Embedding service interface: text in, fixed-length vector out. The dimensionality is fixed by
//! the model behind the implementation; callers compare vectors from the same model only.

use async_trait::async_trait;

mod config;
pub use config::{EmbeddingConfig, EnvEmbeddingConfig, DEFAULT_EMBEDDING_MODEL};

/// Service for generating text embeddings.
#[async_trait]
pub trait EmbeddingService: Send + Sync {
    /// Generates an embedding vector for a single text string.
    async fn embed(&self, text: &str) -> Result<Vec<f32>, anyhow::Error>;

    /// Generates embedding vectors for multiple texts in a single API call, in input order.
    async fn embed_batch(&self, texts: &[String]) -> Result<Vec<Vec<f32>>, anyhow::Error>;
}

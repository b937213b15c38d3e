//! Embedding gateway: the request-path entry to the embedding service.
//!
//! One call per invocation, no retries (only the offline precompute job retries). Blank input is
//! a caller error, every service failure becomes [`CuratorError::EmbeddingService`].

use std::sync::Arc;

use embedding::EmbeddingService;
use muq_core::{CuratorError, Result};
use tracing::debug;

#[derive(Clone)]
pub struct EmbeddingGateway {
    service: Arc<dyn EmbeddingService>,
}

impl EmbeddingGateway {
    pub fn new(service: Arc<dyn EmbeddingService>) -> Self {
        Self { service }
    }

    /// Embeds `text` after trimming. Fails with `InvalidInput` on blank text.
    pub async fn embed(&self, text: &str) -> Result<Vec<f32>> {
        let text = text.trim();
        if text.is_empty() {
            return Err(CuratorError::InvalidInput(
                "text to embed is empty".to_string(),
            ));
        }
        let vector = self
            .service
            .embed(text)
            .await
            .map_err(|e| CuratorError::EmbeddingService(e.to_string()))?;
        if vector.is_empty() {
            return Err(CuratorError::EmbeddingService(
                "embedding service returned an empty vector".to_string(),
            ));
        }
        debug!(dimension = vector.len(), "embedding gateway: vector received");
        Ok(vector)
    }
}

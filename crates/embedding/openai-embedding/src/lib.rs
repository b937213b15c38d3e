//! # OpenAI Embedding Service
//!
//! [`EmbeddingService`] implementation backed by OpenAI's embeddings API
//! (default model `text-embedding-3-small`, 1536 dimensions).
//!
//! ## Example
//!
//! ```rust,no_run
//! use openai_embedding::OpenAIEmbedding;
//! use embedding::EmbeddingService;
//!
//! async fn example() -> Result<(), anyhow::Error> {
//!     let service = OpenAIEmbedding::with_api_key("sk-...".to_string());
//!     let vector = service.embed("요즘 너무 외로워요").await?;
//!     println!("dimension: {}", vector.len());
//!     Ok(())
//! }
//! ```
//!
//! Whitespace-only input is rejected before any request is sent: the API would otherwise either
//! error out or return a meaningless vector, and callers must never see a silent zero vector.

use std::time::Duration;

use async_openai::{types::CreateEmbeddingRequestArgs, Client};
use async_trait::async_trait;
use embedding::{EmbeddingConfig, EmbeddingService, DEFAULT_EMBEDDING_MODEL};
use muq_core::preview;
use tracing::{debug, info, instrument, warn};

/// Default timeout for a single embed request (connect + request + response).
pub const DEFAULT_EMBED_TIMEOUT: Duration = Duration::from_secs(30);

/// Timeout for batch requests (larger payload).
const EMBED_BATCH_TIMEOUT: Duration = Duration::from_secs(60);

/// OpenAI embedding service. Holds the async-openai client, model name and request timeout.
#[derive(Debug, Clone)]
pub struct OpenAIEmbedding {
    client: Client<async_openai::config::OpenAIConfig>,
    model: String,
    timeout: Duration,
}

impl OpenAIEmbedding {
    /// Creates a new OpenAI embedding service. An empty `api_key` falls back to OPENAI_API_KEY.
    pub fn new(api_key: String, model: String) -> Self {
        Self::new_with_base_url(api_key, model, None)
    }

    /// Creates a service that talks to an OpenAI-compatible endpoint at `base_url`.
    pub fn new_with_base_url(api_key: String, model: String, base_url: Option<&str>) -> Self {
        let api_key = if api_key.is_empty() {
            std::env::var("OPENAI_API_KEY").unwrap_or_default()
        } else {
            api_key
        };

        let mut openai_config = async_openai::config::OpenAIConfig::new().with_api_key(api_key);
        if let Some(url) = base_url.filter(|s| !s.is_empty()) {
            openai_config = openai_config.with_api_base(url);
        }
        let client = Client::with_config(openai_config);

        Self {
            client,
            model,
            timeout: DEFAULT_EMBED_TIMEOUT,
        }
    }

    /// Creates a service with the default model.
    pub fn with_api_key(api_key: String) -> Self {
        Self::new(api_key, DEFAULT_EMBEDDING_MODEL.to_string())
    }

    /// Builds the service from an [`EmbeddingConfig`] (key, optional base URL, model).
    pub fn from_config(config: &dyn EmbeddingConfig) -> Self {
        Self::new_with_base_url(
            config.openai_api_key().to_string(),
            config.model().to_string(),
            config.openai_base_url(),
        )
    }

    pub fn with_model(mut self, model: String) -> Self {
        self.model = model;
        self
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    pub fn model(&self) -> &str {
        &self.model
    }

    pub fn timeout(&self) -> Duration {
        self.timeout
    }
}

#[async_trait]
impl EmbeddingService for OpenAIEmbedding {
    /// Embeds one text. Fails on whitespace-only input, API errors, timeout, or an empty response.
    #[instrument(skip(self, text), fields(model = %self.model, text_len = text.len()))]
    async fn embed(&self, text: &str) -> Result<Vec<f32>, anyhow::Error> {
        let text = text.trim();
        if text.is_empty() {
            anyhow::bail!("embedding input is empty");
        }

        info!(
            model = %self.model,
            text_preview = %preview(text),
            "step: embedding OpenAI embed request"
        );

        let request = CreateEmbeddingRequestArgs::default()
            .model(self.model.clone())
            .input(vec![text])
            .build()?;

        let embeddings = self.client.embeddings();
        let response = match tokio::time::timeout(self.timeout, embeddings.create(request)).await {
            Ok(Ok(r)) => {
                debug!("OpenAI embed response received");
                r
            }
            Ok(Err(e)) => {
                warn!(error = %e, "OpenAI embed request failed");
                return Err(e.into());
            }
            Err(_) => {
                warn!(
                    timeout_secs = self.timeout.as_secs(),
                    "OpenAI embed request timed out"
                );
                return Err(anyhow::anyhow!(
                    "OpenAI embed request timed out after {} seconds",
                    self.timeout.as_secs()
                ));
            }
        };

        let embedding = match response.data.into_iter().next() {
            Some(item) => item.embedding,
            None => {
                warn!("OpenAI embed response has no embedding data");
                return Err(anyhow::anyhow!("No embedding in response"));
            }
        };

        info!(
            dimension = embedding.len(),
            "step: embedding OpenAI embed done"
        );
        Ok(embedding)
    }

    /// Embeds several texts in one request. Returns vectors in input order.
    #[instrument(skip(self, texts), fields(model = %self.model, batch_size = texts.len()))]
    async fn embed_batch(&self, texts: &[String]) -> Result<Vec<Vec<f32>>, anyhow::Error> {
        if texts.is_empty() {
            debug!("OpenAI embed_batch empty input, skipping");
            return Ok(vec![]);
        }
        if let Some(pos) = texts.iter().position(|t| t.trim().is_empty()) {
            anyhow::bail!("embedding input at index {} is empty", pos);
        }

        info!(
            model = %self.model,
            batch_size = texts.len(),
            "step: embedding OpenAI embed_batch request"
        );

        let inputs: Vec<&str> = texts.iter().map(|s| s.trim()).collect();
        let request = CreateEmbeddingRequestArgs::default()
            .model(self.model.clone())
            .input(inputs)
            .build()?;

        let embeddings = self.client.embeddings();
        let response =
            match tokio::time::timeout(EMBED_BATCH_TIMEOUT, embeddings.create(request)).await {
                Ok(Ok(r)) => r,
                Ok(Err(e)) => {
                    warn!(error = %e, "OpenAI embed_batch request failed");
                    return Err(e.into());
                }
                Err(_) => {
                    warn!(
                        timeout_secs = EMBED_BATCH_TIMEOUT.as_secs(),
                        "OpenAI embed_batch request timed out"
                    );
                    return Err(anyhow::anyhow!(
                        "OpenAI embed_batch request timed out after {} seconds",
                        EMBED_BATCH_TIMEOUT.as_secs()
                    ));
                }
            };

        let mut data = response.data;
        data.sort_by_key(|item| item.index);
        let embeddings: Vec<Vec<f32>> = data.into_iter().map(|item| item.embedding).collect();

        if embeddings.len() != texts.len() {
            warn!(
                expected = texts.len(),
                got = embeddings.len(),
                "OpenAI embed_batch response count mismatch"
            );
            return Err(anyhow::anyhow!(
                "Expected {} embeddings, got {}",
                texts.len(),
                embeddings.len()
            ));
        }

        info!(
            count = embeddings.len(),
            "step: embedding OpenAI embed_batch done"
        );
        Ok(embeddings)
    }
}

//! Recommendation resolver.
//!
//! ```text
//! tags ─► eligible? ──no──► InsufficientTags (no external calls)
//!            │yes
//!            ▼
//!        cache lookup ──hit + parses──► cached record
//!            │miss / cache error / unreadable row
//!            ▼
//!        generate (one call) ──error──► CompletionService
//!            │
//!            ▼
//!        parse ──error──► RecommendationParse { raw }
//!            │
//!            ▼
//!        append to cache (failure logged only) ──► fresh record
//! ```

use std::sync::Arc;

use llm_client::{CompletionOptions, LlmClient};
use muq_core::{preview, CuratorError, RecommendationRecord, Result, TagSet};
use prompt::recommendation;
use tracing::{info, warn};

use crate::cache::RecommendationCache;
use crate::key::cache_key;
use crate::wire::{parse_payload, to_payload};

/// Default sampling temperature for generation.
pub const DEFAULT_RECOMMEND_TEMPERATURE: f32 = 0.7;

/// A resolved recommendation and whether it came from the cache.
#[derive(Debug, Clone, PartialEq)]
pub struct Resolved {
    pub record: RecommendationRecord,
    pub from_cache: bool,
}

pub struct RecommendationResolver {
    llm: Arc<dyn LlmClient>,
    cache: Arc<dyn RecommendationCache>,
    temperature: f32,
}

impl RecommendationResolver {
    pub fn new(llm: Arc<dyn LlmClient>, cache: Arc<dyn RecommendationCache>) -> Self {
        Self {
            llm,
            cache,
            temperature: DEFAULT_RECOMMEND_TEMPERATURE,
        }
    }

    pub fn with_temperature(mut self, temperature: f32) -> Self {
        self.temperature = temperature;
        self
    }

    pub async fn resolve(&self, tags: &TagSet) -> Result<Resolved> {
        if !tags.can_recommend() {
            return Err(CuratorError::InsufficientTags {
                emotions: tags.emotions.len(),
                concepts: tags.concepts.len(),
            });
        }

        let key = cache_key(tags);
        info!(key = %key, "step: recommendation cache lookup");

        if let Some(record) = self.cached(&key, tags).await {
            info!(key = %key, books = record.books.len(), "step: recommendation served from cache");
            return Ok(Resolved {
                record,
                from_cache: true,
            });
        }

        let record = self.generate(tags).await?;

        if let Err(e) = self.cache.append(&key, &to_payload(&record)).await {
            warn!(key = %key, error = %e, "failed to store recommendation, returning it anyway");
        }

        info!(key = %key, books = record.books.len(), "step: recommendation generated");
        Ok(Resolved {
            record,
            from_cache: false,
        })
    }

    /// Cache hit that parses. Any lookup or parse failure counts as a miss.
    async fn cached(&self, key: &str, tags: &TagSet) -> Option<RecommendationRecord> {
        let payload = match self.cache.lookup(key).await {
            Ok(Some(payload)) => payload,
            Ok(None) => return None,
            Err(e) => {
                warn!(key, error = %e, "recommendation cache unavailable, treating as miss");
                return None;
            }
        };
        match parse_payload(&payload, tags) {
            Ok(record) => Some(record),
            Err(reason) => {
                warn!(key, reason = %reason, "cached recommendation unreadable, regenerating");
                None
            }
        }
    }

    async fn generate(&self, tags: &TagSet) -> Result<RecommendationRecord> {
        let system = recommendation::system_prompt(&tags.emotions, &tags.concepts);
        let user = recommendation::user_message(&tags.emotions, &tags.concepts);

        let raw = self
            .llm
            .complete(&system, &user, CompletionOptions::json(self.temperature))
            .await
            .map_err(|e| CuratorError::CompletionService(e.to_string()))?;

        parse_payload(&raw, tags).map_err(|reason| {
            warn!(reason = %reason, raw_preview = %preview(&raw), "recommendation output rejected");
            CuratorError::RecommendationParse { reason, raw }
        })
    }
}

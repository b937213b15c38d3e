//! Offline embedding precompute.
//!
//! A one-shot batch job, separate from request serving: every entry's search text is embedded
//! with a fixed retry policy and the `{label, embedding}` rows are written next to the lexicon.
//! Request paths never retry; only this job does.

use std::path::Path;
use std::time::Duration;

use embedding::EmbeddingService;
use muq_core::{preview, Category, CuratorError, Result};
use tracing::{info, warn};

use crate::entry::LabelEmbedding;
use crate::store::LexiconStore;

/// Fixed-delay retry: `attempts` tries in total, `delay` between consecutive tries.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RetryPolicy {
    pub attempts: usize,
    pub delay: Duration,
}

impl Default for RetryPolicy {
    fn default() -> Self {
        Self {
            attempts: 3,
            delay: Duration::from_millis(1000),
        }
    }
}

/// Embeds `text`, retrying on failure per `policy`. Returns the last error when all tries fail.
pub async fn embed_with_retry(
    service: &dyn EmbeddingService,
    text: &str,
    policy: RetryPolicy,
) -> anyhow::Result<Vec<f32>> {
    let attempts = policy.attempts.max(1);
    let mut attempt = 1;
    loop {
        match service.embed(text.trim()).await {
            Ok(vector) => return Ok(vector),
            Err(e) if attempt < attempts => {
                warn!(
                    attempt,
                    attempts,
                    error = %e,
                    text_preview = %preview(text),
                    "embedding failed, retrying"
                );
                tokio::time::sleep(policy.delay).await;
                attempt += 1;
            }
            Err(e) => {
                warn!(attempt, attempts, error = %e, "embedding failed, giving up");
                return Err(e);
            }
        }
    }
}

/// Embeds every entry of `category` in lexicon order. Any entry that exhausts its retries fails
/// the whole category so a partial file is never written.
pub async fn precompute_category(
    store: &LexiconStore,
    category: Category,
    service: &dyn EmbeddingService,
    policy: RetryPolicy,
) -> Result<Vec<LabelEmbedding>> {
    let entries = store.entries(category);
    info!(category = %category, count = entries.len(), "step: precompute embeddings start");

    let mut rows = Vec::with_capacity(entries.len());
    for entry in entries {
        let text = entry.search_text();
        info!(category = %category, label = %entry.label, text_preview = %preview(&text), "embedding entry");
        let embedding = embed_with_retry(service, &text, policy)
            .await
            .map_err(|e| {
                CuratorError::EmbeddingService(format!(
                    "{} '{}': {}",
                    category, entry.label, e
                ))
            })?;
        rows.push(LabelEmbedding {
            label: entry.label.clone(),
            embedding,
        });
    }

    info!(category = %category, count = rows.len(), "step: precompute embeddings done");
    Ok(rows)
}

/// Writes rows as pretty JSON, creating parent directories.
pub fn write_embeddings(path: &Path, rows: &[LabelEmbedding]) -> Result<()> {
    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() {
            std::fs::create_dir_all(parent)?;
        }
    }
    let json = serde_json::to_string_pretty(rows)
        .map_err(|e| CuratorError::Lexicon(format!("failed to encode embeddings: {}", e)))?;
    std::fs::write(path, json)?;
    Ok(())
}

pub fn read_embeddings(path: &Path) -> Result<Vec<LabelEmbedding>> {
    let text = std::fs::read_to_string(path)?;
    serde_json::from_str(&text).map_err(|e| {
        CuratorError::Lexicon(format!(
            "invalid embeddings file {}: {}",
            path.display(),
            e
        ))
    })
}

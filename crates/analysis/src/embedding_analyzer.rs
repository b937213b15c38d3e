//! Embedding-similarity analyzer.
//!
//! The utterance is embedded once; each lexicon entry is compared by cosine similarity against
//! its precomputed vector or, when the store has none, a vector embedded for this request.

use std::sync::Arc;

use async_trait::async_trait;
use embedding::EmbeddingService;
use futures::future::join_all;
use lexicon::{LexiconEntry, LexiconStore};
use muq_core::{preview, AnalysisResult, Category, Result, ScoredLabel};
use tracing::{debug, info, warn};

use crate::gateway::EmbeddingGateway;
use crate::similarity::{cosine_similarity, rank};
use crate::strategy::{Analysis, TagAnalyzer};

pub struct EmbeddingAnalyzer {
    gateway: EmbeddingGateway,
}

impl EmbeddingAnalyzer {
    pub fn new(service: Arc<dyn EmbeddingService>) -> Self {
        Self {
            gateway: EmbeddingGateway::new(service),
        }
    }

    pub fn from_gateway(gateway: EmbeddingGateway) -> Self {
        Self { gateway }
    }

    /// Vector for one entry: the stored one when it has the utterance's dimension, otherwise a
    /// fresh embedding of its search text. `None` when on-demand embedding fails or still
    /// disagrees on dimension; the entry is then left out of the ranking.
    async fn entry_vector(&self, entry: &LexiconEntry, dim: usize) -> Option<Vec<f32>> {
        if let Some(v) = entry.embedding.as_ref().filter(|v| v.len() == dim) {
            return Some(v.clone());
        }
        match self.gateway.embed(&entry.search_text()).await {
            Ok(v) if v.len() == dim => Some(v),
            Ok(v) => {
                warn!(
                    category = %entry.category,
                    label = %entry.label,
                    expected = dim,
                    actual = v.len(),
                    "entry embedding dimension differs from utterance, entry skipped"
                );
                None
            }
            Err(e) => {
                warn!(
                    category = %entry.category,
                    label = %entry.label,
                    error = %e,
                    "on-demand entry embedding failed, entry skipped"
                );
                None
            }
        }
    }

    async fn rank_category(
        &self,
        category: Category,
        utterance: &[f32],
        lexicon: &LexiconStore,
    ) -> AnalysisResult {
        let entries = lexicon.entries(category);
        let dim = utterance.len();
        let missing = entries.iter().filter(|e| e.embedding.is_none()).count();
        let stale = entries
            .iter()
            .filter(|e| e.embedding.as_ref().is_some_and(|v| v.len() != dim))
            .count();
        if stale > 0 {
            // Precomputed with a different embedding model; re-run `muq embed-lexicon`.
            warn!(
                category = %category,
                stale,
                utterance_dim = dim,
                stored_dim = ?lexicon.embedding_dim(),
                "stored lexicon vectors have a different dimension, embedding on demand"
            );
        }
        if missing > 0 {
            debug!(category = %category, missing, "embedding entries on demand");
        }

        let vectors = join_all(entries.iter().map(|e| self.entry_vector(e, dim))).await;
        let scored: Vec<ScoredLabel> = entries
            .iter()
            .zip(vectors)
            .filter_map(|(entry, vector)| {
                vector.map(|v| ScoredLabel::new(entry.label.clone(), cosine_similarity(utterance, &v)))
            })
            .collect();

        AnalysisResult {
            category,
            ranked: rank(scored),
        }
    }
}

#[async_trait]
impl TagAnalyzer for EmbeddingAnalyzer {
    fn name(&self) -> &'static str {
        "embedding"
    }

    async fn analyze(&self, text: &str, lexicon: &LexiconStore) -> Result<Analysis> {
        info!(text_preview = %preview(text), "step: embedding analysis start");
        let utterance = self.gateway.embed(text).await?;

        let (emotions, concepts) = futures::join!(
            self.rank_category(Category::Emotion, &utterance, lexicon),
            self.rank_category(Category::Concept, &utterance, lexicon),
        );

        info!(
            emotions = emotions.ranked.len(),
            concepts = concepts.ranked.len(),
            top_emotion = ?emotions.ranked.first().map(|s| (&s.label, s.score)),
            top_concept = ?concepts.ranked.first().map(|s| (&s.label, s.score)),
            "step: embedding analysis done"
        );
        Ok(Analysis { emotions, concepts })
    }
}

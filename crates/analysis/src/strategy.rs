//! The analyzer seam.

use std::str::FromStr;

use async_trait::async_trait;
use lexicon::LexiconStore;
use muq_core::{AnalysisResult, Category, CuratorError, Result};

use crate::selector::select;

/// Ranked labels of both categories for one utterance.
#[derive(Debug, Clone, PartialEq)]
pub struct Analysis {
    pub emotions: AnalysisResult,
    pub concepts: AnalysisResult,
}

impl Analysis {
    /// No detections in either category.
    pub fn empty() -> Self {
        Self {
            emotions: AnalysisResult::empty(Category::Emotion),
            concepts: AnalysisResult::empty(Category::Concept),
        }
    }

    pub fn get(&self, category: Category) -> &AnalysisResult {
        match category {
            Category::Emotion => &self.emotions,
            Category::Concept => &self.concepts,
        }
    }

    /// Labels at or above `threshold` in one category, highest first.
    pub fn selected(&self, category: Category, threshold: f32) -> Vec<String> {
        select(&self.get(category).ranked, threshold)
    }
}

/// Scores every lexicon label of both categories against one utterance.
///
/// Implementations never return a label outside `lexicon`, and every score lies in [-1, 1]
/// (embedding) or [0, 1] (direct scoring).
#[async_trait]
pub trait TagAnalyzer: Send + Sync {
    /// Short name used in logs.
    fn name(&self) -> &'static str;

    async fn analyze(&self, text: &str, lexicon: &LexiconStore) -> Result<Analysis>;
}

/// Which analyzer the service runs with. Chosen once at startup.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum AnalyzerKind {
    /// Cosine similarity against lexicon embeddings.
    #[default]
    Embedding,
    /// Direct scoring by the chat model.
    Llm,
    /// Embedding first; direct scoring only when the embedding path fails.
    EmbeddingWithLlmFallback,
}

impl AnalyzerKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            AnalyzerKind::Embedding => "embedding",
            AnalyzerKind::Llm => "llm",
            AnalyzerKind::EmbeddingWithLlmFallback => "embedding+llm",
        }
    }
}

impl FromStr for AnalyzerKind {
    type Err = CuratorError;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "embedding" => Ok(AnalyzerKind::Embedding),
            "llm" => Ok(AnalyzerKind::Llm),
            "embedding+llm" => Ok(AnalyzerKind::EmbeddingWithLlmFallback),
            other => Err(CuratorError::InvalidInput(format!(
                "unknown analyzer strategy '{}' (expected embedding, llm or embedding+llm)",
                other
            ))),
        }
    }
}

impl std::fmt::Display for AnalyzerKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

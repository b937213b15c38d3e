//! Lexicon file rows and the in-memory entry.

use muq_core::Category;
use serde::{Deserialize, Serialize};

/// One row of a lexicon JSON file.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RawLexiconEntry {
    pub label: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub aliases: Vec<String>,
    #[serde(default)]
    pub example_prompts: Vec<String>,
    #[serde(default)]
    pub cluster: Option<String>,
}

/// One row of a precomputed embeddings file, keyed by label.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LabelEmbedding {
    pub label: String,
    pub embedding: Vec<f32>,
}

/// A lexicon label. Immutable once the store is built.
#[derive(Debug, Clone, PartialEq)]
pub struct LexiconEntry {
    pub label: String,
    pub aliases: Vec<String>,
    pub description: String,
    pub example_prompts: Vec<String>,
    /// Display grouping from the curated file; not used for scoring.
    pub cluster: Option<String>,
    pub category: Category,
    pub embedding: Option<Vec<f32>>,
}

impl LexiconEntry {
    pub fn new(category: Category, label: impl Into<String>, description: impl Into<String>) -> Self {
        Self {
            label: label.into(),
            aliases: Vec::new(),
            description: description.into(),
            example_prompts: Vec::new(),
            cluster: None,
            category,
            embedding: None,
        }
    }

    pub fn with_aliases(mut self, aliases: Vec<String>) -> Self {
        self.aliases = aliases;
        self
    }

    pub fn with_embedding(mut self, embedding: Vec<f32>) -> Self {
        self.embedding = Some(embedding);
        self
    }

    pub fn from_raw(category: Category, raw: RawLexiconEntry) -> Self {
        Self {
            label: raw.label.trim().to_string(),
            aliases: raw.aliases,
            description: raw.description,
            example_prompts: raw.example_prompts,
            cluster: raw.cluster,
            category,
            embedding: None,
        }
    }

    /// Text embedded for this entry, both offline and on demand: label, aliases, description and
    /// example prompts, space-joined.
    pub fn search_text(&self) -> String {
        std::iter::once(self.label.as_str())
            .chain(self.aliases.iter().map(String::as_str))
            .chain(std::iter::once(self.description.as_str()))
            .chain(self.example_prompts.iter().map(String::as_str))
            .map(str::trim)
            .filter(|s| !s.is_empty())
            .collect::<Vec<_>>()
            .join(" ")
    }
}

//! Validated, read-only lexicon store.
//!
//! Built once during process initialization and shared by reference (`Arc<LexiconStore>`);
//! nothing re-reads the files per request.

use std::collections::HashSet;
use std::path::{Path, PathBuf};

use muq_core::{Category, CuratorError, Result};
use tracing::{info, warn};

use crate::entry::{LabelEmbedding, LexiconEntry, RawLexiconEntry};
use crate::precompute::read_embeddings;

/// File locations for both lexicons and their optional precomputed embeddings.
#[derive(Debug, Clone)]
pub struct LexiconPaths {
    pub emotions: PathBuf,
    pub concepts: PathBuf,
    pub emotion_embeddings: Option<PathBuf>,
    pub concept_embeddings: Option<PathBuf>,
}

impl LexiconPaths {
    pub fn lexicon(&self, category: Category) -> &Path {
        match category {
            Category::Emotion => &self.emotions,
            Category::Concept => &self.concepts,
        }
    }

    pub fn embeddings(&self, category: Category) -> Option<&Path> {
        match category {
            Category::Emotion => self.emotion_embeddings.as_deref(),
            Category::Concept => self.concept_embeddings.as_deref(),
        }
    }
}

#[derive(Debug, Clone)]
pub struct LexiconStore {
    emotions: Vec<LexiconEntry>,
    concepts: Vec<LexiconEntry>,
}

impl LexiconStore {
    /// Builds a store from entries in declaration order.
    ///
    /// Fails on an empty label, a duplicate label within a category, a label present in both
    /// categories, an entry filed under the wrong category, or precomputed embeddings of
    /// differing dimension.
    pub fn new(emotions: Vec<LexiconEntry>, concepts: Vec<LexiconEntry>) -> Result<Self> {
        validate_category(Category::Emotion, &emotions)?;
        validate_category(Category::Concept, &concepts)?;

        let emotion_labels: HashSet<&str> = emotions.iter().map(|e| e.label.as_str()).collect();
        if let Some(shared) = concepts
            .iter()
            .find(|c| emotion_labels.contains(c.label.as_str()))
        {
            return Err(CuratorError::Lexicon(format!(
                "label '{}' appears in both emotion and concept lexicons",
                shared.label
            )));
        }

        let store = Self { emotions, concepts };
        store.validate_dimensions()?;
        Ok(store)
    }

    /// Parses both lexicons from JSON array text.
    pub fn from_json(emotion_json: &str, concept_json: &str) -> Result<Self> {
        let emotions = parse_entries(Category::Emotion, emotion_json)?;
        let concepts = parse_entries(Category::Concept, concept_json)?;
        Self::new(emotions, concepts)
    }

    /// Loads both lexicon files and, when present, their embeddings files.
    ///
    /// A configured embeddings file that does not exist is skipped with a warning; entries
    /// without a vector are embedded on demand by the embedding analyzer.
    pub fn load(paths: &LexiconPaths) -> Result<Self> {
        let mut lists = Vec::with_capacity(2);
        for category in Category::ALL {
            let path = paths.lexicon(category);
            let text = std::fs::read_to_string(path).map_err(|e| {
                CuratorError::Lexicon(format!("failed to read {} lexicon {}: {}", category, path.display(), e))
            })?;
            let mut entries = parse_entries(category, &text)?;

            if let Some(emb_path) = paths.embeddings(category) {
                if emb_path.exists() {
                    let rows = read_embeddings(emb_path)?;
                    let attached = attach_embeddings(category, &mut entries, rows);
                    info!(
                        category = %category,
                        path = %emb_path.display(),
                        attached,
                        total = entries.len(),
                        "step: lexicon embeddings attached"
                    );
                } else {
                    warn!(
                        category = %category,
                        path = %emb_path.display(),
                        "lexicon embeddings file missing; entries will be embedded on demand"
                    );
                }
            }
            lists.push(entries);
        }
        let concepts = lists.pop().unwrap_or_default();
        let emotions = lists.pop().unwrap_or_default();

        let store = Self::new(emotions, concepts)?;
        info!(
            emotions = store.emotions.len(),
            concepts = store.concepts.len(),
            "step: lexicon loaded"
        );
        Ok(store)
    }

    /// Returns a copy of the store with embeddings attached by label for `category`.
    /// Used while building the store; unknown labels are ignored with a warning.
    pub fn with_embeddings(mut self, category: Category, rows: Vec<LabelEmbedding>) -> Result<Self> {
        let entries = match category {
            Category::Emotion => &mut self.emotions,
            Category::Concept => &mut self.concepts,
        };
        attach_embeddings(category, entries, rows);
        self.validate_dimensions()?;
        Ok(self)
    }

    pub fn entries(&self, category: Category) -> &[LexiconEntry] {
        match category {
            Category::Emotion => &self.emotions,
            Category::Concept => &self.concepts,
        }
    }

    pub fn get(&self, category: Category, label: &str) -> Option<&LexiconEntry> {
        self.entries(category).iter().find(|e| e.label == label)
    }

    pub fn contains(&self, category: Category, label: &str) -> bool {
        self.get(category, label).is_some()
    }

    /// Number of entries across both categories.
    pub fn len(&self) -> usize {
        self.emotions.len() + self.concepts.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Dimension shared by all precomputed vectors, if any are present.
    pub fn embedding_dim(&self) -> Option<usize> {
        self.emotions
            .iter()
            .chain(self.concepts.iter())
            .find_map(|e| e.embedding.as_ref().map(Vec::len))
    }

    fn validate_dimensions(&self) -> Result<()> {
        let Some(dim) = self.embedding_dim() else {
            return Ok(());
        };
        for entry in self.emotions.iter().chain(self.concepts.iter()) {
            if let Some(v) = &entry.embedding {
                if v.len() != dim {
                    return Err(CuratorError::Lexicon(format!(
                        "embedding for {} '{}' has dimension {}, expected {}",
                        entry.category,
                        entry.label,
                        v.len(),
                        dim
                    )));
                }
            }
        }
        Ok(())
    }
}

fn parse_entries(category: Category, json: &str) -> Result<Vec<LexiconEntry>> {
    let raw: Vec<RawLexiconEntry> = serde_json::from_str(json).map_err(|e| {
        CuratorError::Lexicon(format!("invalid {} lexicon JSON: {}", category, e))
    })?;
    Ok(raw
        .into_iter()
        .map(|r| LexiconEntry::from_raw(category, r))
        .collect())
}

fn validate_category(category: Category, entries: &[LexiconEntry]) -> Result<()> {
    let mut seen = HashSet::new();
    for (idx, entry) in entries.iter().enumerate() {
        if entry.label.trim().is_empty() {
            return Err(CuratorError::Lexicon(format!(
                "{} lexicon entry #{} has an empty label",
                category, idx
            )));
        }
        if entry.category != category {
            return Err(CuratorError::Lexicon(format!(
                "entry '{}' is a {} but was filed under {}",
                entry.label, entry.category, category
            )));
        }
        if !seen.insert(entry.label.as_str()) {
            return Err(CuratorError::Lexicon(format!(
                "duplicate {} label '{}'",
                category, entry.label
            )));
        }
    }
    Ok(())
}

/// Attaches vectors by label. Returns how many entries received one.
fn attach_embeddings(
    category: Category,
    entries: &mut [LexiconEntry],
    rows: Vec<LabelEmbedding>,
) -> usize {
    let mut attached = 0;
    for row in rows {
        if row.embedding.is_empty() {
            warn!(category = %category, label = %row.label, "empty embedding row ignored");
            continue;
        }
        match entries.iter_mut().find(|e| e.label == row.label) {
            Some(entry) => {
                entry.embedding = Some(row.embedding);
                attached += 1;
            }
            None => {
                warn!(category = %category, label = %row.label, "embedding row for unknown label ignored");
            }
        }
    }
    attached
}

//! Data model shared across the curator: lexicon categories, tag sets, analysis output,
//! recommendation records, and the JSON contracts exchanged with the front door.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Which lexicon a label belongs to. The two lexicons are disjoint.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Category {
    Emotion,
    Concept,
}

impl Category {
    pub const ALL: [Category; 2] = [Category::Emotion, Category::Concept];

    pub fn as_str(&self) -> &'static str {
        match self {
            Category::Emotion => "emotion",
            Category::Concept => "concept",
        }
    }
}

impl std::fmt::Display for Category {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One lexicon label with its relevance score for the current utterance.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScoredLabel {
    pub label: String,
    pub score: f32,
}

impl ScoredLabel {
    pub fn new(label: impl Into<String>, score: f32) -> Self {
        Self {
            label: label.into(),
            score,
        }
    }
}

/// Ranked labels of one category for a single utterance, highest score first.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AnalysisResult {
    pub category: Category,
    pub ranked: Vec<ScoredLabel>,
}

impl AnalysisResult {
    pub fn empty(category: Category) -> Self {
        Self {
            category,
            ranked: Vec::new(),
        }
    }
}

/// Tags accumulated over a conversation. Each list is duplicate-free and keeps first-seen order.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TagSet {
    #[serde(default)]
    pub emotions: Vec<String>,
    #[serde(default)]
    pub concepts: Vec<String>,
}

impl TagSet {
    pub fn new(emotions: Vec<String>, concepts: Vec<String>) -> Self {
        Self { emotions, concepts }
    }

    pub fn labels(&self, category: Category) -> &[String] {
        match category {
            Category::Emotion => &self.emotions,
            Category::Concept => &self.concepts,
        }
    }

    pub fn labels_mut(&mut self, category: Category) -> &mut Vec<String> {
        match category {
            Category::Emotion => &mut self.emotions,
            Category::Concept => &mut self.concepts,
        }
    }

    pub fn is_empty(&self) -> bool {
        self.emotions.is_empty() && self.concepts.is_empty()
    }

    pub fn has_emotion(&self) -> bool {
        !self.emotions.is_empty()
    }

    pub fn has_concept(&self) -> bool {
        !self.concepts.is_empty()
    }

    /// Eligibility gate: at least one emotion and one concept.
    pub fn can_recommend(&self) -> bool {
        self.has_emotion() && self.has_concept()
    }
}

/// A tag set together with its derived eligibility flags.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TagState {
    pub tags: TagSet,
    pub has_emotion: bool,
    pub has_concept: bool,
    pub can_recommend: bool,
}

impl From<TagSet> for TagState {
    fn from(tags: TagSet) -> Self {
        Self {
            has_emotion: tags.has_emotion(),
            has_concept: tags.has_concept(),
            can_recommend: tags.can_recommend(),
            tags,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Book {
    pub title: String,
    pub author: String,
    pub summary: String,
    pub reason: String,
}

/// A finished recommendation. Never mutated after creation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RecommendationRecord {
    pub emotion_tags: Vec<String>,
    pub concept_tags: Vec<String>,
    pub books: Vec<Book>,
}

/// Inbound turn from the front door.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TurnRequest {
    #[serde(default)]
    pub user_input: String,
    #[serde(default)]
    pub accumulated_tags: Option<TagSet>,
}

impl TurnRequest {
    pub fn new(user_input: impl Into<String>, accumulated_tags: Option<TagSet>) -> Self {
        Self {
            user_input: user_input.into(),
            accumulated_tags,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TurnResponse {
    pub message: String,
    pub accumulated_tags: TagSet,
    pub new_tags: TagSet,
    pub can_recommend: bool,
    pub has_emotion: bool,
    pub has_concept: bool,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RecommendationResponse {
    pub accumulated_tags: TagSet,
    pub books: Vec<Book>,
    pub from_cache: bool,
}

/// One past exchange shown in the public feed.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FeedItem {
    pub id: String,
    pub question: String,
    pub emotion_keywords: Vec<String>,
    pub concept_keywords: Vec<String>,
    pub books: Vec<Book>,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Pagination {
    pub page: usize,
    pub limit: usize,
    pub total: usize,
    pub has_more: bool,
    pub total_pages: usize,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FeedPage {
    pub items: Vec<FeedItem>,
    pub pagination: Pagination,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

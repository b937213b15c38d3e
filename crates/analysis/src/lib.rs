//! # Analysis
//!
//! Turns one utterance into lexicon tags and folds them into a conversation's tag set.
//!
//! Pipeline per turn: [`TagAnalyzer::analyze`] ranks every label of both categories →
//! [`select`] keeps labels at or above the threshold → [`merge`] appends them to the
//! caller's [`TagSet`](muq_core::TagSet) without duplicates.
//!
//! Analyzer strategies (one is chosen at startup, see [`AnalyzerKind`]):
//!
//! - [`EmbeddingAnalyzer`]: cosine similarity between the utterance embedding and each entry's
//!   embedding (precomputed or embedded on demand)
//! - [`LlmScoringAnalyzer`]: one chat completion that scores every label directly
//! - [`FallbackAnalyzer`]: the embedding analyzer, falling back to LLM scoring when it fails

mod accumulator;
mod embedding_analyzer;
mod fallback;
mod gateway;
mod llm_scoring;
mod selector;
mod similarity;
mod strategy;

pub use accumulator::{merge, merge_capped, new_tags, normalize, DEFAULT_MAX_TAGS_PER_CATEGORY};
pub use embedding_analyzer::EmbeddingAnalyzer;
pub use fallback::FallbackAnalyzer;
pub use gateway::EmbeddingGateway;
pub use llm_scoring::{parse_scores, LlmScoringAnalyzer};
pub use selector::{select, DEFAULT_TAG_THRESHOLD};
pub use similarity::{cosine_similarity, rank};
pub use strategy::{Analysis, AnalyzerKind, TagAnalyzer};

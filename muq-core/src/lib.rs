//! # muq-core
//!
//! Core types shared by every muq crate: lexicon categories, tag sets, analysis results,
//! recommendation records, the turn/recommendation wire contracts, the [`CuratorError`]
//! taxonomy, and tracing initialization.

pub mod error;
pub mod logger;
pub mod types;

pub use error::{CuratorError, Result};
pub use logger::{init_tracing, preview};
pub use types::{
    AnalysisResult, Book, Category, FeedItem, FeedPage, Pagination, RecommendationRecord,
    RecommendationResponse, ScoredLabel, TagSet, TagState, TurnRequest, TurnResponse,
};

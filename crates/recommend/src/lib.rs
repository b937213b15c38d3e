//! # Recommend
//!
//! Resolves an eligible tag set into a book list: cache lookup first, one LLM generation on a
//! miss, then append the result to the cache.
//!
//! - [`key`]: the versioned, order-independent cache key for a tag set
//! - [`wire`]: translation between the model's Korean-keyed JSON and [`RecommendationRecord`]
//! - [`cache`]: [`RecommendationCache`] and its in-memory and SQLite implementations
//! - [`resolver`]: [`RecommendationResolver`]
//!
//! [`RecommendationRecord`]: muq_core::RecommendationRecord

pub mod cache;
pub mod key;
pub mod resolver;
pub mod wire;

pub use cache::{ExchangeLogCache, InMemoryCache, RecommendationCache};
pub use key::{cache_key, KEY_SCHEME};
pub use resolver::{RecommendationResolver, Resolved, DEFAULT_RECOMMEND_TEMPERATURE};
pub use wire::{parse_payload, to_payload};

//! # Lexicon
//!
//! The two fixed, externally curated label vocabularies (emotions and concepts).
//!
//! - [`entry`]: file formats (`{label, description, aliases?, example_prompts?, cluster?}` and
//!   the parallel `{label, embedding}` file) and [`LexiconEntry`]
//! - [`store`]: [`LexiconStore`], loaded and validated once at startup, read-only afterwards
//! - [`precompute`]: the offline batch job that embeds every entry with retry and writes the
//!   embeddings file

pub mod entry;
pub mod precompute;
pub mod store;

pub use entry::{LabelEmbedding, LexiconEntry, RawLexiconEntry};
pub use precompute::{
    embed_with_retry, precompute_category, read_embeddings, write_embeddings, RetryPolicy,
};
pub use store::{LexiconPaths, LexiconStore};

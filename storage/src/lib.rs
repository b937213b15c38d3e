//! Storage crate: the append-only exchange log.
//!
//! Every finished recommendation is appended as one row keyed by `(key_scheme, question)`.
//! The same rows serve as the recommendation cache (latest row per key wins) and as the source
//! of the public feed (all rows, newest first).
//!
//! ## Modules
//!
//! - [`error`] – Storage error types
//! - [`models`] – ExchangeRecord
//! - [`exchange_repo`] – ExchangeRepository (SQLite)
//! - [`sqlite_pool`] – SqlitePoolManager

mod error;
mod exchange_repo;
mod models;
mod sqlite_pool;

pub use error::StorageError;
pub use exchange_repo::ExchangeRepository;
pub use models::ExchangeRecord;
pub use sqlite_pool::SqlitePoolManager;

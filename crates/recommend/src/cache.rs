//! Recommendation cache.
//!
//! A cache is an append-only log of `(key, payload)` pairs where the latest pair for a key wins.
//! Payloads are wire-format text; parsing them is the resolver's job.

use std::sync::Mutex;

use async_trait::async_trait;
use muq_core::{CuratorError, Result};
use storage::{ExchangeRecord, ExchangeRepository};

use crate::key::KEY_SCHEME;

#[async_trait]
pub trait RecommendationCache: Send + Sync {
    /// Latest payload stored under `key`. Fails with `CacheUnavailable` when the backend is
    /// unreachable.
    async fn lookup(&self, key: &str) -> Result<Option<String>>;

    async fn append(&self, key: &str, payload: &str) -> Result<()>;
}

/// Process-local cache, used in tests and when no database is configured.
#[derive(Default)]
pub struct InMemoryCache {
    rows: Mutex<Vec<(String, String)>>,
}

impl InMemoryCache {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.rows.lock().map(|rows| rows.len()).unwrap_or(0)
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

#[async_trait]
impl RecommendationCache for InMemoryCache {
    async fn lookup(&self, key: &str) -> Result<Option<String>> {
        let rows = self
            .rows
            .lock()
            .map_err(|e| CuratorError::CacheUnavailable(e.to_string()))?;
        Ok(rows
            .iter()
            .rev()
            .find(|(k, _)| k == key)
            .map(|(_, payload)| payload.clone()))
    }

    async fn append(&self, key: &str, payload: &str) -> Result<()> {
        self.rows
            .lock()
            .map_err(|e| CuratorError::CacheUnavailable(e.to_string()))?
            .push((key.to_string(), payload.to_string()));
        Ok(())
    }
}

/// Cache backed by the SQLite exchange log. Rows are written under [`KEY_SCHEME`] and only rows
/// of that scheme are read back.
#[derive(Clone)]
pub struct ExchangeLogCache {
    repo: ExchangeRepository,
}

impl ExchangeLogCache {
    pub fn new(repo: ExchangeRepository) -> Self {
        Self { repo }
    }

    pub fn repository(&self) -> &ExchangeRepository {
        &self.repo
    }
}

#[async_trait]
impl RecommendationCache for ExchangeLogCache {
    async fn lookup(&self, key: &str) -> Result<Option<String>> {
        let record = self
            .repo
            .find_latest(KEY_SCHEME, key)
            .await
            .map_err(|e| CuratorError::CacheUnavailable(e.to_string()))?;
        Ok(record.map(|r| r.payload))
    }

    async fn append(&self, key: &str, payload: &str) -> Result<()> {
        self.repo
            .append(&ExchangeRecord::new(KEY_SCHEME, key, payload))
            .await
            .map_err(|e| CuratorError::CacheUnavailable(e.to_string()))
    }
}

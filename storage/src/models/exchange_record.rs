//! Exchange record model for persistence.
//!
//! Maps to the `exchanges` table and is used by ExchangeRepository.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// One logged exchange. `payload` is the raw text exactly as generated; callers parse it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, sqlx::FromRow)]
pub struct ExchangeRecord {
    pub id: String,
    /// Version tag of the scheme that produced `question`, so old rows never match new keys.
    pub key_scheme: String,
    pub question: String,
    pub payload: String,
    pub created_at: DateTime<Utc>,
}

impl ExchangeRecord {
    /// Creates a new record with a generated UUID and current timestamp.
    pub fn new(
        key_scheme: impl Into<String>,
        question: impl Into<String>,
        payload: impl Into<String>,
    ) -> Self {
        Self {
            id: Uuid::new_v4().to_string(),
            key_scheme: key_scheme.into(),
            question: question.into(),
            payload: payload.into(),
            created_at: Utc::now(),
        }
    }
}

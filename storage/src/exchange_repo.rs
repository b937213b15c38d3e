//! Exchange repository: append-only log of generated recommendations.
//!
//! Uses SqlitePoolManager and ExchangeRecord.
//! External: SQLite via sqlx; callers use append/find_latest/list_all_newest_first/count.

use crate::error::StorageError;
use crate::models::ExchangeRecord;
use crate::sqlite_pool::SqlitePoolManager;
use tracing::{debug, info};

#[derive(Clone)]
pub struct ExchangeRepository {
    pool_manager: SqlitePoolManager,
}

impl ExchangeRepository {
    pub async fn new(database_url: &str) -> Result<Self, StorageError> {
        let pool_manager = SqlitePoolManager::new(database_url).await?;
        let repo = Self { pool_manager };
        repo.init().await?;
        Ok(repo)
    }

    async fn init(&self) -> Result<(), StorageError> {
        info!("Creating database tables if not exist");

        let pool = self.pool_manager.pool();

        sqlx::query(
            r#"
            CREATE TABLE IF NOT EXISTS exchanges (
                id TEXT PRIMARY KEY,
                key_scheme TEXT NOT NULL,
                question TEXT NOT NULL,
                payload TEXT NOT NULL,
                created_at TEXT NOT NULL
            )
            "#,
        )
        .execute(pool)
        .await?;

        sqlx::query(
            "CREATE INDEX IF NOT EXISTS idx_exchanges_lookup ON exchanges(key_scheme, question)",
        )
        .execute(pool)
        .await?;

        sqlx::query("CREATE INDEX IF NOT EXISTS idx_exchanges_created_at ON exchanges(created_at)")
            .execute(pool)
            .await?;

        info!("Database tables created successfully");
        Ok(())
    }

    /// Appends one row. Rows are never updated or deleted.
    pub async fn append(&self, record: &ExchangeRecord) -> Result<(), StorageError> {
        if record.question.trim().is_empty() {
            return Err(StorageError::InvalidRecord(
                "question must not be empty".to_string(),
            ));
        }
        let pool = self.pool_manager.pool();

        sqlx::query(
            r#"
            INSERT INTO exchanges (id, key_scheme, question, payload, created_at)
            VALUES (?, ?, ?, ?, ?)
            "#,
        )
        .bind(&record.id)
        .bind(&record.key_scheme)
        .bind(&record.question)
        .bind(&record.payload)
        .bind(record.created_at)
        .execute(pool)
        .await?;

        info!(
            id = %record.id,
            key_scheme = %record.key_scheme,
            question = %record.question,
            "Saved exchange"
        );
        Ok(())
    }

    /// Most recent row for an exact `(key_scheme, question)` match.
    pub async fn find_latest(
        &self,
        key_scheme: &str,
        question: &str,
    ) -> Result<Option<ExchangeRecord>, StorageError> {
        let pool = self.pool_manager.pool();

        let record = sqlx::query_as::<_, ExchangeRecord>(
            r#"
            SELECT id, key_scheme, question, payload, created_at FROM exchanges
            WHERE key_scheme = ? AND question = ?
            ORDER BY created_at DESC, rowid DESC
            LIMIT 1
            "#,
        )
        .bind(key_scheme)
        .bind(question)
        .fetch_optional(pool)
        .await?;

        debug!(key_scheme, question, hit = record.is_some(), "Exchange lookup");
        Ok(record)
    }

    /// Every row, newest first. Rows written within the same instant keep insertion order
    /// reversed.
    pub async fn list_all_newest_first(&self) -> Result<Vec<ExchangeRecord>, StorageError> {
        let pool = self.pool_manager.pool();

        let records = sqlx::query_as::<_, ExchangeRecord>(
            r#"
            SELECT id, key_scheme, question, payload, created_at FROM exchanges
            ORDER BY created_at DESC, rowid DESC
            "#,
        )
        .fetch_all(pool)
        .await?;

        info!("Retrieved {} exchanges", records.len());
        Ok(records)
    }

    pub async fn count(&self) -> Result<i64, StorageError> {
        let pool = self.pool_manager.pool();
        let total: (i64,) = sqlx::query_as("SELECT COUNT(*) FROM exchanges")
            .fetch_one(pool)
            .await?;
        Ok(total.0)
    }
}

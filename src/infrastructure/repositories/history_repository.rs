use crate::infrastructure::db::DbPool;
use crate::{domain::history::HistoryRecord, error::AppResult};
use async_trait::async_trait;
use std::sync::Arc;

/// Repository for synthesis history records.
#[async_trait]
pub trait HistoryRepository: Send + Sync {
    /// Insert a new record
    async fn create(&self, record: &HistoryRecord) -> AppResult<()>;

    /// List records newest first, optionally only those of one caller
    async fn list(&self, caller_id: Option<&str>, limit: i64) -> AppResult<Vec<HistoryRecord>>;
}

pub struct PgHistoryRepository {
    pool: Arc<DbPool>,
}

impl PgHistoryRepository {
    pub fn new(pool: Arc<DbPool>) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl HistoryRepository for PgHistoryRepository {
    async fn create(&self, record: &HistoryRecord) -> AppResult<()> {
        let pool = self.pool.as_ref();

        sqlx::query(
            r#"
            INSERT INTO history (id, text, audio_url, caller_id, language, status, created_at)
            VALUES ($1, $2, $3, $4, $5, $6, $7)
            "#,
        )
        .bind(record.id)
        .bind(&record.text)
        .bind(&record.audio_url)
        .bind(&record.caller_id)
        .bind(&record.language)
        .bind(record.status)
        .bind(record.created_at)
        .execute(pool)
        .await?;

        Ok(())
    }

    async fn list(&self, caller_id: Option<&str>, limit: i64) -> AppResult<Vec<HistoryRecord>> {
        let pool = self.pool.as_ref();
        let records = sqlx::query_as::<_, HistoryRecord>(
            r#"
            SELECT id, text, audio_url, caller_id, language, status, created_at
            FROM history
            WHERE $1::text IS NULL OR caller_id = $1
            ORDER BY created_at DESC
            LIMIT $2
            "#,
        )
        .bind(caller_id)
        .bind(limit)
        .fetch_all(pool)
        .await?;

        Ok(records)
    }
}

use crate::domain::history::HistoryRecord;
use crate::error::AppResult;
use crate::infrastructure::db::DbPool;
use async_trait::async_trait;
use std::sync::Arc;
use uuid::Uuid;

/// Persistence seam for conversion-history records. One store collection,
/// newest-first reads, delete-by-id reporting whether anything matched.
#[async_trait]
pub trait HistoryRepository: Send + Sync {
    async fn insert(&self, record: &HistoryRecord) -> AppResult<()>;

    /// Records sorted by timestamp descending, capped at `limit`.
    async fn find_recent(&self, limit: i64) -> AppResult<Vec<HistoryRecord>>;

    /// Returns true if a record was removed, false if none matched.
    async fn delete_by_id(&self, id: Uuid) -> AppResult<bool>;
}

pub struct PostgresHistoryRepository {
    pool: Arc<DbPool>,
}

impl PostgresHistoryRepository {
    pub fn new(pool: Arc<DbPool>) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl HistoryRepository for PostgresHistoryRepository {
    async fn insert(&self, record: &HistoryRecord) -> AppResult<()> {
        let pool = self.pool.as_ref();

        sqlx::query(
            r#"
            INSERT INTO tts_history (id, text, voice, speed, created_at, duration)
            VALUES ($1, $2, $3, $4, $5, $6)
            "#,
        )
        .bind(record.id)
        .bind(&record.text)
        .bind(&record.voice)
        .bind(record.speed)
        .bind(record.timestamp)
        .bind(record.duration)
        .execute(pool)
        .await?;

        Ok(())
    }

    async fn find_recent(&self, limit: i64) -> AppResult<Vec<HistoryRecord>> {
        let pool = self.pool.as_ref();
        let records = sqlx::query_as::<_, HistoryRecord>(
            r#"
            SELECT id, text, voice, speed, created_at, duration
            FROM tts_history
            ORDER BY created_at DESC
            LIMIT $1
            "#,
        )
        .bind(limit)
        .fetch_all(pool)
        .await?;

        Ok(records)
    }

    async fn delete_by_id(&self, id: Uuid) -> AppResult<bool> {
        let pool = self.pool.as_ref();
        let result = sqlx::query(
            r#"
            DELETE FROM tts_history
            WHERE id = $1
            "#,
        )
        .bind(id)
        .execute(pool)
        .await?;

        Ok(result.rows_affected() > 0)
    }
}

use super::model::HistoryRecord;
use crate::domain::tts::Voice;
use crate::error::AppResult;
use crate::infrastructure::repositories::HistoryRepository;
use chrono::Utc;
use std::sync::Arc;
use uuid::Uuid;

pub const DEFAULT_LIST_LIMIT: i64 = 50;

/// CRUD over conversion-history records. Saving is always an explicit client
/// action; nothing here is triggered by synthesis.
pub struct HistoryService {
    history_repo: Arc<dyn HistoryRepository>,
}

impl HistoryService {
    pub fn new(history_repo: Arc<dyn HistoryRepository>) -> Self {
        Self { history_repo }
    }

    /// Persist a new record. Id and timestamp are generated server-side.
    pub async fn save(
        &self,
        text: String,
        voice: Voice,
        speed: f64,
        duration: Option<f64>,
    ) -> AppResult<HistoryRecord> {
        let record = HistoryRecord {
            id: Uuid::new_v4(),
            text,
            voice: voice.as_str().to_string(),
            speed,
            timestamp: Utc::now(),
            duration,
        };

        self.history_repo.insert(&record).await?;

        tracing::info!(
            history_id = %record.id,
            voice = %record.voice,
            text_length = record.text.len(),
            "history record saved"
        );

        Ok(record)
    }

    /// Newest-first listing, capped at `limit`.
    pub async fn list(&self, limit: i64) -> AppResult<Vec<HistoryRecord>> {
        self.history_repo.find_recent(limit).await
    }

    /// Returns whether a record was actually removed. A miss is not an
    /// error at this layer.
    pub async fn delete(&self, id: Uuid) -> AppResult<bool> {
        let removed = self.history_repo.delete_by_id(id).await?;
        if removed {
            tracing::info!(history_id = %id, "history record deleted");
        }
        Ok(removed)
    }
}

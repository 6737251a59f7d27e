use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

/// One saved conversion. Immutable once created except for deletion.
/// `duration` is a caller-supplied estimate in seconds, never derived from
/// the audio itself.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct HistoryRecord {
    pub id: Uuid,
    pub text: String,
    pub voice: String,
    pub speed: f64,
    #[sqlx(rename = "created_at")]
    pub timestamp: DateTime<Utc>,
    pub duration: Option<f64>,
}

use axum::{
    extract::{Path, Query, State},
    Json,
};
use serde::Deserialize;
use serde_json::{json, Value};
use std::sync::Arc;
use uuid::Uuid;

use crate::{
    domain::{
        history::{CreateHistoryRequest, HistoryRecord, HistoryService, DEFAULT_LIST_LIMIT},
        tts::{MAX_SPEED, MIN_SPEED},
    },
    error::{AppError, AppResult},
};

const MAX_LIST_LIMIT: i64 = 100;

#[derive(Debug, Deserialize)]
pub struct ListParams {
    pub limit: Option<i64>,
}

pub struct HistoryController {
    history_service: Arc<HistoryService>,
}

impl HistoryController {
    pub fn new(history_service: Arc<HistoryService>) -> Self {
        Self { history_service }
    }

    /// POST /api/tts/history - Save one conversion record
    pub async fn save(
        State(controller): State<Arc<HistoryController>>,
        Json(request): Json<CreateHistoryRequest>,
    ) -> AppResult<Json<HistoryRecord>> {
        if request.text.trim().is_empty() {
            return Err(AppError::BadRequest("Text cannot be empty".to_string()));
        }

        let speed_range = f64::from(MIN_SPEED)..=f64::from(MAX_SPEED);
        if !speed_range.contains(&request.speed) {
            return Err(AppError::BadRequest(format!(
                "Speed must be between {} and {}",
                MIN_SPEED, MAX_SPEED
            )));
        }

        let record = controller
            .history_service
            .save(request.text, request.voice, request.speed, request.duration)
            .await?;

        Ok(Json(record))
    }

    /// GET /api/tts/history - Recent conversions, newest first
    pub async fn list(
        State(controller): State<Arc<HistoryController>>,
        Query(params): Query<ListParams>,
    ) -> AppResult<Json<Vec<HistoryRecord>>> {
        let limit = params
            .limit
            .unwrap_or(DEFAULT_LIST_LIMIT)
            .clamp(1, MAX_LIST_LIMIT);

        let records = controller.history_service.list(limit).await?;
        Ok(Json(records))
    }

    /// DELETE /api/tts/history/:historyId - Remove one record
    pub async fn delete(
        State(controller): State<Arc<HistoryController>>,
        Path(history_id): Path<String>,
    ) -> AppResult<Json<Value>> {
        // Malformed ids cannot match any record, so they read as absent.
        let id = Uuid::parse_str(&history_id)
            .map_err(|_| AppError::NotFound("History item not found".to_string()))?;

        let removed = controller.history_service.delete(id).await?;
        if !removed {
            return Err(AppError::NotFound("History item not found".to_string()));
        }

        Ok(Json(json!({ "message": "History item deleted" })))
    }
}

use axum::{
    body::Body,
    extract::State,
    http::{header, HeaderMap, StatusCode},
    Json,
};
use std::sync::Arc;

use crate::{
    domain::tts::{GenerateRequest, TtsService, VoicesResponse, MAX_SPEED, MIN_SPEED},
    error::{AppError, AppResult},
};

pub struct TtsController {
    tts_service: Arc<TtsService>,
    max_text_chars: usize,
}

impl TtsController {
    pub fn new(tts_service: Arc<TtsService>, max_text_chars: usize) -> Self {
        Self {
            tts_service,
            max_text_chars,
        }
    }

    /// GET /api/tts/voices - List available voices and ranges
    pub async fn voices(
        State(_controller): State<Arc<TtsController>>,
    ) -> Json<VoicesResponse> {
        Json(VoicesResponse::catalog())
    }

    /// POST /api/tts/generate - Convert text to a single audio payload
    pub async fn generate(
        State(controller): State<Arc<TtsController>>,
        Json(request): Json<GenerateRequest>,
    ) -> AppResult<(StatusCode, HeaderMap, Body)> {
        // Validate input before the pipeline runs
        if request.text.trim().is_empty() {
            return Err(AppError::BadRequest("Text cannot be empty".to_string()));
        }

        if request.text.len() > controller.max_text_chars {
            return Err(AppError::PayloadTooLarge(format!(
                "Text must be {} characters or less",
                controller.max_text_chars
            )));
        }

        if !(MIN_SPEED..=MAX_SPEED).contains(&request.speed) {
            return Err(AppError::BadRequest(format!(
                "Speed must be between {} and {}",
                MIN_SPEED, MAX_SPEED
            )));
        }

        let audio = controller
            .tts_service
            .generate(&request.text, request.voice, request.speed)
            .await
            .map_err(AppError::from)?;

        let mut headers = HeaderMap::new();
        headers.insert(header::CONTENT_TYPE, "audio/mpeg".parse().unwrap());
        headers.insert(
            header::CONTENT_DISPOSITION,
            "attachment; filename=synthese_vocale.mp3".parse().unwrap(),
        );
        headers.insert(
            header::CONTENT_LENGTH,
            audio.len().to_string().parse().unwrap(),
        );

        Ok((StatusCode::OK, headers, Body::from(audio)))
    }
}

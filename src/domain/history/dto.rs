use crate::domain::tts::Voice;
use serde::{Deserialize, Serialize};

/// Request for POST /api/tts/history
#[derive(Debug, Serialize, Deserialize)]
pub struct CreateHistoryRequest {
    pub text: String,
    pub voice: Voice,
    pub speed: f64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub duration: Option<f64>,
}

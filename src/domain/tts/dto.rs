use super::voice::{Voice, DEFAULT_SPEED, MAX_SPEED, MIN_SPEED};
use serde::{Deserialize, Serialize};

/// Request for POST /api/tts/generate
#[derive(Debug, Serialize, Deserialize)]
pub struct GenerateRequest {
    pub text: String,
    #[serde(default)]
    pub voice: Voice,
    #[serde(default = "default_speed")]
    pub speed: f32,
}

fn default_speed() -> f32 {
    DEFAULT_SPEED
}

/// Response for GET /api/tts/voices
#[derive(Debug, Serialize)]
pub struct VoicesResponse {
    pub voices: Vec<VoiceInfo>,
    pub formats: Vec<&'static str>,
    pub speed_range: SpeedRange,
}

#[derive(Debug, Serialize)]
pub struct VoiceInfo {
    pub id: &'static str,
    pub name: &'static str,
    pub description: &'static str,
}

#[derive(Debug, Serialize)]
pub struct SpeedRange {
    pub min: f32,
    pub max: f32,
    pub default: f32,
}

impl VoicesResponse {
    pub fn catalog() -> Self {
        VoicesResponse {
            voices: Voice::all()
                .iter()
                .map(|v| VoiceInfo {
                    id: v.as_str(),
                    name: v.display_name(),
                    description: v.description(),
                })
                .collect(),
            formats: vec!["mp3"],
            speed_range: SpeedRange {
                min: MIN_SPEED,
                max: MAX_SPEED,
                default: DEFAULT_SPEED,
            },
        }
    }
}

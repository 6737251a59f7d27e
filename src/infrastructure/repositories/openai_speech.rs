use super::speech_synthesizer::SpeechSynthesizer;
use crate::domain::tts::{SynthesisError, Voice};
use async_openai::{
    config::OpenAIConfig,
    error::OpenAIError,
    types::{CreateSpeechRequest, SpeechModel, Voice as OpenAiVoice},
    Client,
};
use async_trait::async_trait;
use std::sync::Arc;

/// OpenAI caps speech input at 4096 characters per request
const PROVIDER_MAX_INPUT_CHARS: usize = 4096;

/// OpenAI implementation of the speech synthesizer
pub struct OpenAiSpeechSynthesizer {
    client: Arc<Client<OpenAIConfig>>,
    model: String,
}

impl OpenAiSpeechSynthesizer {
    pub fn new(client: Arc<Client<OpenAIConfig>>, model: String) -> Self {
        Self { client, model }
    }

    fn speech_model(&self) -> SpeechModel {
        match self.model.as_str() {
            "tts-1" => SpeechModel::Tts1,
            "tts-1-hd" => SpeechModel::Tts1Hd,
            other => SpeechModel::Other(other.to_string()),
        }
    }
}

fn provider_voice(voice: Voice) -> OpenAiVoice {
    match voice {
        Voice::Alloy => OpenAiVoice::Alloy,
        Voice::Echo => OpenAiVoice::Echo,
        Voice::Fable => OpenAiVoice::Fable,
        Voice::Onyx => OpenAiVoice::Onyx,
        Voice::Nova => OpenAiVoice::Nova,
        Voice::Shimmer => OpenAiVoice::Shimmer,
    }
}

/// Map the provider SDK error onto the closed synthesis taxonomy.
fn classify_error(err: OpenAIError) -> SynthesisError {
    match err {
        OpenAIError::Reqwest(e) => SynthesisError::Unreachable(e.to_string()),
        OpenAIError::ApiError(api) => {
            let kind = api.r#type.clone().unwrap_or_default();
            classify_api_error(&kind, &api.message)
        }
        other => SynthesisError::Unknown(other.to_string()),
    }
}

fn classify_api_error(kind: &str, message: &str) -> SynthesisError {
    let lowered = message.to_lowercase();
    if kind.contains("rate_limit")
        || kind == "insufficient_quota"
        || kind == "requests"
        || kind == "tokens"
        || lowered.contains("rate limit")
        || lowered.contains("quota")
    {
        SynthesisError::RateLimited(message.to_string())
    } else if kind.contains("authentication") || lowered.contains("api key") {
        SynthesisError::Unauthorized(message.to_string())
    } else {
        SynthesisError::Provider(message.to_string())
    }
}

#[async_trait]
impl SpeechSynthesizer for OpenAiSpeechSynthesizer {
    async fn synthesize(
        &self,
        text: &str,
        voice: Voice,
        speed: f32,
    ) -> Result<Vec<u8>, SynthesisError> {
        tracing::info!(
            model = %self.model,
            voice = %voice,
            speed = speed,
            text_length = text.len(),
            "Calling OpenAI TTS API"
        );

        if text.len() > PROVIDER_MAX_INPUT_CHARS {
            // Oversized single sentences slip past the chunker by design;
            // the provider decides whether to reject them.
            tracing::warn!(
                text_length = text.len(),
                provider_limit = PROVIDER_MAX_INPUT_CHARS,
                "text exceeds provider per-call limit"
            );
        }

        let request = CreateSpeechRequest {
            model: self.speech_model(),
            input: text.to_string(),
            voice: provider_voice(voice),
            response_format: None, // Defaults to MP3
            speed: Some(speed),
        };

        let response = self
            .client
            .audio()
            .speech(request)
            .await
            .map_err(|e| {
                tracing::error!(
                    error = %e,
                    model = %self.model,
                    voice = %voice,
                    text_length = text.len(),
                    "OpenAI TTS API call failed"
                );
                classify_error(e)
            })?;

        let audio_bytes = response.bytes.to_vec();
        tracing::debug!(
            audio_size = audio_bytes.len(),
            "OpenAI TTS audio received successfully"
        );

        Ok(audio_bytes)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_classify_rate_limit_by_type() {
        let err = classify_api_error("insufficient_quota", "You exceeded your current quota");
        assert!(matches!(err, SynthesisError::RateLimited(_)));
    }

    #[test]
    fn test_classify_rate_limit_by_message() {
        let err = classify_api_error(
            "invalid_request_error",
            "Rate limit reached for requests",
        );
        assert!(matches!(err, SynthesisError::RateLimited(_)));
    }

    #[test]
    fn test_classify_authentication_failure() {
        let err = classify_api_error(
            "invalid_request_error",
            "Incorrect API key provided: sk-***",
        );
        assert!(matches!(err, SynthesisError::Unauthorized(_)));
    }

    #[test]
    fn test_classify_other_api_errors_as_provider() {
        let err = classify_api_error("server_error", "The server had an error");
        assert!(matches!(err, SynthesisError::Provider(_)));
    }
}

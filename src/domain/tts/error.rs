use crate::error::AppError;
use crate::infrastructure::audio::AudioError;

/// Closed taxonomy of synthesis failures. Every call site handles each kind
/// explicitly; no retry or backoff happens below the HTTP boundary.
#[derive(Debug, thiserror::Error)]
pub enum SynthesisError {
    #[error("provider rate limit exceeded: {0}")]
    RateLimited(String),
    #[error("provider authentication failed: {0}")]
    Unauthorized(String),
    #[error("provider unreachable: {0}")]
    Unreachable(String),
    #[error("provider error: {0}")]
    Provider(String),
    #[error("unexpected synthesis failure: {0}")]
    Unknown(String),
}

/// Failures surfaced by the generation pipeline.
#[derive(Debug, thiserror::Error)]
pub enum TtsError {
    #[error(transparent)]
    Synthesis(#[from] SynthesisError),
    #[error(transparent)]
    Audio(#[from] AudioError),
}

impl From<TtsError> for AppError {
    fn from(err: TtsError) -> Self {
        match err {
            TtsError::Synthesis(SynthesisError::RateLimited(msg)) => AppError::RateLimited(msg),
            TtsError::Synthesis(SynthesisError::Unauthorized(msg)) => AppError::Unauthorized(msg),
            TtsError::Synthesis(SynthesisError::Unreachable(msg)) => {
                AppError::ServiceUnavailable(msg)
            }
            TtsError::Synthesis(SynthesisError::Provider(msg)) => AppError::ExternalService(msg),
            TtsError::Synthesis(SynthesisError::Unknown(msg)) => AppError::Internal(msg),
            TtsError::Audio(e) => AppError::Internal(e.to_string()),
        }
    }
}

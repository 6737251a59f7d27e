use crate::domain::tts::{SynthesisError, Voice};
use async_trait::async_trait;

/// Seam for the remote text-to-speech capability.
///
/// Implementations make exactly one outbound call per invocation: no retry,
/// no caching, no batching across calls. Failures map onto the closed
/// [`SynthesisError`] taxonomy so every caller handles each kind explicitly.
#[async_trait]
pub trait SpeechSynthesizer: Send + Sync {
    /// Synthesize one piece of text into MP3 bytes.
    ///
    /// `text` is expected to fit the provider's per-call limit; the chunker
    /// upstream is responsible for that (best effort for pathological
    /// single-sentence input).
    async fn synthesize(
        &self,
        text: &str,
        voice: Voice,
        speed: f32,
    ) -> Result<Vec<u8>, SynthesisError>;
}

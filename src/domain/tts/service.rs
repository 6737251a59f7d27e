use super::chunker;
use super::error::TtsError;
use super::voice::Voice;
use crate::infrastructure::audio::SegmentAssembler;
use crate::infrastructure::repositories::SpeechSynthesizer;
use std::sync::Arc;

/// Orchestrates one text-to-speech request: fast path for short text,
/// chunk → synthesize → assemble for long text. No cross-request state.
pub struct TtsService {
    synthesizer: Arc<dyn SpeechSynthesizer>,
    assembler: SegmentAssembler,
    chunk_max_chars: usize,
}

impl TtsService {
    pub fn new(synthesizer: Arc<dyn SpeechSynthesizer>, chunk_max_chars: usize) -> Self {
        Self {
            synthesizer,
            assembler: SegmentAssembler::new(),
            chunk_max_chars,
        }
    }

    /// Generate a single MP3 payload for the given text.
    ///
    /// Short text (within the chunk budget) goes straight to the provider and
    /// its bytes are returned untouched. Longer text is split, synthesized
    /// chunk by chunk in order, and the segments are re-encoded into one
    /// stream. Chunk synthesis is strictly sequential; the first failure
    /// aborts the request with no partial audio.
    pub async fn generate(
        &self,
        text: &str,
        voice: Voice,
        speed: f32,
    ) -> Result<Vec<u8>, TtsError> {
        tracing::info!(
            voice = %voice,
            speed = speed,
            text_length = text.len(),
            "TTS generation request"
        );

        // Fast path: no chunking, provider bytes pass through verbatim.
        if text.len() <= self.chunk_max_chars {
            let audio = self.synthesizer.synthesize(text, voice, speed).await?;
            tracing::info!(audio_size = audio.len(), "audio generated in a single call");
            return Ok(audio);
        }

        // 1. Split into provider-safe chunks.
        let chunks = chunker::split(text, self.chunk_max_chars);
        tracing::info!(
            chunk_count = chunks.len(),
            text_length = text.len(),
            "text split into chunks"
        );

        // 2. Synthesize each chunk in order. Sequential on purpose: bounds
        //    outbound concurrency to one call per in-flight request and keeps
        //    segment order identical to text order.
        let mut segments = Vec::with_capacity(chunks.len());
        for (index, chunk) in chunks.iter().enumerate() {
            tracing::info!(
                chunk_index = index,
                chunk_size = chunk.len(),
                "synthesizing chunk"
            );
            let audio = self.synthesizer.synthesize(chunk, voice, speed).await?;
            segments.push(audio);
        }

        // 3. Concatenate the segments into one stream.
        let assembled = self.assembler.assemble(segments)?;
        tracing::info!(
            chunk_count = chunks.len(),
            audio_size = assembled.len(),
            "segments assembled"
        );

        Ok(assembled)
    }
}

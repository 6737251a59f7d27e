// End-to-end pipeline tests driven through an in-process scripted
// synthesizer: no network, no provider credential, no database.

use async_trait::async_trait;
use pretty_assertions::assert_eq;
use std::sync::{Arc, Mutex};
use vocalize_backend::domain::tts::{SynthesisError, TtsError, TtsService, Voice};
use vocalize_backend::infrastructure::audio::encode_mp3;
use vocalize_backend::infrastructure::repositories::SpeechSynthesizer;

const CHUNK_BUDGET: usize = 4000;
const RAW_RESPONSE: &[u8] = b"provider-raw-bytes";

/// Records every synthesize call and answers from a script: raw marker bytes
/// for fast-path checks, real MP3 frames when the assembler must run, or a
/// failure at a chosen call index.
struct ScriptedSynthesizer {
    calls: Mutex<Vec<String>>,
    fail_at_call: Option<usize>,
    produce_mp3: bool,
}

impl ScriptedSynthesizer {
    fn raw() -> Self {
        Self {
            calls: Mutex::new(Vec::new()),
            fail_at_call: None,
            produce_mp3: false,
        }
    }

    fn mp3() -> Self {
        Self {
            calls: Mutex::new(Vec::new()),
            fail_at_call: None,
            produce_mp3: true,
        }
    }

    fn failing_at(index: usize) -> Self {
        Self {
            calls: Mutex::new(Vec::new()),
            fail_at_call: Some(index),
            produce_mp3: true,
        }
    }

    fn call_count(&self) -> usize {
        self.calls.lock().unwrap().len()
    }

    fn calls(&self) -> Vec<String> {
        self.calls.lock().unwrap().clone()
    }

    fn tone_segment() -> Vec<u8> {
        let samples: Vec<i16> = (0..12_000)
            .map(|i| {
                let t = i as f32 / 24_000.0;
                ((t * 440.0 * 2.0 * std::f32::consts::PI).sin() * 8000.0) as i16
            })
            .collect();
        encode_mp3(&samples, 24_000).unwrap()
    }
}

#[async_trait]
impl SpeechSynthesizer for ScriptedSynthesizer {
    async fn synthesize(
        &self,
        text: &str,
        _voice: Voice,
        _speed: f32,
    ) -> Result<Vec<u8>, SynthesisError> {
        let index = {
            let mut calls = self.calls.lock().unwrap();
            calls.push(text.to_string());
            calls.len() - 1
        };

        if self.fail_at_call == Some(index) {
            return Err(SynthesisError::RateLimited(
                "scripted rate limit".to_string(),
            ));
        }

        if self.produce_mp3 {
            Ok(Self::tone_segment())
        } else {
            Ok(RAW_RESPONSE.to_vec())
        }
    }
}

fn three_paragraph_text() -> String {
    let mut paragraphs = Vec::new();
    for i in 0..3 {
        let sentence = format!("Paragraph {} keeps going with steady sentences. ", i);
        paragraphs.push(sentence.repeat(62).trim_end().to_string());
    }
    paragraphs.join("\n\n")
}

#[tokio::test]
async fn it_should_take_the_fast_path_for_short_text() {
    let synthesizer = Arc::new(ScriptedSynthesizer::raw());
    let service = TtsService::new(synthesizer.clone(), CHUNK_BUDGET);

    // 3900 characters: under the budget, no chunking, no re-encoding.
    let text = "A steady sentence of speech. ".repeat(134);
    assert!(text.len() <= CHUNK_BUDGET);

    let audio = service
        .generate(&text, Voice::Onyx, 1.0)
        .await
        .expect("fast path should succeed");

    assert_eq!(synthesizer.call_count(), 1);
    assert_eq!(audio, RAW_RESPONSE.to_vec());
    assert_eq!(synthesizer.calls()[0], text);
}

#[tokio::test]
async fn it_should_synthesize_long_text_as_three_ordered_chunks() {
    let synthesizer = Arc::new(ScriptedSynthesizer::mp3());
    let service = TtsService::new(synthesizer.clone(), CHUNK_BUDGET);

    let text = three_paragraph_text();
    assert!(text.len() > 8000, "text length {}", text.len());

    let audio = service
        .generate(&text, Voice::Alloy, 1.0)
        .await
        .expect("chunked generation should succeed");

    let calls = synthesizer.calls();
    assert_eq!(calls.len(), 3);
    for (i, call) in calls.iter().enumerate() {
        assert!(
            call.starts_with(&format!("Paragraph {}", i)),
            "chunk {} out of order: {:?}",
            i,
            &call[..40]
        );
        assert!(call.len() <= CHUNK_BUDGET);
    }

    // One assembled stream, larger than any single scripted segment.
    assert!(audio.len() > ScriptedSynthesizer::tone_segment().len());
}

#[tokio::test]
async fn it_should_abort_on_the_first_failing_chunk() {
    let synthesizer = Arc::new(ScriptedSynthesizer::failing_at(1));
    let service = TtsService::new(synthesizer.clone(), CHUNK_BUDGET);

    let result = service
        .generate(&three_paragraph_text(), Voice::Nova, 1.0)
        .await;

    match result {
        Err(TtsError::Synthesis(SynthesisError::RateLimited(_))) => {}
        other => panic!("expected rate-limited error, got {:?}", other.err()),
    }

    // Calls stop at the failing index: chunk 0 succeeded, chunk 1 failed,
    // chunk 2 was never attempted.
    assert_eq!(synthesizer.call_count(), 2);
}

#[tokio::test]
async fn it_should_propagate_fast_path_errors_unchanged() {
    let synthesizer = Arc::new(ScriptedSynthesizer::failing_at(0));
    let service = TtsService::new(synthesizer.clone(), CHUNK_BUDGET);

    let result = service.generate("Short text.", Voice::Echo, 1.0).await;

    assert!(matches!(
        result,
        Err(TtsError::Synthesis(SynthesisError::RateLimited(_)))
    ));
    assert_eq!(synthesizer.call_count(), 1);
}

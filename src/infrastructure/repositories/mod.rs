pub mod history_repository;
pub mod openai_speech;
pub mod speech_synthesizer;

pub use history_repository::{HistoryRepository, PostgresHistoryRepository};
pub use openai_speech::OpenAiSpeechSynthesizer;
pub use speech_synthesizer::SpeechSynthesizer;

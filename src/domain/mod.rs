pub mod history;
pub mod tts;

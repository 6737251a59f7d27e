pub mod chunker;
pub mod dto;
pub mod error;
pub mod service;
pub mod voice;

pub use dto::{GenerateRequest, VoicesResponse};
pub use error::{SynthesisError, TtsError};
pub use service::TtsService;
pub use voice::{Voice, DEFAULT_SPEED, MAX_SPEED, MIN_SPEED};

pub mod dto;
pub mod error;
pub mod service;
pub mod voice;

pub use dto::{SpeechRequest, SpeechResponse};
pub use error::SpeechServiceError;
pub use service::{SpeechService, SpeechServiceApi, SpeechSettings, SpeechSynthesisResult};
pub use voice::{find_voice, is_valid_voice_id, VoiceOption, VOICE_OPTIONS};

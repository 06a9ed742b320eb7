pub mod audio_repository;
pub mod elevenlabs_synthesis_repository;
pub mod history_repository;
pub mod synthesis_repository;

pub use audio_repository::{AudioRepository, ObjectStoreAudioRepository};
pub use elevenlabs_synthesis_repository::ElevenLabsSynthesisRepository;
pub use history_repository::{HistoryRepository, PgHistoryRepository};
pub use synthesis_repository::SynthesisRepository;

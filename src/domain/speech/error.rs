use crate::error::AppError;

#[derive(Debug, thiserror::Error)]
pub enum SpeechServiceError {
    #[error("invalid input: {0}")]
    Invalid(String),
    #[error("not configured: {0}")]
    Configuration(String),
    #[error("synthesis error: {0}")]
    Synthesis(String),
    #[error("storage error: {0}")]
    Storage(String),
}

impl From<SpeechServiceError> for AppError {
    fn from(err: SpeechServiceError) -> Self {
        match err {
            SpeechServiceError::Invalid(msg) => AppError::BadRequest(msg),
            SpeechServiceError::Configuration(msg) => AppError::Configuration(msg),
            SpeechServiceError::Synthesis(msg) => AppError::Synthesis(msg),
            SpeechServiceError::Storage(msg) => AppError::Storage(msg),
        }
    }
}

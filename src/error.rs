use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::{Deserialize, Serialize};

/// Main application error type
#[derive(Debug, thiserror::Error)]
pub enum AppError {
    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),

    #[error("Invalid input: {0}")]
    BadRequest(String),

    #[error("Service is not configured: {0}")]
    Configuration(String),

    #[error("Speech synthesis failed: {0}")]
    Synthesis(String),

    #[error("Audio storage failed: {0}")]
    Storage(String),

    #[error("Internal server error: {0}")]
    Internal(String),
}

/// Error response body.
///
/// `error` only appears on server errors and carries diagnostic detail that
/// callers must not depend on.
#[derive(Debug, Serialize, Deserialize)]
pub struct ErrorResponse {
    pub message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl AppError {
    /// Get the HTTP status code for this error
    pub fn status_code(&self) -> StatusCode {
        match self {
            Self::BadRequest(_) => StatusCode::BAD_REQUEST,
            Self::Database(_)
            | Self::Configuration(_)
            | Self::Synthesis(_)
            | Self::Storage(_)
            | Self::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    /// Stable, caller-facing message
    pub fn message(&self) -> String {
        match self {
            Self::BadRequest(msg) => msg.clone(),
            Self::Configuration(_) => "Speech service is not configured".to_string(),
            Self::Synthesis(_) => "Failed to synthesize speech".to_string(),
            Self::Storage(_) => "Failed to store audio".to_string(),
            Self::Database(_) | Self::Internal(_) => "Internal Server Error".to_string(),
        }
    }

    pub fn to_response(&self) -> ErrorResponse {
        let error = match self {
            Self::BadRequest(_) => None,
            _ => Some(self.to_string()),
        };

        ErrorResponse {
            message: self.message(),
            error,
        }
    }
}

/// Implement IntoResponse for automatic conversion in handlers
impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = self.status_code();
        if status.is_server_error() {
            tracing::error!(
                error = %self,
                status = %status.as_u16(),
                "Request failed"
            );
        } else {
            tracing::warn!(
                error = %self,
                status = %status.as_u16(),
                "Request rejected"
            );
        }

        (status, Json(self.to_response())).into_response()
    }
}

/// Custom result type for the application
pub type AppResult<T> = Result<T, AppError>;

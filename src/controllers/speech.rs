use axum::{extract::rejection::JsonRejection, extract::State, Json};
use std::sync::Arc;

use crate::{
    domain::speech::{SpeechRequest, SpeechResponse, SpeechService, SpeechServiceApi},
    error::{AppError, AppResult},
};

pub const SUCCESS_MESSAGE: &str = "Audio file saved.";

pub struct SpeechController {
    speech_service: Arc<SpeechService>,
}

impl SpeechController {
    pub fn new(speech_service: Arc<SpeechService>) -> Self {
        Self { speech_service }
    }

    /// POST /api/speech - Synthesize text and store the audio
    pub async fn synthesize(
        State(controller): State<Arc<SpeechController>>,
        payload: Result<Json<SpeechRequest>, JsonRejection>,
    ) -> AppResult<Json<SpeechResponse>> {
        let Json(request) = payload
            .map_err(|e| AppError::BadRequest(format!("Invalid request body: {}", e.body_text())))?;

        let result = controller.speech_service.synthesize(request).await?;

        Ok(Json(SpeechResponse {
            message: SUCCESS_MESSAGE.to_string(),
            url: result.url,
            signed_url: result.signed_url,
            history: result.history,
        }))
    }
}

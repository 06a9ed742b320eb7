use axum::{extract::State, Json};
use serde::Serialize;
use std::sync::Arc;

use crate::domain::speech::{VoiceOption, VOICE_OPTIONS};

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct VoicesResponse {
    pub default_voice_id: String,
    pub voices: Vec<VoiceOption>,
}

pub struct VoiceController {
    default_voice_id: String,
}

impl VoiceController {
    pub fn new(default_voice_id: String) -> Self {
        Self { default_voice_id }
    }

    /// GET /api/voices - List selectable voices
    pub async fn list_voices(State(controller): State<Arc<VoiceController>>) -> Json<VoicesResponse> {
        Json(VoicesResponse {
            default_voice_id: controller.default_voice_id.clone(),
            voices: VOICE_OPTIONS.to_vec(),
        })
    }
}

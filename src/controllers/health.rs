use axum::{extract::State, http::StatusCode, response::IntoResponse, Json};
use serde_json::json;
use std::sync::Arc;

use crate::infrastructure::db::{check_connection, DbPool};
use crate::infrastructure::repositories::{AudioRepository, SynthesisRepository};

/// Collaborators inspected by the readiness probe
pub struct HealthState {
    pub pool: Option<Arc<DbPool>>,
    pub synthesis_repo: Arc<dyn SynthesisRepository>,
    pub audio_repo: Arc<dyn AudioRepository>,
}

pub async fn health() -> impl IntoResponse {
    (StatusCode::OK, "OK")
}

pub async fn health_ready(State(state): State<Arc<HealthState>>) -> impl IntoResponse {
    let synthesis_ready = state.synthesis_repo.check_configured().is_ok();
    let storage_ready = state.audio_repo.check_configured().is_ok();

    let (database, database_ready) = match &state.pool {
        None => ("not_configured", true),
        Some(pool) => match check_connection(pool).await {
            Ok(_) => ("connected", true),
            Err(_) => ("disconnected", false),
        },
    };

    let ready = synthesis_ready && storage_ready && database_ready;
    let status = if ready {
        StatusCode::OK
    } else {
        StatusCode::SERVICE_UNAVAILABLE
    };

    (
        status,
        Json(json!({
            "status": if ready { "ready" } else { "not_ready" },
            "synthesis": if synthesis_ready { "configured" } else { "not_configured" },
            "storage": if storage_ready { "configured" } else { "not_configured" },
            "database": database,
        })),
    )
}

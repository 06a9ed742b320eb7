use axum::{
    extract::Request,
    middleware,
    routing::{get, post},
    Router,
};
use std::sync::Arc;
use tower_http::{cors::CorsLayer, trace::TraceLayer};
use tracing::info_span;

use crate::controllers::{
    health::{self, HealthState},
    history::HistoryController,
    speech::SpeechController,
    voices::VoiceController,
};
use crate::infrastructure::config::Config;
use crate::infrastructure::middleware::{request_id_middleware, RequestId};

/// Controllers and probe state the router is assembled from
pub struct AppControllers {
    pub health_state: Arc<HealthState>,
    pub speech_controller: Arc<SpeechController>,
    pub history_controller: Arc<HistoryController>,
    pub voice_controller: Arc<VoiceController>,
}

/// Build the application router.
///
/// The permissive CORS layer answers every OPTIONS preflight itself, before
/// any handler or validation runs, and stamps CORS headers on all responses.
/// The request id layer sits outside it so preflight responses get an id too.
pub fn create_router(controllers: AppControllers) -> Router {
    let trace_layer = TraceLayer::new_for_http().make_span_with(|request: &Request| {
        let request_id = request
            .extensions()
            .get::<RequestId>()
            .map(|id| id.0.as_str())
            .unwrap_or("-");
        info_span!(
            "http_request",
            method = %request.method(),
            uri = %request.uri(),
            request_id = %request_id
        )
    });

    let speech_routes = Router::new()
        .route("/api/speech", post(SpeechController::synthesize))
        .with_state(controllers.speech_controller);

    let history_routes = Router::new()
        .route("/api/history", get(HistoryController::list_history))
        .with_state(controllers.history_controller);

    let voice_routes = Router::new()
        .route("/api/voices", get(VoiceController::list_voices))
        .with_state(controllers.voice_controller);

    Router::new()
        .route("/health", get(health::health))
        .route("/health/ready", get(health::health_ready))
        .with_state(controllers.health_state)
        .merge(speech_routes)
        .merge(history_routes)
        .merge(voice_routes)
        .layer(CorsLayer::permissive())
        .layer(trace_layer)
        .layer(middleware::from_fn(request_id_middleware))
}

/// Start the HTTP server
pub async fn start_http_server(
    config: Arc<Config>,
    app: Router,
) -> Result<(), Box<dyn std::error::Error>> {
    let listener =
        tokio::net::TcpListener::bind(format!("{}:{}", config.host, config.port)).await?;

    tracing::info!("Server listening on {}", listener.local_addr()?);

    axum::serve(listener, app).await?;

    Ok(())
}

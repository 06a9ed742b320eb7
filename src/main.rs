use std::sync::Arc;
use std::time::Duration;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};
use speech_backend::controllers::{
    health::HealthState, history::HistoryController, speech::SpeechController,
    voices::VoiceController,
};
use speech_backend::domain::{
    history::HistoryService,
    speech::{SpeechService, SpeechSettings},
};
use speech_backend::infrastructure::config::{Config, LogFormat};
use speech_backend::infrastructure::db::{check_connection, create_pool, run_migrations};
use speech_backend::infrastructure::http::{create_router, start_http_server, AppControllers};
use speech_backend::infrastructure::repositories::{
    AudioRepository, ElevenLabsSynthesisRepository, HistoryRepository, ObjectStoreAudioRepository,
    PgHistoryRepository, SynthesisRepository,
};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Load configuration
    let config = Config::from_env()?;

    // Initialize logging
    init_logging(&config);

    tracing::info!(
        "Starting speech backend on {}:{}",
        config.host,
        config.port
    );
    tracing::debug!(config = ?config, "Configuration loaded");

    // Database is optional: without it history is simply not recorded
    let pool = match &config.database_url {
        Some(database_url) => {
            let pool = create_pool(database_url).await?;
            check_connection(&pool).await?;
            run_migrations(&pool).await?;
            tracing::info!("Database connection verified and migrations applied");
            Some(Arc::new(pool))
        }
        None => {
            tracing::warn!("DATABASE_URL not set, history recording is disabled");
            None
        }
    };

    if config.elevenlabs_api_key.is_none() {
        tracing::warn!("ELEVENLABS_API_KEY not set, speech requests will fail until it is configured");
    }

    // === DEPENDENCY INJECTION SETUP ===
    // 1. Instantiate repositories
    tracing::info!("Instantiating repositories...");
    let synthesis_repo: Arc<dyn SynthesisRepository> = Arc::new(ElevenLabsSynthesisRepository::new(
        config.elevenlabs_api_url.clone(),
        config.elevenlabs_api_key.clone(),
        Duration::from_secs(config.synthesis_timeout_secs),
    )?);

    let audio_repo: Arc<dyn AudioRepository> =
        match (&config.audio_bucket_name, config.public_base_url()) {
            (Some(bucket), Some(public_base_url)) => {
                tracing::info!(bucket = %bucket, region = %config.aws_region, "Using S3 audio storage");
                Arc::new(ObjectStoreAudioRepository::s3(bucket, &config.aws_region, public_base_url)?)
            }
            _ => {
                tracing::warn!("AUDIO_BUCKET_NAME not set, speech requests will fail until it is configured");
                Arc::new(ObjectStoreAudioRepository::unconfigured())
            }
        };

    let history_repo: Option<Arc<dyn HistoryRepository>> = pool
        .clone()
        .map(|pool| Arc::new(PgHistoryRepository::new(pool)) as Arc<dyn HistoryRepository>);

    // 2. Instantiate services
    tracing::info!("Instantiating services...");
    let speech_service = Arc::new(SpeechService::new(
        synthesis_repo.clone(),
        audio_repo.clone(),
        history_repo.clone(),
        SpeechSettings {
            default_voice_id: config.default_voice_id.clone(),
            default_language: config.default_language.clone(),
            signed_url_expiry: Duration::from_secs(config.signed_url_expiry_secs),
            require_caller_id: config.require_caller_id,
        },
    ));
    let history_service = Arc::new(HistoryService::new(history_repo));

    // 3. Instantiate controllers
    tracing::info!("Instantiating controllers...");
    let controllers = AppControllers {
        health_state: Arc::new(HealthState {
            pool,
            synthesis_repo,
            audio_repo,
        }),
        speech_controller: Arc::new(SpeechController::new(speech_service)),
        history_controller: Arc::new(HistoryController::new(history_service)),
        voice_controller: Arc::new(VoiceController::new(config.default_voice_id.clone())),
    };

    // Start HTTP server with all routes
    start_http_server(Arc::new(config), create_router(controllers)).await?;

    Ok(())
}

fn init_logging(config: &Config) {
    let default_filter = if config.is_development() {
        "speech_backend=debug,tower_http=debug"
    } else {
        "speech_backend=info,tower_http=info"
    };

    if config.log_format == LogFormat::Json {
        tracing_subscriber::registry()
            .with(
                tracing_subscriber::EnvFilter::try_from_default_env()
                    .unwrap_or_else(|_| default_filter.into()),
            )
            .with(tracing_subscriber::fmt::layer().json())
            .init();
    } else {
        tracing_subscriber::registry()
            .with(
                tracing_subscriber::EnvFilter::try_from_default_env()
                    .unwrap_or_else(|_| default_filter.into()),
            )
            .with(tracing_subscriber::fmt::layer().pretty())
            .init();
    }
}

use anyhow::Result;
use futures::TryStreamExt;
use object_store::{memory::InMemory, path::Path as ObjectPath, Attribute, ObjectStore};
use speech_backend::{
    controllers::{
        health::HealthState, history::HistoryController, speech::SpeechController,
        voices::VoiceController,
    },
    domain::{
        history::HistoryService,
        speech::{SpeechService, SpeechSettings},
    },
    infrastructure::{
        http::{create_router, AppControllers},
        repositories::{
            AudioRepository, ElevenLabsSynthesisRepository, HistoryRepository,
            ObjectStoreAudioRepository, SynthesisRepository,
        },
    },
};
use std::sync::Arc;
use std::time::Duration;
use test_context::AsyncTestContext;
use tokio::net::TcpListener;
use wiremock::MockServer;

pub mod audio_stub;

use api_client::TestClient;
use audio_stub::FailingAudioRepository;
use history_stub::InMemoryHistoryRepository;

pub const TEST_API_KEY: &str = "sk_test_0123456789abcdef";
pub const TEST_DEFAULT_VOICE: &str = "default-voice";
pub const PUBLIC_BASE_URL: &str = "https://audio.test";
pub const PROVIDER_PATH: &str = "/v1/text-to-speech";

/// How the collaborators behind the app are set up for a test
pub struct TestOptions {
    pub api_key: Option<String>,
    pub history: HistoryMode,
    pub require_caller_id: bool,
    pub synthesis_timeout: Duration,
    pub failing_storage: bool,
}

pub enum HistoryMode {
    Disabled,
    Working,
    Failing,
}

impl Default for TestOptions {
    fn default() -> Self {
        Self {
            api_key: Some(TEST_API_KEY.to_string()),
            history: HistoryMode::Working,
            require_caller_id: false,
            synthesis_timeout: Duration::from_secs(5),
            failing_storage: false,
        }
    }
}

pub struct TestContext {
    pub client: TestClient,
    pub provider: MockServer,
    pub store: Arc<InMemory>,
    pub history: Option<Arc<InMemoryHistoryRepository>>,
}

impl AsyncTestContext for TestContext {
    fn setup() -> impl std::future::Future<Output = Self> + Send {
        async {
            TestContext::with_options(TestOptions::default())
                .await
                .expect("Failed to start test app")
        }
    }

    fn teardown(self) -> impl std::future::Future<Output = ()> + Send {
        async {
            // Provider expectations are verified when the MockServer drops
        }
    }
}

impl TestContext {
    pub async fn with_options(options: TestOptions) -> Result<Self> {
        let provider = MockServer::start().await;
        let store = Arc::new(InMemory::new());

        let synthesis_repo: Arc<dyn SynthesisRepository> =
            Arc::new(ElevenLabsSynthesisRepository::new(
                format!("{}{}", provider.uri(), PROVIDER_PATH),
                options.api_key,
                options.synthesis_timeout,
            )?);
        let audio_repo: Arc<dyn AudioRepository> = if options.failing_storage {
            Arc::new(FailingAudioRepository {
                public_base_url: PUBLIC_BASE_URL.to_string(),
            })
        } else {
            Arc::new(ObjectStoreAudioRepository::new(store.clone(), PUBLIC_BASE_URL))
        };

        let history = match options.history {
            HistoryMode::Disabled => None,
            HistoryMode::Working => Some(Arc::new(InMemoryHistoryRepository::default())),
            HistoryMode::Failing => Some(Arc::new(InMemoryHistoryRepository::failing())),
        };
        let history_repo = history
            .clone()
            .map(|repo| repo as Arc<dyn HistoryRepository>);

        let speech_service = Arc::new(SpeechService::new(
            synthesis_repo.clone(),
            audio_repo.clone(),
            history_repo.clone(),
            SpeechSettings {
                default_voice_id: TEST_DEFAULT_VOICE.to_string(),
                default_language: "english".to_string(),
                signed_url_expiry: Duration::from_secs(3600),
                require_caller_id: options.require_caller_id,
            },
        ));

        let app = create_router(AppControllers {
            health_state: Arc::new(HealthState {
                pool: None,
                synthesis_repo,
                audio_repo,
            }),
            speech_controller: Arc::new(SpeechController::new(speech_service)),
            history_controller: Arc::new(HistoryController::new(Arc::new(HistoryService::new(
                history_repo,
            )))),
            voice_controller: Arc::new(VoiceController::new(TEST_DEFAULT_VOICE.to_string())),
        });

        // Start server
        let listener = TcpListener::bind("127.0.0.1:0").await?;
        let addr = listener.local_addr()?;
        let base_url = format!("http://{}", addr);

        tokio::spawn(async move {
            axum::serve(listener, app).await.unwrap();
        });

        Ok(Self {
            client: TestClient::new(&base_url),
            provider,
            store,
            history,
        })
    }

    /// Keys of every object in the audio store
    pub async fn stored_keys(&self) -> Vec<String> {
        self.store
            .list(None)
            .map_ok(|meta| meta.location.to_string())
            .try_collect()
            .await
            .expect("Failed to list audio store")
    }

    /// Bytes and content type of one stored object
    pub async fn stored_object(&self, key: &str) -> (Vec<u8>, Option<String>) {
        let result = self
            .store
            .get(&ObjectPath::from(key))
            .await
            .expect("Stored object not found");
        let content_type = result
            .attributes
            .get(&Attribute::ContentType)
            .map(|v| v.to_string());
        let bytes = result.bytes().await.expect("Failed to read object").to_vec();
        (bytes, content_type)
    }

    /// Number of calls the synthesis provider received
    pub async fn provider_calls(&self) -> usize {
        self.provider
            .received_requests()
            .await
            .map(|requests| requests.len())
            .unwrap_or(0)
    }
}

/// Extract the storage key from a public audio URL
pub fn key_from_url(url: &str) -> &str {
    url.strip_prefix(PUBLIC_BASE_URL)
        .and_then(|rest| rest.strip_prefix('/'))
        .unwrap_or_else(|| panic!("URL {} is not under {}", url, PUBLIC_BASE_URL))
}

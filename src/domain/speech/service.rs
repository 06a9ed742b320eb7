use super::dto::SpeechRequest;
use super::error::SpeechServiceError;
use super::voice::{find_voice, is_valid_voice_id};
use crate::domain::history::HistoryRecord;
use crate::infrastructure::repositories::{AudioRepository, HistoryRepository, SynthesisRepository};
use async_trait::async_trait;
use std::sync::Arc;
use std::time::Duration;
use uuid::Uuid;

pub const AUDIO_CONTENT_TYPE: &str = "audio/mpeg";
pub const AUDIO_KEY_PREFIX: &str = "audio";

/// Request-independent settings, resolved once from `Config` at startup
#[derive(Debug, Clone)]
pub struct SpeechSettings {
    pub default_voice_id: String,
    pub default_language: String,
    pub signed_url_expiry: Duration,
    pub require_caller_id: bool,
}

#[derive(Debug, Clone)]
pub struct SpeechSynthesisResult {
    pub key: String,
    pub url: String,
    pub signed_url: Option<String>,
    pub history: Option<HistoryRecord>,
}

/// Input after validation and defaulting
struct ValidatedRequest {
    text: String,
    voice_id: String,
    caller_id: Option<String>,
    language: String,
}

pub struct SpeechService {
    synthesis_repo: Arc<dyn SynthesisRepository>,
    audio_repo: Arc<dyn AudioRepository>,
    history_repo: Option<Arc<dyn HistoryRepository>>,
    settings: SpeechSettings,
}

impl SpeechService {
    pub fn new(
        synthesis_repo: Arc<dyn SynthesisRepository>,
        audio_repo: Arc<dyn AudioRepository>,
        history_repo: Option<Arc<dyn HistoryRepository>>,
        settings: SpeechSettings,
    ) -> Self {
        Self {
            synthesis_repo,
            audio_repo,
            history_repo,
            settings,
        }
    }
}

#[async_trait]
pub trait SpeechServiceApi: Send + Sync {
    /// Turn text into a stored, addressable audio file
    ///
    /// This operation:
    /// - Validates the request (no external call is made for invalid input)
    /// - Calls the synthesis provider with the selected voice
    /// - Stores the audio under a fresh `audio/<uuid>.mp3` key
    /// - Produces the public URL and, when possible, a signed URL
    /// - Records history on a best-effort basis
    async fn synthesize(
        &self,
        request: SpeechRequest,
    ) -> Result<SpeechSynthesisResult, SpeechServiceError>;
}

#[async_trait]
impl SpeechServiceApi for SpeechService {
    async fn synthesize(
        &self,
        request: SpeechRequest,
    ) -> Result<SpeechSynthesisResult, SpeechServiceError> {
        // 1. Validate input
        let request = self.validate(request)?;

        tracing::info!(
            voice_id = %request.voice_id,
            voice_name = find_voice(&request.voice_id).map(|v| v.name).unwrap_or("custom"),
            caller_id = request.caller_id.as_deref().unwrap_or("-"),
            text_length = request.text.len(),
            "Speech request"
        );

        // 2. Make sure collaborators are configured before touching any of them
        self.ensure_configured()?;

        // 3. Synthesize
        let audio = self
            .synthesis_repo
            .synthesize(&request.text, &request.voice_id)
            .await
            .map_err(SpeechServiceError::Synthesis)?;

        // 4. Store audio
        let key = Self::generate_audio_key();
        self.audio_repo
            .put_audio(&key, audio, AUDIO_CONTENT_TYPE)
            .await
            .map_err(SpeechServiceError::Storage)?;

        // 5. Access URLs
        let url = self.audio_repo.public_url(&key);
        let signed_url = self.sign(&key).await;

        // 6. History
        let history = self.record_history(&request, &url).await;

        tracing::info!(key = %key, url = %url, "Speech request completed");

        Ok(SpeechSynthesisResult {
            key,
            url,
            signed_url,
            history,
        })
    }
}

impl SpeechService {
    fn validate(&self, request: SpeechRequest) -> Result<ValidatedRequest, SpeechServiceError> {
        let text = request.text.trim();
        if text.is_empty() {
            return Err(SpeechServiceError::Invalid("Text is required".to_string()));
        }

        let voice_id = match request.voice_id.as_deref().map(str::trim) {
            Some(voice_id) if !voice_id.is_empty() => voice_id.to_string(),
            _ => self.settings.default_voice_id.clone(),
        };
        if !is_valid_voice_id(&voice_id) {
            return Err(SpeechServiceError::Invalid(format!(
                "Invalid voice id: {}",
                voice_id
            )));
        }

        let caller_id = request
            .user_id
            .map(|id| id.trim().to_string())
            .filter(|id| !id.is_empty());
        if self.settings.require_caller_id && caller_id.is_none() {
            return Err(SpeechServiceError::Invalid("User ID is required".to_string()));
        }

        let language = request
            .language
            .map(|lang| lang.trim().to_string())
            .filter(|lang| !lang.is_empty())
            .unwrap_or_else(|| self.settings.default_language.clone());

        Ok(ValidatedRequest {
            text: text.to_string(),
            voice_id,
            caller_id,
            language,
        })
    }

    fn ensure_configured(&self) -> Result<(), SpeechServiceError> {
        self.synthesis_repo
            .check_configured()
            .map_err(SpeechServiceError::Configuration)?;
        self.audio_repo
            .check_configured()
            .map_err(SpeechServiceError::Configuration)
    }

    fn generate_audio_key() -> String {
        format!("{}/{}.mp3", AUDIO_KEY_PREFIX, Uuid::new_v4())
    }

    /// A signing failure only costs the caller the optional `signedUrl`
    async fn sign(&self, key: &str) -> Option<String> {
        match self
            .audio_repo
            .signed_url(key, self.settings.signed_url_expiry)
            .await
        {
            Ok(url) => url,
            Err(e) => {
                tracing::warn!(error = %e, key = key, "Could not create signed URL");
                None
            }
        }
    }

    /// History is best-effort: failures are logged, never returned
    async fn record_history(&self, request: &ValidatedRequest, url: &str) -> Option<HistoryRecord> {
        let repo = self.history_repo.as_ref()?;

        let record = HistoryRecord::completed(
            request.text.clone(),
            url.to_string(),
            request.caller_id.clone(),
            request.language.clone(),
        );

        match repo.create(&record).await {
            Ok(()) => {
                tracing::info!(history_id = %record.id, caller_id = %record.caller_id, "History recorded");
                Some(record)
            }
            Err(e) => {
                tracing::error!(error = %e, caller_id = %record.caller_id, "Failed to record history");
                None
            }
        }
    }
}

use super::synthesis_repository::SynthesisRepository;
use async_trait::async_trait;
use reqwest::{header, Client};
use serde_json::json;
use std::time::{Duration, Instant};

/// Maximum number of characters of a provider error body kept for diagnostics
const ERROR_BODY_PREVIEW: usize = 200;

/// ElevenLabs implementation of the synthesis repository.
///
/// Calls `POST {api_url}/{voice_id}` with `{"text": ...}` and the
/// `xi-api-key` header, expecting MP3 bytes back.
pub struct ElevenLabsSynthesisRepository {
    client: Client,
    api_url: String,
    api_key: Option<String>,
}

impl ElevenLabsSynthesisRepository {
    pub fn new(
        api_url: String,
        api_key: Option<String>,
        timeout: Duration,
    ) -> Result<Self, reqwest::Error> {
        let client = Client::builder().timeout(timeout).build()?;

        Ok(Self {
            client,
            api_url: api_url.trim_end_matches('/').to_string(),
            api_key,
        })
    }

    fn endpoint(&self, voice_id: &str) -> String {
        format!("{}/{}", self.api_url, voice_id)
    }
}

#[async_trait]
impl SynthesisRepository for ElevenLabsSynthesisRepository {
    fn check_configured(&self) -> Result<(), String> {
        match self.api_key {
            Some(_) => Ok(()),
            None => Err("ELEVENLABS_API_KEY is not set".to_string()),
        }
    }

    async fn synthesize(&self, text: &str, voice_id: &str) -> Result<Vec<u8>, String> {
        let api_key = self
            .api_key
            .as_deref()
            .ok_or_else(|| "ELEVENLABS_API_KEY is not set".to_string())?;

        let start_time = Instant::now();

        tracing::info!(
            provider = "elevenlabs",
            voice_id = voice_id,
            text_length = text.len(),
            "Calling speech synthesis API"
        );

        let response = self
            .client
            .post(self.endpoint(voice_id))
            .header("xi-api-key", api_key)
            .header(header::ACCEPT, "audio/mpeg")
            .json(&json!({ "text": text }))
            .send()
            .await
            .map_err(|e| {
                let reason = if e.is_timeout() { "request timed out" } else { "request failed" };
                tracing::error!(
                    error = %e,
                    voice_id = voice_id,
                    "Speech synthesis API call failed"
                );
                format!("ElevenLabs {}: {}", reason, e)
            })?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            let preview: String = body.chars().take(ERROR_BODY_PREVIEW).collect();
            tracing::error!(
                status = %status.as_u16(),
                voice_id = voice_id,
                body = %preview,
                "Speech synthesis API returned an error status"
            );
            return Err(format!("ElevenLabs returned {}: {}", status, preview));
        }

        let audio = response
            .bytes()
            .await
            .map_err(|e| format!("ElevenLabs response could not be read: {}", e))?
            .to_vec();

        let duration = start_time.elapsed();
        tracing::info!(
            provider = "elevenlabs",
            voice_id = voice_id,
            latency_ms = duration.as_millis(),
            characters_count = text.len(),
            audio_size_bytes = audio.len(),
            "Speech synthesis completed"
        );

        Ok(audio)
    }
}

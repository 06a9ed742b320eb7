use async_trait::async_trait;
use speech_backend::infrastructure::repositories::AudioRepository;
use std::time::Duration;

/// Audio store that accepts the bucket configuration but rejects every write
pub struct FailingAudioRepository {
    pub public_base_url: String,
}

#[async_trait]
impl AudioRepository for FailingAudioRepository {
    async fn put_audio(&self, key: &str, _audio: Vec<u8>, _content_type: &str) -> Result<(), String> {
        Err(format!("failed to write {}: bucket rejected the upload", key))
    }

    fn public_url(&self, key: &str) -> String {
        format!("{}/{}", self.public_base_url, key)
    }

    async fn signed_url(&self, _key: &str, _expires_in: Duration) -> Result<Option<String>, String> {
        Ok(None)
    }
}

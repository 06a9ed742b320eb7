use async_trait::async_trait;
use axum::http::Method;
use object_store::{
    aws::AmazonS3Builder, path::Path as ObjectPath, signer::Signer, Attribute, Attributes,
    ObjectStore, PutOptions, PutPayload,
};
use std::sync::Arc;
use std::time::Duration;

/// Repository for generated audio objects.
#[async_trait]
pub trait AudioRepository: Send + Sync {
    /// Report whether a bucket is available. Checked before any external call.
    fn check_configured(&self) -> Result<(), String> {
        Ok(())
    }

    /// Write `audio` under `key` with the given MIME type
    async fn put_audio(&self, key: &str, audio: Vec<u8>, content_type: &str) -> Result<(), String>;

    /// Stable public address of `key`
    fn public_url(&self, key: &str) -> String;

    /// Time-limited download URL for `key`, `None` when the store cannot sign
    async fn signed_url(&self, key: &str, expires_in: Duration) -> Result<Option<String>, String>;
}

/// Audio repository backed by any `object_store` implementation
/// (S3 in production, `InMemory` in tests).
pub struct ObjectStoreAudioRepository {
    store: Option<Arc<dyn ObjectStore>>,
    signer: Option<Arc<dyn Signer>>,
    public_base_url: String,
}

impl ObjectStoreAudioRepository {
    pub fn new(store: Arc<dyn ObjectStore>, public_base_url: impl Into<String>) -> Self {
        Self {
            store: Some(store),
            signer: None,
            public_base_url: public_base_url.into().trim_end_matches('/').to_string(),
        }
    }

    pub fn with_signer(mut self, signer: Arc<dyn Signer>) -> Self {
        self.signer = Some(signer);
        self
    }

    /// S3 bucket store; credentials come from the standard `AWS_*` variables.
    pub fn s3(
        bucket: &str,
        region: &str,
        public_base_url: impl Into<String>,
    ) -> Result<Self, object_store::Error> {
        let s3 = Arc::new(
            AmazonS3Builder::from_env()
                .with_bucket_name(bucket)
                .with_region(region)
                .build()?,
        );

        Ok(Self::new(s3.clone(), public_base_url).with_signer(s3))
    }

    /// Placeholder used when no bucket is configured; every write fails.
    pub fn unconfigured() -> Self {
        Self {
            store: None,
            signer: None,
            public_base_url: String::new(),
        }
    }

    fn object_path(key: &str) -> Result<ObjectPath, String> {
        ObjectPath::parse(key).map_err(|e| format!("invalid object key {}: {}", key, e))
    }
}

#[async_trait]
impl AudioRepository for ObjectStoreAudioRepository {
    fn check_configured(&self) -> Result<(), String> {
        match self.store {
            Some(_) => Ok(()),
            None => Err("AUDIO_BUCKET_NAME is not set".to_string()),
        }
    }

    async fn put_audio(&self, key: &str, audio: Vec<u8>, content_type: &str) -> Result<(), String> {
        let store = self
            .store
            .as_ref()
            .ok_or_else(|| "AUDIO_BUCKET_NAME is not set".to_string())?;
        let path = Self::object_path(key)?;
        let size = audio.len();

        let mut attributes = Attributes::new();
        attributes.insert(Attribute::ContentType, content_type.to_string().into());
        let options = PutOptions {
            attributes,
            ..Default::default()
        };

        store
            .put_opts(&path, PutPayload::from(audio), options)
            .await
            .map_err(|e| {
                tracing::error!(error = %e, key = key, "Audio upload failed");
                format!("failed to write {}: {}", key, e)
            })?;

        tracing::info!(key = key, audio_size_bytes = size, "Audio stored");

        Ok(())
    }

    fn public_url(&self, key: &str) -> String {
        format!("{}/{}", self.public_base_url, key)
    }

    async fn signed_url(&self, key: &str, expires_in: Duration) -> Result<Option<String>, String> {
        let Some(signer) = &self.signer else {
            return Ok(None);
        };
        let path = Self::object_path(key)?;

        let url = signer
            .signed_url(Method::GET, &path, expires_in)
            .await
            .map_err(|e| format!("failed to sign {}: {}", key, e))?;

        Ok(Some(url.to_string()))
    }
}

use async_trait::async_trait;

/// Repository for speech synthesis.
/// Abstracts the underlying text-to-speech provider.
///
/// The returned audio is passed through untouched (MP3 bytes from the provider).
#[async_trait]
pub trait SynthesisRepository: Send + Sync {
    /// Report whether the provider can be called at all (credentials present).
    ///
    /// Checked before any external call is made.
    fn check_configured(&self) -> Result<(), String> {
        Ok(())
    }

    /// Synthesize `text` with the given provider voice
    ///
    /// # Errors
    /// Returns error on network failure, timeout or a non-success response
    async fn synthesize(&self, text: &str, voice_id: &str) -> Result<Vec<u8>, String>;
}

//! Cache-or-fetch wrapper around a speech provider.

use std::sync::Arc;

use async_trait::async_trait;

use parlons_core::{AudioCache, AudioCacheKey, SpeechError, SpeechProvider, SpeechRequest};

use crate::config::DEFAULT_TTS_MODEL;

/// Serves audio from an [`AudioCache`] and fills it on a miss.
///
/// Cache failures are logged and otherwise ignored: a broken cache costs a
/// network call, never a failed playback.
pub struct CachedSpeechProvider {
    inner: Arc<dyn SpeechProvider>,
    cache: Arc<dyn AudioCache>,
    default_model: String,
}

impl CachedSpeechProvider {
    pub fn new(inner: Arc<dyn SpeechProvider>, cache: Arc<dyn AudioCache>) -> Self {
        Self {
            inner,
            cache,
            default_model: DEFAULT_TTS_MODEL.to_string(),
        }
    }

    /// Model assumed for requests without one; must match the inner
    /// provider's default so keys line up.
    #[must_use]
    pub fn with_default_model(mut self, model: impl Into<String>) -> Self {
        self.default_model = model.into();
        self
    }

    fn key_for(&self, request: &SpeechRequest) -> AudioCacheKey {
        let model = request
            .model_id
            .as_deref()
            .filter(|m| !m.trim().is_empty())
            .unwrap_or(self.default_model.as_str());
        AudioCacheKey::new(request.voice_id.trim(), model, request.text.as_str())
    }
}

#[async_trait]
impl SpeechProvider for CachedSpeechProvider {
    async fn synthesize(&self, request: &SpeechRequest) -> Result<Vec<u8>, SpeechError> {
        if request.voice_id.trim().is_empty() {
            return Err(SpeechError::MissingVoice);
        }

        let key = self.key_for(request);
        match self.cache.get(&key).await {
            Ok(Some(audio)) => {
                tracing::debug!(key = %key, "Audio cache hit");
                return Ok(audio);
            }
            Ok(None) => {}
            Err(e) => tracing::warn!(error = %e, "Audio cache read failed"),
        }

        let audio = self.inner.synthesize(request).await?;

        if let Err(e) = self.cache.put(&key, &audio).await {
            tracing::warn!(error = %e, "Audio cache write failed");
        }
        Ok(audio)
    }
}

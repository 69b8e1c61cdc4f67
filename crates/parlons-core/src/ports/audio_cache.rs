//! Audio cache port.
//!
//! Synthesized audio is keyed by everything that affects the output: voice,
//! model and text. The same text under a different voice or model is a
//! different entry.

use std::fmt;

use async_trait::async_trait;

use super::RepositoryError;

/// Identity of one synthesized clip.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct AudioCacheKey {
    pub voice_id: String,
    pub model_id: String,
    pub text: String,
}

impl AudioCacheKey {
    pub fn new(
        voice_id: impl Into<String>,
        model_id: impl Into<String>,
        text: impl Into<String>,
    ) -> Self {
        Self {
            voice_id: voice_id.into(),
            model_id: model_id.into(),
            text: text.into(),
        }
    }
}

/// Renders as `voice:model:text`, the storage key.
impl fmt::Display for AudioCacheKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}:{}", self.voice_id, self.model_id, self.text)
    }
}

/// Persistent store of encoded audio clips.
#[async_trait]
pub trait AudioCache: Send + Sync {
    /// Cached bytes for `key`, or `None` on a miss.
    async fn get(&self, key: &AudioCacheKey) -> Result<Option<Vec<u8>>, RepositoryError>;

    /// Store bytes for `key`, replacing any previous entry.
    async fn put(&self, key: &AudioCacheKey, audio: &[u8]) -> Result<(), RepositoryError>;

    /// Remove every entry. Returns how many were removed.
    async fn clear(&self) -> Result<u64, RepositoryError>;

    /// Number of stored entries.
    async fn count(&self) -> Result<u64, RepositoryError>;
}

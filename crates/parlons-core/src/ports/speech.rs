//! Speech synthesis port.
//!
//! The drill only needs "text in, encoded audio out". The provider behind the
//! trait decides how the credential, voice and model reach the remote service.

use async_trait::async_trait;
use thiserror::Error;

/// One synthesis request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SpeechRequest {
    /// Text to speak.
    pub text: String,

    /// Voice identifier at the provider.
    pub voice_id: String,

    /// Model identifier; `None` lets the provider pick its default.
    pub model_id: Option<String>,

    /// ISO language hint (`fr`, `zh`, `en`).
    pub language: Option<String>,
}

impl SpeechRequest {
    pub fn new(text: impl Into<String>, voice_id: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            voice_id: voice_id.into(),
            model_id: None,
            language: None,
        }
    }

    #[must_use]
    pub fn with_model(mut self, model_id: impl Into<String>) -> Self {
        self.model_id = Some(model_id.into());
        self
    }

    #[must_use]
    pub fn with_language(mut self, language: impl Into<String>) -> Self {
        self.language = Some(language.into());
        self
    }
}

/// Errors from a speech provider.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SpeechError {
    /// No API credential is configured.
    #[error("Please enter an API key first")]
    MissingCredential,

    /// The request named no voice.
    #[error("No voice selected")]
    MissingVoice,

    /// The provider rejected the credential or its permissions.
    #[error("{message}")]
    Unauthorized { message: String },

    /// Non-success HTTP response.
    #[error("Speech API error ({status}): {body}")]
    RequestFailed { status: u16, body: String },

    /// Transport failure before a response arrived.
    #[error("Network error: {0}")]
    Network(String),

    /// A response arrived but could not be used.
    #[error("Invalid response: {0}")]
    InvalidResponse(String),
}

/// A voice offered by the provider.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VoiceSummary {
    pub voice_id: String,
    pub name: String,
}

/// Text-to-speech backend.
#[async_trait]
pub trait SpeechProvider: Send + Sync {
    /// Synthesize `request` into encoded audio (MP3 for the remote provider).
    async fn synthesize(&self, request: &SpeechRequest) -> Result<Vec<u8>, SpeechError>;
}

/// Lists the voices available to the configured credential.
#[async_trait]
pub trait VoiceCatalog: Send + Sync {
    async fn list_voices(&self) -> Result<Vec<VoiceSummary>, SpeechError>;
}

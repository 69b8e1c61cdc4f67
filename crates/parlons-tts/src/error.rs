//! Internal error types for ElevenLabs operations.
//!
//! These errors are mapped to the core `SpeechError` at the port boundary.

use thiserror::Error;

/// Result type alias for client operations.
pub type TtsResult<T> = Result<T, TtsError>;

/// Errors from the ElevenLabs HTTP API.
#[derive(Debug, Error)]
pub enum TtsError {
    #[error("API key is not set")]
    MissingApiKey,

    #[error("Voice id is empty")]
    MissingVoice,

    /// Non-success status from a synthesis request.
    #[error("ElevenLabs API error ({status}): {body}")]
    SynthesisFailed { status: u16, body: String },

    /// Non-success status from the voice listing.
    #[error("Failed to fetch voices ({status})")]
    VoicesFailed { status: u16 },

    /// The credential lacks the "Voices Read" permission.
    #[error(
        "401 Unauthorized: Your API key may lack the \"Voices Read\" permission. \
         Please create a new key with both \"Text to Speech\" and \"Voices Read\" enabled."
    )]
    VoicesUnauthorized,

    /// Network or HTTP client error.
    #[error("Network error: {0}")]
    Network(#[from] reqwest::Error),

    /// The HTTP client could not be constructed.
    #[error("Failed to build HTTP client: {0}")]
    ClientBuild(String),
}

//! Port trait implementations for `ElevenLabsClient`.
//!
//! Converts internal `TtsError`s into the core `SpeechError`.

use async_trait::async_trait;

use parlons_core::{SpeechError, SpeechProvider, SpeechRequest, VoiceCatalog, VoiceSummary};

use crate::client::ElevenLabsClient;
use crate::error::TtsError;

/// Convert internal `TtsError` to core `SpeechError`.
fn map_error(err: TtsError) -> SpeechError {
    match err {
        TtsError::MissingApiKey => SpeechError::MissingCredential,
        TtsError::MissingVoice => SpeechError::MissingVoice,
        TtsError::SynthesisFailed { status, body } if status == 401 || status == 403 => {
            SpeechError::Unauthorized {
                message: format!("ElevenLabs API error ({status}): {body}"),
            }
        }
        TtsError::SynthesisFailed { status, body } => SpeechError::RequestFailed { status, body },
        err @ TtsError::VoicesUnauthorized => SpeechError::Unauthorized {
            message: err.to_string(),
        },
        TtsError::VoicesFailed { status } => SpeechError::RequestFailed {
            status,
            body: String::new(),
        },
        TtsError::Network(e) if e.is_decode() => SpeechError::InvalidResponse(e.to_string()),
        TtsError::Network(e) => SpeechError::Network(e.to_string()),
        TtsError::ClientBuild(message) => SpeechError::Network(message),
    }
}

#[async_trait]
impl SpeechProvider for ElevenLabsClient {
    async fn synthesize(&self, request: &SpeechRequest) -> Result<Vec<u8>, SpeechError> {
        self.text_to_speech(request).await.map_err(map_error)
    }
}

#[async_trait]
impl VoiceCatalog for ElevenLabsClient {
    async fn list_voices(&self) -> Result<Vec<VoiceSummary>, SpeechError> {
        self.voices().await.map_err(map_error)
    }
}

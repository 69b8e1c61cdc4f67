//! HTTP client for the ElevenLabs API.

use serde::{Deserialize, Serialize};

use parlons_core::{SpeechRequest, VoiceSummary};

use crate::config::ElevenLabsConfig;
use crate::error::{TtsError, TtsResult};

const API_KEY_HEADER: &str = "xi-api-key";

/// Client for text-to-speech and voice listing.
///
/// Configuration problems (no credential, no voice) are reported before any
/// request is sent.
pub struct ElevenLabsClient {
    http: reqwest::Client,
    config: ElevenLabsConfig,
}

#[derive(Serialize)]
struct TextToSpeechBody<'a> {
    text: &'a str,
    model_id: &'a str,
    #[serde(skip_serializing_if = "Option::is_none")]
    language_code: Option<&'a str>,
    voice_settings: VoiceSettings,
}

#[derive(Serialize)]
struct VoiceSettings {
    stability: f32,
    similarity_boost: f32,
}

impl Default for VoiceSettings {
    fn default() -> Self {
        Self {
            stability: 0.5,
            similarity_boost: 0.75,
        }
    }
}

#[derive(Deserialize)]
struct VoicesResponse {
    voices: Vec<VoiceEntry>,
}

#[derive(Deserialize)]
struct VoiceEntry {
    voice_id: String,
    name: String,
}

impl ElevenLabsClient {
    /// Create a client with the given configuration.
    pub fn new(config: ElevenLabsConfig) -> TtsResult<Self> {
        let http = reqwest::Client::builder()
            .timeout(config.timeout)
            .user_agent(config.user_agent.clone())
            .build()
            .map_err(|e| TtsError::ClientBuild(e.to_string()))?;

        Ok(Self { http, config })
    }

    pub const fn config(&self) -> &ElevenLabsConfig {
        &self.config
    }

    fn api_key(&self) -> TtsResult<&str> {
        let key = self.config.api_key.trim();
        if key.is_empty() {
            return Err(TtsError::MissingApiKey);
        }
        Ok(key)
    }

    /// Model a request resolves to.
    pub fn model_for<'a>(&'a self, request: &'a SpeechRequest) -> &'a str {
        request
            .model_id
            .as_deref()
            .filter(|m| !m.trim().is_empty())
            .unwrap_or(self.config.default_model.as_str())
    }

    /// Synthesize `request` into MP3 bytes.
    pub async fn text_to_speech(&self, request: &SpeechRequest) -> TtsResult<Vec<u8>> {
        let api_key = self.api_key()?;
        let voice_id = request.voice_id.trim();
        if voice_id.is_empty() {
            return Err(TtsError::MissingVoice);
        }

        let url = format!("{}/text-to-speech/{voice_id}", self.config.base_url);
        let body = TextToSpeechBody {
            text: &request.text,
            model_id: self.model_for(request),
            language_code: request.language.as_deref(),
            voice_settings: VoiceSettings::default(),
        };

        tracing::debug!(
            voice_id,
            model_id = body.model_id,
            chars = request.text.chars().count(),
            "Requesting speech"
        );

        let response = self
            .http
            .post(&url)
            .header(API_KEY_HEADER, api_key)
            .json(&body)
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(TtsError::SynthesisFailed {
                status: status.as_u16(),
                body,
            });
        }

        let audio = response.bytes().await?;
        tracing::debug!(bytes = audio.len(), "Speech received");
        Ok(audio.to_vec())
    }

    /// Voices available to the credential.
    pub async fn voices(&self) -> TtsResult<Vec<VoiceSummary>> {
        let api_key = self.api_key()?;
        let url = format!("{}/voices", self.config.base_url);

        let response = self
            .http
            .get(&url)
            .header(API_KEY_HEADER, api_key)
            .send()
            .await?;

        let status = response.status();
        if status == reqwest::StatusCode::UNAUTHORIZED {
            return Err(TtsError::VoicesUnauthorized);
        }
        if !status.is_success() {
            return Err(TtsError::VoicesFailed {
                status: status.as_u16(),
            });
        }

        let parsed: VoicesResponse = response.json().await?;
        Ok(parsed
            .voices
            .into_iter()
            .map(|v| VoiceSummary {
                voice_id: v.voice_id,
                name: v.name,
            })
            .collect())
    }
}

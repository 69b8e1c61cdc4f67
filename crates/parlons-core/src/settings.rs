//! Settings domain types and validation.
//!
//! This module contains the user configuration: the speech API credential,
//! one voice per language role, the prompt-language choice and the speech
//! model. These are pure domain types with no infrastructure dependencies.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// Speech model used when the user has not chosen one.
pub const DEFAULT_MODEL_ID: &str = "eleven_flash_v2_5";

/// Which auxiliary language the drill prompts in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum PromptLanguage {
    /// The learner's native language (historically Chinese, key `cn`).
    #[default]
    #[serde(rename = "cn", alias = "native")]
    Native,

    /// The secondary prompt language (historically English, key `en`).
    #[serde(rename = "en", alias = "secondary")]
    Secondary,
}

impl PromptLanguage {
    /// Voice role that speaks prompts in this language.
    pub const fn voice_role(self) -> VoiceRole {
        match self {
            Self::Native => VoiceRole::Native,
            Self::Secondary => VoiceRole::Secondary,
        }
    }

    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Native => "native",
            Self::Secondary => "secondary",
        }
    }
}

impl fmt::Display for PromptLanguage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for PromptLanguage {
    type Err = SettingsError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "native" | "cn" => Ok(Self::Native),
            "secondary" | "en" => Ok(Self::Secondary),
            other => Err(SettingsError::InvalidPromptLanguage(other.to_string())),
        }
    }
}

/// Language category a configured voice is bound to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum VoiceRole {
    /// French, the target language.
    Target,
    Native,
    Secondary,
}

impl VoiceRole {
    /// Language hint passed to the speech provider.
    pub const fn language_code(self) -> &'static str {
        match self {
            Self::Target => "fr",
            Self::Native => "zh",
            Self::Secondary => "en",
        }
    }

    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Target => "fr",
            Self::Native => "native",
            Self::Secondary => "secondary",
        }
    }
}

impl fmt::Display for VoiceRole {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Voice identifier per role. An empty identifier means "no audio" for that
/// role; the drill still runs the phase and its timing.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct VoiceConfig {
    pub fr: String,
    pub native: String,
    pub secondary: String,
}

impl VoiceConfig {
    /// The configured voice for `role`, or `None` if unset.
    pub fn voice_for(&self, role: VoiceRole) -> Option<&str> {
        let id = match role {
            VoiceRole::Target => &self.fr,
            VoiceRole::Native => &self.native,
            VoiceRole::Secondary => &self.secondary,
        };
        let id = id.trim();
        (!id.is_empty()).then_some(id)
    }

    /// Whether no role has a voice, i.e. the drill will be silent.
    pub fn is_silent(&self) -> bool {
        [VoiceRole::Target, VoiceRole::Native, VoiceRole::Secondary]
            .into_iter()
            .all(|role| self.voice_for(role).is_none())
    }
}

/// Application settings structure.
///
/// Missing fields fall back to [`Settings::default`] when deserializing, so
/// records written by older versions stay loadable.
#[derive(Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    /// Speech API credential.
    pub api_key: String,

    /// Voice for the French answer.
    pub voice_id_fr: String,

    /// Voice for native-language prompts.
    pub voice_id_native: String,

    /// Voice for secondary-language prompts.
    pub voice_id_secondary: String,

    /// Which language prompts are shown and spoken in.
    pub prompt_language: PromptLanguage,

    /// Speech model identifier.
    pub model_id: String,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            api_key: String::new(),
            voice_id_fr: String::new(),
            voice_id_native: String::new(),
            voice_id_secondary: String::new(),
            prompt_language: PromptLanguage::Native,
            model_id: DEFAULT_MODEL_ID.to_string(),
        }
    }
}

// The credential must never end up in logs.
impl fmt::Debug for Settings {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Settings")
            .field("api_key", &mask_secret(&self.api_key))
            .field("voice_id_fr", &self.voice_id_fr)
            .field("voice_id_native", &self.voice_id_native)
            .field("voice_id_secondary", &self.voice_id_secondary)
            .field("prompt_language", &self.prompt_language)
            .field("model_id", &self.model_id)
            .finish()
    }
}

impl Settings {
    /// Voice identifiers grouped by role.
    pub fn voices(&self) -> VoiceConfig {
        VoiceConfig {
            fr: self.voice_id_fr.clone(),
            native: self.voice_id_native.clone(),
            secondary: self.voice_id_secondary.clone(),
        }
    }

    /// Whether a credential is configured.
    pub fn has_api_key(&self) -> bool {
        !self.api_key.trim().is_empty()
    }

    /// Fail if audio is configured but the credential is missing.
    ///
    /// A drill with no voices at all is silent and needs no credential.
    pub fn check_audio_ready(&self) -> Result<(), SettingsError> {
        if !self.voices().is_silent() && !self.has_api_key() {
            return Err(SettingsError::MissingApiKey);
        }
        Ok(())
    }

    /// Merge an update into this one, only touching fields that are `Some`.
    pub fn merge(&mut self, other: &SettingsUpdate) {
        if let Some(ref key) = other.api_key {
            self.api_key.clone_from(key);
        }
        if let Some(ref voice) = other.voice_id_fr {
            self.voice_id_fr.clone_from(voice);
        }
        if let Some(ref voice) = other.voice_id_native {
            self.voice_id_native.clone_from(voice);
        }
        if let Some(ref voice) = other.voice_id_secondary {
            self.voice_id_secondary.clone_from(voice);
        }
        if let Some(language) = other.prompt_language {
            self.prompt_language = language;
        }
        if let Some(ref model) = other.model_id {
            self.model_id.clone_from(model);
        }
    }
}

/// Partial settings update.
///
/// `None` leaves a field unchanged. Voice ids and the credential can be
/// cleared by setting them to an empty string.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct SettingsUpdate {
    pub api_key: Option<String>,
    pub voice_id_fr: Option<String>,
    pub voice_id_native: Option<String>,
    pub voice_id_secondary: Option<String>,
    pub prompt_language: Option<PromptLanguage>,
    pub model_id: Option<String>,
}

/// Settings validation error.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum SettingsError {
    #[error("Please enter an API key first")]
    MissingApiKey,

    #[error("Model id cannot be empty")]
    EmptyModelId,

    #[error("Voice id '{0}' is not valid (no whitespace or '/' allowed)")]
    InvalidVoiceId(String),

    #[error("Unknown prompt language '{0}' (expected 'native' or 'secondary')")]
    InvalidPromptLanguage(String),
}

/// Validate settings values.
pub fn validate_settings(settings: &Settings) -> Result<(), SettingsError> {
    if settings.model_id.trim().is_empty() {
        return Err(SettingsError::EmptyModelId);
    }

    // Voice ids end up in a URL path segment.
    for voice in [
        &settings.voice_id_fr,
        &settings.voice_id_native,
        &settings.voice_id_secondary,
    ] {
        if voice.chars().any(|c| c.is_whitespace() || c == '/') {
            return Err(SettingsError::InvalidVoiceId(voice.clone()));
        }
    }

    Ok(())
}

fn mask_secret(secret: &str) -> String {
    if secret.is_empty() {
        String::new()
    } else {
        "********".to_string()
    }
}

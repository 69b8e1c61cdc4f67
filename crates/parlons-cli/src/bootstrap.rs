//! CLI bootstrap - the composition root.
//!
//! The only place where infrastructure is wired together for the CLI:
//! - Database pool and repositories (via parlons-db)
//! - Core services (via parlons-core)
//! - Speech client and audio cache (via parlons-tts)
//! - Audio output and playback (via parlons-voice)
//!
//! Command handlers receive the composed context and delegate to it.

use std::path::PathBuf;
use std::sync::Arc;

use anyhow::Result;
use parlons_core::paths::database_path;
use parlons_core::services::AppCore;
use parlons_core::{AudioCache, Settings, SpeechProvider};
use parlons_db::{CoreFactory, setup_database};
use parlons_tts::{CachedSpeechProvider, ElevenLabsClient, ElevenLabsConfig};
use parlons_voice::{AudioOutput, NullOutput, PlaybackController};

/// Environment variable consulted when no API key is stored.
pub const API_KEY_ENV: &str = "ELEVENLABS_API_KEY";

/// Bootstrap configuration for the CLI.
#[derive(Debug, Clone)]
pub struct CliConfig {
    /// SQLite database file.
    pub database_path: PathBuf,
}

impl CliConfig {
    /// Config with the default data directory.
    pub fn with_defaults() -> Result<Self> {
        Ok(Self {
            database_path: database_path()?,
        })
    }
}

/// Fully composed application context for CLI commands.
pub struct CliContext {
    /// The core application facade.
    pub app: AppCore,
    /// Synthesized audio shared by every speech provider built here.
    pub audio_cache: Arc<dyn AudioCache>,
}

impl CliContext {
    pub const fn app(&self) -> &AppCore {
        &self.app
    }

    /// Stored settings, with the API key taken from the environment when
    /// none is stored. The environment value is never persisted.
    pub async fn settings(&self) -> Result<Settings> {
        let settings = self.app.settings().get().await?;
        Ok(with_env_credential(
            settings,
            std::env::var(API_KEY_ENV).ok(),
        ))
    }

    /// HTTP client for the configured credential.
    pub fn speech_client(&self, settings: &Settings) -> Result<ElevenLabsClient> {
        let config = ElevenLabsConfig::new(settings.api_key.trim())
            .with_default_model(settings.model_id.trim());
        Ok(ElevenLabsClient::new(config)?)
    }

    /// Playback over the cached speech provider and the best available output.
    pub fn playback(&self, settings: &Settings) -> Result<Arc<PlaybackController>> {
        let client: Arc<dyn SpeechProvider> = Arc::new(self.speech_client(settings)?);
        let speech = CachedSpeechProvider::new(client, Arc::clone(&self.audio_cache))
            .with_default_model(settings.model_id.trim());
        Ok(Arc::new(PlaybackController::new(
            Arc::new(speech),
            audio_output(),
        )))
    }
}

#[cfg(feature = "audio")]
fn audio_output() -> Arc<dyn AudioOutput> {
    match parlons_voice::AudioThreadHandle::spawn() {
        Ok(handle) => Arc::new(handle),
        Err(e) => {
            tracing::warn!(error = %e, "No audio output available, drilling silently");
            Arc::new(NullOutput)
        }
    }
}

#[cfg(not(feature = "audio"))]
fn audio_output() -> Arc<dyn AudioOutput> {
    tracing::info!("Built without the `audio` feature, drilling silently");
    Arc::new(NullOutput)
}

/// Fill an empty stored credential from `env_value`.
pub fn with_env_credential(mut settings: Settings, env_value: Option<String>) -> Settings {
    if !settings.has_api_key() {
        if let Some(key) = env_value.filter(|k| !k.trim().is_empty()) {
            tracing::debug!("Using API key from {API_KEY_ENV}");
            settings.api_key = key;
        }
    }
    settings
}

/// Bootstrap the CLI application.
///
/// 1. Opens the database and builds the repositories
/// 2. Assembles the `AppCore`
/// 3. Keeps the audio cache for speech providers built later
pub async fn bootstrap(config: CliConfig) -> Result<CliContext> {
    let pool = setup_database(&config.database_path).await?;
    let repos = CoreFactory::build_repos(pool);
    let audio_cache = Arc::clone(&repos.audio_cache);
    let app = AppCore::new(repos);

    tracing::debug!(path = %config.database_path.display(), "CLI context ready");
    Ok(CliContext { app, audio_cache })
}

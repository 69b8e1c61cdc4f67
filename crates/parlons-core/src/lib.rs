//! Core domain types and port definitions for parlons.
//!
//! This crate has no infrastructure dependencies: storage, the speech API and
//! the audio device are reached through the traits in [`ports`], which the
//! adapter crates (`parlons-db`, `parlons-tts`, `parlons-voice`) implement.

#![deny(unused_crate_dependencies)]

pub mod domain;
pub mod import;
pub mod paths;
pub mod ports;
pub mod sample;
pub mod services;
pub mod settings;

// Re-export commonly used types for convenience
pub use domain::{
    Countdown, DEFAULT_EASE, DrillPhase, DrillTimings, Progress, Sentence, SentenceId,
    SentenceList, anticipation_window,
};
pub use import::{ImportError, export_sentences, parse_sentences};
pub use ports::{
    AudioCache, AudioCacheKey, CoreError, ProgressRepository, Repos, RepositoryError,
    SentenceRepository, SettingsRepository, SpeechError, SpeechProvider, SpeechRequest,
    VoiceCatalog, VoiceSummary,
};
pub use sample::sample_sentences;
pub use services::{AppCore, ProgressService, SentenceService, SettingsService};
pub use settings::{
    DEFAULT_MODEL_ID, PromptLanguage, Settings, SettingsError, SettingsUpdate, VoiceConfig,
    VoiceRole, validate_settings,
};

// Silence unused dev-dependency warnings; these are used by integration tests
#[cfg(test)]
use tokio_test as _;

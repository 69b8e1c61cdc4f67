//! ElevenLabs speech synthesis for parlons.
//!
//! [`ElevenLabsClient`] implements the core `SpeechProvider` and
//! `VoiceCatalog` ports over HTTP. [`CachedSpeechProvider`] wraps any
//! provider with an `AudioCache` so each (voice, model, text) is fetched
//! once.

#![deny(unsafe_code)]
#![deny(unused_crate_dependencies)]

mod cached;
mod client;
mod config;
mod error;
mod port;
mod voices;

// ============================================================================
// Public API
// ============================================================================

pub use cached::CachedSpeechProvider;
pub use client::ElevenLabsClient;
pub use config::{DEFAULT_BASE_URL, DEFAULT_TTS_MODEL, ElevenLabsConfig};
pub use error::TtsError;
pub use voices::{RecommendedVoice, recommended_voices};

// Silence unused dev-dependency warnings
#[cfg(test)]
use wiremock as _;

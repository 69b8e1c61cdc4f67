//! Playback error types.

use parlons_core::SpeechError;

/// Errors that can occur while producing or playing audio.
#[derive(Debug, thiserror::Error)]
pub enum VoiceError {
    /// Failed to open the audio output device.
    #[error("Failed to open audio output stream: {0}")]
    OutputStreamError(String),

    /// The audio bytes could not be decoded.
    #[error("Audio playback failed: {0}")]
    DecodeError(String),

    /// Speech synthesis failed.
    #[error(transparent)]
    Synthesis(#[from] SpeechError),

    /// The audio thread exited unexpectedly.
    #[error("Audio thread is no longer running")]
    AudioThreadDied,
}

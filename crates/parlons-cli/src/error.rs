//! CLI-specific error types and mappings.
//!
//! Maps `CoreError` and friends onto exit codes and user-facing messages.

use parlons_core::{CoreError, RepositoryError, SpeechError};
use parlons_voice::VoiceError;
use thiserror::Error;

/// CLI-specific error type.
#[derive(Debug, Error)]
pub enum CliError {
    /// Core domain error.
    #[error("{0}")]
    Core(String),

    /// Bad user input (unknown id, malformed file).
    #[error("{0}")]
    Arguments(String),

    /// IO error (file not found, permission denied, etc.).
    #[error("IO error: {0}")]
    Io(String),

    /// Missing or invalid configuration, e.g. no API key.
    #[error("{0}")]
    Config(String),

    /// Database error.
    #[error("Database error: {0}")]
    Database(String),

    /// The speech service refused or failed a request.
    #[error("{0}")]
    Service(String),

    /// The drill screen needs a terminal.
    #[error("The drill needs an interactive terminal")]
    NotATerminal,
}

impl CliError {
    /// Map error to an exit code (see sysexits.h).
    pub const fn exit_code(&self) -> i32 {
        match self {
            Self::Core(_) => 1,
            Self::Arguments(_) => 2,      // EX_USAGE
            Self::Io(_) => 74,            // EX_IOERR
            Self::Config(_) => 78,        // EX_CONFIG
            Self::Database(_) => 73,      // EX_CANTCREAT (closest fit)
            Self::Service(_) => 69,       // EX_UNAVAILABLE
            Self::NotATerminal => 66,     // EX_NOINPUT
        }
    }
}

impl From<CoreError> for CliError {
    fn from(err: CoreError) -> Self {
        match err {
            CoreError::Repository(RepositoryError::NotFound(msg)) => Self::Arguments(msg),
            CoreError::Repository(repo_err) => Self::Database(repo_err.to_string()),
            CoreError::Settings(settings_err) => Self::Config(settings_err.to_string()),
            CoreError::Import(import_err) => Self::Arguments(import_err.to_string()),
            CoreError::Speech(speech_err) => speech_err.into(),
            CoreError::Validation(msg) => Self::Arguments(msg),
            CoreError::Configuration(msg) => Self::Config(msg),
            CoreError::Internal(msg) => Self::Core(msg),
        }
    }
}

impl From<SpeechError> for CliError {
    fn from(err: SpeechError) -> Self {
        match err {
            SpeechError::MissingCredential | SpeechError::MissingVoice => {
                Self::Config(err.to_string())
            }
            other => Self::Service(other.to_string()),
        }
    }
}

impl From<VoiceError> for CliError {
    fn from(err: VoiceError) -> Self {
        match err {
            VoiceError::Synthesis(speech_err) => speech_err.into(),
            other => Self::Core(other.to_string()),
        }
    }
}

impl From<std::io::Error> for CliError {
    fn from(err: std::io::Error) -> Self {
        Self::Io(err.to_string())
    }
}

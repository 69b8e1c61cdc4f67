//! Port definitions (trait abstractions) for external systems.
//!
//! Ports define the interfaces that the core domain expects from infrastructure.
//! They contain no implementation details and use only domain types.
//!
//! # Design Rules
//!
//! - No `sqlx` or `reqwest` types in any signature
//! - Traits are minimal and CRUD-focused for repositories
//! - The speech port speaks in requests and encoded audio bytes only

pub mod audio_cache;
pub mod progress_repository;
pub mod sentence_repository;
pub mod settings_repository;
pub mod speech;

use std::sync::Arc;
use thiserror::Error;

pub use audio_cache::{AudioCache, AudioCacheKey};
pub use progress_repository::ProgressRepository;
pub use sentence_repository::SentenceRepository;
pub use settings_repository::SettingsRepository;
pub use speech::{SpeechError, SpeechProvider, SpeechRequest, VoiceCatalog, VoiceSummary};

/// Container for all repository trait objects.
///
/// Lives in core so that `AppCore` can accept it without depending on
/// `parlons-db`.
///
/// ```ignore
/// let repos = parlons_db::CoreFactory::build_repos(&pool);
/// let core = AppCore::new(repos.clone());
/// ```
#[derive(Clone)]
pub struct Repos {
    pub settings: Arc<dyn SettingsRepository>,
    pub sentences: Arc<dyn SentenceRepository>,
    pub progress: Arc<dyn ProgressRepository>,
    /// Synthesized audio keyed by voice, model and text.
    pub audio_cache: Arc<dyn AudioCache>,
}

impl Repos {
    /// Create a new Repos container.
    pub fn new(
        settings: Arc<dyn SettingsRepository>,
        sentences: Arc<dyn SentenceRepository>,
        progress: Arc<dyn ProgressRepository>,
        audio_cache: Arc<dyn AudioCache>,
    ) -> Self {
        Self {
            settings,
            sentences,
            progress,
            audio_cache,
        }
    }
}

/// Domain-specific errors for repository operations.
///
/// This error type abstracts away storage implementation details (e.g., sqlx errors)
/// and provides a clean interface for services to handle storage failures.
#[derive(Debug, Error)]
pub enum RepositoryError {
    /// The requested entity was not found.
    #[error("Not found: {0}")]
    NotFound(String),

    /// An entity with the same identifier already exists.
    #[error("Already exists: {0}")]
    AlreadyExists(String),

    /// Storage backend error (database, filesystem, etc.).
    #[error("Storage error: {0}")]
    Storage(String),

    /// Serialization or deserialization failed.
    #[error("Serialization error: {0}")]
    Serialization(String),

    /// A constraint was violated (e.g., unique constraint).
    #[error("Constraint violation: {0}")]
    Constraint(String),
}

/// Core error type for semantic domain errors.
///
/// Adapters map this to their own error types (CLI exit codes for now).
#[derive(Debug, Error)]
pub enum CoreError {
    /// Repository operation failed.
    #[error(transparent)]
    Repository(#[from] RepositoryError),

    /// Settings validation error.
    #[error(transparent)]
    Settings(#[from] crate::settings::SettingsError),

    /// Sentence file could not be imported.
    #[error(transparent)]
    Import(#[from] crate::import::ImportError),

    /// Speech provider failure.
    #[error(transparent)]
    Speech(#[from] SpeechError),

    /// Validation error (invalid input).
    #[error("Validation error: {0}")]
    Validation(String),

    /// Configuration error.
    #[error("Configuration error: {0}")]
    Configuration(String),

    /// Internal error (unexpected condition).
    #[error("Internal error: {0}")]
    Internal(String),
}

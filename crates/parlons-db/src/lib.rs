//! `SQLite` persistence for parlons.
//!
//! Implements the core repository ports (settings, sentences, progress) and
//! the audio cache on a single `SQLite` file.

#![deny(unsafe_code)]

pub mod factory;
pub mod repositories;
pub mod setup;

// Re-export factory for convenient access
pub use factory::CoreFactory;

// Re-export repository implementations
pub use repositories::{
    SqliteAudioCache, SqliteProgressRepository, SqliteSentenceRepository,
    SqliteSettingsRepository,
};

// Re-export setup functions for convenient access
pub use setup::setup_database;
#[cfg(any(test, feature = "test-utils"))]
pub use setup::setup_test_database;

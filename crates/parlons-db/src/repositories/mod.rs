//! Repository implementations using `SQLite`.
//!
//! The `SqlitePool` is confined to this module and never exposed through
//! the port trait signatures.

mod row_mappers;
mod sqlite_audio_cache;
mod sqlite_progress_repository;
mod sqlite_sentence_repository;
mod sqlite_settings_repository;

pub use sqlite_audio_cache::SqliteAudioCache;
pub use sqlite_progress_repository::SqliteProgressRepository;
pub use sqlite_sentence_repository::SqliteSentenceRepository;
pub use sqlite_settings_repository::SqliteSettingsRepository;

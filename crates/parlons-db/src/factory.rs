//! Composition utilities for building `AppCore` with `SQLite` backends.
//!
//! Construction only; no domain logic.

use sqlx::SqlitePool;
use std::sync::Arc;

use parlons_core::{AppCore, Repos};

use crate::repositories::{
    SqliteAudioCache, SqliteProgressRepository, SqliteSentenceRepository,
    SqliteSettingsRepository,
};

/// Factory for creating repository instances with `SQLite` backends.
pub struct CoreFactory;

impl CoreFactory {
    /// Build all `SQLite` repositories from a pool.
    ///
    /// This is the recommended way for adapters to obtain repositories.
    pub fn build_repos(pool: SqlitePool) -> Repos {
        Repos::new(
            Arc::new(SqliteSettingsRepository::new(pool.clone())),
            Arc::new(SqliteSentenceRepository::new(pool.clone())),
            Arc::new(SqliteProgressRepository::new(pool.clone())),
            Arc::new(SqliteAudioCache::new(pool)),
        )
    }

    /// Build a complete `AppCore` instance from a pool.
    ///
    /// ```ignore
    /// let pool = setup_database(&db_path).await?;
    /// let core = CoreFactory::build_app_core(pool);
    /// ```
    pub fn build_app_core(pool: SqlitePool) -> AppCore {
        AppCore::new(Self::build_repos(pool))
    }
}

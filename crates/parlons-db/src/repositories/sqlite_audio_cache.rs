//! `SQLite` implementation of the `AudioCache` port.

use async_trait::async_trait;
use sqlx::{Row, SqlitePool};

use parlons_core::{AudioCache, AudioCacheKey, RepositoryError};

use super::row_mappers::storage_err;

/// Audio clips stored as blobs, keyed by `voice:model:text`.
pub struct SqliteAudioCache {
    pool: SqlitePool,
}

impl SqliteAudioCache {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl AudioCache for SqliteAudioCache {
    async fn get(&self, key: &AudioCacheKey) -> Result<Option<Vec<u8>>, RepositoryError> {
        let row = sqlx::query("SELECT audio FROM audio_cache WHERE cache_key = ?")
            .bind(key.to_string())
            .fetch_optional(&self.pool)
            .await
            .map_err(storage_err)?;

        row.map(|r| r.try_get::<Vec<u8>, _>("audio").map_err(storage_err))
            .transpose()
    }

    async fn put(&self, key: &AudioCacheKey, audio: &[u8]) -> Result<(), RepositoryError> {
        sqlx::query(
            r#"INSERT OR REPLACE INTO audio_cache (
                cache_key, voice_id, model_id, text, audio, created_at
            ) VALUES (?, ?, ?, ?, ?, ?)"#,
        )
        .bind(key.to_string())
        .bind(&key.voice_id)
        .bind(&key.model_id)
        .bind(&key.text)
        .bind(audio)
        .bind(chrono::Utc::now().to_rfc3339())
        .execute(&self.pool)
        .await
        .map_err(storage_err)?;

        Ok(())
    }

    async fn clear(&self) -> Result<u64, RepositoryError> {
        let result = sqlx::query("DELETE FROM audio_cache")
            .execute(&self.pool)
            .await
            .map_err(storage_err)?;
        tracing::info!(removed = result.rows_affected(), "Cleared audio cache");
        Ok(result.rows_affected())
    }

    async fn count(&self) -> Result<u64, RepositoryError> {
        let (count,): (i64,) = sqlx::query_as("SELECT COUNT(*) FROM audio_cache")
            .fetch_one(&self.pool)
            .await
            .map_err(storage_err)?;
        Ok(u64::try_from(count).unwrap_or(0))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::setup_test_database;

    #[tokio::test]
    async fn test_put_get_count_clear() {
        let cache = SqliteAudioCache::new(setup_test_database().await.unwrap());
        let key = AudioCacheKey::new("v1", "eleven_v3", "Bonjour");

        assert_eq!(cache.get(&key).await.unwrap(), None);

        cache.put(&key, b"ID3fake").await.unwrap();
        assert_eq!(cache.get(&key).await.unwrap().as_deref(), Some(&b"ID3fake"[..]));
        assert_eq!(cache.count().await.unwrap(), 1);

        // Same text, other model: separate entry
        let other = AudioCacheKey::new("v1", "eleven_flash_v2_5", "Bonjour");
        assert_eq!(cache.get(&other).await.unwrap(), None);

        assert_eq!(cache.clear().await.unwrap(), 1);
        assert_eq!(cache.count().await.unwrap(), 0);
    }
}

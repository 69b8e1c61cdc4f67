//! `SQLite` implementation of the `ProgressRepository` trait.

use async_trait::async_trait;
use sqlx::SqlitePool;

use parlons_core::{Progress, ProgressRepository, RepositoryError};

use super::row_mappers::{id_to_db, row_to_progress, storage_err};

pub struct SqliteProgressRepository {
    pool: SqlitePool,
}

impl SqliteProgressRepository {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl ProgressRepository for SqliteProgressRepository {
    async fn load_all(&self) -> Result<Vec<Progress>, RepositoryError> {
        let rows = sqlx::query(
            "SELECT sentence_id, review_count, last_review_at, next_review_at, ease \
             FROM progress ORDER BY sentence_id",
        )
        .fetch_all(&self.pool)
        .await
        .map_err(storage_err)?;

        rows.iter().map(row_to_progress).collect()
    }

    async fn save(&self, progress: &Progress) -> Result<(), RepositoryError> {
        sqlx::query(
            r#"INSERT OR REPLACE INTO progress (
                sentence_id, review_count, last_review_at, next_review_at, ease
            ) VALUES (?, ?, ?, ?, ?)"#,
        )
        .bind(id_to_db(progress.sentence_id)?)
        .bind(i64::from(progress.review_count))
        .bind(progress.last_review_at.map(|t| t.to_rfc3339()))
        .bind(progress.next_review_at.map(|t| t.to_rfc3339()))
        .bind(progress.ease)
        .execute(&self.pool)
        .await
        .map_err(storage_err)?;

        Ok(())
    }

    async fn clear(&self) -> Result<(), RepositoryError> {
        sqlx::query("DELETE FROM progress")
            .execute(&self.pool)
            .await
            .map_err(storage_err)?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::setup_test_database;
    use chrono::{TimeZone, Utc};

    #[tokio::test]
    async fn test_save_load_and_clear() {
        let repo = SqliteProgressRepository::new(setup_test_database().await.unwrap());

        let mut progress = Progress::new(5);
        progress.record_review(Utc.with_ymd_and_hms(2024, 3, 1, 9, 30, 0).unwrap());
        repo.save(&progress).await.unwrap();

        // Saving again replaces rather than duplicates
        progress.record_review(Utc.with_ymd_and_hms(2024, 3, 2, 9, 30, 0).unwrap());
        repo.save(&progress).await.unwrap();

        let loaded = repo.load_all().await.unwrap();
        assert_eq!(loaded, vec![progress]);

        repo.clear().await.unwrap();
        assert!(repo.load_all().await.unwrap().is_empty());
    }
}

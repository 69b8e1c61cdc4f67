//! `SQLite` implementation of the `SentenceRepository` trait.

use async_trait::async_trait;
use sqlx::{Sqlite, SqlitePool, Transaction};

use parlons_core::{RepositoryError, Sentence, SentenceId, SentenceRepository};

use super::row_mappers::{SENTENCE_SELECT_COLUMNS, id_to_db, row_to_sentence, storage_err};

/// Stores the sentence list with an explicit position column for order.
pub struct SqliteSentenceRepository {
    pool: SqlitePool,
}

impl SqliteSentenceRepository {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl SentenceRepository for SqliteSentenceRepository {
    async fn load_all(&self) -> Result<Vec<Sentence>, RepositoryError> {
        let query = format!("SELECT {SENTENCE_SELECT_COLUMNS} FROM sentences ORDER BY position");
        let rows = sqlx::query(&query)
            .fetch_all(&self.pool)
            .await
            .map_err(storage_err)?;

        rows.iter().map(row_to_sentence).collect()
    }

    async fn replace_all(&self, sentences: &[Sentence]) -> Result<(), RepositoryError> {
        let mut tx = self.pool.begin().await.map_err(storage_err)?;

        sqlx::query("DELETE FROM sentences")
            .execute(&mut *tx)
            .await
            .map_err(storage_err)?;

        match insert_in_order(&mut tx, sentences).await {
            Ok(()) => tx.commit().await.map_err(storage_err)?,
            Err(e) => {
                tx.rollback().await.map_err(storage_err)?;
                return Err(e);
            }
        }
        tracing::debug!(count = sentences.len(), "Replaced sentence list");
        Ok(())
    }

    async fn delete(&self, id: SentenceId) -> Result<(), RepositoryError> {
        let result = sqlx::query("DELETE FROM sentences WHERE id = ?")
            .bind(id_to_db(id)?)
            .execute(&self.pool)
            .await
            .map_err(storage_err)?;

        if result.rows_affected() == 0 {
            return Err(RepositoryError::NotFound(format!("sentence {id}")));
        }
        Ok(())
    }
}

async fn insert_in_order(
    tx: &mut Transaction<'_, Sqlite>,
    sentences: &[Sentence],
) -> Result<(), RepositoryError> {
    for (position, sentence) in sentences.iter().enumerate() {
        let position = i64::try_from(position).map_err(storage_err)?;
        sqlx::query(
            r#"INSERT INTO sentences (
                position, id, fr, cn, en, phonetic, notes, lesson, difficulty
            ) VALUES (?, ?, ?, ?, ?, ?, ?, ?, ?)"#,
        )
        .bind(position)
        .bind(id_to_db(sentence.id)?)
        .bind(&sentence.fr)
        .bind(&sentence.native)
        .bind(&sentence.secondary)
        .bind(&sentence.phonetic)
        .bind(&sentence.notes)
        .bind(sentence.lesson.map(i64::from))
        .bind(sentence.difficulty.map(i64::from))
        .execute(&mut **tx)
        .await
        .map_err(|e| match e {
            sqlx::Error::Database(db) if db.is_unique_violation() => {
                RepositoryError::AlreadyExists(format!("sentence {}", sentence.id))
            }
            other => storage_err(other),
        })?;
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::setup_test_database;
    use parlons_core::sample_sentences;

    async fn repo() -> SqliteSentenceRepository {
        SqliteSentenceRepository::new(setup_test_database().await.unwrap())
    }

    #[tokio::test]
    async fn test_empty_by_default() {
        assert!(repo().await.load_all().await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_replace_preserves_order_and_fields() {
        let repo = repo().await;
        let mut sentences = vec![
            Sentence::new(10, "Oui", "是", "Yes").with_lesson(2),
            Sentence::new(3, "Non", "不是", "No"),
        ];
        sentences[1].phonetic = Some("nɔ̃".to_string());

        repo.replace_all(&sentences).await.unwrap();
        assert_eq!(repo.load_all().await.unwrap(), sentences);
    }

    #[tokio::test]
    async fn test_optional_fields_survive_storage_and_file_round_trip() {
        let repo = repo().await;
        let sentences = vec![Sentence {
            id: 9,
            fr: "Où est la gare ?".to_string(),
            native: "火车站在哪里？".to_string(),
            secondary: "Where is the station?".to_string(),
            phonetic: Some("u.ɛ la ɡaʁ".to_string()),
            notes: Some("« gare » is feminine".to_string()),
            lesson: Some(0),
            difficulty: Some(3),
        }];

        repo.replace_all(&sentences).await.unwrap();
        let stored = repo.load_all().await.unwrap();
        assert_eq!(stored, sentences);

        let text = parlons_core::export_sentences(&stored).unwrap();
        assert_eq!(parlons_core::parse_sentences(&text).unwrap(), sentences);
    }

    #[tokio::test]
    async fn test_failed_replace_keeps_previous_list() {
        let repo = repo().await;
        repo.replace_all(&sample_sentences()).await.unwrap();

        let duplicate = vec![Sentence::new(1, "a", "", ""), Sentence::new(1, "b", "", "")];
        let err = repo.replace_all(&duplicate).await.unwrap_err();
        assert!(matches!(err, RepositoryError::AlreadyExists(_)));

        assert_eq!(repo.load_all().await.unwrap(), sample_sentences());
    }

    #[tokio::test]
    async fn test_delete() {
        let repo = repo().await;
        repo.replace_all(&sample_sentences()).await.unwrap();

        repo.delete(1).await.unwrap();
        let remaining = repo.load_all().await.unwrap();
        assert_eq!(remaining.len(), 19);
        assert_eq!(remaining[0].id, 2);

        assert!(matches!(
            repo.delete(1).await,
            Err(RepositoryError::NotFound(_))
        ));
    }
}

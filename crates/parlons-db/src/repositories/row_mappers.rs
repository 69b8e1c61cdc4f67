//! Row mapping helpers for `SQLite` queries.

use chrono::{DateTime, Utc};
use parlons_core::{Progress, RepositoryError, Sentence, SentenceId};
use sqlx::Row;
use sqlx::sqlite::SqliteRow;

/// Shared SELECT column list for sentence queries.
pub const SENTENCE_SELECT_COLUMNS: &str =
    "id, fr, cn, en, phonetic, notes, lesson, difficulty";

pub fn storage_err(e: impl std::fmt::Display) -> RepositoryError {
    RepositoryError::Storage(e.to_string())
}

/// Sentence ids are `u64` in the domain and `INTEGER` (i64) in `SQLite`.
pub fn id_to_db(id: SentenceId) -> Result<i64, RepositoryError> {
    i64::try_from(id).map_err(|_| RepositoryError::Constraint(format!("id {id} out of range")))
}

fn id_from_db(raw: i64) -> Result<SentenceId, RepositoryError> {
    SentenceId::try_from(raw).map_err(|_| RepositoryError::Storage(format!("negative id {raw}")))
}

fn small_from_db(raw: Option<i64>) -> Option<u32> {
    raw.and_then(|v| u32::try_from(v).ok())
}

/// Parse an RFC 3339 timestamp column.
pub fn parse_datetime(datetime_str: Option<String>) -> Option<DateTime<Utc>> {
    datetime_str.and_then(|s| {
        DateTime::parse_from_rfc3339(&s)
            .map(|dt| dt.with_timezone(&Utc))
            .ok()
    })
}

/// Parse a database row into a Sentence.
pub fn row_to_sentence(row: &SqliteRow) -> Result<Sentence, RepositoryError> {
    Ok(Sentence {
        id: id_from_db(row.try_get("id").map_err(storage_err)?)?,
        fr: row.try_get("fr").map_err(storage_err)?,
        native: row.try_get("cn").map_err(storage_err)?,
        secondary: row.try_get("en").map_err(storage_err)?,
        phonetic: row.try_get("phonetic").map_err(storage_err)?,
        notes: row.try_get("notes").map_err(storage_err)?,
        lesson: small_from_db(row.try_get("lesson").map_err(storage_err)?),
        difficulty: small_from_db(row.try_get("difficulty").map_err(storage_err)?),
    })
}

/// Parse a database row into a Progress record.
pub fn row_to_progress(row: &SqliteRow) -> Result<Progress, RepositoryError> {
    let review_count: i64 = row.try_get("review_count").map_err(storage_err)?;

    Ok(Progress {
        sentence_id: id_from_db(row.try_get("sentence_id").map_err(storage_err)?)?,
        review_count: u32::try_from(review_count).unwrap_or(0),
        last_review_at: parse_datetime(row.try_get("last_review_at").map_err(storage_err)?),
        next_review_at: parse_datetime(row.try_get("next_review_at").map_err(storage_err)?),
        ease: row.try_get("ease").map_err(storage_err)?,
    })
}

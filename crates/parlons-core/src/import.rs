//! Sentence file import and export.
//!
//! Files are JSON arrays of sentence objects. Import is lenient about
//! individual fields (missing ids are numbered by position, skipping ids
//! claimed elsewhere in the file, and a missing secondary prompt falls back
//! to the native one) but strict about the overall shape.

use std::collections::HashSet;

use serde_json::{Map, Value};
use thiserror::Error;

use crate::domain::{Sentence, SentenceId};

/// Why a sentence file was rejected.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ImportError {
    /// The text is not JSON at all.
    #[error("Invalid JSON format")]
    InvalidJson,

    /// Valid JSON whose top level is not an array.
    #[error("JSON must be an array")]
    NotAnArray,

    /// An element of the array is not an object.
    #[error("Entry {index} is not an object")]
    InvalidEntry { index: usize },

    /// Two entries resolve to the same id.
    #[error("Duplicate sentence id {0}")]
    DuplicateId(SentenceId),

    #[error("Failed to serialize sentences: {0}")]
    Serialize(String),
}

/// Parse a sentence file.
///
/// The whole file is rejected on the first structural error; nothing is
/// partially imported.
pub fn parse_sentences(text: &str) -> Result<Vec<Sentence>, ImportError> {
    let value: Value = serde_json::from_str(text).map_err(|_| ImportError::InvalidJson)?;
    let Value::Array(entries) = value else {
        return Err(ImportError::NotAnArray);
    };

    let mut drafts = Vec::with_capacity(entries.len());
    for (index, entry) in entries.iter().enumerate() {
        let Value::Object(fields) = entry else {
            return Err(ImportError::InvalidEntry { index });
        };
        drafts.push((fields.get("id").and_then(id_value), fields));
    }

    let explicit: Vec<SentenceId> = drafts.iter().filter_map(|(id, _)| *id).collect();
    if let Some(dup) = first_duplicate_id(explicit.iter().copied()) {
        return Err(ImportError::DuplicateId(dup));
    }

    // Entries without an id take their position, or the next id nobody claimed.
    let mut taken: HashSet<SentenceId> = explicit.into_iter().collect();
    let sentences: Vec<Sentence> = drafts
        .into_iter()
        .enumerate()
        .map(|(index, (id, fields))| {
            let id = id.unwrap_or_else(|| {
                let mut candidate = index as SentenceId + 1;
                while !taken.insert(candidate) {
                    candidate += 1;
                }
                candidate
            });
            sentence_from_fields(fields, id)
        })
        .collect();

    tracing::debug!(count = sentences.len(), "Parsed sentence file");
    Ok(sentences)
}

/// Serialize sentences to the same format [`parse_sentences`] reads.
pub fn export_sentences(sentences: &[Sentence]) -> Result<String, ImportError> {
    serde_json::to_string_pretty(sentences).map_err(|e| ImportError::Serialize(e.to_string()))
}

/// The first id that appears more than once, if any.
pub(crate) fn first_duplicate_id(ids: impl IntoIterator<Item = SentenceId>) -> Option<SentenceId> {
    let mut seen = HashSet::new();
    ids.into_iter().find(|id| !seen.insert(*id))
}

fn sentence_from_fields(fields: &Map<String, Value>, id: SentenceId) -> Sentence {
    let fr = text_field(fields, "fr").unwrap_or_default();
    let native = text_field(fields, "cn").unwrap_or_default();
    let secondary = text_field(fields, "en").unwrap_or_else(|| native.clone());

    Sentence {
        id,
        fr,
        native,
        secondary,
        phonetic: text_field(fields, "phonetic"),
        notes: text_field(fields, "notes"),
        lesson: fields.get("lesson").and_then(number_value),
        difficulty: fields.get("difficulty").and_then(number_value),
    }
}

fn id_value(value: &Value) -> Option<SentenceId> {
    match value {
        Value::Number(n) => n.as_u64(),
        Value::String(s) => s.trim().parse().ok(),
        _ => None,
    }
}

fn number_value(value: &Value) -> Option<u32> {
    id_value(value).and_then(|n| u32::try_from(n).ok())
}

/// A present, non-null field as text. Scalars are stringified.
fn text_field(fields: &Map<String, Value>, name: &str) -> Option<String> {
    match fields.get(name)? {
        Value::Null => None,
        Value::String(s) => Some(s.clone()),
        Value::Bool(b) => Some(b.to_string()),
        Value::Number(n) => Some(n.to_string()),
        other => Some(other.to_string()),
    }
}

//! Sentence service - list management, import and export.

use std::sync::Arc;

use crate::domain::{Sentence, SentenceId, SentenceList};
use crate::import::{ImportError, export_sentences, first_duplicate_id, parse_sentences};
use crate::ports::{CoreError, SentenceRepository};
use crate::sample::sample_sentences;

/// Service for the stored sentence list.
pub struct SentenceService {
    repo: Arc<dyn SentenceRepository>,
}

impl SentenceService {
    pub fn new(repo: Arc<dyn SentenceRepository>) -> Self {
        Self { repo }
    }

    /// The stored list in drill order.
    pub async fn list(&self) -> Result<SentenceList, CoreError> {
        Ok(self.repo.load_all().await?.into())
    }

    /// Parse a sentence file and replace the stored list with it.
    ///
    /// A rejected file leaves the stored list untouched.
    pub async fn import_json(&self, text: &str) -> Result<SentenceList, CoreError> {
        let sentences = parse_sentences(text)?;
        self.repo.replace_all(&sentences).await?;
        tracing::info!(count = sentences.len(), "Imported sentences");
        Ok(sentences.into())
    }

    /// The stored list as a sentence file.
    pub async fn export_json(&self) -> Result<String, CoreError> {
        let sentences = self.repo.load_all().await?;
        Ok(export_sentences(&sentences)?)
    }

    /// Replace the stored list with `sentences`.
    pub async fn replace(&self, sentences: Vec<Sentence>) -> Result<SentenceList, CoreError> {
        if let Some(dup) = first_duplicate_id(sentences.iter().map(|s| s.id)) {
            return Err(CoreError::Validation(
                ImportError::DuplicateId(dup).to_string(),
            ));
        }
        self.repo.replace_all(&sentences).await?;
        Ok(sentences.into())
    }

    /// Remove one sentence.
    pub async fn delete(&self, id: SentenceId) -> Result<(), CoreError> {
        self.repo.delete(id).await?;
        tracing::debug!(id, "Deleted sentence");
        Ok(())
    }

    /// Replace the stored list with the built-in starter set.
    pub async fn load_sample(&self) -> Result<SentenceList, CoreError> {
        self.replace(sample_sentences()).await
    }

    /// Remove every sentence.
    pub async fn clear(&self) -> Result<(), CoreError> {
        self.repo.replace_all(&[]).await?;
        Ok(())
    }
}

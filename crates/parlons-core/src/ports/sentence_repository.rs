//! Sentence repository trait definition.

use async_trait::async_trait;

use super::RepositoryError;
use crate::domain::{Sentence, SentenceId};

/// Persistence for the ordered sentence list.
///
/// The list is the unit of storage: imports replace it wholesale, and the
/// drill only ever reads it in order.
#[async_trait]
pub trait SentenceRepository: Send + Sync {
    /// All sentences in drill order. Empty if nothing is stored.
    async fn load_all(&self) -> Result<Vec<Sentence>, RepositoryError>;

    /// Replace the stored list atomically.
    ///
    /// Either every sentence is written or the previous list is kept.
    async fn replace_all(&self, sentences: &[Sentence]) -> Result<(), RepositoryError>;

    /// Remove one sentence by id.
    ///
    /// Returns [`RepositoryError::NotFound`] if no sentence has that id.
    async fn delete(&self, id: SentenceId) -> Result<(), RepositoryError>;
}

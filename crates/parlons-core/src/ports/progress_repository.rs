//! Progress repository trait definition.

use async_trait::async_trait;

use super::RepositoryError;
use crate::domain::Progress;

#[async_trait]
pub trait ProgressRepository: Send + Sync {
    /// All stored progress records, ordered by sentence id.
    async fn load_all(&self) -> Result<Vec<Progress>, RepositoryError>;

    /// Insert or replace the record for `progress.sentence_id`.
    async fn save(&self, progress: &Progress) -> Result<(), RepositoryError>;

    /// Drop every record.
    async fn clear(&self) -> Result<(), RepositoryError>;
}

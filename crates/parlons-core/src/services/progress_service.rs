//! Progress service.

use std::sync::Arc;

use chrono::{DateTime, Utc};

use crate::domain::{Progress, SentenceId};
use crate::ports::{CoreError, ProgressRepository};

/// Reads and records per-sentence review progress.
pub struct ProgressService {
    repo: Arc<dyn ProgressRepository>,
}

impl ProgressService {
    pub fn new(repo: Arc<dyn ProgressRepository>) -> Self {
        Self { repo }
    }

    pub async fn list(&self) -> Result<Vec<Progress>, CoreError> {
        Ok(self.repo.load_all().await?)
    }

    /// Progress for one sentence; a fresh record if none is stored.
    pub async fn get(&self, sentence_id: SentenceId) -> Result<Progress, CoreError> {
        let stored = self.repo.load_all().await?;
        Ok(stored
            .into_iter()
            .find(|p| p.sentence_id == sentence_id)
            .unwrap_or_else(|| Progress::new(sentence_id)))
    }

    /// Count one review of `sentence_id` at `at`.
    pub async fn record_review(
        &self,
        sentence_id: SentenceId,
        at: DateTime<Utc>,
    ) -> Result<Progress, CoreError> {
        let mut progress = self.get(sentence_id).await?;
        progress.record_review(at);
        self.repo.save(&progress).await?;
        Ok(progress)
    }

    pub async fn clear(&self) -> Result<(), CoreError> {
        Ok(self.repo.clear().await?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ports::RepositoryError;
    use async_trait::async_trait;
    use std::collections::BTreeMap;
    use std::sync::Mutex;

    #[derive(Default)]
    struct MockProgressRepo {
        records: Mutex<BTreeMap<SentenceId, Progress>>,
    }

    #[async_trait]
    impl ProgressRepository for MockProgressRepo {
        async fn load_all(&self) -> Result<Vec<Progress>, RepositoryError> {
            Ok(self.records.lock().unwrap().values().cloned().collect())
        }

        async fn save(&self, progress: &Progress) -> Result<(), RepositoryError> {
            self.records
                .lock()
                .unwrap()
                .insert(progress.sentence_id, progress.clone());
            Ok(())
        }

        async fn clear(&self) -> Result<(), RepositoryError> {
            self.records.lock().unwrap().clear();
            Ok(())
        }
    }

    #[tokio::test]
    async fn test_unknown_sentence_gets_fresh_record() {
        let service = ProgressService::new(Arc::new(MockProgressRepo::default()));
        let progress = service.get(9).await.unwrap();
        assert_eq!(progress, Progress::new(9));
    }

    #[tokio::test]
    async fn test_record_review_persists() {
        let service = ProgressService::new(Arc::new(MockProgressRepo::default()));
        let now = Utc::now();
        service.record_review(2, now).await.unwrap();
        service.record_review(2, now).await.unwrap();

        let all = service.list().await.unwrap();
        assert_eq!(all.len(), 1);
        assert_eq!(all[0].review_count, 2);

        service.clear().await.unwrap();
        assert!(service.list().await.unwrap().is_empty());
    }
}

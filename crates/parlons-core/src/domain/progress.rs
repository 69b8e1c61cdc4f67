//! Per-sentence review progress.
//!
//! The record is persisted alongside the sentences but the drill does not
//! consult it; no scheduling is derived from it.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::sentence::SentenceId;

/// Starting ease factor for a sentence that has never been reviewed.
pub const DEFAULT_EASE: f64 = 2.5;

/// Review history of one sentence.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Progress {
    pub sentence_id: SentenceId,
    pub review_count: u32,
    pub last_review_at: Option<DateTime<Utc>>,
    pub next_review_at: Option<DateTime<Utc>>,
    pub ease: f64,
}

impl Progress {
    /// Fresh record for a sentence with no reviews.
    pub const fn new(sentence_id: SentenceId) -> Self {
        Self {
            sentence_id,
            review_count: 0,
            last_review_at: None,
            next_review_at: None,
            ease: DEFAULT_EASE,
        }
    }

    /// Count one review at `at`.
    pub fn record_review(&mut self, at: DateTime<Utc>) {
        self.review_count = self.review_count.saturating_add(1);
        self.last_review_at = Some(at);
    }
}

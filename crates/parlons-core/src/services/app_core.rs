//! `AppCore` - the primary application facade.
//!
//! Adapters receive an `AppCore` built at their composition root and reach
//! every stored concern through it.

use crate::ports::Repos;

use super::{ProgressService, SentenceService, SettingsService};

/// The core application facade.
///
/// ```ignore
/// let repos = CoreFactory::build_repos(&pool);
/// let core = AppCore::new(repos);
/// let sentences = core.sentences().list().await?;
/// ```
pub struct AppCore {
    settings: SettingsService,
    sentences: SentenceService,
    progress: ProgressService,
}

impl AppCore {
    /// Create a new `AppCore` over the given repositories.
    pub fn new(repos: Repos) -> Self {
        Self {
            settings: SettingsService::new(repos.settings),
            sentences: SentenceService::new(repos.sentences),
            progress: ProgressService::new(repos.progress),
        }
    }

    /// Access the settings service.
    pub const fn settings(&self) -> &SettingsService {
        &self.settings
    }

    /// Access the sentence service.
    pub const fn sentences(&self) -> &SentenceService {
        &self.sentences
    }

    /// Access the progress service.
    pub const fn progress(&self) -> &ProgressService {
        &self.progress
    }
}

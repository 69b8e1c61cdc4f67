//! Core services - the application's business logic layer.
//!
//! Services orchestrate between ports (trait interfaces) and domain logic.
//! They don't know about concrete implementations.

mod app_core;
mod progress_service;
mod sentence_service;
mod settings_service;

pub use app_core::AppCore;
pub use progress_service::ProgressService;
pub use sentence_service::SentenceService;
pub use settings_service::SettingsService;

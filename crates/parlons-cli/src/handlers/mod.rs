//! Command handlers.
//!
//! Handlers follow one pattern: `pub async fn execute(ctx: &CliContext, ...)
//! -> Result<()>`. They parse CLI input, call the `AppCore` (or a client
//! built by the context) and format the result for the terminal. No business
//! logic and no direct repository access.

pub mod cache;
pub mod drill;
pub mod sentences;
pub mod settings;
pub mod voices;

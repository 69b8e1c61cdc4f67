//! Audio cache command handler.

use anyhow::Result;
use parlons_core::AudioCache;

use crate::bootstrap::CliContext;
use crate::commands::CacheCommand;
use crate::error::CliError;

pub async fn execute(ctx: &CliContext, command: CacheCommand) -> Result<()> {
    match command {
        CacheCommand::Count => {
            let count = ctx
                .audio_cache
                .count()
                .await
                .map_err(|e| CliError::Database(e.to_string()))?;
            println!("{count} cached clip(s)");
        }
        CacheCommand::Clear => {
            let removed = ctx
                .audio_cache
                .clear()
                .await
                .map_err(|e| CliError::Database(e.to_string()))?;
            println!("Removed {removed} cached clip(s).");
        }
    }
    Ok(())
}

//! Settings command handler.

use anyhow::Result;
use parlons_core::{Settings, SettingsUpdate};

use crate::bootstrap::CliContext;
use crate::commands::{SetArgs, SettingsCommand};
use crate::error::CliError;
use crate::presentation::print_separator;
use crate::utils::input;

pub async fn execute(ctx: &CliContext, command: SettingsCommand) -> Result<()> {
    match command {
        SettingsCommand::Show => {
            let stored = ctx.app().settings().get().await.map_err(CliError::from)?;
            let effective = ctx.settings().await?;
            display_settings(&stored, effective.has_api_key() && !stored.has_api_key());
        }
        SettingsCommand::Set(args) => set(ctx, args).await?,
        SettingsCommand::Reset { yes } => {
            if !yes && !input::prompt_confirmation("Reset all settings, including the API key?")? {
                println!("Reset cancelled.");
                return Ok(());
            }
            let settings = ctx.app().settings().reset().await.map_err(CliError::from)?;
            println!("Settings restored to defaults.");
            display_settings(&settings, false);
        }
    }
    Ok(())
}

async fn set(ctx: &CliContext, args: SetArgs) -> Result<()> {
    if args.is_empty() {
        return Err(CliError::Arguments(
            "Nothing to change. See `parlons settings set --help`.".to_string(),
        )
        .into());
    }

    let update = SettingsUpdate::from(args);
    let settings = ctx
        .app()
        .settings()
        .update(update)
        .await
        .map_err(CliError::from)?;
    println!("Settings saved.");
    display_settings(&settings, false);
    Ok(())
}

fn display_settings(settings: &Settings, key_from_env: bool) {
    let key = if settings.has_api_key() {
        "set".to_string()
    } else if key_from_env {
        format!("from {}", crate::bootstrap::API_KEY_ENV)
    } else {
        "not set".to_string()
    };

    print_separator(40);
    println!("{:<18} {key}", "API key");
    println!("{:<18} {}", "French voice", or_none(&settings.voice_id_fr));
    println!("{:<18} {}", "Native voice", or_none(&settings.voice_id_native));
    println!("{:<18} {}", "Secondary voice", or_none(&settings.voice_id_secondary));
    println!("{:<18} {}", "Prompt language", settings.prompt_language);
    println!("{:<18} {}", "Model", settings.model_id);
    print_separator(40);
}

fn or_none(value: &str) -> &str {
    if value.trim().is_empty() {
        "(none, silent)"
    } else {
        value
    }
}

//! Voice listing.

use anyhow::Result;
use parlons_core::{VoiceCatalog, VoiceRole};
use parlons_tts::recommended_voices;

use crate::bootstrap::CliContext;
use crate::error::CliError;
use crate::presentation::print_separator;

pub async fn execute(ctx: &CliContext, recommended: bool) -> Result<()> {
    if recommended {
        print_recommended();
        return Ok(());
    }

    let settings = ctx.settings().await?;
    if !settings.has_api_key() {
        return Err(CliError::Config(
            "Please enter an API key first (parlons settings set --api-key ...)".to_string(),
        )
        .into());
    }

    let client = ctx.speech_client(&settings)?;
    let voices = client.list_voices().await.map_err(CliError::from)?;
    if voices.is_empty() {
        println!("No voices available for this key.");
        return Ok(());
    }

    println!("{:<24} NAME", "VOICE ID");
    print_separator(50);
    for voice in &voices {
        println!("{:<24} {}", voice.voice_id, voice.name);
    }
    println!();
    println!("{} voice(s). Assign one with: parlons settings set --voice-fr <id>", voices.len());
    Ok(())
}

fn print_recommended() {
    for (role, title) in [
        (VoiceRole::Target, "French"),
        (VoiceRole::Native, "Native prompts"),
        (VoiceRole::Secondary, "Secondary prompts"),
    ] {
        println!("{title} (--voice-{role}):");
        for voice in recommended_voices(role) {
            println!("  {:<24} {:<10} {}", voice.voice_id, voice.name, voice.description);
        }
        println!();
    }
}

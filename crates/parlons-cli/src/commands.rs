//! Subcommand definitions.

use std::path::PathBuf;

use clap::{Args, Subcommand};
use parlons_core::{PromptLanguage, SentenceId, SettingsUpdate};

#[derive(Subcommand)]
pub enum Commands {
    /// Run an interactive drill over the stored sentences
    Drill {
        /// Sentence to begin with (1-based)
        #[arg(long, default_value_t = 1, value_parser = clap::value_parser!(u32).range(1..))]
        start: u32,
    },

    /// Manage the sentence list
    Sentences {
        #[command(subcommand)]
        command: SentencesCommand,
    },

    /// Show or change settings
    Settings {
        #[command(subcommand)]
        command: SettingsCommand,
    },

    /// Inspect or clear the synthesized-audio cache
    Cache {
        #[command(subcommand)]
        command: CacheCommand,
    },

    /// List voices available to the configured API key
    Voices {
        /// Show the built-in suggestions instead of querying the API
        #[arg(long)]
        recommended: bool,
    },
}

#[derive(Subcommand)]
pub enum SentencesCommand {
    /// Print the stored sentences
    List,

    /// Replace the list with a JSON sentence file
    Import {
        /// Path to a JSON array of sentences
        file: PathBuf,
    },

    /// Write the list as JSON
    Export {
        /// Output file; stdout when omitted
        file: Option<PathBuf>,
    },

    /// Remove one sentence by id
    Delete { id: SentenceId },

    /// Replace the list with the built-in starter sentences
    Sample,

    /// Remove every sentence
    Clear {
        /// Skip the confirmation prompt
        #[arg(short, long)]
        yes: bool,
    },
}

#[derive(Subcommand)]
pub enum SettingsCommand {
    /// Print current settings (the API key is masked)
    Show,

    /// Change one or more settings
    Set(SetArgs),

    /// Restore defaults
    Reset {
        /// Skip the confirmation prompt
        #[arg(short, long)]
        yes: bool,
    },
}

/// Fields left out are unchanged; pass an empty string to clear one.
#[derive(Args, Debug, Default)]
pub struct SetArgs {
    /// ElevenLabs API key
    #[arg(long)]
    pub api_key: Option<String>,

    /// Voice for the French answer
    #[arg(long)]
    pub voice_fr: Option<String>,

    /// Voice for native-language prompts
    #[arg(long)]
    pub voice_native: Option<String>,

    /// Voice for secondary-language prompts
    #[arg(long)]
    pub voice_secondary: Option<String>,

    /// Prompt language: native or secondary
    #[arg(long)]
    pub prompt_language: Option<PromptLanguage>,

    /// Speech model id
    #[arg(long)]
    pub model: Option<String>,
}

impl SetArgs {
    pub fn is_empty(&self) -> bool {
        self.api_key.is_none()
            && self.voice_fr.is_none()
            && self.voice_native.is_none()
            && self.voice_secondary.is_none()
            && self.prompt_language.is_none()
            && self.model.is_none()
    }
}

impl From<SetArgs> for SettingsUpdate {
    fn from(args: SetArgs) -> Self {
        Self {
            api_key: args.api_key,
            voice_id_fr: args.voice_fr,
            voice_id_native: args.voice_native,
            voice_id_secondary: args.voice_secondary,
            prompt_language: args.prompt_language,
            model_id: args.model,
        }
    }
}

#[derive(Subcommand)]
pub enum CacheCommand {
    /// Number of cached clips
    Count,

    /// Delete every cached clip
    Clear,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn set_args_map_onto_update() {
        let args = SetArgs {
            voice_native: Some(String::new()),
            model: Some("eleven_v3".to_string()),
            ..SetArgs::default()
        };
        assert!(!args.is_empty());

        let update = SettingsUpdate::from(args);
        assert_eq!(update.voice_id_native.as_deref(), Some(""));
        assert_eq!(update.model_id.as_deref(), Some("eleven_v3"));
        assert!(update.api_key.is_none());
    }

    #[test]
    fn empty_set_args() {
        assert!(SetArgs::default().is_empty());
    }
}

//! Sentence list command handler.

use anyhow::{Context, Result};
use parlons_core::SentenceList;

use crate::bootstrap::CliContext;
use crate::commands::SentencesCommand;
use crate::error::CliError;
use crate::presentation::{format_optional, print_separator, truncate_string};
use crate::utils::input;

pub async fn execute(ctx: &CliContext, command: SentencesCommand) -> Result<()> {
    let sentences = ctx.app().sentences();
    match command {
        SentencesCommand::List => {
            let list = sentences.list().await.map_err(CliError::from)?;
            display_list(&list);
        }
        SentencesCommand::Import { file } => {
            let text = tokio::fs::read_to_string(&file)
                .await
                .with_context(|| format!("Failed to read {}", file.display()))?;
            let list = sentences.import_json(&text).await.map_err(CliError::from)?;
            println!("Imported {} sentence(s) from {}.", list.len(), file.display());
        }
        SentencesCommand::Export { file } => {
            let json = sentences.export_json().await.map_err(CliError::from)?;
            match file {
                Some(path) => {
                    tokio::fs::write(&path, json)
                        .await
                        .with_context(|| format!("Failed to write {}", path.display()))?;
                    println!("Exported to {}.", path.display());
                }
                None => println!("{json}"),
            }
        }
        SentencesCommand::Delete { id } => {
            sentences.delete(id).await.map_err(CliError::from)?;
            println!("Deleted sentence {id}.");
        }
        SentencesCommand::Sample => {
            let list = sentences.load_sample().await.map_err(CliError::from)?;
            println!("Loaded {} sample sentences.", list.len());
        }
        SentencesCommand::Clear { yes } => {
            if !yes && !input::prompt_confirmation("Remove every sentence?")? {
                println!("Clear cancelled.");
                return Ok(());
            }
            sentences.clear().await.map_err(CliError::from)?;
            ctx.app().progress().clear().await.map_err(CliError::from)?;
            println!("Sentence list cleared.");
        }
    }
    Ok(())
}

fn display_list(list: &SentenceList) {
    if list.is_empty() {
        println!("No sentences yet.");
        println!("Use 'parlons sentences sample' or 'parlons sentences import <file>'.");
        return;
    }

    println!("{:<6} {:<6} {:<34} PROMPT", "ID", "LESSON", "FRENCH");
    print_separator(80);
    for sentence in list {
        println!(
            "{:<6} {:<6} {:<34} {}",
            sentence.id,
            format_optional(sentence.lesson.as_ref(), "-"),
            truncate_string(&sentence.fr, 34),
            truncate_string(&sentence.native, 30),
        );
    }
    println!();
    println!("{} sentence(s)", list.len());
}

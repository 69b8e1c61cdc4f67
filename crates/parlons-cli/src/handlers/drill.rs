//! Interactive drill screen.
//!
//! Keys are read on a plain OS thread (`Term::read_key` blocks) and forwarded
//! over a channel; the async loop multiplexes keys, snapshot changes and
//! drill events.

use std::sync::Arc;
use std::thread;

use anyhow::{Context, Result};
use chrono::Utc;
use console::{Term, style};
use indicatif::{ProgressBar, ProgressDrawTarget, ProgressStyle};
use parlons_core::{DrillTimings, SentenceList};
use parlons_voice::{DrillConfig, DrillEvent, DrillSequencer, TokioClock};
use tokio::sync::mpsc;

use crate::bootstrap::CliContext;
use crate::error::CliError;
use crate::presentation::drill_view::BAR_LENGTH;
use crate::presentation::{DrillKey, DrillView, drill_key};

pub async fn execute(ctx: &CliContext, start: u32) -> Result<()> {
    let term = Term::stdout();
    if !term.is_term() {
        return Err(CliError::NotATerminal.into());
    }

    let settings = ctx.settings().await?;
    settings
        .check_audio_ready()
        .map_err(|e| CliError::Config(e.to_string()))?;

    let sentences = ctx.app().sentences().list().await.map_err(CliError::from)?;
    if sentences.is_empty() {
        println!("No sentences to drill.");
        println!("Use 'parlons sentences sample' or 'parlons sentences import <file>'.");
        return Ok(());
    }

    let config = DrillConfig::from_settings(&settings);
    if config.voices.is_silent() {
        println!("{}", style("No voices configured: the drill runs silently.").yellow());
    }
    let language = config.prompt_language;

    let playback = ctx.playback(&settings)?;
    let (sequencer, mut events) = DrillSequencer::new(
        sentences.clone(),
        config,
        playback,
        Arc::new(TokioClock),
        DrillTimings::default(),
    );
    let mut state = sequencer.subscribe();
    let mut keys = spawn_key_reader(term);
    let screen = DrillScreen::new()?;

    println!(
        "{}",
        style("space: restart   n: next   p: previous   r: replay   s: stop   q: quit").dim()
    );
    let first = usize::try_from(start).unwrap_or(usize::MAX).saturating_sub(1);
    sequencer.start_at(first);

    loop {
        tokio::select! {
            key = keys.recv() => match key {
                Some(DrillKey::Quit) | None => break,
                Some(key) => apply(&sequencer, key),
            },
            changed = state.changed() => {
                if changed.is_err() {
                    break;
                }
                let snapshot = *state.borrow_and_update();
                screen.render(&DrillView::new(
                    &snapshot,
                    sentences.get(snapshot.index),
                    language,
                ));
            }
            Some(event) = events.recv() => {
                handle_event(ctx, &screen, &sentences, event).await;
            }
        }
    }

    sequencer.stop();
    screen.finish();
    Ok(())
}

fn apply(sequencer: &DrillSequencer, key: DrillKey) {
    tracing::debug!(?key, "Drill key");
    match key {
        DrillKey::Start => sequencer.start(),
        DrillKey::Next => sequencer.next(),
        DrillKey::Prev => sequencer.prev(),
        DrillKey::Replay => sequencer.replay(),
        DrillKey::Stop => sequencer.stop(),
        DrillKey::Quit => {}
    }
}

/// Forward bound keys until the receiver goes away or the terminal fails.
fn spawn_key_reader(term: Term) -> mpsc::UnboundedReceiver<DrillKey> {
    let (tx, rx) = mpsc::unbounded_channel();
    thread::spawn(move || {
        loop {
            match term.read_key() {
                Ok(key) => {
                    if let Some(command) = drill_key(&key) {
                        if tx.send(command).is_err() {
                            break;
                        }
                    }
                }
                Err(e) => {
                    tracing::warn!(error = %e, "Failed to read key");
                    break;
                }
            }
        }
    });
    rx
}

async fn handle_event(
    ctx: &CliContext,
    screen: &DrillScreen,
    sentences: &SentenceList,
    event: DrillEvent,
) {
    match &event {
        DrillEvent::PlaybackFailed { role, message, .. } => {
            screen.note(&style(format!("{role} audio failed: {message}")).red().to_string());
        }
        DrillEvent::Finished { .. } => {
            screen.note(&style("Done. Press space to go again or q to quit.").green().to_string());
        }
        DrillEvent::Advanced { .. } | DrillEvent::PhaseChanged { .. } => {}
    }

    if let Some(sentence) = completed_index(&event).and_then(|i| sentences.get(i)) {
        if let Err(e) = ctx
            .app()
            .progress()
            .record_review(sentence.id, Utc::now())
            .await
        {
            tracing::warn!(id = sentence.id, error = %e, "Failed to record review");
        }
    }
}

/// Position of the sentence a drill event reports as fully played.
const fn completed_index(event: &DrillEvent) -> Option<usize> {
    match event {
        DrillEvent::Advanced { index } => index.checked_sub(1),
        DrillEvent::Finished { index } => Some(*index),
        DrillEvent::PhaseChanged { .. } | DrillEvent::PlaybackFailed { .. } => None,
    }
}

/// Two-line drill display: status and prompt, then the countdown bar.
struct DrillScreen {
    bar: ProgressBar,
}

impl DrillScreen {
    fn new() -> Result<Self> {
        let bar = ProgressBar::with_draw_target(Some(BAR_LENGTH), ProgressDrawTarget::stdout());
        let style = ProgressStyle::with_template(
            "{prefix:.bold.cyan} {wide_msg}\n{bar:50.green/white}",
        )
        .context("Invalid progress template")?
        .progress_chars("█▓░");
        bar.set_style(style);
        Ok(Self { bar })
    }

    fn render(&self, view: &DrillView) {
        self.bar
            .set_prefix(format!("[{}] {:<9}", view.position, view.label));

        let mut line = view.prompt.clone();
        if let Some(answer) = &view.answer {
            line.push_str(&format!("  →  {}", style(answer).green().bold()));
            if let Some(phonetic) = &view.phonetic {
                line.push_str(&format!(" {}", style(format!("[{phonetic}]")).dim()));
            }
        }
        if !view.countdown_text.is_empty() {
            line.push_str(&format!("  {}", style(&view.countdown_text).yellow()));
        }
        self.bar.set_message(line);
        self.bar.set_position(view.bar);
    }

    fn note(&self, message: &str) {
        self.bar.println(message);
    }

    fn finish(&self) {
        self.bar.finish_and_clear();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use parlons_core::DrillPhase;

    #[test]
    fn finished_reports_its_own_sentence() {
        assert_eq!(completed_index(&DrillEvent::Finished { index: 4 }), Some(4));
        assert_eq!(completed_index(&DrillEvent::Advanced { index: 3 }), Some(2));
        assert_eq!(completed_index(&DrillEvent::Advanced { index: 0 }), None);
        assert_eq!(
            completed_index(&DrillEvent::PhaseChanged {
                index: 1,
                phase: DrillPhase::Pausing,
            }),
            None
        );
    }
}

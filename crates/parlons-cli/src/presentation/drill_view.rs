//! What the drill screen shows for a given snapshot, and key bindings.

use console::Key;
use parlons_core::{DrillPhase, PromptLanguage, Sentence};
use parlons_voice::DrillSnapshot;

/// Scale of the countdown bar.
pub const BAR_LENGTH: u64 = 1000;

/// A drill command bound to a key.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DrillKey {
    Start,
    Next,
    Prev,
    Replay,
    Stop,
    Quit,
}

/// Map a keystroke to a drill command.
pub fn drill_key(key: &Key) -> Option<DrillKey> {
    match key {
        Key::Char(' ') | Key::Enter => Some(DrillKey::Start),
        Key::Char('n' | 'N') | Key::ArrowRight => Some(DrillKey::Next),
        Key::Char('p' | 'P') | Key::ArrowLeft => Some(DrillKey::Prev),
        Key::Char('r' | 'R') => Some(DrillKey::Replay),
        Key::Char('s' | 'S') => Some(DrillKey::Stop),
        Key::Char('q' | 'Q') | Key::Escape | Key::CtrlC => Some(DrillKey::Quit),
        _ => None,
    }
}

/// Text and bar position for one frame.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DrillView {
    pub label: &'static str,
    /// `i / n`, 1-based.
    pub position: String,
    pub prompt: String,
    /// The French text, revealed once the answer plays.
    pub answer: Option<String>,
    pub phonetic: Option<String>,
    /// Remaining countdown in `[0, BAR_LENGTH]`.
    pub bar: u64,
    pub countdown_text: String,
}

impl DrillView {
    pub fn new(
        snapshot: &DrillSnapshot,
        sentence: Option<&Sentence>,
        language: PromptLanguage,
    ) -> Self {
        let position = if snapshot.total == 0 {
            "0 / 0".to_string()
        } else {
            format!("{} / {}", snapshot.index + 1, snapshot.total)
        };

        let revealed = matches!(snapshot.phase, DrillPhase::Answering | DrillPhase::Pausing);
        let counting = snapshot.phase == DrillPhase::Anticipating;

        #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
        let bar = if counting {
            (snapshot.countdown.fraction_left() * BAR_LENGTH as f64).round() as u64
        } else {
            0
        };

        Self {
            label: snapshot.phase.label(),
            position,
            prompt: sentence
                .map(|s| s.prompt_text(language).to_string())
                .unwrap_or_default(),
            answer: sentence.filter(|_| revealed).map(|s| s.fr.clone()),
            phonetic: sentence
                .filter(|_| revealed)
                .and_then(|s| s.phonetic.clone()),
            bar: bar.min(BAR_LENGTH),
            countdown_text: if counting {
                format!("{:.1}s", snapshot.countdown.remaining().as_secs_f64())
            } else {
                String::new()
            },
        }
    }
}

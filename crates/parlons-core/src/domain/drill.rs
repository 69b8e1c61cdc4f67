//! Drill phases, countdown state and timing rules.
//!
//! ```text
//!   Idle → Prompting → Anticipating → Answering → Pausing ─┐
//!    ▲                  ▲                                   │
//!    │                  └──────── next sentence ◄───────────┤
//!    └──────────────────────── list exhausted ◄─────────────┘
//! ```

use std::time::Duration;

use serde::{Deserialize, Serialize};

/// Current stage of the drill for one sentence.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum DrillPhase {
    /// Not drilling. Initial state, and the state after stop or exhaustion.
    #[default]
    Idle,

    /// Prompt text is shown and its audio plays.
    Prompting,

    /// The learner tries to say the sentence in French; a countdown runs.
    Anticipating,

    /// The French answer plays.
    Answering,

    /// Short settle pause before the next sentence.
    Pausing,
}

impl DrillPhase {
    /// Short label for display.
    pub const fn label(self) -> &'static str {
        match self {
            Self::Idle => "",
            Self::Prompting => "LISTEN",
            Self::Anticipating => "YOUR TURN",
            Self::Answering => "ANSWER",
            Self::Pausing => "...",
        }
    }

    /// Whether a run is in progress.
    pub const fn is_active(self) -> bool {
        !matches!(self, Self::Idle)
    }
}

/// Remaining and total time of the anticipation countdown.
///
/// Invariant: `remaining <= total`. Only meaningful while the phase is
/// [`DrillPhase::Anticipating`]; zero otherwise.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Countdown {
    remaining: Duration,
    total: Duration,
}

impl Countdown {
    /// The zeroed countdown.
    pub const ZERO: Self = Self {
        remaining: Duration::ZERO,
        total: Duration::ZERO,
    };

    /// Create a countdown, clamping `remaining` to `total`.
    pub fn new(remaining: Duration, total: Duration) -> Self {
        Self {
            remaining: remaining.min(total),
            total,
        }
    }

    /// A countdown that has not started ticking yet.
    pub const fn full(total: Duration) -> Self {
        Self {
            remaining: total,
            total,
        }
    }

    pub const fn remaining(&self) -> Duration {
        self.remaining
    }

    pub const fn total(&self) -> Duration {
        self.total
    }

    /// Fraction of time left in `[0.0, 1.0]`; 0 when there is no countdown.
    pub fn fraction_left(&self) -> f64 {
        if self.total.is_zero() {
            0.0
        } else {
            self.remaining.as_secs_f64() / self.total.as_secs_f64()
        }
    }
}

/// Timing constants for a drill run.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DrillTimings {
    /// Anticipation time added per character of French text.
    pub per_char: Duration,

    /// Anticipation time every sentence gets.
    pub base: Duration,

    /// Pause after the French answer.
    pub pause: Duration,

    /// Delay between cancelling a run and starting its replacement.
    pub settle: Duration,

    /// Countdown refresh interval.
    pub tick: Duration,
}

impl Default for DrillTimings {
    fn default() -> Self {
        Self {
            per_char: Duration::from_millis(150),
            base: Duration::from_millis(2000),
            pause: Duration::from_millis(2000),
            settle: Duration::from_millis(100),
            tick: Duration::from_millis(50),
        }
    }
}

impl DrillTimings {
    /// Anticipation window for a French sentence.
    ///
    /// Character count is a crude stand-in for speech duration: short
    /// phrases get about two seconds, longer ones proportionally more.
    pub fn anticipation_window(&self, fr: &str) -> Duration {
        let chars = u32::try_from(fr.chars().count()).unwrap_or(u32::MAX);
        self.per_char.saturating_mul(chars).saturating_add(self.base)
    }
}

/// Anticipation window using the default timings: `chars * 150 ms + 2000 ms`.
pub fn anticipation_window(fr: &str) -> Duration {
    DrillTimings::default().anticipation_window(fr)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn anticipation_window_matches_formula() {
        assert_eq!(anticipation_window("Bonjour"), Duration::from_millis(3050));
        assert_eq!(anticipation_window(""), Duration::from_millis(2000));
        assert_eq!(
            anticipation_window("Comment vous appelez-vous ?"),
            Duration::from_millis(27 * 150 + 2000)
        );
    }

    #[test]
    fn anticipation_window_is_monotone_and_bounded_below() {
        let mut text = String::new();
        let mut previous = anticipation_window(&text);
        assert!(previous >= Duration::from_millis(2000));
        for c in "Où est la gare ? Très bien, merci".chars() {
            text.push(c);
            let current = anticipation_window(&text);
            assert!(current >= previous);
            assert!(current >= Duration::from_millis(2000));
            previous = current;
        }
    }

    #[test]
    fn countdown_clamps_remaining() {
        let c = Countdown::new(Duration::from_secs(5), Duration::from_secs(3));
        assert_eq!(c.remaining(), Duration::from_secs(3));
        assert_eq!(c.total(), Duration::from_secs(3));
    }

    #[test]
    fn countdown_fraction() {
        assert!(Countdown::ZERO.fraction_left().abs() < f64::EPSILON);
        let half = Countdown::new(Duration::from_millis(500), Duration::from_millis(1000));
        assert!((half.fraction_left() - 0.5).abs() < 1e-9);
    }

    #[test]
    fn only_idle_is_inactive() {
        assert!(!DrillPhase::Idle.is_active());
        assert!(DrillPhase::Prompting.is_active());
        assert!(DrillPhase::Pausing.is_active());
        assert_eq!(DrillPhase::default(), DrillPhase::Idle);
    }
}

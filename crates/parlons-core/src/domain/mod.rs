//! Domain types.
//!
//! Pure data with no I/O: sentences, drill phases and timings, and the
//! per-sentence progress record.

mod drill;
mod progress;
mod sentence;

pub use drill::{Countdown, DrillPhase, DrillTimings, anticipation_window};
pub use progress::{DEFAULT_EASE, Progress};
pub use sentence::{Sentence, SentenceId, SentenceList};

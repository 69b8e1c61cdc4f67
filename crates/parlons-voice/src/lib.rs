//! Audio playback and drill sequencing for parlons.
//!
//! ```text
//!   DrillSequencer ──► PlaybackController ──► SpeechProvider (cache / HTTP)
//!         │                     │
//!         ▼                     ▼
//!   watch snapshot        AudioOutput (rodio thread or null)
//! ```

#![deny(unused_crate_dependencies)]

#[cfg(feature = "rodio")]
pub mod audio_thread;
pub mod clock;
pub mod error;
pub mod output;
pub mod playback;
#[cfg(feature = "rodio")]
mod player;
pub mod sequencer;

// Re-export key types for convenience
#[cfg(feature = "rodio")]
pub use audio_thread::AudioThreadHandle;
pub use clock::{Clock, TokioClock};
pub use error::VoiceError;
pub use output::{AudioOutput, NullOutput};
pub use playback::{PlaybackController, PlaybackOutcome};
pub use sequencer::{DrillConfig, DrillEvent, DrillSequencer, DrillSnapshot};

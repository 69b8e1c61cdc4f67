//! Audio output port.

use tokio::sync::oneshot;

use crate::error::VoiceError;

/// A device that plays one encoded clip at a time.
///
/// `start` replaces whatever is playing. The returned receiver resolves with
/// `Ok(())` when the clip drains naturally; if the clip is stopped or
/// replaced first, the sender is dropped and the receiver yields an error.
pub trait AudioOutput: Send + Sync {
    fn start(&self, audio: Vec<u8>) -> Result<oneshot::Receiver<()>, VoiceError>;

    /// Halt playback immediately. Safe when idle.
    fn stop(&self);
}

/// Output that discards audio and reports completion at once.
///
/// Used when the binary is built without the `rodio` feature or no output
/// device is available; drills keep their timing, just silently.
#[derive(Debug, Clone, Copy, Default)]
pub struct NullOutput;

impl AudioOutput for NullOutput {
    fn start(&self, audio: Vec<u8>) -> Result<oneshot::Receiver<()>, VoiceError> {
        tracing::trace!(bytes = audio.len(), "Discarding audio");
        let (tx, rx) = oneshot::channel();
        let _ = tx.send(());
        Ok(rx)
    }

    fn stop(&self) {}
}

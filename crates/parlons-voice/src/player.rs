//! Speaker output via `rodio`.
//!
//! Lives on the audio thread only; see [`crate::audio_thread`].

use std::io::Cursor;
use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};

use rodio::{Decoder, OutputStream, OutputStreamHandle, Sink};
use tokio::sync::oneshot;

use crate::error::VoiceError;

/// The clip currently in the sink.
struct ActiveClip {
    sink: Arc<Sink>,
    /// Set by `stop` so the watcher knows the drain was not natural.
    stopped: Arc<AtomicBool>,
}

/// Plays encoded clips on the default output device.
pub struct AudioPlayback {
    /// rodio output stream (must be kept alive).
    _stream: OutputStream,

    /// Handle used to create sinks.
    stream_handle: OutputStreamHandle,

    current: Option<ActiveClip>,
}

impl AudioPlayback {
    /// Open the default output device.
    pub fn new() -> Result<Self, VoiceError> {
        let (stream, stream_handle) = OutputStream::try_default()
            .map_err(|e| VoiceError::OutputStreamError(e.to_string()))?;

        tracing::info!("Audio playback initialized on default output device");

        Ok(Self {
            _stream: stream,
            stream_handle,
            current: None,
        })
    }

    /// Decode and start `audio`, replacing any clip in progress.
    ///
    /// `done` is fired when the clip drains naturally and dropped otherwise.
    pub fn play(&mut self, audio: Vec<u8>, done: oneshot::Sender<()>) -> Result<(), VoiceError> {
        self.stop();

        let source =
            Decoder::new(Cursor::new(audio)).map_err(|e| VoiceError::DecodeError(e.to_string()))?;
        let sink = Sink::try_new(&self.stream_handle)
            .map_err(|e| VoiceError::OutputStreamError(e.to_string()))?;
        sink.append(source);

        let clip = ActiveClip {
            sink: Arc::new(sink),
            stopped: Arc::new(AtomicBool::new(false)),
        };
        Self::spawn_completion_watcher(&clip, done);
        self.current = Some(clip);

        tracing::debug!("Audio playback started");
        Ok(())
    }

    /// Block a helper thread on the sink and report natural completion.
    fn spawn_completion_watcher(clip: &ActiveClip, done: oneshot::Sender<()>) {
        let sink = Arc::clone(&clip.sink);
        let stopped = Arc::clone(&clip.stopped);

        // `sleep_until_end` returns when the queue drains or `stop` empties it.
        std::thread::spawn(move || {
            sink.sleep_until_end();
            if stopped.load(Ordering::SeqCst) {
                return;
            }
            tracing::debug!("Playback finished naturally");
            let _ = done.send(());
        });
    }

    /// Stop any active playback immediately.
    pub fn stop(&mut self) {
        if let Some(clip) = self.current.take() {
            clip.stopped.store(true, Ordering::SeqCst);
            clip.sink.stop();
            tracing::debug!("Audio playback stopped");
        }
    }
}

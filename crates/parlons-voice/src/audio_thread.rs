//! Dedicated audio thread: keeps the `!Send` `rodio::OutputStream` off the
//! async runtime.
//!
//! [`AudioThreadHandle`] is the `Send + Sync` proxy the playback controller
//! holds. Every call is routed as an [`AudioCommand`] to the thread that owns
//! the device.

use std::sync::mpsc;
use std::thread;

use tokio::sync::oneshot;

use crate::error::VoiceError;
use crate::output::AudioOutput;
use crate::player::AudioPlayback;

enum AudioCommand {
    /// Decode and play a clip, replacing the current one.
    Play {
        audio: Vec<u8>,
        done: oneshot::Sender<()>,
        reply: mpsc::Sender<Result<(), VoiceError>>,
    },

    /// Stop any active playback (fire-and-forget).
    Stop,

    /// Shut down the audio thread, releasing the device.
    Shutdown,
}

/// `Send + Sync` handle to the audio thread.
///
/// `play` blocks the caller until the thread has decoded the clip and
/// started the sink; that is local channel I/O plus the decode.
pub struct AudioThreadHandle {
    cmd_tx: mpsc::Sender<AudioCommand>,
    thread: Option<thread::JoinHandle<()>>,
}

impl AudioThreadHandle {
    /// Spawn the audio thread and open the default output device on it.
    ///
    /// A device error is reported here rather than on first playback.
    pub fn spawn() -> Result<Self, VoiceError> {
        let (cmd_tx, cmd_rx) = mpsc::channel::<AudioCommand>();
        let (init_tx, init_rx) = mpsc::channel::<Result<(), VoiceError>>();

        let thread = thread::Builder::new()
            .name("parlons-audio".into())
            .spawn(move || Self::run(cmd_rx, init_tx))
            .map_err(|e| {
                VoiceError::OutputStreamError(format!("failed to spawn audio thread: {e}"))
            })?;

        init_rx.recv().map_err(|_| VoiceError::AudioThreadDied)??;

        Ok(Self {
            cmd_tx,
            thread: Some(thread),
        })
    }

    fn send_and_recv<T>(
        &self,
        build: impl FnOnce(mpsc::Sender<Result<T, VoiceError>>) -> AudioCommand,
    ) -> Result<T, VoiceError> {
        let (tx, rx) = mpsc::channel();
        self.cmd_tx
            .send(build(tx))
            .map_err(|_| VoiceError::AudioThreadDied)?;
        rx.recv().map_err(|_| VoiceError::AudioThreadDied)?
    }

    /// Thread body. Owns `AudioPlayback` for its whole lifetime.
    fn run(cmd_rx: mpsc::Receiver<AudioCommand>, init_tx: mpsc::Sender<Result<(), VoiceError>>) {
        let mut playback = match AudioPlayback::new() {
            Ok(p) => p,
            Err(e) => {
                let _ = init_tx.send(Err(e));
                return;
            }
        };

        if init_tx.send(Ok(())).is_err() {
            return;
        }

        while let Ok(cmd) = cmd_rx.recv() {
            match cmd {
                AudioCommand::Play { audio, done, reply } => {
                    let _ = reply.send(playback.play(audio, done));
                }
                AudioCommand::Stop => playback.stop(),
                AudioCommand::Shutdown => break,
            }
        }

        playback.stop();
        tracing::debug!("Audio thread shutting down");
    }
}

impl AudioOutput for AudioThreadHandle {
    fn start(&self, audio: Vec<u8>) -> Result<oneshot::Receiver<()>, VoiceError> {
        let (done_tx, done_rx) = oneshot::channel();
        self.send_and_recv(|reply| AudioCommand::Play {
            audio,
            done: done_tx,
            reply,
        })?;
        Ok(done_rx)
    }

    fn stop(&self) {
        let _ = self.cmd_tx.send(AudioCommand::Stop);
    }
}

impl Drop for AudioThreadHandle {
    fn drop(&mut self) {
        let _ = self.cmd_tx.send(AudioCommand::Shutdown);
        if let Some(handle) = self.thread.take() {
            let _ = handle.join();
        }
    }
}

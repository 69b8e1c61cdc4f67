//! Playback controller: one clip at a time, cache-or-fetch, interruptible.

use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use parlons_core::{SpeechProvider, SpeechRequest};

use crate::error::VoiceError;
use crate::output::AudioOutput;

/// How a `play` call ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PlaybackOutcome {
    /// The clip played to the end.
    Finished,

    /// A later `stop` or `play` cut the clip short, or it was never started.
    Interrupted,
}

/// Wraps a single active playback.
///
/// Each `play` and `stop` bumps an epoch. A `play` whose epoch is no longer
/// current by the time its audio arrives never starts the clip, so a `stop`
/// issued during synthesis is honored.
pub struct PlaybackController {
    speech: Arc<dyn SpeechProvider>,
    output: Arc<dyn AudioOutput>,
    epoch: Mutex<u64>,
}

impl PlaybackController {
    pub fn new(speech: Arc<dyn SpeechProvider>, output: Arc<dyn AudioOutput>) -> Self {
        Self {
            speech,
            output,
            epoch: Mutex::new(0),
        }
    }

    fn lock_epoch(&self) -> MutexGuard<'_, u64> {
        self.epoch.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// Stop the current clip and claim a new epoch.
    fn interrupt(&self) -> u64 {
        let mut epoch = self.lock_epoch();
        *epoch = epoch.wrapping_add(1);
        self.output.stop();
        *epoch
    }

    /// Synthesize `request` and play it, returning when playback ends.
    ///
    /// Any clip already playing is stopped first.
    pub async fn play(&self, request: &SpeechRequest) -> Result<PlaybackOutcome, VoiceError> {
        let epoch = self.interrupt();

        let audio = self.speech.synthesize(request).await?;

        let done = {
            let current = self.lock_epoch();
            if *current != epoch {
                tracing::debug!("Playback superseded during synthesis");
                return Ok(PlaybackOutcome::Interrupted);
            }
            // Started under the lock so a concurrent `stop` cannot slip between
            // the check and the start.
            self.output.start(audio)?
        };

        match done.await {
            Ok(()) => Ok(PlaybackOutcome::Finished),
            Err(_) => Ok(PlaybackOutcome::Interrupted),
        }
    }

    /// Halt playback immediately. Safe when idle.
    pub fn stop(&self) {
        self.interrupt();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;
    use parlons_core::SpeechError;
    use std::time::Duration;
    use tokio::sync::oneshot;

    /// Provider that takes `delay` per request.
    struct SlowProvider {
        delay: Duration,
        fail: bool,
    }

    #[async_trait]
    impl SpeechProvider for SlowProvider {
        async fn synthesize(&self, request: &SpeechRequest) -> Result<Vec<u8>, SpeechError> {
            tokio::time::sleep(self.delay).await;
            if self.fail {
                return Err(SpeechError::RequestFailed {
                    status: 500,
                    body: "boom".to_string(),
                });
            }
            Ok(request.text.as_bytes().to_vec())
        }
    }

    /// Output whose clips last `clip`; records every start.
    struct TimedOutput {
        clip: Duration,
        slot: Arc<Mutex<Option<(u64, oneshot::Sender<()>)>>>,
        starts: Mutex<Vec<Vec<u8>>>,
    }

    impl TimedOutput {
        fn new(clip: Duration) -> Self {
            Self {
                clip,
                slot: Arc::new(Mutex::new(None)),
                starts: Mutex::new(Vec::new()),
            }
        }
    }

    impl AudioOutput for TimedOutput {
        fn start(&self, audio: Vec<u8>) -> Result<oneshot::Receiver<()>, VoiceError> {
            let (tx, rx) = oneshot::channel();
            let id = {
                let mut starts = self.starts.lock().unwrap();
                starts.push(audio);
                starts.len() as u64
            };
            *self.slot.lock().unwrap() = Some((id, tx));

            let slot = Arc::clone(&self.slot);
            let clip = self.clip;
            tokio::spawn(async move {
                tokio::time::sleep(clip).await;
                let mut slot = slot.lock().unwrap();
                if slot.as_ref().is_some_and(|(current, _)| *current == id) {
                    if let Some((_, tx)) = slot.take() {
                        let _ = tx.send(());
                    }
                }
            });
            Ok(rx)
        }

        fn stop(&self) {
            self.slot.lock().unwrap().take();
        }
    }

    fn controller(
        provider: SlowProvider,
        output: &Arc<TimedOutput>,
    ) -> Arc<PlaybackController> {
        Arc::new(PlaybackController::new(
            Arc::new(provider),
            Arc::clone(output) as Arc<dyn AudioOutput>,
        ))
    }

    #[tokio::test(start_paused = true)]
    async fn play_finishes_after_clip() {
        let output = Arc::new(TimedOutput::new(Duration::from_millis(800)));
        let playback = controller(
            SlowProvider {
                delay: Duration::from_millis(200),
                fail: false,
            },
            &output,
        );

        let started = tokio::time::Instant::now();
        let outcome = playback
            .play(&SpeechRequest::new("Bonjour", "v"))
            .await
            .unwrap();
        assert_eq!(outcome, PlaybackOutcome::Finished);
        assert!(started.elapsed() >= Duration::from_millis(1000));
        assert_eq!(output.starts.lock().unwrap().as_slice(), [b"Bonjour".to_vec()]);
    }

    #[tokio::test(start_paused = true)]
    async fn stop_during_clip_interrupts() {
        let output = Arc::new(TimedOutput::new(Duration::from_secs(5)));
        let playback = controller(
            SlowProvider {
                delay: Duration::ZERO,
                fail: false,
            },
            &output,
        );

        let task = {
            let playback = Arc::clone(&playback);
            tokio::spawn(async move { playback.play(&SpeechRequest::new("Merci", "v")).await })
        };
        tokio::time::sleep(Duration::from_millis(100)).await;
        playback.stop();

        let outcome = task.await.unwrap().unwrap();
        assert_eq!(outcome, PlaybackOutcome::Interrupted);
    }

    #[tokio::test(start_paused = true)]
    async fn stop_during_synthesis_never_starts_output() {
        let output = Arc::new(TimedOutput::new(Duration::from_millis(100)));
        let playback = controller(
            SlowProvider {
                delay: Duration::from_secs(1),
                fail: false,
            },
            &output,
        );

        let task = {
            let playback = Arc::clone(&playback);
            tokio::spawn(async move { playback.play(&SpeechRequest::new("Oui", "v")).await })
        };
        tokio::time::sleep(Duration::from_millis(300)).await;
        playback.stop();

        assert_eq!(task.await.unwrap().unwrap(), PlaybackOutcome::Interrupted);
        assert!(output.starts.lock().unwrap().is_empty());
    }

    #[tokio::test(start_paused = true)]
    async fn synthesis_error_is_returned() {
        let output = Arc::new(TimedOutput::new(Duration::from_millis(100)));
        let playback = controller(
            SlowProvider {
                delay: Duration::ZERO,
                fail: true,
            },
            &output,
        );

        let err = playback
            .play(&SpeechRequest::new("Non", "v"))
            .await
            .unwrap_err();
        assert!(matches!(err, VoiceError::Synthesis(_)));
    }

    #[test]
    fn stop_when_idle_is_harmless() {
        let output = Arc::new(TimedOutput::new(Duration::ZERO));
        let playback = controller(
            SlowProvider {
                delay: Duration::ZERO,
                fail: false,
            },
            &output,
        );
        playback.stop();
        playback.stop();
    }
}

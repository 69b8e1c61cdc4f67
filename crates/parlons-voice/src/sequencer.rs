//! Drill sequencer: drives one sentence at a time through
//! Prompting → Anticipating → Answering → Pausing and auto-advances.
//!
//! A run is a single Tokio task. Every command bumps a generation counter,
//! aborts the task and stops playback before anything else happens; the run
//! checks its token against the generation under the same lock before every
//! state change, so a stale run can never publish.

use std::sync::{Arc, Mutex, MutexGuard, PoisonError};
use std::time::Duration;

use parlons_core::{
    Countdown, DrillPhase, DrillTimings, PromptLanguage, Sentence, SentenceList, Settings,
    SpeechRequest, VoiceConfig, VoiceRole,
};
use tokio::sync::{mpsc, watch};
use tokio::task::JoinHandle;

use crate::clock::Clock;
use crate::playback::PlaybackController;

/// Per-run configuration taken from the user's settings.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DrillConfig {
    pub voices: VoiceConfig,
    pub prompt_language: PromptLanguage,

    /// Speech model; `None` lets the provider choose.
    pub model_id: Option<String>,
}

impl DrillConfig {
    pub fn from_settings(settings: &Settings) -> Self {
        let model = settings.model_id.trim();
        Self {
            voices: settings.voices(),
            prompt_language: settings.prompt_language,
            model_id: (!model.is_empty()).then(|| model.to_string()),
        }
    }
}

/// Observable drill state.
///
/// Subscribers see only the latest value, so a phase that ends without
/// waiting (Prompting or Answering with no audio) may never be observed here.
/// [`DrillEvent::PhaseChanged`] reports every transition.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct DrillSnapshot {
    /// Current sentence position, always within the list when it is non-empty.
    pub index: usize,
    pub phase: DrillPhase,
    pub countdown: Countdown,

    /// Number of sentences in the list.
    pub total: usize,
}

/// Discrete drill notifications, in the order they happened.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DrillEvent {
    PhaseChanged { index: usize, phase: DrillPhase },

    /// The run moved on to the next sentence by itself.
    Advanced { index: usize },

    /// Audio for one phase could not be played. The drill carries on.
    PlaybackFailed {
        index: usize,
        role: VoiceRole,
        message: String,
    },

    /// The last sentence, at `index`, completed and the drill went idle.
    Finished { index: usize },
}

struct Inner {
    generation: u64,
    task: Option<JoinHandle<()>>,
    sentences: SentenceList,
    config: DrillConfig,
}

struct Shared {
    inner: Mutex<Inner>,
    state: watch::Sender<DrillSnapshot>,
    events: mpsc::UnboundedSender<DrillEvent>,
    playback: Arc<PlaybackController>,
    clock: Arc<dyn Clock>,
    timings: DrillTimings,
}

impl Shared {
    fn lock(&self) -> MutexGuard<'_, Inner> {
        self.inner.lock().unwrap_or_else(PoisonError::into_inner)
    }

    fn emit(&self, event: DrillEvent) {
        if self.events.send(event).is_err() {
            tracing::warn!("Drill event receiver dropped");
        }
    }

    /// Invalidate the current run. Must be called with the lock held.
    fn cancel(&self, inner: &mut Inner) -> u64 {
        inner.generation = inner.generation.wrapping_add(1);
        if let Some(task) = inner.task.take() {
            task.abort();
        }
        self.playback.stop();
        inner.generation
    }

    /// Apply `update` and emit `events` only if `token` is still current.
    fn publish(
        &self,
        token: u64,
        update: impl FnOnce(&mut DrillSnapshot),
        events: Vec<DrillEvent>,
    ) -> bool {
        let inner = self.lock();
        if inner.generation != token {
            return false;
        }
        self.state.send_modify(update);
        for event in events {
            self.emit(event);
        }
        drop(inner);
        true
    }

    fn is_current(&self, token: u64) -> bool {
        self.lock().generation == token
    }

    fn set_phase(&self, token: u64, index: usize, phase: DrillPhase, countdown: Countdown) -> bool {
        self.publish(
            token,
            |snapshot| {
                tracing::debug!(old = ?snapshot.phase, new = ?phase, index, "Drill phase transition");
                snapshot.index = index;
                snapshot.phase = phase;
                snapshot.countdown = countdown;
            },
            vec![DrillEvent::PhaseChanged { index, phase }],
        )
    }

    /// Reset the snapshot to idle at `index`. Command side, lock held.
    fn reset_to(&self, index: usize, total: usize) {
        let mut went_idle = false;
        self.state.send_modify(|snapshot| {
            went_idle = snapshot.phase.is_active();
            if went_idle {
                tracing::debug!(old = ?snapshot.phase, new = ?DrillPhase::Idle, index, "Drill phase transition");
            }
            snapshot.index = index;
            snapshot.phase = DrillPhase::Idle;
            snapshot.countdown = Countdown::ZERO;
            snapshot.total = total;
        });
        if went_idle {
            self.emit(DrillEvent::PhaseChanged {
                index,
                phase: DrillPhase::Idle,
            });
        }
    }

    /// Play one phase's audio. Failures are reported and swallowed.
    async fn speak(
        &self,
        token: u64,
        index: usize,
        role: VoiceRole,
        text: &str,
        config: &DrillConfig,
    ) {
        let Some(voice) = config.voices.voice_for(role) else {
            tracing::trace!(index, %role, "No voice configured, skipping audio");
            return;
        };
        if text.trim().is_empty() {
            tracing::trace!(index, %role, "Empty text, skipping audio");
            return;
        }

        let mut request = SpeechRequest::new(text, voice).with_language(role.language_code());
        if let Some(model) = &config.model_id {
            request = request.with_model(model.as_str());
        }

        match self.playback.play(&request).await {
            Ok(outcome) => tracing::trace!(index, %role, ?outcome, "Playback ended"),
            Err(e) => {
                tracing::warn!(index, %role, error = %e, "Playback failed");
                self.publish(
                    token,
                    |_| {},
                    vec![DrillEvent::PlaybackFailed {
                        index,
                        role,
                        message: e.to_string(),
                    }],
                );
            }
        }
    }

    /// Tick the countdown down to zero. Returns `false` if the run was cancelled.
    async fn count_down(&self, token: u64, window: Duration) -> bool {
        let started = self.clock.now();
        loop {
            let elapsed = self.clock.now().saturating_duration_since(started);
            let remaining = window.saturating_sub(elapsed);
            if !self.publish(
                token,
                |snapshot| snapshot.countdown = Countdown::new(remaining, window),
                Vec::new(),
            ) {
                return false;
            }
            if remaining.is_zero() {
                return true;
            }
            self.clock.sleep(self.timings.tick.min(remaining)).await;
        }
    }

    /// Drive one sentence through all four phases.
    async fn run_sentence(
        &self,
        token: u64,
        index: usize,
        sentence: &Sentence,
        config: &DrillConfig,
    ) -> bool {
        if !self.set_phase(token, index, DrillPhase::Prompting, Countdown::ZERO) {
            return false;
        }
        let language = config.prompt_language;
        self.speak(
            token,
            index,
            language.voice_role(),
            sentence.prompt_text(language),
            config,
        )
        .await;

        let window = self.timings.anticipation_window(&sentence.fr);
        if !self.set_phase(token, index, DrillPhase::Anticipating, Countdown::full(window)) {
            return false;
        }
        if !self.count_down(token, window).await {
            return false;
        }

        if !self.set_phase(token, index, DrillPhase::Answering, Countdown::ZERO) {
            return false;
        }
        self.speak(token, index, VoiceRole::Target, &sentence.fr, config)
            .await;

        if !self.set_phase(token, index, DrillPhase::Pausing, Countdown::ZERO) {
            return false;
        }
        self.clock.sleep(self.timings.pause).await;
        self.is_current(token)
    }
}

async fn run(
    shared: Arc<Shared>,
    token: u64,
    mut index: usize,
    sentences: SentenceList,
    config: DrillConfig,
    settle: Duration,
) {
    if !settle.is_zero() {
        shared.clock.sleep(settle).await;
    }

    while let Some(sentence) = sentences.get(index) {
        if !shared.run_sentence(token, index, sentence, &config).await {
            return;
        }

        let next = index + 1;
        if next >= sentences.len() {
            shared.publish(
                token,
                |snapshot| {
                    tracing::debug!(old = ?snapshot.phase, new = ?DrillPhase::Idle, index, "Drill phase transition");
                    snapshot.phase = DrillPhase::Idle;
                    snapshot.countdown = Countdown::ZERO;
                },
                vec![
                    DrillEvent::PhaseChanged {
                        index,
                        phase: DrillPhase::Idle,
                    },
                    DrillEvent::Finished { index },
                ],
            );
            tracing::info!(total = sentences.len(), "Drill finished");
            return;
        }

        if !shared.publish(
            token,
            |snapshot| snapshot.index = next,
            vec![DrillEvent::Advanced { index: next }],
        ) {
            return;
        }
        index = next;
    }
}

/// Cancelable drill over a sentence list.
///
/// Commands take effect immediately and never block on audio. They must be
/// called from within a Tokio runtime because they spawn the run task.
pub struct DrillSequencer {
    shared: Arc<Shared>,
}

impl DrillSequencer {
    /// Create an idle sequencer and the receiver for its events.
    pub fn new(
        sentences: SentenceList,
        config: DrillConfig,
        playback: Arc<PlaybackController>,
        clock: Arc<dyn Clock>,
        timings: DrillTimings,
    ) -> (Self, mpsc::UnboundedReceiver<DrillEvent>) {
        let (events, event_rx) = mpsc::unbounded_channel();
        let (state, _) = watch::channel(DrillSnapshot {
            total: sentences.len(),
            ..DrillSnapshot::default()
        });

        let shared = Arc::new(Shared {
            inner: Mutex::new(Inner {
                generation: 0,
                task: None,
                sentences,
                config,
            }),
            state,
            events,
            playback,
            clock,
            timings,
        });

        (Self { shared }, event_rx)
    }

    /// Current state.
    pub fn snapshot(&self) -> DrillSnapshot {
        *self.shared.state.borrow()
    }

    /// Watch state changes, including countdown ticks.
    pub fn subscribe(&self) -> watch::Receiver<DrillSnapshot> {
        self.shared.state.subscribe()
    }

    /// Start from the first sentence. No-op on an empty list.
    pub fn start(&self) {
        self.start_at(0);
    }

    /// Start from `index`, clamped into the list. No-op on an empty list.
    pub fn start_at(&self, index: usize) {
        self.restart(|_| index, false);
    }

    /// Cancel the run and go idle. Keeps the current index.
    pub fn stop(&self) {
        let mut inner = self.shared.lock();
        self.shared.cancel(&mut inner);
        let index = self.shared.state.borrow().index;
        self.shared.reset_to(index, inner.sentences.len());
        tracing::debug!(index, "Drill stopped");
    }

    /// Restart at the following sentence, staying on the last one at the end.
    pub fn next(&self) {
        self.restart(|current| current.saturating_add(1), true);
    }

    /// Restart at the preceding sentence, staying on the first one at the start.
    pub fn prev(&self) {
        self.restart(|current| current.saturating_sub(1), true);
    }

    /// Restart the current sentence.
    pub fn replay(&self) {
        self.restart(|current| current, true);
    }

    /// Swap the sentence list. Stops any run and rewinds to the first sentence.
    pub fn replace_sentences(&self, sentences: SentenceList) {
        let mut inner = self.shared.lock();
        self.shared.cancel(&mut inner);
        inner.sentences = sentences;
        self.shared.reset_to(0, inner.sentences.len());
    }

    /// Use `config` from the next run on. A run in progress keeps its own.
    pub fn update_config(&self, config: DrillConfig) {
        self.shared.lock().config = config;
    }

    fn restart(&self, target: impl FnOnce(usize) -> usize, settle: bool) {
        let mut inner = self.shared.lock();
        if inner.sentences.is_empty() {
            tracing::debug!("Ignoring drill command on an empty sentence list");
            return;
        }

        let current = *self.shared.state.borrow();
        let index = inner.sentences.clamp_index(target(current.index));
        let delay = if settle || current.phase.is_active() {
            self.shared.timings.settle
        } else {
            Duration::ZERO
        };

        let token = self.shared.cancel(&mut inner);
        self.shared.reset_to(index, inner.sentences.len());

        tracing::debug!(index, delay_ms = delay.as_millis(), "Starting drill run");
        let task = tokio::spawn(run(
            Arc::clone(&self.shared),
            token,
            index,
            inner.sentences.clone(),
            inner.config.clone(),
            delay,
        ));
        inner.task = Some(task);
    }
}

impl Drop for DrillSequencer {
    fn drop(&mut self) {
        let mut inner = self.shared.lock();
        self.shared.cancel(&mut inner);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::clock::TokioClock;
    use crate::error::VoiceError;
    use crate::output::AudioOutput;
    use async_trait::async_trait;
    use parlons_core::{SpeechError, SpeechProvider};
    use std::sync::atomic::{AtomicUsize, Ordering};
    use tokio::sync::oneshot;
    use tokio::time::Instant;

    /// Returns the text as audio. Voice `bad` always fails.
    #[derive(Default)]
    struct FakeProvider {
        requests: Mutex<Vec<SpeechRequest>>,
    }

    #[async_trait]
    impl SpeechProvider for FakeProvider {
        async fn synthesize(&self, request: &SpeechRequest) -> Result<Vec<u8>, SpeechError> {
            self.requests.lock().unwrap().push(request.clone());
            if request.voice_id == "bad" {
                return Err(SpeechError::RequestFailed {
                    status: 500,
                    body: "nope".to_string(),
                });
            }
            Ok(request.text.as_bytes().to_vec())
        }
    }

    /// Plays each clip for a fixed duration on the Tokio timer.
    struct FakeOutput {
        clip: Duration,
        slot: Arc<Mutex<Option<(usize, oneshot::Sender<()>)>>>,
        started: AtomicUsize,
        overlaps: AtomicUsize,
    }

    impl FakeOutput {
        fn new(clip: Duration) -> Self {
            Self {
                clip,
                slot: Arc::new(Mutex::new(None)),
                started: AtomicUsize::new(0),
                overlaps: AtomicUsize::new(0),
            }
        }
    }

    impl AudioOutput for FakeOutput {
        fn start(&self, _audio: Vec<u8>) -> Result<oneshot::Receiver<()>, VoiceError> {
            let id = self.started.fetch_add(1, Ordering::SeqCst) + 1;
            let (tx, rx) = oneshot::channel();
            {
                let mut slot = self.slot.lock().unwrap();
                if slot.is_some() {
                    self.overlaps.fetch_add(1, Ordering::SeqCst);
                }
                *slot = Some((id, tx));
            }

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

    struct Harness {
        sequencer: DrillSequencer,
        events: mpsc::UnboundedReceiver<DrillEvent>,
        provider: Arc<FakeProvider>,
        output: Arc<FakeOutput>,
    }

    fn harness(sentences: Vec<Sentence>, voices: VoiceConfig) -> Harness {
        let provider = Arc::new(FakeProvider::default());
        let output = Arc::new(FakeOutput::new(Duration::from_millis(500)));
        let playback = Arc::new(PlaybackController::new(
            Arc::clone(&provider) as Arc<dyn SpeechProvider>,
            Arc::clone(&output) as Arc<dyn AudioOutput>,
        ));
        let config = DrillConfig {
            voices,
            ..DrillConfig::default()
        };
        let (sequencer, events) = DrillSequencer::new(
            SentenceList::new(sentences),
            config,
            playback,
            Arc::new(TokioClock),
            DrillTimings::default(),
        );
        Harness {
            sequencer,
            events,
            provider,
            output,
        }
    }

    fn voiced() -> VoiceConfig {
        VoiceConfig {
            fr: "fr-voice".to_string(),
            native: "cn-voice".to_string(),
            secondary: String::new(),
        }
    }

    fn sentences(frs: &[&str]) -> Vec<Sentence> {
        frs.iter()
            .zip(1..)
            .map(|(fr, id)| Sentence::new(id, *fr, format!("cn {id}"), format!("en {id}")))
            .collect()
    }

    /// Collect events until `Finished`, stamping each with elapsed virtual time.
    async fn until_finished(
        events: &mut mpsc::UnboundedReceiver<DrillEvent>,
        started: Instant,
    ) -> Vec<(Duration, DrillEvent)> {
        let mut seen = Vec::new();
        while let Some(event) = events.recv().await {
            let finished = matches!(event, DrillEvent::Finished { .. });
            seen.push((started.elapsed(), event));
            if finished {
                break;
            }
        }
        seen
    }

    fn assert_near(actual: Duration, expected_ms: u64) {
        let expected = Duration::from_millis(expected_ms);
        let diff = if actual > expected {
            actual - expected
        } else {
            expected - actual
        };
        assert!(
            diff <= Duration::from_millis(60),
            "expected ~{expected_ms}ms, got {actual:?}"
        );
    }

    fn drain(events: &mut mpsc::UnboundedReceiver<DrillEvent>) {
        while events.try_recv().is_ok() {}
    }

    #[tokio::test(start_paused = true)]
    async fn single_sentence_runs_all_phases_then_idles() {
        let mut h = harness(sentences(&["Bonjour"]), voiced());
        let started = Instant::now();
        h.sequencer.start();

        let seen = until_finished(&mut h.events, started).await;
        let phases: Vec<_> = seen
            .iter()
            .filter_map(|(at, e)| match e {
                DrillEvent::PhaseChanged { phase, .. } => Some((*at, *phase)),
                _ => None,
            })
            .collect();

        let order: Vec<_> = phases.iter().map(|(_, p)| *p).collect();
        assert_eq!(
            order,
            [
                DrillPhase::Prompting,
                DrillPhase::Anticipating,
                DrillPhase::Answering,
                DrillPhase::Pausing,
                DrillPhase::Idle,
            ]
        );
        assert_near(phases[0].0, 0);
        assert_near(phases[1].0, 500);
        assert_near(phases[2].0, 3550);
        assert_near(phases[3].0, 4050);
        assert_near(phases[4].0, 6050);

        let snapshot = h.sequencer.snapshot();
        assert_eq!(snapshot.phase, DrillPhase::Idle);
        assert_eq!(snapshot.countdown, Countdown::ZERO);
        assert_eq!(snapshot.total, 1);

        let requests = h.provider.requests.lock().unwrap().clone();
        assert_eq!(requests.len(), 2);
        assert_eq!(requests[0].text, "cn 1");
        assert_eq!(requests[0].voice_id, "cn-voice");
        assert_eq!(requests[0].language.as_deref(), Some("zh"));
        assert_eq!(requests[1].text, "Bonjour");
        assert_eq!(requests[1].voice_id, "fr-voice");
        assert_eq!(requests[1].language.as_deref(), Some("fr"));
    }

    #[tokio::test(start_paused = true)]
    async fn anticipation_countdown_starts_full_and_ticks_down() {
        let h = harness(sentences(&["Bonjour"]), VoiceConfig::default());
        let mut state = h.sequencer.subscribe();
        h.sequencer.start();

        let first = *state
            .wait_for(|s| s.phase == DrillPhase::Anticipating)
            .await
            .unwrap();
        assert_eq!(first.countdown.total(), Duration::from_millis(3050));
        assert_eq!(first.countdown.remaining(), Duration::from_millis(3050));

        tokio::time::sleep(Duration::from_millis(1025)).await;
        let mid = h.sequencer.snapshot().countdown;
        assert!(mid.remaining() <= Duration::from_millis(2050));
        assert!(mid.remaining() >= Duration::from_millis(1950));
    }

    #[tokio::test(start_paused = true)]
    async fn silent_drill_advances_without_playback() {
        let mut h = harness(sentences(&["Oui", "Non"]), VoiceConfig::default());
        let started = Instant::now();
        h.sequencer.start();

        let seen = until_finished(&mut h.events, started).await;
        let advanced: Vec<_> = seen
            .iter()
            .filter(|(_, e)| matches!(e, DrillEvent::Advanced { .. }))
            .collect();
        assert_eq!(advanced.len(), 1);
        assert_eq!(advanced[0].1, DrillEvent::Advanced { index: 1 });
        // Two sentences of three characters: 2 * (2450 + 2000).
        assert_near(seen.last().unwrap().0, 8900);

        let prompts = seen
            .iter()
            .filter(|(_, e)| {
                matches!(
                    e,
                    DrillEvent::PhaseChanged {
                        phase: DrillPhase::Prompting,
                        ..
                    }
                )
            })
            .count();
        assert_eq!(prompts, 2);

        let snapshot = h.sequencer.snapshot();
        assert_eq!(snapshot.index, 1);
        assert_eq!(snapshot.phase, DrillPhase::Idle);
        assert!(h.provider.requests.lock().unwrap().is_empty());
        assert_eq!(h.output.started.load(Ordering::SeqCst), 0);
    }

    #[tokio::test(start_paused = true)]
    async fn next_during_anticipation_cancels_the_old_run() {
        let mut h = harness(sentences(&["Bonjour", "Merci", "Oui"]), voiced());
        let mut state = h.sequencer.subscribe();
        h.sequencer.start();

        state
            .wait_for(|s| s.phase == DrillPhase::Anticipating)
            .await
            .unwrap();
        tokio::time::sleep(Duration::from_millis(1000)).await;
        drain(&mut h.events);

        h.sequencer.next();
        let snapshot = h.sequencer.snapshot();
        assert_eq!(snapshot.index, 1);
        assert_eq!(snapshot.countdown, Countdown::ZERO);
        assert!(!snapshot.phase.is_active());

        // Long enough for the old run to have ended its countdown.
        let prompting = *state
            .wait_for(|s| s.phase == DrillPhase::Prompting)
            .await
            .unwrap();
        assert_eq!(prompting.index, 1);
        tokio::time::sleep(Duration::from_millis(3000)).await;

        while let Ok(event) = h.events.try_recv() {
            match event {
                DrillEvent::PhaseChanged { index, .. }
                | DrillEvent::PlaybackFailed { index, .. }
                | DrillEvent::Advanced { index } => assert_eq!(index, 1, "stale event {event:?}"),
                DrillEvent::Finished { .. } => panic!("unexpected finish"),
            }
        }
        assert_eq!(h.sequencer.snapshot().index, 1);
        assert_eq!(h.output.overlaps.load(Ordering::SeqCst), 0);
    }

    #[tokio::test(start_paused = true)]
    async fn stop_is_idempotent() {
        let mut h = harness(sentences(&["Bonjour", "Merci"]), voiced());
        h.sequencer.stop();
        assert_eq!(h.sequencer.snapshot().phase, DrillPhase::Idle);

        h.sequencer.start();
        tokio::time::sleep(Duration::from_millis(1200)).await;
        h.sequencer.stop();
        let first = h.sequencer.snapshot();
        h.sequencer.stop();
        let second = h.sequencer.snapshot();

        assert_eq!(first, second);
        assert_eq!(first.phase, DrillPhase::Idle);
        assert_eq!(first.countdown, Countdown::ZERO);
        assert_eq!(first.index, 0);

        drain(&mut h.events);
        tokio::time::sleep(Duration::from_secs(20)).await;
        assert!(h.events.try_recv().is_err());
        assert_eq!(h.sequencer.snapshot(), second);
    }

    #[tokio::test(start_paused = true)]
    async fn next_and_prev_clamp_to_the_list() {
        let h = harness(sentences(&["a", "b", "c"]), VoiceConfig::default());
        h.sequencer.start();

        h.sequencer.prev();
        assert_eq!(h.sequencer.snapshot().index, 0);

        for _ in 0..5 {
            h.sequencer.next();
        }
        assert_eq!(h.sequencer.snapshot().index, 2);

        tokio::time::sleep(Duration::from_millis(150)).await;
        let snapshot = h.sequencer.snapshot();
        assert_eq!(snapshot.index, 2);
        assert!(snapshot.phase.is_active());

        h.sequencer.replay();
        assert_eq!(h.sequencer.snapshot().index, 2);
    }

    #[tokio::test(start_paused = true)]
    async fn playback_failure_does_not_stop_the_drill() {
        let voices = VoiceConfig {
            fr: "bad".to_string(),
            ..VoiceConfig::default()
        };
        let mut h = harness(sentences(&["Merci"]), voices);
        h.sequencer.start();

        let seen = until_finished(&mut h.events, Instant::now()).await;
        let events: Vec<_> = seen.into_iter().map(|(_, e)| e).collect();
        assert!(events.iter().any(|e| matches!(
            e,
            DrillEvent::PlaybackFailed {
                index: 0,
                role: VoiceRole::Target,
                ..
            }
        )));
        assert!(events.contains(&DrillEvent::PhaseChanged {
            index: 0,
            phase: DrillPhase::Pausing
        }));
        assert_eq!(events.last(), Some(&DrillEvent::Finished { index: 0 }));
    }

    #[tokio::test(start_paused = true)]
    async fn start_on_empty_list_is_a_noop() {
        let mut h = harness(Vec::new(), voiced());
        h.sequencer.start();
        h.sequencer.next();
        tokio::time::sleep(Duration::from_secs(1)).await;

        assert_eq!(h.sequencer.snapshot(), DrillSnapshot::default());
        assert!(h.events.try_recv().is_err());
    }

    #[tokio::test(start_paused = true)]
    async fn start_after_finish_restarts_from_the_top() {
        let mut h = harness(sentences(&["a", "b"]), VoiceConfig::default());
        h.sequencer.start_at(1);
        let seen = until_finished(&mut h.events, Instant::now()).await;
        assert_eq!(seen.last().unwrap().1, DrillEvent::Finished { index: 1 });
        assert_eq!(h.sequencer.snapshot().index, 1);

        // Without voices Prompting ends in the same poll, so only the event
        // stream is guaranteed to show it.
        h.sequencer.start();
        assert_eq!(h.sequencer.snapshot().index, 0);
        let first = h.events.recv().await.unwrap();
        assert_eq!(
            first,
            DrillEvent::PhaseChanged {
                index: 0,
                phase: DrillPhase::Prompting
            }
        );
    }

    #[tokio::test(start_paused = true)]
    async fn silent_phases_reach_the_event_stream() {
        let mut h = harness(sentences(&["Oui"]), VoiceConfig::default());
        h.sequencer.start();

        let seen = until_finished(&mut h.events, Instant::now()).await;
        let phases: Vec<_> = seen
            .into_iter()
            .filter_map(|(_, e)| match e {
                DrillEvent::PhaseChanged { phase, .. } => Some(phase),
                _ => None,
            })
            .collect();
        assert_eq!(
            phases,
            [
                DrillPhase::Prompting,
                DrillPhase::Anticipating,
                DrillPhase::Answering,
                DrillPhase::Pausing,
                DrillPhase::Idle,
            ]
        );
    }

    #[tokio::test(start_paused = true)]
    async fn replace_sentences_rewinds_and_idles() {
        let h = harness(sentences(&["a", "b"]), VoiceConfig::default());
        h.sequencer.start_at(1);
        tokio::time::sleep(Duration::from_millis(300)).await;

        h.sequencer
            .replace_sentences(SentenceList::new(sentences(&["x", "y", "z"])));
        let snapshot = h.sequencer.snapshot();
        assert_eq!(snapshot.index, 0);
        assert_eq!(snapshot.total, 3);
        assert_eq!(snapshot.phase, DrillPhase::Idle);
    }

    #[tokio::test(start_paused = true)]
    async fn dropping_the_sequencer_stops_audio() {
        let h = harness(sentences(&["Bonjour"]), voiced());
        let output = Arc::clone(&h.output);
        h.sequencer.start();
        tokio::time::sleep(Duration::from_millis(100)).await;
        assert!(output.slot.lock().unwrap().is_some());

        drop(h);
        assert!(output.slot.lock().unwrap().is_none());
    }

    #[test]
    fn config_from_settings_drops_blank_model() {
        let settings = Settings {
            model_id: " ".to_string(),
            voice_id_fr: "abc".to_string(),
            ..Settings::default()
        };
        let config = DrillConfig::from_settings(&settings);
        assert_eq!(config.model_id, None);
        assert_eq!(config.voices.voice_for(VoiceRole::Target), Some("abc"));
    }
}

//! Time source for the drill.
//!
//! Everything time-based in the sequencer (countdown ticks, pauses, the
//! settle delay) goes through [`Clock`], so tests can run on Tokio's paused
//! virtual clock or a custom fake.

use std::time::Duration;

use async_trait::async_trait;
use tokio::time::Instant;

#[async_trait]
pub trait Clock: Send + Sync {
    fn now(&self) -> Instant;

    async fn sleep(&self, duration: Duration);
}

/// Tokio's timer. Honors `tokio::time::pause`.
#[derive(Debug, Clone, Copy, Default)]
pub struct TokioClock;

#[async_trait]
impl Clock for TokioClock {
    fn now(&self) -> Instant {
        Instant::now()
    }

    async fn sleep(&self, duration: Duration) {
        tokio::time::sleep(duration).await;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test(start_paused = true)]
    async fn sleep_advances_virtual_time() {
        let clock = TokioClock;
        let before = clock.now();
        clock.sleep(Duration::from_millis(2000)).await;
        assert!(clock.now() - before >= Duration::from_millis(2000));
    }
}

//! Minimum-interval pacing for rate-limited back ends

use std::time::Duration;

use tokio::sync::Mutex;
use tokio::time::Instant;

/// An owned scheduler that enforces a minimum interval between calls.
///
/// Each rate-limited tool gets its own gate, so pacing one tool never
/// serializes calls to the others. `pace` suspends the calling task until
/// the interval since the previous call has elapsed; concurrent callers
/// queue on the internal async lock and leave the runtime free.
#[derive(Debug)]
pub struct RateGate {
    min_interval: Duration,
    last_call: Mutex<Option<Instant>>,
}

impl RateGate {
    pub fn new(min_interval: Duration) -> Self {
        Self {
            min_interval,
            last_call: Mutex::new(None),
        }
    }

    pub fn min_interval(&self) -> Duration {
        self.min_interval
    }

    /// Wait until the configured interval since the previous call has
    /// passed, then claim the current slot.
    pub async fn pace(&self) {
        let mut last_call = self.last_call.lock().await;
        if let Some(previous) = *last_call {
            let elapsed = previous.elapsed();
            if elapsed < self.min_interval {
                tokio::time::sleep(self.min_interval - elapsed).await;
            }
        }
        *last_call = Some(Instant::now());
    }
}

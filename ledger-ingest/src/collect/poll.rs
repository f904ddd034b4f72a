//! Bounded polling with an injectable clock.

use std::time::{Duration, Instant};
use thiserror::Error;

pub trait Clock {
    /// Monotonic time since an arbitrary fixed point
    fn now(&self) -> Duration;
    fn sleep(&self, duration: Duration);
}

/// Wall clock backed by `Instant` and `thread::sleep`.
#[derive(Debug, Clone, Copy)]
pub struct SystemClock {
    start: Instant,
}

impl Default for SystemClock {
    fn default() -> Self {
        Self {
            start: Instant::now(),
        }
    }
}

impl Clock for SystemClock {
    fn now(&self) -> Duration {
        self.start.elapsed()
    }

    fn sleep(&self, duration: Duration) {
        std::thread::sleep(duration);
    }
}

#[derive(Debug, Error)]
pub enum PollError {
    #[error("gave up after {0:?}")]
    Timeout(Duration),

    #[error(transparent)]
    Probe(#[from] anyhow::Error),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Poller {
    pub timeout: Duration,
    pub interval: Duration,
}

impl Poller {
    pub fn new(timeout: Duration, interval: Duration) -> Self {
        Self { timeout, interval }
    }

    /// Call `probe` until it yields a value or `timeout` has passed. The probe
    /// always runs at least once; a probe error ends polling immediately.
    pub fn poll<T>(
        &self,
        clock: &dyn Clock,
        mut probe: impl FnMut() -> anyhow::Result<Option<T>>,
    ) -> Result<T, PollError> {
        let start = clock.now();
        loop {
            if let Some(value) = probe()? {
                return Ok(value);
            }
            let waited = clock.now().saturating_sub(start);
            if waited >= self.timeout {
                return Err(PollError::Timeout(waited));
            }
            clock.sleep(self.interval.min(self.timeout - waited));
        }
    }
}

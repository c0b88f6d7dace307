use std::fmt::Debug;
use std::sync::{Arc, Mutex};
use std::time::{Duration, Instant};

/// Monotonic time source read on start and on every tick.
pub trait Clock: Debug + Send + Sync {
    fn now(&self) -> Instant;
}

/// Reads tokio's clock, which follows paused time in tests.
#[derive(Debug, Default, Clone, Copy)]
pub struct TokioClock;

impl Clock for TokioClock {
    fn now(&self) -> Instant {
        tokio::time::Instant::now().into_std()
    }
}

/// Clock that only moves when told to.
///
/// Clones share the same reading, so a test can keep one handle and give
/// another to a tracker.
#[derive(Debug, Clone)]
pub struct ManualClock {
    base: Instant,
    offset: Arc<Mutex<Duration>>,
}

impl ManualClock {
    pub fn new() -> Self {
        Self {
            base: Instant::now(),
            offset: Arc::default(),
        }
    }

    /// Sets the reading to `offset` past the clock's creation.
    pub fn set(&self, offset: Duration) {
        *self.offset.lock().unwrap() = offset;
    }

    pub fn advance(&self, by: Duration) {
        *self.offset.lock().unwrap() += by;
    }

    pub fn offset(&self) -> Duration {
        *self.offset.lock().unwrap()
    }
}

impl Default for ManualClock {
    fn default() -> Self {
        Self::new()
    }
}

impl Clock for ManualClock {
    fn now(&self) -> Instant {
        self.base + self.offset()
    }
}

use std::time::{Duration, Instant};

/// Re-basing elapsed time accumulator.
///
/// Every tick adds the real time since the previous reading and then moves
/// the reference point forward, so the total follows the clock no matter how
/// late the ticks themselves fire.
#[derive(Debug, Default)]
pub(crate) struct Timer {
    source: Option<Instant>,
    elapsed: Duration,
    ticks: u64,
}

impl Timer {
    /// Returns false when a measurement is already running.
    pub fn start(&mut self, now: Instant) -> bool {
        if self.source.is_some() {
            return false;
        }
        self.source = Some(now);
        true
    }

    /// Folds the time since the last reading into the total.
    ///
    /// Returns the delta that was added, or `None` when stopped.
    pub fn tick(&mut self, now: Instant) -> Option<Duration> {
        let source = self.source.as_mut()?;
        let delta = now.saturating_duration_since(*source);
        *source = now;
        self.elapsed += delta;
        self.ticks += 1;
        Some(delta)
    }

    // Time since the last tick is dropped, not reconciled.
    pub fn stop(&mut self) -> bool {
        self.source.take().is_some()
    }

    pub fn clear(&mut self) {
        *self = Self::default();
    }

    pub fn is_running(&self) -> bool {
        self.source.is_some()
    }

    pub fn elapsed(&self) -> Duration {
        self.elapsed
    }

    pub fn elapsed_ms(&self) -> u64 {
        u64::try_from(self.elapsed.as_millis()).unwrap_or(u64::MAX)
    }

    pub fn ticks(&self) -> u64 {
        self.ticks
    }
}

use std::sync::{Arc, Mutex, Weak};
use std::time::Duration;

use metrics::{counter, histogram};
use tokio::runtime::Handle;
use tokio::sync::watch;
use tokio::time::{self, MissedTickBehavior};
use tokio_util::sync::CancellationToken;
use tracing::{debug, trace};

use crate::{
    clock::{Clock, TokioClock},
    config::TrackerConfig,
    control::Control,
    timer::Timer,
    Error,
};

#[derive(Debug)]
struct Measurement {
    session: u64,
    cancel: CancellationToken,
}

impl Drop for Measurement {
    fn drop(&mut self) {
        self.cancel.cancel();
    }
}

#[derive(Debug, Default)]
struct InnerTracker {
    timer: Timer,
    // Present iff `timer` is running.
    measurement: Option<Measurement>,
    next_session: u64,
}

impl InnerTracker {
    fn halt(&mut self) -> Option<u64> {
        self.timer.stop();
        self.measurement.take().map(|m| m.session)
    }
}

#[derive(Debug)]
struct SharedTrackerState {
    inner: Mutex<InnerTracker>,
    clock: Box<dyn Clock>,
    elapsed_tx: watch::Sender<u64>,
}

impl SharedTrackerState {
    /// Applies one tick for `session`. Returns false once that session is
    /// no longer the active measurement.
    fn tick(&self, session: u64) -> bool {
        let mut inner = self.inner.lock().unwrap();
        if inner.measurement.as_ref().map(|m| m.session) != Some(session) {
            return false;
        }

        let now = self.clock.now();
        let Some(delta) = inner.timer.tick(now) else {
            return false;
        };
        let elapsed_ms = inner.timer.elapsed_ms();

        trace!(session, delta = ?delta, elapsed_ms, "tick");
        counter!("stopwatch_ticks").increment(1);
        histogram!("stopwatch_tick_delta_ms").record(delta.as_secs_f64() * 1000.);

        // Published under the lock so a late tick can't overwrite a reset.
        self.elapsed_tx.send_replace(elapsed_ms);
        true
    }
}

async fn tick_forever(
    shared: Weak<SharedTrackerState>,
    session: u64,
    period: Duration,
    cancel: CancellationToken,
) {
    let mut interval = time::interval_at(time::Instant::now() + period, period);
    interval.set_missed_tick_behavior(MissedTickBehavior::Delay);

    loop {
        tokio::select! {
            biased;
            _ = cancel.cancelled() => break,
            _ = interval.tick() => {
                let Some(shared) = shared.upgrade() else {
                    break;
                };
                if !shared.tick(session) {
                    break;
                }
            }
        }
    }

    trace!(session, "tick loop exited");
}

/// Stopwatch core: accumulates elapsed time from a periodic tick re-based on
/// a monotonic clock.
///
/// The tick loop runs on the tokio runtime that was current when the tracker
/// was built. Dropping the tracker cancels it.
#[derive(Debug)]
pub struct ElapsedTimeTracker {
    shared: Arc<SharedTrackerState>,
    tick_period: Duration,
    runtime: Handle,
}

impl ElapsedTimeTracker {
    pub fn new(cfg: TrackerConfig) -> Result<Self, Error> {
        Self::with_clock(cfg, TokioClock)
    }

    pub fn with_clock<C>(cfg: TrackerConfig, clock: C) -> Result<Self, Error>
    where
        C: Clock + 'static,
    {
        cfg.validate()?;
        let runtime = Handle::try_current().map_err(|_| Error::NoRuntime)?;
        let (elapsed_tx, _) = watch::channel(0);

        Ok(Self {
            shared: Arc::new(SharedTrackerState {
                inner: Mutex::default(),
                clock: Box::new(clock),
                elapsed_tx,
            }),
            tick_period: cfg.tick_period(),
            runtime,
        })
    }

    /// Begins measuring. Does nothing if already running.
    pub fn start(&self) {
        let mut inner = self.shared.inner.lock().unwrap();

        let now = self.shared.clock.now();
        if !inner.timer.start(now) {
            debug!("start ignored, already running");
            return;
        }

        let session = inner.next_session;
        inner.next_session += 1;

        let cancel = CancellationToken::new();
        self.runtime.spawn(tick_forever(
            Arc::downgrade(&self.shared),
            session,
            self.tick_period,
            cancel.clone(),
        ));
        inner.measurement = Some(Measurement { session, cancel });

        debug!(session, elapsed_ms = inner.timer.elapsed_ms(), "started");
    }

    /// Stops measuring without a final tick; time since the last tick is
    /// not counted.
    pub fn stop(&self) {
        let mut inner = self.shared.inner.lock().unwrap();
        if let Some(session) = inner.halt() {
            debug!(session, elapsed_ms = inner.timer.elapsed_ms(), "stopped");
        }
    }

    pub fn reset(&self) {
        let mut inner = self.shared.inner.lock().unwrap();
        inner.halt();
        inner.timer.clear();
        self.shared.elapsed_tx.send_replace(0);
        debug!("reset");
    }

    pub fn apply(&self, control: Control) {
        match control {
            Control::Start => self.start(),
            Control::Stop => self.stop(),
            Control::Reset => self.reset(),
        }
    }

    /// Accumulated milliseconds as of the last tick.
    pub fn read(&self) -> u64 {
        self.shared.inner.lock().unwrap().timer.elapsed_ms()
    }

    pub fn elapsed(&self) -> Duration {
        self.shared.inner.lock().unwrap().timer.elapsed()
    }

    pub fn is_running(&self) -> bool {
        self.shared.inner.lock().unwrap().measurement.is_some()
    }

    /// Ticks applied since the last reset.
    pub fn ticks(&self) -> u64 {
        self.shared.inner.lock().unwrap().timer.ticks()
    }

    /// Receives the accumulated milliseconds after every tick and reset.
    pub fn subscribe(&self) -> watch::Receiver<u64> {
        self.shared.elapsed_tx.subscribe()
    }
}

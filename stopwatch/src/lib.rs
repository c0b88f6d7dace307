use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, thiserror::Error)]
pub enum Error {
    #[error("no tokio runtime to drive the tick loop")]
    NoRuntime,
    #[error("tick period must be greater than zero")]
    ZeroTickPeriod,
    #[error("unknown control: \"{0}\"")]
    UnknownControl(String),
}

mod clock;
mod config;
mod control;
mod display;
mod timer;
mod tracker;

pub use clock::{Clock, ManualClock, TokioClock};
pub use config::{TrackerConfig, DEFAULT_TICK_PERIOD_MS};
pub use control::Control;
pub use display::{display_seconds, SecondsDisplay};
pub use tracker::ElapsedTimeTracker;

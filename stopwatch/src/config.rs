use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::Error;

/// Finer than the one second display so the shown value lands within a
/// quarter second of the real boundary.
pub const DEFAULT_TICK_PERIOD_MS: u64 = 250;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct TrackerConfig {
    pub tick_period_ms: u64,
}

impl Default for TrackerConfig {
    fn default() -> Self {
        Self {
            tick_period_ms: DEFAULT_TICK_PERIOD_MS,
        }
    }
}

impl TrackerConfig {
    pub fn tick_period(&self) -> Duration {
        Duration::from_millis(self.tick_period_ms)
    }

    pub fn validate(&self) -> Result<(), Error> {
        if self.tick_period_ms == 0 {
            return Err(Error::ZeroTickPeriod);
        }
        Ok(())
    }
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn default_is_quarter_second() {
        let cfg = TrackerConfig::default();
        assert_eq!(cfg.tick_period(), Duration::from_millis(250));
        assert_eq!(cfg.validate(), Ok(()));
    }

    #[test]
    fn zero_period_is_rejected() {
        let cfg = TrackerConfig { tick_period_ms: 0 };
        assert_eq!(cfg.validate(), Err(Error::ZeroTickPeriod));
    }

    #[test]
    fn missing_fields_use_defaults() {
        let cfg: TrackerConfig = serde_json::from_str("{}").unwrap();
        assert_eq!(cfg, TrackerConfig::default());

        let cfg: TrackerConfig = serde_json::from_str(r#"{"tick_period_ms": 100}"#).unwrap();
        assert_eq!(cfg.tick_period(), Duration::from_millis(100));
    }
}

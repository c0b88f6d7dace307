use std::fmt;

/// Whole seconds shown for `elapsed_ms`, truncated.
pub fn display_seconds(elapsed_ms: u64) -> u64 {
    elapsed_ms / 1000
}

/// Renders elapsed time as `"<seconds> s"`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SecondsDisplay(pub u64);

impl SecondsDisplay {
    pub fn from_millis(elapsed_ms: u64) -> Self {
        Self(display_seconds(elapsed_ms))
    }
}

impl fmt::Display for SecondsDisplay {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} s", self.0)
    }
}

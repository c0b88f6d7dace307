use std::str::FromStr;

use crate::Error;

/// Signal sent by the UI surface to the tracker.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Control {
    Start,
    Stop,
    Reset,
}

impl FromStr for Control {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "start" => Ok(Control::Start),
            "stop" => Ok(Control::Stop),
            "reset" => Ok(Control::Reset),
            other => Err(Error::UnknownControl(other.to_string())),
        }
    }
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn it_parses() {
        assert_eq!("start".parse(), Ok(Control::Start));
        assert_eq!("  Stop\n".parse(), Ok(Control::Stop));
        assert_eq!("RESET".parse(), Ok(Control::Reset));
        assert_eq!(
            "lap".parse::<Control>(),
            Err(Error::UnknownControl("lap".to_string()))
        );
    }
}

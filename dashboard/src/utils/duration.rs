use humantime::format_duration;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::{
    fmt::{Display, Formatter},
    str::FromStr,
    time::Duration,
};

/// Duration written in human form (`2s`, `500ms`) in configuration and on the command line.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct HumanDuration {
    duration: Duration,
}

impl HumanDuration {
    pub fn new(duration: Duration) -> Self {
        Self { duration }
    }

    pub fn get_duration(&self) -> Duration {
        self.duration
    }

    pub fn is_zero(&self) -> bool {
        self.duration.is_zero()
    }
}

impl FromStr for HumanDuration {
    type Err = humantime::DurationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim().to_lowercase();
        if s == "0" {
            return Ok(Self::default());
        }
        Ok(Self {
            duration: humantime::parse_duration(&s)?,
        })
    }
}

impl Display for HumanDuration {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", format_duration(self.duration))
    }
}

impl Serialize for HumanDuration {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&self.to_string())
    }
}

impl<'de> Deserialize<'de> for HumanDuration {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let value = String::deserialize(deserializer)?;
        value.parse().map_err(serde::de::Error::custom)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn should_parse_human_durations() {
        let duration: HumanDuration = "2s".parse().unwrap();
        assert_eq!(duration.get_duration(), Duration::from_secs(2));
        let duration: HumanDuration = "1500ms".parse().unwrap();
        assert_eq!(duration.get_duration(), Duration::from_millis(1500));
    }

    #[test]
    fn zero_should_parse_as_zero_duration() {
        let duration: HumanDuration = "0".parse().unwrap();
        assert!(duration.is_zero());
    }

    #[test]
    fn display_should_round_trip_through_from_str() {
        let duration = HumanDuration::new(Duration::from_secs(61));
        assert_eq!(duration.to_string(), "1m 1s");
        assert_eq!(duration.to_string().parse::<HumanDuration>().unwrap(), duration);
    }

    #[test]
    fn invalid_duration_should_fail() {
        assert!("two seconds".parse::<HumanDuration>().is_err());
    }
}

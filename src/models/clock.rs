//! `HH:MM` clock time handling shared by shifts and the ordinary band.

use chrono::{NaiveTime, Timelike};

/// Minutes in one day.
pub const MINUTES_PER_DAY: u32 = 24 * 60;

/// Returns the minute of the day for a clock time, ignoring seconds.
pub fn minute_of_day(time: NaiveTime) -> u32 {
    time.num_seconds_from_midnight() / 60
}

/// Serde adapter reading and writing `HH:MM`.
///
/// Times with seconds are rejected, since the engine works in whole minutes.
pub(crate) mod hhmm {
    use chrono::NaiveTime;
    use serde::{Deserialize, Deserializer, Serializer};

    pub fn serialize<S: Serializer>(time: &NaiveTime, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(&time.format("%H:%M"))
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<NaiveTime, D::Error> {
        let raw = String::deserialize(deserializer)?;
        NaiveTime::parse_from_str(&raw, "%H:%M")
            .map_err(|_| serde::de::Error::custom(format!("invalid clock time '{}', expected HH:MM", raw)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_minute_of_day() {
        assert_eq!(minute_of_day(NaiveTime::from_hms_opt(0, 0, 0).unwrap()), 0);
        assert_eq!(minute_of_day(NaiveTime::from_hms_opt(6, 30, 0).unwrap()), 390);
        assert_eq!(minute_of_day(NaiveTime::from_hms_opt(23, 59, 59).unwrap()), 1439);
    }

    #[derive(Debug, serde::Deserialize)]
    struct Clock {
        #[serde(with = "hhmm")]
        at: NaiveTime,
    }

    #[test]
    fn test_hhmm_accepts_hours_and_minutes() {
        let clock: Clock = serde_json::from_str(r#"{"at": "09:05"}"#).unwrap();
        assert_eq!(minute_of_day(clock.at), 545);
    }

    #[test]
    fn test_hhmm_rejects_seconds() {
        let err = serde_json::from_str::<Clock>(r#"{"at": "09:00:30"}"#).unwrap_err();
        assert!(err.to_string().contains("expected HH:MM"));
    }
}

use std::fmt;
use std::str::FromStr;

use chrono::{NaiveDateTime, Timelike};
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use uuid::Uuid;

pub type NoteId = Uuid;

/// Text representation used everywhere a reminder timestamp crosses an edge:
/// user input, display and the persisted store.
pub const REMINDER_AT_FORMAT: &str = "%Y-%m-%d %H:%M";

/// The moment a note's reminder fires, minute precision. Seconds and
/// sub-seconds are normalized away on construction.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub struct ReminderAt(NaiveDateTime);

impl ReminderAt {
    pub fn new(inner: NaiveDateTime) -> Self {
        let normalized = inner
            .with_second(0)
            .and_then(|dt| dt.with_nanosecond(0))
            .expect("Will never fail.");
        Self(normalized)
    }

    pub fn datetime(&self) -> NaiveDateTime {
        self.0
    }
}

impl FromStr for ReminderAt {
    type Err = chrono::ParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        NaiveDateTime::parse_from_str(s, REMINDER_AT_FORMAT).map(Self::new)
    }
}

impl fmt::Display for ReminderAt {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0.format(REMINDER_AT_FORMAT))
    }
}

impl Serialize for ReminderAt {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(&self.0.format(REMINDER_AT_FORMAT))
    }
}

impl<'de> Deserialize<'de> for ReminderAt {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let raw = String::deserialize(deserializer)?;
        raw.parse().map_err(serde::de::Error::custom)
    }
}

/// A user-authored note. Immutable once stored, there is no edit operation;
/// notes only ever get created and deleted.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Note {
    pub id: NoteId,
    pub title: String,
    pub content: String,
    pub reminder_at: ReminderAt,
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{NaiveDate, NaiveTime};

    #[test]
    fn parses_and_displays_the_wire_format() {
        let at: ReminderAt = "2024-01-01 09:00".parse().unwrap();
        assert_eq!(
            at.datetime(),
            NaiveDate::from_ymd_opt(2024, 1, 1)
                .unwrap()
                .and_hms_opt(9, 0, 0)
                .unwrap()
        );
        assert_eq!(at.to_string(), "2024-01-01 09:00");
    }

    #[test]
    fn normalizes_to_minute_precision() {
        let dt = NaiveDate::from_ymd_opt(2024, 6, 15)
            .unwrap()
            .and_time(NaiveTime::from_hms_milli_opt(8, 30, 45, 123).unwrap());
        let at = ReminderAt::new(dt);
        assert_eq!(at.to_string(), "2024-06-15 08:30");
    }

    #[test]
    fn rejects_malformed_input() {
        assert!("2024-01-01".parse::<ReminderAt>().is_err());
        assert!("09:00 2024-01-01".parse::<ReminderAt>().is_err());
        assert!("tomorrowish".parse::<ReminderAt>().is_err());
    }

    #[test]
    fn serializes_as_the_wire_string() {
        let note = Note {
            id: Uuid::new_v4(),
            title: "Buy milk".into(),
            content: "2%, 1 gallon".into(),
            reminder_at: "2024-01-01 09:00".parse().unwrap(),
        };

        let json = serde_json::to_value(&note).unwrap();
        assert_eq!(json["reminder_at"], "2024-01-01 09:00");

        let back: Note = serde_json::from_value(json).unwrap();
        assert_eq!(back, note);
    }
}

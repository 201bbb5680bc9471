use std::fmt;
use std::str::FromStr;

use chrono::{Local, NaiveDate, TimeDelta};

const DATE_FORMAT: &str = "%Y-%m-%d";

/// Cursor behind a day-stepper control: one visible date, stepped backward
/// or forward a day at a time, rendered as `YYYY-MM-DD` for pre-filling the
/// note form.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DayCursor(NaiveDate);

impl DayCursor {
    pub fn today() -> Self {
        Self(Local::now().date_naive())
    }

    pub fn new(date: NaiveDate) -> Self {
        Self(date)
    }

    pub fn prev(self) -> Self {
        Self(
            self.0
                .checked_sub_signed(TimeDelta::days(1))
                .expect("Not realistic to overflow"),
        )
    }

    pub fn next(self) -> Self {
        Self(
            self.0
                .checked_add_signed(TimeDelta::days(1))
                .expect("Not realistic to overflow"),
        )
    }

    pub fn date(self) -> NaiveDate {
        self.0
    }
}

impl fmt::Display for DayCursor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0.format(DATE_FORMAT))
    }
}

impl FromStr for DayCursor {
    type Err = chrono::ParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        NaiveDate::parse_from_str(s, DATE_FORMAT).map(Self)
    }
}

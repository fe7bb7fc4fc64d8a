//! Time-of-day and elapsed-duration values attached to class entries.
//!
//! Both are stored on the wire as zero-padded `HH:MM` strings. Neither takes
//! part in date-range computation; they are informational and only used for
//! ordering entries within a day and for display.

use std::fmt;
use std::str::FromStr;

use chrono::{NaiveTime, Timelike};
use serde::{Deserialize, Serialize};

use crate::error::PlannerError;

/// A 24-hour wall-clock time with minute precision (`"HH:MM"`).
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct ClockTime(NaiveTime);

impl ClockTime {
    /// Midnight. Entries without a start time sort as if they started here.
    pub const MIDNIGHT: ClockTime = ClockTime(NaiveTime::MIN);

    pub fn from_hm(hour: u32, minute: u32) -> Option<Self> {
        NaiveTime::from_hms_opt(hour, minute, 0).map(ClockTime)
    }

    pub fn hour(&self) -> u32 {
        self.0.hour()
    }

    pub fn minute(&self) -> u32 {
        self.0.minute()
    }
}

impl FromStr for ClockTime {
    type Err = PlannerError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        NaiveTime::parse_from_str(s.trim(), "%H:%M")
            .map(ClockTime)
            .map_err(|_| PlannerError::InvalidEntry(format!("Invalid time '{s}'. Expected HH:MM")))
    }
}

impl TryFrom<String> for ClockTime {
    type Error = PlannerError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl From<ClockTime> for String {
    fn from(time: ClockTime) -> Self {
        time.to_string()
    }
}

impl fmt::Display for ClockTime {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0.format("%H:%M"))
    }
}

/// Elapsed length of a class (`"HH:MM"`). Hours are not capped at 23.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct EntryDuration {
    hours: u32,
    minutes: u32,
}

impl EntryDuration {
    pub fn new(hours: u32, minutes: u32) -> Self {
        EntryDuration { hours, minutes }
    }

    pub fn hours(&self) -> u32 {
        self.hours
    }

    pub fn minutes(&self) -> u32 {
        self.minutes
    }

    pub fn is_zero(&self) -> bool {
        self.hours == 0 && self.minutes == 0
    }
}

impl FromStr for EntryDuration {
    type Err = PlannerError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let invalid = || PlannerError::InvalidEntry(format!("Invalid duration '{s}'. Expected HH:MM"));

        let (hours, minutes) = s.trim().split_once(':').ok_or_else(invalid)?;
        let hours = parse_digits(hours).ok_or_else(invalid)?;
        let minutes = parse_digits(minutes).ok_or_else(invalid)?;
        if minutes > 59 {
            return Err(invalid());
        }

        Ok(EntryDuration { hours, minutes })
    }
}

/// Plain ASCII digits only; `u32::from_str` would also take a leading `+`.
fn parse_digits(part: &str) -> Option<u32> {
    if part.is_empty() || !part.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }
    part.parse().ok()
}

impl TryFrom<String> for EntryDuration {
    type Error = PlannerError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl From<EntryDuration> for String {
    fn from(duration: EntryDuration) -> Self {
        duration.to_string()
    }
}

impl fmt::Display for EntryDuration {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:02}:{:02}", self.hours, self.minutes)
    }
}

//! Class entries: single-day sessions with one student, and (possibly
//! multi-day) events that every view shows.

mod draft;
mod patch;
mod record;

pub use draft::EntryDraft;
pub use patch::{EntryPatch, Field};
pub use record::EntryRecord;

use std::fmt;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::student::{Color, StudentId};
use crate::time::{ClockTime, EntryDuration};

#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct EntryId(String);

impl EntryId {
    pub fn new(value: impl Into<String>) -> Self {
        EntryId(value.into())
    }

    pub fn generate() -> Self {
        EntryId(uuid::Uuid::new_v4().simple().to_string())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for EntryId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Discriminant of [`EntryKind`], as written in the `type` field.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum EntryType {
    Session,
    Event,
}

impl fmt::Display for EntryType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            EntryType::Session => write!(f, "SESSION"),
            EntryType::Event => write!(f, "EVENT"),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EntryKind {
    /// One class with one student, on exactly one date.
    Session { student_id: StudentId },
    /// A titled range of days. No `end_date` means a single day.
    Event {
        title: String,
        color: Option<Color>,
        end_date: Option<NaiveDate>,
    },
}

/// A dated record on the planner.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "EntryRecord", into = "EntryRecord")]
pub struct ClassEntry {
    pub id: EntryId,
    /// Start date (the only date, for sessions).
    pub date: NaiveDate,
    pub start_time: Option<ClockTime>,
    pub duration: Option<EntryDuration>,
    pub notes: Option<String>,
    pub kind: EntryKind,
}

impl ClassEntry {
    /// A bare session: what a day click in a student view creates.
    pub fn quick_session(date: NaiveDate, student_id: StudentId) -> Self {
        ClassEntry {
            id: EntryId::generate(),
            date,
            start_time: None,
            duration: None,
            notes: None,
            kind: EntryKind::Session { student_id },
        }
    }

    pub fn entry_type(&self) -> EntryType {
        match self.kind {
            EntryKind::Session { .. } => EntryType::Session,
            EntryKind::Event { .. } => EntryType::Event,
        }
    }

    pub fn is_event(&self) -> bool {
        matches!(self.kind, EntryKind::Event { .. })
    }

    pub fn student_id(&self) -> Option<&StudentId> {
        match &self.kind {
            EntryKind::Session { student_id } => Some(student_id),
            EntryKind::Event { .. } => None,
        }
    }

    pub fn is_session_for(&self, student: &StudentId) -> bool {
        self.student_id() == Some(student)
    }

    /// Last day the entry covers. Sessions never span, whatever was stored.
    pub fn effective_end(&self) -> NaiveDate {
        match &self.kind {
            EntryKind::Event {
                end_date: Some(end),
                ..
            } => *end,
            _ => self.date,
        }
    }

    /// Whether the entry shows up in the cell for `day`.
    pub fn occurs_on(&self, day: NaiveDate) -> bool {
        match &self.kind {
            EntryKind::Event {
                end_date: Some(end),
                ..
            } => self.date <= day && day <= *end,
            _ => self.date == day,
        }
    }

    /// Sort key within a day. Missing start times sort first.
    pub fn sort_time(&self) -> ClockTime {
        self.start_time.unwrap_or(ClockTime::MIDNIGHT)
    }
}

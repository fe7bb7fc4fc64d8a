//! Flat on-disk form of a class entry.
//!
//! Every variant-specific field is optional here and absent fields are left
//! out of the JSON entirely. Conversion into [`ClassEntry`] is where a record
//! is checked against its `type`.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use super::{ClassEntry, EntryId, EntryKind, EntryType};
use crate::error::{PlannerError, PlannerResult};
use crate::student::{Color, StudentId};
use crate::time::{ClockTime, EntryDuration};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EntryRecord {
    pub id: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub student_id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub color: Option<String>,
    #[serde(rename = "type")]
    pub entry_type: EntryType,
    pub date: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub end_date: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub start_time: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub duration: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,
}

/// Older data stores blank form fields as empty strings; treat those as unset.
fn non_empty(value: Option<String>) -> Option<String> {
    value.filter(|v| !v.trim().is_empty())
}

fn parse_date(value: &str) -> PlannerResult<NaiveDate> {
    NaiveDate::parse_from_str(value, "%Y-%m-%d").map_err(|_| {
        PlannerError::InvalidEntry(format!("Invalid date '{value}'. Expected YYYY-MM-DD"))
    })
}

impl From<ClassEntry> for EntryRecord {
    fn from(entry: ClassEntry) -> Self {
        let mut record = EntryRecord {
            id: entry.id.to_string(),
            student_id: None,
            title: None,
            color: None,
            entry_type: entry.entry_type(),
            date: entry.date.format("%Y-%m-%d").to_string(),
            end_date: None,
            start_time: entry.start_time.map(|t| t.to_string()),
            duration: entry.duration.map(|d| d.to_string()),
            notes: entry.notes,
        };

        match entry.kind {
            EntryKind::Session { student_id } => {
                record.student_id = Some(student_id.to_string());
            }
            EntryKind::Event {
                title,
                color,
                end_date,
            } => {
                record.title = Some(title);
                record.color = color.map(|c| c.to_string());
                record.end_date = end_date.map(|d| d.format("%Y-%m-%d").to_string());
            }
        }

        record
    }
}

impl TryFrom<EntryRecord> for ClassEntry {
    type Error = PlannerError;

    fn try_from(record: EntryRecord) -> Result<Self, Self::Error> {
        let date = parse_date(&record.date)?;

        let kind = match record.entry_type {
            // A session's end date is never read, even if one was stored.
            EntryType::Session => EntryKind::Session {
                student_id: non_empty(record.student_id)
                    .map(StudentId::new)
                    .ok_or(PlannerError::IncompleteEntry("studentId"))?,
            },
            EntryType::Event => {
                let end_date = non_empty(record.end_date)
                    .map(|d| parse_date(&d))
                    .transpose()?;
                if let Some(end) = end_date.filter(|end| *end < date) {
                    return Err(PlannerError::InvalidEntry(format!(
                        "End date {end} is before start date {date}"
                    )));
                }
                EntryKind::Event {
                    title: record.title.ok_or(PlannerError::IncompleteEntry("title"))?,
                    color: non_empty(record.color).map(Color::new),
                    end_date,
                }
            }
        };

        Ok(ClassEntry {
            id: EntryId::new(record.id),
            date,
            start_time: non_empty(record.start_time)
                .map(|t| t.parse::<ClockTime>())
                .transpose()?,
            duration: non_empty(record.duration)
                .map(|d| d.parse::<EntryDuration>())
                .transpose()?,
            notes: non_empty(record.notes),
            kind,
        })
    }
}

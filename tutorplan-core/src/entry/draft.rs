//! Editing-form state for adding or changing an entry.
//!
//! The draft holds loosely-typed form input and is where a submission is
//! validated. It turns into an [`EntryPatch`] only when it describes a
//! complete entry.

use chrono::NaiveDate;

use super::{ClassEntry, EntryId, EntryKind, EntryPatch, EntryType, Field};
use crate::error::{PlannerError, PlannerResult};
use crate::student::{Color, StudentId};
use crate::time::{ClockTime, EntryDuration};

#[derive(Debug, Clone, PartialEq)]
pub struct EntryDraft {
    pub id: Option<EntryId>,
    pub entry_type: EntryType,
    pub student_id: Option<StudentId>,
    pub title: String,
    pub color: Color,
    pub date: Option<NaiveDate>,
    pub end_date: Option<NaiveDate>,
    pub start_time: Option<ClockTime>,
    /// Raw hour/minute inputs; either may be blank.
    pub duration_hours: String,
    pub duration_minutes: String,
    pub notes: String,
}

impl EntryDraft {
    /// Blank draft for a new entry on `date`.
    pub fn new_on(date: NaiveDate) -> Self {
        EntryDraft {
            id: None,
            entry_type: EntryType::Session,
            student_id: None,
            title: String::new(),
            color: Color::default_event(),
            date: Some(date),
            end_date: Some(date),
            start_time: None,
            duration_hours: String::new(),
            duration_minutes: String::new(),
            notes: String::new(),
        }
    }

    /// Draft pre-filled from a stored entry.
    pub fn from_entry(entry: &ClassEntry) -> Self {
        let mut draft = EntryDraft::new_on(entry.date);
        draft.id = Some(entry.id.clone());
        draft.entry_type = entry.entry_type();
        draft.start_time = entry.start_time;
        draft.notes = entry.notes.clone().unwrap_or_default();

        if let Some(duration) = entry.duration {
            draft.duration_hours = format!("{:02}", duration.hours());
            draft.duration_minutes = format!("{:02}", duration.minutes());
        }

        match &entry.kind {
            EntryKind::Session { student_id } => draft.student_id = Some(student_id.clone()),
            EntryKind::Event {
                title,
                color,
                end_date,
            } => {
                draft.title = title.clone();
                draft.color = color.clone().unwrap_or_else(Color::default_event);
                draft.end_date = Some(end_date.unwrap_or(entry.date));
            }
        }

        draft
    }

    pub fn is_new(&self) -> bool {
        self.id.is_none()
    }

    /// Change the start date, pulling the end date along if it would
    /// otherwise be blank or earlier than the start.
    pub fn set_date(&mut self, date: NaiveDate) {
        self.date = Some(date);
        if self.end_date.is_none_or(|end| end < date) {
            self.end_date = Some(date);
        }
    }

    /// Duration from the hour/minute inputs. Both blank means no duration;
    /// a single blank input counts as zero.
    pub fn duration(&self) -> PlannerResult<Option<EntryDuration>> {
        let hours = self.duration_hours.trim();
        let minutes = self.duration_minutes.trim();
        if hours.is_empty() && minutes.is_empty() {
            return Ok(None);
        }

        let pad = |v: &str| if v.is_empty() { "00".to_string() } else { format!("{v:0>2}") };
        format!("{}:{}", pad(hours), pad(minutes)).parse().map(Some)
    }

    /// Validate the form and produce the patch to hand to the store.
    pub fn to_patch(&self) -> PlannerResult<EntryPatch> {
        let date = self.date.ok_or(PlannerError::IncompleteEntry("date"))?;
        let duration = self.duration()?;
        let notes = self.notes.trim();

        let mut patch = EntryPatch {
            id: self.id.clone(),
            entry_type: Some(self.entry_type),
            date: Some(date),
            start_time: Field::from_option(self.start_time),
            duration: Field::from_option(duration),
            notes: if notes.is_empty() {
                Field::Clear
            } else {
                Field::Set(notes.to_string())
            },
            ..Default::default()
        };

        match self.entry_type {
            EntryType::Session => {
                let student_id = self
                    .student_id
                    .clone()
                    .ok_or(PlannerError::IncompleteEntry("studentId"))?;
                patch.student_id = Field::Set(student_id);
                patch.title = Field::Clear;
                patch.color = Field::Clear;
                patch.end_date = Field::Clear;
            }
            EntryType::Event => {
                let title = self.title.trim();
                if title.is_empty() {
                    return Err(PlannerError::IncompleteEntry("title"));
                }
                let end_date = self.end_date.unwrap_or(date);
                if end_date < date {
                    return Err(PlannerError::InvalidEntry(format!(
                        "End date {end_date} is before start date {date}"
                    )));
                }
                patch.student_id = Field::Clear;
                patch.title = Field::Set(title.to_string());
                patch.color = Field::Set(self.color.clone());
                patch.end_date = Field::Set(end_date);
            }
        }

        Ok(patch)
    }
}

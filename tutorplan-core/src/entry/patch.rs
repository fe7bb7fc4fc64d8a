//! Partial updates to class entries.

use chrono::NaiveDate;

use super::{ClassEntry, EntryId, EntryKind, EntryType};
use crate::error::{PlannerError, PlannerResult};
use crate::student::{Color, StudentId};
use crate::time::{ClockTime, EntryDuration};

/// One optional field of a patch.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Field<T> {
    /// Leave the current value alone.
    Keep,
    /// Overwrite with a new value.
    Set(T),
    /// Remove the current value.
    Clear,
}

impl<T> Default for Field<T> {
    fn default() -> Self {
        Field::Keep
    }
}

impl<T: Clone> Field<T> {
    /// `Some` becomes `Set`, `None` becomes `Clear`.
    pub fn from_option(value: Option<T>) -> Self {
        match value {
            Some(v) => Field::Set(v),
            None => Field::Clear,
        }
    }

    pub fn merge(&self, current: Option<T>) -> Option<T> {
        match self {
            Field::Keep => current,
            Field::Set(v) => Some(v.clone()),
            Field::Clear => None,
        }
    }
}

/// Changes to apply to an entry, or the fields of a new one.
///
/// Only fields that are explicitly `Set` or `Clear` touch the stored entry.
/// Variant-specific fields (`student_id` for sessions; `title`, `color` and
/// `end_date` for events) are dropped when the entry changes type.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct EntryPatch {
    /// Entry to update. `None` (or an unknown id) inserts a new entry.
    pub id: Option<EntryId>,
    pub entry_type: Option<EntryType>,
    pub date: Option<NaiveDate>,
    pub student_id: Field<StudentId>,
    pub title: Field<String>,
    pub color: Field<Color>,
    pub end_date: Field<NaiveDate>,
    pub start_time: Field<ClockTime>,
    pub duration: Field<EntryDuration>,
    pub notes: Field<String>,
}

impl EntryPatch {
    /// Patch that creates a session for `student_id` on `date`.
    pub fn session(date: NaiveDate, student_id: StudentId) -> Self {
        EntryPatch {
            entry_type: Some(EntryType::Session),
            date: Some(date),
            student_id: Field::Set(student_id),
            ..Default::default()
        }
    }

    /// Patch that creates an event titled `title` starting on `date`.
    pub fn event(date: NaiveDate, title: impl Into<String>) -> Self {
        EntryPatch {
            entry_type: Some(EntryType::Event),
            date: Some(date),
            title: Field::Set(title.into()),
            ..Default::default()
        }
    }

    /// Patch addressed at an existing entry.
    pub fn update(id: EntryId) -> Self {
        EntryPatch {
            id: Some(id),
            ..Default::default()
        }
    }

    /// Merge this patch over `base` (or over nothing, for inserts) and give
    /// the result the identity `id`.
    pub(crate) fn resolve(&self, id: EntryId, base: Option<&ClassEntry>) -> PlannerResult<ClassEntry> {
        let entry_type = self
            .entry_type
            .or(base.map(ClassEntry::entry_type))
            .ok_or(PlannerError::IncompleteEntry("type"))?;
        let date = self
            .date
            .or(base.map(|e| e.date))
            .ok_or(PlannerError::IncompleteEntry("date"))?;

        let (student_id, title, color, end_date) = match base.map(|e| &e.kind) {
            Some(EntryKind::Session { student_id }) => (Some(student_id.clone()), None, None, None),
            Some(EntryKind::Event {
                title,
                color,
                end_date,
            }) => (None, Some(title.clone()), color.clone(), *end_date),
            None => (None, None, None, None),
        };

        let kind = match entry_type {
            EntryType::Session => EntryKind::Session {
                student_id: self
                    .student_id
                    .merge(student_id)
                    .ok_or(PlannerError::IncompleteEntry("studentId"))?,
            },
            EntryType::Event => {
                let end_date = self.end_date.merge(end_date);
                if let Some(end) = end_date.filter(|end| *end < date) {
                    return Err(PlannerError::InvalidEntry(format!(
                        "End date {end} is before start date {date}"
                    )));
                }
                EntryKind::Event {
                    title: self
                        .title
                        .merge(title)
                        .ok_or(PlannerError::IncompleteEntry("title"))?,
                    color: self.color.merge(color),
                    end_date,
                }
            }
        };

        Ok(ClassEntry {
            id,
            date,
            start_time: self.start_time.merge(base.and_then(|e| e.start_time)),
            duration: self.duration.merge(base.and_then(|e| e.duration)),
            notes: self.notes.merge(base.and_then(|e| e.notes.clone())),
            kind,
        })
    }
}

//! Which slice of the planner is on screen.

use crate::entry::ClassEntry;
use crate::student::{Student, StudentId};

/// Label used for the all-students view in titles and export file names.
pub const MASTER_LABEL: &str = "Master";

#[derive(Debug, Clone, PartialEq, Eq, Hash, Default)]
pub enum ViewSelector {
    /// Every student's sessions plus all events.
    #[default]
    All,
    /// One student's sessions plus all events.
    Student(StudentId),
}

impl ViewSelector {
    pub fn student_id(&self) -> Option<&StudentId> {
        match self {
            ViewSelector::All => None,
            ViewSelector::Student(id) => Some(id),
        }
    }

    /// Whether `entry` belongs in this view. Events are visible everywhere.
    pub fn shows(&self, entry: &ClassEntry) -> bool {
        match self {
            ViewSelector::All => true,
            ViewSelector::Student(id) => entry.is_event() || entry.is_session_for(id),
        }
    }

    /// Fall back to [`ViewSelector::All`] if this view was showing `student`.
    /// Returns true if the view changed.
    pub fn forget_student(&mut self, student: &StudentId) -> bool {
        if self.student_id() == Some(student) {
            *self = ViewSelector::All;
            true
        } else {
            false
        }
    }

    /// "Master" or the selected student's name. A student missing from the
    /// roster also reads as "Master".
    pub fn label<'a>(&self, roster: &'a [Student]) -> &'a str {
        self.student_id()
            .and_then(|id| roster.iter().find(|s| &s.id == id))
            .map(|s| s.name.as_str())
            .unwrap_or(MASTER_LABEL)
    }
}

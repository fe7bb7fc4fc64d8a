//! The planner store: the roster, the class entries and the planner
//! profile, kept in sync with a [`Storage`] backend.
//!
//! Every mutation is applied in memory first and the touched collection is
//! then written back under its key. When that write fails the change is
//! undone in memory and the error returned, so an `Err` means nothing
//! changed. Deleting a student touches two keys; both are written even if
//! the first fails, and the deletion is kept.

mod profile;

pub use profile::PlannerProfile;

use chrono::NaiveDate;
use serde::Serialize;
use serde::de::DeserializeOwned;

use crate::constants::{
    ENTRIES_KEY, MAX_STUDENTS, PLANNER_ICON_KEY, PLANNER_NAME_KEY, STUDENTS_KEY,
};
use crate::dates::CalendarMonth;
use crate::entry::{ClassEntry, EntryDraft, EntryId, EntryPatch};
use crate::error::{PlannerError, PlannerResult};
use crate::export::ExportSnapshot;
use crate::filter::MonthSchedule;
use crate::grid::MonthGrid;
use crate::storage::Storage;
use crate::student::{Color, Student, StudentId, seed_roster};
use crate::view::ViewSelector;

/// Outcome of [`Planner::delete_student`].
#[derive(Debug, Clone, PartialEq)]
pub struct StudentRemoval {
    /// The removed student, or `None` if the id was not on the roster.
    pub student: Option<Student>,
    /// Sessions removed along with the student.
    pub removed_entries: usize,
}

/// Outcome of [`Planner::toggle_quick_session`].
#[derive(Debug, Clone, PartialEq)]
pub struct QuickToggle {
    pub added: bool,
    /// The session that was created or removed.
    pub entry: ClassEntry,
}

/// What a click on a day cell leads to.
#[derive(Debug, Clone, PartialEq)]
pub enum DayClick {
    /// All-students view: open the editor with a fresh draft.
    OpenEditor(EntryDraft),
    /// Student view: a session was toggled directly.
    Toggled(QuickToggle),
}

/// How to reverse an in-memory entry change whose write failed.
enum EntryUndo {
    Pop,
    Restore(usize, ClassEntry),
    Reinsert(usize, ClassEntry),
}

pub struct Planner<S: Storage> {
    storage: S,
    students: Vec<Student>,
    entries: Vec<ClassEntry>,
    profile: PlannerProfile,
}

impl<S: Storage> Planner<S> {
    /// Load all state from `storage`. Keys that are missing or unreadable
    /// fall back to their defaults independently of each other.
    pub fn load(storage: S) -> Self {
        let students = load_records(&storage, STUDENTS_KEY).unwrap_or_else(seed_roster);
        let entries = load_records(&storage, ENTRIES_KEY).unwrap_or_default();

        let name = load_value(&storage, PLANNER_NAME_KEY)
            .filter(|n| !n.is_empty())
            .unwrap_or_else(|| PlannerProfile::default().name);
        let icon = load_value(&storage, PLANNER_ICON_KEY).unwrap_or_default();

        log::info!(
            "Loaded planner '{}' with {} students and {} entries",
            name,
            students.len(),
            entries.len()
        );

        Planner {
            storage,
            students,
            entries,
            profile: PlannerProfile { name, icon },
        }
    }

    pub fn storage(&self) -> &S {
        &self.storage
    }

    pub fn into_storage(self) -> S {
        self.storage
    }

    // ROSTER:

    /// Students in display order.
    pub fn students(&self) -> &[Student] {
        &self.students
    }

    pub fn student(&self, id: &StudentId) -> Option<&Student> {
        self.students.iter().find(|s| &s.id == id)
    }

    pub fn is_roster_full(&self) -> bool {
        self.students.len() >= MAX_STUDENTS
    }

    /// Colour to preselect for the next student: the palette slot after the
    /// most recently added student's.
    pub fn suggested_color(&self) -> Color {
        self.students
            .last()
            .map(|s| s.color.next_in_palette())
            .unwrap_or_default()
    }

    pub fn add_student(&mut self, name: &str, color: Color) -> PlannerResult<Student> {
        if self.is_roster_full() {
            log::warn!("Not adding '{}': roster is full", name.trim());
            return Err(PlannerError::RosterFull(MAX_STUDENTS));
        }

        let name = name.trim();
        if name.is_empty() {
            return Err(PlannerError::EmptyStudentName);
        }

        let student = Student::new(name, color);
        self.students.push(student.clone());
        log::info!("Added student '{}' ({})", student.name, student.id);

        if let Err(e) = self.save_students() {
            self.students.pop();
            return Err(e);
        }
        Ok(student)
    }

    /// Remove a student and every session that references them. Events are
    /// never touched. A view showing this student should be reset with
    /// [`ViewSelector::forget_student`].
    pub fn delete_student(&mut self, id: &StudentId) -> PlannerResult<StudentRemoval> {
        let Some(index) = self.students.iter().position(|s| &s.id == id) else {
            return Ok(StudentRemoval {
                student: None,
                removed_entries: 0,
            });
        };

        let student = self.students.remove(index);
        let before = self.entries.len();
        self.entries.retain(|e| !e.is_session_for(id));
        let removed_entries = before - self.entries.len();

        log::info!(
            "Deleted student '{}' and {} of their sessions",
            student.name,
            removed_entries
        );

        // Both keys are written even if the first write fails.
        let students = self.save_students();
        let entries = if removed_entries > 0 {
            self.save_entries()
        } else {
            Ok(())
        };
        students.and(entries)?;

        Ok(StudentRemoval {
            student: Some(student),
            removed_entries,
        })
    }

    // ENTRIES:

    pub fn entries(&self) -> &[ClassEntry] {
        &self.entries
    }

    pub fn entry(&self, id: &EntryId) -> Option<&ClassEntry> {
        self.entries.iter().find(|e| &e.id == id)
    }

    /// Update the entry named by `patch.id`, or insert a new entry with a
    /// fresh id if there is no such entry.
    pub fn upsert_entry(&mut self, patch: EntryPatch) -> PlannerResult<ClassEntry> {
        let existing = patch
            .id
            .as_ref()
            .and_then(|id| self.entries.iter().position(|e| &e.id == id));

        let (entry, undo) = match existing {
            Some(index) => {
                let merged = patch.resolve(self.entries[index].id.clone(), Some(&self.entries[index]))?;
                let previous = std::mem::replace(&mut self.entries[index], merged.clone());
                log::debug!("Updated entry {}", merged.id);
                (merged, EntryUndo::Restore(index, previous))
            }
            None => {
                let created = patch.resolve(EntryId::generate(), None)?;
                self.entries.push(created.clone());
                log::debug!("Inserted {} entry {}", created.entry_type(), created.id);
                (created, EntryUndo::Pop)
            }
        };

        self.commit_entries(undo)?;
        Ok(entry)
    }

    /// Validate an editor draft and apply it.
    pub fn submit_draft(&mut self, draft: &EntryDraft) -> PlannerResult<ClassEntry> {
        let patch = draft.to_patch()?;
        self.upsert_entry(patch)
    }

    /// Remove an entry. Unknown ids are a no-op and return `None`.
    pub fn delete_entry(&mut self, id: &EntryId) -> PlannerResult<Option<ClassEntry>> {
        let Some(index) = self.entries.iter().position(|e| &e.id == id) else {
            return Ok(None);
        };

        let removed = self.entries.remove(index);
        log::debug!("Deleted entry {}", removed.id);

        self.commit_entries(EntryUndo::Reinsert(index, removed.clone()))?;
        Ok(Some(removed))
    }

    /// Day-click shortcut for a student view. Any session for this student
    /// on this date is removed, regardless of its time or notes; otherwise
    /// a bare session is added.
    pub fn toggle_quick_session(
        &mut self,
        date: NaiveDate,
        student_id: &StudentId,
    ) -> PlannerResult<QuickToggle> {
        let existing = self
            .entries
            .iter()
            .position(|e| e.date == date && e.is_session_for(student_id));

        let (toggle, undo) = match existing {
            Some(index) => {
                let entry = self.entries.remove(index);
                let undo = EntryUndo::Reinsert(index, entry.clone());
                (QuickToggle { added: false, entry }, undo)
            }
            None => {
                let entry = ClassEntry::quick_session(date, student_id.clone());
                self.entries.push(entry.clone());
                (QuickToggle { added: true, entry }, EntryUndo::Pop)
            }
        };

        log::debug!(
            "{} session for {} on {}",
            if toggle.added { "Added" } else { "Removed" },
            student_id,
            date
        );

        self.commit_entries(undo)?;
        Ok(toggle)
    }

    /// Handle a click on `date` as seen from `view`.
    pub fn click_day(&mut self, view: &ViewSelector, date: NaiveDate) -> PlannerResult<DayClick> {
        match view {
            ViewSelector::All => Ok(DayClick::OpenEditor(EntryDraft::new_on(date))),
            ViewSelector::Student(id) => self.toggle_quick_session(date, id).map(DayClick::Toggled),
        }
    }

    // PROFILE:

    pub fn profile(&self) -> &PlannerProfile {
        &self.profile
    }

    /// Rename the planner. Blank names reset to the default.
    pub fn rename(&mut self, name: &str) -> PlannerResult<&str> {
        let name = PlannerProfile::normalize_name(name);
        persist(&mut self.storage, PLANNER_NAME_KEY, &name)?;
        self.profile.name = name;
        Ok(&self.profile.name)
    }

    /// Set the planner icon (an image data URI; empty removes it).
    pub fn set_icon(&mut self, icon: impl Into<String>) -> PlannerResult<()> {
        let icon = icon.into();
        persist(&mut self.storage, PLANNER_ICON_KEY, &icon)?;
        self.profile.icon = icon;
        Ok(())
    }

    // VIEWS:

    pub fn month_schedule(&self, month: CalendarMonth, view: &ViewSelector) -> MonthSchedule<'_> {
        MonthSchedule::build(&self.entries, month, view)
    }

    pub fn month_grid(&self, month: CalendarMonth, view: &ViewSelector) -> MonthGrid<'_> {
        MonthGrid::from_schedule(self.month_schedule(month, view))
    }

    pub fn export_snapshot(&self, month: CalendarMonth, view: &ViewSelector) -> ExportSnapshot {
        ExportSnapshot::capture(
            &self.month_grid(month, view),
            &self.profile.name,
            &self.profile.icon,
            &self.students,
        )
    }

    // PERSISTENCE:

    fn save_students(&mut self) -> PlannerResult<()> {
        let json = to_json(STUDENTS_KEY, &self.students)?;
        persist(&mut self.storage, STUDENTS_KEY, &json)
    }

    fn save_entries(&mut self) -> PlannerResult<()> {
        let json = to_json(ENTRIES_KEY, &self.entries)?;
        persist(&mut self.storage, ENTRIES_KEY, &json)
    }

    /// Save the entries, reverting the change described by `undo` on failure.
    fn commit_entries(&mut self, undo: EntryUndo) -> PlannerResult<()> {
        let result = self.save_entries();
        if result.is_err() {
            match undo {
                EntryUndo::Pop => {
                    self.entries.pop();
                }
                EntryUndo::Restore(index, previous) => self.entries[index] = previous,
                EntryUndo::Reinsert(index, removed) => self.entries.insert(index, removed),
            }
            log::warn!("Reverted unsaved change to '{}'", ENTRIES_KEY);
        }
        result
    }
}

fn to_json<T: Serialize + ?Sized>(key: &str, value: &T) -> PlannerResult<String> {
    serde_json::to_string(value)
        .map_err(|e| PlannerError::Serialization(format!("{key}: {e}")))
}

fn persist<S: Storage>(storage: &mut S, key: &str, value: &str) -> PlannerResult<()> {
    storage.save(key, value).inspect_err(|e| {
        log::error!("Failed to save '{}': {}", key, e);
    })
}

fn load_value<S: Storage>(storage: &S, key: &str) -> Option<String> {
    match storage.load(key) {
        Ok(value) => value,
        Err(e) => {
            log::warn!("Could not read '{}', using default: {}", key, e);
            None
        }
    }
}

/// Load a JSON array stored under `key`. Records that fail to parse are
/// skipped; a value that is not an array at all counts as missing.
fn load_records<S: Storage, T: DeserializeOwned>(storage: &S, key: &str) -> Option<Vec<T>> {
    let raw = load_value(storage, key)?;

    let values: Vec<serde_json::Value> = match serde_json::from_str(&raw) {
        Ok(values) => values,
        Err(e) => {
            log::warn!("Stored '{}' is corrupt, using default: {}", key, e);
            return None;
        }
    };

    let records = values
        .into_iter()
        .enumerate()
        .filter_map(|(i, value)| match serde_json::from_value(value) {
            Ok(record) => Some(record),
            Err(e) => {
                log::warn!("Skipping record {} of '{}': {}", i, key, e);
                None
            }
        })
        .collect();

    Some(records)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::entry::{EntryKind, EntryType, Field};
    use crate::storage::{FileStorage, MemoryStorage};
    use crate::time::ClockTime;

    fn init_logging() {
        let _ = env_logger::builder().is_test(true).try_init();
    }

    fn date(s: &str) -> NaiveDate {
        NaiveDate::parse_from_str(s, "%Y-%m-%d").unwrap()
    }

    fn planner() -> Planner<MemoryStorage> {
        init_logging();
        Planner::load(MemoryStorage::new())
    }

    /// Storage whose writes always fail.
    struct ReadOnlyStorage;

    impl Storage for ReadOnlyStorage {
        fn load(&self, _key: &str) -> PlannerResult<Option<String>> {
            Ok(None)
        }

        fn save(&mut self, key: &str, _value: &str) -> PlannerResult<()> {
            Err(PlannerError::Storage {
                key: key.to_string(),
                message: "quota exceeded".into(),
            })
        }
    }

    /// Memory storage that refuses writes to one key.
    struct FailingKeyStorage {
        inner: MemoryStorage,
        failing: &'static str,
    }

    impl FailingKeyStorage {
        fn new(inner: MemoryStorage, failing: &'static str) -> Self {
            FailingKeyStorage { inner, failing }
        }
    }

    impl Storage for FailingKeyStorage {
        fn load(&self, key: &str) -> PlannerResult<Option<String>> {
            self.inner.load(key)
        }

        fn save(&mut self, key: &str, value: &str) -> PlannerResult<()> {
            if key == self.failing {
                return Err(PlannerError::Storage {
                    key: key.to_string(),
                    message: "disk full".into(),
                });
            }
            self.inner.save(key, value)
        }
    }

    #[test]
    fn test_fresh_planner_uses_defaults() {
        let p = planner();
        assert_eq!(p.students(), seed_roster().as_slice());
        assert!(p.entries().is_empty());
        assert_eq!(p.profile(), &PlannerProfile::default());
    }

    #[test]
    fn test_corrupt_key_falls_back_without_affecting_others() {
        init_logging();
        let storage = MemoryStorage::new()
            .with_value(STUDENTS_KEY, "{not json")
            .with_value(PLANNER_NAME_KEY, "Ms. Park")
            .with_value(
                ENTRIES_KEY,
                r#"[
                    {"id":"ok","studentId":"1","type":"SESSION","date":"2024-03-04"},
                    {"id":"bad","type":"SESSION","date":"2024-03-04"},
                    {"id":"worse","type":"EVENT","date":"March 4th","title":"x"},
                    {"id":"backwards","type":"EVENT","date":"2024-03-10","endDate":"2024-03-08","title":"x"}
                ]"#,
            );

        let p = Planner::load(storage);
        assert_eq!(p.students(), seed_roster().as_slice());
        assert_eq!(p.profile().name, "Ms. Park");
        assert_eq!(p.entries().len(), 1);
        assert_eq!(p.entries()[0].id.as_str(), "ok");
    }

    #[test]
    fn test_empty_stored_roster_is_kept_empty() {
        init_logging();
        let p = Planner::load(MemoryStorage::new().with_value(STUDENTS_KEY, "[]"));
        assert!(p.students().is_empty());
    }

    #[test]
    fn test_add_student_trims_and_persists() {
        let mut p = planner();
        let student = p.add_student("  Dana Lee ", Color::from_palette(5)).unwrap();

        assert_eq!(student.name, "Dana Lee");
        assert_eq!(p.students().last(), Some(&student));

        let stored: Vec<Student> =
            serde_json::from_str(p.storage().get(STUDENTS_KEY).unwrap()).unwrap();
        assert_eq!(stored.len(), 4);
        assert_eq!(p.suggested_color(), Color::from_palette(6));
    }

    #[test]
    fn test_add_student_rejects_blank_name() {
        let mut p = planner();
        let result = p.add_student("   ", Color::default());

        assert!(matches!(result, Err(PlannerError::EmptyStudentName)));
        assert_eq!(p.students().len(), 3);
        assert!(p.storage().get(STUDENTS_KEY).is_none());
    }

    #[test]
    fn test_add_student_stops_at_capacity() {
        let mut p = planner();
        for i in 0..(MAX_STUDENTS - 3) {
            p.add_student(&format!("Student {i}"), Color::from_palette(i)).unwrap();
        }
        assert!(p.is_roster_full());

        let result = p.add_student("One Too Many", Color::default());
        assert!(matches!(result, Err(PlannerError::RosterFull(20))));
        assert_eq!(p.students().len(), MAX_STUDENTS);
    }

    #[test]
    fn test_delete_student_cascades_to_their_sessions_only() {
        let mut p = planner();
        let s1 = StudentId::new("1");
        let s2 = StudentId::new("2");

        p.upsert_entry(EntryPatch::session(date("2024-03-04"), s1.clone())).unwrap();
        p.upsert_entry(EntryPatch::session(date("2024-03-05"), s1.clone())).unwrap();
        p.upsert_entry(EntryPatch::session(date("2024-03-04"), s2.clone())).unwrap();
        p.upsert_entry(EntryPatch::event(date("2024-03-04"), "Recital")).unwrap();

        let mut view = ViewSelector::Student(s1.clone());
        let removal = p.delete_student(&s1).unwrap();
        assert!(view.forget_student(&s1));

        assert_eq!(removal.removed_entries, 2);
        assert_eq!(removal.student.map(|s| s.name), Some("Alice Chen".to_string()));
        assert_eq!(view, ViewSelector::All);
        assert!(p.student(&s1).is_none());
        assert_eq!(p.entries().len(), 2);
        assert!(p.entries().iter().any(|e| e.is_event()));
        assert!(p.entries().iter().any(|e| e.is_session_for(&s2)));
    }

    #[test]
    fn test_delete_unknown_student_is_noop() {
        let mut p = planner();
        let removal = p.delete_student(&StudentId::new("nobody")).unwrap();
        assert_eq!(removal.student, None);
        assert_eq!(p.students().len(), 3);
    }

    #[test]
    fn test_upsert_insert_then_update_round_trip() {
        let mut p = planner();
        let created = p
            .upsert_entry(EntryPatch {
                start_time: Field::Set(ClockTime::from_hm(16, 0).unwrap()),
                notes: Field::Set("fractions".to_string()),
                ..EntryPatch::session(date("2024-03-04"), StudentId::new("1"))
            })
            .unwrap();

        let patch = EntryPatch {
            start_time: Field::Set(ClockTime::from_hm(17, 30).unwrap()),
            ..EntryPatch::update(created.id.clone())
        };
        let updated = p.upsert_entry(patch.clone()).unwrap();
        let again = p.upsert_entry(patch).unwrap();

        assert_eq!(updated, again);
        assert_eq!(p.entries().len(), 1);
        assert_eq!(p.entry(&created.id), Some(&updated));
        assert_eq!(updated.start_time, ClockTime::from_hm(17, 30));
        assert_eq!(updated.notes.as_deref(), Some("fractions"));

        let reloaded = Planner::load(p.into_storage());
        assert_eq!(reloaded.entries(), &[updated]);
    }

    #[test]
    fn test_upsert_with_unknown_id_inserts_fresh_entry() {
        let mut p = planner();
        let patch = EntryPatch {
            id: Some(EntryId::new("ghost")),
            ..EntryPatch::event(date("2024-03-04"), "Open day")
        };

        let created = p.upsert_entry(patch).unwrap();
        assert_ne!(created.id.as_str(), "ghost");
        assert_eq!(p.entries().len(), 1);
    }

    #[test]
    fn test_incomplete_insert_is_rejected_without_mutation() {
        let mut p = planner();
        let patch = EntryPatch {
            entry_type: Some(EntryType::Session),
            date: Some(date("2024-03-04")),
            ..Default::default()
        };

        assert!(matches!(
            p.upsert_entry(patch),
            Err(PlannerError::IncompleteEntry("studentId"))
        ));
        assert!(p.entries().is_empty());
    }

    #[test]
    fn test_delete_entry() {
        let mut p = planner();
        let entry = p.upsert_entry(EntryPatch::event(date("2024-03-04"), "Fair")).unwrap();

        assert_eq!(p.delete_entry(&entry.id).unwrap(), Some(entry.clone()));
        assert_eq!(p.delete_entry(&entry.id).unwrap(), None);
        assert!(p.entries().is_empty());
    }

    #[test]
    fn test_toggle_quick_session_twice_restores_state() {
        let mut p = planner();
        let student = StudentId::new("2");

        let first = p.toggle_quick_session(date("2024-03-12"), &student).unwrap();
        assert!(first.added);
        assert_eq!(p.entries().len(), 1);

        let second = p.toggle_quick_session(date("2024-03-12"), &student).unwrap();
        assert!(!second.added);
        assert_eq!(second.entry.id, first.entry.id);
        assert!(p.entries().is_empty());
        assert_eq!(p.storage().get(ENTRIES_KEY), Some("[]"));
    }

    #[test]
    fn test_toggle_removes_detailed_session_for_same_day() {
        let mut p = planner();
        let student = StudentId::new("1");
        p.upsert_entry(EntryPatch {
            start_time: Field::Set(ClockTime::from_hm(10, 0).unwrap()),
            notes: Field::Set("essay review".to_string()),
            ..EntryPatch::session(date("2024-03-12"), student.clone())
        })
        .unwrap();
        p.upsert_entry(EntryPatch::event(date("2024-03-12"), "Assembly")).unwrap();

        let toggle = p.toggle_quick_session(date("2024-03-12"), &student).unwrap();

        assert!(!toggle.added);
        assert_eq!(toggle.entry.notes.as_deref(), Some("essay review"));
        assert_eq!(p.entries().len(), 1);
        assert!(p.entries()[0].is_event());
    }

    #[test]
    fn test_click_day_depends_on_view() {
        let mut p = planner();

        match p.click_day(&ViewSelector::All, date("2024-03-12")).unwrap() {
            DayClick::OpenEditor(draft) => {
                assert!(draft.is_new());
                assert_eq!(draft.date, Some(date("2024-03-12")));
            }
            other => panic!("expected editor, got {other:?}"),
        }
        assert!(p.entries().is_empty());

        let view = ViewSelector::Student(StudentId::new("3"));
        match p.click_day(&view, date("2024-03-12")).unwrap() {
            DayClick::Toggled(toggle) => assert!(toggle.added),
            other => panic!("expected toggle, got {other:?}"),
        }
    }

    #[test]
    fn test_submit_draft_creates_event() {
        let mut p = planner();
        let mut draft = EntryDraft::new_on(date("2024-03-30"));
        draft.entry_type = EntryType::Event;
        draft.title = "Spring Break".to_string();
        draft.end_date = Some(date("2024-04-02"));

        let event = p.submit_draft(&draft).unwrap();
        assert!(matches!(event.kind, EntryKind::Event { .. }));

        let april = p.month_grid(CalendarMonth::new(2024, 3), &ViewSelector::All);
        let days: Vec<u32> = april
            .cells
            .iter()
            .filter(|c| !c.entries.is_empty())
            .map(|c| chrono::Datelike::day(&c.date))
            .collect();
        assert_eq!(days, vec![1, 2]);
    }

    #[test]
    fn test_rename_and_icon_persist() {
        let mut p = planner();
        assert_eq!(p.rename("  ").unwrap(), "SNFTutor");
        assert_eq!(p.rename(" Study Hall ").unwrap(), "Study Hall");
        p.set_icon("data:image/png;base64,AAAA").unwrap();

        let reloaded = Planner::load(p.into_storage());
        assert_eq!(reloaded.profile().name, "Study Hall");
        assert_eq!(reloaded.profile().icon, "data:image/png;base64,AAAA");
    }

    #[test]
    fn test_state_survives_restart_with_file_storage() {
        init_logging();
        let dir = tempfile::tempdir().unwrap();

        let mut p = Planner::load(FileStorage::new(dir.path()));
        let student = p.add_student("Evan Ruiz", Color::from_palette(3)).unwrap();
        p.toggle_quick_session(date("2024-03-12"), &student.id).unwrap();
        drop(p);

        let p = Planner::load(FileStorage::new(dir.path()));
        assert_eq!(p.students().len(), 4);
        assert_eq!(p.entries().len(), 1);
        assert!(p.entries()[0].is_session_for(&student.id));
        assert_eq!(p.profile().name, "SNFTutor");
    }

    #[test]
    fn test_failed_write_is_reported_and_change_reverted() {
        init_logging();
        let mut p = Planner::load(ReadOnlyStorage);

        let result = p.toggle_quick_session(date("2024-03-12"), &StudentId::new("1"));
        assert!(matches!(result, Err(PlannerError::Storage { .. })));
        assert!(p.entries().is_empty());

        let result = p.upsert_entry(EntryPatch::event(date("2024-03-12"), "Fair"));
        assert!(matches!(result, Err(PlannerError::Storage { .. })));
        assert!(p.entries().is_empty());

        assert!(p.rename("Study Hall").is_err());
        assert!(p.set_icon("data:image/png;base64,AAAA").is_err());
        assert_eq!(p.profile(), &PlannerProfile::default());
    }

    #[test]
    fn test_retrying_failed_add_student_does_not_duplicate() {
        init_logging();
        let mut p = Planner::load(ReadOnlyStorage);

        assert!(p.add_student("Dana", Color::default()).is_err());
        assert!(p.add_student("Dana", Color::default()).is_err());

        assert_eq!(p.students(), seed_roster().as_slice());
    }

    #[test]
    fn test_failed_entry_write_restores_previous_entries() {
        init_logging();
        let storage = MemoryStorage::new().with_value(
            ENTRIES_KEY,
            r#"[
                {"id":"a","studentId":"1","type":"SESSION","date":"2024-03-04","startTime":"10:00"},
                {"id":"b","studentId":"2","type":"SESSION","date":"2024-03-05"}
            ]"#,
        );
        let mut p = Planner::load(FailingKeyStorage::new(storage, ENTRIES_KEY));
        let before = p.entries().to_vec();

        let update = EntryPatch {
            start_time: Field::Set(ClockTime::from_hm(18, 0).unwrap()),
            ..EntryPatch::update(EntryId::new("a"))
        };
        assert!(p.upsert_entry(update).is_err());
        assert!(p.delete_entry(&EntryId::new("a")).is_err());
        assert!(p.toggle_quick_session(date("2024-03-05"), &StudentId::new("2")).is_err());

        assert_eq!(p.entries(), before.as_slice());
    }

    #[test]
    fn test_delete_student_writes_entries_when_roster_write_fails() {
        init_logging();
        let mut p = Planner::load(FailingKeyStorage::new(MemoryStorage::new(), STUDENTS_KEY));
        let alice = StudentId::new("1");
        p.toggle_quick_session(date("2024-03-04"), &alice).unwrap();

        let result = p.delete_student(&alice);
        assert!(matches!(result, Err(PlannerError::Storage { .. })));
        assert!(p.entries().is_empty());

        let reloaded = Planner::load(p.into_storage().inner);
        assert!(!reloaded.entries().iter().any(|e| e.is_session_for(&alice)));
        assert!(reloaded.entries().is_empty());
    }

    #[test]
    fn test_export_snapshot_owns_grid_contents() {
        let mut p = planner();
        p.rename("Study Hall").unwrap();
        p.toggle_quick_session(date("2024-03-12"), &StudentId::new("2")).unwrap();

        let view = ViewSelector::Student(StudentId::new("2"));
        let snapshot = p.export_snapshot(CalendarMonth::new(2024, 2), &view);
        drop(p);

        assert_eq!(snapshot.file_name(), "Study Hall_Bob Smith_March_2024.png");
        assert!(snapshot.days[11].highlighted);
        assert_eq!(snapshot.days[11].entries.len(), 1);
    }
}

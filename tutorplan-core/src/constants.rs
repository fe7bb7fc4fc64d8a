/// Maximum number of students on the roster.
pub const MAX_STUDENTS: usize = 20;

/// Display name used when the planner has not been named (or was renamed to blank).
pub const DEFAULT_PLANNER_NAME: &str = "SNFTutor";

// Storage keys. These match the layout written by earlier releases, so
// existing data keeps loading.
pub const STUDENTS_KEY: &str = "tutor_students";
pub const ENTRIES_KEY: &str = "tutor_classes";
pub const PLANNER_NAME_KEY: &str = "tutor_planner_name";
pub const PLANNER_ICON_KEY: &str = "tutor_planner_icon";

/// Shown to the user when rendering the month image fails.
pub const EXPORT_FAILURE_NOTICE: &str =
    "Could not generate the image. Please try taking a manual screenshot.";

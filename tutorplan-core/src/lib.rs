//! Core of the tutoring planner.
//!
//! This crate holds everything below the user interface:
//! - `Planner`, the store for the roster, class entries and planner profile
//! - `MonthSchedule` and `MonthGrid`, which decide what shows on each day
//! - date and time helpers used for display
//! - the `Storage` and `ImageRenderer` ports the host application provides

pub mod config;
pub mod constants;
pub mod dates;
pub mod entry;
pub mod error;
pub mod export;
pub mod filter;
pub mod grid;
pub mod planner;
pub mod storage;
pub mod student;
pub mod time;
pub mod view;

pub use config::PlannerConfig;
pub use dates::{CalendarMonth, days_in_month, first_weekday_of_month, format_clock_time, format_duration_label};
pub use entry::{ClassEntry, EntryDraft, EntryId, EntryKind, EntryPatch, EntryType, Field};
pub use error::{PlannerError, PlannerResult};
pub use export::{ExportOptions, ExportSnapshot, ImageRenderer, export_month};
pub use filter::{DaySchedule, MonthSchedule};
pub use grid::{MonthGrid, SpanPosition};
pub use planner::{DayClick, Planner, PlannerProfile, QuickToggle, StudentRemoval};
pub use storage::{FileStorage, MemoryStorage, Storage};
pub use student::{Color, Student, StudentId};
pub use time::{ClockTime, EntryDuration};
pub use view::ViewSelector;

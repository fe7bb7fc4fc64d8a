//! Month grid layout: the week rows a renderer draws.

use chrono::NaiveDate;

use crate::dates::CalendarMonth;
use crate::entry::{ClassEntry, EntryKind};
use crate::filter::{DaySchedule, MonthSchedule};
use crate::view::ViewSelector;

pub const WEEKDAY_LABELS: [&str; 7] = ["SUN", "MON", "TUE", "WED", "THU", "FRI", "SAT"];

/// Where a day sits within an event's run of days. Decides which edges of
/// the event bar get a border.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SpanPosition {
    /// Starts and ends on this day.
    Single,
    Start,
    Middle,
    End,
}

impl SpanPosition {
    pub fn of(entry: &ClassEntry, day: NaiveDate) -> Option<Self> {
        let EntryKind::Event { end_date, .. } = &entry.kind else {
            return None;
        };

        let is_start = day == entry.date;
        let is_end = day == end_date.unwrap_or(entry.date);

        Some(match (is_start, is_end) {
            (true, true) => SpanPosition::Single,
            (true, false) => SpanPosition::Start,
            (false, true) => SpanPosition::End,
            (false, false) => SpanPosition::Middle,
        })
    }
}

/// An entry as drawn in one day cell.
#[derive(Debug, Clone, PartialEq)]
pub struct PlacedEntry<'a> {
    pub entry: &'a ClassEntry,
    /// `None` for sessions.
    pub span: Option<SpanPosition>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct DayCell<'a> {
    pub date: NaiveDate,
    pub entries: Vec<PlacedEntry<'a>>,
    /// In a student view: that student has a session today, so the cell is
    /// drawn in the student's colour.
    pub highlighted: bool,
}

impl<'a> DayCell<'a> {
    fn from_schedule(day: DaySchedule<'a>, view: &ViewSelector) -> Self {
        let highlighted = view
            .student_id()
            .is_some_and(|id| day.entries.iter().any(|e| e.is_session_for(id)));

        DayCell {
            date: day.date,
            entries: day
                .entries
                .into_iter()
                .map(|entry| PlacedEntry {
                    entry,
                    span: SpanPosition::of(entry, day.date),
                })
                .collect(),
            highlighted,
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct MonthGrid<'a> {
    pub month: CalendarMonth,
    pub view: ViewSelector,
    /// Empty cells before day 1 (the weekday of the 1st, Sunday first).
    pub leading_blanks: u32,
    pub cells: Vec<DayCell<'a>>,
}

impl<'a> MonthGrid<'a> {
    pub fn from_schedule(schedule: MonthSchedule<'a>) -> Self {
        let MonthSchedule { month, view, days } = schedule;
        let cells = days
            .into_iter()
            .map(|day| DayCell::from_schedule(day, &view))
            .collect();

        MonthGrid {
            month,
            leading_blanks: month.first_weekday(),
            view,
            cells,
        }
    }

    /// Number of week rows the month occupies (4 to 6).
    pub fn rows(&self) -> u32 {
        (self.leading_blanks + self.cells.len() as u32).div_ceil(7)
    }

    /// Cells laid out week by week. `None` pads before day 1 and after the
    /// last day.
    pub fn weeks(&self) -> Vec<[Option<&DayCell<'a>>; 7]> {
        let mut slots: Vec<Option<&DayCell<'a>>> = Vec::new();
        slots.extend((0..self.leading_blanks).map(|_| None));
        slots.extend(self.cells.iter().map(Some));

        slots
            .chunks(7)
            .map(|week| {
                let mut row = [None; 7];
                for (slot, cell) in row.iter_mut().zip(week) {
                    *slot = *cell;
                }
                row
            })
            .collect()
    }
}

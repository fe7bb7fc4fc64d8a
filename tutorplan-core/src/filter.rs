//! Picks the entries that belong to a displayed month and buckets them by day.

use chrono::{Datelike, NaiveDate};

use crate::dates::CalendarMonth;
use crate::entry::ClassEntry;
use crate::view::ViewSelector;

/// Entries visible on one day, ordered by start time.
#[derive(Debug, Clone, PartialEq)]
pub struct DaySchedule<'a> {
    pub date: NaiveDate,
    pub entries: Vec<&'a ClassEntry>,
}

impl DaySchedule<'_> {
    pub fn day(&self) -> u32 {
        self.date.day()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

/// Every day of a month with its visible entries.
#[derive(Debug, Clone, PartialEq)]
pub struct MonthSchedule<'a> {
    pub month: CalendarMonth,
    pub view: ViewSelector,
    pub days: Vec<DaySchedule<'a>>,
}

impl<'a> MonthSchedule<'a> {
    /// Bucket `entries` onto the days of `month`, as seen from `view`.
    pub fn build(entries: &'a [ClassEntry], month: CalendarMonth, view: &ViewSelector) -> Self {
        let relevant: Vec<&ClassEntry> = entries
            .iter()
            .filter(|e| is_month_relevant(e, month) && view.shows(e))
            .collect();

        let days = month
            .days()
            .map(|date| {
                let mut on_day: Vec<&ClassEntry> =
                    relevant.iter().copied().filter(|e| e.occurs_on(date)).collect();
                // Stable, so entries without a time keep collection order.
                on_day.sort_by_key(|e| e.sort_time());
                DaySchedule {
                    date,
                    entries: on_day,
                }
            })
            .collect();

        MonthSchedule {
            month,
            view: view.clone(),
            days,
        }
    }

    pub fn day(&self, day: u32) -> Option<&DaySchedule<'a>> {
        self.days.get(day.checked_sub(1)? as usize)
    }

    /// All distinct entries shown anywhere in the month, by first appearance.
    pub fn entries(&self) -> Vec<&'a ClassEntry> {
        let mut seen: Vec<&'a ClassEntry> = Vec::new();
        for entry in self.days.iter().flat_map(|d| d.entries.iter().copied()) {
            if !seen.iter().any(|s| s.id == entry.id) {
                seen.push(entry);
            }
        }
        seen
    }
}

fn year_month(date: NaiveDate) -> (i32, u32) {
    (date.year(), date.month0())
}

/// Whether any part of the entry falls in `month`: it starts there, ends
/// there, or starts before and ends after it.
pub fn is_month_relevant(entry: &ClassEntry, month: CalendarMonth) -> bool {
    let target = (month.year(), month.month0());
    let start = year_month(entry.date);
    let end = year_month(entry.effective_end());

    let starts_in_month = start == target;
    let ends_in_month = end == target;
    let spans_month = start <= target && end >= target;

    starts_in_month || ends_in_month || spans_month
}

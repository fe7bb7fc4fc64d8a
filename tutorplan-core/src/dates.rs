//! Calendar arithmetic and display formatting.
//!
//! Months are zero-indexed (`0` = January) at the free-function level and
//! out-of-range months roll over into later years, so `(2023, 12)` is
//! January 2024.

use std::fmt;

use chrono::{Datelike, Month, NaiveDate};

use crate::time::{ClockTime, EntryDuration};

/// Normalize a (year, zero-indexed month) pair so the month is within 0..12.
/// The year saturates; chrono rejects such years anyway.
fn normalize(year: i32, month0: u32) -> (i32, u32) {
    (year.saturating_add((month0 / 12) as i32), month0 % 12)
}

/// First day of the given month, or `None` outside chrono's supported years.
fn first_of_month(year: i32, month0: u32) -> Option<NaiveDate> {
    let (year, month0) = normalize(year, month0);
    NaiveDate::from_ymd_opt(year, month0 + 1, 1)
}

/// Number of days in a month. Computed as the day before the 1st of the
/// following month, so leap years come out of the calendar itself.
pub fn days_in_month(year: i32, month0: u32) -> u32 {
    first_of_month(year, month0 + 1)
        .and_then(|next| next.pred_opt())
        .map(|last| last.day())
        .unwrap_or(0)
}

/// Weekday of the 1st of the month, 0 = Sunday through 6 = Saturday.
pub fn first_weekday_of_month(year: i32, month0: u32) -> u32 {
    first_of_month(year, month0)
        .map(|first| first.weekday().num_days_from_sunday())
        .unwrap_or(0)
}

/// 12-hour display form: `13:05` becomes `1:05 PM`, midnight is `12:00 AM`.
pub fn format_clock_time(time: ClockTime) -> String {
    let hour = time.hour();
    let meridiem = if hour >= 12 { "PM" } else { "AM" };
    let display_hour = match hour % 12 {
        0 => 12,
        h => h,
    };
    format!("{}:{:02} {}", display_hour, time.minute(), meridiem)
}

/// Compact duration label such as `1h 30m`, `45m` or `2h`. Zero is blank.
pub fn format_duration_label(duration: EntryDuration) -> String {
    let parts: Vec<String> = [
        (duration.hours() > 0).then(|| format!("{}h", duration.hours())),
        (duration.minutes() > 0).then(|| format!("{}m", duration.minutes())),
    ]
    .into_iter()
    .flatten()
    .collect();

    parts.join(" ")
}

/// A displayed month: the unit the grid, filter and export work in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct CalendarMonth {
    year: i32,
    month0: u32,
}

impl CalendarMonth {
    /// Build from a zero-indexed month, rolling overflow into later years.
    pub fn new(year: i32, month0: u32) -> Self {
        let (year, month0) = normalize(year, month0);
        CalendarMonth { year, month0 }
    }

    /// The month containing `date`.
    pub fn containing(date: NaiveDate) -> Self {
        CalendarMonth {
            year: date.year(),
            month0: date.month0(),
        }
    }

    pub fn year(&self) -> i32 {
        self.year
    }

    pub fn month0(&self) -> u32 {
        self.month0
    }

    /// English month name, e.g. `"March"`.
    pub fn name(&self) -> &'static str {
        Month::try_from(self.month0 as u8 + 1)
            .map(|m| m.name())
            .unwrap_or("January")
    }

    pub fn prev(&self) -> Self {
        if self.month0 == 0 {
            CalendarMonth::new(self.year.saturating_sub(1), 11)
        } else {
            CalendarMonth::new(self.year, self.month0 - 1)
        }
    }

    pub fn next(&self) -> Self {
        CalendarMonth::new(self.year, self.month0 + 1)
    }

    pub fn num_days(&self) -> u32 {
        days_in_month(self.year, self.month0)
    }

    pub fn first_weekday(&self) -> u32 {
        first_weekday_of_month(self.year, self.month0)
    }

    pub fn first_day(&self) -> Option<NaiveDate> {
        first_of_month(self.year, self.month0)
    }

    pub fn last_day(&self) -> Option<NaiveDate> {
        NaiveDate::from_ymd_opt(self.year, self.month0 + 1, self.num_days())
    }

    /// Date of day-of-month `day` (1-based), if it exists in this month.
    pub fn day(&self, day: u32) -> Option<NaiveDate> {
        NaiveDate::from_ymd_opt(self.year, self.month0 + 1, day)
    }

    /// Every date in the month, in order.
    pub fn days(&self) -> impl Iterator<Item = NaiveDate> + use<> {
        let month = *self;
        (1..=month.num_days()).filter_map(move |d| month.day(d))
    }

    pub fn contains(&self, date: NaiveDate) -> bool {
        date.year() == self.year && date.month0() == self.month0
    }
}

impl fmt::Display for CalendarMonth {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {}", self.name(), self.year)
    }
}

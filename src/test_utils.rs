//! Builders shared by the unit tests.

use chrono::{Datelike, NaiveDate, NaiveDateTime};

use crate::native::NativeDate;

/// A wall-clock date-time from a 0-based month. Panics on bad components.
pub fn naive(year: i32, month: u32, day: u32, hour: u32, minute: u32, second: u32) -> NaiveDateTime {
    NaiveDate::from_ymd_opt(year, month + 1, day)
        .and_then(|d| d.and_hms_opt(hour, minute, second))
        .unwrap_or_else(|| panic!("bad test date {year}-{month}-{day} {hour}:{minute}:{second}"))
}

/// Midnight of a day, 0-based month
pub fn date(year: i32, month: u32, day: u32) -> NativeDate {
    NativeDate::new(naive(year, month, day, 0, 0, 0))
}

pub fn date_time(year: i32, month: u32, day: u32, hour: u32, minute: u32, second: u32) -> NativeDate {
    NativeDate::new(naive(year, month, day, hour, minute, second))
}

/// A filter rejecting odd days of the month
pub fn even_days_only() -> impl Fn(&NativeDate) -> bool {
    |d: &NativeDate| d.get().is_some_and(|d| d.day() % 2 == 0)
}

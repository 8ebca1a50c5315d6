use std::cmp::Ordering;
use std::fmt::Debug;

use tokio::sync::watch;

use crate::error::DateError;
use crate::format::FormatOptions;
use crate::types::{NameStyle, TimeOfDay};

/// Calendar arithmetic over an opaque date representation.
///
/// Everything in this crate that touches a date goes through an adapter, so
/// grids and selection work the same whether dates are `chrono` values or
/// plain millisecond timestamps. Months are 0-based and weekdays count from
/// Sunday = 0.
///
/// A date value may be *invalid*. Accessors on an invalid date return 0,
/// arithmetic returns the invalid sentinel, and the operations that must not
/// guess ([`compare`](Self::compare), [`format`](Self::format),
/// [`to_iso8601`](Self::to_iso8601)) fail with [`DateError::InvalidDate`].
pub trait DateTimeAdapter {
    /// The adapter's date type
    type Date: Clone + Debug + PartialEq;

    fn year(&self, date: &Self::Date) -> i32;

    /// Month, 0-based
    fn month(&self, date: &Self::Date) -> u32;

    /// Day of month, 1-based
    fn day(&self, date: &Self::Date) -> u32;

    /// Day of week, 0 = Sunday
    fn weekday(&self, date: &Self::Date) -> u32;

    fn hour(&self, date: &Self::Date) -> u32;

    fn minute(&self, date: &Self::Date) -> u32;

    fn second(&self, date: &Self::Date) -> u32;

    /// Milliseconds since the unix epoch, `None` for invalid dates
    fn timestamp_millis(&self, date: &Self::Date) -> Option<i64>;

    fn num_days_in_month(&self, date: &Self::Date) -> u32;

    /// Whole days from `b` to `a`, ignoring time of day.
    /// `None` if either date is invalid.
    fn difference_in_calendar_days(&self, a: &Self::Date, b: &Self::Date) -> Option<i64>;

    fn is_valid(&self, date: &Self::Date) -> bool;

    /// The invalid sentinel
    fn invalid(&self) -> Self::Date;

    /// Adds months, clamping the day to the target month's length.
    fn add_calendar_months(&self, date: &Self::Date, months: i32) -> Self::Date;

    fn add_calendar_days(&self, date: &Self::Date, days: i64) -> Self::Date;

    /// Same date with a different hour. `hour` must be below 24.
    fn set_hours(&self, date: &Self::Date, hour: u32) -> Self::Date;

    /// Same date with a different minute. `minute` must be below 60.
    fn set_minutes(&self, date: &Self::Date, minute: u32) -> Self::Date;

    /// Same date with a different second. `second` must be below 60.
    fn set_seconds(&self, date: &Self::Date, second: u32) -> Self::Date;

    /// Creates a date-time from components. Out-of-range components are
    /// rejected rather than rolled into the next unit.
    ///
    /// # Errors
    /// `InvalidMonth`, `InvalidDay`, `InvalidTime` or `OutOfRange`.
    fn create_date_time(
        &self,
        year: i32,
        month: u32,
        day: u32,
        hour: u32,
        minute: u32,
        second: u32,
    ) -> Result<Self::Date, DateError>;

    fn now(&self) -> Self::Date;

    /// # Errors
    /// `InvalidDate` when `date` is invalid.
    fn format(&self, date: &Self::Date, options: &FormatOptions) -> Result<String, DateError>;

    /// # Errors
    /// `InvalidDate` when `date` is invalid.
    fn to_iso8601(&self, date: &Self::Date) -> Result<String, DateError>;

    /// Lenient text parsing for typed input. `None` for empty text.
    fn parse(&self, text: &str) -> Option<Self::Date>;

    /// Accepts a value already in the adapter's native shape. `null` maps
    /// to `None`; anything else maps to the invalid sentinel.
    fn deserialize(&self, value: &serde_json::Value) -> Option<Self::Date>;

    fn month_names(&self, style: NameStyle) -> Vec<String>;

    /// Weekday names starting from Sunday
    fn weekday_names(&self, style: NameStyle) -> Vec<String>;

    fn locale(&self) -> &str;

    /// Replaces the locale and notifies subscribers.
    fn set_locale(&mut self, locale: &str);

    /// Observes locale changes made after this call.
    fn locale_changes(&self) -> watch::Receiver<String>;

    /// Locale default for the first column of the month grid, 0 = Sunday
    fn first_day_of_week(&self) -> u32;

    // Provided operations

    fn add_calendar_years(&self, date: &Self::Date, years: i32) -> Self::Date {
        self.add_calendar_months(date, years.saturating_mul(12))
    }

    fn create_date(&self, year: i32, month: u32, day: u32) -> Result<Self::Date, DateError> {
        self.create_date_time(year, month, day, 0, 0, 0)
    }

    /// Day-of-month labels, "1" to "31"
    fn date_names(&self) -> Vec<String> {
        (1..=31).map(|d| d.to_string()).collect()
    }

    fn year_name(&self, date: &Self::Date) -> String {
        self.year(date).to_string()
    }

    fn time_of_day(&self, date: &Self::Date) -> TimeOfDay {
        TimeOfDay::new(self.hour(date), self.minute(date), self.second(date))
            .unwrap_or(TimeOfDay::MIDNIGHT)
    }

    /// Same calendar day as `date` at `time`.
    ///
    /// # Errors
    /// `InvalidDate` when `date` is invalid.
    fn with_time_of_day(&self, date: &Self::Date, time: TimeOfDay) -> Result<Self::Date, DateError> {
        if !self.is_valid(date) {
            return Err(DateError::invalid("set time of"));
        }
        self.create_date_time(
            self.year(date),
            self.month(date),
            self.day(date),
            time.hour(),
            time.minute(),
            time.second(),
        )
    }

    /// # Errors
    /// `InvalidDate` when either date is invalid.
    fn compare(&self, a: &Self::Date, b: &Self::Date) -> Result<Ordering, DateError> {
        match (self.timestamp_millis(a), self.timestamp_millis(b)) {
            (Some(a), Some(b)) => Ok(a.cmp(&b)),
            _ => Err(DateError::invalid("compare")),
        }
    }

    /// # Errors
    /// `InvalidDate` when either date is invalid.
    fn compare_year(&self, a: &Self::Date, b: &Self::Date) -> Result<Ordering, DateError> {
        if !self.is_valid(a) || !self.is_valid(b) {
            return Err(DateError::invalid("compare"));
        }
        Ok(self.year(a).cmp(&self.year(b)))
    }

    /// Same instant. Invalid dates are never equal to anything.
    fn is_equal(&self, a: &Self::Date, b: &Self::Date) -> bool {
        matches!(self.compare(a, b), Ok(Ordering::Equal))
    }

    /// Same calendar day, ignoring time of day.
    fn is_same_day(&self, a: &Self::Date, b: &Self::Date) -> bool {
        self.difference_in_calendar_days(a, b) == Some(0)
    }

    /// Equality over optional dates: two `None` are the same, and two
    /// valid dates are the same when they are the same instant.
    fn same_date(&self, a: Option<&Self::Date>, b: Option<&Self::Date>) -> bool {
        match (a, b) {
            (None, None) => true,
            (Some(a), Some(b)) => {
                let (a_valid, b_valid) = (self.is_valid(a), self.is_valid(b));
                if a_valid && b_valid {
                    self.is_equal(a, b)
                } else {
                    a_valid == b_valid
                }
            }
            _ => false,
        }
    }

    /// `min` if `date` is before it, `max` if after, otherwise `date`.
    fn clamp_date(
        &self,
        date: &Self::Date,
        min: Option<&Self::Date>,
        max: Option<&Self::Date>,
    ) -> Self::Date {
        match (min, max) {
            (Some(min), _) if self.compare(date, min) == Ok(Ordering::Less) => min.clone(),
            (_, Some(max)) if self.compare(date, max) == Ok(Ordering::Greater) => max.clone(),
            _ => date.clone(),
        }
    }

    /// `Some(date)` only for valid dates.
    fn valid_date_or_none(&self, date: Option<&Self::Date>) -> Option<Self::Date> {
        date.filter(|d| self.is_valid(d)).cloned()
    }
}

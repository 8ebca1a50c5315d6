use std::fmt;

use chrono::{DateTime, Datelike, FixedOffset, NaiveDateTime, Offset, SecondsFormat, Timelike, Utc};
use serde::{Deserialize, Serialize};
use tokio::sync::watch;

use crate::adapter::DateTimeAdapter;
use crate::error::DateError;
use crate::format::{FormatOptions, format_naive};
use crate::locale::LocaleState;
use crate::naive;
use crate::prelude::*;
use crate::types::NameStyle;

/// Milliseconds since the unix epoch, or the invalid sentinel.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, From, Into, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Timestamp(Option<i64>);

impl Timestamp {
    /// The invalid sentinel
    pub const INVALID: Self = Self(None);

    pub const fn from_millis(millis: i64) -> Self {
        Self(Some(millis))
    }

    /// Milliseconds since the epoch, `None` when invalid
    pub const fn millis(self) -> Option<i64> {
        self.0
    }
}

impl From<i64> for Timestamp {
    fn from(millis: i64) -> Self {
        Self::from_millis(millis)
    }
}

impl fmt::Display for Timestamp {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.0 {
            Some(millis) => write!(f, "{millis}"),
            None => f.write_str("NaN"),
        }
    }
}

/// Adapter over unix millisecond timestamps.
///
/// Calendar components are read in a fixed UTC offset, UTC by default, so
/// the same timestamp always lands on the same calendar day.
#[derive(Debug)]
pub struct TimestampAdapter {
    offset: FixedOffset,
    locale: LocaleState,
}

impl Default for TimestampAdapter {
    fn default() -> Self {
        Self::new(Utc.fix(), crate::DEFAULT_LOCALE)
    }
}

impl TimestampAdapter {
    pub fn new(offset: FixedOffset, locale: &str) -> Self {
        Self {
            offset,
            locale: LocaleState::new(locale),
        }
    }

    pub const fn offset(&self) -> FixedOffset {
        self.offset
    }

    /// Wall-clock view of a timestamp in this adapter's offset
    fn local(&self, date: &Timestamp) -> Option<NaiveDateTime> {
        let utc = DateTime::<Utc>::from_timestamp_millis(date.0?)?;
        Some(utc.with_timezone(&self.offset).naive_local())
    }

    /// `None` when the wall-clock time has no UTC instant in range
    fn from_local(&self, local: NaiveDateTime) -> Option<Timestamp> {
        let utc = local.checked_sub_offset(self.offset)?;
        Some(Timestamp(Some(utc.and_utc().timestamp_millis())))
    }

    fn map(&self, date: &Timestamp, f: impl FnOnce(&NaiveDateTime) -> Option<NaiveDateTime>) -> Timestamp {
        self.local(date)
            .and_then(|d| f(&d))
            .and_then(|d| self.from_local(d))
            .unwrap_or(Timestamp::INVALID)
    }
}

impl DateTimeAdapter for TimestampAdapter {
    type Date = Timestamp;

    fn year(&self, date: &Timestamp) -> i32 {
        self.local(date).map_or(0, |d| d.year())
    }

    fn month(&self, date: &Timestamp) -> u32 {
        self.local(date).map_or(0, |d| d.month0())
    }

    fn day(&self, date: &Timestamp) -> u32 {
        self.local(date).map_or(0, |d| d.day())
    }

    fn weekday(&self, date: &Timestamp) -> u32 {
        self.local(date).map_or(0, |d| naive::weekday(&d))
    }

    fn hour(&self, date: &Timestamp) -> u32 {
        self.local(date).map_or(0, |d| d.hour())
    }

    fn minute(&self, date: &Timestamp) -> u32 {
        self.local(date).map_or(0, |d| d.minute())
    }

    fn second(&self, date: &Timestamp) -> u32 {
        self.local(date).map_or(0, |d| d.second())
    }

    fn timestamp_millis(&self, date: &Timestamp) -> Option<i64> {
        // out-of-range millis count as invalid too
        self.local(date).and(date.0)
    }

    fn num_days_in_month(&self, date: &Timestamp) -> u32 {
        self.local(date).map_or(0, |d| naive::num_days_in_month(&d))
    }

    fn difference_in_calendar_days(&self, a: &Timestamp, b: &Timestamp) -> Option<i64> {
        Some(naive::difference_in_calendar_days(&self.local(a)?, &self.local(b)?))
    }

    fn is_valid(&self, date: &Timestamp) -> bool {
        self.local(date).is_some()
    }

    fn invalid(&self) -> Timestamp {
        Timestamp::INVALID
    }

    fn add_calendar_months(&self, date: &Timestamp, months: i32) -> Timestamp {
        self.map(date, |d| naive::add_months(d, months))
    }

    fn add_calendar_days(&self, date: &Timestamp, days: i64) -> Timestamp {
        self.map(date, |d| naive::add_days(d, days))
    }

    fn set_hours(&self, date: &Timestamp, hour: u32) -> Timestamp {
        self.map(date, |d| naive::set_hours(d, hour))
    }

    fn set_minutes(&self, date: &Timestamp, minute: u32) -> Timestamp {
        self.map(date, |d| naive::set_minutes(d, minute))
    }

    fn set_seconds(&self, date: &Timestamp, second: u32) -> Timestamp {
        self.map(date, |d| naive::set_seconds(d, second))
    }

    fn create_date_time(
        &self,
        year: i32,
        month: u32,
        day: u32,
        hour: u32,
        minute: u32,
        second: u32,
    ) -> Result<Timestamp, DateError> {
        let local = naive::create(year, month, day, hour, minute, second)?;
        self.from_local(local).ok_or(DateError::OutOfRange(year))
    }

    fn now(&self) -> Timestamp {
        Timestamp::from_millis(Utc::now().timestamp_millis())
    }

    fn format(&self, date: &Timestamp, options: &FormatOptions) -> Result<String, DateError> {
        let local = self.local(date).ok_or(DateError::invalid("format"))?;
        Ok(format_naive(&local, options))
    }

    fn to_iso8601(&self, date: &Timestamp) -> Result<String, DateError> {
        let utc = date
            .0
            .and_then(DateTime::<Utc>::from_timestamp_millis)
            .ok_or(DateError::invalid("serialize"))?;
        Ok(utc
            .with_timezone(&self.offset)
            .to_rfc3339_opts(SecondsFormat::Millis, true))
    }

    /// Integer milliseconds, RFC 3339 with an offset, or any layout the
    /// native adapter understands read in this adapter's offset.
    fn parse(&self, text: &str) -> Option<Timestamp> {
        let text = text.trim();
        if text.is_empty() {
            return None;
        }
        if let Ok(millis) = text.parse::<i64>() {
            return Some(Timestamp::from_millis(millis));
        }
        if let Ok(date) = DateTime::parse_from_rfc3339(text) {
            return Some(Timestamp::from_millis(date.timestamp_millis()));
        }
        Some(
            naive::parse_lenient(text)
                .and_then(|d| self.from_local(d))
                .unwrap_or(Timestamp::INVALID),
        )
    }

    fn deserialize(&self, value: &serde_json::Value) -> Option<Timestamp> {
        match value {
            serde_json::Value::Null => None,
            serde_json::Value::Number(n) => Some(n.as_i64().map_or(Timestamp::INVALID, Timestamp::from_millis)),
            _ => Some(Timestamp::INVALID),
        }
    }

    fn month_names(&self, style: NameStyle) -> Vec<String> {
        naive::month_names(style)
    }

    fn weekday_names(&self, style: NameStyle) -> Vec<String> {
        naive::weekday_names(style)
    }

    fn locale(&self) -> &str {
        self.locale.tag()
    }

    fn set_locale(&mut self, locale: &str) {
        self.locale.set(locale);
    }

    fn locale_changes(&self) -> watch::Receiver<String> {
        self.locale.subscribe()
    }

    fn first_day_of_week(&self) -> u32 {
        self.locale.first_day_of_week()
    }
}

use std::fmt;

use chrono::{Datelike, Local, NaiveDateTime, Timelike};
use serde::{Deserialize, Serialize};
use tokio::sync::watch;

use crate::adapter::DateTimeAdapter;
use crate::error::DateError;
use crate::format::{FormatOptions, format_naive};
use crate::locale::LocaleState;
use crate::naive;
use crate::prelude::*;
use crate::types::NameStyle;

/// A wall-clock date-time, or the invalid sentinel.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, From, Into)]
pub struct NativeDate(Option<NaiveDateTime>);

impl NativeDate {
    /// The invalid sentinel
    pub const INVALID: Self = Self(None);

    pub const fn new(value: NaiveDateTime) -> Self {
        Self(Some(value))
    }

    /// The wrapped value, `None` when invalid
    pub const fn get(self) -> Option<NaiveDateTime> {
        self.0
    }

    pub const fn is_valid(self) -> bool {
        self.0.is_some()
    }
}

impl From<NaiveDateTime> for NativeDate {
    fn from(value: NaiveDateTime) -> Self {
        Self::new(value)
    }
}

impl fmt::Display for NativeDate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.0 {
            Some(date) => f.write_str(&naive::to_iso8601(&date)),
            None => f.write_str("Invalid Date"),
        }
    }
}

impl Serialize for NativeDate {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        match self.0 {
            Some(date) => serializer.serialize_str(&naive::to_iso8601(&date)),
            None => serializer.serialize_none(),
        }
    }
}

impl<'de> Deserialize<'de> for NativeDate {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        let s = Option::<String>::deserialize(deserializer)?;
        match s {
            None => Ok(Self::INVALID),
            Some(s) => naive::parse_iso(&s)
                .map(Self::new)
                .ok_or_else(|| serde::de::Error::custom(DateError::Parse(s))),
        }
    }
}

/// Adapter over `chrono::NaiveDateTime` wall-clock values.
#[derive(Debug, Default)]
pub struct NativeDateAdapter {
    locale: LocaleState,
}

impl NativeDateAdapter {
    pub fn new(locale: &str) -> Self {
        Self {
            locale: LocaleState::new(locale),
        }
    }

    fn map(date: &NativeDate, f: impl FnOnce(&NaiveDateTime) -> Option<NaiveDateTime>) -> NativeDate {
        NativeDate(date.0.as_ref().and_then(f))
    }
}

impl DateTimeAdapter for NativeDateAdapter {
    type Date = NativeDate;

    fn year(&self, date: &NativeDate) -> i32 {
        date.0.map_or(0, |d| d.year())
    }

    fn month(&self, date: &NativeDate) -> u32 {
        date.0.map_or(0, |d| d.month0())
    }

    fn day(&self, date: &NativeDate) -> u32 {
        date.0.map_or(0, |d| d.day())
    }

    fn weekday(&self, date: &NativeDate) -> u32 {
        date.0.map_or(0, |d| naive::weekday(&d))
    }

    fn hour(&self, date: &NativeDate) -> u32 {
        date.0.map_or(0, |d| d.hour())
    }

    fn minute(&self, date: &NativeDate) -> u32 {
        date.0.map_or(0, |d| d.minute())
    }

    fn second(&self, date: &NativeDate) -> u32 {
        date.0.map_or(0, |d| d.second())
    }

    fn timestamp_millis(&self, date: &NativeDate) -> Option<i64> {
        date.0.map(|d| d.and_utc().timestamp_millis())
    }

    fn num_days_in_month(&self, date: &NativeDate) -> u32 {
        date.0.map_or(0, |d| naive::num_days_in_month(&d))
    }

    fn difference_in_calendar_days(&self, a: &NativeDate, b: &NativeDate) -> Option<i64> {
        Some(naive::difference_in_calendar_days(&a.0?, &b.0?))
    }

    fn is_valid(&self, date: &NativeDate) -> bool {
        date.is_valid()
    }

    fn invalid(&self) -> NativeDate {
        NativeDate::INVALID
    }

    fn add_calendar_months(&self, date: &NativeDate, months: i32) -> NativeDate {
        Self::map(date, |d| naive::add_months(d, months))
    }

    fn add_calendar_days(&self, date: &NativeDate, days: i64) -> NativeDate {
        Self::map(date, |d| naive::add_days(d, days))
    }

    fn set_hours(&self, date: &NativeDate, hour: u32) -> NativeDate {
        Self::map(date, |d| naive::set_hours(d, hour))
    }

    fn set_minutes(&self, date: &NativeDate, minute: u32) -> NativeDate {
        Self::map(date, |d| naive::set_minutes(d, minute))
    }

    fn set_seconds(&self, date: &NativeDate, second: u32) -> NativeDate {
        Self::map(date, |d| naive::set_seconds(d, second))
    }

    fn create_date_time(
        &self,
        year: i32,
        month: u32,
        day: u32,
        hour: u32,
        minute: u32,
        second: u32,
    ) -> Result<NativeDate, DateError> {
        naive::create(year, month, day, hour, minute, second).map(NativeDate::new)
    }

    fn now(&self) -> NativeDate {
        NativeDate::new(Local::now().naive_local())
    }

    fn format(&self, date: &NativeDate, options: &FormatOptions) -> Result<String, DateError> {
        let date = date.0.ok_or(DateError::invalid("format"))?;
        Ok(format_naive(&date, options))
    }

    fn to_iso8601(&self, date: &NativeDate) -> Result<String, DateError> {
        let date = date.0.ok_or(DateError::invalid("serialize"))?;
        Ok(naive::to_iso8601(&date))
    }

    fn parse(&self, text: &str) -> Option<NativeDate> {
        if text.trim().is_empty() {
            return None;
        }
        Some(NativeDate(naive::parse_lenient(text)))
    }

    fn deserialize(&self, value: &serde_json::Value) -> Option<NativeDate> {
        match value {
            serde_json::Value::Null => None,
            serde_json::Value::String(s) => Some(NativeDate(naive::parse_iso(s))),
            _ => Some(NativeDate::INVALID),
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

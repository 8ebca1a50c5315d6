use crate::consts::{
    CENTURY_CYCLE, DAYS_IN_MONTH, FEBRUARY, FEBRUARY_DAYS_LEAP, GREGORIAN_CYCLE, HOURS_PER_DAY,
    LEAP_YEAR_CYCLE, MINUTES_PER_HOUR, MONTHS_PER_YEAR, SECONDS_PER_MINUTE,
};
use crate::error::{ConfigError, DateError};
use crate::prelude::*;
use serde::{Deserialize, Serialize};
use std::str::FromStr;

/// How many dates a picker holds and which of them a pick edits.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Display, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum SelectMode {
    /// One date
    #[default]
    #[display(fmt = "single")]
    Single,
    /// A `[from, to]` pair built by successive picks
    #[display(fmt = "range")]
    Range,
    /// A pair where picks only edit `from`
    #[display(fmt = "rangeFrom")]
    RangeFrom,
    /// A pair where picks only edit `to`
    #[display(fmt = "rangeTo")]
    RangeTo,
}

impl SelectMode {
    /// True for every mode that holds a `[from, to]` pair
    pub const fn is_range(self) -> bool {
        !matches!(self, Self::Single)
    }
}

impl FromStr for SelectMode {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim() {
            "single" => Ok(Self::Single),
            "range" => Ok(Self::Range),
            "rangeFrom" => Ok(Self::RangeFrom),
            "rangeTo" => Ok(Self::RangeTo),
            other => Err(ConfigError::InvalidSelectMode(other.to_owned())),
        }
    }
}

/// Which halves of the picker are shown.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Display, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum PickerType {
    #[default]
    #[display(fmt = "both")]
    Both,
    #[display(fmt = "calendar")]
    Calendar,
    #[display(fmt = "timer")]
    Timer,
}

impl PickerType {
    pub const fn shows_calendar(self) -> bool {
        matches!(self, Self::Both | Self::Calendar)
    }

    pub const fn shows_timer(self) -> bool {
        matches!(self, Self::Both | Self::Timer)
    }
}

impl FromStr for PickerType {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim() {
            "both" => Ok(Self::Both),
            "calendar" => Ok(Self::Calendar),
            "timer" => Ok(Self::Timer),
            other => Err(ConfigError::InvalidPickerType(other.to_owned())),
        }
    }
}

/// Granularity of the calendar grid.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Display, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum CalendarView {
    /// Days of one month
    #[default]
    #[display(fmt = "month")]
    Month,
    /// Months of one year
    #[display(fmt = "year")]
    Year,
    /// A window of years
    #[display(fmt = "multiYears")]
    MultiYears,
}

impl FromStr for CalendarView {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim() {
            "month" => Ok(Self::Month),
            "year" => Ok(Self::Year),
            "multiYears" => Ok(Self::MultiYears),
            other => Err(ConfigError::InvalidView(other.to_owned())),
        }
    }
}

/// Length of a month or weekday name.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum NameStyle {
    /// "January", "Sunday"
    #[default]
    Long,
    /// "Jan", "Sun"
    Short,
    /// "J", "S"
    Narrow,
}

/// A validated wall-clock time of day.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default, Display)]
#[display(fmt = "{:02}:{:02}:{:02}", hour, minute, second)]
pub struct TimeOfDay {
    hour:   u32,
    minute: u32,
    second: u32,
}

impl TimeOfDay {
    /// Midnight
    pub const MIDNIGHT: Self = Self {
        hour:   0,
        minute: 0,
        second: 0,
    };

    /// Creates a new time of day
    ///
    /// # Errors
    /// Returns `DateError::InvalidTime` if any component is out of range.
    pub const fn new(hour: u32, minute: u32, second: u32) -> Result<Self, DateError> {
        if hour >= HOURS_PER_DAY || minute >= MINUTES_PER_HOUR || second >= SECONDS_PER_MINUTE {
            return Err(DateError::InvalidTime {
                hour,
                minute,
                second,
            });
        }
        Ok(Self {
            hour,
            minute,
            second,
        })
    }

    #[inline]
    pub const fn hour(self) -> u32 {
        self.hour
    }

    #[inline]
    pub const fn minute(self) -> u32 {
        self.minute
    }

    #[inline]
    pub const fn second(self) -> u32 {
        self.second
    }
}

// Helper functions

pub const fn is_leap_year(year: i32) -> bool {
    (year % LEAP_YEAR_CYCLE == 0 && year % CENTURY_CYCLE != 0) || (year % GREGORIAN_CYCLE == 0)
}

/// Days in a month. `month` is 0-based.
pub const fn days_in_month(year: i32, month: u32) -> u32 {
    debug_assert!(month < MONTHS_PER_YEAR);

    if month == FEBRUARY && is_leap_year(year) {
        FEBRUARY_DAYS_LEAP
    } else {
        DAYS_IN_MONTH[month as usize]
    }
}

/// Checks a (year, 0-based month, day) triple without rolling anything over.
///
/// # Errors
/// Returns `DateError::InvalidMonth` or `DateError::InvalidDay`.
pub const fn validate_ymd(year: i32, month: u32, day: u32) -> Result<(), DateError> {
    if month >= MONTHS_PER_YEAR {
        return Err(DateError::InvalidMonth(month));
    }
    if day == 0 || day > days_in_month(year, month) {
        return Err(DateError::InvalidDay { year, month, day });
    }
    Ok(())
}

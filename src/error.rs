use crate::MONTHS_PER_YEAR;

/// Errors raised by date arithmetic and formatting.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum DateError {
    /// An operation that must not silently accept invalid input received an
    /// invalid date.
    #[error("Cannot {operation} invalid date")]
    InvalidDate { operation: &'static str },

    /// Month index outside `0..MONTHS_PER_YEAR`.
    #[error("Invalid month: {0} (must be 0-{max})", max = MONTHS_PER_YEAR - 1)]
    InvalidMonth(u32),

    /// Day of month outside the month's length.
    #[error("Invalid day {day} for month {year}-{:02}", .month + 1)]
    InvalidDay { year: i32, month: u32, day: u32 },

    /// Time-of-day component out of range.
    #[error("Invalid time {hour:02}:{minute:02}:{second:02}")]
    InvalidTime { hour: u32, minute: u32, second: u32 },

    /// Year outside what the backing representation can hold.
    #[error("Year {0} is out of range")]
    OutOfRange(i32),

    /// Text could not be understood as a date.
    #[error("Cannot parse date: {0}")]
    Parse(String),
}

impl DateError {
    pub(crate) const fn invalid(operation: &'static str) -> Self {
        Self::InvalidDate { operation }
    }
}

/// Errors raised while configuring a picker.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    /// The builder was finished without a date adapter.
    #[error("No date adapter was provided to the picker")]
    MissingAdapter,

    /// The builder was finished without format definitions.
    #[error("No date formats were provided to the picker")]
    MissingFormats,

    /// The builder was finished without an id or an id generator.
    #[error("No id or id generator was provided to the picker")]
    MissingId,

    #[error("Invalid select mode: {0} (expected single, range, rangeFrom or rangeTo)")]
    InvalidSelectMode(String),

    #[error("Invalid picker type: {0} (expected both, calendar or timer)")]
    InvalidPickerType(String),

    #[error("Invalid calendar view: {0} (expected month, year or multiYears)")]
    InvalidView(String),

    /// A numeric option is out of its allowed range.
    #[error("Invalid value for {field}: {reason}")]
    InvalidValue { field: &'static str, reason: String },

    /// The lower bound is after the upper bound.
    #[error("minDateTime is after maxDateTime")]
    InvalidBounds,

    #[error(transparent)]
    Date(#[from] DateError),

    #[error(transparent)]
    Json(#[from] serde_json::Error),
}

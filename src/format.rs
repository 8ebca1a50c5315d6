//! Named format slots and the formatter the adapters share.

use chrono::{Datelike, NaiveDateTime, Timelike};
use serde::{Deserialize, Serialize};

use crate::HOURS_PER_MERIDIAN;

/// Rendering of a numeric component.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Numeric {
    /// No padding: "7"
    #[serde(rename = "numeric")]
    Numeric,
    /// Two digits: "07". Years keep their last two digits.
    #[serde(rename = "2-digit")]
    TwoDigit,
}

/// Rendering of the month component.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum MonthStyle {
    Numeric,
    #[serde(rename = "2-digit")]
    TwoDigit,
    Long,
    Short,
    Narrow,
}

/// Rendering of the weekday component.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum TextStyle {
    Long,
    Short,
    Narrow,
}

/// Which components to print and how, in the spirit of `Intl.DateTimeFormat`
/// options. A `pattern` overrides the components with a chrono strftime
/// pattern.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct FormatOptions {
    pub year:    Option<Numeric>,
    pub month:   Option<MonthStyle>,
    pub day:     Option<Numeric>,
    pub weekday: Option<TextStyle>,
    pub hour:    Option<Numeric>,
    pub minute:  Option<Numeric>,
    pub second:  Option<Numeric>,
    pub hour12:  Option<bool>,
    pub pattern: Option<String>,
}

impl FormatOptions {
    /// Year, numeric month and day: "1/31/2018"
    pub fn numeric_date() -> Self {
        Self {
            year: Some(Numeric::Numeric),
            month: Some(MonthStyle::Numeric),
            day: Some(Numeric::Numeric),
            ..Self::default()
        }
    }

    /// Hour and minute: "10:05 AM"
    pub fn hour_minute() -> Self {
        Self {
            hour: Some(Numeric::Numeric),
            minute: Some(Numeric::TwoDigit),
            ..Self::default()
        }
    }

    /// A chrono strftime pattern
    pub fn pattern(pattern: &str) -> Self {
        Self {
            pattern: Some(pattern.to_owned()),
            ..Self::default()
        }
    }

    fn has_date(&self) -> bool {
        self.year.is_some() || self.month.is_some() || self.day.is_some() || self.weekday.is_some()
    }

    fn has_time(&self) -> bool {
        self.hour.is_some() || self.minute.is_some() || self.second.is_some()
    }
}

/// The named format slots a picker formats its labels and inputs with.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Formats {
    /// Input text when the picker shows calendar and timer
    pub full_picker_input:     FormatOptions,
    /// Input text for a calendar-only picker
    pub date_picker_input:     FormatOptions,
    /// Input text for a timer-only picker
    pub time_picker_input:     FormatOptions,
    /// Period label above a month grid
    pub month_year_label:      FormatOptions,
    /// Accessible label of a day cell
    pub date_a11y_label:       FormatOptions,
    /// Accessible label of a month cell
    pub month_year_a11y_label: FormatOptions,
}

impl Default for Formats {
    fn default() -> Self {
        let full = FormatOptions {
            hour: Some(Numeric::Numeric),
            minute: Some(Numeric::TwoDigit),
            ..FormatOptions::numeric_date()
        };
        Self {
            full_picker_input:     full,
            date_picker_input:     FormatOptions::numeric_date(),
            time_picker_input:     FormatOptions::hour_minute(),
            month_year_label:      FormatOptions {
                year: Some(Numeric::Numeric),
                month: Some(MonthStyle::Short),
                ..FormatOptions::default()
            },
            date_a11y_label:       FormatOptions {
                year: Some(Numeric::Numeric),
                month: Some(MonthStyle::Long),
                day: Some(Numeric::Numeric),
                ..FormatOptions::default()
            },
            month_year_a11y_label: FormatOptions {
                year: Some(Numeric::Numeric),
                month: Some(MonthStyle::Long),
                ..FormatOptions::default()
            },
        }
    }
}

fn numeric(value: i64, style: Numeric) -> String {
    match style {
        Numeric::Numeric => value.to_string(),
        Numeric::TwoDigit => format!("{:02}", value.rem_euclid(100)),
    }
}

/// Formats a valid wall-clock date-time.
///
/// Textual months read "January 31, 2018" and numeric months "1/31/2018";
/// a weekday is prefixed and the time appended after a comma.
pub(crate) fn format_naive(date: &NaiveDateTime, options: &FormatOptions) -> String {
    if let Some(pattern) = options.pattern.as_deref() {
        return date.format(pattern).to_string();
    }

    let mut out = String::new();

    if options.has_date() {
        if let Some(style) = options.weekday {
            let fmt = match style {
                TextStyle::Long => "%A",
                TextStyle::Short | TextStyle::Narrow => "%a",
            };
            let mut name = date.format(fmt).to_string();
            if style == TextStyle::Narrow {
                name.truncate(1);
            }
            out.push_str(&name);
            if options.year.is_some() || options.month.is_some() || options.day.is_some() {
                out.push_str(", ");
            }
        }

        let year = options.year.map(|s| numeric(i64::from(date.year()), s));
        let day = options.day.map(|s| numeric(i64::from(date.day()), s));
        match options.month {
            Some(MonthStyle::Numeric | MonthStyle::TwoDigit) => {
                let style = if options.month == Some(MonthStyle::TwoDigit) {
                    Numeric::TwoDigit
                } else {
                    Numeric::Numeric
                };
                let parts: Vec<String> = [Some(numeric(i64::from(date.month()), style)), day, year]
                    .into_iter()
                    .flatten()
                    .collect();
                out.push_str(&parts.join("/"));
            },
            Some(text) => {
                let mut name = date
                    .format(if text == MonthStyle::Long { "%B" } else { "%b" })
                    .to_string();
                if text == MonthStyle::Narrow {
                    name.truncate(1);
                }
                out.push_str(&name);
                match (day, year) {
                    (Some(day), Some(year)) => out.push_str(&format!(" {day}, {year}")),
                    (Some(day), None) => out.push_str(&format!(" {day}")),
                    (None, Some(year)) => out.push_str(&format!(" {year}")),
                    (None, None) => {},
                }
            },
            None => {
                let parts: Vec<String> = [day, year].into_iter().flatten().collect();
                out.push_str(&parts.join(" "));
            },
        }
    }

    if options.has_time() {
        if options.has_date() {
            out.push_str(", ");
        }
        out.push_str(&format_time(date, options));
    }

    out
}

fn format_time(date: &NaiveDateTime, options: &FormatOptions) -> String {
    let hour12 = options.hour12.unwrap_or(true);
    let mut parts = Vec::with_capacity(3);

    if let Some(style) = options.hour {
        let hour = if hour12 {
            match date.hour() % HOURS_PER_MERIDIAN {
                0 => HOURS_PER_MERIDIAN,
                h => h,
            }
        } else {
            date.hour()
        };
        parts.push(numeric(i64::from(hour), style));
    }
    // Minutes and seconds following another component are always padded.
    if let Some(style) = options.minute {
        let style = if parts.is_empty() { style } else { Numeric::TwoDigit };
        parts.push(numeric(i64::from(date.minute()), style));
    }
    if let Some(style) = options.second {
        let style = if parts.is_empty() { style } else { Numeric::TwoDigit };
        parts.push(numeric(i64::from(date.second()), style));
    }

    let mut out = parts.join(":");
    if hour12 && options.hour.is_some() {
        out.push_str(if date.hour() < HOURS_PER_MERIDIAN {
            " AM"
        } else {
            " PM"
        });
    }
    out
}

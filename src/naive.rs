//! Calendar arithmetic on `chrono::NaiveDateTime`, shared by both adapters.

use chrono::{Datelike, Days, NaiveDate, NaiveDateTime, Timelike};

use crate::error::DateError;
use crate::types::{NameStyle, TimeOfDay, days_in_month, validate_ymd};
use crate::{DAYS_PER_WEEK, MONTHS_PER_YEAR};

/// Input layouts accepted by the lenient parser, most specific first.
const DATE_TIME_LAYOUTS: &[&str] = &[
    "%Y-%m-%dT%H:%M:%S%.f",
    "%Y-%m-%dT%H:%M",
    "%Y-%m-%d %H:%M:%S%.f",
    "%Y-%m-%d %H:%M",
    "%m/%d/%Y, %I:%M %p",
    "%m/%d/%Y, %I:%M:%S %p",
    "%m/%d/%Y %H:%M",
];
const DATE_LAYOUTS: &[&str] = &["%Y-%m-%d", "%m/%d/%Y"];

pub(crate) fn create(
    year: i32,
    month: u32,
    day: u32,
    hour: u32,
    minute: u32,
    second: u32,
) -> Result<NaiveDateTime, DateError> {
    validate_ymd(year, month, day)?;
    let time = TimeOfDay::new(hour, minute, second)?;
    NaiveDate::from_ymd_opt(year, month + 1, day)
        .ok_or(DateError::OutOfRange(year))?
        .and_hms_opt(time.hour(), time.minute(), time.second())
        .ok_or(DateError::InvalidTime {
            hour,
            minute,
            second,
        })
}

pub(crate) fn weekday(date: &NaiveDateTime) -> u32 {
    date.weekday().num_days_from_sunday()
}

pub(crate) fn num_days_in_month(date: &NaiveDateTime) -> u32 {
    days_in_month(date.year(), date.month0())
}

pub(crate) fn add_days(date: &NaiveDateTime, days: i64) -> Option<NaiveDateTime> {
    if days >= 0 {
        date.checked_add_days(Days::new(days.unsigned_abs()))
    } else {
        date.checked_sub_days(Days::new(days.unsigned_abs()))
    }
}

/// Adds months, keeping the time of day and clamping the day of month to the
/// length of the target month.
pub(crate) fn add_months(date: &NaiveDateTime, months: i32) -> Option<NaiveDateTime> {
    let total = i64::from(date.year()) * i64::from(MONTHS_PER_YEAR)
        + i64::from(date.month0())
        + i64::from(months);
    let year = i32::try_from(total.div_euclid(i64::from(MONTHS_PER_YEAR))).ok()?;
    let month = u32::try_from(total.rem_euclid(i64::from(MONTHS_PER_YEAR))).ok()?;
    let day = date.day().min(days_in_month(year, month));
    NaiveDate::from_ymd_opt(year, month + 1, day).map(|d| d.and_time(date.time()))
}

pub(crate) fn difference_in_calendar_days(a: &NaiveDateTime, b: &NaiveDateTime) -> i64 {
    (a.date() - b.date()).num_days()
}

pub(crate) fn set_hours(date: &NaiveDateTime, hour: u32) -> Option<NaiveDateTime> {
    date.with_hour(hour)
}

pub(crate) fn set_minutes(date: &NaiveDateTime, minute: u32) -> Option<NaiveDateTime> {
    date.with_minute(minute)
}

pub(crate) fn set_seconds(date: &NaiveDateTime, second: u32) -> Option<NaiveDateTime> {
    date.with_second(second)
}

pub(crate) fn to_iso8601(date: &NaiveDateTime) -> String {
    date.format("%Y-%m-%dT%H:%M:%S%.3f").to_string()
}

/// Strict ISO-8601 date or date-time without offset.
pub(crate) fn parse_iso(text: &str) -> Option<NaiveDateTime> {
    let text = text.trim();
    DATE_TIME_LAYOUTS[..4]
        .iter()
        .find_map(|layout| NaiveDateTime::parse_from_str(text, layout).ok())
        .or_else(|| {
            NaiveDate::parse_from_str(text, DATE_LAYOUTS[0])
                .ok()
                .and_then(|d| d.and_hms_opt(0, 0, 0))
        })
}

/// ISO-8601 plus the layouts the default formats produce.
pub(crate) fn parse_lenient(text: &str) -> Option<NaiveDateTime> {
    let text = text.trim();
    DATE_TIME_LAYOUTS
        .iter()
        .find_map(|layout| NaiveDateTime::parse_from_str(text, layout).ok())
        .or_else(|| {
            DATE_LAYOUTS
                .iter()
                .find_map(|layout| NaiveDate::parse_from_str(text, layout).ok())
                .and_then(|d| d.and_hms_opt(0, 0, 0))
        })
}

fn shorten(name: String, style: NameStyle) -> String {
    match style {
        NameStyle::Long => name,
        NameStyle::Short => name.chars().take(3).collect(),
        NameStyle::Narrow => name.chars().take(1).collect(),
    }
}

pub(crate) fn month_names(style: NameStyle) -> Vec<String> {
    (1..=MONTHS_PER_YEAR)
        .filter_map(|m| NaiveDate::from_ymd_opt(2017, m, 1))
        .map(|d| shorten(d.format("%B").to_string(), style))
        .collect()
}

pub(crate) fn weekday_names(style: NameStyle) -> Vec<String> {
    // 2017-01-01 was a Sunday
    (1..=DAYS_PER_WEEK)
        .filter_map(|d| NaiveDate::from_ymd_opt(2017, 1, d))
        .map(|d| shorten(d.format("%A").to_string(), style))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_utils::naive;

    #[test]
    fn test_add_months_clamps_day() {
        struct TestCase {
            from:        NaiveDateTime,
            months:      i32,
            expected:    NaiveDateTime,
            description: &'static str,
        }

        let cases = [
            TestCase {
                from:        naive(2018, 0, 31, 0, 0, 0),
                months:      1,
                expected:    naive(2018, 1, 28, 0, 0, 0),
                description: "non-leap february",
            },
            TestCase {
                from:        naive(2020, 0, 31, 9, 30, 0),
                months:      1,
                expected:    naive(2020, 1, 29, 9, 30, 0),
                description: "leap february keeps time",
            },
            TestCase {
                from:        naive(2018, 0, 15, 0, 0, 0),
                months:      -1,
                expected:    naive(2017, 11, 15, 0, 0, 0),
                description: "backwards across a year",
            },
            TestCase {
                from:        naive(2018, 2, 31, 0, 0, 0),
                months:      -13,
                expected:    naive(2017, 1, 28, 0, 0, 0),
                description: "more than a year back",
            },
            TestCase {
                from:        naive(2020, 1, 29, 0, 0, 0),
                months:      12,
                expected:    naive(2021, 1, 28, 0, 0, 0),
                description: "leap day plus a year",
            },
        ];

        for case in &cases {
            assert_eq!(
                add_months(&case.from, case.months),
                Some(case.expected),
                "{}",
                case.description
            );
        }
    }

    #[test]
    fn test_add_months_round_trip() {
        for day in 1..=28 {
            let d = naive(2018, 4, day, 0, 0, 0);
            for n in [-25, -1, 1, 7, 30] {
                let there = add_months(&d, n).unwrap();
                assert_eq!(add_months(&there, -n), Some(d));
            }
        }
        let d = naive(2018, 4, 31, 0, 0, 0);
        let back = add_months(&add_months(&d, 1).unwrap(), -1).unwrap();
        assert_eq!(back.month0(), 4);
        assert!(back.day() <= 31);
    }

    #[test]
    fn test_difference_ignores_time() {
        let a = naive(2018, 0, 31, 23, 59, 0);
        let b = naive(2018, 0, 30, 0, 1, 0);
        assert_eq!(difference_in_calendar_days(&a, &b), 1);
        assert_eq!(difference_in_calendar_days(&b, &a), -1);
        assert_eq!(difference_in_calendar_days(&a, &naive(2018, 0, 31, 0, 0, 0)), 0);
    }

    #[test]
    fn test_create_rejects_overflow() {
        assert!(matches!(create(2018, 1, 30, 0, 0, 0), Err(DateError::InvalidDay { .. })));
        assert!(matches!(create(2018, 12, 1, 0, 0, 0), Err(DateError::InvalidMonth(12))));
        assert!(matches!(create(2018, 0, 1, 24, 0, 0), Err(DateError::InvalidTime { .. })));
        assert!(matches!(create(300_000, 0, 1, 0, 0, 0), Err(DateError::OutOfRange(300_000))));
        assert_eq!(create(2018, 0, 31, 1, 2, 3).unwrap(), naive(2018, 0, 31, 1, 2, 3));
    }

    #[test]
    fn test_parse() {
        assert_eq!(parse_iso("2018-01-31T10:15:00"), Some(naive(2018, 0, 31, 10, 15, 0)));
        assert_eq!(parse_iso("2018-01-31"), Some(naive(2018, 0, 31, 0, 0, 0)));
        assert_eq!(parse_iso("1/31/2018"), None);
        assert_eq!(parse_lenient("1/31/2018"), Some(naive(2018, 0, 31, 0, 0, 0)));
        assert_eq!(
            parse_lenient("1/31/2018, 2:05 PM"),
            Some(naive(2018, 0, 31, 14, 5, 0))
        );
        assert_eq!(parse_lenient("yesterday"), None);
    }

    #[test]
    fn test_names() {
        let months = month_names(NameStyle::Long);
        assert_eq!(months.len(), 12);
        assert_eq!(months[0], "January");
        assert_eq!(month_names(NameStyle::Short)[8], "Sep");
        let days = weekday_names(NameStyle::Narrow);
        assert_eq!(days, ["S", "M", "T", "W", "T", "F", "S"]);
        assert_eq!(weekday_names(NameStyle::Long)[0], "Sunday");
    }
}

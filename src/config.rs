//! Plain picker options, loadable from JSON.

use std::time::Duration;

use log::warn;
use serde::{Deserialize, Serialize};

use crate::consts::{
    DAYS_PER_WEEK, HOURS_PER_DAY, INPUT_DEBOUNCE_MS, MINUTES_PER_HOUR, SECONDS_PER_MINUTE, YEAR_ROWS,
    YEARS_PER_ROW,
};
use crate::error::ConfigError;
use crate::timer::TimerOptions;
use crate::types::{CalendarView, PickerType, SelectMode};

/// Options that do not carry dates. Bounds, the filter and the initial
/// moments go through [`PickerBuilder`](crate::PickerBuilder).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct PickerConfig {
    pub select_mode:        SelectMode,
    pub picker_type:        PickerType,
    pub start_view:         CalendarView,
    /// 0 = Sunday; the locale decides when unset
    pub first_day_of_week:  Option<u32>,
    pub hide_other_months:  bool,
    pub step_hour:          u32,
    pub step_minute:        u32,
    pub step_second:        u32,
    pub hour12_timer:       bool,
    pub show_seconds_timer: bool,
    /// Longest span in days between `from` and `to`
    pub range_limit:        Option<u32>,
    pub years_per_row:      u32,
    pub year_rows:          u32,
    pub input_debounce_ms:  u64,
}

impl Default for PickerConfig {
    fn default() -> Self {
        Self {
            select_mode:        SelectMode::default(),
            picker_type:        PickerType::default(),
            start_view:         CalendarView::default(),
            first_day_of_week:  None,
            hide_other_months:  false,
            step_hour:          1,
            step_minute:        1,
            step_second:        1,
            hour12_timer:       false,
            show_seconds_timer: false,
            range_limit:        None,
            years_per_row:      YEARS_PER_ROW,
            year_rows:          YEAR_ROWS,
            input_debounce_ms:  INPUT_DEBOUNCE_MS,
        }
    }
}

fn invalid(field: &'static str, reason: impl Into<String>) -> ConfigError {
    let reason = reason.into();
    warn!("rejected {field}: {reason}");
    ConfigError::InvalidValue { field, reason }
}

impl PickerConfig {
    /// Parses and validates a JSON document. Missing keys take defaults.
    ///
    /// # Errors
    /// `Json` for malformed input or unknown enum strings, `InvalidValue`
    /// from [`validate`](Self::validate).
    pub fn from_json(json: &str) -> Result<Self, ConfigError> {
        let config: Self = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    /// # Errors
    /// `InvalidValue` naming the first offending field.
    pub fn validate(&self) -> Result<(), ConfigError> {
        let steps = [
            ("stepHour", self.step_hour, HOURS_PER_DAY),
            ("stepMinute", self.step_minute, MINUTES_PER_HOUR),
            ("stepSecond", self.step_second, SECONDS_PER_MINUTE),
        ];
        for (field, step, modulus) in steps {
            if step == 0 || step >= modulus {
                return Err(invalid(field, format!("{step} is not in 1..{modulus}")));
            }
        }
        if self.years_per_row == 0 {
            return Err(invalid("yearsPerRow", "must be positive"));
        }
        if self.year_rows == 0 {
            return Err(invalid("yearRows", "must be positive"));
        }
        if let Some(day) = self.first_day_of_week.filter(|d| *d >= DAYS_PER_WEEK) {
            return Err(invalid("firstDayOfWeek", format!("{day} is not in 0..{DAYS_PER_WEEK}")));
        }
        if self.range_limit == Some(0) {
            return Err(invalid("rangeLimit", "must be positive"));
        }
        if self.range_limit.is_some() && !self.select_mode.is_range() {
            warn!("rangeLimit has no effect in {} mode", self.select_mode);
        }
        Ok(())
    }

    pub const fn timer_options(&self) -> TimerOptions {
        TimerOptions {
            step_hour:    self.step_hour,
            step_minute:  self.step_minute,
            step_second:  self.step_second,
            hour12:       self.hour12_timer,
            show_seconds: self.show_seconds_timer,
        }
    }

    pub const fn debounce_window(&self) -> Duration {
        Duration::from_millis(self.input_debounce_ms)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_json() {
        let json = r#"{
            "selectMode": "rangeFrom",
            "pickerType": "calendar",
            "startView": "multiYears",
            "firstDayOfWeek": 1,
            "stepMinute": 15,
            "rangeLimit": 7
        }"#;
        let config = PickerConfig::from_json(json).unwrap();
        assert_eq!(config.select_mode, SelectMode::RangeFrom);
        assert_eq!(config.picker_type, PickerType::Calendar);
        assert_eq!(config.start_view, CalendarView::MultiYears);
        assert_eq!(config.first_day_of_week, Some(1));
        assert_eq!(config.step_minute, 15);
        assert_eq!(config.range_limit, Some(7));
        assert_eq!(config.years_per_row, 3);
        assert_eq!(config.debounce_window(), Duration::from_millis(750));
    }

    #[test]
    fn test_unknown_select_mode_is_rejected() {
        let err = PickerConfig::from_json(r#"{"selectMode": "multiple"}"#).unwrap_err();
        assert!(matches!(err, ConfigError::Json(_)));
    }

    #[test]
    fn test_validate() {
        struct TestCase {
            config: PickerConfig,
            field:  &'static str,
        }

        let cases = [
            TestCase {
                config: PickerConfig {
                    step_hour: 0,
                    ..PickerConfig::default()
                },
                field:  "stepHour",
            },
            TestCase {
                config: PickerConfig {
                    step_second: 60,
                    ..PickerConfig::default()
                },
                field:  "stepSecond",
            },
            TestCase {
                config: PickerConfig {
                    year_rows: 0,
                    ..PickerConfig::default()
                },
                field:  "yearRows",
            },
            TestCase {
                config: PickerConfig {
                    first_day_of_week: Some(7),
                    ..PickerConfig::default()
                },
                field:  "firstDayOfWeek",
            },
            TestCase {
                config: PickerConfig {
                    range_limit: Some(0),
                    ..PickerConfig::default()
                },
                field:  "rangeLimit",
            },
        ];

        for case in &cases {
            match case.config.validate() {
                Err(ConfigError::InvalidValue { field, .. }) => assert_eq!(field, case.field),
                other => panic!("expected {} to be rejected, got {other:?}", case.field),
            }
        }
        assert!(PickerConfig::default().validate().is_ok());
    }

    #[test]
    fn test_round_trip_uses_camel_case() {
        let json = serde_json::to_value(PickerConfig::default()).unwrap();
        assert_eq!(json["selectMode"], "single");
        assert_eq!(json["hour12Timer"], false);
        assert_eq!(json["inputDebounceMs"], 750);
    }

    #[test]
    fn test_timer_options() {
        let config = PickerConfig {
            hour12_timer: true,
            step_minute: 5,
            ..PickerConfig::default()
        };
        let options = config.timer_options();
        assert!(options.hour12);
        assert_eq!(options.step_minute, 5);
    }
}

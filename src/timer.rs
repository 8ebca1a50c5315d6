//! Hour, minute and second spinners.

use std::cmp::Ordering;
use std::ops::RangeInclusive;

use log::trace;
use serde::{Deserialize, Serialize};

use crate::adapter::DateTimeAdapter;
use crate::consts::{HOURS_PER_DAY, HOURS_PER_MERIDIAN, MINUTES_PER_HOUR, SECONDS_PER_MINUTE};
use crate::prelude::*;

/// A spinner box.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Display, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum TimeUnit {
    #[display(fmt = "hour")]
    Hour,
    #[display(fmt = "minute")]
    Minute,
    #[display(fmt = "second")]
    Second,
}

impl TimeUnit {
    /// Values before the unit wraps
    const fn modulus(self) -> u32 {
        match self {
            Self::Hour => HOURS_PER_DAY,
            Self::Minute => MINUTES_PER_HOUR,
            Self::Second => SECONDS_PER_MINUTE,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TimerOptions {
    pub step_hour:    u32,
    pub step_minute:  u32,
    pub step_second:  u32,
    pub hour12:       bool,
    pub show_seconds: bool,
}

impl Default for TimerOptions {
    fn default() -> Self {
        Self {
            step_hour:    1,
            step_minute:  1,
            step_second:  1,
            hour12:       false,
            show_seconds: false,
        }
    }
}

/// Spinner logic over the pivot moment.
///
/// Steps wrap inside their unit (23:00 + 1h is 00:00 the same day) and are
/// only enabled when the result stays within `[min, max]`.
pub struct Timer<'a, A: DateTimeAdapter> {
    adapter: &'a A,
    options: TimerOptions,
    min:     Option<A::Date>,
    max:     Option<A::Date>,
}

impl<'a, A: DateTimeAdapter> Timer<'a, A> {
    pub const fn new(adapter: &'a A, options: TimerOptions) -> Self {
        Self {
            adapter,
            options,
            min: None,
            max: None,
        }
    }

    #[must_use]
    pub fn with_bounds(mut self, min: Option<A::Date>, max: Option<A::Date>) -> Self {
        self.min = min;
        self.max = max;
        self
    }

    pub const fn options(&self) -> &TimerOptions {
        &self.options
    }

    /// Units shown, seconds only when enabled
    pub fn units(&self) -> Vec<TimeUnit> {
        let mut units = vec![TimeUnit::Hour, TimeUnit::Minute];
        if self.options.show_seconds {
            units.push(TimeUnit::Second);
        }
        units
    }

    pub const fn step(&self, unit: TimeUnit) -> u32 {
        let step = match unit {
            TimeUnit::Hour => self.options.step_hour,
            TimeUnit::Minute => self.options.step_minute,
            TimeUnit::Second => self.options.step_second,
        };
        if step == 0 { 1 } else { step }
    }

    /// Values a typed entry may take
    pub const fn input_range(&self, unit: TimeUnit) -> RangeInclusive<u32> {
        match unit {
            TimeUnit::Hour if self.options.hour12 => 1..=HOURS_PER_MERIDIAN,
            unit => 0..=unit.modulus() - 1,
        }
    }

    pub fn is_pm(&self, moment: &A::Date) -> bool {
        self.adapter.hour(moment) >= HOURS_PER_MERIDIAN
    }

    /// The number shown in a box; midnight and noon read 12 on a 12-hour
    /// clock.
    pub fn display_value(&self, moment: &A::Date, unit: TimeUnit) -> u32 {
        match unit {
            TimeUnit::Hour => {
                let hour = self.adapter.hour(moment);
                if self.options.hour12 {
                    match hour % HOURS_PER_MERIDIAN {
                        0 => HOURS_PER_MERIDIAN,
                        h => h,
                    }
                } else {
                    hour
                }
            },
            TimeUnit::Minute => self.adapter.minute(moment),
            TimeUnit::Second => self.adapter.second(moment),
        }
    }

    fn set(&self, moment: &A::Date, unit: TimeUnit, value: u32) -> A::Date {
        match unit {
            TimeUnit::Hour => self.adapter.set_hours(moment, value),
            TimeUnit::Minute => self.adapter.set_minutes(moment, value),
            TimeUnit::Second => self.adapter.set_seconds(moment, value),
        }
    }

    fn current(&self, moment: &A::Date, unit: TimeUnit) -> u32 {
        match unit {
            TimeUnit::Hour => self.adapter.hour(moment),
            TimeUnit::Minute => self.adapter.minute(moment),
            TimeUnit::Second => self.adapter.second(moment),
        }
    }

    /// The moment one step up or down, wrapped inside the unit.
    pub fn stepped(&self, moment: &A::Date, unit: TimeUnit, up: bool) -> A::Date {
        let modulus = unit.modulus();
        let step = self.step(unit) % modulus;
        let current = self.current(moment, unit);
        let value = if up {
            (current + step) % modulus
        } else {
            (current + modulus - step) % modulus
        };
        self.set(moment, unit, value)
    }

    fn within_bounds(&self, moment: &A::Date) -> bool {
        self.adapter.is_valid(moment)
            && self
                .min
                .as_ref()
                .is_none_or(|min| self.adapter.compare(moment, min).is_ok_and(Ordering::is_ge))
            && self
                .max
                .as_ref()
                .is_none_or(|max| self.adapter.compare(moment, max).is_ok_and(Ordering::is_le))
    }

    pub fn can_step(&self, moment: &A::Date, unit: TimeUnit, up: bool) -> bool {
        self.within_bounds(&self.stepped(moment, unit, up))
    }

    /// `None` when the step would leave the bounds.
    pub fn step_up(&self, moment: &A::Date, unit: TimeUnit) -> Option<A::Date> {
        let next = self.stepped(moment, unit, true);
        self.within_bounds(&next).then_some(next)
    }

    /// `None` when the step would leave the bounds.
    pub fn step_down(&self, moment: &A::Date, unit: TimeUnit) -> Option<A::Date> {
        let next = self.stepped(moment, unit, false);
        self.within_bounds(&next).then_some(next)
    }

    /// Applies a typed box value. Values outside the box's range are
    /// dropped; a 12-hour entry keeps the current meridian.
    pub fn commit_value(&self, moment: &A::Date, unit: TimeUnit, value: u32) -> Option<A::Date> {
        if !self.input_range(unit).contains(&value) || !self.adapter.is_valid(moment) {
            trace!("dropped {unit} input {value}");
            return None;
        }
        let value = match unit {
            TimeUnit::Hour if self.options.hour12 => {
                let hour = value % HOURS_PER_MERIDIAN;
                if self.is_pm(moment) { hour + HOURS_PER_MERIDIAN } else { hour }
            },
            _ => value,
        };
        Some(self.set(moment, unit, value))
    }

    /// [`commit_value`](Self::commit_value) for raw box text.
    pub fn commit_text(&self, moment: &A::Date, unit: TimeUnit, text: &str) -> Option<A::Date> {
        let value = text.trim().parse::<u32>().ok()?;
        self.commit_value(moment, unit, value)
    }

    /// Flips AM and PM, keeping the 12-hour reading.
    pub fn toggle_meridian(&self, moment: &A::Date) -> A::Date {
        let hour = self.adapter.hour(moment);
        let flipped = (hour + HOURS_PER_MERIDIAN) % HOURS_PER_DAY;
        self.adapter.set_hours(moment, flipped)
    }
}

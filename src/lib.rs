mod adapter;
mod calendar;
mod config;
mod consts;
mod debounce;
mod error;
mod format;
mod id;
mod locale;
mod naive;
mod native;
mod navigation;
mod picker;
mod prelude;
mod selection;
#[cfg(test)]
mod test_utils;
mod timer;
mod timestamp;
mod types;

pub use adapter::DateTimeAdapter;
pub use calendar::{CalendarCell, CalendarGrid, Constraints, DateFilter, GridContext, value_in_range};
pub use config::PickerConfig;
pub use consts::*;
pub use debounce::Debouncer;
pub use error::{ConfigError, DateError};
pub use format::{FormatOptions, Formats, MonthStyle, Numeric, TextStyle};
pub use id::{IdGenerator, SequentialIds};
pub use locale::{LocaleState, first_day_of_week};
pub use native::{NativeDate, NativeDateAdapter};
pub use navigation::{KeyPress, NavKey, Navigation};
pub use picker::{Picker, PickerBuilder, PickerEvent, RANGE_SEPARATOR};
pub use selection::{ActiveSide, RetainedTimes, Selection, SelectionState, compose_with_time};
pub use timer::{TimeUnit, Timer, TimerOptions};
pub use timestamp::{Timestamp, TimestampAdapter};
pub use types::{
    CalendarView, NameStyle, PickerType, SelectMode, TimeOfDay, days_in_month, is_leap_year, validate_ymd,
};

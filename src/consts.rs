/// Months per year
pub const MONTHS_PER_YEAR: u32 = 12;

/// Days per week
pub const DAYS_PER_WEEK: u32 = 7;

/// Rows in a month grid. Always six so every month renders the same shape.
pub const WEEKS_PER_VIEW: u32 = 6;

/// Cells in a month grid
pub const DAYS_PER_VIEW: u32 = WEEKS_PER_VIEW * DAYS_PER_WEEK;

/// Month cells per row in a year grid
pub const MONTHS_PER_ROW: u32 = 3;

/// Rows in a year grid
pub const MONTH_ROWS: u32 = 4;

/// Default years per row in a multi-year grid
pub const YEARS_PER_ROW: u32 = 3;

/// Default rows in a multi-year grid
pub const YEAR_ROWS: u32 = 7;

/// Years jumped by Alt+PageUp/PageDown in the year grid, and windows jumped in
/// the multi-year grid
pub const LONG_JUMP: i32 = 10;

/// Index of January (months are 0-based)
pub const JANUARY: u32 = 0;
/// Index of February (months are 0-based)
pub const FEBRUARY: u32 = 1;
/// Index of December (months are 0-based)
pub const DECEMBER: u32 = 11;

/// Days in February for leap years
pub const FEBRUARY_DAYS_LEAP: u32 = 29;

/// Days in each month of a non-leap year, indexed by 0-based month
pub const DAYS_IN_MONTH: [u32; 12] = [
    31, // January
    28, // February (non-leap, adjusted by is_leap_year check)
    31, // March
    30, // April
    31, // May
    30, // June
    31, // July
    31, // August
    30, // September
    31, // October
    30, // November
    31, // December
];

/// Leap year occurs every 4 years
pub(crate) const LEAP_YEAR_CYCLE: i32 = 4;
/// Century years are not leap years unless...
pub(crate) const CENTURY_CYCLE: i32 = 100;
/// ...they are divisible by 400 (Gregorian calendar correction)
pub(crate) const GREGORIAN_CYCLE: i32 = 400;

/// Hours in a day
pub const HOURS_PER_DAY: u32 = 24;
/// Hours on a 12 hour clock face
pub const HOURS_PER_MERIDIAN: u32 = 12;
/// Minutes in an hour
pub const MINUTES_PER_HOUR: u32 = 60;
/// Seconds in a minute
pub const SECONDS_PER_MINUTE: u32 = 60;

/// Quiescence window before buffered spinner input is committed
pub const INPUT_DEBOUNCE_MS: u64 = 750;

/// Locale used until the caller sets one
pub const DEFAULT_LOCALE: &str = "en-US";

/// Separator between the first and last year of a multi-year window label
pub const YEAR_RANGE_SEPARATOR: &str = " - ";

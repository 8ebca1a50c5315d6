//! Month, year and multi-year grids.
//!
//! Grids are plain data regenerated from the pivot on every render; nothing
//! here keeps state between calls.

use std::cmp::Ordering;
use std::fmt;

use log::trace;
use serde::Serialize;

use crate::adapter::DateTimeAdapter;
use crate::consts::{
    DAYS_PER_VIEW, DAYS_PER_WEEK, MONTH_ROWS, MONTHS_PER_ROW, MONTHS_PER_YEAR, YEAR_RANGE_SEPARATOR,
    YEAR_ROWS, YEARS_PER_ROW,
};
use crate::error::DateError;
use crate::format::Formats;
use crate::types::{CalendarView, NameStyle};

/// Predicate deciding whether a date may be picked
pub type DateFilter<D> = dyn Fn(&D) -> bool;

/// Bounds and filter a date must satisfy to be enabled.
pub struct Constraints<'a, D> {
    pub min:    Option<D>,
    pub max:    Option<D>,
    pub filter: Option<&'a DateFilter<D>>,
}

impl<D> Constraints<'_, D> {
    /// No bounds, no filter
    pub const fn none() -> Self {
        Self {
            min:    None,
            max:    None,
            filter: None,
        }
    }

    /// A date is enabled when it is valid, passes the filter, and lies
    /// within the bounds inclusively.
    pub fn is_enabled<A>(&self, adapter: &A, date: &D) -> bool
    where
        A: DateTimeAdapter<Date = D>,
    {
        adapter.is_valid(date)
            && self.filter.is_none_or(|f| f(date))
            && self
                .min
                .as_ref()
                .is_none_or(|min| adapter.compare(date, min).is_ok_and(Ordering::is_ge))
            && self
                .max
                .as_ref()
                .is_none_or(|max| adapter.compare(date, max).is_ok_and(Ordering::is_le))
    }

    /// Day-level variant of [`is_enabled`](Self::is_enabled): the bounds are
    /// compared by calendar day, so the days holding `min` and `max` stay
    /// enabled whatever their time of day.
    pub fn is_day_enabled<A>(&self, adapter: &A, date: &D) -> bool
    where
        A: DateTimeAdapter<Date = D>,
    {
        adapter.is_valid(date)
            && self.filter.is_none_or(|f| f(date))
            && self.min.as_ref().is_none_or(|min| {
                adapter
                    .difference_in_calendar_days(date, min)
                    .is_some_and(|days| days >= 0)
            })
            && self.max.as_ref().is_none_or(|max| {
                adapter
                    .difference_in_calendar_days(date, max)
                    .is_some_and(|days| days <= 0)
            })
    }

    /// Clamps a date into the bounds.
    pub fn clamp<A>(&self, adapter: &A, date: &D) -> D
    where
        A: DateTimeAdapter<Date = D>,
    {
        adapter.clamp_date(date, self.min.as_ref(), self.max.as_ref())
    }
}

impl<D: Clone> Clone for Constraints<'_, D> {
    fn clone(&self) -> Self {
        Self {
            min:    self.min.clone(),
            max:    self.max.clone(),
            filter: self.filter,
        }
    }
}

impl<D: fmt::Debug> fmt::Debug for Constraints<'_, D> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Constraints")
            .field("min", &self.min)
            .field("max", &self.max)
            .field("filter", &self.filter.map(|_| "<fn>"))
            .finish()
    }
}

/// One selectable cell of a grid.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CalendarCell {
    /// Running day index (1 = first of the month), month index, or year
    pub value:         i32,
    pub display_value: String,
    pub aria_label:    String,
    pub enabled:       bool,
    /// The cell belongs to an adjacent month
    pub out:           bool,
    pub cell_class:    String,
}

/// A rectangular grid of cells for one view.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CalendarGrid {
    pub view:         CalendarView,
    pub rows:         Vec<Vec<CalendarCell>>,
    /// Index of the pivot's cell in row-major order
    pub active_index: usize,
    /// Value of today's cell when today lies in the period
    pub today_value:  Option<i32>,
    /// Period label: "Jan 2018", "2018", "2016 - 2036"
    pub label:        String,
    /// Column headers of a month grid, starting at the first day of week
    pub weekdays:     Vec<String>,
}

impl CalendarGrid {
    pub fn cells(&self) -> impl Iterator<Item = &CalendarCell> {
        self.rows.iter().flatten()
    }

    pub fn cell_count(&self) -> usize {
        self.rows.iter().map(Vec::len).sum()
    }

    pub fn active_cell(&self) -> Option<&CalendarCell> {
        self.cells().nth(self.active_index)
    }

    /// The cell holding `value`
    pub fn cell(&self, value: i32) -> Option<&CalendarCell> {
        self.cells().find(|c| c.value == value)
    }
}

/// Everything a grid needs besides the pivot.
pub struct GridContext<'a, A: DateTimeAdapter> {
    pub adapter:           &'a A,
    pub formats:           &'a Formats,
    pub constraints:       Constraints<'a, A::Date>,
    /// Overrides the adapter's locale default when set
    pub first_day_of_week: Option<u32>,
    pub hide_other_months: bool,
    pub years_per_row:     u32,
    pub year_rows:         u32,
    pub today:             Option<A::Date>,
}

impl<'a, A: DateTimeAdapter> GridContext<'a, A> {
    pub fn new(adapter: &'a A, formats: &'a Formats) -> Self {
        Self {
            adapter,
            formats,
            constraints: Constraints::none(),
            first_day_of_week: None,
            hide_other_months: false,
            years_per_row: YEARS_PER_ROW,
            year_rows: YEAR_ROWS,
            today: None,
        }
    }

    pub fn first_day_of_week(&self) -> u32 {
        self.first_day_of_week
            .unwrap_or_else(|| self.adapter.first_day_of_week())
            % DAYS_PER_WEEK
    }

    /// Years in one multi-year window
    pub const fn years_per_window(&self) -> u32 {
        self.years_per_row * self.year_rows
    }

    /// The grid for `view` around `pivot`.
    ///
    /// # Errors
    /// `InvalidDate` when the pivot is invalid.
    pub fn grid(&self, view: CalendarView, pivot: &A::Date) -> Result<CalendarGrid, DateError> {
        match view {
            CalendarView::Month => self.month_grid(pivot),
            CalendarView::Year => self.year_grid(pivot),
            CalendarView::MultiYears => self.multi_year_grid(pivot),
        }
    }

    fn first_of_month(&self, pivot: &A::Date) -> Result<A::Date, DateError> {
        if !self.adapter.is_valid(pivot) {
            return Err(DateError::invalid("render"));
        }
        self.adapter
            .create_date(self.adapter.year(pivot), self.adapter.month(pivot), 1)
    }

    /// Cells between the first grid cell and the first of the month.
    fn leading_days(&self, first_of_month: &A::Date) -> u32 {
        (DAYS_PER_WEEK + self.adapter.weekday(first_of_month) - self.first_day_of_week())
            % DAYS_PER_WEEK
    }

    /// Six weeks around the pivot's month.
    ///
    /// # Errors
    /// `InvalidDate` when the pivot is invalid.
    pub fn month_grid(&self, pivot: &A::Date) -> Result<CalendarGrid, DateError> {
        let adapter = self.adapter;
        let first = self.first_of_month(pivot)?;
        let month = adapter.month(&first);
        let leading = self.leading_days(&first);
        let start = adapter.add_calendar_days(&first, -i64::from(leading));

        trace!(
            "month grid for {}-{:02}, {leading} leading days",
            adapter.year(&first),
            month + 1
        );

        let mut cells = Vec::with_capacity(DAYS_PER_VIEW as usize);
        for i in 0..DAYS_PER_VIEW {
            let date = adapter.add_calendar_days(&start, i64::from(i));
            let out = adapter.month(&date) != month;
            let hidden = out && self.hide_other_months;
            cells.push(CalendarCell {
                value:         i as i32 - leading as i32 + 1,
                display_value: if hidden {
                    String::new()
                } else {
                    adapter.day(&date).to_string()
                },
                aria_label:    adapter.format(&date, &self.formats.date_a11y_label)?,
                enabled:       !hidden && self.constraints.is_day_enabled(adapter, &date),
                out,
                cell_class:    format!("day-{}", adapter.weekday(&date)),
            });
        }

        let today_value = self
            .today
            .as_ref()
            .filter(|t| {
                adapter.year(t) == adapter.year(&first) && adapter.month(t) == month
            })
            .map(|t| adapter.day(t) as i32);

        let mut weekdays = adapter.weekday_names(NameStyle::Short);
        let shift = (self.first_day_of_week() as usize).min(weekdays.len());
        weekdays.rotate_left(shift);

        Ok(CalendarGrid {
            view: CalendarView::Month,
            rows: into_rows(cells, DAYS_PER_WEEK),
            active_index: (leading + adapter.day(pivot) - 1) as usize,
            today_value,
            label: adapter.format(pivot, &self.formats.month_year_label)?,
            weekdays,
        })
    }

    /// True if any day of the month passes the constraints.
    pub fn is_month_enabled(&self, year: i32, month: u32) -> bool {
        let Ok(first) = self.adapter.create_date(year, month, 1) else {
            return false;
        };
        (0..self.adapter.num_days_in_month(&first)).any(|offset| {
            let date = self.adapter.add_calendar_days(&first, i64::from(offset));
            self.constraints.is_day_enabled(self.adapter, &date)
        })
    }

    /// The twelve months of the pivot's year.
    ///
    /// # Errors
    /// `InvalidDate` when the pivot is invalid.
    pub fn year_grid(&self, pivot: &A::Date) -> Result<CalendarGrid, DateError> {
        let adapter = self.adapter;
        if !adapter.is_valid(pivot) {
            return Err(DateError::invalid("render"));
        }
        let year = adapter.year(pivot);
        let names = adapter.month_names(NameStyle::Short);
        trace!("year grid for {year}");

        let mut cells = Vec::with_capacity(MONTHS_PER_YEAR as usize);
        for month in 0..MONTHS_PER_YEAR {
            let date = adapter.create_date(year, month, 1)?;
            cells.push(CalendarCell {
                value:         month as i32,
                display_value: names.get(month as usize).cloned().unwrap_or_default(),
                aria_label:    adapter.format(&date, &self.formats.month_year_a11y_label)?,
                enabled:       self.is_month_enabled(year, month),
                out:           false,
                cell_class:    format!("month-{month}"),
            });
        }

        let today_value = self
            .today
            .as_ref()
            .filter(|t| adapter.year(t) == year)
            .map(|t| adapter.month(t) as i32);

        debug_assert_eq!(cells.len(), (MONTH_ROWS * MONTHS_PER_ROW) as usize);
        Ok(CalendarGrid {
            view: CalendarView::Year,
            rows: into_rows(cells, MONTHS_PER_ROW),
            active_index: adapter.month(pivot) as usize,
            today_value,
            label: adapter.year_name(pivot),
            weekdays: Vec::new(),
        })
    }

    /// Offset of `year` inside its multi-year window
    pub fn window_offset(&self, year: i32) -> u32 {
        let window = self.years_per_window().max(1) as i32;
        year.rem_euclid(window) as u32
    }

    /// True if any day of the year passes the constraints.
    pub fn is_year_enabled(&self, year: i32) -> bool {
        let adapter = self.adapter;
        let c = &self.constraints;
        if c.min.as_ref().is_some_and(|min| year < adapter.year(min))
            || c.max.as_ref().is_some_and(|max| year > adapter.year(max))
        {
            return false;
        }
        let Ok(first) = adapter.create_date(year, 0, 1) else {
            return false;
        };
        // Within the bound years and unfiltered, some day is always in range.
        if c.filter.is_none() {
            return true;
        }
        let days = if crate::types::is_leap_year(year) { 366 } else { 365 };
        (0..days).any(|offset| {
            let date = adapter.add_calendar_days(&first, offset);
            c.is_day_enabled(adapter, &date)
        })
    }

    /// A window of `years_per_row * year_rows` years holding the pivot.
    ///
    /// # Errors
    /// `InvalidDate` when the pivot is invalid.
    pub fn multi_year_grid(&self, pivot: &A::Date) -> Result<CalendarGrid, DateError> {
        let adapter = self.adapter;
        if !adapter.is_valid(pivot) {
            return Err(DateError::invalid("render"));
        }
        let year = adapter.year(pivot);
        let offset = self.window_offset(year);
        let window = self.years_per_window();
        let first_year = year - offset as i32;
        let last_year = first_year + window as i32 - 1;
        trace!("multi-year grid {first_year}..={last_year}");

        let cells = (first_year..=last_year)
            .map(|y| CalendarCell {
                value:         y,
                display_value: y.to_string(),
                aria_label:    y.to_string(),
                enabled:       self.is_year_enabled(y),
                out:           false,
                cell_class:    format!("year-{y}"),
            })
            .collect();

        let today_value = self
            .today
            .as_ref()
            .map(|t| adapter.year(t))
            .filter(|y| (first_year..=last_year).contains(y));

        Ok(CalendarGrid {
            view: CalendarView::MultiYears,
            rows: into_rows(cells, self.years_per_row.max(1)),
            active_index: offset as usize,
            today_value,
            label: format!("{first_year}{YEAR_RANGE_SEPARATOR}{last_year}"),
            weekdays: Vec::new(),
        })
    }

    /// Cell values of the selected dates in the grid for `view` around
    /// `pivot`. Month grids use the running day index, so selected days in
    /// adjacent months still map onto their `out` cells.
    pub fn selected_values(
        &self,
        view: CalendarView,
        pivot: &A::Date,
        selected: &[Option<&A::Date>],
    ) -> Vec<Option<i32>> {
        let adapter = self.adapter;
        let year = adapter.year(pivot);
        selected
            .iter()
            .map(|s| {
                let s = s.filter(|s| adapter.is_valid(s))?;
                match view {
                    CalendarView::Month => {
                        let first = self.first_of_month(pivot).ok()?;
                        let diff = adapter.difference_in_calendar_days(s, &first)?;
                        i32::try_from(diff + 1).ok()
                    },
                    CalendarView::Year => {
                        (adapter.year(s) == year).then(|| adapter.month(s) as i32)
                    },
                    CalendarView::MultiYears => {
                        let first_year = year - self.window_offset(year) as i32;
                        let y = adapter.year(s);
                        (first_year..first_year + self.years_per_window() as i32)
                            .contains(&y)
                            .then_some(y)
                    },
                }
            })
            .collect()
    }

    /// The date a month-grid cell stands for.
    ///
    /// # Errors
    /// `InvalidDate` when the pivot is invalid.
    pub fn date_for_day_cell(&self, pivot: &A::Date, value: i32) -> Result<A::Date, DateError> {
        let first = self.first_of_month(pivot)?;
        Ok(self.adapter.add_calendar_days(&first, i64::from(value) - 1))
    }
}

/// True when `value` lies between two selected values, inclusive.
pub fn value_in_range(value: i32, from: Option<i32>, to: Option<i32>) -> bool {
    match (from, to) {
        (Some(from), Some(to)) => from <= value && value <= to,
        _ => false,
    }
}

fn into_rows(cells: Vec<CalendarCell>, columns: u32) -> Vec<Vec<CalendarCell>> {
    let columns = columns.max(1) as usize;
    let mut rows = Vec::with_capacity(cells.len().div_ceil(columns));
    let mut cells = cells.into_iter().peekable();
    while cells.peek().is_some() {
        rows.push(cells.by_ref().take(columns).collect());
    }
    rows
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Datelike;
    use crate::native::{NativeDate, NativeDateAdapter};
    use crate::test_utils::{date, date_time, even_days_only};

    fn context<'a>(adapter: &'a NativeDateAdapter, formats: &'a Formats) -> GridContext<'a, NativeDateAdapter> {
        GridContext::new(adapter, formats)
    }

    #[test]
    fn test_grid_sizes() {
        let adapter = NativeDateAdapter::default();
        let formats = Formats::default();
        let ctx = context(&adapter, &formats);
        for (y, m) in [(2018, 0), (2018, 1), (2015, 1), (2020, 1), (2018, 6)] {
            let pivot = date(y, m, 1);
            let grid = ctx.month_grid(&pivot).unwrap();
            assert_eq!(grid.cell_count(), 42);
            assert_eq!(grid.rows.len(), 6);
            assert!(grid.rows.iter().all(|r| r.len() == 7));
            assert_eq!(ctx.year_grid(&pivot).unwrap().cell_count(), 12);
            assert_eq!(ctx.multi_year_grid(&pivot).unwrap().cell_count(), 21);
        }

        let mut ctx = context(&adapter, &formats);
        ctx.years_per_row = 4;
        ctx.year_rows = 6;
        let grid = ctx.multi_year_grid(&date(2018, 0, 1)).unwrap();
        assert_eq!(grid.cell_count(), 24);
        assert_eq!(grid.rows.len(), 6);
    }

    #[test]
    fn test_month_grid_layout() {
        let adapter = NativeDateAdapter::default();
        let formats = Formats::default();
        let ctx = context(&adapter, &formats);
        // 2018-01-01 is a Monday
        let grid = ctx.month_grid(&date(2018, 0, 31)).unwrap();
        let cells: Vec<_> = grid.cells().collect();
        assert_eq!(cells[0].value, 0);
        assert_eq!(cells[0].display_value, "31");
        assert!(cells[0].out);
        assert_eq!(cells[1].value, 1);
        assert!(!cells[1].out);
        assert_eq!(cells[1].aria_label, "January 1, 2018");
        assert_eq!(cells[1].cell_class, "day-1");
        assert_eq!(cells[31].value, 31);
        assert!(!cells[31].out);
        assert_eq!(cells[32].display_value, "1");
        assert!(cells[32].out);
        assert_eq!(grid.active_index, 31);
        assert_eq!(grid.active_cell().unwrap().value, 31);
        assert_eq!(grid.label, "Jan 2018");
        assert_eq!(grid.weekdays[0], "Sun");
    }

    #[test]
    fn test_first_day_of_week() {
        let adapter = NativeDateAdapter::default();
        let formats = Formats::default();
        let mut ctx = context(&adapter, &formats);
        ctx.first_day_of_week = Some(1);
        let grid = ctx.month_grid(&date(2018, 0, 15)).unwrap();
        assert_eq!(grid.cells().next().unwrap().value, 1);
        assert_eq!(grid.weekdays[0], "Mon");
        assert_eq!(grid.active_index, 14);

        let adapter = NativeDateAdapter::new("en-GB");
        let ctx = context(&adapter, &formats);
        let grid = ctx.month_grid(&date(2018, 0, 15)).unwrap();
        assert_eq!(grid.weekdays[0], "Mon");
    }

    #[test]
    fn test_hide_other_months() {
        let adapter = NativeDateAdapter::default();
        let formats = Formats::default();
        let mut ctx = context(&adapter, &formats);
        ctx.hide_other_months = true;
        let grid = ctx.month_grid(&date(2018, 0, 1)).unwrap();
        let first = grid.cells().next().unwrap();
        assert!(first.out);
        assert!(!first.enabled);
        assert!(first.display_value.is_empty());
    }

    #[test]
    fn test_bounds_and_filter() {
        let adapter = NativeDateAdapter::default();
        let formats = Formats::default();
        let filter = even_days_only();
        let mut ctx = context(&adapter, &formats);
        ctx.constraints = Constraints {
            min:    Some(date(2018, 0, 10)),
            max:    Some(date(2018, 0, 20)),
            filter: Some(&filter),
        };
        let grid = ctx.month_grid(&date(2018, 0, 15)).unwrap();
        let enabled: Vec<i32> = grid.cells().filter(|c| c.enabled).map(|c| c.value).collect();
        assert_eq!(enabled, vec![10, 12, 14, 16, 18, 20]);
    }

    #[test]
    fn test_bounds_with_time_of_day_enable_their_whole_day() {
        let adapter = NativeDateAdapter::default();
        let formats = Formats::default();
        let mut ctx = context(&adapter, &formats);
        ctx.constraints.min = Some(date_time(2018, 0, 10, 16, 0, 0));
        ctx.constraints.max = Some(date_time(2018, 0, 20, 8, 0, 0));

        let grid = ctx.month_grid(&date(2018, 0, 15)).unwrap();
        let enabled: Vec<i32> = grid.cells().filter(|c| c.enabled).map(|c| c.value).collect();
        assert_eq!(enabled, (10..=20).collect::<Vec<_>>());

        assert!(ctx.constraints.is_day_enabled(&adapter, &date(2018, 0, 10)));
        assert!(!ctx.constraints.is_enabled(&adapter, &date(2018, 0, 10)));
        assert!(!ctx.constraints.is_day_enabled(&adapter, &date(2018, 0, 21)));
    }

    #[test]
    fn test_year_grid_month_enablement_is_existential() {
        let adapter = NativeDateAdapter::default();
        let formats = Formats::default();
        let mut ctx = context(&adapter, &formats);
        // only the last day of March passes
        ctx.constraints.min = Some(date(2018, 2, 31));
        ctx.constraints.max = Some(date(2018, 3, 1));
        let grid = ctx.year_grid(&date(2018, 5, 1)).unwrap();
        let enabled: Vec<i32> = grid.cells().filter(|c| c.enabled).map(|c| c.value).collect();
        assert_eq!(enabled, vec![2, 3]);
        assert_eq!(grid.active_index, 5);
        assert_eq!(grid.cell(2).unwrap().display_value, "Mar");
        assert_eq!(grid.cell(2).unwrap().aria_label, "March 2018");
        assert_eq!(grid.label, "2018");
    }

    #[test]
    fn test_multi_year_window() {
        let adapter = NativeDateAdapter::default();
        let formats = Formats::default();
        let mut ctx = context(&adapter, &formats);
        ctx.constraints.max = Some(date(2030, 0, 1));
        let grid = ctx.multi_year_grid(&date(2018, 4, 3)).unwrap();
        let years: Vec<i32> = grid.cells().map(|c| c.value).collect();
        assert_eq!(years.first(), Some(&2016));
        assert_eq!(years.last(), Some(&2036));
        assert_eq!(grid.active_index, 2);
        assert_eq!(grid.label, "2016 - 2036");
        assert!(grid.cell(2030).unwrap().enabled);
        assert!(!grid.cell(2031).unwrap().enabled);
    }

    #[test]
    fn test_multi_year_with_filter() {
        let adapter = NativeDateAdapter::default();
        let formats = Formats::default();
        let only_2019 = |d: &NativeDate| d.get().is_some_and(|d| d.year() == 2019);
        let mut ctx = context(&adapter, &formats);
        ctx.constraints.filter = Some(&only_2019);
        let grid = ctx.multi_year_grid(&date(2018, 0, 1)).unwrap();
        let enabled: Vec<i32> = grid.cells().filter(|c| c.enabled).map(|c| c.value).collect();
        assert_eq!(enabled, vec![2019]);
    }

    #[test]
    fn test_today_marker() {
        let adapter = NativeDateAdapter::default();
        let formats = Formats::default();
        let mut ctx = context(&adapter, &formats);
        ctx.today = Some(date(2018, 0, 20));
        assert_eq!(ctx.month_grid(&date(2018, 0, 1)).unwrap().today_value, Some(20));
        assert_eq!(ctx.month_grid(&date(2018, 1, 1)).unwrap().today_value, None);
        assert_eq!(ctx.year_grid(&date(2018, 5, 1)).unwrap().today_value, Some(0));
        assert_eq!(
            ctx.multi_year_grid(&date(2030, 5, 1)).unwrap().today_value,
            Some(2018)
        );
    }

    #[test]
    fn test_selected_values() {
        let adapter = NativeDateAdapter::default();
        let formats = Formats::default();
        let ctx = context(&adapter, &formats);
        let pivot = date(2018, 0, 15);
        let from = date(2017, 11, 31);
        let to = date(2018, 0, 5);
        let selected = [Some(&from), Some(&to)];
        assert_eq!(
            ctx.selected_values(CalendarView::Month, &pivot, &selected),
            vec![Some(0), Some(5)]
        );
        assert_eq!(
            ctx.selected_values(CalendarView::Year, &pivot, &selected),
            vec![None, Some(0)]
        );
        assert_eq!(
            ctx.selected_values(CalendarView::MultiYears, &pivot, &[Some(&from), None]),
            vec![Some(2017), None]
        );
        assert!(value_in_range(3, Some(0), Some(5)));
        assert!(!value_in_range(6, Some(0), Some(5)));
        assert!(!value_in_range(3, Some(0), None));
    }

    #[test]
    fn test_invalid_pivot() {
        let adapter = NativeDateAdapter::default();
        let formats = Formats::default();
        let ctx = context(&adapter, &formats);
        for view in [CalendarView::Month, CalendarView::Year, CalendarView::MultiYears] {
            assert!(ctx.grid(view, &NativeDate::INVALID).is_err());
        }
    }

    #[test]
    fn test_day_cell_dates() {
        let adapter = NativeDateAdapter::default();
        let formats = Formats::default();
        let ctx = context(&adapter, &formats);
        let pivot = date(2018, 0, 15);
        assert_eq!(ctx.date_for_day_cell(&pivot, 1).unwrap(), date(2018, 0, 1));
        assert_eq!(ctx.date_for_day_cell(&pivot, 0).unwrap(), date(2017, 11, 31));
        assert_eq!(ctx.date_for_day_cell(&pivot, 33).unwrap(), date(2018, 1, 2));
    }
}

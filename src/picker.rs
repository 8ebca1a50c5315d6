//! The picker: configuration, pivot, view and selection in one place.
//!
//! Every mutating call returns the events it caused; nothing is pushed to
//! listeners behind the caller's back.

use std::cmp::Ordering;
use std::fmt;
use std::time::Instant;

use log::debug;

use crate::adapter::DateTimeAdapter;
use crate::calendar::{CalendarGrid, Constraints, DateFilter, GridContext};
use crate::config::PickerConfig;
use crate::debounce::Debouncer;
use crate::error::{ConfigError, DateError};
use crate::format::{FormatOptions, Formats};
use crate::id::IdGenerator;
use crate::navigation::{KeyPress, NavKey, Navigation};
use crate::selection::{ActiveSide, RetainedTimes, Selection, SelectionState, compose_with_time};
use crate::timer::{TimeUnit, Timer};
use crate::types::{CalendarView, PickerType, SelectMode};

/// Separates `from` and `to` in the input text of a range picker
pub const RANGE_SEPARATOR: &str = " ~ ";

/// What a picker reports back to its owner.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PickerEvent<D> {
    SelectionChanged(Selection<D>),
    /// A year cell was chosen in the multi-year view
    YearSelected(D),
    /// A month cell was chosen in the year view
    MonthSelected(D),
    /// The user accepted the current selection
    Confirmed(Selection<D>),
    PivotChanged(D),
    ViewChanged(CalendarView),
}

/// Collects the capabilities and options a [`Picker`] needs.
pub struct PickerBuilder<A: DateTimeAdapter> {
    adapter:   Option<A>,
    formats:   Option<Formats>,
    config:    PickerConfig,
    min:       Option<A::Date>,
    max:       Option<A::Date>,
    filter:    Option<Box<DateFilter<A::Date>>>,
    start_at:  Option<A::Date>,
    end_at:    Option<A::Date>,
    selection: Option<Selection<A::Date>>,
    id:        Option<String>,
}

impl<A: DateTimeAdapter> Default for PickerBuilder<A> {
    fn default() -> Self {
        Self {
            adapter:   None,
            formats:   None,
            config:    PickerConfig::default(),
            min:       None,
            max:       None,
            filter:    None,
            start_at:  None,
            end_at:    None,
            selection: None,
            id:        None,
        }
    }
}

impl<A: DateTimeAdapter> fmt::Debug for PickerBuilder<A> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("PickerBuilder")
            .field("has_adapter", &self.adapter.is_some())
            .field("has_formats", &self.formats.is_some())
            .field("config", &self.config)
            .field("min", &self.min)
            .field("max", &self.max)
            .field("start_at", &self.start_at)
            .field("end_at", &self.end_at)
            .field("id", &self.id)
            .finish_non_exhaustive()
    }
}

impl<A: DateTimeAdapter> PickerBuilder<A> {
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn adapter(mut self, adapter: A) -> Self {
        self.adapter = Some(adapter);
        self
    }

    #[must_use]
    pub fn formats(mut self, formats: Formats) -> Self {
        self.formats = Some(formats);
        self
    }

    #[must_use]
    pub fn config(mut self, config: PickerConfig) -> Self {
        self.config = config;
        self
    }

    #[must_use]
    pub fn min_date_time(mut self, min: A::Date) -> Self {
        self.min = Some(min);
        self
    }

    #[must_use]
    pub fn max_date_time(mut self, max: A::Date) -> Self {
        self.max = Some(max);
        self
    }

    #[must_use]
    pub fn date_filter(mut self, filter: impl Fn(&A::Date) -> bool + 'static) -> Self {
        self.filter = Some(Box::new(filter));
        self
    }

    /// Initial pivot, and the retained start time of day
    #[must_use]
    pub fn start_at(mut self, date: A::Date) -> Self {
        self.start_at = Some(date);
        self
    }

    /// Retained end time of day for range picks
    #[must_use]
    pub fn end_at(mut self, date: A::Date) -> Self {
        self.end_at = Some(date);
        self
    }

    #[must_use]
    pub fn selected(mut self, selection: Selection<A::Date>) -> Self {
        self.selection = Some(selection);
        self
    }

    #[must_use]
    pub fn id(mut self, id: &str) -> Self {
        self.id = Some(id.to_owned());
        self
    }

    #[must_use]
    pub fn id_from(mut self, ids: &dyn IdGenerator) -> Self {
        self.id = Some(ids.next_id());
        self
    }

    /// # Errors
    /// - `MissingAdapter` / `MissingFormats` when either was never supplied
    /// - `MissingId` without [`id`](Self::id) or [`id_from`](Self::id_from)
    /// - `InvalidValue` from [`PickerConfig::validate`]
    /// - `InvalidBounds` when the minimum is after the maximum
    pub fn build(self) -> Result<Picker<A>, ConfigError> {
        let adapter = self.adapter.ok_or(ConfigError::MissingAdapter)?;
        let formats = self.formats.ok_or(ConfigError::MissingFormats)?;
        self.config.validate()?;

        let min = adapter.valid_date_or_none(self.min.as_ref());
        let max = adapter.valid_date_or_none(self.max.as_ref());
        let inverted = match (&min, &max) {
            (Some(min), Some(max)) => adapter.compare(min, max)? == Ordering::Greater,
            _ => false,
        };
        if inverted {
            return Err(ConfigError::InvalidBounds);
        }

        let mode = self.config.select_mode;
        let selection = self
            .selection
            .map_or_else(|| Selection::empty(mode), |s| normalize_selection(&adapter, mode, s));
        let start_at = adapter.valid_date_or_none(self.start_at.as_ref());
        let end_at = adapter.valid_date_or_none(self.end_at.as_ref());
        let retained = RetainedTimes {
            start: start_at.as_ref().map(|d| adapter.time_of_day(d)),
            end:   end_at.as_ref().map(|d| adapter.time_of_day(d)),
        };
        let state = SelectionState::new(mode)
            .with_selection(selection)
            .with_retained(retained);

        let pivot = start_at
            .or_else(|| state.selection.from().cloned())
            .or_else(|| state.selection.to().cloned())
            .unwrap_or_else(|| adapter.now());
        let pivot = adapter.clamp_date(&pivot, min.as_ref(), max.as_ref());

        let view = if self.config.picker_type.shows_calendar() {
            self.config.start_view
        } else {
            CalendarView::Month
        };
        let id = self.id.ok_or(ConfigError::MissingId)?;
        debug!("built picker {id} ({mode}, {})", self.config.picker_type);

        Ok(Picker {
            id,
            input: Debouncer::new(self.config.debounce_window()),
            adapter,
            formats,
            config: self.config,
            min,
            max,
            filter: self.filter,
            state,
            pivot,
            view,
        })
    }
}

/// Fits a caller-supplied selection to `mode`, dropping invalid dates.
fn normalize_selection<A: DateTimeAdapter>(
    adapter: &A,
    mode: SelectMode,
    selection: Selection<A::Date>,
) -> Selection<A::Date> {
    let (from, to) = match selection {
        Selection::Single(value) => (value, None),
        Selection::Range { from, to } => (from, to),
    };
    let from = adapter.valid_date_or_none(from.as_ref());
    let to = adapter.valid_date_or_none(to.as_ref());
    match mode {
        SelectMode::Single => Selection::Single(from),
        _ => {
            let ordered = match (&from, &to) {
                (Some(f), Some(t)) => adapter.compare(f, t).is_ok_and(Ordering::is_le),
                _ => true,
            };
            if ordered {
                Selection::Range { from, to }
            } else {
                Selection::Range { from, to: None }
            }
        },
    }
}

/// A configured picker instance.
pub struct Picker<A: DateTimeAdapter> {
    id:      String,
    adapter: A,
    formats: Formats,
    config:  PickerConfig,
    min:     Option<A::Date>,
    max:     Option<A::Date>,
    filter:  Option<Box<DateFilter<A::Date>>>,
    state:   SelectionState<A::Date>,
    pivot:   A::Date,
    view:    CalendarView,
    input:   Debouncer<(TimeUnit, String)>,
}

impl<A: DateTimeAdapter> fmt::Debug for Picker<A> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Picker")
            .field("id", &self.id)
            .field("config", &self.config)
            .field("min", &self.min)
            .field("max", &self.max)
            .field("state", &self.state)
            .field("pivot", &self.pivot)
            .field("view", &self.view)
            .finish_non_exhaustive()
    }
}

impl<A: DateTimeAdapter> Picker<A> {
    pub fn builder() -> PickerBuilder<A> {
        PickerBuilder::new()
    }

    pub fn id(&self) -> &str {
        &self.id
    }

    pub const fn adapter(&self) -> &A {
        &self.adapter
    }

    pub const fn formats(&self) -> &Formats {
        &self.formats
    }

    pub const fn config(&self) -> &PickerConfig {
        &self.config
    }

    pub const fn selection(&self) -> &Selection<A::Date> {
        &self.state.selection
    }

    pub const fn active_side(&self) -> ActiveSide {
        self.state.active
    }

    pub const fn pivot(&self) -> &A::Date {
        &self.pivot
    }

    pub const fn view(&self) -> CalendarView {
        self.view
    }

    /// Bounds and filter for the next calendar pick, with the range limit
    /// applied to the end that pick fills.
    pub fn constraints(&self) -> Constraints<'_, A::Date> {
        self.constraints_for(self.state.picked_side())
    }

    /// Bounds and filter for moving `side`, measured from the other end.
    fn constraints_for(&self, side: Option<ActiveSide>) -> Constraints<'_, A::Date> {
        let (min, max) = self.state.span_bounds(
            &self.adapter,
            side,
            self.min.as_ref(),
            self.max.as_ref(),
            self.config.range_limit,
        );
        Constraints {
            min,
            max,
            filter: self.filter.as_deref(),
        }
    }

    /// Plain bounds, used to keep the pivot in range
    fn bounds(&self) -> Constraints<'_, A::Date> {
        Constraints {
            min:    self.min.clone(),
            max:    self.max.clone(),
            filter: None,
        }
    }

    fn grid_context<'a>(&'a self, constraints: Constraints<'a, A::Date>) -> GridContext<'a, A> {
        GridContext {
            adapter: &self.adapter,
            formats: &self.formats,
            constraints,
            first_day_of_week: self.config.first_day_of_week,
            hide_other_months: self.config.hide_other_months,
            years_per_row: self.config.years_per_row,
            year_rows: self.config.year_rows,
            today: Some(self.adapter.now()),
        }
    }

    /// The grid for the current view.
    ///
    /// # Errors
    /// `InvalidDate` when the pivot is invalid.
    pub fn grid(&self) -> Result<CalendarGrid, DateError> {
        self.grid_context(self.constraints()).grid(self.view, &self.pivot)
    }

    /// Cell values of the selection in the current grid
    pub fn selected_values(&self) -> Vec<Option<i32>> {
        self.grid_context(self.constraints())
            .selected_values(self.view, &self.pivot, &self.state.selection.values())
    }

    /// Moves the pivot, clamped into bounds. Invalid dates are ignored.
    pub fn set_pivot(&mut self, date: &A::Date) -> Vec<PickerEvent<A::Date>> {
        if !self.adapter.is_valid(date) {
            return Vec::new();
        }
        let clamped = self.bounds().clamp(&self.adapter, date);
        if self.adapter.same_date(Some(&clamped), Some(&self.pivot)) {
            return Vec::new();
        }
        debug!("picker {} pivot moved to {clamped:?}", self.id);
        self.pivot = clamped.clone();
        vec![PickerEvent::PivotChanged(clamped)]
    }

    pub fn set_view(&mut self, view: CalendarView) -> Vec<PickerEvent<A::Date>> {
        if view == self.view {
            return Vec::new();
        }
        debug!("picker {} view {} -> {view}", self.id, self.view);
        self.view = view;
        vec![PickerEvent::ViewChanged(view)]
    }

    /// Header arrow: one period back
    pub fn previous_period(&mut self) -> Vec<PickerEvent<A::Date>> {
        self.handle_key(NavKey::PageUp.into()).unwrap_or_default()
    }

    /// Header arrow: one period forward
    pub fn next_period(&mut self) -> Vec<PickerEvent<A::Date>> {
        self.handle_key(NavKey::PageDown.into()).unwrap_or_default()
    }

    /// Selects the cell holding `value` in the current grid.
    ///
    /// # Errors
    /// `InvalidDate` when the pivot is invalid.
    pub fn select_cell(&mut self, value: i32) -> Result<Vec<PickerEvent<A::Date>>, DateError> {
        let adapter = &self.adapter;
        let pivot = &self.pivot;
        match self.view {
            CalendarView::Month => {
                let ctx = self.grid_context(self.constraints());
                let in_month = (1..=adapter.num_days_in_month(pivot) as i32).contains(&value);
                if self.config.hide_other_months && !in_month {
                    return Ok(Vec::new());
                }
                let date = ctx.date_for_day_cell(pivot, value)?;
                self.select_date(&date)
            },
            CalendarView::Year => {
                let Ok(month) = u32::try_from(value) else {
                    return Ok(Vec::new());
                };
                let ctx = self.grid_context(self.constraints());
                if !ctx.is_month_enabled(adapter.year(pivot), month) {
                    return Ok(Vec::new());
                }
                let date = adapter.add_calendar_months(pivot, value - adapter.month(pivot) as i32);
                Ok(self.select_month(&date))
            },
            CalendarView::MultiYears => {
                if !self.grid_context(self.constraints()).is_year_enabled(value) {
                    return Ok(Vec::new());
                }
                let date = adapter.add_calendar_years(pivot, value - adapter.year(pivot));
                Ok(self.select_year(&date))
            },
        }
    }

    /// Applies a day pick. With a timer shown, the pick keeps the pivot's
    /// time of day. The day must be enabled in the grid; the picked moment
    /// is then clamped into the bounds.
    ///
    /// # Errors
    /// `InvalidDate` when the date or the pivot is invalid.
    pub fn select_date(&mut self, date: &A::Date) -> Result<Vec<PickerEvent<A::Date>>, DateError> {
        if !self.adapter.is_valid(date) {
            return Err(DateError::invalid("select"));
        }
        let constraints = self.constraints();
        if !constraints.is_day_enabled(&self.adapter, date) {
            debug!("picker {} rejected disabled day {date:?}", self.id);
            return Ok(Vec::new());
        }
        let candidate = if self.config.picker_type == PickerType::Both {
            compose_with_time(&self.adapter, &constraints, date, &self.pivot)?
        } else {
            constraints.clamp(&self.adapter, date)
        };
        let next = self.state.pick(&self.adapter, &constraints, &candidate);
        let Some(next) = next else {
            return Ok(Vec::new());
        };
        self.state = next;
        let mut events = vec![PickerEvent::SelectionChanged(self.state.selection.clone())];
        events.extend(self.set_pivot(&candidate));
        Ok(events)
    }

    /// A month chosen in the year view: reported, then drilled into.
    pub fn select_month(&mut self, date: &A::Date) -> Vec<PickerEvent<A::Date>> {
        let mut events = vec![PickerEvent::MonthSelected(date.clone())];
        events.extend(self.set_pivot(date));
        events.extend(self.set_view(CalendarView::Month));
        events
    }

    /// A year chosen in the multi-year view: reported, then drilled into.
    pub fn select_year(&mut self, date: &A::Date) -> Vec<PickerEvent<A::Date>> {
        let mut events = vec![PickerEvent::YearSelected(date.clone())];
        events.extend(self.set_pivot(date));
        events.extend(self.set_view(CalendarView::Year));
        events
    }

    /// Keyboard handling for the current grid.
    ///
    /// # Errors
    /// `InvalidDate` when Enter commits an invalid pivot.
    pub fn handle_key(&mut self, press: KeyPress) -> Result<Vec<PickerEvent<A::Date>>, DateError> {
        let nav = self
            .grid_context(self.bounds())
            .navigate(self.view, &self.pivot, press);
        match nav {
            Navigation::Moved(date) => Ok(self.set_pivot(&date)),
            Navigation::Commit(date) => match self.view {
                CalendarView::Month => self.select_date(&date),
                CalendarView::Year => {
                    let month = self.adapter.month(&date);
                    let ctx = self.grid_context(self.constraints());
                    if ctx.is_month_enabled(self.adapter.year(&date), month) {
                        Ok(self.select_month(&date))
                    } else {
                        Ok(Vec::new())
                    }
                },
                CalendarView::MultiYears => {
                    let year = self.adapter.year(&date);
                    if self.grid_context(self.constraints()).is_year_enabled(year) {
                        Ok(self.select_year(&date))
                    } else {
                        Ok(Vec::new())
                    }
                },
            },
        }
    }

    /// Switches the range end the timer edits and moves the pivot to it.
    pub fn set_active_side(&mut self, side: ActiveSide) -> Vec<PickerEvent<A::Date>> {
        self.state = self.state.clone().with_active(side);
        let value = match self.state.active {
            ActiveSide::From => self.state.selection.from().cloned(),
            ActiveSide::To => self.state.selection.to().cloned(),
        };
        value.map(|v| self.set_pivot(&v)).unwrap_or_default()
    }

    /// Spinner over the pivot, bounded by the picker's limits and by the
    /// range limit on the edited end
    pub fn timer(&self) -> Timer<'_, A> {
        let Constraints { min, max, .. } = self.constraints_for(self.state.edited_side());
        Timer::new(&self.adapter, self.config.timer_options()).with_bounds(min, max)
    }

    /// Moves the pivot to `moment` from the timer and carries it into the
    /// selection.
    fn apply_time(&mut self, moment: &A::Date) -> Vec<PickerEvent<A::Date>> {
        let constraints = self.constraints_for(self.state.edited_side());
        let next = self.state.apply_time(&self.adapter, &constraints, moment);
        let Some(next) = next else {
            return Vec::new();
        };
        let mut events = self.set_pivot(moment);
        if next.selection != self.state.selection {
            events.push(PickerEvent::SelectionChanged(next.selection.clone()));
        }
        self.state = next;
        events
    }

    /// Spinner arrow. Disabled steps do nothing.
    pub fn step_time(&mut self, unit: TimeUnit, up: bool) -> Vec<PickerEvent<A::Date>> {
        let timer = self.timer();
        let moment = if up {
            timer.step_up(&self.pivot, unit)
        } else {
            timer.step_down(&self.pivot, unit)
        };
        moment.map(|m| self.apply_time(&m)).unwrap_or_default()
    }

    pub fn toggle_meridian(&mut self) -> Vec<PickerEvent<A::Date>> {
        let moment = self.timer().toggle_meridian(&self.pivot);
        self.apply_time(&moment)
    }

    /// Buffers typed spinner text; it commits after the quiet window.
    pub fn time_input(&mut self, unit: TimeUnit, text: &str, now: Instant) {
        self.input.push((unit, text.to_owned()), now);
    }

    /// Commits buffered spinner text once input has been quiet long enough.
    pub fn poll_time_input(&mut self, now: Instant) -> Vec<PickerEvent<A::Date>> {
        self.input
            .poll(now)
            .map(|(unit, text)| self.commit_time_text(unit, &text))
            .unwrap_or_default()
    }

    /// Commits buffered spinner text immediately, as on blur.
    pub fn blur_time_input(&mut self) -> Vec<PickerEvent<A::Date>> {
        self.input
            .flush()
            .map(|(unit, text)| self.commit_time_text(unit, &text))
            .unwrap_or_default()
    }

    fn commit_time_text(&mut self, unit: TimeUnit, text: &str) -> Vec<PickerEvent<A::Date>> {
        let moment = self.timer().commit_text(&self.pivot, unit, text);
        moment.map(|m| self.apply_time(&m)).unwrap_or_default()
    }

    /// Emits the current selection as accepted. Nothing to confirm when
    /// empty.
    pub fn confirm(&self) -> Vec<PickerEvent<A::Date>> {
        if self.state.selection.is_empty() {
            return Vec::new();
        }
        debug!("picker {} confirmed", self.id);
        vec![PickerEvent::Confirmed(self.state.selection.clone())]
    }

    /// The format slot for the input text
    pub const fn input_format(&self) -> &FormatOptions {
        match self.config.picker_type {
            PickerType::Both => &self.formats.full_picker_input,
            PickerType::Calendar => &self.formats.date_picker_input,
            PickerType::Timer => &self.formats.time_picker_input,
        }
    }

    /// The selection as input text. Ranges read `from ~ to` with empty ends
    /// left blank.
    ///
    /// # Errors
    /// `InvalidDate` when a selected date cannot be formatted.
    pub fn input_text(&self) -> Result<String, DateError> {
        let options = self.input_format();
        let format = |d: Option<&A::Date>| -> Result<String, DateError> {
            d.map_or_else(|| Ok(String::new()), |d| self.adapter.format(d, options))
        };
        match &self.state.selection {
            Selection::Single(value) => format(value.as_ref()),
            Selection::Range { from: None, to: None } => Ok(String::new()),
            Selection::Range { from, to } => Ok(format!(
                "{}{RANGE_SEPARATOR}{}",
                format(from.as_ref())?,
                format(to.as_ref())?
            )),
        }
    }

    /// Replaces the selection from typed input text. Empty text clears it;
    /// disabled dates leave it untouched.
    ///
    /// # Errors
    /// `Parse` when the text is not a date.
    pub fn parse_input(&mut self, text: &str) -> Result<Vec<PickerEvent<A::Date>>, DateError> {
        let parse = |part: &str| -> Result<Option<A::Date>, DateError> {
            match self.adapter.parse(part) {
                Some(d) if self.adapter.is_valid(&d) => Ok(Some(d)),
                Some(_) => Err(DateError::Parse(part.trim().to_owned())),
                None => Ok(None),
            }
        };
        let selection = if self.state.mode == SelectMode::Single {
            Selection::Single(parse(text)?)
        } else {
            let (from, to) = text.split_once(RANGE_SEPARATOR.trim()).unwrap_or((text, ""));
            Selection::Range {
                from: parse(from)?,
                to:   parse(to)?,
            }
        };

        let selection = normalize_selection(&self.adapter, self.state.mode, selection);
        if !self.accepts(&selection) || selection == self.state.selection {
            return Ok(Vec::new());
        }

        let pivot = selection.from().or(selection.to()).cloned();
        self.state = self.state.clone().with_selection(selection.clone());
        let mut events = vec![PickerEvent::SelectionChanged(selection)];
        if let Some(pivot) = pivot {
            events.extend(self.set_pivot(&pivot));
        }
        Ok(events)
    }

    /// Whether a whole typed selection may replace the current one: every end
    /// enabled, and a complete range no longer than the range limit.
    fn accepts(&self, selection: &Selection<A::Date>) -> bool {
        let bounds = self.constraints_for(None);
        let enabled = selection
            .values()
            .into_iter()
            .flatten()
            .all(|d| bounds.is_enabled(&self.adapter, d));
        let within_limit = match (selection.from(), selection.to(), self.config.range_limit) {
            (Some(from), Some(to), Some(limit)) => self
                .adapter
                .difference_in_calendar_days(to, from)
                .is_some_and(|days| days <= i64::from(limit)),
            _ => true,
        };
        enabled && within_limit
    }

    /// Switches the adapter's locale; subscribers of
    /// [`DateTimeAdapter::locale_changes`] are notified.
    pub fn set_locale(&mut self, locale: &str) {
        self.adapter.set_locale(locale);
    }
}

//! Selection values and the transitions a pick or a time edit causes.

use std::cmp::Ordering;
use std::fmt;

use log::debug;
use serde::{Deserialize, Serialize};

use crate::adapter::DateTimeAdapter;
use crate::calendar::Constraints;
use crate::error::DateError;
use crate::types::{SelectMode, TimeOfDay};

/// The picked value: one date, or a `[from, to]` pair with either end unset.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum Selection<D> {
    Single(Option<D>),
    Range { from: Option<D>, to: Option<D> },
}

impl<D> Selection<D> {
    /// Nothing selected, shaped for `mode`
    pub const fn empty(mode: SelectMode) -> Self {
        match mode {
            SelectMode::Single => Self::Single(None),
            _ => Self::Range { from: None, to: None },
        }
    }

    /// The single value, or `from` of a range
    pub const fn from(&self) -> Option<&D> {
        match self {
            Self::Single(value) => value.as_ref(),
            Self::Range { from, .. } => from.as_ref(),
        }
    }

    /// `to` of a range, `None` for a single value
    pub const fn to(&self) -> Option<&D> {
        match self {
            Self::Single(_) => None,
            Self::Range { to, .. } => to.as_ref(),
        }
    }

    /// One entry for a single value, two for a range
    pub fn values(&self) -> Vec<Option<&D>> {
        match self {
            Self::Single(value) => vec![value.as_ref()],
            Self::Range { from, to } => vec![from.as_ref(), to.as_ref()],
        }
    }

    pub const fn is_empty(&self) -> bool {
        matches!(self, Self::Single(None) | Self::Range { from: None, to: None })
    }
}

/// The end of a range that the timer and rangeFrom/rangeTo picks edit.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum ActiveSide {
    #[default]
    From,
    To,
}

/// Times of day reused by later date-only picks in range mode.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct RetainedTimes {
    pub start: Option<TimeOfDay>,
    pub end:   Option<TimeOfDay>,
}

/// Selection plus the bookkeeping its transitions need.
///
/// Transitions never mutate: they return the next state, or `None` when the
/// candidate is rejected or the pick changes nothing.
#[derive(Debug, Clone, PartialEq)]
pub struct SelectionState<D> {
    pub mode:      SelectMode,
    pub selection: Selection<D>,
    pub active:    ActiveSide,
    pub retained:  RetainedTimes,
}

impl<D: Clone + PartialEq + fmt::Debug> SelectionState<D> {
    pub const fn new(mode: SelectMode) -> Self {
        Self {
            mode,
            selection: Selection::empty(mode),
            active: match mode {
                SelectMode::RangeTo => ActiveSide::To,
                _ => ActiveSide::From,
            },
            retained: RetainedTimes {
                start: None,
                end:   None,
            },
        }
    }

    #[must_use]
    pub fn with_selection(mut self, selection: Selection<D>) -> Self {
        self.selection = selection;
        self
    }

    #[must_use]
    pub fn with_retained(mut self, retained: RetainedTimes) -> Self {
        self.retained = retained;
        self
    }

    /// Switches the edited end of a range. Ignored outside range mode.
    #[must_use]
    pub fn with_active(mut self, side: ActiveSide) -> Self {
        if self.mode == SelectMode::Range {
            self.active = side;
        }
        self
    }

    fn pair(&self) -> (Option<&D>, Option<&D>) {
        (self.selection.from(), self.selection.to())
    }

    fn next(&self, selection: Selection<D>, active: ActiveSide, retained: RetainedTimes) -> Self {
        Self {
            mode: self.mode,
            selection,
            active,
            retained,
        }
    }

    /// `date` moved to a retained time of day, as long as that keeps it
    /// enabled.
    fn retain<A>(&self, adapter: &A, constraints: &Constraints<'_, D>, date: &D, time: Option<TimeOfDay>) -> D
    where
        A: DateTimeAdapter<Date = D>,
    {
        time.and_then(|t| adapter.with_time_of_day(date, t).ok())
            .filter(|d| constraints.is_enabled(adapter, d))
            .unwrap_or_else(|| date.clone())
    }

    /// Applies a calendar pick of `date`.
    pub fn pick<A>(&self, adapter: &A, constraints: &Constraints<'_, D>, date: &D) -> Option<Self>
    where
        A: DateTimeAdapter<Date = D>,
    {
        if !constraints.is_enabled(adapter, date) {
            debug!("rejected pick of disabled date {date:?}");
            return None;
        }

        let (from, to) = self.pair();
        let next = match self.mode {
            SelectMode::Single => {
                if from.is_some_and(|current| adapter.is_same_day(current, date)) {
                    return None;
                }
                self.next(Selection::Single(Some(date.clone())), ActiveSide::From, self.retained)
            },
            SelectMode::Range => self.pick_range(adapter, constraints, date),
            SelectMode::RangeFrom => {
                let to = to
                    .filter(|to| adapter.compare(date, to).is_ok_and(Ordering::is_le))
                    .cloned();
                let selection = Selection::Range {
                    from: Some(date.clone()),
                    to,
                };
                self.next(selection, ActiveSide::From, self.retained)
            },
            SelectMode::RangeTo => {
                let from = from
                    .filter(|from| adapter.compare(from, date).is_ok_and(Ordering::is_le))
                    .cloned();
                let selection = Selection::Range {
                    from,
                    to: Some(date.clone()),
                };
                self.next(selection, ActiveSide::To, self.retained)
            },
        };

        debug!("{} selection now {:?}", self.mode, next.selection);
        Some(next)
    }

    fn pick_range<A>(&self, adapter: &A, constraints: &Constraints<'_, D>, date: &D) -> Self
    where
        A: DateTimeAdapter<Date = D>,
    {
        if let (Some(from), None) = self.pair() {
            let after_from = adapter
                .difference_in_calendar_days(date, from)
                .is_some_and(|days| days >= 0);
            if after_from {
                let to = self.retain(adapter, constraints, date, self.retained.end);
                // a retained end time may fall before `from` on the same day
                let to = if adapter.compare(&to, from).is_ok_and(Ordering::is_ge) {
                    Some(to)
                } else if adapter.compare(date, from).is_ok_and(Ordering::is_ge) {
                    Some(date.clone())
                } else {
                    None
                };
                if let Some(to) = to {
                    let retained = RetainedTimes {
                        end: Some(adapter.time_of_day(&to)),
                        ..self.retained
                    };
                    let selection = Selection::Range {
                        from: Some(from.clone()),
                        to:   Some(to),
                    };
                    return self.next(selection, ActiveSide::To, retained);
                }
            }
        }

        let from = self.retain(adapter, constraints, date, self.retained.start);
        let retained = RetainedTimes {
            start: Some(adapter.time_of_day(&from)),
            ..self.retained
        };
        let selection = Selection::Range {
            from: Some(from),
            to:   None,
        };
        self.next(selection, ActiveSide::From, retained)
    }

    /// Applies a timer edit that moved the selected value to `moment`.
    ///
    /// In range modes the active end is replaced. If that would put `from`
    /// after `to`, both ends collapse onto `moment`.
    pub fn apply_time<A>(&self, adapter: &A, constraints: &Constraints<'_, D>, moment: &D) -> Option<Self>
    where
        A: DateTimeAdapter<Date = D>,
    {
        if !constraints.is_enabled(adapter, moment) {
            debug!("rejected time edit to disabled moment {moment:?}");
            return None;
        }
        if self.mode == SelectMode::Single {
            let selection = Selection::Single(Some(moment.clone()));
            return Some(self.next(selection, ActiveSide::From, self.retained));
        }

        let (from, to) = self.pair();
        let crosses = match self.active {
            ActiveSide::From => to.is_some_and(|to| adapter.compare(moment, to) == Ok(Ordering::Greater)),
            ActiveSide::To => from.is_some_and(|from| adapter.compare(moment, from) == Ok(Ordering::Less)),
        };
        let (from, to) = if crosses {
            (Some(moment.clone()), Some(moment.clone()))
        } else {
            match self.active {
                ActiveSide::From => (Some(moment.clone()), to.cloned()),
                ActiveSide::To => (from.cloned(), Some(moment.clone())),
            }
        };

        let retained = RetainedTimes {
            start: from.as_ref().map(|d| adapter.time_of_day(d)).or(self.retained.start),
            end:   to.as_ref().map(|d| adapter.time_of_day(d)).or(self.retained.end),
        };
        debug!("time edit moved {:?} end to {moment:?}", self.active);
        Some(self.next(Selection::Range { from, to }, self.active, retained))
    }

    /// The end a calendar pick fills: `to` while a range awaits it, the end
    /// rangeFrom/rangeTo edit, nothing when a pick starts a new range.
    pub fn picked_side(&self) -> Option<ActiveSide> {
        match (self.mode, self.pair()) {
            (SelectMode::Range, (Some(_), None)) | (SelectMode::RangeTo, _) => Some(ActiveSide::To),
            (SelectMode::RangeFrom, _) => Some(ActiveSide::From),
            _ => None,
        }
    }

    /// The end a timer edit moves
    pub fn edited_side(&self) -> Option<ActiveSide> {
        self.mode.is_range().then_some(self.active)
    }

    /// `min` and `max` tightened so that moving `side` keeps the range
    /// within `range_limit` days of the other end: `to` up to the end of
    /// the day `from + limit`, `from` down to the start of the day
    /// `to - limit`.
    pub fn span_bounds<A>(
        &self,
        adapter: &A,
        side: Option<ActiveSide>,
        min: Option<&D>,
        max: Option<&D>,
        range_limit: Option<u32>,
    ) -> (Option<D>, Option<D>)
    where
        A: DateTimeAdapter<Date = D>,
    {
        let (mut min, mut max) = (min.cloned(), max.cloned());
        let Some(limit) = range_limit.filter(|_| self.mode.is_range()) else {
            return (min, max);
        };
        let limit = i64::from(limit);
        match (side, self.pair()) {
            (Some(ActiveSide::To), (Some(from), _)) => {
                let cap = day_edge(adapter, &adapter.add_calendar_days(from, limit), true);
                max = tighter(adapter, max, cap, Ordering::Less);
            },
            (Some(ActiveSide::From), (_, Some(to))) => {
                let floor = day_edge(adapter, &adapter.add_calendar_days(to, -limit), false);
                min = tighter(adapter, min, floor, Ordering::Greater);
            },
            _ => {},
        }
        (min, max)
    }
}

/// Midnight, or the last second, of `date`'s day
fn day_edge<A: DateTimeAdapter>(adapter: &A, date: &A::Date, end: bool) -> Option<A::Date> {
    let (hour, minute, second) = if end { (23, 59, 59) } else { (0, 0, 0) };
    adapter
        .create_date_time(
            adapter.year(date),
            adapter.month(date),
            adapter.day(date),
            hour,
            minute,
            second,
        )
        .ok()
}

/// The tighter of two bounds. `bound` is kept when it compares to `limit`
/// as `keep`.
fn tighter<A: DateTimeAdapter>(
    adapter: &A,
    bound: Option<A::Date>,
    limit: Option<A::Date>,
    keep: Ordering,
) -> Option<A::Date> {
    match (bound, limit) {
        (Some(bound), Some(limit)) => {
            if adapter.compare(&bound, &limit) == Ok(keep) {
                Some(bound)
            } else {
                Some(limit)
            }
        },
        (bound, limit) => bound.or(limit),
    }
}

/// A calendar pick carrying the pivot's time of day, clamped into bounds.
///
/// # Errors
/// `InvalidDate` when either date is invalid.
pub fn compose_with_time<A>(
    adapter: &A,
    constraints: &Constraints<'_, A::Date>,
    picked: &A::Date,
    pivot: &A::Date,
) -> Result<A::Date, DateError>
where
    A: DateTimeAdapter,
{
    if !adapter.is_valid(picked) || !adapter.is_valid(pivot) {
        return Err(DateError::invalid("compose"));
    }
    let composed = adapter.create_date_time(
        adapter.year(picked),
        adapter.month(picked),
        adapter.day(picked),
        adapter.hour(pivot),
        adapter.minute(pivot),
        adapter.second(pivot),
    )?;
    Ok(constraints.clamp(adapter, &composed))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::native::{NativeDate, NativeDateAdapter};
    use crate::test_utils::{date, date_time, even_days_only};

    fn range(from: Option<NativeDate>, to: Option<NativeDate>) -> Selection<NativeDate> {
        Selection::Range { from, to }
    }

    #[test]
    fn test_range_picks() {
        struct TestCase {
            pick:     NativeDate,
            expected: Selection<NativeDate>,
            active:   ActiveSide,
        }

        let adapter = NativeDateAdapter::default();
        let constraints = Constraints::none();
        let cases = [
            TestCase {
                pick:     date(2018, 0, 10),
                expected: range(Some(date(2018, 0, 10)), None),
                active:   ActiveSide::From,
            },
            TestCase {
                pick:     date(2018, 0, 15),
                expected: range(Some(date(2018, 0, 10)), Some(date(2018, 0, 15))),
                active:   ActiveSide::To,
            },
            TestCase {
                pick:     date(2018, 0, 5),
                expected: range(Some(date(2018, 0, 5)), None),
                active:   ActiveSide::From,
            },
            TestCase {
                pick:     date(2018, 0, 1),
                expected: range(Some(date(2018, 0, 1)), None),
                active:   ActiveSide::From,
            },
            TestCase {
                pick:     date(2018, 0, 1),
                expected: range(Some(date(2018, 0, 1)), Some(date(2018, 0, 1))),
                active:   ActiveSide::To,
            },
        ];

        let mut state = SelectionState::new(SelectMode::Range);
        for (i, case) in cases.iter().enumerate() {
            state = state.pick(&adapter, &constraints, &case.pick).unwrap();
            assert_eq!(state.selection, case.expected, "pick {i}");
            assert_eq!(state.active, case.active, "pick {i}");
        }
    }

    #[test]
    fn test_range_from_and_to() {
        let adapter = NativeDateAdapter::default();
        let constraints = Constraints::none();

        let state = SelectionState::new(SelectMode::RangeFrom)
            .with_selection(range(Some(date(2018, 0, 1)), Some(date(2018, 0, 10))));
        let later = state.pick(&adapter, &constraints, &date(2018, 0, 5)).unwrap();
        assert_eq!(later.selection, range(Some(date(2018, 0, 5)), Some(date(2018, 0, 10))));
        let past_to = state.pick(&adapter, &constraints, &date(2018, 0, 20)).unwrap();
        assert_eq!(past_to.selection, range(Some(date(2018, 0, 20)), None));

        let state = SelectionState::new(SelectMode::RangeTo)
            .with_selection(range(Some(date(2018, 0, 10)), None));
        assert_eq!(state.active, ActiveSide::To);
        let after = state.pick(&adapter, &constraints, &date(2018, 0, 12)).unwrap();
        assert_eq!(after.selection, range(Some(date(2018, 0, 10)), Some(date(2018, 0, 12))));
        let before = state.pick(&adapter, &constraints, &date(2018, 0, 2)).unwrap();
        assert_eq!(before.selection, range(None, Some(date(2018, 0, 2))));
    }

    #[test]
    fn test_single_same_day_is_noop() {
        let adapter = NativeDateAdapter::default();
        let constraints = Constraints::none();
        let state = SelectionState::new(SelectMode::Single)
            .pick(&adapter, &constraints, &date_time(2018, 0, 31, 8, 0, 0))
            .unwrap();
        assert_eq!(state.selection.from(), Some(&date_time(2018, 0, 31, 8, 0, 0)));
        assert!(state.pick(&adapter, &constraints, &date_time(2018, 0, 31, 20, 0, 0)).is_none());
        assert!(state.pick(&adapter, &constraints, &date(2018, 1, 1)).is_some());
    }

    #[test]
    fn test_filter_rejects_odd_days() {
        let adapter = NativeDateAdapter::default();
        let filter = even_days_only();
        let constraints = Constraints {
            min:    None,
            max:    None,
            filter: Some(&filter),
        };
        let state = SelectionState::new(SelectMode::Single);
        assert!(state.pick(&adapter, &constraints, &date(2018, 0, 15)).is_none());
        let picked = state.pick(&adapter, &constraints, &date(2018, 0, 16)).unwrap();
        assert_eq!(picked.selection, Selection::Single(Some(date(2018, 0, 16))));
    }

    #[test]
    fn test_bounds_reject() {
        let adapter = NativeDateAdapter::default();
        let constraints = Constraints {
            min:    Some(date(2018, 0, 10)),
            max:    Some(date(2018, 0, 20)),
            filter: None,
        };
        let state = SelectionState::new(SelectMode::Range);
        assert!(state.pick(&adapter, &constraints, &date(2018, 0, 9)).is_none());
        assert!(state.pick(&adapter, &constraints, &date(2018, 0, 21)).is_none());
        assert!(state.pick(&adapter, &constraints, &NativeDate::INVALID).is_none());
        assert!(state.pick(&adapter, &constraints, &date(2018, 0, 20)).is_some());
    }

    #[test]
    fn test_retained_times() {
        let adapter = NativeDateAdapter::default();
        let constraints = Constraints::none();
        let retained = RetainedTimes {
            start: TimeOfDay::new(9, 0, 0).ok(),
            end:   TimeOfDay::new(17, 30, 0).ok(),
        };
        let state = SelectionState::new(SelectMode::Range).with_retained(retained);
        let state = state.pick(&adapter, &constraints, &date(2018, 0, 10)).unwrap();
        let state = state.pick(&adapter, &constraints, &date(2018, 0, 12)).unwrap();
        assert_eq!(
            state.selection,
            range(
                Some(date_time(2018, 0, 10, 9, 0, 0)),
                Some(date_time(2018, 0, 12, 17, 30, 0))
            )
        );

        // an earlier end time on the same day keeps the picked time
        let retained = RetainedTimes {
            start: TimeOfDay::new(18, 0, 0).ok(),
            end:   TimeOfDay::new(8, 0, 0).ok(),
        };
        let state = SelectionState::new(SelectMode::Range).with_retained(retained);
        let state = state.pick(&adapter, &constraints, &date(2018, 0, 10)).unwrap();
        let state = state.pick(&adapter, &constraints, &date_time(2018, 0, 10, 20, 0, 0)).unwrap();
        assert_eq!(state.selection.to(), Some(&date_time(2018, 0, 10, 20, 0, 0)));
    }

    #[test]
    fn test_apply_time() {
        let adapter = NativeDateAdapter::default();
        let constraints = Constraints::none();
        let state = SelectionState::new(SelectMode::Range)
            .with_selection(range(Some(date(2018, 0, 10)), Some(date(2018, 0, 12))));

        let moved = state
            .apply_time(&adapter, &constraints, &date_time(2018, 0, 10, 10, 0, 0))
            .unwrap();
        assert_eq!(moved.selection.from(), Some(&date_time(2018, 0, 10, 10, 0, 0)));
        assert_eq!(moved.retained.start, TimeOfDay::new(10, 0, 0).ok());

        let crossed = state
            .with_active(ActiveSide::To)
            .apply_time(&adapter, &constraints, &date(2018, 0, 9))
            .unwrap();
        assert_eq!(crossed.selection, range(Some(date(2018, 0, 9)), Some(date(2018, 0, 9))));

        let single = SelectionState::new(SelectMode::Single)
            .apply_time(&adapter, &constraints, &date_time(2018, 0, 1, 1, 2, 3))
            .unwrap();
        assert_eq!(single.selection, Selection::Single(Some(date_time(2018, 0, 1, 1, 2, 3))));
    }

    #[test]
    fn test_span_bounds() {
        struct TestCase {
            state:    SelectionState<NativeDate>,
            side:     Option<ActiveSide>,
            expected: (Option<NativeDate>, Option<NativeDate>),
        }

        let adapter = NativeDateAdapter::default();
        let min = date(2017, 0, 1);
        let max = date(2018, 5, 1);
        let awaiting = range(Some(date_time(2018, 0, 10, 12, 0, 0)), None);
        let complete = range(Some(date(2018, 0, 10)), Some(date(2018, 0, 20)));
        let cases = [
            TestCase {
                state:    SelectionState::new(SelectMode::Range).with_selection(awaiting.clone()),
                side:     Some(ActiveSide::To),
                expected: (Some(min), Some(date_time(2018, 0, 15, 23, 59, 59))),
            },
            TestCase {
                state:    SelectionState::new(SelectMode::Range).with_selection(complete.clone()),
                side:     None,
                expected: (Some(min), Some(max)),
            },
            TestCase {
                state:    SelectionState::new(SelectMode::Range).with_selection(complete.clone()),
                side:     Some(ActiveSide::To),
                expected: (Some(min), Some(date_time(2018, 0, 15, 23, 59, 59))),
            },
            TestCase {
                state:    SelectionState::new(SelectMode::RangeFrom).with_selection(complete.clone()),
                side:     Some(ActiveSide::From),
                expected: (Some(date(2018, 0, 15)), Some(max)),
            },
            TestCase {
                state:    SelectionState::new(SelectMode::RangeFrom).with_selection(awaiting),
                side:     Some(ActiveSide::From),
                expected: (Some(min), Some(max)),
            },
            TestCase {
                state:    SelectionState::new(SelectMode::Single),
                side:     Some(ActiveSide::To),
                expected: (Some(min), Some(max)),
            },
        ];

        for (i, case) in cases.iter().enumerate() {
            let bounds = case
                .state
                .span_bounds(&adapter, case.side, Some(&min), Some(&max), Some(5));
            assert_eq!(bounds, case.expected, "case {i}");
        }

        // a tighter configured bound wins over the limit
        let state = SelectionState::new(SelectMode::Range).with_selection(complete);
        let tight = date(2018, 0, 12);
        assert_eq!(
            state.span_bounds(&adapter, Some(ActiveSide::To), None, Some(&tight), Some(5)),
            (None, Some(tight))
        );
        assert_eq!(
            state.span_bounds(&adapter, Some(ActiveSide::To), None, None, None),
            (None, None)
        );
    }

    #[test]
    fn test_picked_and_edited_side() {
        let empty = SelectionState::<NativeDate>::new(SelectMode::Range);
        assert_eq!(empty.picked_side(), None);
        let awaiting = empty.clone().with_selection(range(Some(date(2018, 0, 10)), None));
        assert_eq!(awaiting.picked_side(), Some(ActiveSide::To));
        assert_eq!(awaiting.edited_side(), Some(ActiveSide::From));
        assert_eq!(
            SelectionState::<NativeDate>::new(SelectMode::RangeFrom).picked_side(),
            Some(ActiveSide::From)
        );
        assert_eq!(
            SelectionState::<NativeDate>::new(SelectMode::RangeTo).picked_side(),
            Some(ActiveSide::To)
        );
        assert_eq!(SelectionState::<NativeDate>::new(SelectMode::Single).edited_side(), None);
    }

    #[test]
    fn test_compose_with_time() {
        let adapter = NativeDateAdapter::default();
        let pivot = date_time(2018, 0, 31, 14, 5, 9);
        let composed = compose_with_time(&adapter, &Constraints::none(), &date(2018, 1, 3), &pivot).unwrap();
        assert_eq!(composed, date_time(2018, 1, 3, 14, 5, 9));

        let constraints = Constraints {
            min:    Some(date_time(2018, 1, 3, 16, 0, 0)),
            max:    None,
            filter: None,
        };
        let clamped = compose_with_time(&adapter, &constraints, &date(2018, 1, 3), &pivot).unwrap();
        assert_eq!(clamped, date_time(2018, 1, 3, 16, 0, 0));
        assert!(compose_with_time(&adapter, &constraints, &NativeDate::INVALID, &pivot).is_err());
    }
}

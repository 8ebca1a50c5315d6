//! Keyboard movement of the pivot inside a grid.

use log::trace;
use serde::{Deserialize, Serialize};

use crate::adapter::DateTimeAdapter;
use crate::calendar::GridContext;
use crate::consts::{DAYS_PER_WEEK, DECEMBER, JANUARY, LONG_JUMP, MONTHS_PER_ROW};
use crate::prelude::*;
use crate::types::CalendarView;

/// Keys the grids react to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Display, Serialize, Deserialize)]
pub enum NavKey {
    #[display(fmt = "ArrowLeft")]
    Left,
    #[display(fmt = "ArrowRight")]
    Right,
    #[display(fmt = "ArrowUp")]
    Up,
    #[display(fmt = "ArrowDown")]
    Down,
    #[display(fmt = "Home")]
    Home,
    #[display(fmt = "End")]
    End,
    #[display(fmt = "PageUp")]
    PageUp,
    #[display(fmt = "PageDown")]
    PageDown,
    #[display(fmt = "Enter")]
    Enter,
}

impl NavKey {
    /// Maps a DOM `KeyboardEvent.key` name.
    pub fn from_key_name(name: &str) -> Option<Self> {
        Some(match name {
            "ArrowLeft" => Self::Left,
            "ArrowRight" => Self::Right,
            "ArrowUp" => Self::Up,
            "ArrowDown" => Self::Down,
            "Home" => Self::Home,
            "End" => Self::End,
            "PageUp" => Self::PageUp,
            "PageDown" => Self::PageDown,
            "Enter" => Self::Enter,
            _ => return None,
        })
    }
}

/// A key with its Alt modifier.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct KeyPress {
    pub key: NavKey,
    pub alt: bool,
}

impl KeyPress {
    pub const fn alt(key: NavKey) -> Self {
        Self { key, alt: true }
    }
}

impl From<NavKey> for KeyPress {
    fn from(key: NavKey) -> Self {
        Self { key, alt: false }
    }
}

/// Result of a key press.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Navigation<D> {
    /// The pivot moved, already clamped into bounds
    Moved(D),
    /// Enter: commit the pivot
    Commit(D),
}

enum Step {
    Days(i64),
    Months(i32),
    Years(i32),
}

impl<A: DateTimeAdapter> GridContext<'_, A> {
    /// Moves the pivot for `press` in `view`.
    pub fn navigate(&self, view: CalendarView, pivot: &A::Date, press: KeyPress) -> Navigation<A::Date> {
        let adapter = self.adapter;
        let week = i64::from(DAYS_PER_WEEK);
        let months_per_row = MONTHS_PER_ROW as i32;
        let window = self.years_per_window() as i32;
        let row = self.years_per_row as i32;

        let step = match (view, press.key) {
            (_, NavKey::Enter) => return Navigation::Commit(pivot.clone()),

            (CalendarView::Month, NavKey::Left) => Step::Days(-1),
            (CalendarView::Month, NavKey::Right) => Step::Days(1),
            (CalendarView::Month, NavKey::Up) => Step::Days(-week),
            (CalendarView::Month, NavKey::Down) => Step::Days(week),
            (CalendarView::Month, NavKey::Home) => Step::Days(1 - i64::from(adapter.day(pivot))),
            (CalendarView::Month, NavKey::End) => Step::Days(
                i64::from(adapter.num_days_in_month(pivot)) - i64::from(adapter.day(pivot)),
            ),
            (CalendarView::Month, NavKey::PageUp) if press.alt => Step::Years(-1),
            (CalendarView::Month, NavKey::PageDown) if press.alt => Step::Years(1),
            (CalendarView::Month, NavKey::PageUp) => Step::Months(-1),
            (CalendarView::Month, NavKey::PageDown) => Step::Months(1),

            (CalendarView::Year, NavKey::Left) => Step::Months(-1),
            (CalendarView::Year, NavKey::Right) => Step::Months(1),
            (CalendarView::Year, NavKey::Up) => Step::Months(-months_per_row),
            (CalendarView::Year, NavKey::Down) => Step::Months(months_per_row),
            (CalendarView::Year, NavKey::Home) => Step::Months(JANUARY as i32 - adapter.month(pivot) as i32),
            (CalendarView::Year, NavKey::End) => Step::Months(DECEMBER as i32 - adapter.month(pivot) as i32),
            (CalendarView::Year, NavKey::PageUp) => Step::Years(if press.alt { -LONG_JUMP } else { -1 }),
            (CalendarView::Year, NavKey::PageDown) => Step::Years(if press.alt { LONG_JUMP } else { 1 }),

            (CalendarView::MultiYears, NavKey::Left) => Step::Years(-1),
            (CalendarView::MultiYears, NavKey::Right) => Step::Years(1),
            (CalendarView::MultiYears, NavKey::Up) => Step::Years(-row),
            (CalendarView::MultiYears, NavKey::Down) => Step::Years(row),
            (CalendarView::MultiYears, NavKey::Home) => {
                Step::Years(-(self.window_offset(adapter.year(pivot)) as i32))
            },
            (CalendarView::MultiYears, NavKey::End) => {
                Step::Years(window - 1 - self.window_offset(adapter.year(pivot)) as i32)
            },
            (CalendarView::MultiYears, NavKey::PageUp) => {
                Step::Years(-window * if press.alt { LONG_JUMP } else { 1 })
            },
            (CalendarView::MultiYears, NavKey::PageDown) => {
                Step::Years(window * if press.alt { LONG_JUMP } else { 1 })
            },
        };

        let moved = match step {
            Step::Days(n) => adapter.add_calendar_days(pivot, n),
            Step::Months(n) => adapter.add_calendar_months(pivot, n),
            Step::Years(n) => adapter.add_calendar_years(pivot, n),
        };
        let moved = self.constraints.clamp(adapter, &moved);
        trace!("{view} {}{} moved pivot to {moved:?}", if press.alt { "Alt+" } else { "" }, press.key);
        Navigation::Moved(moved)
    }
}

//! Quiescence debounce for typed spinner input.

use std::time::{Duration, Instant};

use log::trace;

use crate::consts::INPUT_DEBOUNCE_MS;

#[derive(Debug, Clone)]
struct Pending<T> {
    value:      T,
    last_input: Instant,
}

/// Holds the latest pushed value until input has been quiet for the window.
///
/// Each push restarts the window and replaces the buffered value, so only the
/// last value is ever released. The caller supplies the clock.
#[derive(Debug, Clone)]
pub struct Debouncer<T> {
    window:  Duration,
    pending: Option<Pending<T>>,
}

impl<T> Default for Debouncer<T> {
    fn default() -> Self {
        Self::new(Duration::from_millis(INPUT_DEBOUNCE_MS))
    }
}

impl<T> Debouncer<T> {
    pub const fn new(window: Duration) -> Self {
        Self {
            window,
            pending: None,
        }
    }

    pub const fn window(&self) -> Duration {
        self.window
    }

    /// Buffers `value`, discarding any earlier one, and restarts the window.
    pub fn push(&mut self, value: T, now: Instant) {
        if self.pending.is_some() {
            trace!("debounce restarted");
        }
        self.pending = Some(Pending {
            value,
            last_input: now,
        });
    }

    /// Releases the buffered value once the window has elapsed.
    pub fn poll(&mut self, now: Instant) -> Option<T> {
        let elapsed = self
            .pending
            .as_ref()
            .is_some_and(|p| now.saturating_duration_since(p.last_input) >= self.window);
        if elapsed { self.flush() } else { None }
    }

    /// Releases the buffered value immediately, as on blur.
    pub fn flush(&mut self) -> Option<T> {
        self.pending.take().map(|p| p.value)
    }

    /// Drops the buffered value.
    pub fn cancel(&mut self) {
        self.pending = None;
    }

    pub const fn is_pending(&self) -> bool {
        self.pending.is_some()
    }

    /// When the buffered value becomes due
    pub fn deadline(&self) -> Option<Instant> {
        self.pending.as_ref().map(|p| p.last_input + self.window)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const MS: Duration = Duration::from_millis(1);

    #[test]
    fn test_only_latest_value_fires_after_quiet_window() {
        let start = Instant::now();
        let mut debouncer = Debouncer::default();
        assert_eq!(debouncer.window(), 750 * MS);

        debouncer.push("1", start);
        debouncer.push("12", start + 500 * MS);
        assert_eq!(debouncer.poll(start + 900 * MS), None);
        assert_eq!(debouncer.deadline(), Some(start + 1250 * MS));
        assert_eq!(debouncer.poll(start + 1250 * MS), Some("12"));
        assert!(!debouncer.is_pending());
        assert_eq!(debouncer.poll(start + 5000 * MS), None);
    }

    #[test]
    fn test_flush_and_cancel() {
        let start = Instant::now();
        let mut debouncer = Debouncer::new(100 * MS);
        debouncer.push(7, start);
        assert_eq!(debouncer.flush(), Some(7));
        assert_eq!(debouncer.flush(), None);

        debouncer.push(8, start);
        debouncer.cancel();
        assert_eq!(debouncer.poll(start + 200 * MS), None);
        assert_eq!(debouncer.deadline(), None);
    }

    #[test]
    fn test_clock_going_backwards_does_not_fire() {
        let start = Instant::now() + Duration::from_secs(1);
        let mut debouncer = Debouncer::new(100 * MS);
        debouncer.push((), start);
        assert_eq!(debouncer.poll(start - 500 * MS), None);
        assert!(debouncer.is_pending());
    }
}

//! Quiet-period scheduler for coalescing rapid input.
//!
//! Time is passed in by the caller, so the debouncer owns no timer thread and
//! can be driven from an event loop or from tests.

use std::time::{Duration, Instant};

/// Quiet period before a typed search term is applied
pub const SEARCH_DEBOUNCE: Duration = Duration::from_millis(300);

/// Holds at most one pending value until its quiet period has passed
#[derive(Debug, Clone)]
pub struct Debouncer<T> {
    delay: Duration,
    pending: Option<(T, Instant)>,
}

impl<T> Debouncer<T> {
    pub fn new(delay: Duration) -> Self {
        Self {
            delay,
            pending: None,
        }
    }

    /// Schedule `value`, superseding anything still pending
    pub fn schedule(&mut self, value: T, now: Instant) {
        self.pending = Some((value, now + self.delay));
    }

    /// Drop the pending value, if any
    pub fn cancel(&mut self) -> Option<T> {
        self.pending.take().map(|(value, _)| value)
    }

    /// Yield the pending value once its deadline has passed
    pub fn poll(&mut self, now: Instant) -> Option<T> {
        let due = matches!(&self.pending, Some((_, deadline)) if now >= *deadline);
        if due {
            self.cancel()
        } else {
            None
        }
    }

    /// Yield the pending value immediately
    pub fn take(&mut self) -> Option<T> {
        self.cancel()
    }

    pub fn is_pending(&self) -> bool {
        self.pending.is_some()
    }

    /// Time left until the pending value is due
    pub fn remaining(&self, now: Instant) -> Option<Duration> {
        self.pending
            .as_ref()
            .map(|(_, deadline)| deadline.saturating_duration_since(now))
    }
}

impl<T> Default for Debouncer<T> {
    fn default() -> Self {
        Self::new(SEARCH_DEBOUNCE)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fires_after_quiet_period() {
        let start = Instant::now();
        let mut debouncer = Debouncer::default();
        debouncer.schedule("pl", start);

        assert_eq!(debouncer.poll(start + Duration::from_millis(299)), None);
        assert!(debouncer.is_pending());
        assert_eq!(debouncer.poll(start + Duration::from_millis(300)), Some("pl"));
        assert!(!debouncer.is_pending());
        assert_eq!(debouncer.poll(start + Duration::from_secs(5)), None);
    }

    #[test]
    fn test_reschedule_supersedes() {
        let start = Instant::now();
        let mut debouncer = Debouncer::new(Duration::from_millis(300));
        debouncer.schedule("pl", start);
        debouncer.schedule("pla", start + Duration::from_millis(200));

        // The first deadline passes but was superseded
        assert_eq!(debouncer.poll(start + Duration::from_millis(350)), None);
        assert_eq!(
            debouncer.remaining(start + Duration::from_millis(350)),
            Some(Duration::from_millis(150))
        );
        assert_eq!(
            debouncer.poll(start + Duration::from_millis(500)),
            Some("pla")
        );
    }

    #[test]
    fn test_cancel_and_take() {
        let start = Instant::now();
        let mut debouncer = Debouncer::default();
        debouncer.schedule(1, start);
        assert_eq!(debouncer.cancel(), Some(1));
        assert_eq!(debouncer.poll(start + Duration::from_secs(1)), None);

        debouncer.schedule(2, start);
        assert_eq!(debouncer.take(), Some(2));
        assert_eq!(debouncer.remaining(start), None);
    }
}

//! Injectable time source for merge-window decisions.
//!
//! Command timestamps are only ever compared against the merge window, so the
//! engine never reads the wall clock directly. Production code uses
//! `SystemClock`; tests use `ManualClock` to make merge-window behavior
//! deterministic instead of depending on real elapsed time.

use std::cell::Cell;
use std::time::{Duration, Instant};

/// A source of monotonic instants for command timestamps.
pub trait Clock {
    /// Current instant.
    fn now(&self) -> Instant;
}

/// The real monotonic clock.
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> Instant {
        Instant::now()
    }
}

/// A clock that only moves when told to.
///
/// All instants are derived from a base captured at construction plus an
/// explicit offset, so tests can place two commands exactly N milliseconds
/// apart without sleeping.
#[derive(Debug)]
pub struct ManualClock {
    base: Instant,
    offset: Cell<Duration>,
}

impl ManualClock {
    /// Create a clock frozen at "now".
    pub fn new() -> Self {
        Self {
            base: Instant::now(),
            offset: Cell::new(Duration::ZERO),
        }
    }

    /// Advance the clock by `delta`.
    pub fn advance(&self, delta: Duration) {
        self.offset.set(self.offset.get() + delta);
    }
}

impl Default for ManualClock {
    fn default() -> Self {
        Self::new()
    }
}

impl Clock for ManualClock {
    fn now(&self) -> Instant {
        self.base + self.offset.get()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_manual_clock_is_frozen() {
        let clock = ManualClock::new();
        let a = clock.now();
        let b = clock.now();
        assert_eq!(a, b);
    }

    #[test]
    fn test_manual_clock_advance() {
        let clock = ManualClock::new();
        let a = clock.now();
        clock.advance(Duration::from_millis(1500));
        let b = clock.now();
        assert_eq!(b.duration_since(a), Duration::from_millis(1500));
    }

    #[test]
    fn test_system_clock_monotonic() {
        let clock = SystemClock;
        let a = clock.now();
        let b = clock.now();
        assert!(b >= a);
    }
}

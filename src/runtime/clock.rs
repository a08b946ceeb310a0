//! Elapsed-time sources.

use std::time::{Duration, Instant};

/// Monotonic time since the session started.
pub trait Clock {
    /// Time elapsed since the clock was created.
    fn elapsed(&self) -> Duration;
}

/// Wall clock backed by [`Instant`].
#[derive(Clone, Copy, Debug)]
pub struct SystemClock {
    start: Instant,
}

impl SystemClock {
    /// Start counting now.
    pub fn new() -> Self {
        Self { start: Instant::now() }
    }
}

impl Default for SystemClock {
    fn default() -> Self {
        Self::new()
    }
}

impl Clock for SystemClock {
    fn elapsed(&self) -> Duration {
        self.start.elapsed()
    }
}

/// Hand-driven clock for tests and headless runs.
#[derive(Clone, Copy, Debug, Default)]
pub struct ManualClock {
    now: Duration,
}

impl ManualClock {
    /// Clock at zero.
    pub fn new() -> Self {
        Self::default()
    }

    /// Move time forward.
    pub fn advance(&mut self, by: Duration) {
        self.now += by;
    }

    /// Jump to an absolute time. Never goes backwards.
    pub fn set(&mut self, now: Duration) {
        self.now = self.now.max(now);
    }
}

impl Clock for ManualClock {
    fn elapsed(&self) -> Duration {
        self.now
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_manual_clock_is_monotonic() {
        let mut clock = ManualClock::new();
        clock.advance(Duration::from_millis(40));
        clock.set(Duration::from_millis(10));
        assert_eq!(clock.elapsed(), Duration::from_millis(40));
        clock.set(Duration::from_millis(100));
        assert_eq!(clock.elapsed(), Duration::from_millis(100));
    }

    #[test]
    fn test_system_clock_advances() {
        let clock = SystemClock::new();
        let a = clock.elapsed();
        let b = clock.elapsed();
        assert!(b >= a);
    }
}

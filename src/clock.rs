//! Time source for the scheduler.
//!
//! The scheduler never reads `Instant` directly: it asks a [`Clock`] for the
//! time since startup and asks the same clock to yield between iterations.
//! [`SystemClock`] does this for real; [`ManualClock`] just moves a counter,
//! which makes transitions and animation progress reproducible in tests and
//! headless runs.

use std::thread;
use std::time::{Duration, Instant};

/// Monotonic time source with a yield primitive.
pub trait Clock {
    /// Time elapsed since the clock was created.
    fn now(&self) -> Duration;

    /// Give up the processor for `duration`.
    fn sleep(&mut self, duration: Duration);
}

/// Wall clock backed by `Instant` and `thread::sleep`.
pub struct SystemClock {
    start: Instant,
}

impl SystemClock {
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
    fn now(&self) -> Duration {
        self.start.elapsed()
    }

    fn sleep(&mut self, duration: Duration) {
        thread::sleep(duration);
    }
}

/// Logical clock: time only moves when someone sleeps or calls [`ManualClock::advance`].
#[derive(Clone, Copy, Debug, Default)]
pub struct ManualClock {
    now: Duration,
}

impl ManualClock {
    pub const fn new() -> Self {
        Self { now: Duration::ZERO }
    }

    /// Move time forward without sleeping.
    pub fn advance(&mut self, by: Duration) {
        self.now = self.now.saturating_add(by);
    }
}

impl Clock for ManualClock {
    fn now(&self) -> Duration {
        self.now
    }

    fn sleep(&mut self, duration: Duration) {
        self.advance(duration);
    }
}

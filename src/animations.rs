//! Time-bounded value animations bound to a widget.
//!
//! The init screen sweeps its progress bar from 0 to 100 over
//! [`PROGRESS_DURATION`](crate::config::PROGRESS_DURATION). Once started, an
//! animation belongs to the widget tree ([`Root`](crate::widgets::Root)): the
//! tree advances it every frame, writes the value into the bar and drops it
//! when it finishes or when its widget is deleted. Nothing outside the tree
//! polls or cancels it.
//!
//! # Path
//!
//! Values follow a linear path, the toolkit default:
//! ```text
//! value = start + (end - start) * elapsed / duration
//! ```
//! The math is integer-only on milliseconds, so the value lands exactly on
//! `end` when `elapsed == duration` and never leaves the `[start, end]` range.
//!
//! # Completion
//!
//! Owners that need to react to completion poll
//! [`Root::animation_running`](crate::widgets::Root::animation_running) or
//! [`Animation::is_finished`] rather than guessing from wall-clock time.

use std::time::Duration;

use crate::widgets::WidgetId;

// =============================================================================
// Animation
// =============================================================================

/// One value animation targeting one widget.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Animation {
    target: WidgetId,
    start: i32,
    end: i32,
    duration: Duration,
    elapsed: Duration,
}

impl Animation {
    /// Animate `target` from `start` to `end` over `duration`.
    pub const fn new(target: WidgetId, start: i32, end: i32, duration: Duration) -> Self {
        Self {
            target,
            start,
            end,
            duration,
            elapsed: Duration::ZERO,
        }
    }

    /// Widget this animation writes to.
    #[inline]
    pub const fn target(&self) -> WidgetId {
        self.target
    }

    /// Time advanced so far (saturates at `duration`).
    #[inline]
    pub const fn elapsed(&self) -> Duration {
        self.elapsed
    }

    /// Current value on the linear path.
    pub fn value(&self) -> i32 {
        let total = self.duration.as_millis();
        if total == 0 || self.elapsed >= self.duration {
            return self.end;
        }

        let done = self.elapsed.as_millis();
        let span = i128::from(self.end) - i128::from(self.start);
        // done < total, so the quotient magnitude stays below |span|
        let step = span * done as i128 / total as i128;
        (i128::from(self.start) + step) as i32
    }

    /// Advance by `dt` and return the new value.
    pub fn advance(&mut self, dt: Duration) -> i32 {
        self.elapsed = self.elapsed.saturating_add(dt).min(self.duration);
        self.value()
    }

    /// Whether the full duration has elapsed.
    #[inline]
    pub fn is_finished(&self) -> bool {
        self.elapsed >= self.duration
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

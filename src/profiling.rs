//! Frame timing statistics for the scheduler loop.
//!
//! The scheduler records one sample per iteration: total iteration time, the
//! part spent in the backend (input, animations, painting) and the yield.
//! Nothing is shown on screen; a summary is logged at shutdown and on demand.
//!
//! # Usage
//!
//! ```ignore
//! let mut metrics = FrameMetrics::new();
//!
//! // In the scheduler loop:
//! let frame_start = clock.now();
//! let painted = backend.process_frame(&mut root, frame_start);
//! let work = clock.now() - frame_start;
//! clock.sleep(TICK_INTERVAL);
//! metrics.record_frame(clock.now() - frame_start, work, TICK_INTERVAL, painted);
//!
//! // At shutdown:
//! metrics.log_summary(clock.now());
//! ```
//!
//! All times come from the scheduler's [`Clock`](crate::clock::Clock), so runs
//! on a `ManualClock` produce reproducible numbers.

use std::fmt::Write as _;
use std::time::Duration;

use heapless::String;
use tracing::info;

/// Frame timing and repaint statistics.
pub struct FrameMetrics {
    // Frame timing (microseconds for precision)
    /// Total iteration time (work + sleep + overhead)
    pub frame_time_us: u32,
    /// Time spent in the backend
    pub work_time_us: u32,
    /// Time spent yielding
    pub sleep_time_us: u32,

    // Statistics (computed over time)
    /// Minimum frame time observed
    pub frame_time_min_us: u32,
    /// Maximum frame time observed
    pub frame_time_max_us: u32,
    /// Rolling average frame time (simple exponential moving average)
    frame_time_avg_us: f32,

    // Counters
    /// Iterations recorded since startup
    pub total_frames: u64,
    /// Iterations that repainted the surface (low when idle frames are skipped)
    pub frames_painted: u64,
    /// Screen transitions performed
    pub transitions: u32,
}

impl FrameMetrics {
    pub const fn new() -> Self {
        Self {
            frame_time_us: 0,
            work_time_us: 0,
            sleep_time_us: 0,
            frame_time_min_us: u32::MAX,
            frame_time_max_us: 0,
            frame_time_avg_us: 0.0,
            total_frames: 0,
            frames_painted: 0,
            transitions: 0,
        }
    }

    /// Exponential moving average alpha (0.1 for smooth updates).
    const EMA_ALPHA: f32 = 0.1;

    /// Record timing for one scheduler iteration.
    pub fn record_frame(&mut self, total_time: Duration, work_time: Duration, sleep_time: Duration, painted: bool) {
        let total_us = micros(total_time);

        self.frame_time_us = total_us;
        self.work_time_us = micros(work_time);
        self.sleep_time_us = micros(sleep_time);

        self.frame_time_min_us = self.frame_time_min_us.min(total_us);
        self.frame_time_max_us = self.frame_time_max_us.max(total_us);

        if self.total_frames == 0 {
            self.frame_time_avg_us = total_us as f32;
        } else {
            self.frame_time_avg_us =
                Self::EMA_ALPHA.mul_add(total_us as f32, (1.0 - Self::EMA_ALPHA) * self.frame_time_avg_us);
        }

        self.total_frames += 1;
        if painted {
            self.frames_painted += 1;
        }
    }

    #[inline]
    pub const fn inc_transitions(&mut self) {
        self.transitions += 1;
    }

    /// Average frame time in microseconds.
    #[inline]
    pub const fn frame_time_avg_us(&self) -> u32 {
        self.frame_time_avg_us as u32
    }

    /// Log the collected statistics at `info` level.
    pub fn log_summary(&self, uptime: Duration) {
        let min = if self.total_frames == 0 { 0 } else { self.frame_time_min_us };
        info!(
            uptime = %uptime_string(uptime),
            frames = self.total_frames,
            painted = self.frames_painted,
            transitions = self.transitions,
            avg_us = self.frame_time_avg_us(),
            min_us = min,
            max_us = self.frame_time_max_us,
            "frame statistics"
        );
    }
}

impl Default for FrameMetrics {
    fn default() -> Self {
        Self::new()
    }
}

/// Format `uptime` as HH:MM:SS.
pub fn uptime_string(uptime: Duration) -> String<12> {
    let secs = uptime.as_secs();
    let mut s = String::new();
    // Fits: hours are capped well below 12 digits
    write!(s, "{:02}:{:02}:{:02}", (secs / 3600).min(99_999), (secs % 3600) / 60, secs % 60).ok();
    s
}

fn micros(d: Duration) -> u32 {
    u32::try_from(d.as_micros()).unwrap_or(u32::MAX)
}

// =============================================================================
// Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_frame_metrics_new() {
        let metrics = FrameMetrics::new();
        assert_eq!(metrics.total_frames, 0);
        assert_eq!(metrics.frame_time_us, 0);
        assert_eq!(metrics.frame_time_min_us, u32::MAX);
        assert_eq!(metrics.frame_time_max_us, 0);
    }

    #[test]
    fn test_record_frame() {
        let mut metrics = FrameMetrics::new();
        metrics.record_frame(
            Duration::from_micros(1200),
            Duration::from_micros(200),
            Duration::from_micros(1000),
            true,
        );

        assert_eq!(metrics.total_frames, 1);
        assert_eq!(metrics.frames_painted, 1);
        assert_eq!(metrics.frame_time_us, 1200);
        assert_eq!(metrics.work_time_us, 200);
        assert_eq!(metrics.sleep_time_us, 1000);
        assert_eq!(metrics.frame_time_avg_us(), 1200);
    }

    #[test]
    fn test_frame_min_max() {
        let mut metrics = FrameMetrics::new();
        for (total, painted) in [(2000, true), (1500, false), (2500, false)] {
            metrics.record_frame(Duration::from_micros(total), Duration::ZERO, Duration::ZERO, painted);
        }

        assert_eq!(metrics.frame_time_min_us, 1500);
        assert_eq!(metrics.frame_time_max_us, 2500);
        assert_eq!(metrics.total_frames, 3);
        assert_eq!(metrics.frames_painted, 1);
    }

    #[test]
    fn test_huge_frame_saturates() {
        let mut metrics = FrameMetrics::new();
        metrics.record_frame(Duration::from_secs(10_000), Duration::ZERO, Duration::ZERO, false);
        assert_eq!(metrics.frame_time_us, u32::MAX);
    }

    #[test]
    fn test_uptime_string_format() {
        assert_eq!(uptime_string(Duration::ZERO).as_str(), "00:00:00");
        assert_eq!(uptime_string(Duration::from_secs(3 * 3600 + 25 * 60 + 7)).as_str(), "03:25:07");
    }
}

//! Application configuration.
//!
//! Two layers:
//! - Compile-time constants for the display geometry, widget layout and timing.
//! - [`Settings`], parsed from the command line with `clap`, for the values an
//!   operator tunes between matches (transition delay, routine list, window scale).

use std::time::Duration;

use clap::Parser;

use crate::scheduler::TransitionDelay;

// =============================================================================
// Display Configuration
// =============================================================================

/// Brain display width in pixels.
pub const SCREEN_WIDTH: u32 = 480;

/// Brain display height in pixels.
pub const SCREEN_HEIGHT: u32 = 272;

/// Window title for the desktop simulator.
pub const WINDOW_TITLE: &str = "ReAuto";

// =============================================================================
// Layout Configuration
// =============================================================================

/// Vertical distance of the init title (up) and progress bar (down) from center.
pub const TITLE_INIT_OFFSET: i32 = 25;

/// Static version string shown bottom-left on the init screen.
pub const VERSION_TEXT: &str = "ReAuto v1.0.0";

/// Init screen progress bar size.
pub const PROGRESS_BAR_WIDTH: u32 = 220;
pub const PROGRESS_BAR_HEIGHT: u32 = 20;

/// Selector title offset from the top-left corner.
pub const SELECT_TITLE_OFFSET: (i32, i32) = (30, 25);

/// Routine button size on the selector screen.
pub const ROUTINE_BUTTON_WIDTH: u32 = 200;
pub const ROUTINE_BUTTON_HEIGHT: u32 = 50;

/// Vertical gap between stacked routine buttons.
pub const ROUTINE_BUTTON_GAP: i32 = 10;

// =============================================================================
// Capacity Configuration
// =============================================================================

/// Maximum number of selectable routines: as many 50 px buttons as fit
/// between the selector title and the bottom edge.
pub const MAX_ROUTINES: usize = 3;

/// Maximum bytes of text in a single label.
pub const LABEL_CAPACITY: usize = 32;

// =============================================================================
// Timing Configuration
// =============================================================================

/// Progress animation sweep time on the init screen.
pub const PROGRESS_DURATION: Duration = Duration::from_millis(2000);

/// Processor yield per scheduler iteration.
pub const TICK_INTERVAL: Duration = Duration::from_millis(1);

/// Scheduler iterations spent on the init screen before the selector appears.
/// At `TICK_INTERVAL` this roughly matches `PROGRESS_DURATION`.
pub const DEFAULT_TRANSITION_TICKS: u64 = 2000;

/// Routine label used when none is given on the command line.
pub const DEFAULT_ROUTINE: &str = "Auto A";

// =============================================================================
// Runtime Settings
// =============================================================================

/// Command-line settings for the display controller.
#[derive(Parser, Debug, Clone)]
#[command(name = "auton-display")]
#[command(about = "Robot boot screen and autonomous routine selector", long_about = None)]
pub struct Settings {
    /// Scheduler ticks to stay on the init screen
    #[arg(long, value_name = "TICKS", default_value_t = DEFAULT_TRANSITION_TICKS, conflicts_with = "transition_ms")]
    pub transition_ticks: u64,

    /// Wall-clock milliseconds to stay on the init screen (instead of ticks)
    #[arg(long, value_name = "MS")]
    pub transition_ms: Option<u64>,

    /// Routine label shown on the selector (repeat for several routines)
    #[arg(long = "routine", value_name = "LABEL", default_value = DEFAULT_ROUTINE)]
    pub routines: Vec<String>,

    /// Window pixel scale
    #[arg(long, default_value_t = 2, value_parser = clap::value_parser!(u32).range(1..=8))]
    pub scale: u32,

    /// Render off-screen without opening a window
    #[arg(long)]
    pub headless: bool,

    /// Quit after this many ticks (headless runs)
    #[arg(long, value_name = "TICKS")]
    pub max_ticks: Option<u64>,
}

impl Settings {
    /// Transition predicate configured by the command line.
    pub fn transition_delay(&self) -> TransitionDelay {
        match self.transition_ms {
            Some(ms) => TransitionDelay::Elapsed(Duration::from_millis(ms)),
            None => TransitionDelay::Ticks(self.transition_ticks),
        }
    }
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            transition_ticks: DEFAULT_TRANSITION_TICKS,
            transition_ms: None,
            routines: vec![DEFAULT_ROUTINE.to_string()],
            scale: 2,
            headless: false,
            max_ticks: None,
        }
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

//! Process bootstrap: surface, input, styles, scheduler.
//!
//! # Startup Order
//!
//! 1. Build the routine registry from the settings
//! 2. Create the 480x272 surface (fatal on failure)
//! 3. Attach input devices
//! 4. Initialize styles
//! 5. Start the scheduler (init screen shown) and run it
//!
//! A surface failure stops startup before any style or screen exists and
//! maps to [`EXIT_SURFACE_FAILED`].

use anyhow::{Context, Result};
use embedded_graphics::prelude::Size;
use tracing::{error, info};

use crate::backend::Backend;
use crate::clock::Clock;
use crate::config::{SCREEN_HEIGHT, SCREEN_WIDTH, Settings, WINDOW_TITLE};
use crate::routines::RoutineRegistry;
use crate::scheduler::Scheduler;
use crate::styles::{AccentColor, StyleSet};

/// Normal shutdown through a quit request.
pub const EXIT_OK: u8 = crate::scheduler::EXIT_OK;

/// Bad command-line configuration (same code clap uses for usage errors).
pub const EXIT_BAD_CONFIG: u8 = 2;

/// Surface creation failed; `-1` as seen by an 8-bit process status.
pub const EXIT_SURFACE_FAILED: u8 = 255;

/// Registry for the `--routine` labels in `settings`.
pub fn routines_from(settings: &Settings) -> Result<RoutineRegistry> {
    RoutineRegistry::from_labels(&settings.routines)
        .with_context(|| format!("{} routines given", settings.routines.len()))
}

/// Create the surface, attach input, initialize styles and start the scheduler.
pub fn boot<B, C>(mut backend: B, clock: C, settings: &Settings, routines: RoutineRegistry) -> Result<Scheduler<B, C>>
where
    B: Backend,
    C: Clock,
{
    backend
        .create_surface(Size::new(SCREEN_WIDTH, SCREEN_HEIGHT), WINDOW_TITLE)
        .context("failed to create display surface")?;
    backend.attach_input_devices();

    let styles = StyleSet::init(AccentColor::default());
    info!(routines = routines.len(), "display controller ready");

    let mut scheduler = Scheduler::new(backend, clock, styles, routines, settings.transition_delay());
    scheduler.start();
    Ok(scheduler)
}

/// Boot and run until quit. Returns the process exit code.
pub fn run<B, C>(backend: B, clock: C, settings: &Settings) -> u8
where
    B: Backend,
    C: Clock,
{
    let routines = match routines_from(settings) {
        Ok(routines) => routines,
        Err(err) => {
            error!("invalid configuration: {err:#}");
            return EXIT_BAD_CONFIG;
        }
    };

    match boot(backend, clock, settings, routines) {
        Ok(scheduler) => scheduler.run(),
        Err(err) => {
            error!("startup failed: {err:#}");
            EXIT_SURFACE_FAILED
        }
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

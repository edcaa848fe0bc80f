//! Robot display controller entry point.
//!
//! Parses [`Settings`], sets up logging and hands the chosen backend to
//! [`app::run`]. Log verbosity follows `RUST_LOG` (default `info`).

use std::process::ExitCode;

use auton_display::app;
use auton_display::backend::HeadlessBackend;
use auton_display::clock::SystemClock;
use auton_display::config::Settings;
use clap::Parser;
use tracing::info;
use tracing_subscriber::EnvFilter;

fn main() -> ExitCode {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    let settings = Settings::parse();
    info!(version = env!("CARGO_PKG_VERSION"), headless = settings.headless, "starting");

    let code = if settings.headless {
        run_headless(&settings)
    } else {
        run_window(&settings)
    };
    ExitCode::from(code)
}

fn run_headless(settings: &Settings) -> u8 {
    let backend = HeadlessBackend::new().with_max_frames(settings.max_ticks);
    app::run(backend, SystemClock::new(), settings)
}

#[cfg(feature = "window")]
fn run_window(settings: &Settings) -> u8 {
    use auton_display::backend::WindowBackend;

    app::run(WindowBackend::new(settings.scale), SystemClock::new(), settings)
}

#[cfg(not(feature = "window"))]
fn run_window(settings: &Settings) -> u8 {
    tracing::warn!("built without the `window` feature, rendering headless");
    run_headless(settings)
}

#![allow(clippy::cast_possible_truncation)] // u32->i32 and i128->i32 casts for pixel and animation math
#![allow(clippy::cast_precision_loss)] // u32->f32 in frame statistics
#![allow(clippy::cast_possible_wrap)] // u32->i32 wrapping is acceptable for screen-sized values
#![allow(clippy::cast_sign_loss)] // i32->u32 where we know sign is positive

//! Display controller for a competition robot's brain screen (480x272).
//!
//! Shows an "Initializing" screen with an animated progress bar while the
//! robot boots, then switches to the autonomous routine selector. Everything
//! runs on one thread in a single polling loop.
//!
//! # Module Map
//!
//! | Module | Role |
//! |--------|------|
//! | [`colors`] | Palette (`Rgb565`) and opacity blending |
//! | [`config`] | Geometry/timing constants and command-line [`Settings`](config::Settings) |
//! | [`styles`] | Named style registry shared by every screen |
//! | [`widgets`] | Retained widget tree: labels, bars, buttons, input, animations |
//! | [`animations`] | Linear value animation driving the progress bar |
//! | [`render`] | Paints the widget tree into any `DrawTarget` |
//! | [`screens`] | Init screen and autonomous selector |
//! | [`routines`] | Routine registry and the published selection |
//! | [`clock`] | Injectable time source |
//! | [`backend`] | Surface, input and frame processing (headless or SDL window) |
//! | [`scheduler`] | Screen state machine and the main loop |
//! | [`profiling`] | Frame timing statistics |
//! | [`app`] | Bootstrap and exit codes |
//!
//! # Data Flow
//!
//! ```text
//! app::boot ─▶ Backend::create_surface ─▶ StyleSet::init ─▶ Scheduler::start (InitScreen)
//!                                                                │
//!          ┌──────────────── Scheduler::step (every TICK_INTERVAL) ◀┘
//!          ▼
//!   Backend::process_frame ─▶ Screen::on_frame ─▶ TransitionDelay::is_due ─▶ AutonSelectScreen
//! ```

pub mod animations;
pub mod app;
pub mod backend;
pub mod clock;
pub mod colors;
pub mod config;
pub mod profiling;
pub mod render;
pub mod routines;
pub mod scheduler;
pub mod screens;
pub mod styles;
pub mod widgets;

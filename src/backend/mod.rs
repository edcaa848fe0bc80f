//! Rendering and windowing backends.
//!
//! A [`Backend`] is everything the scheduler needs from the platform:
//!
//! | Operation | Purpose |
//! |-----------|---------|
//! | [`create_surface`](Backend::create_surface) | Create the 480x272 render target (may fail) |
//! | [`attach_input_devices`](Backend::attach_input_devices) | Route pointer input into the widget tree |
//! | [`process_frame`](Backend::process_frame) | One non-blocking frame: input, animations, paint |
//! | [`quit_requested`](Backend::quit_requested) | Polled once per scheduler iteration |
//!
//! # Implementations
//!
//! - [`HeadlessBackend`]: off-screen framebuffer with scripted input. Used by
//!   `--headless` and by the end-to-end tests.
//! - [`WindowBackend`] (feature `window`): desktop SDL window via
//!   `embedded-graphics-simulator`.

mod headless;
#[cfg(feature = "window")]
mod window;

use std::fmt;
use std::time::Duration;

use embedded_graphics::prelude::{Point, Size};
use tracing::trace;

pub use headless::HeadlessBackend;
#[cfg(feature = "window")]
pub use window::WindowBackend;

use crate::widgets::Root;

/// Platform services consumed by the scheduler.
pub trait Backend {
    /// Create the render target. Must succeed before any other call.
    fn create_surface(&mut self, size: Size, title: &str) -> Result<(), SurfaceError>;

    /// Start delivering pointer input to the widget tree.
    fn attach_input_devices(&mut self);

    /// Process one frame at time `now`: apply pending input, advance
    /// animations, repaint if needed. Returns `true` if the surface was repainted.
    ///
    /// Must return promptly.
    fn process_frame(&mut self, root: &mut Root, now: Duration) -> bool;

    /// Whether the platform asked the application to shut down.
    fn quit_requested(&self) -> bool;
}

/// Surface creation failure. Fatal: the process exits before the scheduler starts.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SurfaceError {
    /// Width or height is zero.
    ZeroSize,
    /// The panel cannot show a surface this large.
    Unsupported { requested: Size, panel: Size },
    /// The window system refused to open a window.
    Window(String),
}

impl fmt::Display for SurfaceError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::ZeroSize => write!(f, "surface size must be non-zero"),
            Self::Unsupported { requested, panel } => write!(
                f,
                "surface {}x{} does not fit the {}x{} panel",
                requested.width, requested.height, panel.width, panel.height
            ),
            Self::Window(reason) => write!(f, "window creation failed: {reason}"),
        }
    }
}

impl std::error::Error for SurfaceError {}

/// Pointer or lifecycle input, as delivered by a backend.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum InputEvent {
    /// Pointer down.
    Press(Point),
    /// Pointer up.
    Release(Point),
    /// Press and release at the same point.
    Click(Point),
    /// Ask the application to shut down.
    Quit,
}

/// Apply `event` to the widget tree. Pointer input is dropped while no input
/// device is attached. Returns `true` for a quit request.
fn dispatch_input(root: &mut Root, event: InputEvent, attached: bool) -> bool {
    match event {
        InputEvent::Quit => return true,
        _ if !attached => trace!(?event, "input dropped, no device attached"),
        InputEvent::Press(point) => {
            root.press(point);
        }
        InputEvent::Release(point) => {
            root.release(point);
        }
        InputEvent::Click(point) => {
            root.press(point);
            root.release(point);
        }
    }
    false
}

/// Time since the previous frame (zero on the first one).
fn frame_delta(last: &mut Option<Duration>, now: Duration) -> Duration {
    let dt = last.map_or(Duration::ZERO, |prev| now.saturating_sub(prev));
    *last = Some(now);
    dt
}

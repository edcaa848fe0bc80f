//! Off-screen backend with scripted input.
//!
//! Renders into a [`SimulatorDisplay`] framebuffer that is never shown.
//! Pointer input comes from a script of `(frame, event)` pairs instead of a
//! mouse, so a whole boot-and-select session can run without a window.

use std::collections::VecDeque;
use std::time::Duration;

use embedded_graphics::pixelcolor::Rgb565;
use embedded_graphics::prelude::Size;
use embedded_graphics_simulator::SimulatorDisplay;
use tracing::debug;

use super::{Backend, InputEvent, SurfaceError, dispatch_input, frame_delta};
use crate::config::{SCREEN_HEIGHT, SCREEN_WIDTH};
use crate::render::RenderState;
use crate::widgets::Root;

/// Framebuffer-only backend.
pub struct HeadlessBackend {
    /// Largest surface the simulated panel accepts.
    panel: Size,
    display: Option<SimulatorDisplay<Rgb565>>,
    render: RenderState,
    last_frame: Option<Duration>,
    /// Frames processed so far.
    frame: u64,
    /// Request quit once this many frames were processed.
    max_frames: Option<u64>,
    script: VecDeque<(u64, InputEvent)>,
    input_attached: bool,
    quit: bool,
}

impl HeadlessBackend {
    /// Backend for a panel of the brain's native resolution.
    pub fn new() -> Self {
        Self::with_panel(Size::new(SCREEN_WIDTH, SCREEN_HEIGHT))
    }

    /// Backend whose panel only accepts surfaces up to `panel`.
    pub fn with_panel(panel: Size) -> Self {
        Self {
            panel,
            display: None,
            render: RenderState::new(),
            last_frame: None,
            frame: 0,
            max_frames: None,
            script: VecDeque::new(),
            input_attached: false,
            quit: false,
        }
    }

    /// Request quit after `frames` frames.
    #[must_use]
    pub fn with_max_frames(mut self, frames: Option<u64>) -> Self {
        self.max_frames = frames;
        self
    }

    /// Deliver `event` at the start of frame number `frame` (0-based).
    pub fn schedule(&mut self, frame: u64, event: InputEvent) {
        let at = self.script.partition_point(|(f, _)| *f <= frame);
        self.script.insert(at, (frame, event));
    }

    /// The framebuffer, once the surface exists.
    pub const fn display(&self) -> Option<&SimulatorDisplay<Rgb565>> {
        self.display.as_ref()
    }

    #[inline]
    pub const fn surface_created(&self) -> bool {
        self.display.is_some()
    }

    #[inline]
    pub const fn input_attached(&self) -> bool {
        self.input_attached
    }

    /// Frames processed so far.
    #[inline]
    pub const fn frames(&self) -> u64 {
        self.frame
    }

    /// Frames that actually repainted the framebuffer.
    #[inline]
    pub const fn frames_drawn(&self) -> u64 {
        self.render.frames_drawn()
    }

    fn apply_input(&mut self, root: &mut Root) {
        while let Some(&(frame, event)) = self.script.front() {
            if frame > self.frame {
                break;
            }
            self.script.pop_front();
            if dispatch_input(root, event, self.input_attached) {
                debug!(frame, "scripted quit");
                self.quit = true;
            }
        }
    }
}

impl Default for HeadlessBackend {
    fn default() -> Self {
        Self::new()
    }
}

impl Backend for HeadlessBackend {
    fn create_surface(&mut self, size: Size, title: &str) -> Result<(), SurfaceError> {
        if size.width == 0 || size.height == 0 {
            return Err(SurfaceError::ZeroSize);
        }
        if size.width > self.panel.width || size.height > self.panel.height {
            return Err(SurfaceError::Unsupported {
                requested: size,
                panel: self.panel,
            });
        }
        debug!(width = size.width, height = size.height, title, "headless surface created");
        self.display = Some(SimulatorDisplay::new(size));
        Ok(())
    }

    fn attach_input_devices(&mut self) {
        self.input_attached = true;
    }

    fn process_frame(&mut self, root: &mut Root, now: Duration) -> bool {
        self.apply_input(root);
        root.advance(frame_delta(&mut self.last_frame, now));

        let painted = match self.display.as_mut() {
            // SimulatorDisplay drawing is infallible
            Some(display) => self.render.render(root, display).unwrap_or(false),
            None => false,
        };
        self.frame += 1;
        painted
    }

    fn quit_requested(&self) -> bool {
        self.quit || self.max_frames.is_some_and(|max| self.frame >= max)
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

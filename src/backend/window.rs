//! Desktop SDL window backend.
//!
//! Stands in for the brain's touch panel: the framebuffer is shown in an
//! `embedded-graphics-simulator` window and mouse buttons act as touches.
//! The simulator already maps window coordinates back to display pixels, so
//! the pixel `scale` only affects what the operator sees.

use std::panic::{self, AssertUnwindSafe};
use std::time::Duration;

use embedded_graphics::pixelcolor::Rgb565;
use embedded_graphics::prelude::*;
use embedded_graphics_simulator::{OutputSettingsBuilder, SimulatorDisplay, SimulatorEvent, Window};
use tracing::{debug, info};

use super::{Backend, InputEvent, SurfaceError, dispatch_input, frame_delta};
use crate::colors::SCREEN_BG;
use crate::render::RenderState;
use crate::widgets::Root;

/// Surface plus the window presenting it.
struct Surface {
    display: SimulatorDisplay<Rgb565>,
    window: Window,
}

/// SDL window backend.
pub struct WindowBackend {
    scale: u32,
    surface: Option<Surface>,
    render: RenderState,
    last_frame: Option<Duration>,
    input_attached: bool,
    quit: bool,
}

impl WindowBackend {
    /// Backend drawing every display pixel as a `scale` x `scale` block.
    pub fn new(scale: u32) -> Self {
        Self {
            scale: scale.max(1),
            surface: None,
            render: RenderState::new(),
            last_frame: None,
            input_attached: false,
            quit: false,
        }
    }

    fn poll_events(&mut self, root: &mut Root) {
        let Some(surface) = self.surface.as_mut() else {
            return;
        };
        for event in surface.window.events().filter_map(|e| input_event(&e)) {
            if dispatch_input(root, event, self.input_attached) {
                info!("window closed");
                self.quit = true;
            }
        }
    }
}

/// Input carried by a simulator event. Mouse buttons act as touches.
fn input_event(event: &SimulatorEvent) -> Option<InputEvent> {
    match *event {
        SimulatorEvent::MouseButtonDown { point, .. } => Some(InputEvent::Press(point)),
        SimulatorEvent::MouseButtonUp { point, .. } => Some(InputEvent::Release(point)),
        SimulatorEvent::Quit => Some(InputEvent::Quit),
        _ => None,
    }
}

impl Backend for WindowBackend {
    fn create_surface(&mut self, size: Size, title: &str) -> Result<(), SurfaceError> {
        if size.width == 0 || size.height == 0 {
            return Err(SurfaceError::ZeroSize);
        }

        let mut display = SimulatorDisplay::new(size);
        display.clear(SCREEN_BG).ok();
        let settings = OutputSettingsBuilder::new().scale(self.scale).build();
        let mut window = Window::new(title, &settings);

        // The simulator opens the SDL window lazily and panics if it cannot
        let opened = panic::catch_unwind(AssertUnwindSafe(|| window.update(&display)));
        if let Err(payload) = opened {
            let reason = payload
                .downcast_ref::<String>()
                .cloned()
                .or_else(|| payload.downcast_ref::<&str>().map(|s| (*s).to_string()))
                .unwrap_or_else(|| "unknown SDL error".to_string());
            return Err(SurfaceError::Window(reason));
        }

        debug!(width = size.width, height = size.height, scale = self.scale, "window opened");
        self.surface = Some(Surface { display, window });
        Ok(())
    }

    fn attach_input_devices(&mut self) {
        self.input_attached = true;
    }

    fn process_frame(&mut self, root: &mut Root, now: Duration) -> bool {
        self.poll_events(root);
        root.advance(frame_delta(&mut self.last_frame, now));

        let Some(surface) = self.surface.as_mut() else {
            return false;
        };
        let painted = self.render.render(root, &mut surface.display).unwrap_or(false);
        // Update every frame: it also pumps the SDL event queue
        surface.window.update(&surface.display);
        painted
    }

    fn quit_requested(&self) -> bool {
        self.quit
    }
}

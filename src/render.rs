//! Widget tree painting and redraw tracking.
//!
//! # Update Strategy
//!
//! | Trigger | Action |
//! |---------|--------|
//! | First frame | Full repaint |
//! | Any widget created, deleted, restyled or moved | Full repaint |
//! | Animation changed a bar value | Full repaint |
//! | Nothing changed | Skip (surface keeps the previous frame) |
//!
//! The whole tree fits in a few dozen draw calls, so a changed frame is always
//! repainted in full; the saving comes from idle frames, which are the vast
//! majority once the selector screen is up.
//!
//! # Paint Order
//!
//! Root background first, then widgets depth-first in creation order, so
//! children (button labels) land on top of their parents.

use embedded_graphics::pixelcolor::Rgb565;
use embedded_graphics::prelude::*;

use crate::colors::{THEME_OUTLINE, THEME_TEXT, blend};
use crate::styles::{OPA_TRANSP, Style};
use crate::widgets::primitives::{draw_text, fill_rect, indicator_area, outline_rect};
use crate::widgets::{Part, Root, WidgetId, WidgetKind};

// =============================================================================
// Render State
// =============================================================================

/// Tracks whether the surface needs repainting.
pub struct RenderState {
    /// Whether nothing has been painted yet.
    first_frame: bool,

    /// Frames actually repainted.
    frames_drawn: u64,
}

impl RenderState {
    /// Create a render state for first frame.
    pub const fn new() -> Self {
        Self {
            first_frame: true,
            frames_drawn: 0,
        }
    }

    /// Whether the next frame must be painted.
    #[inline]
    pub const fn needs_redraw(&self, root: &Root) -> bool {
        self.first_frame || root.is_dirty()
    }

    /// Number of frames repainted so far.
    #[inline]
    pub const fn frames_drawn(&self) -> u64 {
        self.frames_drawn
    }

    /// Paint `root` if it changed. Returns `true` when something was drawn.
    pub fn render<D>(&mut self, root: &mut Root, display: &mut D) -> Result<bool, D::Error>
    where
        D: DrawTarget<Color = Rgb565>,
    {
        if !self.needs_redraw(root) {
            return Ok(false);
        }
        draw_root(root, display)?;
        root.mark_clean();
        self.first_frame = false;
        self.frames_drawn += 1;
        Ok(true)
    }
}

impl Default for RenderState {
    fn default() -> Self {
        Self::new()
    }
}

// =============================================================================
// Painting
// =============================================================================

/// Paint the whole tree.
pub fn draw_root<D>(root: &Root, display: &mut D) -> Result<(), D::Error>
where
    D: DrawTarget<Color = Rgb565>,
{
    display.clear(root.bg_color())?;
    for id in root.draw_order() {
        draw_widget(root, id, display)?;
    }
    Ok(())
}

fn draw_widget<D>(root: &Root, id: WidgetId, display: &mut D) -> Result<(), D::Error>
where
    D: DrawTarget<Color = Rgb565>,
{
    let Some(kind) = root.kind(id) else {
        return Ok(());
    };
    let area = root.area(id);
    let main = root.resolved_style(id, Part::Main);
    let backdrop = backdrop(root, id);

    match kind {
        WidgetKind::Label => {
            let text = root.text(id).unwrap_or_default();
            draw_text(display, text, area, &main, THEME_TEXT)?;
        }
        WidgetKind::Bar => {
            if let Some(color) = bg_fill(&main, backdrop) {
                fill_rect(display, area, color, main.radius.unwrap_or(0))?;
            }
            let track = bg_fill(&main, backdrop).unwrap_or(backdrop);
            let value = root.bar_value(id).unwrap_or(0);
            let range = root.bar_range(id).unwrap_or((0, 100));
            if let Some(filled) = indicator_area(area, value, range) {
                let indicator = root.resolved_style(id, Part::Indicator);
                if let Some(color) = bg_fill(&indicator, track) {
                    fill_rect(display, filled, color, indicator.radius.unwrap_or(0))?;
                }
            }
        }
        WidgetKind::Button => {
            let radius = main.radius.unwrap_or(0);
            if let Some(color) = bg_fill(&main, backdrop) {
                fill_rect(display, area, color, radius)?;
            }
            outline_rect(display, area, THEME_OUTLINE, main.outline_width.unwrap_or(0), radius)?;
        }
    }
    Ok(())
}

/// Visible background color of a style over `backdrop`, if it paints one.
fn bg_fill(style: &Style, backdrop: Rgb565) -> Option<Rgb565> {
    let opa = style.bg_opa.unwrap_or(OPA_TRANSP);
    let color = style.bg_color?;
    (opa != OPA_TRANSP).then(|| blend(color, backdrop, opa))
}

/// Color showing behind a widget: nearest painted ancestor, else the root.
fn backdrop(root: &Root, id: WidgetId) -> Rgb565 {
    let mut parent = root.parent(id);
    while let Some(p) = parent {
        let style = root.resolved_style(p, Part::Main);
        if let Some(color) = bg_fill(&style, backdrop(root, p)) {
            return color;
        }
        parent = root.parent(p);
    }
    root.bg_color()
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::colors::{ACCENT, SCREEN_BG, WHITE};
    use crate::styles::{OPA_COVER, StyleName, StyleSet};
    use crate::widgets::{Align, Selector};
    use embedded_graphics_simulator::SimulatorDisplay;

    fn display() -> SimulatorDisplay<Rgb565> {
        SimulatorDisplay::new(Size::new(480, 272))
    }

    #[test]
    fn test_first_frame_always_draws() {
        let mut root = Root::new(Size::new(480, 272));
        root.mark_clean();
        let mut state = RenderState::new();
        assert!(state.render(&mut root, &mut display()).unwrap());
        assert_eq!(state.frames_drawn(), 1);
    }

    #[test]
    fn test_idle_frame_skipped() {
        let mut root = Root::new(Size::new(480, 272));
        let mut state = RenderState::new();
        let mut display = display();
        assert!(state.render(&mut root, &mut display).unwrap());
        assert!(!state.render(&mut root, &mut display).unwrap());
        assert_eq!(state.frames_drawn(), 1);
    }

    #[test]
    fn test_background_painted() {
        let root = Root::new(Size::new(480, 272));
        let mut display = display();
        draw_root(&root, &mut display).unwrap();
        assert_eq!(display.get_pixel(Point::new(0, 0)), SCREEN_BG);
        assert_eq!(display.get_pixel(Point::new(479, 271)), SCREEN_BG);
    }

    #[test]
    fn test_full_bar_uses_indicator_style() {
        let styles = StyleSet::default();
        let mut root = Root::new(Size::new(480, 272));
        let bar = root.create_bar(None);
        root.set_size(bar, Size::new(220, 20));
        root.align(bar, Align::Center, Point::zero());
        root.add_style(bar, styles.get(StyleName::Bar), Selector::INDICATOR);
        root.set_bar_value(bar, 100);

        let mut display = display();
        draw_root(&root, &mut display).unwrap();
        assert_eq!(display.get_pixel(root.area(bar).center()), ACCENT);
    }

    #[test]
    fn test_checked_button_uses_pressed_style() {
        let styles = StyleSet::default();
        let mut root = Root::new(Size::new(480, 272));
        let button = root.create_button(None);
        root.set_size(button, Size::new(200, 50));
        root.align(button, Align::Center, Point::zero());
        root.add_style(button, styles.get(StyleName::Button), Selector::MAIN);
        root.add_style(button, styles.get(StyleName::ButtonPressed), Selector::CHECKED);
        root.set_checked(button, true);

        let mut display = display();
        draw_root(&root, &mut display).unwrap();
        assert_eq!(display.get_pixel(root.area(button).top_left + Point::new(20, 2)), ACCENT);
    }

    #[test]
    fn test_bg_fill_transparent() {
        let style = Style::new().bg_color(WHITE);
        assert_eq!(bg_fill(&style, SCREEN_BG), None);
        let style = style.bg_opa(OPA_COVER);
        assert_eq!(bg_fill(&style, SCREEN_BG), Some(WHITE));
    }

    #[test]
    fn test_label_backdrop_is_button() {
        let mut root = Root::new(Size::new(480, 272));
        let button = root.create_button(None);
        let label = root.create_label(Some(button), "A");
        let button_bg = bg_fill(&root.resolved_style(button, Part::Main), SCREEN_BG);
        assert_eq!(Some(backdrop(&root, label)), button_bg);
    }
}

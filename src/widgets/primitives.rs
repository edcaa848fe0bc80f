//! Low-level drawing primitives shared by the renderer.
//!
//! These are intentionally simple: each takes an already-resolved rectangle
//! and style values and issues embedded-graphics draw calls. Layout and style
//! cascading happen before this layer.
//!
//! # Rounded Corners
//!
//! Corner radii are clamped to half the short side, so a radius of
//! [`RADIUS_CIRCLE`](super::theme::RADIUS_CIRCLE) gives pill-shaped ends.

use embedded_graphics::mono_font::MonoTextStyleBuilder;
use embedded_graphics::pixelcolor::Rgb565;
use embedded_graphics::prelude::*;
use embedded_graphics::primitives::{PrimitiveStyleBuilder, Rectangle, RoundedRectangle, StrokeAlignment};
use embedded_graphics::text::{Alignment, Baseline, Text, TextStyleBuilder};

use crate::styles::{Style, TextDecor};

/// Largest usable corner radius for a rectangle of `size`.
#[inline]
pub fn clamp_radius(size: Size, radius: u32) -> u32 {
    radius.min(size.width.min(size.height) / 2)
}

/// Fill `area` with `color`, rounding corners by `radius`.
pub fn fill_rect<D>(display: &mut D, area: Rectangle, color: Rgb565, radius: u32) -> Result<(), D::Error>
where
    D: DrawTarget<Color = Rgb565>,
{
    if area.is_zero_sized() {
        return Ok(());
    }
    let style = PrimitiveStyleBuilder::new().fill_color(color).build();
    let r = clamp_radius(area.size, radius);
    if r == 0 {
        area.into_styled(style).draw(display)
    } else {
        RoundedRectangle::with_equal_corners(area, Size::new(r, r))
            .into_styled(style)
            .draw(display)
    }
}

/// Stroke an outline of `width` pixels just outside `area`.
pub fn outline_rect<D>(display: &mut D, area: Rectangle, color: Rgb565, width: u32, radius: u32) -> Result<(), D::Error>
where
    D: DrawTarget<Color = Rgb565>,
{
    if width == 0 || area.is_zero_sized() {
        return Ok(());
    }
    let style = PrimitiveStyleBuilder::new()
        .stroke_color(color)
        .stroke_width(width)
        .stroke_alignment(StrokeAlignment::Outside)
        .build();
    let r = clamp_radius(area.size, radius);
    RoundedRectangle::with_equal_corners(area, Size::new(r, r))
        .into_styled(style)
        .draw(display)
}

/// Portion of a bar's `area` covered by the indicator for `value` in `range`.
///
/// Returns `None` when nothing should be filled.
pub fn indicator_area(area: Rectangle, value: i32, range: (i32, i32)) -> Option<Rectangle> {
    let (min, max) = range;
    if max <= min || value <= min {
        return None;
    }
    let value = value.min(max);
    let span = i64::from(max) - i64::from(min);
    let filled = i64::from(area.size.width) * (i64::from(value) - i64::from(min)) / span;
    let width = u32::try_from(filled).ok()?;
    (width > 0).then(|| Rectangle::new(area.top_left, Size::new(width, area.size.height)))
}

/// Draw `text` inside `area` using the resolved text properties of `style`.
///
/// Does nothing when the style carries no font.
pub fn draw_text<D>(display: &mut D, text: &str, area: Rectangle, style: &Style, fallback: Rgb565) -> Result<(), D::Error>
where
    D: DrawTarget<Color = Rgb565>,
{
    let Some(font) = style.font else {
        return Ok(());
    };
    if text.is_empty() {
        return Ok(());
    }

    let color = style.text_color.unwrap_or(fallback);
    let mut builder = MonoTextStyleBuilder::new().font(font).text_color(color);
    builder = match style.text_decor {
        Some(TextDecor::Underline) => builder.underline(),
        Some(TextDecor::Strikethrough) => builder.strikethrough(),
        None => builder,
    };
    let character_style = builder.build();

    let alignment = style.text_align.unwrap_or(Alignment::Left);
    let x = match alignment {
        Alignment::Left => area.top_left.x,
        Alignment::Center => area.top_left.x + area.size.width as i32 / 2,
        Alignment::Right => area.top_left.x + area.size.width as i32,
    };
    let text_style = TextStyleBuilder::new()
        .alignment(alignment)
        .baseline(Baseline::Top)
        .build();

    Text::with_text_style(text, Point::new(x, area.top_left.y), character_style, text_style).draw(display)?;
    Ok(())
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::colors::{ACCENT, BLACK, WHITE};
    use embedded_graphics::mock_display::MockDisplay;

    fn bar() -> Rectangle {
        Rectangle::new(Point::new(10, 10), Size::new(220, 20))
    }

    #[test]
    fn test_clamp_radius() {
        assert_eq!(clamp_radius(Size::new(220, 20), 10), 10);
        assert_eq!(clamp_radius(Size::new(220, 20), u32::MAX), 10);
        assert_eq!(clamp_radius(Size::new(3, 3), 5), 1);
    }

    #[test]
    fn test_indicator_empty_at_min() {
        assert_eq!(indicator_area(bar(), 0, (0, 100)), None);
    }

    #[test]
    fn test_indicator_full_at_max() {
        assert_eq!(indicator_area(bar(), 100, (0, 100)), Some(bar()));
        assert_eq!(indicator_area(bar(), 500, (0, 100)), Some(bar()));
    }

    #[test]
    fn test_indicator_half() {
        let half = indicator_area(bar(), 50, (0, 100)).map(|r| r.size.width);
        assert_eq!(half, Some(110));
    }

    #[test]
    fn test_indicator_degenerate_range() {
        assert_eq!(indicator_area(bar(), 5, (10, 10)), None);
    }

    #[test]
    fn test_fill_rect_square() {
        let mut display: MockDisplay<Rgb565> = MockDisplay::new();
        fill_rect(&mut display, Rectangle::new(Point::zero(), Size::new(4, 4)), ACCENT, 0).unwrap();
        assert_eq!(display.get_pixel(Point::new(0, 0)), Some(ACCENT));
        assert_eq!(display.get_pixel(Point::new(3, 3)), Some(ACCENT));
        assert_eq!(display.get_pixel(Point::new(4, 4)), None);
    }

    #[test]
    fn test_draw_text_without_font_is_noop() {
        let mut display: MockDisplay<Rgb565> = MockDisplay::new();
        let area = Rectangle::new(Point::zero(), Size::new(20, 10));
        draw_text(&mut display, "hi", area, &Style::new().text_color(WHITE), BLACK).unwrap();
        assert!(display.affected_area().is_zero_sized());
    }
}

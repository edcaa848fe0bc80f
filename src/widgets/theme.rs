//! Default toolkit theme: the look a widget has before any style is added.

use embedded_graphics::text::Alignment;
use profont::PROFONT_14_POINT;

use crate::colors::{THEME_PRIMARY, THEME_PRIMARY_DARK, THEME_TEXT, THEME_TRACK};
use crate::styles::{OPA_COVER, Style};

use super::{Part, WidgetKind};

/// Radius value meaning "fully rounded" (clamped to half the short side).
pub const RADIUS_CIRCLE: u32 = u32::MAX;

/// Button outline before any style overrides it.
pub const BUTTON_OUTLINE_WIDTH: u32 = 2;

const LABEL: Style = Style::new()
    .text_font(&PROFONT_14_POINT)
    .text_color(THEME_TEXT)
    .text_align(Alignment::Left);

const BAR_TRACK: Style = Style::new()
    .bg_color(THEME_TRACK)
    .bg_opa(OPA_COVER)
    .radius(RADIUS_CIRCLE);

const BAR_INDICATOR: Style = Style::new()
    .bg_color(THEME_PRIMARY)
    .bg_opa(OPA_COVER)
    .radius(RADIUS_CIRCLE);

const BUTTON: Style = Style::new()
    .bg_color(THEME_PRIMARY)
    .bg_opa(OPA_COVER)
    .radius(8)
    .outline_width(BUTTON_OUTLINE_WIDTH);

const BUTTON_CHECKED: Style = Style::new().bg_color(THEME_PRIMARY_DARK);

/// Theme style for a widget part in its default state.
pub const fn default_style(kind: WidgetKind, part: Part) -> Style {
    match (kind, part) {
        (WidgetKind::Label, Part::Main) => LABEL,
        (WidgetKind::Bar, Part::Main) => BAR_TRACK,
        (WidgetKind::Bar, Part::Indicator) => BAR_INDICATOR,
        (WidgetKind::Button, Part::Main) => BUTTON,
        (WidgetKind::Label | WidgetKind::Button, Part::Indicator) => Style::new(),
    }
}

/// Theme additions for a checked widget part.
pub const fn checked_style(kind: WidgetKind, part: Part) -> Style {
    match (kind, part) {
        (WidgetKind::Button, Part::Main) => BUTTON_CHECKED,
        _ => Style::new(),
    }
}

//! Style registry shared by every screen.
//!
//! A [`Style`] is a sparse bundle of visual properties: only the fields a style
//! sets are `Some`. Several styles can be added to one widget; the widget's
//! effective look is the cascade of all of them (see [`Style::merge`]). This is
//! what lets the selector title combine `Title` with `TextUnderline`.
//!
//! # Construction
//!
//! All styles are built with `const fn` setters, so [`StyleSet::init`] is a
//! `const fn` too. The set is built once at startup, never mutated, and passed
//! by shared reference into every screen's `enter()`. Screens cannot run before
//! the set exists because they borrow it.
//!
//! # Fonts
//!
//! `ProFont` sizes stand in for the proportional faces of the brain UI:
//!
//! | Style        | Font          |
//! |--------------|---------------|
//! | `TitleLarge` | `ProFont` 24pt |
//! | `Title`      | `ProFont` 18pt |
//! | `Text`       | `ProFont` 14pt |

use embedded_graphics::mono_font::MonoFont;
use embedded_graphics::pixelcolor::Rgb565;
use embedded_graphics::text::Alignment;
use profont::{PROFONT_14_POINT, PROFONT_18_POINT, PROFONT_24_POINT};

use crate::colors::{ACCENT, SCREEN_BG, WHITE};
use crate::widgets::Root;

// =============================================================================
// Opacity
// =============================================================================

/// Fully transparent.
pub const OPA_TRANSP: u8 = 0;

/// Fully opaque.
pub const OPA_COVER: u8 = u8::MAX;

// =============================================================================
// Style Descriptor
// =============================================================================

/// Text decoration drawn with the glyphs.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum TextDecor {
    Underline,
    Strikethrough,
}

/// Sparse set of visual properties. Unset fields fall through to whatever the
/// widget already has from earlier styles or the toolkit theme.
#[derive(Clone, Copy, Default)]
pub struct Style {
    pub font: Option<&'static MonoFont<'static>>,
    pub text_color: Option<Rgb565>,
    pub text_align: Option<Alignment>,
    pub text_decor: Option<TextDecor>,
    pub bg_color: Option<Rgb565>,
    pub bg_opa: Option<u8>,
    pub radius: Option<u32>,
    pub outline_width: Option<u32>,
}

impl Style {
    /// Empty style (sets nothing).
    pub const fn new() -> Self {
        Self {
            font: None,
            text_color: None,
            text_align: None,
            text_decor: None,
            bg_color: None,
            bg_opa: None,
            radius: None,
            outline_width: None,
        }
    }

    pub const fn text_font(mut self, font: &'static MonoFont<'static>) -> Self {
        self.font = Some(font);
        self
    }

    pub const fn text_color(mut self, color: Rgb565) -> Self {
        self.text_color = Some(color);
        self
    }

    pub const fn text_align(mut self, align: Alignment) -> Self {
        self.text_align = Some(align);
        self
    }

    pub const fn text_decor(mut self, decor: TextDecor) -> Self {
        self.text_decor = Some(decor);
        self
    }

    pub const fn bg_color(mut self, color: Rgb565) -> Self {
        self.bg_color = Some(color);
        self
    }

    pub const fn bg_opa(mut self, opa: u8) -> Self {
        self.bg_opa = Some(opa);
        self
    }

    pub const fn radius(mut self, radius: u32) -> Self {
        self.radius = Some(radius);
        self
    }

    pub const fn outline_width(mut self, width: u32) -> Self {
        self.outline_width = Some(width);
        self
    }

    /// Cascade `over` on top of `self`: every field `over` sets wins.
    #[must_use]
    pub fn merge(&self, over: &Self) -> Self {
        Self {
            font: over.font.or(self.font),
            text_color: over.text_color.or(self.text_color),
            text_align: over.text_align.or(self.text_align),
            text_decor: over.text_decor.or(self.text_decor),
            bg_color: over.bg_color.or(self.bg_color),
            bg_opa: over.bg_opa.or(self.bg_opa),
            radius: over.radius.or(self.radius),
            outline_width: over.outline_width.or(self.outline_width),
        }
    }

    /// Whether this style carries everything needed to draw text.
    pub const fn is_text_complete(&self) -> bool {
        self.font.is_some() && self.text_color.is_some() && self.text_align.is_some()
    }
}

// =============================================================================
// Named Styles
// =============================================================================

/// Names of the styles every screen may reference.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum StyleName {
    /// Large centered white title (init screen).
    TitleLarge,
    /// Normal centered white title (selector screen).
    Title,
    /// Small white body text.
    Text,
    /// Underline decoration, composed on top of a text style.
    TextUnderline,
    /// Progress bar indicator fill.
    Bar,
    /// Routine button, normal state.
    Button,
    /// Routine button, checked state.
    ButtonPressed,
}

impl StyleName {
    /// Every style name, in declaration order.
    pub const ALL: [Self; 7] = [
        Self::TitleLarge,
        Self::Title,
        Self::Text,
        Self::TextUnderline,
        Self::Bar,
        Self::Button,
        Self::ButtonPressed,
    ];
}

/// Primary accent color, read by several styles.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct AccentColor(pub Rgb565);

impl Default for AccentColor {
    fn default() -> Self {
        Self(ACCENT)
    }
}

/// Immutable registry of all named styles.
pub struct StyleSet {
    accent: AccentColor,
    title_large: Style,
    title: Style,
    text: Style,
    text_underline: Style,
    bar: Style,
    button: Style,
    button_pressed: Style,
}

impl StyleSet {
    /// Build every named style around the given accent color.
    pub const fn init(accent: AccentColor) -> Self {
        Self {
            accent,
            title_large: Style::new()
                .text_color(WHITE)
                .text_font(&PROFONT_24_POINT)
                .text_align(Alignment::Center),
            title: Style::new()
                .text_color(WHITE)
                .text_font(&PROFONT_18_POINT)
                .text_align(Alignment::Center),
            text: Style::new()
                .text_color(WHITE)
                .text_font(&PROFONT_14_POINT)
                .text_align(Alignment::Center),
            text_underline: Style::new().text_decor(TextDecor::Underline),
            bar: Style::new().bg_opa(OPA_COVER).bg_color(accent.0).radius(10),
            button: Style::new().outline_width(0),
            button_pressed: Style::new().bg_color(accent.0),
        }
    }

    /// Look up a named style.
    #[inline]
    pub const fn get(&self, name: StyleName) -> &Style {
        match name {
            StyleName::TitleLarge => &self.title_large,
            StyleName::Title => &self.title,
            StyleName::Text => &self.text,
            StyleName::TextUnderline => &self.text_underline,
            StyleName::Bar => &self.bar,
            StyleName::Button => &self.button,
            StyleName::ButtonPressed => &self.button_pressed,
        }
    }

    /// Accent color the set was built with.
    #[inline]
    pub const fn accent(&self) -> AccentColor {
        self.accent
    }
}

impl Default for StyleSet {
    fn default() -> Self {
        Self::init(AccentColor::default())
    }
}

// =============================================================================
// Root Clearing
// =============================================================================

/// Erase the active screen: delete every widget and reset the root background.
///
/// Safe to call on an already empty root.
pub fn clear_root(root: &mut Root) {
    root.clean();
    root.set_bg_color(SCREEN_BG);
}

// =============================================================================
// Unit Tests
// =============================================================================

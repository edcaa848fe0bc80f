//! Color constants for the robot display.
//!
//! # Rgb565 Color Format
//!
//! Rgb565 uses 16 bits per pixel: 5 bits red, 6 bits green, 5 bits blue.
//! Screen colors are specified as 24-bit hex values (the way they are picked in
//! a design tool) and truncated to 5-6-5 at compile time by [`rgb_hex`].

use embedded_graphics::pixelcolor::{Rgb565, RgbColor};
use embedded_graphics::prelude::IntoStorage;

// =============================================================================
// Standard Colors
// =============================================================================

/// Pure black (0, 0, 0).
pub const BLACK: Rgb565 = Rgb565::BLACK;

/// Pure white (31, 63, 31). Used for all text on the dark screen background.
pub const WHITE: Rgb565 = Rgb565::WHITE;

// =============================================================================
// Application Colors
// =============================================================================

/// Dark slate used for the root container background of every screen.
pub const SCREEN_BG: Rgb565 = rgb_hex(0x0023_282D);

/// Primary accent (team yellow). Progress bar fill and checked buttons.
pub const ACCENT: Rgb565 = rgb_hex(0x00F5_C116);

// =============================================================================
// Toolkit Default Theme Colors
// =============================================================================

/// Default label text color before any style is applied.
pub const THEME_TEXT: Rgb565 = rgb_hex(0x0021_2121);

/// Default button and bar indicator color.
pub const THEME_PRIMARY: Rgb565 = rgb_hex(0x0021_96F3);

/// Default checked-button color (darker primary).
pub const THEME_PRIMARY_DARK: Rgb565 = rgb_hex(0x0015_65C0);

/// Default bar track color.
pub const THEME_TRACK: Rgb565 = rgb_hex(0x0045_4B52);

/// Default outline color for buttons with a non-zero outline width.
pub const THEME_OUTLINE: Rgb565 = rgb_hex(0x0090_CAF9);

// =============================================================================
// Helpers
// =============================================================================

/// Convert a 24-bit `0xRRGGBB` value to Rgb565 by dropping the low bits.
pub const fn rgb_hex(hex: u32) -> Rgb565 {
    let r = ((hex >> 16) & 0xFF) as u8;
    let g = ((hex >> 8) & 0xFF) as u8;
    let b = (hex & 0xFF) as u8;
    Rgb565::new(r >> 3, g >> 2, b >> 3)
}

/// Mix `fg` over `bg` at an 8-bit opacity (0 = only `bg`, 255 = only `fg`).
///
/// Component-wise integer blend in 5-6-5 space.
pub fn blend(fg: Rgb565, bg: Rgb565, opa: u8) -> Rgb565 {
    match opa {
        0 => return bg,
        u8::MAX => return fg,
        _ => {}
    }

    let fg_raw = fg.into_storage();
    let bg_raw = bg.into_storage();
    let a = u32::from(opa);

    let mix = |shift: u16, mask: u16| -> u8 {
        let f = u32::from((fg_raw >> shift) & mask);
        let b = u32::from((bg_raw >> shift) & mask);
        ((f * a + b * (255 - a) + 127) / 255) as u8
    };

    Rgb565::new(mix(11, 0x1F), mix(5, 0x3F), mix(0, 0x1F))
}

// =============================================================================
// Unit Tests
// =============================================================================

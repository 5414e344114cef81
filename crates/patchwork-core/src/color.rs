//! RGBA colors and the base palette used for new turtles.

use std::fmt;

/// An RGBA color with 8-bit channels.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct Color {
    /// Red channel.
    pub red: u8,
    /// Green channel.
    pub green: u8,
    /// Blue channel.
    pub blue: u8,
    /// Alpha channel; 255 is opaque.
    pub alpha: u8,
}

impl Color {
    /// An opaque color from its red, green, and blue channels.
    pub const fn rgb(red: u8, green: u8, blue: u8) -> Self {
        Self {
            red,
            green,
            blue,
            alpha: 255,
        }
    }

    /// A color with an explicit alpha channel.
    pub const fn rgba(red: u8, green: u8, blue: u8, alpha: u8) -> Self {
        Self {
            red,
            green,
            blue,
            alpha,
        }
    }

    /// Black.
    pub const BLACK: Self = Self::rgb(0, 0, 0);
    /// White.
    pub const WHITE: Self = Self::rgb(255, 255, 255);
    /// Grey.
    pub const GREY: Self = Self::rgb(128, 128, 128);
    /// Gray (same as [`Color::GREY`]).
    pub const GRAY: Self = Self::GREY;
    /// Red.
    pub const RED: Self = Self::rgb(255, 0, 0);
    /// Orange.
    pub const ORANGE: Self = Self::rgb(255, 165, 0);
    /// Brown.
    pub const BROWN: Self = Self::rgb(88, 57, 39);
    /// Yellow.
    pub const YELLOW: Self = Self::rgb(255, 255, 0);
    /// Green.
    pub const GREEN: Self = Self::rgb(0, 128, 0);
    /// Lime.
    pub const LIME: Self = Self::rgb(0, 255, 0);
    /// Turquoise.
    pub const TURQUOISE: Self = Self::rgb(64, 224, 208);
    /// Cyan.
    pub const CYAN: Self = Self::rgb(0, 255, 255);
    /// Sky blue.
    pub const SKY: Self = Self::rgb(135, 206, 235);
    /// Blue.
    pub const BLUE: Self = Self::rgb(0, 0, 255);
    /// Violet.
    pub const VIOLET: Self = Self::rgb(238, 130, 238);
    /// Magenta.
    pub const MAGENTA: Self = Self::rgb(255, 0, 255);
    /// Pink.
    pub const PINK: Self = Self::rgb(255, 192, 203);
}

impl Default for Color {
    fn default() -> Self {
        Self::BLACK
    }
}

impl fmt::Display for Color {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "#{:02x}{:02x}{:02x}{:02x}",
            self.red, self.green, self.blue, self.alpha
        )
    }
}

/// The 17-color base palette.
///
/// Ordered turtle creation cycles through it by index; random creation
/// draws from it uniformly.
pub const BASE_COLORS: [Color; 17] = [
    Color::BLACK,
    Color::WHITE,
    Color::GREY,
    Color::GRAY,
    Color::RED,
    Color::ORANGE,
    Color::BROWN,
    Color::YELLOW,
    Color::GREEN,
    Color::LIME,
    Color::TURQUOISE,
    Color::CYAN,
    Color::SKY,
    Color::BLUE,
    Color::VIOLET,
    Color::MAGENTA,
    Color::PINK,
];

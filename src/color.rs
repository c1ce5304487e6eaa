// src/color.rs

//! Defines the `Color` type used across the display capability.
//!
//! The display contract deals only in concrete RGB triples; there is no
//! palette or named-color indirection here. The simulation engine itself
//! passes just two values: all channels at maximum for a live cell and all
//! channels at zero for a dead one.

/// An opaque RGB triple, one byte per channel.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct Color {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl Color {
    /// All channels at maximum; the conventional "on" value.
    pub const WHITE: Color = Color::rgb(255, 255, 255);

    /// All channels at zero; the conventional "off" value.
    pub const BLACK: Color = Color::rgb(0, 0, 0);

    /// Creates a color from its three channel values.
    pub const fn rgb(r: u8, g: u8, b: u8) -> Self {
        Color { r, g, b }
    }
}

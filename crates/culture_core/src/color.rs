//! Embed colors.

use serde::{Deserialize, Serialize};

/// A 24-bit RGB color, stored as `0xRRGGBB`.
///
/// # Examples
///
/// ```
/// use culture_core::Color;
///
/// let color = Color::from_rgb(0x12, 0x34, 0x56);
/// assert_eq!(color.value(), 0x123456);
/// assert_eq!(color.to_string(), "#123456");
/// ```
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize, derive_more::From,
)]
#[serde(transparent)]
pub struct Color(u32);

impl Color {
    /// Black, used when no dominant color could be computed.
    pub const BLACK: Color = Color(0x000000);
    /// Discord's "DarkRed".
    pub const DARK_RED: Color = Color(0x992D22);
    /// Discord's "Gold".
    pub const GOLD: Color = Color(0xF1C40F);

    /// Build a color from its channels.
    pub const fn from_rgb(r: u8, g: u8, b: u8) -> Self {
        Self(((r as u32) << 16) | ((g as u32) << 8) | b as u32)
    }

    /// The `0xRRGGBB` value.
    pub const fn value(self) -> u32 {
        self.0
    }
}

impl std::fmt::Display for Color {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "#{:06x}", self.0)
    }
}

//! Colors and the custom style properties effects write onto elements.

use serde::{Deserialize, Serialize};
use std::fmt;

/// RGBA color.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(from = "[u8; 3]", into = "[u8; 3]")]
pub struct Color {
    /// Red component (0-1).
    pub r: f32,
    /// Green component (0-1).
    pub g: f32,
    /// Blue component (0-1).
    pub b: f32,
    /// Alpha component (0-1).
    pub a: f32,
}

impl Color {
    /// Transparent black.
    pub const TRANSPARENT: Self = Self::rgba(0.0, 0.0, 0.0, 0.0);
    /// Solid white.
    pub const WHITE: Self = Self::rgba(1.0, 1.0, 1.0, 1.0);
    /// The portfolio's signature violet, `rgb(132, 0, 255)`.
    pub const VIOLET: Self = Self::rgba(132.0 / 255.0, 0.0, 1.0, 1.0);
    /// Card border, `#392e4e`.
    pub const BORDER: Self = Self::rgba(57.0 / 255.0, 46.0 / 255.0, 78.0 / 255.0, 1.0);

    /// Creates a color from RGBA values (0-1).
    #[must_use]
    pub const fn rgba(r: f32, g: f32, b: f32, a: f32) -> Self {
        Self { r, g, b, a }
    }

    /// Creates an opaque color from 8-bit channels.
    #[must_use]
    pub fn rgb8(r: u8, g: u8, b: u8) -> Self {
        Self::rgba(
            f32::from(r) / 255.0,
            f32::from(g) / 255.0,
            f32::from(b) / 255.0,
            1.0,
        )
    }

    /// Returns a new color with different alpha.
    #[must_use]
    pub const fn with_alpha(self, a: f32) -> Self {
        Self::rgba(self.r, self.g, self.b, a)
    }

    /// Returns the 8-bit RGB channels.
    #[must_use]
    pub fn to_rgb8(self) -> [u8; 3] {
        #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
        let channel = |v: f32| (v.clamp(0.0, 1.0) * 255.0).round() as u8;
        [channel(self.r), channel(self.g), channel(self.b)]
    }

    /// Channel triplet as used inside `rgba(...)`, e.g. `132, 0, 255`.
    #[must_use]
    pub fn css_triplet(self) -> String {
        let [r, g, b] = self.to_rgb8();
        format!("{r}, {g}, {b}")
    }

    /// CSS `rgba(...)` with the given alpha.
    #[must_use]
    pub fn css_rgba(self, alpha: f32) -> String {
        format!("rgba({}, {alpha})", self.css_triplet())
    }

    /// Converts to array format.
    #[must_use]
    pub const fn to_array(self) -> [f32; 4] {
        [self.r, self.g, self.b, self.a]
    }
}

impl Default for Color {
    fn default() -> Self {
        Self::VIOLET
    }
}

impl From<[u8; 3]> for Color {
    fn from([r, g, b]: [u8; 3]) -> Self {
        Self::rgb8(r, g, b)
    }
}

impl From<Color> for [u8; 3] {
    fn from(color: Color) -> Self {
        color.to_rgb8()
    }
}

/// Custom properties the glow effect drives on each card.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum StyleProperty {
    /// Horizontal glow center, percent of card width.
    GlowX,
    /// Vertical glow center, percent of card height.
    GlowY,
    /// Glow strength in 0..=1.
    GlowIntensity,
    /// Spotlight radius in pixels.
    GlowRadius,
}

impl StyleProperty {
    /// CSS custom property name.
    #[must_use]
    pub const fn css_name(self) -> &'static str {
        match self {
            Self::GlowX => "--glow-x",
            Self::GlowY => "--glow-y",
            Self::GlowIntensity => "--glow-intensity",
            Self::GlowRadius => "--glow-radius",
        }
    }
}

/// A typed CSS value.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum StyleValue {
    /// Unitless number.
    Number(f32),
    /// Percentage.
    Percent(f32),
    /// Pixels.
    Px(f32),
}

impl StyleValue {
    /// Returns the numeric part.
    #[must_use]
    pub const fn amount(self) -> f32 {
        match self {
            Self::Number(v) | Self::Percent(v) | Self::Px(v) => v,
        }
    }
}

impl fmt::Display for StyleValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Number(v) => write!(f, "{v}"),
            Self::Percent(v) => write!(f, "{v}%"),
            Self::Px(v) => write!(f, "{v}px"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_violet_css() {
        assert_eq!(Color::VIOLET.css_triplet(), "132, 0, 255");
        assert_eq!(Color::VIOLET.css_rgba(0.8), "rgba(132, 0, 255, 0.8)");
        assert_eq!(Color::rgb8(57, 46, 78), Color::BORDER);
    }

    #[test]
    fn test_style_values() {
        assert_eq!(StyleValue::Percent(50.0).to_string(), "50%");
        assert_eq!(StyleValue::Px(300.0).to_string(), "300px");
        assert_eq!(StyleValue::Number(0.25).to_string(), "0.25");
        assert_eq!(StyleProperty::GlowIntensity.css_name(), "--glow-intensity");
    }
}

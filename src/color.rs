//! RGB colors for particle palettes.
//!
//! Palettes are written as CSS-style hex strings in configuration files and
//! held as normalized RGB triples at runtime.

use crate::error::ColorError;
use glam::Vec3;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// An RGB color with each channel in 0.0-1.0.
///
/// Serializes as a `#rrggbb` string.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct Color {
    pub r: f32,
    pub g: f32,
    pub b: f32,
}

impl Color {
    pub const WHITE: Color = Color::new(1.0, 1.0, 1.0);
    pub const BLACK: Color = Color::new(0.0, 0.0, 0.0);

    /// Ice blues, silver and white.
    pub const ICE_PALETTE: [&'static str; 5] = [
        "#E0F7FA", // Ice blue light
        "#B2EBF2", // Ice blue medium
        "#FFFFFF", // White
        "#C0C0C0", // Silver
        "#90CAF9", // Soft blue
    ];

    pub const fn new(r: f32, g: f32, b: f32) -> Self {
        Self { r, g, b }
    }

    /// Color from 8-bit channels.
    pub fn from_rgb8(r: u8, g: u8, b: u8) -> Self {
        Self::new(r as f32 / 255.0, g as f32 / 255.0, b as f32 / 255.0)
    }

    /// Parse `#rgb` or `#rrggbb`. The leading `#` is optional.
    pub fn from_hex(hex: &str) -> Result<Self, ColorError> {
        let digits = hex.trim().trim_start_matches('#');
        let invalid = || ColorError::InvalidHex(hex.to_string());

        if !digits.chars().all(|c| c.is_ascii_hexdigit()) {
            return Err(invalid());
        }

        match digits.len() {
            3 => {
                let mut channels = [0u8; 3];
                for (channel, c) in channels.iter_mut().zip(digits.chars()) {
                    let nibble = c.to_digit(16).ok_or_else(invalid)? as u8;
                    *channel = nibble * 17;
                }
                Ok(Self::from_rgb8(channels[0], channels[1], channels[2]))
            }
            6 => {
                let channel = |i: usize| u8::from_str_radix(&digits[i..i + 2], 16).map_err(|_| invalid());
                Ok(Self::from_rgb8(channel(0)?, channel(2)?, channel(4)?))
            }
            _ => Err(invalid()),
        }
    }

    /// Format as `#rrggbb`.
    pub fn to_hex(&self) -> String {
        let byte = |v: f32| (v.clamp(0.0, 1.0) * 255.0).round() as u8;
        format!("#{:02x}{:02x}{:02x}", byte(self.r), byte(self.g), byte(self.b))
    }

    /// Parse a whole palette, failing on the first bad entry.
    pub fn palette<S: AsRef<str>>(entries: &[S]) -> Result<Vec<Color>, ColorError> {
        entries.iter().map(|s| Color::from_hex(s.as_ref())).collect()
    }

    /// The ice palette as parsed colors.
    pub fn ice_palette() -> Vec<Color> {
        Self::ICE_PALETTE
            .iter()
            .filter_map(|hex| Color::from_hex(hex).ok())
            .collect()
    }

    /// Convert from sRGB to linear light, for renderers that blend in linear space.
    pub fn to_linear(&self) -> Color {
        fn channel(c: f32) -> f32 {
            if c <= 0.04045 {
                c / 12.92
            } else {
                ((c + 0.055) / 1.055).powf(2.4)
            }
        }
        Color::new(channel(self.r), channel(self.g), channel(self.b))
    }

    #[inline]
    pub fn to_vec3(&self) -> Vec3 {
        Vec3::new(self.r, self.g, self.b)
    }

    #[inline]
    pub fn to_array(&self) -> [f32; 3] {
        [self.r, self.g, self.b]
    }
}

impl Default for Color {
    fn default() -> Self {
        Color::WHITE
    }
}

impl From<Color> for Vec3 {
    fn from(c: Color) -> Self {
        c.to_vec3()
    }
}

impl From<Vec3> for Color {
    fn from(v: Vec3) -> Self {
        Color::new(v.x, v.y, v.z)
    }
}

impl FromStr for Color {
    type Err = ColorError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Color::from_hex(s)
    }
}

impl TryFrom<String> for Color {
    type Error = ColorError;

    fn try_from(s: String) -> Result<Self, Self::Error> {
        Color::from_hex(&s)
    }
}

impl From<Color> for String {
    fn from(c: Color) -> Self {
        c.to_hex()
    }
}

impl fmt::Display for Color {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_hex())
    }
}

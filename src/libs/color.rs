//! Display colors for shift types and daily overrides.
//!
//! Storage layers persist colors in one of two encodings:
//!
//! - **Packed**: a single integer `0xRRGGBB` (shift types), with alpha kept in
//!   its own byte next to it.
//! - **Channels**: four `f64` values `(r, g, b, a)` in `[0, 1]` (daily overrides).
//!
//! Each channel is held as a byte, so both encodings round-trip without loss:
//! converting to channels divides by 255 and converting back rounds to the
//! nearest byte.

use crate::libs::error::RotaError;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// An RGBA color with 8-bit channels.
///
/// Shift types persist it as a packed `0xRRGGBB` integer plus an alpha byte,
/// daily overrides as four `[0, 1]` channels.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Color {
    pub red: u8,
    pub green: u8,
    pub blue: u8,
    pub alpha: u8,
}

impl Color {
    pub const BLUE: Color = Color::rgb(0x00, 0x7a, 0xff);

    /// Opaque color from three channels.
    pub const fn rgb(red: u8, green: u8, blue: u8) -> Self {
        Color { red, green, blue, alpha: 0xff }
    }

    pub const fn rgba(red: u8, green: u8, blue: u8, alpha: u8) -> Self {
        Color { red, green, blue, alpha }
    }

    /// Decodes a packed `0xRRGGBB` value. Bits above the low 24 are ignored.
    pub fn from_packed(value: u32) -> Self {
        Color::rgb(((value >> 16) & 0xff) as u8, ((value >> 8) & 0xff) as u8, (value & 0xff) as u8)
    }

    /// Same color with a different alpha byte.
    pub const fn with_alpha(self, alpha: u8) -> Self {
        Color { alpha, ..self }
    }

    /// Packs the color channels as `0xRRGGBB`. Alpha is stored separately.
    pub fn to_packed(self) -> u32 {
        ((self.red as u32) << 16) | ((self.green as u32) << 8) | self.blue as u32
    }

    pub fn to_channels(self) -> [f64; 4] {
        [
            self.red as f64 / 255.0,
            self.green as f64 / 255.0,
            self.blue as f64 / 255.0,
            self.alpha as f64 / 255.0,
        ]
    }

    /// Encodes four `[0, 1]` channels. Out-of-range or non-finite values are rejected.
    pub fn from_channels(red: f64, green: f64, blue: f64, alpha: f64) -> Result<Self, RotaError> {
        let to_byte = |value: f64| -> Result<u8, RotaError> {
            if !value.is_finite() || !(0.0..=1.0).contains(&value) {
                return Err(RotaError::InvalidColor(format!("channel {}", value)));
            }
            Ok((value * 255.0).round() as u8)
        };
        Ok(Color::rgba(to_byte(red)?, to_byte(green)?, to_byte(blue)?, to_byte(alpha)?))
    }

    /// Lowercase hex form: `#rrggbb` when opaque, `#rrggbbaa` otherwise.
    ///
    /// # Returns
    ///
    /// A string that [`FromStr`] parses back to the same color.
    pub fn to_hex(self) -> String {
        if self.alpha == 0xff {
            format!("#{:02x}{:02x}{:02x}", self.red, self.green, self.blue)
        } else {
            format!("#{:02x}{:02x}{:02x}{:02x}", self.red, self.green, self.blue, self.alpha)
        }
    }
}

impl Default for Color {
    fn default() -> Self {
        Color::BLUE
    }
}

impl fmt::Display for Color {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.to_hex())
    }
}

/// Accepts `#rrggbb`, `#rrggbbaa` (leading `#` optional) and a handful of names.
impl FromStr for Color {
    type Err = RotaError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let named = match s.trim().to_lowercase().as_str() {
            "red" => Some(Color::rgb(0xff, 0x3b, 0x30)),
            "orange" => Some(Color::rgb(0xff, 0x95, 0x00)),
            "yellow" => Some(Color::rgb(0xff, 0xcc, 0x00)),
            "green" => Some(Color::rgb(0x34, 0xc7, 0x59)),
            "teal" => Some(Color::rgb(0x30, 0xb0, 0xc7)),
            "blue" => Some(Color::BLUE),
            "indigo" => Some(Color::rgb(0x58, 0x56, 0xd6)),
            "purple" => Some(Color::rgb(0xaf, 0x52, 0xde)),
            "pink" => Some(Color::rgb(0xff, 0x2d, 0x55)),
            "brown" => Some(Color::rgb(0xa2, 0x84, 0x5e)),
            "gray" | "grey" => Some(Color::rgb(0x8e, 0x8e, 0x93)),
            _ => None,
        };
        if let Some(color) = named {
            return Ok(color);
        }

        let hex = s.trim().trim_start_matches('#');
        let byte = |i: usize| u8::from_str_radix(&hex[i..i + 2], 16).map_err(|_| RotaError::InvalidColor(s.to_string()));
        if !hex.is_ascii() {
            return Err(RotaError::InvalidColor(s.to_string()));
        }
        match hex.len() {
            6 => Ok(Color::rgb(byte(0)?, byte(2)?, byte(4)?)),
            8 => Ok(Color::rgba(byte(0)?, byte(2)?, byte(4)?, byte(6)?)),
            _ => Err(RotaError::InvalidColor(s.to_string())),
        }
    }
}

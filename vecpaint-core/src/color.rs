//! Colors and their serialized CSS form.
//!
//! Every color handed to a drawing context is resolved to the
//! `rgba(r, g, b, a)` string the browser 2D context understands; native
//! backends read the channels directly.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::{CanvasError, CanvasResult};

/// An sRGB color with straight (non-premultiplied) alpha.
///
/// Parses only `#rgb`, `#rrggbb`, `#rrggbbaa`, `rgb(r, g, b)` and
/// `rgba(r, g, b, a)`. Named CSS colors (`red`, `transparent`) and
/// `hsl()`/`hsla()` are rejected with [`CanvasError::InvalidColor`], so every
/// accepted value resolves to exact channels on every backend.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct Color {
    /// Red channel.
    pub r: u8,
    /// Green channel.
    pub g: u8,
    /// Blue channel.
    pub b: u8,
    /// Alpha in `0.0..=1.0`.
    pub alpha: f64,
}

impl Color {
    /// Opaque black, the 2D context default for fill and stroke.
    pub const BLACK: Self = Self::rgb(0, 0, 0);
    /// Fully transparent black.
    pub const TRANSPARENT: Self = Self::rgba(0, 0, 0, 0.0);

    /// Create an opaque color.
    #[must_use]
    pub const fn rgb(r: u8, g: u8, b: u8) -> Self {
        Self::rgba(r, g, b, 1.0)
    }

    /// Create a color with alpha.
    #[must_use]
    pub const fn rgba(r: u8, g: u8, b: u8, alpha: f64) -> Self {
        Self { r, g, b, alpha }
    }

    /// Alpha as an 8-bit channel value.
    #[must_use]
    #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
    pub fn alpha_u8(&self) -> u8 {
        (self.alpha.clamp(0.0, 1.0) * 255.0).round() as u8
    }

    /// Parse a `#rgb`, `#rrggbb` or `#rrggbbaa` hex string.
    ///
    /// # Errors
    ///
    /// Returns [`CanvasError::InvalidColor`] for any other shape.
    pub fn from_hex(input: &str) -> CanvasResult<Self> {
        let invalid = || CanvasError::InvalidColor(input.to_string());
        let hex = input.strip_prefix('#').ok_or_else(invalid)?;
        if !hex.is_ascii() {
            return Err(invalid());
        }

        let channel = |s: &str| u8::from_str_radix(s, 16).map_err(|_| invalid());
        match hex.len() {
            3 => {
                let expand = |i: usize| channel(&hex[i..=i]).map(|v| v * 17);
                Ok(Self::rgb(expand(0)?, expand(1)?, expand(2)?))
            }
            6 | 8 => {
                let alpha = if hex.len() == 8 {
                    f64::from(channel(&hex[6..8])?) / 255.0
                } else {
                    1.0
                };
                Ok(Self::rgba(
                    channel(&hex[0..2])?,
                    channel(&hex[2..4])?,
                    channel(&hex[4..6])?,
                    alpha,
                ))
            }
            _ => Err(invalid()),
        }
    }

    /// Parse an `rgb(r, g, b)` or `rgba(r, g, b, a)` function string.
    fn from_function(input: &str) -> CanvasResult<Self> {
        let invalid = || CanvasError::InvalidColor(input.to_string());
        let (args, expected) = if let Some(rest) = input.strip_prefix("rgba(") {
            (rest, 4)
        } else if let Some(rest) = input.strip_prefix("rgb(") {
            (rest, 3)
        } else {
            return Err(invalid());
        };
        let args = args.strip_suffix(')').ok_or_else(invalid)?;

        let parts: Vec<&str> = args.split(',').map(str::trim).collect();
        if parts.len() != expected {
            return Err(invalid());
        }
        let channel = |s: &str| s.parse::<u8>().map_err(|_| invalid());
        let alpha = match parts.get(3) {
            Some(a) => a
                .parse::<f64>()
                .ok()
                .filter(|a| (0.0..=1.0).contains(a))
                .ok_or_else(invalid)?,
            None => 1.0,
        };

        Ok(Self::rgba(
            channel(parts[0])?,
            channel(parts[1])?,
            channel(parts[2])?,
            alpha,
        ))
    }
}

impl Default for Color {
    fn default() -> Self {
        Self::BLACK
    }
}

impl fmt::Display for Color {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "rgba({}, {}, {}, {})", self.r, self.g, self.b, self.alpha)
    }
}

impl FromStr for Color {
    type Err = CanvasError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        if s.starts_with('#') {
            Self::from_hex(s)
        } else {
            Self::from_function(&s.to_ascii_lowercase())
        }
    }
}

impl TryFrom<String> for Color {
    type Error = CanvasError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl From<Color> for String {
    fn from(color: Color) -> Self {
        color.to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn serializes_as_rgba_string() {
        assert_eq!(Color::rgb(255, 0, 0).to_string(), "rgba(255, 0, 0, 1)");
        assert_eq!(
            Color::rgba(10, 20, 30, 0.5).to_string(),
            "rgba(10, 20, 30, 0.5)"
        );
    }

    #[test]
    fn parses_hex_forms() {
        assert_eq!("#f00".parse::<Color>().expect("short"), Color::rgb(255, 0, 0));
        assert_eq!(
            "#336699".parse::<Color>().expect("long"),
            Color::rgb(0x33, 0x66, 0x99)
        );
        let with_alpha: Color = "#00000080".parse().expect("alpha");
        assert_eq!(with_alpha.alpha_u8(), 0x80);
    }

    #[test]
    fn parses_functional_forms() {
        assert_eq!(
            "rgb(1, 2, 3)".parse::<Color>().expect("rgb"),
            Color::rgb(1, 2, 3)
        );
        assert_eq!(
            "RGBA(4,5,6,0.25)".parse::<Color>().expect("rgba"),
            Color::rgba(4, 5, 6, 0.25)
        );
    }

    #[test]
    fn display_output_parses_back() {
        let color = Color::rgba(12, 34, 56, 0.75);
        assert_eq!(color.to_string().parse::<Color>().expect("round"), color);
    }

    #[test]
    fn rejects_malformed_colors() {
        for input in [
            "red",
            "transparent",
            "hsl(0, 100%, 50%)",
            "hsla(0, 100%, 50%, 1)",
            "#12",
            "#gggggg",
            "rgb(1,2)",
            "rgba(1,2,3,2)",
            "rgb(300,0,0)",
        ] {
            assert!(input.parse::<Color>().is_err(), "{input} should be rejected");
        }
    }

    #[test]
    fn json_uses_string_form() {
        let color: Color = serde_json::from_str("\"#ffffff\"").expect("json");
        assert_eq!(color, Color::rgb(255, 255, 255));
        let json = serde_json::to_string(&color).expect("serialize");
        assert_eq!(json, "\"rgba(255, 255, 255, 1)\"");
    }
}

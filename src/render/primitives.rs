use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use smallvec::{SmallVec, smallvec};

use crate::error::{ChartError, ChartResult};

/// RGBA color in normalized 0..=1 channel values.
///
/// Serialized as a `#rrggbb` (opaque) or `#rrggbbaa` hex string.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct Color {
    pub red: f64,
    pub green: f64,
    pub blue: f64,
    pub alpha: f64,
}

impl Color {
    pub const WHITE: Self = Self::rgb(1.0, 1.0, 1.0);

    #[must_use]
    pub const fn rgba(red: f64, green: f64, blue: f64, alpha: f64) -> Self {
        Self {
            red,
            green,
            blue,
            alpha,
        }
    }

    #[must_use]
    pub const fn rgb(red: f64, green: f64, blue: f64) -> Self {
        Self::rgba(red, green, blue, 1.0)
    }

    /// Builds an opaque color from 8-bit channels.
    #[must_use]
    pub fn from_rgb8(red: u8, green: u8, blue: u8) -> Self {
        Self::rgb(
            f64::from(red) / 255.0,
            f64::from(green) / 255.0,
            f64::from(blue) / 255.0,
        )
    }

    /// Parses `#rgb`, `#rrggbb` or `#rrggbbaa`.
    pub fn from_hex(hex: &str) -> ChartResult<Self> {
        let digits = hex.strip_prefix('#').unwrap_or(hex);
        if !digits.bytes().all(|byte| byte.is_ascii_hexdigit()) {
            return Err(invalid_hex(hex));
        }
        let channel = |range: std::ops::Range<usize>| {
            u8::from_str_radix(&digits[range], 16).map_err(|_| invalid_hex(hex))
        };
        let short = |index: usize| channel(index..index + 1).map(|value| value * 17);

        let (red, green, blue, alpha) = match digits.len() {
            3 => (short(0)?, short(1)?, short(2)?, 255),
            6 => (channel(0..2)?, channel(2..4)?, channel(4..6)?, 255),
            8 => (channel(0..2)?, channel(2..4)?, channel(4..6)?, channel(6..8)?),
            _ => return Err(invalid_hex(hex)),
        };
        Ok(Self::rgba(
            f64::from(red) / 255.0,
            f64::from(green) / 255.0,
            f64::from(blue) / 255.0,
            f64::from(alpha) / 255.0,
        ))
    }

    /// Formats as `#rrggbb`, or `#rrggbbaa` when not fully opaque.
    #[must_use]
    pub fn to_hex(self) -> String {
        let [red, green, blue, alpha] =
            [self.red, self.green, self.blue, self.alpha].map(to_channel_u8);
        if alpha == 255 {
            format!("#{red:02x}{green:02x}{blue:02x}")
        } else {
            format!("#{red:02x}{green:02x}{blue:02x}{alpha:02x}")
        }
    }

    pub fn validate(self) -> ChartResult<()> {
        for (channel, value) in [
            ("red", self.red),
            ("green", self.green),
            ("blue", self.blue),
            ("alpha", self.alpha),
        ] {
            if !value.is_finite() || !(0.0..=1.0).contains(&value) {
                return Err(ChartError::InvalidData(format!(
                    "color channel `{channel}` must be finite and in [0, 1]"
                )));
            }
        }
        Ok(())
    }
}

impl FromStr for Color {
    type Err = ChartError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        Self::from_hex(value)
    }
}

impl TryFrom<String> for Color {
    type Error = ChartError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::from_hex(&value)
    }
}

impl From<Color> for String {
    fn from(color: Color) -> Self {
        color.to_hex()
    }
}

impl fmt::Display for Color {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_hex())
    }
}

fn to_channel_u8(value: f64) -> u8 {
    (value.clamp(0.0, 1.0) * 255.0).round() as u8
}

fn invalid_hex(hex: &str) -> ChartError {
    ChartError::InvalidData(format!("`{hex}` is not a #rgb, #rrggbb or #rrggbbaa color"))
}

/// Stroke pattern of a drawn line.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum LineStrokeStyle {
    #[default]
    Solid,
    Dashed,
    Dotted,
}

impl LineStrokeStyle {
    /// Dash segments in bitmap pixels; empty for a solid stroke.
    #[must_use]
    pub fn dash_pattern(self, pixel_ratio: f64) -> SmallVec<[f64; 2]> {
        match self {
            Self::Solid => SmallVec::new(),
            Self::Dashed => smallvec![6.0 * pixel_ratio, 4.0 * pixel_ratio],
            Self::Dotted => smallvec![2.0 * pixel_ratio, 2.0 * pixel_ratio],
        }
    }
}

/// Horizontal text alignment relative to the anchor x.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TextHAlign {
    Left,
    Center,
    Right,
}

/// Vertical text placement relative to the anchor y.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TextBaseline {
    Top,
    Middle,
    Bottom,
}

#[cfg(test)]
mod tests {
    use super::{Color, LineStrokeStyle};

    #[test]
    fn hex_colors_parse_and_format() {
        let green = Color::from_hex("#16a34a").expect("valid hex");
        assert_eq!(green, Color::from_rgb8(0x16, 0xa3, 0x4a));
        assert_eq!(green.to_hex(), "#16a34a");

        let short: Color = "#fff".parse().expect("valid short hex");
        assert_eq!(short, Color::WHITE);

        let translucent = Color::from_hex("#00000080").expect("valid hex with alpha");
        assert_eq!(translucent.to_hex(), "#00000080");
    }

    #[test]
    fn malformed_hex_is_rejected() {
        for value in ["", "#12", "#12345", "#gggggg", "#é12"] {
            assert!(Color::from_hex(value).is_err(), "{value} should fail");
        }
    }

    #[test]
    fn dash_patterns_scale_with_pixel_ratio() {
        assert!(LineStrokeStyle::Solid.dash_pattern(2.0).is_empty());
        assert_eq!(
            LineStrokeStyle::Dashed.dash_pattern(2.0).as_slice(),
            &[12.0, 8.0]
        );
        assert_eq!(
            LineStrokeStyle::Dotted.dash_pattern(1.5).as_slice(),
            &[3.0, 3.0]
        );
    }
}

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::consts::{DEFAULT_COLOR, DEFAULT_OPACITY};
use crate::error::{Result, WatermarkError};
use crate::filename::trim_form_text;

/// Watermark alpha, 0 (invisible) to 255 (opaque).
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Opacity(pub u8);

impl Opacity {
    pub fn value(self) -> u8 {
        self.0
    }

    /// Percentage shown next to the slider: round(value / 255 * 100).
    pub fn percent(self) -> u8 {
        ((self.0 as f32 / 255.0) * 100.0).round() as u8
    }

    pub fn label(self) -> String {
        format!("{}%", self.percent())
    }
}

impl Default for Opacity {
    fn default() -> Self {
        Self(DEFAULT_OPACITY)
    }
}

/// An sRGB color in `#rrggbb` form.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct HexColor {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl HexColor {
    pub fn from_rgb(rgb: [u8; 3]) -> Self {
        Self {
            r: rgb[0],
            g: rgb[1],
            b: rgb[2],
        }
    }

    pub fn rgb(self) -> [u8; 3] {
        [self.r, self.g, self.b]
    }

    /// Lowercase wire form, as a browser color input reports it.
    pub fn to_hex(self) -> String {
        format!("#{:02x}{:02x}{:02x}", self.r, self.g, self.b)
    }

    /// Uppercase display form.
    pub fn label(self) -> String {
        self.to_hex().to_uppercase()
    }
}

impl Default for HexColor {
    fn default() -> Self {
        Self::from_rgb(DEFAULT_COLOR)
    }
}

impl FromStr for HexColor {
    type Err = WatermarkError;

    fn from_str(s: &str) -> Result<Self> {
        let hex = s.trim().strip_prefix('#').unwrap_or(s.trim());
        if hex.len() != 6 || !hex.chars().all(|c| c.is_ascii_hexdigit()) {
            return Err(WatermarkError::InvalidColor(s.to_string()));
        }
        let channel = |i: usize| {
            u8::from_str_radix(&hex[i..i + 2], 16)
                .map_err(|_| WatermarkError::InvalidColor(s.to_string()))
        };
        Ok(Self {
            r: channel(0)?,
            g: channel(2)?,
            b: channel(4)?,
        })
    }
}

impl TryFrom<String> for HexColor {
    type Error = WatermarkError;

    fn try_from(value: String) -> Result<Self> {
        value.parse()
    }
}

impl From<HexColor> for String {
    fn from(color: HexColor) -> Self {
        color.to_hex()
    }
}

impl fmt::Display for HexColor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_hex())
    }
}

/// Parameters sent with a processing request.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct WatermarkParameters {
    /// Trimmed, non-empty watermark text.
    pub text: String,
    pub opacity: Opacity,
    pub color: HexColor,
}

impl WatermarkParameters {
    /// Capture parameters from raw form values. Returns `None` when the text
    /// is blank after trimming.
    pub fn capture(text: &str, opacity: Opacity, color: HexColor) -> Option<Self> {
        let text = trim_form_text(text);
        if text.is_empty() {
            return None;
        }
        Some(Self {
            text: text.to_string(),
            opacity,
            color,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_hex_color_parse_and_labels() {
        let c: HexColor = "#ff8800".parse().unwrap();
        assert_eq!(c.rgb(), [255, 136, 0]);
        assert_eq!(c.to_hex(), "#ff8800");
        assert_eq!(c.label(), "#FF8800");
    }

    #[test]
    fn test_hex_color_rejects_short_input() {
        assert!("#fff".parse::<HexColor>().is_err());
        assert!("#gg0000".parse::<HexColor>().is_err());
    }

    #[test]
    fn test_capture_trims_and_rejects_blank() {
        let p = WatermarkParameters::capture("  Sample ", Opacity(10), HexColor::default()).unwrap();
        assert_eq!(p.text, "Sample");
        assert!(WatermarkParameters::capture("   ", Opacity(10), HexColor::default()).is_none());
    }
}

//! Handwriting style values supplied by callers per layout call.

use core::fmt;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Fixed average glyph width, in ems, used when a measurement is unavailable.
pub const FALLBACK_GLYPH_EM: f32 = 0.6;

/// Error returned when parsing style values.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum StyleError {
    /// Ink color was not `#rgb` or `#rrggbb`.
    InvalidColor(String),
}

impl fmt::Display for StyleError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::InvalidColor(value) => write!(f, "invalid ink color '{}'", value),
        }
    }
}

impl std::error::Error for StyleError {}

/// Opaque RGB ink color.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Default)]
#[cfg_attr(
    feature = "serde",
    derive(Serialize, Deserialize),
    serde(try_from = "String", into = "String")
)]
pub struct InkColor {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl InkColor {
    pub const BLACK: Self = Self::rgb(0, 0, 0);

    pub const fn rgb(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }

    /// Parse `#rrggbb` or `#rgb` (the leading `#` is optional).
    pub fn parse_hex(value: &str) -> Result<Self, StyleError> {
        let invalid = || StyleError::InvalidColor(value.to_string());
        let hex = value.trim();
        let hex = hex.strip_prefix('#').unwrap_or(hex);
        if !hex.bytes().all(|b| b.is_ascii_hexdigit()) {
            return Err(invalid());
        }
        let channel = |s: &str| u8::from_str_radix(s, 16).map_err(|_| invalid());
        match hex.len() {
            6 => Ok(Self::rgb(
                channel(&hex[0..2])?,
                channel(&hex[2..4])?,
                channel(&hex[4..6])?,
            )),
            3 => {
                let r = channel(&hex[0..1])?;
                let g = channel(&hex[1..2])?;
                let b = channel(&hex[2..3])?;
                Ok(Self::rgb(r * 17, g * 17, b * 17))
            }
            _ => Err(invalid()),
        }
    }

    /// Lowercase `#rrggbb` form.
    pub fn to_hex(self) -> String {
        format!("#{:02x}{:02x}{:02x}", self.r, self.g, self.b)
    }
}

impl fmt::Display for InkColor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{:02x}{:02x}{:02x}", self.r, self.g, self.b)
    }
}

impl core::str::FromStr for InkColor {
    type Err = StyleError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse_hex(s)
    }
}

impl TryFrom<String> for InkColor {
    type Error = StyleError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::parse_hex(&value)
    }
}

impl From<InkColor> for String {
    fn from(value: InkColor) -> Self {
        value.to_hex()
    }
}

/// Visual handwriting style.
///
/// Lengths are in layout units, the same units the page geometry and the
/// glyph measurer use. The engine never mutates a style.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct HandwritingStyle {
    /// Font identifier (backend-defined meaning).
    pub font: String,
    /// Font size.
    pub size: f32,
    /// Slant in degrees; positive leans right.
    pub slant: f32,
    /// Line height multiplier applied to `size`.
    pub line_spacing: f32,
    /// Advance multiplier applied to space characters.
    pub word_spacing: f32,
    /// Ink color.
    pub ink_color: InkColor,
}

impl HandwritingStyle {
    /// Build a style with the default spacing and black ink.
    pub fn new(font: impl Into<String>, size: f32) -> Self {
        Self {
            font: font.into(),
            size,
            ..Self::default()
        }
    }

    pub fn with_slant(mut self, slant: f32) -> Self {
        self.slant = slant;
        self
    }

    pub fn with_line_spacing(mut self, line_spacing: f32) -> Self {
        self.line_spacing = line_spacing;
        self
    }

    pub fn with_word_spacing(mut self, word_spacing: f32) -> Self {
        self.word_spacing = word_spacing;
        self
    }

    pub fn with_ink_color(mut self, ink_color: InkColor) -> Self {
        self.ink_color = ink_color;
        self
    }

    /// Vertical distance between consecutive line baselines.
    pub fn line_height(&self) -> f32 {
        self.size * self.line_spacing
    }

    /// Width assumed for one glyph when measurement fails.
    pub fn fallback_glyph_width(&self) -> f32 {
        self.size * FALLBACK_GLYPH_EM
    }

    /// Built-in styles shipped with the editor.
    pub fn presets() -> [Self; 3] {
        [
            Self::default(),
            Self {
                font: "Caveat".to_string(),
                size: 22.0,
                slant: 4.0,
                line_spacing: 1.4,
                word_spacing: 1.1,
                ink_color: InkColor::rgb(0x1b, 0x3f, 0xd6),
            },
            Self {
                font: "Caveat".to_string(),
                size: 18.0,
                slant: -2.0,
                line_spacing: 1.6,
                word_spacing: 1.2,
                ink_color: InkColor::rgb(0x2d, 0x2d, 0x2d),
            },
        ]
    }
}

impl Default for HandwritingStyle {
    fn default() -> Self {
        Self {
            font: "Caveat".to_string(),
            size: 20.0,
            slant: 0.0,
            line_spacing: 1.5,
            word_spacing: 1.1,
            ink_color: InkColor::BLACK,
        }
    }
}

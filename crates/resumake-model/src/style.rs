//! Preview style chosen in the toolbar

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Errors raised when parsing model values from text
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ModelError {
    /// Not a `#RGB` / `#RRGGBB` color
    #[error("Invalid theme color: {0}")]
    InvalidThemeColor(String),

    /// Not one of the offered line heights
    #[error("Invalid line height: {0} (expected one of 1.0, 1.2, 1.5, 1.8, 2.0)")]
    InvalidLineHeight(String),

    /// Unsupported locale tag
    #[error("Unknown locale: {0}")]
    UnknownLocale(String),
}

/// Line height of the preview, stored in tenths
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct LineHeight(u8);

impl LineHeight {
    /// Values offered by the toolbar, in tenths
    pub const CHOICES: [LineHeight; 5] = [
        LineHeight(10),
        LineHeight(12),
        LineHeight(15),
        LineHeight(18),
        LineHeight(20),
    ];

    pub fn as_f32(self) -> f32 {
        f32::from(self.0) / 10.0
    }
}

impl Default for LineHeight {
    fn default() -> Self {
        LineHeight(12)
    }
}

impl fmt::Display for LineHeight {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}.{}", self.0 / 10, self.0 % 10)
    }
}

impl FromStr for LineHeight {
    type Err = ModelError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let value: f32 = s
            .trim()
            .parse()
            .map_err(|_| ModelError::InvalidLineHeight(s.to_string()))?;
        let tenths = (value * 10.0).round();
        Self::CHOICES
            .into_iter()
            .find(|choice| f32::from(choice.0) == tenths)
            .ok_or_else(|| ModelError::InvalidLineHeight(s.to_string()))
    }
}

impl TryFrom<String> for LineHeight {
    type Error = ModelError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl From<LineHeight> for String {
    fn from(value: LineHeight) -> Self {
        value.to_string()
    }
}

/// Accent color of section titles and rules
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct ThemeColor {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl ThemeColor {
    pub const fn new(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }

    /// Lowercase `#rrggbb`, as CSS and Typst `rgb()` accept it
    pub fn hex(self) -> String {
        format!("#{:02x}{:02x}{:02x}", self.r, self.g, self.b)
    }
}

impl Default for ThemeColor {
    /// Royal blue
    fn default() -> Self {
        ThemeColor::new(0x41, 0x69, 0xe1)
    }
}

impl fmt::Display for ThemeColor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{:02X}{:02X}{:02X}", self.r, self.g, self.b)
    }
}

impl FromStr for ThemeColor {
    type Err = ModelError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let invalid = || ModelError::InvalidThemeColor(s.to_string());
        let hex = s.trim().strip_prefix('#').ok_or_else(invalid)?;
        if !hex.chars().all(|c| c.is_ascii_hexdigit()) {
            return Err(invalid());
        }

        let channel = |digits: &str| u8::from_str_radix(digits, 16).map_err(|_| invalid());
        match hex.len() {
            6 => Ok(ThemeColor::new(
                channel(&hex[0..2])?,
                channel(&hex[2..4])?,
                channel(&hex[4..6])?,
            )),
            3 => {
                let expand = |i: usize| channel(&hex[i..i + 1].repeat(2));
                Ok(ThemeColor::new(expand(0)?, expand(1)?, expand(2)?))
            }
            _ => Err(invalid()),
        }
    }
}

impl TryFrom<String> for ThemeColor {
    type Error = ModelError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl From<ThemeColor> for String {
    fn from(value: ThemeColor) -> Self {
        value.to_string()
    }
}

/// Everything the toolbar controls
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct PreviewStyle {
    pub line_height: LineHeight,
    pub theme_color: ThemeColor,
}

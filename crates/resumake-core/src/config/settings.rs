//! Configuration settings

use std::fmt;
use std::str::FromStr;

use resumake_model::{LineHeight, Locale, PreviewStyle, ThemeColor};
use serde::{Deserialize, Serialize};

/// File names looked up in the working directory, in order
pub const CONFIG_FILENAMES: [&str; 2] = ["resumake.toml", ".resumake.toml"];

/// How the PDF is produced
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum ExportMode {
    /// Native text layout, paginated
    #[default]
    Structured,
    /// Preview captured as an image on one A4 page
    Raster,
}

impl fmt::Display for ExportMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ExportMode::Structured => f.write_str("structured"),
            ExportMode::Raster => f.write_str("raster"),
        }
    }
}

impl FromStr for ExportMode {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "structured" => Ok(ExportMode::Structured),
            "raster" => Ok(ExportMode::Raster),
            other => Err(format!("unknown export mode: {}", other)),
        }
    }
}

/// Top-level settings structure
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct Settings {
    /// Label and date language
    pub locale: Locale,
    /// Preview toolbar defaults
    pub style: StyleSettings,
    /// PDF export
    pub export: ExportSettings,
}

impl Settings {
    /// Parse settings from a TOML string
    pub fn from_toml_str(toml_str: &str) -> Result<Self, toml::de::Error> {
        toml::from_str(toml_str)
    }

    /// Configured output name, else the locale's default
    pub fn export_filename(&self) -> String {
        self.export
            .filename
            .clone()
            .unwrap_or_else(|| self.locale.default_filename().to_string())
    }
}

/// Preview style defaults
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct StyleSettings {
    pub theme_color: ThemeColor,
    pub line_height: LineHeight,
}

impl StyleSettings {
    pub fn preview_style(&self) -> PreviewStyle {
        PreviewStyle {
            line_height: self.line_height,
            theme_color: self.theme_color,
        }
    }
}

/// PDF export configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ExportSettings {
    pub mode: ExportMode,
    /// Overrides the locale's default filename
    pub filename: Option<String>,
    /// Extra font files handed to the Typst compiler
    pub fonts: Vec<String>,
    /// Search fonts installed on this machine as well as the bundled ones
    pub system_fonts: bool,
    /// Raster scale, in pixels per point
    pub pixel_per_pt: f32,
}

impl Default for ExportSettings {
    fn default() -> Self {
        Self {
            mode: ExportMode::Structured,
            filename: None,
            fonts: Vec::new(),
            system_fonts: true,
            pixel_per_pt: 2.0,
        }
    }
}

//! Tests for settings loading

use super::*;
use resumake_model::{Locale, ThemeColor};

#[test]
fn test_load_config_from_toml() {
    let toml = r##"
locale = "zh-cn"

[style]
theme_color = "#FF0000"
line_height = "1.5"

[export]
mode = "raster"
fonts = ["fonts/a.ttf"]
system_fonts = false
pixel_per_pt = 3.0
"##;

    let settings = Settings::from_toml_str(toml).unwrap();

    assert_eq!(settings.locale, Locale::ZhCn);
    assert_eq!(settings.style.theme_color, ThemeColor::new(255, 0, 0));
    assert_eq!(settings.style.line_height.to_string(), "1.5");
    assert_eq!(settings.export.mode, ExportMode::Raster);
    assert_eq!(settings.export.fonts, vec!["fonts/a.ttf".to_string()]);
    assert_eq!(settings.export.pixel_per_pt, 3.0);
    assert!(!settings.export.system_fonts);
}

#[test]
fn test_default_settings() {
    let settings = Settings::default();

    assert_eq!(settings.locale, Locale::En);
    assert_eq!(settings.export.mode, ExportMode::Structured);
    assert_eq!(settings.export.pixel_per_pt, 2.0);
    assert!(settings.export.system_fonts);
    assert_eq!(settings.style.preview_style(), Default::default());
}

#[test]
fn test_partial_config_keeps_defaults() {
    let settings = Settings::from_toml_str("[export]\nfilename = \"cv.pdf\"\n").unwrap();

    assert_eq!(settings.export.filename.as_deref(), Some("cv.pdf"));
    assert_eq!(settings.export.pixel_per_pt, 2.0);
    assert_eq!(settings.export_filename(), "cv.pdf");
}

#[test]
fn test_export_filename_follows_locale() {
    let settings = Settings::from_toml_str("locale = \"zh-cn\"").unwrap();
    assert_eq!(settings.export_filename(), "我的简历.pdf");
    assert_eq!(Settings::default().export_filename(), "resume.pdf");
}

#[test]
fn test_invalid_values_are_rejected() {
    assert!(Settings::from_toml_str("[style]\ntheme_color = \"blue\"").is_err());
    assert!(Settings::from_toml_str("[style]\nline_height = \"3.0\"").is_err());
    assert!(Settings::from_toml_str("locale = \"fr\"").is_err());
    assert!(Settings::from_toml_str("[export]\nmode = \"svg\"").is_err());
}

#[test]
fn test_export_mode_from_str() {
    assert_eq!("Raster".parse::<ExportMode>(), Ok(ExportMode::Raster));
    assert!("svg".parse::<ExportMode>().is_err());
    assert_eq!(ExportMode::Structured.to_string(), "structured");
}

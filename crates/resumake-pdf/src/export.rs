//! Export orchestration
//!
//! [`Exporter::export`] produces PDF bytes in either mode and reports
//! failures; [`Exporter::save`] is the one-click routine that writes the
//! file and turns any failure into a logged error.

use std::fs;
use std::path::{Path, PathBuf};

use resumake_core::config::Settings;
use resumake_core::{ExportMode, ResumeEditor};
use tracing::{debug, error, info};

use crate::compiler::{Compiler, FontSet};
use crate::error::Result;
use crate::raster::{Rasterizer, DEFAULT_PIXEL_PER_PT};
use crate::transpiler::Transpiler;

/// Export options
#[derive(Debug, Clone, PartialEq)]
pub struct Exporter {
    font_paths: Vec<String>,
    system_fonts: bool,
    pixel_per_pt: f32,
    filename: Option<String>,
}

impl Default for Exporter {
    fn default() -> Self {
        Self {
            font_paths: Vec::new(),
            system_fonts: true,
            pixel_per_pt: DEFAULT_PIXEL_PER_PT,
            filename: None,
        }
    }
}

impl Exporter {
    pub fn new() -> Self {
        Self::default()
    }

    /// Take fonts, raster scale and filename from `[export]`
    pub fn from_settings(settings: &Settings) -> Self {
        Self {
            font_paths: settings.export.fonts.clone(),
            system_fonts: settings.export.system_fonts,
            pixel_per_pt: settings.export.pixel_per_pt,
            filename: settings.export.filename.clone(),
        }
    }

    pub fn with_fonts(mut self, font_paths: Vec<String>) -> Self {
        self.font_paths = font_paths;
        self
    }

    pub fn with_system_fonts(mut self, system_fonts: bool) -> Self {
        self.system_fonts = system_fonts;
        self
    }

    pub fn with_filename(mut self, filename: impl Into<String>) -> Self {
        self.filename = Some(filename.into());
        self
    }

    /// Output name: configured, else the editor locale's default
    pub fn filename(&self, editor: &ResumeEditor) -> String {
        self.filename
            .clone()
            .unwrap_or_else(|| editor.locale().default_filename().to_string())
    }

    /// Render the résumé to PDF bytes
    ///
    /// Raster mode hides the overlay controls for the capture; they are
    /// restored whether or not the export succeeds.
    pub fn export(&self, editor: &mut ResumeEditor, mode: ExportMode) -> Result<Vec<u8>> {
        debug!(%mode, "exporting");
        match mode {
            ExportMode::Structured => {
                let fonts = self.load_fonts()?;
                let markup = Transpiler::structured(editor);
                let document = Compiler::compile_document(&markup, &fonts, Vec::new())?;
                Compiler::pdf(&document)
            }
            ExportMode::Raster => {
                let hidden = editor.hide_controls();
                let fonts = self.load_fonts()?;
                let markup = Transpiler::preview(&hidden);
                Rasterizer::new(self.pixel_per_pt)
                    .with_fonts(fonts)
                    .render_pdf(&markup)
            }
        }
    }

    /// Export and write `dir/<filename>`. Failures are logged and yield
    /// `None`.
    pub fn save(&self, editor: &mut ResumeEditor, mode: ExportMode, dir: &Path) -> Option<PathBuf> {
        let path = dir.join(self.filename(editor));
        match self.save_to(editor, mode, &path) {
            Ok(()) => {
                info!(path = %path.display(), %mode, "saved PDF");
                Some(path)
            }
            Err(e) => {
                error!(path = %path.display(), error = %e, "PDF export failed");
                None
            }
        }
    }

    /// Export and write to an explicit path
    pub fn save_to(&self, editor: &mut ResumeEditor, mode: ExportMode, path: &Path) -> Result<()> {
        let pdf = self.export(editor, mode)?;
        fs::write(path, pdf)?;
        Ok(())
    }

    fn load_fonts(&self) -> Result<FontSet> {
        let paths: Vec<&str> = self.font_paths.iter().map(String::as_str).collect();
        Ok(FontSet::default()
            .with_system(self.system_fonts)
            .with_files(Compiler::load_fonts(&paths)?))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::PdfError;
    use resumake_model::{EducationField, Locale, PersonalField};

    fn jane() -> ResumeEditor {
        let mut editor = ResumeEditor::new(Locale::En);
        for (field, value) in [
            (PersonalField::Name, "Jane Doe"),
            (PersonalField::Phone, "555-0100"),
            (PersonalField::Email, "jane@x.com"),
            (PersonalField::City, "Springfield"),
            (PersonalField::Position, "Engineer"),
        ] {
            editor.edit_personal(field, value.to_string());
        }
        editor.edit_education(0, EducationField::School, "State University".into());
        editor
    }

    #[test]
    fn test_structured_export() {
        let mut editor = jane();
        let pdf = Exporter::new()
            .export(&mut editor, ExportMode::Structured)
            .unwrap();
        assert!(pdf.starts_with(b"%PDF"));
    }

    #[test]
    fn test_structured_layout_carries_resume_text() {
        let markup = Transpiler::structured(&jane());
        let document = Compiler::compile_document(&markup, &FontSet::bundled(), Vec::new()).unwrap();
        let text: String = crate::compiler::document_text(&document)
            .split_whitespace()
            .collect();
        assert!(text.contains("JaneDoe"), "laid-out text: {}", text);
        assert!(text.contains("StateUniversity"), "laid-out text: {}", text);
        assert!(text.contains("jane@x.com"), "laid-out text: {}", text);
    }

    #[test]
    fn test_raster_capture_is_not_blank() {
        let mut editor = jane();
        let hidden = editor.hide_controls();
        let markup = Transpiler::preview(&hidden);
        let capture = Rasterizer::new(1.0)
            .with_fonts(FontSet::bundled())
            .capture(&markup)
            .unwrap();
        assert!(!capture.blank);
    }

    #[test]
    fn test_raster_export_restores_controls() {
        let mut editor = jane();
        let pdf = Exporter::new().export(&mut editor, ExportMode::Raster).unwrap();
        assert!(pdf.starts_with(b"%PDF"));
        assert!(editor.chrome().controls_visible);
    }

    #[test]
    fn test_failed_export_restores_controls() {
        let mut editor = jane();
        let exporter = Exporter::new().with_fonts(vec!["/nonexistent/font.ttf".to_string()]);
        let result = exporter.export(&mut editor, ExportMode::Raster);
        assert!(matches!(result, Err(PdfError::Font(_))));
        assert!(editor.chrome().controls_visible);
    }

    #[test]
    fn test_save_uses_locale_filename() {
        let dir = tempfile::tempdir().unwrap();
        let mut editor = jane();
        editor.set_locale(Locale::ZhCn);

        let path = Exporter::new()
            .save(&mut editor, ExportMode::Structured, dir.path())
            .unwrap();
        assert_eq!(path, dir.path().join("我的简历.pdf"));
        assert!(fs::read(&path).unwrap().starts_with(b"%PDF"));
    }

    #[test]
    fn test_save_failure_returns_none() {
        let dir = tempfile::tempdir().unwrap();
        let missing = dir.path().join("missing");
        let mut editor = jane();

        let saved = Exporter::new()
            .with_filename("cv.pdf")
            .save(&mut editor, ExportMode::Structured, &missing);
        assert!(saved.is_none());
        assert!(editor.chrome().controls_visible);
    }

    #[test]
    fn test_from_settings() {
        let settings =
            Settings::from_toml_str("[export]\nfilename = \"cv.pdf\"\npixel_per_pt = 1.5").unwrap();
        let exporter = Exporter::from_settings(&settings);
        assert_eq!(exporter.filename(&jane()), "cv.pdf");
        assert_eq!(exporter.pixel_per_pt, 1.5);
        assert!(exporter.system_fonts);

        let settings = Settings::from_toml_str("[export]\nsystem_fonts = false").unwrap();
        assert!(!Exporter::from_settings(&settings).system_fonts);
    }
}

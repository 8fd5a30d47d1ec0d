//! Typst to PDF compiler
//!
//! Compiles Typst markup with typst-as-lib. Callers that need the laid-out
//! pages (rasterization) use [`Compiler::compile_document`]; everything else
//! goes straight to PDF bytes.
//!
//! The Typst default fonts are always available. Fonts installed on the
//! machine are searched too unless [`FontSet::system`] is off, which is
//! where CJK glyphs for the `zh-cn` locale usually come from.

use tracing::{debug, warn};
use typst::layout::PagedDocument;
use typst_as_lib::typst_kit_options::TypstKitFontOptions;
use typst_as_lib::TypstEngine;

use crate::error::{PdfError, Result};

/// Fonts handed to the Typst engine
#[derive(Debug, Clone)]
pub struct FontSet {
    /// Extra font files, on top of the bundled ones
    pub files: Vec<Vec<u8>>,
    /// Also search the fonts installed on this machine
    pub system: bool,
}

impl Default for FontSet {
    fn default() -> Self {
        Self {
            files: Vec::new(),
            system: true,
        }
    }
}

impl FontSet {
    /// Bundled fonts only, the same output on every machine
    pub fn bundled() -> Self {
        Self {
            files: Vec::new(),
            system: false,
        }
    }

    pub fn with_files(mut self, files: Vec<Vec<u8>>) -> Self {
        self.files = files;
        self
    }

    pub fn with_system(mut self, system: bool) -> Self {
        self.system = system;
        self
    }
}

/// Compiler for converting Typst markup to PDF
pub struct Compiler;

impl Compiler {
    /// Compile Typst markup to PDF bytes
    pub fn compile(markup: &str) -> Result<Vec<u8>> {
        Self::compile_with_fonts(markup, &[])
    }

    /// Compile with custom fonts
    ///
    /// # Arguments
    /// * `markup` - Typst markup string
    /// * `font_paths` - Paths to font files to include
    pub fn compile_with_fonts(markup: &str, font_paths: &[&str]) -> Result<Vec<u8>> {
        let fonts = FontSet::default().with_files(Self::load_fonts(font_paths)?);
        let document = Self::compile_document(markup, &fonts, Vec::new())?;
        Self::pdf(&document)
    }

    /// Read font files into memory
    pub fn load_fonts(font_paths: &[&str]) -> Result<Vec<Vec<u8>>> {
        font_paths
            .iter()
            .map(|font_path| {
                std::fs::read(font_path).map_err(|e| {
                    PdfError::Font(format!("Failed to read font {}: {}", font_path, e))
                })
            })
            .collect()
    }

    /// Lay out markup into pages
    ///
    /// `files` are served to the markup by name, e.g. `image("preview.png")`.
    pub fn compile_document(
        markup: &str,
        fonts: &FontSet,
        files: Vec<(&'static str, Vec<u8>)>,
    ) -> Result<PagedDocument> {
        let engine = TypstEngine::builder()
            .main_file(markup.to_string())
            .search_fonts_with(
                TypstKitFontOptions::default()
                    .include_system_fonts(fonts.system)
                    .include_embedded_fonts(true),
            )
            .fonts(fonts.files.clone())
            .with_static_file_resolver(files)
            .build();

        // compiled is Warned<Result<Document, Error>>
        let compiled = engine.compile();
        for warning in &compiled.warnings {
            warn!(message = %warning.message, "typst warning");
        }

        let document: PagedDocument = compiled
            .output
            .map_err(|e| PdfError::Compilation(format!("{:?}", e)))?;
        debug!(pages = document.pages.len(), "compiled typst document");
        Ok(document)
    }

    /// Write laid-out pages as PDF
    pub fn pdf(document: &PagedDocument) -> Result<Vec<u8>> {
        let options = typst_pdf::PdfOptions::default();
        let pdf_bytes = typst_pdf::pdf(document, &options)
            .map_err(|e| PdfError::Compilation(format!("PDF generation failed: {:?}", e)))?;

        Ok(pdf_bytes.into())
    }
}

/// Every piece of text laid out in `document`, in frame order
pub fn document_text(document: &PagedDocument) -> String {
    fn walk(frame: &typst::layout::Frame, out: &mut String) {
        for (_, item) in frame.items() {
            match item {
                typst::layout::FrameItem::Group(group) => walk(&group.frame, out),
                typst::layout::FrameItem::Text(text) => {
                    out.push_str(text.text.as_str());
                    out.push(' ');
                }
                _ => {}
            }
        }
    }

    let mut out = String::new();
    for page in &document.pages {
        walk(&page.frame, &mut out);
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_compile_simple() {
        let markup = "= Jane Doe\n\nSoftware engineer.";
        let result = Compiler::compile(markup);

        assert!(result.is_ok(), "Compilation failed: {:?}", result.err());
        let pdf = result.unwrap();
        assert!(
            pdf.starts_with(b"%PDF"),
            "Output doesn't start with PDF header"
        );
    }

    #[test]
    fn test_compile_document_pages() {
        let markup = "#set page(paper: \"a4\")\nfirst\n#pagebreak()\nsecond";
        let document = Compiler::compile_document(markup, &FontSet::bundled(), Vec::new()).unwrap();
        assert_eq!(document.pages.len(), 2);
    }

    #[test]
    fn test_bundled_fonts_lay_out_glyphs() {
        let document =
            Compiler::compile_document("Hello resumake", &FontSet::bundled(), Vec::new()).unwrap();
        let text = document_text(&document);
        assert!(text.contains("Hello"), "laid-out text: {:?}", text);
        assert!(text.contains("resumake"), "laid-out text: {:?}", text);
    }

    #[test]
    fn test_compile_error_is_reported() {
        let result = Compiler::compile("#let x = (");
        assert!(matches!(result, Err(PdfError::Compilation(_))));
    }

    #[test]
    fn test_missing_font_file() {
        let result = Compiler::compile_with_fonts("hello", &["/nonexistent/font.ttf"]);
        assert!(matches!(result, Err(PdfError::Font(_))));
    }
}

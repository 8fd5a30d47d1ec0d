//! resumake-pdf - PDF export via Typst
//!
//! This crate turns a résumé editor's state into a PDF document using
//! Typst as the typesetting backend.
//!
//! # Architecture
//!
//! Two export paths share the same pipeline pieces:
//!
//! 1. **Transpiler** - Converts the editor state to Typst markup, either the
//!    paginated structured layout or the single-page preview
//! 2. **Compiler** - Compiles Typst markup to pages and PDF bytes
//! 3. **Rasterizer** - Renders the preview page to PNG and embeds it in an
//!    A4 page
//!
//! [`Exporter`] picks the path from an [`ExportMode`].
//!
//! # Example
//!
//! ```ignore
//! use resumake_core::{ExportMode, ResumeEditor};
//! use resumake_model::Locale;
//! use resumake_pdf::Exporter;
//!
//! let mut editor = ResumeEditor::new(Locale::En);
//! let pdf_bytes = Exporter::new().export(&mut editor, ExportMode::Structured)?;
//! ```

mod compiler;
mod error;
mod export;
mod raster;
mod transpiler;

pub use compiler::{document_text, Compiler, FontSet};
pub use error::{PdfError, Result};
pub use export::Exporter;
pub use raster::{Capture, Rasterizer};
pub use resumake_core::ExportMode;
pub use transpiler::Transpiler;

/// Convenience function to render an editor's résumé to PDF
///
/// # Arguments
/// * `editor` - The editing session to export
/// * `mode` - Structured layout or rasterized preview
///
/// # Returns
/// PDF bytes on success
pub fn render_pdf(editor: &mut resumake_core::ResumeEditor, mode: ExportMode) -> Result<Vec<u8>> {
    Exporter::new().export(editor, mode)
}

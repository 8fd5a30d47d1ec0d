//! Error types for PDF export

use thiserror::Error;

/// Result type for PDF operations
pub type Result<T> = std::result::Result<T, PdfError>;

/// Errors that can occur while exporting a résumé
#[derive(Error, Debug)]
pub enum PdfError {
    /// Typst compilation error
    #[error("Typst compilation failed: {0}")]
    Compilation(String),

    /// Font loading error
    #[error("Font error: {0}")]
    Font(String),

    /// Capturing the preview as an image failed
    #[error("Rasterization failed: {0}")]
    Raster(String),

    /// IO error
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

//! Preview rasterization
//!
//! The preview page is rendered to a PNG and placed on a single A4 page,
//! 210mm wide and scaled proportionally. Content taller than A4 runs off the
//! bottom of the page.

use tracing::{debug, warn};

use crate::compiler::{Compiler, FontSet};
use crate::error::{PdfError, Result};

/// Pixels per point used unless configured otherwise
pub const DEFAULT_PIXEL_PER_PT: f32 = 2.0;

const A4_WIDTH_MM: f32 = 210.0;
const A4_HEIGHT_MM: f32 = 297.0;

/// Name the captured image is served under while embedding
const IMAGE_NAME: &str = "preview.png";

/// A rendered preview
#[derive(Debug, Clone)]
pub struct Capture {
    /// PNG-encoded pixels
    pub png: Vec<u8>,
    pub width: u32,
    pub height: u32,
    /// Every pixel is the white page background
    pub blank: bool,
}

impl Capture {
    /// Height on the A4 page when scaled to the full page width
    pub fn image_height_mm(&self) -> f32 {
        self.height as f32 * A4_WIDTH_MM / self.width.max(1) as f32
    }
}

/// Renders Typst pages to pixels
#[derive(Debug, Clone)]
pub struct Rasterizer {
    pixel_per_pt: f32,
    fonts: FontSet,
}

impl Default for Rasterizer {
    fn default() -> Self {
        Self::new(DEFAULT_PIXEL_PER_PT)
    }
}

impl Rasterizer {
    pub fn new(pixel_per_pt: f32) -> Self {
        Self {
            pixel_per_pt,
            fonts: FontSet::default(),
        }
    }

    pub fn with_fonts(mut self, fonts: FontSet) -> Self {
        self.fonts = fonts;
        self
    }

    /// Compile `markup` and render its first page
    pub fn capture(&self, markup: &str) -> Result<Capture> {
        let document = Compiler::compile_document(markup, &self.fonts, Vec::new())?;
        let page = document
            .pages
            .first()
            .ok_or_else(|| PdfError::Raster("document has no pages".to_string()))?;

        let pixmap = typst_render::render(page, self.pixel_per_pt);
        if pixmap.width() == 0 || pixmap.height() == 0 {
            return Err(PdfError::Raster("rendered page is empty".to_string()));
        }
        let blank = pixmap
            .data()
            .chunks_exact(4)
            .all(|pixel| pixel == [255u8; 4]);
        if blank {
            warn!("captured preview is blank; check that fonts are available");
        }
        let png = pixmap
            .encode_png()
            .map_err(|e| PdfError::Raster(format!("PNG encoding failed: {}", e)))?;

        debug!(
            width = pixmap.width(),
            height = pixmap.height(),
            bytes = png.len(),
            "captured preview"
        );
        Ok(Capture {
            png,
            width: pixmap.width(),
            height: pixmap.height(),
            blank,
        })
    }

    /// Place a capture at the top-left corner of one A4 page
    pub fn embed_a4(&self, capture: &Capture) -> Result<Vec<u8>> {
        let height_mm = capture.image_height_mm();
        if height_mm > A4_HEIGHT_MM {
            warn!(
                height_mm = height_mm,
                "preview is taller than A4; the bottom is clipped"
            );
        }

        let markup = embed_markup(height_mm);
        let document = Compiler::compile_document(
            &markup,
            &self.fonts,
            vec![(IMAGE_NAME, capture.png.clone())],
        )?;
        Compiler::pdf(&document)
    }

    /// Capture and embed in one step
    pub fn render_pdf(&self, markup: &str) -> Result<Vec<u8>> {
        let capture = self.capture(markup)?;
        self.embed_a4(&capture)
    }
}

fn embed_markup(height_mm: f32) -> String {
    format!(
        "#set page(paper: \"a4\", margin: 0pt)\n#place(top + left, image(\"{}\", width: {}mm, height: {:.3}mm))\n",
        IMAGE_NAME, A4_WIDTH_MM, height_mm
    )
}

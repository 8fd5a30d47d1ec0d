//! Configuration
//!
//! Settings are loaded from `resumake.toml`:
//!
//! ```toml
//! locale = "zh-cn"
//!
//! [style]
//! theme_color = "#4169E1"
//! line_height = "1.5"
//!
//! [export]
//! mode = "raster"
//! filename = "cv.pdf"
//! fonts = ["fonts/NotoSansSC-Regular.otf"]
//! system_fonts = true
//! pixel_per_pt = 2.0
//! ```

mod settings;

#[cfg(test)]
mod tests;

pub use settings::{ExportMode, ExportSettings, Settings, StyleSettings, CONFIG_FILENAMES};

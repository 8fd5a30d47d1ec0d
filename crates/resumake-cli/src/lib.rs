//! resumake CLI - Command-line interface library
//!
//! This library provides the CLI functionality for resumake:
//! - Init: Write a blank résumé
//! - Apply: Apply a batch of editor actions to a résumé
//! - Preview: Render the live HTML preview
//! - Export: Produce the PDF
//!
//! # Binary Usage
//!
//! ```bash
//! # Start a résumé with Chinese labels
//! resumake init resume.json --locale zh-cn
//!
//! # Apply edits recorded as JSON actions
//! resumake apply resume.json edits.json
//!
//! # Write the preview without overlay controls
//! resumake preview resume.json -o preview.html --no-controls
//!
//! # Export the rasterized preview
//! resumake export resume.json --mode raster
//! ```

pub mod app;

// Re-export main entry point and types
pub use app::{apply_command, export_command, init_command, preview_command};
pub use app::{run_cli, LocaleArg, ModeArg};

//! resumake-core - Résumé editing
//!
//! Core library for resumake: the editor that applies form actions to a
//! résumé, the rich-text field used for skills, summary and descriptions,
//! the live HTML preview, and the settings shared by every front end.
//!
//! # Example
//!
//! ```
//! use resumake_core::{Action, HtmlPreview, ResumeEditor};
//! use resumake_model::{ListSection, Locale, PersonalField};
//!
//! let mut editor = ResumeEditor::new(Locale::En);
//! editor.apply(Action::EditPersonal {
//!     field: PersonalField::Name,
//!     value: "Jane Doe".to_string(),
//! });
//! editor.apply(Action::Add { section: ListSection::Projects });
//!
//! assert_eq!(editor.resume().projects.len(), 2);
//! assert!(HtmlPreview::new(&editor).render().contains("Jane Doe"));
//! ```

pub mod config;
pub mod editor;
pub mod list;
pub mod module;
pub mod month;
pub mod preview;
pub mod rich_text;
pub mod strip;

// Re-export main types and functions
pub use config::{ExportMode, Settings};
pub use editor::{Action, ControlsHidden, DateBound, PreviewChrome, ResumeEditor};
pub use module::EditableModule;
pub use month::YearMonth;
pub use preview::HtmlPreview;
pub use rich_text::{Command, Format, RichTextField};
pub use strip::strip_tags;

/// Crate version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_version() {
        assert_eq!(VERSION, "1.0.0");
    }
}

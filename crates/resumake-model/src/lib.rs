//! resumake-model - Résumé data records
//!
//! This crate provides the plain records a résumé is made of, the section
//! identifiers the editor switches between, the locale labels used by every
//! renderer, and the preview style values chosen in the toolbar.
//!
//! Nothing here validates content: rich-text fields are whatever HTML the
//! editor produced, and date fields are preformatted strings.

mod entry;
mod locale;
mod personal;
mod resume;
mod style;

pub use entry::{
    Degree, EducationEntry, EducationField, Period, ProjectEntry, ProjectField, WorkExperienceEntry,
    WorkField,
};
pub use locale::Locale;
pub use personal::{PersonalField, PersonalInfo};
pub use resume::{ListSection, Resume, Section};
pub use style::{LineHeight, ModelError, PreviewStyle, ThemeColor};

/// Crate version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

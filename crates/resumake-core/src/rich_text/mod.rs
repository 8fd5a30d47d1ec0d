//! Rich-text editing
//!
//! Skills, summary and the description fields of work and project entries
//! are edited as rich text and stored as HTML. This module holds the
//! document model, the HTML codec for the editor's subset, and the field
//! that ties editing commands to change notifications.

pub mod document;
pub mod field;
pub mod html;

pub use document::{Align, Block, BlockKind, Marks, RichDoc, Run};
pub use field::{ChangeCallback, Command, Format, RichTextField, Selection};

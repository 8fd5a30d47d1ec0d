//! Free-form editable module
//!
//! A titled block of plain text with an edit / save toggle. Saving reports
//! the module id and the new content to the owner.

use std::fmt;

use resumake_model::Locale;

/// Called with `(id, content)` on every save
pub type SaveCallback = Box<dyn FnMut(&str, &str)>;

pub struct EditableModule {
    id: String,
    title: String,
    content: String,
    draft: String,
    editing: bool,
    on_save: Option<SaveCallback>,
}

impl EditableModule {
    pub fn new(id: impl Into<String>, title: impl Into<String>, initial: impl Into<String>) -> Self {
        let content = initial.into();
        Self {
            id: id.into(),
            title: title.into(),
            draft: content.clone(),
            content,
            editing: false,
            on_save: None,
        }
    }

    pub fn with_on_save(mut self, on_save: impl FnMut(&str, &str) + 'static) -> Self {
        self.on_save = Some(Box::new(on_save));
        self
    }

    pub fn id(&self) -> &str {
        &self.id
    }

    pub fn title(&self) -> &str {
        &self.title
    }

    pub fn content(&self) -> &str {
        &self.content
    }

    pub fn draft(&self) -> &str {
        &self.draft
    }

    pub fn is_editing(&self) -> bool {
        self.editing
    }

    /// Enter edit mode with the saved content as the draft
    pub fn start_editing(&mut self) {
        self.draft = self.content.clone();
        self.editing = true;
    }

    /// Ignored outside edit mode
    pub fn set_draft(&mut self, text: impl Into<String>) {
        if self.editing {
            self.draft = text.into();
        }
    }

    /// Leave edit mode, keep the draft and notify the owner
    pub fn save(&mut self) {
        self.editing = false;
        self.content = self.draft.clone();
        if let Some(on_save) = self.on_save.as_mut() {
            on_save(&self.id, &self.content);
        }
    }

    /// What the module shows when not editing
    pub fn display_text(&self, locale: Locale) -> &str {
        if self.content.is_empty() {
            locale.empty_module_placeholder()
        } else {
            &self.content
        }
    }
}

impl fmt::Debug for EditableModule {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("EditableModule")
            .field("id", &self.id)
            .field("title", &self.title)
            .field("content", &self.content)
            .field("editing", &self.editing)
            .finish_non_exhaustive()
    }
}

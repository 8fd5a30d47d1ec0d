//! resumake-wasm - WebAssembly bindings for resumake
//!
//! This crate lets a web page drive the editor client-side: a
//! [`ResumeSession`] owns the résumé and renders the preview, and a
//! [`RichTextSession`] backs each rich-text field, reporting every change to
//! a JavaScript callback.

use std::str::FromStr;

use resumake_core::rich_text::{Align, Command, Format, RichTextField};
use resumake_core::{Action, ExportMode, HtmlPreview, ResumeEditor};
use resumake_model::{Locale, Resume};
use resumake_pdf::Exporter;
use wasm_bindgen::prelude::*;

/// Returns the current version of resumake
#[wasm_bindgen]
pub fn version() -> String {
    resumake_core::VERSION.to_string()
}

fn js_error(e: impl std::fmt::Display) -> JsError {
    JsError::new(&e.to_string())
}

/// An editing session for one résumé
#[wasm_bindgen]
pub struct ResumeSession {
    editor: ResumeEditor,
}

#[wasm_bindgen]
impl ResumeSession {
    /// A blank résumé
    #[wasm_bindgen(constructor)]
    pub fn new(locale: &str) -> Result<ResumeSession, JsError> {
        let locale = Locale::from_str(locale).map_err(js_error)?;
        Ok(Self {
            editor: ResumeEditor::new(locale),
        })
    }

    /// Load a résumé saved with [`ResumeSession::to_json`]
    #[wasm_bindgen(js_name = fromJson)]
    pub fn from_json(json: &str, locale: &str) -> Result<ResumeSession, JsError> {
        let locale = Locale::from_str(locale).map_err(js_error)?;
        Self::load(json, locale).map_err(js_error)
    }

    /// Apply an action object, e.g. `{action: "add", section: "projects"}`
    pub fn apply(&mut self, action: JsValue) -> Result<bool, JsError> {
        let action: Action = serde_wasm_bindgen::from_value(action).map_err(js_error)?;
        Ok(self.editor.apply(action))
    }

    /// Apply an action given as JSON text
    #[wasm_bindgen(js_name = applyJson)]
    pub fn apply_json(&mut self, json: &str) -> Result<bool, JsError> {
        self.apply_str(json).map_err(js_error)
    }

    /// The résumé as a plain object
    pub fn state(&self) -> Result<JsValue, JsError> {
        serde_wasm_bindgen::to_value(self.editor.resume()).map_err(js_error)
    }

    #[wasm_bindgen(js_name = toJson)]
    pub fn to_json(&self) -> Result<String, JsError> {
        serde_json::to_string(self.editor.resume()).map_err(js_error)
    }

    /// Section whose form is open, if any
    #[wasm_bindgen(js_name = activeSection)]
    pub fn active_section(&self) -> Option<String> {
        self.editor.active_section().map(|s| s.key().to_string())
    }

    /// Live preview HTML
    pub fn preview(&self) -> String {
        HtmlPreview::new(&self.editor).render()
    }

    /// PDF bytes for `"structured"` or `"raster"`
    #[wasm_bindgen(js_name = exportPdf)]
    pub fn export_pdf(&mut self, mode: &str) -> Result<Vec<u8>, JsError> {
        let mode = ExportMode::from_str(mode).map_err(js_error)?;
        // no font directories to search in the browser
        Exporter::new()
            .with_system_fonts(false)
            .export(&mut self.editor, mode)
            .map_err(js_error)
    }

    /// Name the browser should save the export under
    #[wasm_bindgen(js_name = exportFilename)]
    pub fn export_filename(&self) -> String {
        Exporter::new().filename(&self.editor)
    }
}

impl ResumeSession {
    fn load(json: &str, locale: Locale) -> Result<Self, serde_json::Error> {
        let resume: Resume = serde_json::from_str(json)?;
        Ok(Self {
            editor: ResumeEditor::from_resume(resume, locale),
        })
    }

    fn apply_str(&mut self, json: &str) -> Result<bool, serde_json::Error> {
        let action: Action = serde_json::from_str(json)?;
        Ok(self.editor.apply(action))
    }
}

/// A rich-text field driven from the page's menu bar and key handlers
#[wasm_bindgen]
pub struct RichTextSession {
    field: RichTextField,
}

#[wasm_bindgen]
impl RichTextSession {
    #[wasm_bindgen(constructor)]
    pub fn new(content: &str) -> RichTextSession {
        Self {
            field: RichTextField::new(content),
        }
    }

    /// Register `callback(html)`, called after every committed edit
    #[wasm_bindgen(js_name = onChange)]
    pub fn on_change(&mut self, callback: js_sys::Function) {
        self.field.set_on_change(move |html| {
            // A throwing callback must not abort the edit
            let _ = callback.call1(&JsValue::NULL, &JsValue::from_str(html));
        });
    }

    pub fn content(&self) -> String {
        self.field.content().to_string()
    }

    #[wasm_bindgen(js_name = setContent)]
    pub fn set_content(&mut self, html: &str) {
        self.field.set_content(html);
    }

    pub fn select(&mut self, block: usize, start: usize, end: usize) {
        self.field.select(block, start, end);
    }

    #[wasm_bindgen(js_name = selectBlock)]
    pub fn select_block(&mut self, block: usize) {
        self.field.select_block(block);
    }

    #[wasm_bindgen(js_name = insertText)]
    pub fn insert_text(&mut self, text: &str) -> bool {
        self.field.insert_text(text)
    }

    #[wasm_bindgen(js_name = splitBlock)]
    pub fn split_block(&mut self) -> bool {
        self.field.split_block()
    }

    #[wasm_bindgen(js_name = deleteSelection)]
    pub fn delete_selection(&mut self) -> bool {
        self.field.delete_selection()
    }

    /// Run a menu command by name, e.g. `"bold"` or `"alignCenter"`
    pub fn exec(&mut self, command: &str) -> Result<bool, JsError> {
        let command = parse_command(command)
            .ok_or_else(|| JsError::new(&format!("Unknown command: {}", command)))?;
        Ok(self.field.exec(command))
    }

    /// Whether the menu button for `format` is highlighted
    #[wasm_bindgen(js_name = isActive)]
    pub fn is_active(&self, format: &str) -> bool {
        parse_format(format).is_some_and(|format| self.field.is_active(format))
    }
}

fn parse_align(name: &str) -> Option<Align> {
    name.strip_prefix("align")
        .and_then(|rest| Align::from_css(&rest.to_ascii_lowercase()))
}

fn parse_command(name: &str) -> Option<Command> {
    match name {
        "undo" => Some(Command::Undo),
        "redo" => Some(Command::Redo),
        "bold" => Some(Command::ToggleBold),
        "italic" => Some(Command::ToggleItalic),
        "bulletList" => Some(Command::ToggleBulletList),
        "orderedList" => Some(Command::ToggleOrderedList),
        other => parse_align(other).map(Command::SetTextAlign),
    }
}

fn parse_format(name: &str) -> Option<Format> {
    match name {
        "bold" => Some(Format::Bold),
        "italic" => Some(Format::Italic),
        "bulletList" => Some(Format::BulletList),
        "orderedList" => Some(Format::OrderedList),
        other => parse_align(other).map(Format::Align),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_version() {
        assert_eq!(version(), "1.0.0");
    }

    #[test]
    fn test_session_round_trip() {
        let mut session = ResumeSession::load("{}", Locale::En).unwrap();
        assert!(session
            .apply_str(r#"{"action":"editPersonal","field":"name","value":"Jane Doe"}"#)
            .unwrap());
        assert!(session
            .apply_str(r#"{"action":"add","section":"projects"}"#)
            .unwrap());
        assert_eq!(session.active_section(), Some("projects".to_string()));
        assert!(session.preview().contains("Jane Doe"));
        assert_eq!(session.export_filename(), "resume.pdf");

        let json = session.to_json().unwrap();
        let reloaded = ResumeSession::load(&json, Locale::ZhCn).unwrap();
        assert_eq!(reloaded.editor.resume(), session.editor.resume());
        assert_eq!(reloaded.export_filename(), "我的简历.pdf");
    }

    #[test]
    fn test_bad_action_json() {
        let mut session = ResumeSession::load("{}", Locale::En).unwrap();
        assert!(session.apply_str(r#"{"action":"fly"}"#).is_err());
    }

    #[test]
    fn test_rich_text_session() {
        let mut session = RichTextSession::new("");
        assert!(session.insert_text("Rust"));
        session.select_block(0);
        assert_eq!(parse_command("bold"), Some(Command::ToggleBold));
        assert!(session.field.exec(Command::ToggleBold));
        assert!(session.is_active("bold"));
        assert!(!session.is_active("alignCenter"));
        assert!(!session.is_active("sparkles"));
        assert_eq!(session.content(), "<p><strong>Rust</strong></p>");
    }

    #[test]
    fn test_parse_command_names() {
        assert_eq!(
            parse_command("alignJustify"),
            Some(Command::SetTextAlign(Align::Justify))
        );
        assert_eq!(parse_format("alignLeft"), Some(Format::Align(Align::Left)));
        assert_eq!(parse_command("orderedList"), Some(Command::ToggleOrderedList));
        assert_eq!(parse_command("align"), None);
        assert_eq!(parse_command("explode"), None);
    }
}

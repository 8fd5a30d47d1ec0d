//! Editable rich-text field
//!
//! [`RichTextField`] owns a [`RichDoc`], a selection inside one block, and
//! the HTML of the last committed state. Every committed edit serializes the
//! document, stores the HTML and then hands it to the `on_change` callback,
//! so [`RichTextField::content`] always agrees with the last notification.

use std::fmt;

use serde::{Deserialize, Serialize};

use super::document::{Align, Block, BlockKind, Marks, RichDoc};
use super::html;

/// Oldest snapshots are dropped past this depth
const HISTORY_LIMIT: usize = 100;

/// Menu bar commands
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "command", content = "value", rename_all = "camelCase")]
pub enum Command {
    Undo,
    Redo,
    ToggleBold,
    ToggleItalic,
    ToggleBulletList,
    ToggleOrderedList,
    SetTextAlign(Align),
}

/// Something a menu button can show as active
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "format", content = "value", rename_all = "camelCase")]
pub enum Format {
    Bold,
    Italic,
    BulletList,
    OrderedList,
    Align(Align),
}

/// Cursor or range inside a single block, in characters
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct Selection {
    pub block: usize,
    pub start: usize,
    pub end: usize,
}

impl Selection {
    pub fn caret(block: usize, offset: usize) -> Self {
        Self {
            block,
            start: offset,
            end: offset,
        }
    }

    pub fn is_collapsed(&self) -> bool {
        self.start == self.end
    }
}

/// Called with the new HTML after every committed edit
pub type ChangeCallback = Box<dyn FnMut(&str)>;

#[derive(Clone)]
struct Snapshot {
    doc: RichDoc,
    selection: Selection,
}

/// A WYSIWYG field whose value is HTML
pub struct RichTextField {
    doc: RichDoc,
    selection: Selection,
    html: String,
    /// Marks toggled at a collapsed cursor, applied to the next insertion
    stored_marks: Option<Marks>,
    undo: Vec<Snapshot>,
    redo: Vec<Snapshot>,
    on_change: Option<ChangeCallback>,
}

impl RichTextField {
    /// Load initial HTML. The value is kept verbatim until the first edit.
    pub fn new(content: &str) -> Self {
        let mut doc = html::parse(content);
        doc.ensure_block();
        Self {
            doc,
            selection: Selection::default(),
            html: content.to_string(),
            stored_marks: None,
            undo: Vec::new(),
            redo: Vec::new(),
            on_change: None,
        }
    }

    pub fn with_on_change(mut self, on_change: impl FnMut(&str) + 'static) -> Self {
        self.on_change = Some(Box::new(on_change));
        self
    }

    pub fn set_on_change(&mut self, on_change: impl FnMut(&str) + 'static) {
        self.on_change = Some(Box::new(on_change));
    }

    /// HTML of the last committed state
    pub fn content(&self) -> &str {
        &self.html
    }

    pub fn document(&self) -> &RichDoc {
        &self.doc
    }

    pub fn selection(&self) -> Selection {
        self.selection
    }

    /// Replace the whole value. History is cleared and `on_change` is not
    /// called.
    pub fn set_content(&mut self, content: &str) {
        let mut doc = html::parse(content);
        doc.ensure_block();
        self.doc = doc;
        self.html = content.to_string();
        self.selection = Selection::default();
        self.stored_marks = None;
        self.undo.clear();
        self.redo.clear();
    }

    /// Place the selection; block and offsets are clamped to the document
    pub fn select(&mut self, block: usize, start: usize, end: usize) {
        let block = block.min(self.doc.blocks.len().saturating_sub(1));
        let len = self.doc.blocks.get(block).map_or(0, Block::char_len);
        let (start, end) = (start.min(end).min(len), start.max(end).min(len));
        self.selection = Selection { block, start, end };
        self.stored_marks = None;
    }

    /// Select every character of a block
    pub fn select_block(&mut self, block: usize) {
        self.select(block, 0, usize::MAX);
    }

    pub fn can_undo(&self) -> bool {
        !self.undo.is_empty()
    }

    pub fn can_redo(&self) -> bool {
        !self.redo.is_empty()
    }

    /// Type `text` over the selection
    pub fn insert_text(&mut self, text: &str) -> bool {
        if text.is_empty() {
            return false;
        }
        let marks = self.cursor_marks();
        self.checkpoint();
        let Selection { block, start, end } = self.selection;
        let caret = match self.doc.blocks.get_mut(block) {
            Some(b) => b.splice(start..end, text, marks),
            None => return false,
        };
        self.selection = Selection::caret(block, caret);
        self.stored_marks = None;
        self.commit();
        true
    }

    /// Enter: split the current block at the selection. An empty list item
    /// is turned back into a paragraph instead.
    pub fn split_block(&mut self) -> bool {
        let Selection { block, start, end } = self.selection;
        let Some(current) = self.doc.blocks.get(block) else {
            return false;
        };
        let leaves_list = current.kind != BlockKind::Paragraph && current.is_empty();
        self.checkpoint();

        if leaves_list {
            self.doc.blocks[block].kind = BlockKind::Paragraph;
        } else {
            let current = &mut self.doc.blocks[block];
            current.splice(start..end, "", Marks::default());
            let tail = current.split_off(start);
            self.doc.blocks.insert(block + 1, tail);
            self.selection = Selection::caret(block + 1, 0);
        }
        self.commit();
        true
    }

    /// Delete the selected range, or act as backspace at a collapsed cursor
    pub fn delete_selection(&mut self) -> bool {
        let Selection { block, start, end } = self.selection;
        if block >= self.doc.blocks.len() {
            return false;
        }

        if start < end {
            self.checkpoint();
            self.doc.blocks[block].splice(start..end, "", Marks::default());
            self.selection = Selection::caret(block, start);
        } else if start > 0 {
            self.checkpoint();
            self.doc.blocks[block].splice(start - 1..start, "", Marks::default());
            self.selection = Selection::caret(block, start - 1);
        } else if self.doc.blocks[block].kind != BlockKind::Paragraph {
            self.checkpoint();
            self.doc.blocks[block].kind = BlockKind::Paragraph;
        } else if block > 0 {
            // Join with the previous block
            self.checkpoint();
            let removed = self.doc.blocks.remove(block);
            let previous = &mut self.doc.blocks[block - 1];
            let caret = previous.char_len();
            previous.runs.extend(removed.runs);
            previous.normalize();
            self.selection = Selection::caret(block - 1, caret);
        } else {
            return false;
        }
        self.stored_marks = None;
        self.commit();
        true
    }

    /// Run a menu command. Returns whether anything changed.
    pub fn exec(&mut self, command: Command) -> bool {
        match command {
            Command::Undo => self.step_history(true),
            Command::Redo => self.step_history(false),
            Command::ToggleBold => self.toggle_mark(|m| m.bold, |m, on| m.bold = on),
            Command::ToggleItalic => self.toggle_mark(|m| m.italic, |m, on| m.italic = on),
            Command::ToggleBulletList => self.toggle_list(BlockKind::BulletItem),
            Command::ToggleOrderedList => self.toggle_list(BlockKind::OrderedItem),
            Command::SetTextAlign(align) => self.set_align(align),
        }
    }

    /// Whether a menu button should be highlighted
    pub fn is_active(&self, format: Format) -> bool {
        let Some(block) = self.current_block() else {
            return false;
        };
        let Selection { start, end, .. } = self.selection;
        match format {
            Format::Bold if self.selection.is_collapsed() => self.cursor_marks().bold,
            Format::Italic if self.selection.is_collapsed() => self.cursor_marks().italic,
            Format::Bold => block.range_has(start..end, |m| m.bold),
            Format::Italic => block.range_has(start..end, |m| m.italic),
            Format::BulletList => block.kind == BlockKind::BulletItem,
            Format::OrderedList => block.kind == BlockKind::OrderedItem,
            Format::Align(align) => block.align == align,
        }
    }

    fn current_block(&self) -> Option<&Block> {
        self.doc.blocks.get(self.selection.block)
    }

    fn cursor_marks(&self) -> Marks {
        self.stored_marks.unwrap_or_else(|| {
            self.current_block()
                .map(|b| b.marks_at(self.selection.start))
                .unwrap_or_default()
        })
    }

    fn toggle_mark(
        &mut self,
        get: impl Fn(&Marks) -> bool,
        set: impl Fn(&mut Marks, bool),
    ) -> bool {
        if self.current_block().is_none() {
            return false;
        }
        if self.selection.is_collapsed() {
            let mut marks = self.cursor_marks();
            let on = !get(&marks);
            set(&mut marks, on);
            self.stored_marks = Some(marks);
            return true;
        }

        let Selection { block, start, end } = self.selection;
        let on = !self.doc.blocks[block].range_has(start..end, |m| get(&m));
        self.checkpoint();
        self.doc.blocks[block].update_marks(start..end, |m| set(m, on));
        self.commit();
        true
    }

    fn toggle_list(&mut self, kind: BlockKind) -> bool {
        let block = self.selection.block;
        let Some(current) = self.doc.blocks.get(block) else {
            return false;
        };
        let next = if current.kind == kind {
            BlockKind::Paragraph
        } else {
            kind
        };
        self.checkpoint();
        self.doc.blocks[block].kind = next;
        self.commit();
        true
    }

    fn set_align(&mut self, align: Align) -> bool {
        let block = self.selection.block;
        match self.doc.blocks.get(block) {
            Some(current) if current.align != align => {
                self.checkpoint();
                self.doc.blocks[block].align = align;
                self.commit();
                true
            }
            _ => false,
        }
    }

    fn step_history(&mut self, backwards: bool) -> bool {
        let (from, to) = if backwards {
            (&mut self.undo, &mut self.redo)
        } else {
            (&mut self.redo, &mut self.undo)
        };
        let Some(snapshot) = from.pop() else {
            return false;
        };
        to.push(Snapshot {
            doc: std::mem::replace(&mut self.doc, snapshot.doc),
            selection: self.selection,
        });
        self.selection = snapshot.selection;
        self.stored_marks = None;
        self.commit();
        true
    }

    fn checkpoint(&mut self) {
        if self.undo.len() == HISTORY_LIMIT {
            self.undo.remove(0);
        }
        self.undo.push(Snapshot {
            doc: self.doc.clone(),
            selection: self.selection,
        });
        self.redo.clear();
    }

    fn commit(&mut self) {
        self.html = html::serialize(&self.doc);
        if let Some(on_change) = self.on_change.as_mut() {
            on_change(&self.html);
        }
    }
}

impl Default for RichTextField {
    fn default() -> Self {
        Self::new("")
    }
}

impl fmt::Debug for RichTextField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("RichTextField")
            .field("html", &self.html)
            .field("selection", &self.selection)
            .field("undo", &self.undo.len())
            .field("redo", &self.redo.len())
            .finish_non_exhaustive()
    }
}

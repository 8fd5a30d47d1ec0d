//! Rich-text document model
//!
//! A document is a flat sequence of blocks. List items are blocks of their
//! own; consecutive items of the same kind form one list when serialized.
//! Character offsets used by editing operations count Unicode scalar values.

use std::ops::Range;

use serde::{Deserialize, Serialize};

/// Inline formatting carried by a run
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub struct Marks {
    pub bold: bool,
    pub italic: bool,
}

/// Text sharing one set of marks. `\n` is a hard line break.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Run {
    pub text: String,
    pub marks: Marks,
}

impl Run {
    pub fn plain(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            marks: Marks::default(),
        }
    }
}

/// What a block is rendered as
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum BlockKind {
    #[default]
    Paragraph,
    BulletItem,
    OrderedItem,
}

/// Horizontal text alignment
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Align {
    #[default]
    Left,
    Center,
    Right,
    Justify,
}

impl Align {
    pub fn as_str(self) -> &'static str {
        match self {
            Align::Left => "left",
            Align::Center => "center",
            Align::Right => "right",
            Align::Justify => "justify",
        }
    }

    pub fn from_css(value: &str) -> Option<Self> {
        match value.trim().to_ascii_lowercase().as_str() {
            "left" | "start" => Some(Align::Left),
            "center" => Some(Align::Center),
            "right" | "end" => Some(Align::Right),
            "justify" => Some(Align::Justify),
            _ => None,
        }
    }
}

/// A paragraph or list item
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct Block {
    pub kind: BlockKind,
    pub align: Align,
    pub runs: Vec<Run>,
}

impl Block {
    pub fn new(kind: BlockKind) -> Self {
        Self {
            kind,
            ..Default::default()
        }
    }

    pub fn paragraph(text: impl Into<String>) -> Self {
        Self {
            runs: vec![Run::plain(text)],
            ..Default::default()
        }
    }

    /// Concatenated text of every run
    pub fn text(&self) -> String {
        self.runs.iter().map(|r| r.text.as_str()).collect()
    }

    pub fn char_len(&self) -> usize {
        self.runs.iter().map(|r| r.text.chars().count()).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.runs.iter().all(|r| r.text.is_empty())
    }

    fn chars(&self) -> Vec<(char, Marks)> {
        self.runs
            .iter()
            .flat_map(|run| run.text.chars().map(move |c| (c, run.marks)))
            .collect()
    }

    fn set_chars(&mut self, chars: impl IntoIterator<Item = (char, Marks)>) {
        let mut runs: Vec<Run> = Vec::new();
        for (c, marks) in chars {
            match runs.last_mut() {
                Some(run) if run.marks == marks => run.text.push(c),
                _ => runs.push(Run {
                    text: c.to_string(),
                    marks,
                }),
            }
        }
        self.runs = runs;
    }

    /// Merge neighbouring runs with equal marks and drop empty ones
    pub fn normalize(&mut self) {
        let chars = self.chars();
        self.set_chars(chars);
    }

    fn clamp(&self, range: Range<usize>) -> Range<usize> {
        let len = self.char_len();
        let start = range.start.min(len);
        start..range.end.clamp(start, len)
    }

    /// Marks of the character before `offset`, or of the first character
    /// when the cursor sits at the start
    pub fn marks_at(&self, offset: usize) -> Marks {
        let chars = self.chars();
        let index = offset.min(chars.len()).saturating_sub(1);
        chars.get(index).map(|(_, m)| *m).unwrap_or_default()
    }

    /// True when every character in `range` satisfies `pred`.
    /// A collapsed range asks about the marks at the cursor.
    pub fn range_has(&self, range: Range<usize>, pred: impl Fn(Marks) -> bool) -> bool {
        let range = self.clamp(range);
        if range.is_empty() {
            return pred(self.marks_at(range.start));
        }
        self.chars()[range].iter().all(|(_, m)| pred(*m))
    }

    /// Rewrite the marks of every character in `range`
    pub fn update_marks(&mut self, range: Range<usize>, update: impl Fn(&mut Marks)) {
        let range = self.clamp(range);
        let mut chars = self.chars();
        for (_, marks) in &mut chars[range] {
            update(marks);
        }
        self.set_chars(chars);
    }

    /// Replace `range` with `text` carrying `marks`. Returns the offset just
    /// past the inserted text.
    pub fn splice(&mut self, range: Range<usize>, text: &str, marks: Marks) -> usize {
        let range = self.clamp(range);
        let mut chars = self.chars();
        let inserted: Vec<(char, Marks)> = text.chars().map(|c| (c, marks)).collect();
        let end = range.start + inserted.len();
        chars.splice(range, inserted);
        self.set_chars(chars);
        end
    }

    /// Cut the block at `offset`; the tail becomes a new block of the same
    /// kind and alignment
    pub fn split_off(&mut self, offset: usize) -> Block {
        let mut chars = self.chars();
        let tail = chars.split_off(offset.min(chars.len()));
        self.set_chars(chars);

        let mut next = Block {
            kind: self.kind,
            align: self.align,
            runs: Vec::new(),
        };
        next.set_chars(tail);
        next
    }
}

/// A whole rich-text value
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct RichDoc {
    pub blocks: Vec<Block>,
}

impl RichDoc {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_blocks(blocks: Vec<Block>) -> Self {
        Self { blocks }
    }

    /// True when no block holds any text
    pub fn is_empty(&self) -> bool {
        self.blocks.iter().all(Block::is_empty)
    }

    /// Text of every block, one per line
    pub fn plain_text(&self) -> String {
        self.blocks
            .iter()
            .map(Block::text)
            .collect::<Vec<_>>()
            .join("\n")
    }

    /// Make sure there is a block for the cursor to sit in
    pub fn ensure_block(&mut self) {
        if self.blocks.is_empty() {
            self.blocks.push(Block::default());
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn bold() -> Marks {
        Marks {
            bold: true,
            italic: false,
        }
    }

    #[test]
    fn test_normalize_merges_runs() {
        let mut block = Block {
            runs: vec![Run::plain("ab"), Run::plain(""), Run::plain("cd")],
            ..Default::default()
        };
        block.normalize();
        assert_eq!(block.runs, vec![Run::plain("abcd")]);
    }

    #[test]
    fn test_update_marks_splits_runs() {
        let mut block = Block::paragraph("hello world");
        block.update_marks(0..5, |m| m.bold = true);
        assert_eq!(block.runs.len(), 2);
        assert_eq!(block.runs[0].text, "hello");
        assert!(block.runs[0].marks.bold);
        assert_eq!(block.runs[1].text, " world");
        assert!(block.range_has(0..5, |m| m.bold));
        assert!(!block.range_has(0..6, |m| m.bold));
    }

    #[test]
    fn test_splice_inherits_given_marks() {
        let mut block = Block::paragraph("ac");
        let end = block.splice(1..1, "b", bold());
        assert_eq!(end, 2);
        assert_eq!(block.text(), "abc");
        assert!(block.runs[1].marks.bold);
    }

    #[test]
    fn test_splice_clamps_range() {
        let mut block = Block::paragraph("abc");
        block.splice(2..99, "Z", Marks::default());
        assert_eq!(block.text(), "abZ");
    }

    #[test]
    fn test_multibyte_offsets() {
        let mut block = Block::paragraph("技能树");
        block.update_marks(1..2, |m| m.italic = true);
        assert_eq!(block.runs[1].text, "能");
        assert_eq!(block.char_len(), 3);
    }

    #[test]
    fn test_split_off_keeps_kind() {
        let mut block = Block {
            kind: BlockKind::BulletItem,
            align: Align::Center,
            runs: vec![Run::plain("one two")],
        };
        let tail = block.split_off(3);
        assert_eq!(block.text(), "one");
        assert_eq!(tail.text(), " two");
        assert_eq!(tail.kind, BlockKind::BulletItem);
        assert_eq!(tail.align, Align::Center);
    }

    #[test]
    fn test_plain_text() {
        let doc = RichDoc::from_blocks(vec![Block::paragraph("a"), Block::paragraph("b")]);
        assert_eq!(doc.plain_text(), "a\nb");
        assert!(!doc.is_empty());
        assert!(RichDoc::new().is_empty());
    }
}

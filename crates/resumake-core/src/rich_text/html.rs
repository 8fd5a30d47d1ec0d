//! HTML reading and writing for rich-text values
//!
//! Only the subset the editor produces is understood: paragraphs and
//! headings, bullet and ordered lists, bold, italic, hard breaks and
//! `text-align`. Unknown tags are dropped but their text is kept; the
//! content of `script` and `style` elements is discarded entirely. Writing
//! always emits the same subset, so `normalize` doubles as a sanitizer.

use std::sync::OnceLock;

use regex::{Captures, Regex};

use super::document::{Align, Block, BlockKind, Marks, RichDoc, Run};

/// Parse editor HTML into a document
pub fn parse(html: &str) -> RichDoc {
    static TAG_RE: OnceLock<Regex> = OnceLock::new();
    let re = TAG_RE.get_or_init(|| {
        Regex::new(r"(?s)<!--.*?-->|<(/?)([A-Za-z][A-Za-z0-9]*)([^>]*)>").unwrap()
    });

    let mut parser = HtmlParser::default();
    let mut cursor = 0;
    for caps in re.captures_iter(html) {
        let Some(whole) = caps.get(0) else { continue };
        parser.text(&html[cursor..whole.start()]);
        cursor = whole.end();

        // Comments have no tag name group
        let Some(name) = caps.get(2) else { continue };
        let closing = caps.get(1).is_some_and(|m| !m.as_str().is_empty());
        let attrs = caps.get(3).map(|m| m.as_str()).unwrap_or("");
        let name = name.as_str().to_ascii_lowercase();
        if closing {
            parser.close(&name);
        } else {
            parser.open(&name, attrs);
        }
    }
    parser.text(&html[cursor..]);
    parser.finish()
}

/// Serialize a document back to editor HTML
///
/// An empty document serializes to `<p></p>`, as the editor reports it.
pub fn serialize(doc: &RichDoc) -> String {
    if doc.blocks.is_empty() {
        return "<p></p>".to_string();
    }

    let mut out = String::new();
    let mut open_list: Option<BlockKind> = None;

    for block in &doc.blocks {
        if open_list.is_some() && open_list != Some(block.kind) {
            out.push_str(list_close(open_list));
            open_list = None;
        }

        let style = align_attr(block.align);
        match block.kind {
            BlockKind::Paragraph => {
                out.push_str(&format!("<p{}>{}</p>", style, inline_html(&block.runs)));
            }
            kind => {
                if open_list.is_none() {
                    out.push_str(if kind == BlockKind::OrderedItem {
                        "<ol>"
                    } else {
                        "<ul>"
                    });
                    open_list = Some(kind);
                }
                out.push_str(&format!(
                    "<li><p{}>{}</p></li>",
                    style,
                    inline_html(&block.runs)
                ));
            }
        }
    }
    out.push_str(list_close(open_list));
    out
}

/// Parse then serialize; blank input stays blank
pub fn normalize(html: &str) -> String {
    let doc = parse(html);
    if doc.blocks.is_empty() {
        String::new()
    } else {
        serialize(&doc)
    }
}

/// Decode character references
pub fn decode_entities(text: &str) -> String {
    static ENTITY_RE: OnceLock<Regex> = OnceLock::new();
    let re = ENTITY_RE
        .get_or_init(|| Regex::new(r"&(#[xX][0-9a-fA-F]+|#[0-9]+|[a-zA-Z]+);").unwrap());

    re.replace_all(text, |caps: &Captures| {
        let entity = &caps[1];
        let decoded = if let Some(hex) = entity
            .strip_prefix("#x")
            .or_else(|| entity.strip_prefix("#X"))
        {
            u32::from_str_radix(hex, 16).ok().and_then(char::from_u32)
        } else if let Some(dec) = entity.strip_prefix('#') {
            dec.parse::<u32>().ok().and_then(char::from_u32)
        } else {
            match entity {
                "amp" => Some('&'),
                "lt" => Some('<'),
                "gt" => Some('>'),
                "quot" => Some('"'),
                "apos" => Some('\''),
                "nbsp" => Some('\u{a0}'),
                _ => None,
            }
        };
        decoded
            .map(String::from)
            .unwrap_or_else(|| caps[0].to_string())
    })
    .into_owned()
}

/// Escape text for element content and attribute values
pub fn escape(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\u{a0}' => out.push_str("&nbsp;"),
            c => out.push(c),
        }
    }
    out
}

fn list_close(kind: Option<BlockKind>) -> &'static str {
    match kind {
        Some(BlockKind::OrderedItem) => "</ol>",
        Some(_) => "</ul>",
        None => "",
    }
}

fn align_attr(align: Align) -> String {
    match align {
        Align::Left => String::new(),
        other => format!(" style=\"text-align: {}\"", other.as_str()),
    }
}

fn inline_html(runs: &[Run]) -> String {
    let mut out = String::new();
    for run in runs {
        let mut text = escape(&run.text).replace('\n', "<br>");
        if run.marks.italic {
            text = format!("<em>{}</em>", text);
        }
        if run.marks.bold {
            text = format!("<strong>{}</strong>", text);
        }
        out.push_str(&text);
    }
    out
}

fn parse_align(attrs: &str) -> Option<Align> {
    static ALIGN_RE: OnceLock<Regex> = OnceLock::new();
    let re = ALIGN_RE.get_or_init(|| Regex::new(r"(?i)text-align\s*:\s*([a-z-]+)").unwrap());
    re.captures(attrs).and_then(|caps| Align::from_css(&caps[1]))
}

/// Streaming state while walking tags and text
#[derive(Default)]
struct HtmlParser {
    blocks: Vec<Block>,
    current: Option<Block>,
    lists: Vec<BlockKind>,
    bold: usize,
    italic: usize,
    skip: usize,
}

impl HtmlParser {
    fn marks(&self) -> Marks {
        Marks {
            bold: self.bold > 0,
            italic: self.italic > 0,
        }
    }

    fn list_kind(&self) -> BlockKind {
        self.lists.last().copied().unwrap_or(BlockKind::Paragraph)
    }

    fn flush(&mut self) {
        if let Some(mut block) = self.current.take() {
            block.normalize();
            self.blocks.push(block);
        }
    }

    fn start_block(&mut self, kind: BlockKind, align: Option<Align>) {
        self.flush();
        let mut block = Block::new(kind);
        block.align = align.unwrap_or_default();
        self.current = Some(block);
    }

    fn current_block(&mut self) -> &mut Block {
        let kind = self.list_kind();
        self.current.get_or_insert_with(|| Block::new(kind))
    }

    fn push_text(&mut self, text: &str) {
        let marks = self.marks();
        let block = self.current_block();
        match block.runs.last_mut() {
            Some(run) if run.marks == marks => run.text.push_str(text),
            _ => block.runs.push(Run {
                text: text.to_string(),
                marks,
            }),
        }
    }

    fn text(&mut self, raw: &str) {
        if self.skip > 0 || raw.is_empty() {
            return;
        }
        let decoded = decode_entities(raw);
        let collapsed = collapse_whitespace(&decoded);
        let at_block_start = self
            .current
            .as_ref()
            .map_or(true, |b| b.is_empty() || b.text().ends_with('\n'));
        let text = if at_block_start {
            collapsed.trim_start()
        } else {
            collapsed.as_str()
        };
        if !text.is_empty() {
            self.push_text(text);
        }
    }

    fn open(&mut self, name: &str, attrs: &str) {
        if matches!(name, "script" | "style") {
            self.skip += 1;
            return;
        }
        if self.skip > 0 {
            return;
        }

        match name {
            "p" | "div" | "h1" | "h2" | "h3" | "h4" | "h5" | "h6" | "blockquote" => {
                let align = parse_align(attrs);
                // <li><p> and <div><p> are a single block
                let reuse = self.current.as_ref().is_some_and(Block::is_empty);
                if reuse {
                    if let (Some(block), Some(align)) = (self.current.as_mut(), align) {
                        block.align = align;
                    }
                } else {
                    let kind = self.list_kind();
                    self.start_block(kind, align);
                }
            }
            "ul" => {
                self.flush();
                self.lists.push(BlockKind::BulletItem);
            }
            "ol" => {
                self.flush();
                self.lists.push(BlockKind::OrderedItem);
            }
            "li" => {
                let kind = match self.list_kind() {
                    BlockKind::Paragraph => BlockKind::BulletItem,
                    kind => kind,
                };
                self.start_block(kind, parse_align(attrs));
            }
            "br" => self.push_text("\n"),
            "strong" | "b" => self.bold += 1,
            "em" | "i" => self.italic += 1,
            _ => {}
        }
    }

    fn close(&mut self, name: &str) {
        if matches!(name, "script" | "style") {
            self.skip = self.skip.saturating_sub(1);
            return;
        }
        if self.skip > 0 {
            return;
        }

        match name {
            "p" | "div" | "h1" | "h2" | "h3" | "h4" | "h5" | "h6" | "blockquote" | "li" => {
                self.flush()
            }
            "ul" | "ol" => {
                self.flush();
                self.lists.pop();
            }
            "strong" | "b" => self.bold = self.bold.saturating_sub(1),
            "em" | "i" => self.italic = self.italic.saturating_sub(1),
            _ => {}
        }
    }

    fn finish(mut self) -> RichDoc {
        self.flush();
        RichDoc::from_blocks(self.blocks)
    }
}

fn collapse_whitespace(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    let mut in_space = false;
    for c in text.chars() {
        // Non-breaking spaces survive collapsing
        if c.is_whitespace() && c != '\u{a0}' {
            if !in_space {
                out.push(' ');
            }
            in_space = true;
        } else {
            out.push(c);
            in_space = false;
        }
    }
    out
}

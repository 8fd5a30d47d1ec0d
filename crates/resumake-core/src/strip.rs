//! Reduce rich-text HTML to plain text
//!
//! Used where only text can be laid out, such as the structured PDF export.

use std::sync::OnceLock;

use regex::Regex;

use crate::rich_text::html::decode_entities;

/// Remove every tag, keeping block boundaries and `<br>` as line breaks.
/// Entities are decoded and blank lines dropped.
pub fn strip_tags(html: &str) -> String {
    static BREAK_RE: OnceLock<Regex> = OnceLock::new();
    static TAG_RE: OnceLock<Regex> = OnceLock::new();

    let breaks = BREAK_RE.get_or_init(|| {
        Regex::new(r"(?i)<br\s*/?>|</(p|li|div|h[1-6]|blockquote|ul|ol)\s*>").unwrap()
    });
    let tags = TAG_RE.get_or_init(|| Regex::new(r"<[^>]+>").unwrap());

    let text = breaks.replace_all(html, "\n");
    let text = tags.replace_all(&text, "");
    let text = decode_entities(&text);

    text.lines()
        .map(|line| line.trim())
        .filter(|line| !line.is_empty())
        .collect::<Vec<_>>()
        .join("\n")
}

/// Plain text lines of a rich-text value
pub fn strip_lines(html: &str) -> Vec<String> {
    strip_tags(html).lines().map(String::from).collect()
}

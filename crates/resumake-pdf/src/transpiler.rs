//! Résumé to Typst markup transpiler
//!
//! Two layouts are produced from the same editor state:
//!
//! - [`Transpiler::structured`]: a paginated A4 document with plain-text
//!   content, used for native PDF export.
//! - [`Transpiler::preview`]: the live preview on a single page 210mm wide
//!   with automatic height, keeping rich-text formatting. This is what the
//!   rasterizer captures.
//!
//! All user text is emitted as Typst string literals, so nothing typed into
//! the form is interpreted as markup.

use resumake_core::rich_text::{html, Align, Block, BlockKind};
use resumake_core::strip::strip_lines;
use resumake_core::ResumeEditor;
use resumake_model::{Locale, Period, PersonalInfo, PreviewStyle, Section};

/// CSS pixels to points
const PX_TO_PT: f32 = 0.75;

const STRUCTURED_PRELUDE: &str = r##"#let muted = rgb("#666666")
#let section-title(title) = block(below: 8pt, text(size: 14pt, fill: theme, title))
#let period-row(left, right) = grid(columns: (1fr, auto), column-gutter: 12pt, left, right)
"##;

const PREVIEW_PRELUDE: &str = r##"#let muted = rgb("#666666")
#let section-title(title) = block(width: 100%, below: 12pt, inset: (bottom: 6pt), stroke: (bottom: 0.75pt + theme), text(size: 12pt, weight: "semibold", fill: theme, title))
#let entry-row(left, right) = grid(columns: (1fr, auto), column-gutter: 12pt, left, right)
"##;

/// Transpiler for converting editor state to Typst markup
pub struct Transpiler;

impl Transpiler {
    /// Paginated A4 layout with plain-text content
    pub fn structured(editor: &ResumeEditor) -> String {
        let resume = editor.resume();
        let locale = editor.locale();
        let info = &resume.personal_info;

        let mut output = document_header(info, locale, editor.style());
        output.push_str("#set page(paper: \"a4\", margin: 30pt)\n");
        output.push_str("#set text(size: 12pt)\n");
        output.push_str(STRUCTURED_PRELUDE);
        output.push('\n');

        output.push_str("#align(center, block(below: 20pt)[\n");
        output.push_str(&format!(
            "#block(below: 5pt, text(size: 18pt, {}))\n",
            typst_str(&info.name)
        ));
        for line in [info.contact_line(), info.position.clone()] {
            if !line.is_empty() {
                output.push_str(&format!("#block(below: 3pt, text(fill: muted, {}))\n", typst_str(&line)));
            }
        }
        output.push_str("])\n\n");

        for section in Section::ALL {
            if section == Section::PersonalInfo {
                continue;
            }
            output.push_str("#block(below: 20pt)[\n");
            output.push_str(&format!(
                "#section-title({})\n",
                typst_str(locale.section_title(section))
            ));
            for entry in Self::structured_entries(editor, section) {
                output.push_str(&format!("#block(breakable: false, below: 5pt)[\n{}]\n", entry));
            }
            output.push_str("]\n");
        }

        output
    }

    fn structured_entries(editor: &ResumeEditor, section: Section) -> Vec<String> {
        let resume = editor.resume();
        let locale = editor.locale();
        match section {
            Section::PersonalInfo => Vec::new(),
            Section::Skills => plain_lines(resume.skills_html()).into_iter().collect(),
            Section::Summary => plain_lines(resume.summary_html()).into_iter().collect(),
            Section::Education => resume
                .education
                .iter()
                .map(|edu| {
                    format!(
                        "#grid(columns: (2fr, 2fr, 1fr, 2fr), column-gutter: 12pt, {}, {}, {}, {})\n",
                        typst_str(&edu.school),
                        typst_str(&edu.major),
                        typst_str(edu.degree.label(locale)),
                        typst_str(&edu.period_label())
                    )
                })
                .collect(),
            Section::WorkExperience => resume
                .work_experience
                .iter()
                .map(|work| {
                    dated_entry(&work.heading(), &work.period_label(), &work.description)
                })
                .collect(),
            Section::Projects => resume
                .projects
                .iter()
                .map(|project| {
                    dated_entry(&project.name, &project.period_label(), &project.description)
                })
                .collect(),
        }
    }

    /// Single-page preview layout with rich text
    pub fn preview(editor: &ResumeEditor) -> String {
        let resume = editor.resume();
        let locale = editor.locale();
        let info = &resume.personal_info;
        let padding = editor.chrome().section_padding_px() as f32 * PX_TO_PT;

        let mut output = document_header(info, locale, editor.style());
        output.push_str("#set page(width: 210mm, height: auto, margin: 30pt, fill: white)\n");
        output.push_str("#set text(size: 9.75pt)\n");
        output.push_str(PREVIEW_PRELUDE);
        output.push_str(&format!(
            "#let section(body) = block(width: 100%, below: 18pt, inset: (right: {}pt), body)\n\n",
            padding
        ));

        output.push_str("#section(align(center)[\n");
        output.push_str(&format!(
            "#block(below: 6pt, text(size: 15.75pt, weight: \"bold\", {}))\n",
            typst_str(&info.name)
        ));
        output.push_str(&format!(
            "#block(below: 6pt, text(fill: muted, {}))\n",
            typst_str(&info.contact_line())
        ));
        output.push_str(&format!("#text(fill: muted, {})\n", typst_str(&info.position)));
        output.push_str("])\n");

        for section in Section::ALL {
            if section == Section::PersonalInfo {
                continue;
            }
            output.push_str(&format!(
                "#section[\n#section-title({})\n",
                typst_str(locale.section_title(section))
            ));
            output.push_str(&Self::preview_body(editor, section));
            output.push_str("]\n");
        }

        output
    }

    fn preview_body(editor: &ResumeEditor, section: Section) -> String {
        let resume = editor.resume();
        let locale = editor.locale();
        match section {
            Section::PersonalInfo => String::new(),
            Section::Skills => format!("#block(width: 100%, {})\n", rich_markup(resume.skills_html())),
            Section::Summary => format!("#block(width: 100%, {})\n", rich_markup(resume.summary_html())),
            Section::Education => resume
                .education
                .iter()
                .map(|edu| {
                    format!(
                        "#block(below: 9pt, grid(columns: (2fr, 2fr, 1fr, 2fr), column-gutter: 15pt, {}, {}, {}, {}))\n",
                        typst_str(&edu.school),
                        typst_str(&edu.major),
                        typst_str(edu.degree.label(locale)),
                        typst_str(&edu.period_label())
                    )
                })
                .collect(),
            Section::WorkExperience => resume
                .work_experience
                .iter()
                .map(|work| {
                    rich_entry(&work.heading(), &work.period_label(), &work.description)
                })
                .collect(),
            Section::Projects => resume
                .projects
                .iter()
                .map(|project| {
                    rich_entry(&project.name, &project.period_label(), &project.description)
                })
                .collect(),
        }
    }
}

/// Latin text stays in the default face; Han glyphs fall through to the
/// first CJK family that is installed or configured
const CJK_FONTS: &str = "#set text(font: (\"Libertinus Serif\", \"Noto Serif CJK SC\", \"Source Han Serif SC\", \"SimSun\"))\n";

fn document_header(info: &PersonalInfo, locale: Locale, style: PreviewStyle) -> String {
    let mut output = String::new();
    if !info.name.is_empty() {
        output.push_str(&format!("#set document(title: {})\n", typst_str(&info.name)));
    }
    output.push_str(&format!("#set text(lang: {})\n", typst_str(locale.tag())));
    if locale == Locale::ZhCn {
        output.push_str(CJK_FONTS);
    }
    output.push_str(&format!("#set par(leading: {})\n", leading(style)));
    output.push_str(&format!(
        "#let theme = rgb({})\n",
        typst_str(&style.theme_color.hex())
    ));
    output
}

/// Paragraph leading for the chosen line height
fn leading(style: PreviewStyle) -> String {
    format!("{:.2}em", style.line_height.as_f32() * 0.5)
}

fn dated_entry(title: &str, period: &str, description: &str) -> String {
    let mut entry = format!("#period-row({}, {})\n", typst_str(title), typst_str(period));
    if let Some(lines) = plain_lines(description) {
        entry.push_str(&lines);
    }
    entry
}

fn rich_entry(title: &str, period: &str, description: &str) -> String {
    format!(
        "#block(below: 9pt)[#block(below: 6pt, entry-row(strong({}), {}))#block(width: 100%, {})]\n",
        typst_str(title),
        typst_str(period),
        rich_markup(description)
    )
}

/// Rich text reduced to plain lines joined by line breaks
fn plain_lines(html: &str) -> Option<String> {
    let lines = strip_lines(html);
    if lines.is_empty() {
        return None;
    }
    let body = lines
        .iter()
        .map(|line| format!("#{}", typst_str(line)))
        .collect::<Vec<_>>()
        .join("#linebreak()");
    Some(format!("#block(above: 5pt)[{}]\n", body))
}

/// Rich text as a Typst content block
fn rich_markup(html: &str) -> String {
    let doc = html::parse(html);
    let mut output = String::from("[");
    let mut blocks = doc.blocks.iter().peekable();

    while let Some(block) = blocks.next() {
        match block.kind {
            BlockKind::Paragraph => {
                let (align, justify) = match block.align {
                    Align::Justify => ("left", true),
                    other => (other.as_str(), false),
                };
                output.push_str(&format!(
                    "#block(width: 100%, below: 4pt, align({}, par(justify: {}, {})))",
                    align,
                    justify,
                    inline_content(block)
                ));
            }
            kind => {
                let mut items = vec![inline_content(block)];
                while let Some(next) = blocks.next_if(|b| b.kind == kind) {
                    items.push(inline_content(next));
                }
                let function = if kind == BlockKind::OrderedItem {
                    "enum"
                } else {
                    "list"
                };
                output.push_str(&format!("#{}(tight: true, {})", function, items.join(", ")));
            }
        }
    }

    output.push(']');
    output
}

/// Runs of a block as a content block
fn inline_content(block: &Block) -> String {
    let mut output = String::from("[");
    for run in &block.runs {
        for (i, segment) in run.text.split('\n').enumerate() {
            if i > 0 {
                output.push_str("#linebreak()");
            }
            if segment.is_empty() {
                continue;
            }
            let mut piece = typst_str(segment);
            if run.marks.italic {
                piece = format!("emph({})", piece);
            }
            if run.marks.bold {
                piece = format!("strong({})", piece);
            }
            output.push('#');
            output.push_str(&piece);
        }
    }
    output.push(']');
    output
}

/// Quote text as a Typst string literal
fn typst_str(s: &str) -> String {
    let mut output = String::with_capacity(s.len() + 2);
    output.push('"');
    for c in s.chars() {
        match c {
            '\\' => output.push_str("\\\\"),
            '"' => output.push_str("\\\""),
            '\n' => output.push_str("\\n"),
            '\r' => output.push_str("\\r"),
            '\t' => output.push_str("\\t"),
            c => output.push(c),
        }
    }
    output.push('"');
    output
}

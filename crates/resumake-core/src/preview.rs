//! Live HTML preview
//!
//! Renders the résumé as an HTML fragment for the browser surface and for
//! `resumake preview`. Overlay controls are plain buttons carrying
//! `data-action`, `data-section` and `data-index`; the host page turns a
//! click into the matching [`Action`](crate::editor::Action). Rich-text
//! values are normalized before they are inserted, which strips anything
//! outside the editor's tag subset.

use resumake_model::{ListSection, Locale, Period, PreviewStyle, Resume, Section};

use crate::editor::{PreviewChrome, ResumeEditor};
use crate::rich_text::html::{escape, normalize};

/// HTML renderer over an editor's current state
#[derive(Debug, Clone, Copy)]
pub struct HtmlPreview<'a> {
    resume: &'a Resume,
    style: PreviewStyle,
    locale: Locale,
    chrome: PreviewChrome,
}

impl<'a> HtmlPreview<'a> {
    pub fn new(editor: &'a ResumeEditor) -> Self {
        Self {
            resume: editor.resume(),
            style: editor.style(),
            locale: editor.locale(),
            chrome: editor.chrome(),
        }
    }

    /// Override whether overlay controls are drawn
    pub fn with_controls(mut self, visible: bool) -> Self {
        self.chrome.controls_visible = visible;
        self
    }

    /// The whole preview fragment
    pub fn render(&self) -> String {
        let mut out = format!(
            "<div class=\"resume-content\" style=\"line-height: {}\">",
            self.style.line_height
        );
        for section in Section::ALL {
            out.push_str(&self.render_section(section));
        }
        out.push_str("</div>");
        out
    }

    /// One `resume-section` block
    pub fn render_section(&self, section: Section) -> String {
        let mut out = format!(
            "<div class=\"resume-section\" data-section=\"{}\" style=\"padding-right: {}px\">",
            section.key(),
            self.chrome.section_padding_px()
        );

        if section == Section::PersonalInfo {
            out.push_str(&self.personal_header());
        } else {
            out.push_str(&format!(
                "<h4 class=\"resume-section-title\" data-action=\"selectSection\" data-section=\"{}\" style=\"color: {theme}; border-bottom: 1px solid {theme}\">{title}</h4>",
                section.key(),
                theme = self.style.theme_color.hex(),
                title = escape(self.locale.section_title(section))
            ));
            out.push_str(&self.section_body(section));
        }

        if let (Some(list), true) = (section.as_list(), self.chrome.controls_visible) {
            out.push_str(&format!(
                "<button class=\"add-button\" data-action=\"add\" data-section=\"{}\">+</button>",
                Section::from(list).key()
            ));
        }
        out.push_str("</div>");
        out
    }

    fn personal_header(&self) -> String {
        let info = &self.resume.personal_info;
        let mut out = String::from(
            "<div class=\"personal-info\" data-action=\"selectSection\" data-section=\"personalInfo\" style=\"text-align: center\">",
        );
        out.push_str(&format!("<h3>{}</h3>", escape(&info.name)));
        let contact = info.contact_line();
        if !contact.is_empty() {
            out.push_str(&format!("<p class=\"contact\">{}</p>", escape(&contact)));
        }
        if !info.position.is_empty() {
            out.push_str(&format!("<p class=\"position\">{}</p>", escape(&info.position)));
        }
        out.push_str("</div>");
        out
    }

    fn section_body(&self, section: Section) -> String {
        match section {
            Section::PersonalInfo => String::new(),
            Section::Skills => rich_block(self.resume.skills_html()),
            Section::Summary => rich_block(self.resume.summary_html()),
            Section::Education => self
                .resume
                .education
                .iter()
                .enumerate()
                .map(|(index, edu)| {
                    let row = format!(
                        "<div class=\"entry-row\"><span>{}</span><span>{}</span><span>{}</span><span>{}</span></div>",
                        escape(&edu.school),
                        escape(&edu.major),
                        escape(edu.degree.label(self.locale)),
                        escape(&edu.period_label())
                    );
                    self.entry(ListSection::Education, index, &row)
                })
                .collect(),
            Section::WorkExperience => self
                .resume
                .work_experience
                .iter()
                .enumerate()
                .map(|(index, work)| {
                    let row = format!(
                        "<div class=\"entry-row\"><strong>{}</strong><span>{}</span></div>{}",
                        escape(&work.heading()),
                        escape(&work.period_label()),
                        rich_block(&work.description)
                    );
                    self.entry(ListSection::WorkExperience, index, &row)
                })
                .collect(),
            Section::Projects => self
                .resume
                .projects
                .iter()
                .enumerate()
                .map(|(index, project)| {
                    let row = format!(
                        "<div class=\"entry-row\"><strong>{}</strong><span>{}</span></div>{}",
                        escape(&project.name),
                        escape(&project.period_label()),
                        rich_block(&project.description)
                    );
                    self.entry(ListSection::Projects, index, &row)
                })
                .collect(),
        }
    }

    fn entry(&self, section: ListSection, index: usize, body: &str) -> String {
        let mut out = format!("<div class=\"resume-entry\" data-index=\"{}\">{}", index, body);
        if self.chrome.controls_visible {
            let key = Section::from(section).key();
            out.push_str("<div class=\"action-buttons\">");
            for (action, label) in [("moveUp", "↑"), ("moveDown", "↓"), ("remove", "×")] {
                out.push_str(&format!(
                    "<button data-action=\"{}\" data-section=\"{}\" data-index=\"{}\">{}</button>",
                    action, key, index, label
                ));
            }
            out.push_str("</div>");
        }
        out.push_str("</div>");
        out
    }
}

fn rich_block(html: &str) -> String {
    format!("<div class=\"rich-text\">{}</div>", normalize(html))
}

#[cfg(test)]
mod tests {
    use super::*;
    use resumake_model::PersonalField;

    fn editor() -> ResumeEditor {
        let mut editor = ResumeEditor::new(Locale::En);
        editor.edit_personal(PersonalField::Name, "Jane <Doe>".into());
        editor.edit_personal(PersonalField::Email, "jane@x.com".into());
        editor
    }

    #[test]
    fn test_render_container_and_sections() {
        let html = HtmlPreview::new(&editor()).render();
        assert!(html.starts_with("<div class=\"resume-content\" style=\"line-height: 1.2\">"));
        assert_eq!(html.matches("class=\"resume-section\"").count(), 6);
        assert!(html.contains("Jane &lt;Doe&gt;"));
        assert!(html.contains("<p class=\"contact\">jane@x.com</p>"));
    }

    #[test]
    fn test_theme_color_on_titles_only() {
        let html = HtmlPreview::new(&editor()).render_section(Section::Education);
        assert!(html.starts_with(
            "<div class=\"resume-section\" data-section=\"education\" style=\"padding-right: 120px\">"
        ));
        assert!(html.contains(
            "style=\"color: #4169e1; border-bottom: 1px solid #4169e1\">Education</h4>"
        ));
        assert_eq!(html.matches("color: #4169e1").count(), 1);
    }

    #[test]
    fn test_controls_visible() {
        let html = HtmlPreview::new(&editor()).render();
        assert_eq!(html.matches("class=\"add-button\"").count(), 3);
        assert_eq!(html.matches("class=\"action-buttons\"").count(), 3);
        assert!(html.contains("padding-right: 120px"));
        assert!(html.contains(
            "data-action=\"moveDown\" data-section=\"workExperience\" data-index=\"0\""
        ));
    }

    #[test]
    fn test_controls_hidden() {
        let mut editor = editor();
        let hidden = editor.hide_controls();
        let html = HtmlPreview::new(&hidden).render();
        assert!(!html.contains("action-buttons"));
        assert!(!html.contains("add-button"));
        assert!(html.contains("padding-right: 0px"));
    }

    #[test]
    fn test_rich_text_is_sanitized() {
        let mut editor = editor();
        editor.set_skills("<p onclick=\"x()\">Rust</p><script>alert(1)</script>".into());
        let html = HtmlPreview::new(&editor).with_controls(false).render();
        assert!(html.contains("<div class=\"rich-text\"><p>Rust</p></div>"));
        assert!(!html.contains("script"));
        assert!(!html.contains("onclick"));
    }

    #[test]
    fn test_section_titles_follow_locale() {
        let mut editor = editor();
        editor.set_locale(Locale::ZhCn);
        let html = HtmlPreview::new(&editor).render_section(Section::Education);
        assert!(html.contains("教育经历"));
    }
}

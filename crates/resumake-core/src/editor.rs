//! Form and preview coordinator
//!
//! [`ResumeEditor`] owns the résumé being edited together with everything
//! the preview needs: which form panel is open, the toolbar style, the
//! display locale and whether the overlay controls are drawn. All edits
//! arrive as [`Action`]s; each direct method returns whether the state
//! actually changed.

use std::ops::Deref;

use resumake_model::{
    Degree, EducationField, LineHeight, ListSection, Locale, PersonalField, PreviewStyle,
    ProjectField, Resume, Section, ThemeColor, WorkField,
};
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::list;
use crate::month::{picker_value, YearMonth};

/// Which end of a period a month picker edits
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum DateBound {
    Start,
    End,
}

/// A single user edit
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "action", rename_all = "camelCase", rename_all_fields = "camelCase")]
pub enum Action {
    SelectSection {
        section: Option<Section>,
    },
    EditPersonal {
        field: PersonalField,
        value: String,
    },
    EditEducation {
        index: usize,
        field: EducationField,
        value: String,
    },
    SetDegree {
        index: usize,
        degree: Degree,
    },
    EditWork {
        index: usize,
        field: WorkField,
        value: String,
    },
    EditProject {
        index: usize,
        field: ProjectField,
        value: String,
    },
    SetSkills {
        html: String,
    },
    SetSummary {
        html: String,
    },
    /// `month: None` clears the field
    PickMonth {
        section: ListSection,
        index: usize,
        bound: DateBound,
        month: Option<YearMonth>,
    },
    Add {
        section: ListSection,
    },
    Remove {
        section: ListSection,
        index: usize,
    },
    MoveUp {
        section: ListSection,
        index: usize,
    },
    MoveDown {
        section: ListSection,
        index: usize,
    },
    SetLineHeight {
        line_height: LineHeight,
    },
    SetThemeColor {
        color: ThemeColor,
    },
}

/// Interactive overlays drawn on the preview
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PreviewChrome {
    pub controls_visible: bool,
}

impl PreviewChrome {
    /// Right padding a section needs so the overlay buttons do not cover it
    pub fn section_padding_px(&self) -> u32 {
        if self.controls_visible {
            120
        } else {
            0
        }
    }
}

impl Default for PreviewChrome {
    fn default() -> Self {
        Self {
            controls_visible: true,
        }
    }
}

/// Run `$body` with `$items` bound to the list behind a [`ListSection`]
macro_rules! with_list {
    ($resume:expr, $section:expr, |$items:ident| $body:expr) => {
        match $section {
            ListSection::Education => {
                let $items = &mut $resume.education;
                $body
            }
            ListSection::WorkExperience => {
                let $items = &mut $resume.work_experience;
                $body
            }
            ListSection::Projects => {
                let $items = &mut $resume.projects;
                $body
            }
        }
    };
}

fn replace(slot: &mut String, value: String) -> bool {
    if *slot == value {
        return false;
    }
    *slot = value;
    true
}

/// The editing session behind the form and the preview
#[derive(Debug, Clone, Default)]
pub struct ResumeEditor {
    resume: Resume,
    active_section: Option<Section>,
    style: PreviewStyle,
    locale: Locale,
    chrome: PreviewChrome,
}

impl ResumeEditor {
    /// A blank résumé, as the page shows on first mount
    pub fn new(locale: Locale) -> Self {
        Self::from_resume(Resume::new(), locale)
    }

    pub fn from_resume(resume: Resume, locale: Locale) -> Self {
        Self {
            resume,
            locale,
            ..Default::default()
        }
    }

    pub fn with_style(mut self, style: PreviewStyle) -> Self {
        self.style = style;
        self
    }

    pub fn resume(&self) -> &Resume {
        &self.resume
    }

    pub fn into_resume(self) -> Resume {
        self.resume
    }

    pub fn active_section(&self) -> Option<Section> {
        self.active_section
    }

    pub fn style(&self) -> PreviewStyle {
        self.style
    }

    pub fn locale(&self) -> Locale {
        self.locale
    }

    pub fn set_locale(&mut self, locale: Locale) {
        self.locale = locale;
    }

    pub fn chrome(&self) -> PreviewChrome {
        self.chrome
    }

    pub fn set_controls_visible(&mut self, visible: bool) {
        self.chrome.controls_visible = visible;
    }

    /// Hide the overlay controls until the returned guard is dropped
    pub fn hide_controls(&mut self) -> ControlsHidden<'_> {
        let previous = self.chrome;
        self.chrome.controls_visible = false;
        ControlsHidden {
            editor: self,
            previous,
        }
    }

    /// Apply one edit
    pub fn apply(&mut self, action: Action) -> bool {
        debug!(?action, "applying action");
        let changed = match action {
            Action::SelectSection { section } => self.select_section(section),
            Action::EditPersonal { field, value } => self.edit_personal(field, value),
            Action::EditEducation {
                index,
                field,
                value,
            } => self.edit_education(index, field, value),
            Action::SetDegree { index, degree } => self.set_degree(index, degree),
            Action::EditWork {
                index,
                field,
                value,
            } => self.edit_work(index, field, value),
            Action::EditProject {
                index,
                field,
                value,
            } => self.edit_project(index, field, value),
            Action::SetSkills { html } => self.set_skills(html),
            Action::SetSummary { html } => self.set_summary(html),
            Action::PickMonth {
                section,
                index,
                bound,
                month,
            } => self.pick_month(section, index, bound, month),
            Action::Add { section } => {
                self.add(section);
                true
            }
            Action::Remove { section, index } => self.remove(section, index),
            Action::MoveUp { section, index } => self.move_up(section, index),
            Action::MoveDown { section, index } => self.move_down(section, index),
            Action::SetLineHeight { line_height } => self.set_line_height(line_height),
            Action::SetThemeColor { color } => self.set_theme_color(color),
        };
        debug!(changed, "applied action");
        changed
    }

    /// Apply a batch of edits, returning how many changed anything
    pub fn apply_all(&mut self, actions: impl IntoIterator<Item = Action>) -> usize {
        actions
            .into_iter()
            .map(|action| self.apply(action))
            .filter(|changed| *changed)
            .count()
    }

    pub fn select_section(&mut self, section: Option<Section>) -> bool {
        let changed = self.active_section != section;
        self.active_section = section;
        changed
    }

    pub fn edit_personal(&mut self, field: PersonalField, value: String) -> bool {
        replace(self.resume.personal_info.field_mut(field), value)
    }

    pub fn edit_education(&mut self, index: usize, field: EducationField, value: String) -> bool {
        self.resume
            .education
            .get_mut(index)
            .is_some_and(|entry| replace(entry.field_mut(field), value))
    }

    pub fn set_degree(&mut self, index: usize, degree: Degree) -> bool {
        match self.resume.education.get_mut(index) {
            Some(entry) if entry.degree != degree => {
                entry.degree = degree;
                true
            }
            _ => false,
        }
    }

    pub fn edit_work(&mut self, index: usize, field: WorkField, value: String) -> bool {
        self.resume
            .work_experience
            .get_mut(index)
            .is_some_and(|entry| replace(entry.field_mut(field), value))
    }

    pub fn edit_project(&mut self, index: usize, field: ProjectField, value: String) -> bool {
        self.resume
            .projects
            .get_mut(index)
            .is_some_and(|entry| replace(entry.field_mut(field), value))
    }

    pub fn set_skills(&mut self, html: String) -> bool {
        let changed = self.resume.skills_html() != html || self.resume.skills.len() != 1;
        self.resume.set_skills(html);
        changed
    }

    pub fn set_summary(&mut self, html: String) -> bool {
        let changed = self.resume.summary_html() != html || self.resume.summary.len() != 1;
        self.resume.set_summary(html);
        changed
    }

    /// Store a month picker result in a start or end field
    pub fn pick_month(
        &mut self,
        section: ListSection,
        index: usize,
        bound: DateBound,
        month: Option<YearMonth>,
    ) -> bool {
        let Some(value) = picker_value(month, self.locale) else {
            return false;
        };
        let slot = match (section, bound) {
            (ListSection::Education, bound) => {
                self.resume.education.get_mut(index).map(|e| match bound {
                    DateBound::Start => e.field_mut(EducationField::StartTime),
                    DateBound::End => e.field_mut(EducationField::EndTime),
                })
            }
            (ListSection::WorkExperience, bound) => {
                self.resume.work_experience.get_mut(index).map(|e| match bound {
                    DateBound::Start => e.field_mut(WorkField::StartTime),
                    DateBound::End => e.field_mut(WorkField::EndTime),
                })
            }
            (ListSection::Projects, bound) => {
                self.resume.projects.get_mut(index).map(|e| match bound {
                    DateBound::Start => e.field_mut(ProjectField::StartTime),
                    DateBound::End => e.field_mut(ProjectField::EndTime),
                })
            }
        };
        slot.is_some_and(|slot| replace(slot, value))
    }

    /// Append an empty entry and open that section's form. Returns the new
    /// entry's index.
    pub fn add(&mut self, section: ListSection) -> usize {
        let index = with_list!(self.resume, section, |items| list::append_default(items));
        self.active_section = Some(section.into());
        index
    }

    pub fn remove(&mut self, section: ListSection, index: usize) -> bool {
        with_list!(self.resume, section, |items| list::remove(items, index).is_some())
    }

    pub fn move_up(&mut self, section: ListSection, index: usize) -> bool {
        with_list!(self.resume, section, |items| list::move_up(items, index))
    }

    pub fn move_down(&mut self, section: ListSection, index: usize) -> bool {
        with_list!(self.resume, section, |items| list::move_down(items, index))
    }

    pub fn set_line_height(&mut self, line_height: LineHeight) -> bool {
        let changed = self.style.line_height != line_height;
        self.style.line_height = line_height;
        changed
    }

    pub fn set_theme_color(&mut self, color: ThemeColor) -> bool {
        let changed = self.style.theme_color != color;
        self.style.theme_color = color;
        changed
    }
}

/// Editor with its overlay controls hidden; the previous chrome comes back
/// when this is dropped, including on early return.
pub struct ControlsHidden<'a> {
    editor: &'a mut ResumeEditor,
    previous: PreviewChrome,
}

impl Deref for ControlsHidden<'_> {
    type Target = ResumeEditor;

    fn deref(&self) -> &ResumeEditor {
        &*self.editor
    }
}

impl Drop for ControlsHidden<'_> {
    fn drop(&mut self) {
        self.editor.chrome = self.previous;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use resumake_model::{EducationEntry, ProjectEntry, WorkExperienceEntry};

    fn editor() -> ResumeEditor {
        ResumeEditor::new(Locale::En)
    }

    fn named_schools(editor: &mut ResumeEditor, names: &[&str]) {
        editor.resume.education = names
            .iter()
            .map(|name| EducationEntry {
                school: name.to_string(),
                ..Default::default()
            })
            .collect();
    }

    fn schools(editor: &ResumeEditor) -> Vec<String> {
        editor
            .resume()
            .education
            .iter()
            .map(|e| e.school.clone())
            .collect()
    }

    #[test]
    fn test_add_appends_empty_entry_in_every_section() {
        let mut editor = editor();
        for section in ListSection::ALL {
            let before = editor.resume().len_of(section);
            let index = editor.add(section);
            assert_eq!(index, before);
            assert_eq!(editor.resume().len_of(section), before + 1);
            assert_eq!(editor.active_section(), Some(section.into()));
        }
        assert_eq!(editor.resume().education[1], EducationEntry::default());
        assert_eq!(
            editor.resume().work_experience[1],
            WorkExperienceEntry::default()
        );
        assert_eq!(editor.resume().projects[1], ProjectEntry::default());
    }

    #[test]
    fn test_remove_excises_index() {
        let mut editor = editor();
        named_schools(&mut editor, &["A", "B", "C"]);
        assert!(editor.apply(Action::Remove {
            section: ListSection::Education,
            index: 1
        }));
        assert_eq!(schools(&editor), vec!["A", "C"]);
        assert!(!editor.remove(ListSection::Education, 5));
        assert_eq!(schools(&editor), vec!["A", "C"]);
    }

    #[test]
    fn test_moves_at_bounds_are_noops() {
        let mut editor = editor();
        named_schools(&mut editor, &["A", "B", "C"]);
        assert!(!editor.move_up(ListSection::Education, 0));
        assert!(!editor.move_down(ListSection::Education, 2));
        assert_eq!(schools(&editor), vec!["A", "B", "C"]);

        assert!(editor.move_down(ListSection::Education, 0));
        assert_eq!(schools(&editor), vec!["B", "A", "C"]);
        assert!(editor.move_up(ListSection::Education, 1));
        assert_eq!(schools(&editor), vec!["A", "B", "C"]);
    }

    #[test]
    fn test_field_edits() {
        let mut editor = editor();
        assert!(editor.edit_personal(PersonalField::Name, "Jane Doe".into()));
        assert!(!editor.edit_personal(PersonalField::Name, "Jane Doe".into()));
        assert!(editor.edit_work(0, WorkField::Company, "Acme".into()));
        assert!(editor.edit_project(0, ProjectField::Name, "resumake".into()));
        assert!(editor.set_degree(0, Degree::Master));
        assert!(!editor.edit_education(3, EducationField::School, "X".into()));

        let resume = editor.resume();
        assert_eq!(resume.personal_info.name, "Jane Doe");
        assert_eq!(resume.work_experience[0].company, "Acme");
        assert_eq!(resume.projects[0].name, "resumake");
        assert_eq!(resume.education[0].degree, Degree::Master);
    }

    #[test]
    fn test_pick_month() {
        let mut editor = ResumeEditor::new(Locale::ZhCn);
        assert!(editor.pick_month(
            ListSection::WorkExperience,
            0,
            DateBound::Start,
            Some(YearMonth::new(2021, 3))
        ));
        assert_eq!(editor.resume().work_experience[0].start_time, "2021年03月");

        assert!(editor.pick_month(ListSection::WorkExperience, 0, DateBound::Start, None));
        assert_eq!(editor.resume().work_experience[0].start_time, "");

        assert!(!editor.pick_month(
            ListSection::Projects,
            0,
            DateBound::End,
            Some(YearMonth::new(2021, 13))
        ));
        assert!(!editor.pick_month(ListSection::Projects, 9, DateBound::End, None));
    }

    #[test]
    fn test_style_actions() {
        let mut editor = editor();
        let lh: LineHeight = "1.5".parse().unwrap();
        assert!(editor.apply(Action::SetLineHeight { line_height: lh }));
        assert!(!editor.set_line_height(lh));
        assert!(editor.set_theme_color("#112233".parse().unwrap()));
        assert_eq!(editor.style().theme_color.hex(), "#112233");
    }

    #[test]
    fn test_hide_controls_restores_on_drop() {
        let mut editor = editor();
        {
            let hidden = editor.hide_controls();
            assert!(!hidden.chrome().controls_visible);
            assert_eq!(hidden.chrome().section_padding_px(), 0);
        }
        assert!(editor.chrome().controls_visible);

        let result: Result<(), &str> = (|| {
            let _hidden = editor.hide_controls();
            Err("render failed")
        })();
        assert!(result.is_err());
        assert!(editor.chrome().controls_visible);
    }

    #[test]
    fn test_actions_from_json() {
        let actions: Vec<Action> = serde_json::from_str(
            r##"[
                {"action":"editPersonal","field":"name","value":"Jane Doe"},
                {"action":"add","section":"workExperience"},
                {"action":"pickMonth","section":"education","index":0,"bound":"start","month":{"year":2016,"month":9}},
                {"action":"setThemeColor","color":"#FF0000"},
                {"action":"selectSection","section":null}
            ]"##,
        )
        .unwrap();
        let mut editor = editor();
        assert_eq!(editor.apply_all(actions), 5);
        assert_eq!(editor.resume().work_experience.len(), 2);
        assert_eq!(editor.resume().education[0].start_time, "2016-09");
        assert_eq!(editor.active_section(), None);
    }
}

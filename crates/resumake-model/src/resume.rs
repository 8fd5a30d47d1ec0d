//! The résumé root and its sections

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::entry::{EducationEntry, ProjectEntry, WorkExperienceEntry};
use crate::personal::PersonalInfo;

/// A named category of résumé content
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum Section {
    PersonalInfo,
    Education,
    Skills,
    WorkExperience,
    Projects,
    Summary,
}

impl Section {
    /// Sections in display order
    pub const ALL: [Section; 6] = [
        Section::PersonalInfo,
        Section::Education,
        Section::Skills,
        Section::WorkExperience,
        Section::Projects,
        Section::Summary,
    ];

    /// The list-valued counterpart, if this section holds entries
    pub fn as_list(self) -> Option<ListSection> {
        match self {
            Section::Education => Some(ListSection::Education),
            Section::WorkExperience => Some(ListSection::WorkExperience),
            Section::Projects => Some(ListSection::Projects),
            _ => None,
        }
    }

    /// Identifier used in HTML class names and `data-section` attributes
    pub fn key(self) -> &'static str {
        match self {
            Section::PersonalInfo => "personalInfo",
            Section::Education => "education",
            Section::Skills => "skills",
            Section::WorkExperience => "workExperience",
            Section::Projects => "projects",
            Section::Summary => "summary",
        }
    }
}

impl fmt::Display for Section {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.key())
    }
}

/// Sections that support add / remove / reorder
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum ListSection {
    Education,
    WorkExperience,
    Projects,
}

impl ListSection {
    pub const ALL: [ListSection; 3] = [
        ListSection::Education,
        ListSection::WorkExperience,
        ListSection::Projects,
    ];
}

impl From<ListSection> for Section {
    fn from(value: ListSection) -> Self {
        match value {
            ListSection::Education => Section::Education,
            ListSection::WorkExperience => Section::WorkExperience,
            ListSection::Projects => Section::Projects,
        }
    }
}

/// A complete résumé
///
/// Skills and summary are one-element lists holding rich-text HTML; the
/// accessors below treat a missing element as empty.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct Resume {
    pub personal_info: PersonalInfo,
    pub education: Vec<EducationEntry>,
    pub skills: Vec<String>,
    pub work_experience: Vec<WorkExperienceEntry>,
    pub projects: Vec<ProjectEntry>,
    pub summary: Vec<String>,
}

impl Resume {
    /// A blank résumé with one empty entry per list section
    pub fn new() -> Self {
        Self {
            personal_info: PersonalInfo::default(),
            education: vec![EducationEntry::default()],
            skills: vec![String::new()],
            work_experience: vec![WorkExperienceEntry::default()],
            projects: vec![ProjectEntry::default()],
            summary: vec![String::new()],
        }
    }

    /// Skills HTML
    pub fn skills_html(&self) -> &str {
        self.skills.first().map(String::as_str).unwrap_or("")
    }

    /// Summary HTML
    pub fn summary_html(&self) -> &str {
        self.summary.first().map(String::as_str).unwrap_or("")
    }

    /// Replace the skills text
    pub fn set_skills(&mut self, html: impl Into<String>) {
        self.skills = vec![html.into()];
    }

    /// Replace the summary text
    pub fn set_summary(&mut self, html: impl Into<String>) {
        self.summary = vec![html.into()];
    }

    /// Number of entries in a list section
    pub fn len_of(&self, section: ListSection) -> usize {
        match section {
            ListSection::Education => self.education.len(),
            ListSection::WorkExperience => self.work_experience.len(),
            ListSection::Projects => self.projects.len(),
        }
    }
}

impl Default for Resume {
    fn default() -> Self {
        Self::new()
    }
}

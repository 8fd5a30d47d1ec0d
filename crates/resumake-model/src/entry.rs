//! List-section records
//!
//! Education, work experience and project entries. Each record type has a
//! matching field enum so edits can be expressed as data.

use serde::{Deserialize, Serialize};

use crate::locale::Locale;

/// Highest degree obtained at a school
///
/// Serialized as a plain string; the empty string means "not selected",
/// which is what a freshly added entry holds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum Degree {
    #[default]
    #[serde(rename = "")]
    Unspecified,
    #[serde(rename = "associate", alias = "大专")]
    Associate,
    #[serde(rename = "bachelor", alias = "本科")]
    Bachelor,
    #[serde(rename = "master", alias = "硕士")]
    Master,
    #[serde(rename = "doctorate", alias = "博士")]
    Doctorate,
}

impl Degree {
    /// The selectable degrees, in the order the form lists them
    pub const ALL: [Degree; 4] = [
        Degree::Associate,
        Degree::Bachelor,
        Degree::Master,
        Degree::Doctorate,
    ];

    /// Display label, empty for [`Degree::Unspecified`]
    pub fn label(self, locale: Locale) -> &'static str {
        locale.degree_label(self)
    }
}

/// Start/end accessors shared by every dated entry
pub trait Period {
    fn start_time(&self) -> &str;
    fn end_time(&self) -> &str;

    /// `"start - end"`, or an empty string when neither end is set
    fn period_label(&self) -> String {
        let (start, end) = (self.start_time().trim(), self.end_time().trim());
        if start.is_empty() && end.is_empty() {
            String::new()
        } else {
            format!("{} - {}", start, end)
        }
    }
}

/// One school attended
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct EducationEntry {
    pub school: String,
    pub major: String,
    pub degree: Degree,
    pub start_time: String,
    pub end_time: String,
}

/// Free-text fields of [`EducationEntry`]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum EducationField {
    School,
    Major,
    StartTime,
    EndTime,
}

impl EducationEntry {
    pub fn field_mut(&mut self, field: EducationField) -> &mut String {
        match field {
            EducationField::School => &mut self.school,
            EducationField::Major => &mut self.major,
            EducationField::StartTime => &mut self.start_time,
            EducationField::EndTime => &mut self.end_time,
        }
    }
}

impl Period for EducationEntry {
    fn start_time(&self) -> &str {
        &self.start_time
    }

    fn end_time(&self) -> &str {
        &self.end_time
    }
}

/// One job held
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct WorkExperienceEntry {
    pub company: String,
    pub position: String,
    pub start_time: String,
    pub end_time: String,
    /// Rich-text HTML
    pub description: String,
}

/// Fields of [`WorkExperienceEntry`]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum WorkField {
    Company,
    Position,
    StartTime,
    EndTime,
    Description,
}

impl WorkExperienceEntry {
    pub fn field_mut(&mut self, field: WorkField) -> &mut String {
        match field {
            WorkField::Company => &mut self.company,
            WorkField::Position => &mut self.position,
            WorkField::StartTime => &mut self.start_time,
            WorkField::EndTime => &mut self.end_time,
            WorkField::Description => &mut self.description,
        }
    }

    /// `"company - position"` as the entry heading shows it
    pub fn heading(&self) -> String {
        let (company, position) = (self.company.trim(), self.position.trim());
        match (company.is_empty(), position.is_empty()) {
            (false, false) => format!("{} - {}", company, position),
            (false, true) => company.to_string(),
            (true, false) => position.to_string(),
            (true, true) => String::new(),
        }
    }
}

impl Period for WorkExperienceEntry {
    fn start_time(&self) -> &str {
        &self.start_time
    }

    fn end_time(&self) -> &str {
        &self.end_time
    }
}

/// One project worked on
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct ProjectEntry {
    pub name: String,
    pub start_time: String,
    pub end_time: String,
    /// Rich-text HTML
    pub description: String,
}

/// Fields of [`ProjectEntry`]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum ProjectField {
    Name,
    StartTime,
    EndTime,
    Description,
}

impl ProjectEntry {
    pub fn field_mut(&mut self, field: ProjectField) -> &mut String {
        match field {
            ProjectField::Name => &mut self.name,
            ProjectField::StartTime => &mut self.start_time,
            ProjectField::EndTime => &mut self.end_time,
            ProjectField::Description => &mut self.description,
        }
    }
}

impl Period for ProjectEntry {
    fn start_time(&self) -> &str {
        &self.start_time
    }

    fn end_time(&self) -> &str {
        &self.end_time
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_entries_are_blank() {
        let edu = EducationEntry::default();
        assert_eq!(edu.school, "");
        assert_eq!(edu.degree, Degree::Unspecified);

        let work = WorkExperienceEntry::default();
        assert_eq!(work.description, "");
        assert_eq!(work.period_label(), "");
    }

    #[test]
    fn test_period_label() {
        let project = ProjectEntry {
            start_time: "2020-01".to_string(),
            end_time: "2021-06".to_string(),
            ..Default::default()
        };
        assert_eq!(project.period_label(), "2020-01 - 2021-06");
    }

    #[test]
    fn test_work_heading() {
        let mut work = WorkExperienceEntry::default();
        *work.field_mut(WorkField::Company) = "Acme".to_string();
        assert_eq!(work.heading(), "Acme");
        *work.field_mut(WorkField::Position) = "Engineer".to_string();
        assert_eq!(work.heading(), "Acme - Engineer");
    }

    #[test]
    fn test_degree_serialization() {
        assert_eq!(serde_json::to_string(&Degree::Unspecified).unwrap(), "\"\"");
        assert_eq!(serde_json::to_string(&Degree::Master).unwrap(), "\"master\"");

        let degree: Degree = serde_json::from_str("\"本科\"").unwrap();
        assert_eq!(degree, Degree::Bachelor);
    }

    #[test]
    fn test_education_json_field_names() {
        let edu = EducationEntry {
            school: "MIT".to_string(),
            start_time: "2016-09".to_string(),
            ..Default::default()
        };
        let json = serde_json::to_string(&edu).unwrap();
        assert!(json.contains("\"startTime\":\"2016-09\""));
        assert!(json.contains("\"degree\":\"\""));
    }
}

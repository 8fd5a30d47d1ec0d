//! Locale-dependent labels
//!
//! Every piece of fixed text a renderer prints (section titles, degree
//! names, placeholders, the default export filename) comes from here.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::entry::Degree;
use crate::resume::Section;
use crate::style::ModelError;

/// Display language of labels and dates
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum Locale {
    #[default]
    #[serde(rename = "en")]
    En,
    #[serde(rename = "zh-cn", alias = "zh-CN", alias = "zh_CN")]
    ZhCn,
}

impl Locale {
    /// Heading printed above a section
    pub fn section_title(self, section: Section) -> &'static str {
        match (self, section) {
            (Locale::En, Section::PersonalInfo) => "Personal Information",
            (Locale::En, Section::Education) => "Education",
            (Locale::En, Section::Skills) => "Skills",
            (Locale::En, Section::WorkExperience) => "Work Experience",
            (Locale::En, Section::Projects) => "Projects",
            (Locale::En, Section::Summary) => "Summary",
            (Locale::ZhCn, Section::PersonalInfo) => "个人信息",
            (Locale::ZhCn, Section::Education) => "教育经历",
            (Locale::ZhCn, Section::Skills) => "专业技能",
            (Locale::ZhCn, Section::WorkExperience) => "工作经历",
            (Locale::ZhCn, Section::Projects) => "项目经验",
            (Locale::ZhCn, Section::Summary) => "个人总结",
        }
    }

    pub fn degree_label(self, degree: Degree) -> &'static str {
        match (self, degree) {
            (_, Degree::Unspecified) => "",
            (Locale::En, Degree::Associate) => "Associate",
            (Locale::En, Degree::Bachelor) => "Bachelor",
            (Locale::En, Degree::Master) => "Master",
            (Locale::En, Degree::Doctorate) => "Doctorate",
            (Locale::ZhCn, Degree::Associate) => "大专",
            (Locale::ZhCn, Degree::Bachelor) => "本科",
            (Locale::ZhCn, Degree::Master) => "硕士",
            (Locale::ZhCn, Degree::Doctorate) => "博士",
        }
    }

    /// `strftime` pattern for month-precision dates
    pub fn month_pattern(self) -> &'static str {
        match self {
            Locale::En => "%Y-%m",
            Locale::ZhCn => "%Y年%m月",
        }
    }

    /// Text shown by an editable module that has no content yet
    pub fn empty_module_placeholder(self) -> &'static str {
        match self {
            Locale::En => "Click edit to add content",
            Locale::ZhCn => "点击编辑添加内容",
        }
    }

    /// Filename the export is saved under unless configured otherwise
    pub fn default_filename(self) -> &'static str {
        match self {
            Locale::En => "resume.pdf",
            Locale::ZhCn => "我的简历.pdf",
        }
    }

    /// BCP 47 tag, used for the `lang` of generated documents
    pub fn tag(self) -> &'static str {
        match self {
            Locale::En => "en",
            Locale::ZhCn => "zh",
        }
    }
}

impl fmt::Display for Locale {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Locale::En => write!(f, "en"),
            Locale::ZhCn => write!(f, "zh-cn"),
        }
    }
}

impl FromStr for Locale {
    type Err = ModelError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().replace('_', "-").as_str() {
            "en" | "en-us" | "en-gb" => Ok(Locale::En),
            "zh" | "zh-cn" => Ok(Locale::ZhCn),
            other => Err(ModelError::UnknownLocale(other.to_string())),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_locale() {
        assert_eq!("en".parse::<Locale>().unwrap(), Locale::En);
        assert_eq!("zh_CN".parse::<Locale>().unwrap(), Locale::ZhCn);
        assert!("fr".parse::<Locale>().is_err());
    }

    #[test]
    fn test_every_section_has_a_title() {
        for locale in [Locale::En, Locale::ZhCn] {
            for section in Section::ALL {
                assert!(!locale.section_title(section).is_empty());
            }
        }
    }

    #[test]
    fn test_default_filename() {
        assert_eq!(Locale::En.default_filename(), "resume.pdf");
        assert_eq!(Locale::ZhCn.default_filename(), "我的简历.pdf");
    }
}

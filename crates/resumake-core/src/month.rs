//! Month picker values
//!
//! Date fields store preformatted strings. The picker hands over a year and
//! month which are formatted with the locale's pattern; clearing the picker
//! stores an empty string.

use chrono::{Datelike, NaiveDate};
use resumake_model::Locale;
use serde::{Deserialize, Serialize};

/// A calendar month
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct YearMonth {
    pub year: i32,
    /// 1-based
    pub month: u32,
}

impl YearMonth {
    pub fn new(year: i32, month: u32) -> Self {
        Self { year, month }
    }

    fn first_day(self) -> Option<NaiveDate> {
        NaiveDate::from_ymd_opt(self.year, self.month, 1)
    }

    /// Format with the locale pattern, `None` for an impossible month
    pub fn format(self, locale: Locale) -> Option<String> {
        self.first_day()
            .map(|date| date.format(locale.month_pattern()).to_string())
    }

    /// Read back a string produced by [`YearMonth::format`]
    pub fn parse(text: &str, locale: Locale) -> Option<Self> {
        let text = text.trim();
        if text.is_empty() {
            return None;
        }
        let pattern = format!("{} %d", locale.month_pattern());
        NaiveDate::parse_from_str(&format!("{} 01", text), &pattern)
            .ok()
            .map(|date| YearMonth::new(date.year(), date.month()))
    }
}

/// The string a date field holds after the picker changed
pub fn picker_value(month: Option<YearMonth>, locale: Locale) -> Option<String> {
    match month {
        Some(month) => month.format(locale),
        None => Some(String::new()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_en() {
        assert_eq!(
            YearMonth::new(2020, 9).format(Locale::En),
            Some("2020-09".to_string())
        );
    }

    #[test]
    fn test_format_zh() {
        assert_eq!(
            YearMonth::new(2020, 9).format(Locale::ZhCn),
            Some("2020年09月".to_string())
        );
    }

    #[test]
    fn test_invalid_month() {
        assert_eq!(YearMonth::new(2020, 13).format(Locale::En), None);
        assert_eq!(YearMonth::new(2020, 0).format(Locale::En), None);
    }

    #[test]
    fn test_parse_back() {
        for locale in [Locale::En, Locale::ZhCn] {
            let month = YearMonth::new(2019, 11);
            let text = month.format(locale).unwrap();
            assert_eq!(YearMonth::parse(&text, locale), Some(month));
        }
        assert_eq!(YearMonth::parse("", Locale::En), None);
        assert_eq!(YearMonth::parse("soon", Locale::En), None);
    }

    #[test]
    fn test_picker_value() {
        assert_eq!(picker_value(None, Locale::En), Some(String::new()));
        assert_eq!(
            picker_value(Some(YearMonth::new(2024, 1)), Locale::En),
            Some("2024-01".to_string())
        );
        assert_eq!(picker_value(Some(YearMonth::new(2024, 42)), Locale::En), None);
    }
}

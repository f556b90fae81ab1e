use strum::{AsRefStr, EnumIter, EnumProperty, EnumString, IntoEnumIterator};

/// Base URL of the Arts and Science calendar
pub const CALENDAR_BASE_URL: &str = "https://artsci.calendar.utoronto.ca/section";

/// Calendar sections the fetcher covers, keyed by course code prefix
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, EnumString, EnumIter, AsRefStr, EnumProperty)]
pub enum Subject {
    #[strum(serialize = "CSC", props(section = "Computer-Science"))]
    ComputerScience,
    #[strum(serialize = "MAT", props(section = "Mathematics"))]
    Mathematics,
    #[strum(serialize = "STA", props(section = "Statistical-Sciences"))]
    StatisticalSciences,
}

impl Subject {
    /// The three-letter prefix of the subject's course codes
    pub fn code_prefix(&self) -> &str {
        self.as_ref()
    }

    /// The section slug used in calendar page URLs
    pub fn section_slug(&self) -> &'static str {
        self.get_str("section").unwrap_or_default()
    }

    /// Full URL of the subject's calendar page
    pub fn page_url(&self) -> String {
        format!("{CALENDAR_BASE_URL}/{}", self.section_slug())
    }

    pub fn all() -> Vec<Subject> {
        Subject::iter().collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::str::FromStr;

    #[test]
    fn test_code_prefix() {
        assert_eq!(Subject::ComputerScience.code_prefix(), "CSC");
        assert_eq!(Subject::StatisticalSciences.code_prefix(), "STA");
    }

    #[test]
    fn test_section_slug() {
        assert_eq!(Subject::Mathematics.section_slug(), "Mathematics");
        assert_eq!(
            Subject::StatisticalSciences.section_slug(),
            "Statistical-Sciences"
        );
    }

    #[test]
    fn test_page_url() {
        assert_eq!(
            Subject::ComputerScience.page_url(),
            "https://artsci.calendar.utoronto.ca/section/Computer-Science"
        );
    }

    #[test]
    fn test_from_str() {
        assert_eq!(Subject::from_str("CSC").unwrap(), Subject::ComputerScience);
        assert_eq!(Subject::from_str("MAT").unwrap(), Subject::Mathematics);
        assert!(Subject::from_str("XYZ").is_err());
    }

    #[test]
    fn test_all() {
        let all = Subject::all();
        assert_eq!(all.len(), 3);
    }

    #[test]
    fn test_round_trip() {
        for subject in Subject::all() {
            let prefix = subject.code_prefix();
            assert_eq!(Subject::from_str(prefix).unwrap(), subject);
        }
    }
}

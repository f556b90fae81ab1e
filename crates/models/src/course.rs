use serde::Serialize;
use std::fmt::{Display, Formatter, Result as FmtResult};

/// Position in a catalog code that encodes the course duration
/// (the `Y` in `MAT137Y1`)
const DURATION_INDEX: usize = 6;

/// Position in a catalog code that encodes the year level
/// (the first `1` in `CSC111H1`)
const YEAR_LEVEL_INDEX: usize = 3;

/// Duration class of a course, read from a fixed position of its catalog code
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum Duration {
    /// Runs both terms, worth 1.0 credits
    FullYear,
    /// Runs a single term, worth 0.5 credits
    HalfYear,
}

impl Duration {
    /// Derive the duration class from a catalog code. Codes too short to
    /// carry the marker are treated as half-year.
    pub fn from_code(code: &str) -> Self {
        match code.as_bytes().get(DURATION_INDEX) {
            Some(b'Y') => Self::FullYear,
            _ => Self::HalfYear,
        }
    }

    /// Credit weight of the course, used as the opportunity cost of taking it
    pub fn credit_weight(&self) -> f64 {
        match self {
            Self::FullYear => 1.0,
            Self::HalfYear => 0.5,
        }
    }
}

impl Display for Duration {
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        match self {
            Self::FullYear => write!(f, "full-year"),
            Self::HalfYear => write!(f, "half-year"),
        }
    }
}

/// Year level of a course, read from its catalog code (`CSC111H1` is a
/// first-year course). `None` when the code is too short or the position
/// does not hold a digit.
pub fn year_level(code: &str) -> Option<u32> {
    code.chars().nth(YEAR_LEVEL_INDEX)?.to_digit(10)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_duration_from_code() {
        assert_eq!(Duration::from_code("MAT137Y1"), Duration::FullYear);
        assert_eq!(Duration::from_code("CSC110Y1"), Duration::FullYear);
        assert_eq!(Duration::from_code("CSC111H1"), Duration::HalfYear);
        assert_eq!(Duration::from_code("STA257H1"), Duration::HalfYear);
    }

    #[test]
    fn test_duration_from_short_code() {
        // Codes without the marker position default to half-year
        assert_eq!(Duration::from_code(""), Duration::HalfYear);
        assert_eq!(Duration::from_code("MAT137"), Duration::HalfYear);
    }

    #[test]
    fn test_credit_weight() {
        assert_eq!(Duration::FullYear.credit_weight(), 1.0);
        assert_eq!(Duration::HalfYear.credit_weight(), 0.5);
    }

    #[test]
    fn test_duration_display() {
        assert_eq!(Duration::FullYear.to_string(), "full-year");
        assert_eq!(Duration::HalfYear.to_string(), "half-year");
    }

    #[test]
    fn test_year_level() {
        assert_eq!(year_level("CSC111H1"), Some(1));
        assert_eq!(year_level("CSC240H1"), Some(2));
        assert_eq!(year_level("MAT457Y1"), Some(4));
        assert_eq!(year_level("CSC"), None);
        assert_eq!(year_level("CSCX11H1"), None);
    }
}

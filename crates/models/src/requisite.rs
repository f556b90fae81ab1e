use serde::Serialize;
use std::{
    collections::{BTreeSet, HashMap},
    fmt::{Display, Formatter, Result as FmtResult},
    str::FromStr,
};

/// Grade assumed when a clause carries no explicit qualifier
pub const DEFAULT_MIN_GRADE: u8 = 50;

/// Inputs shorter than this cannot hold a course reference and parse to
/// the empty requirement
const MIN_MEANINGFUL_LEN: usize = 5;

/// Token separating a grade qualifier from the course it applies to
const GRADE_SEPARATOR: &str = " or higher in ";

/// Represents a node in a prerequisite expression tree
#[derive(Debug, Clone, PartialEq, Serialize)]
pub enum Requisite {
    /// Complete one course at or above a minimum grade
    Course { code: String, min_grade: u8 },
    /// Every child must be satisfied; `All` of nothing is the empty
    /// requirement and is always satisfied
    All(Vec<Requisite>),
    /// At least one child must be satisfied
    Any(Vec<Requisite>),
}

impl Requisite {
    /// The canonical "no prerequisite" value
    pub fn none() -> Self {
        Requisite::All(Vec::new())
    }

    /// Whether this is the empty requirement
    pub fn is_empty(&self) -> bool {
        matches!(self, Requisite::All(children) if children.is_empty())
    }

    /// Collect every distinct course code referenced by a leaf of this tree
    pub fn leaf_codes(&self) -> BTreeSet<String> {
        let mut codes = BTreeSet::new();
        self.collect_leaf_codes(&mut codes);
        codes
    }

    fn collect_leaf_codes(&self, codes: &mut BTreeSet<String>) {
        match self {
            Requisite::Course { code, .. } => {
                codes.insert(code.clone());
            }
            Requisite::All(children) | Requisite::Any(children) => {
                for child in children {
                    child.collect_leaf_codes(codes);
                }
            }
        }
    }

    /// Evaluate if this requirement is satisfied by the given completed
    /// courses, mapped from course code to the grade achieved
    pub fn evaluate(&self, completed: &HashMap<String, u8>) -> bool {
        match self {
            Requisite::Course { code, min_grade } => {
                completed.get(code).is_some_and(|grade| grade >= min_grade)
            }
            Requisite::All(children) => children.iter().all(|child| child.evaluate(completed)),
            Requisite::Any(children) => children.iter().any(|child| child.evaluate(completed)),
        }
    }

    /// Simplifies this requirement based on completed courses
    /// - Returns None if the requirement is already satisfied
    /// - Returns a reduced [`Requisite`] holding only the remaining
    ///   requirements otherwise
    pub fn simplify(&self, completed: &HashMap<String, u8>) -> Option<Requisite> {
        match self {
            Requisite::Course { code, min_grade } => {
                if completed.get(code).is_some_and(|grade| grade >= min_grade) {
                    None
                } else {
                    Some(self.clone())
                }
            }

            Requisite::All(children) => {
                let mut remaining: Vec<Requisite> = children
                    .iter()
                    .filter_map(|child| child.simplify(completed))
                    .collect();

                match remaining.len() {
                    0 => None,
                    1 => remaining.pop(),
                    _ => Some(Requisite::All(remaining)),
                }
            }

            Requisite::Any(children) => {
                let mut remaining = Vec::with_capacity(children.len());
                for child in children {
                    match child.simplify(completed) {
                        // One satisfied branch satisfies the disjunction
                        None => return None,
                        Some(rest) => remaining.push(rest),
                    }
                }

                if remaining.len() == 1 {
                    remaining.pop()
                } else {
                    Some(Requisite::Any(remaining))
                }
            }
        }
    }
}

/// Custom error type for parsing prerequisite text
#[derive(Debug, Clone, PartialEq, Serialize)]
pub enum ParseRequisiteError {
    /// A clause was empty once parentheses and whitespace were stripped
    EmptyClause { fragment: String },
    /// A grade qualifier could not be read as `NN% or higher in <CODE>`
    InvalidGrade { fragment: String },
    /// A slash-separated option list was not a grade qualifier followed by
    /// bare course codes
    InvalidOptionList { fragment: String },
}

impl Display for ParseRequisiteError {
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        match self {
            Self::EmptyClause { fragment } => write!(f, "empty clause in \"{fragment}\""),
            Self::InvalidGrade { fragment } => {
                write!(f, "invalid grade qualifier in \"{fragment}\"")
            }
            Self::InvalidOptionList { fragment } => {
                write!(f, "invalid option list in \"{fragment}\"")
            }
        }
    }
}

impl FromStr for Requisite {
    type Err = ParseRequisiteError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let input = s.trim();

        // Too short to name a course; placeholders like "none" land here
        if input.len() < MIN_MEANINGFUL_LEN {
            return Ok(Requisite::none());
        }

        // Slash-space separates top level alternatives, any one of which
        // satisfies the requirement
        let mut alternatives = input
            .split("/ ")
            .map(parse_alternative)
            .collect::<Result<Vec<_>, _>>()?;

        if alternatives.len() == 1 {
            return Ok(alternatives.remove(0));
        }
        Ok(Requisite::Any(alternatives))
    }
}

/// Parse one alternative: comma-separated clauses that must all hold
fn parse_alternative(alternative: &str) -> Result<Requisite, ParseRequisiteError> {
    let mut clauses = alternative
        .split(',')
        .map(parse_clause)
        .collect::<Result<Vec<_>, _>>()?;

    if clauses.len() == 1 {
        return Ok(clauses.remove(0));
    }
    Ok(Requisite::All(clauses))
}

/// Parse one clause: a single course reference, optionally graded, or a
/// slash-separated option list sharing one grade qualifier
fn parse_clause(clause: &str) -> Result<Requisite, ParseRequisiteError> {
    // Parentheses mark visual grouping only and carry no structure beyond
    // the comma and slash splits already applied
    let text = clause.replace(['(', ')'], "");
    let text = text.trim();

    if text.is_empty() {
        return Err(ParseRequisiteError::EmptyClause {
            fragment: clause.trim().to_string(),
        });
    }

    if text.contains('/') {
        return parse_option_list(text, clause);
    }

    if text.contains('%') || text.contains(GRADE_SEPARATOR) {
        let (code, min_grade) = parse_graded(text, clause)?;
        return Ok(Requisite::Course {
            code: code.to_string(),
            min_grade,
        });
    }

    Ok(Requisite::Course {
        code: text.to_string(),
        min_grade: DEFAULT_MIN_GRADE,
    })
}

/// Split a `NN% or higher in <CODE>` qualifier into its course and grade
fn parse_graded<'a>(
    text: &'a str,
    fragment: &str,
) -> Result<(&'a str, u8), ParseRequisiteError> {
    let grade_err = || ParseRequisiteError::InvalidGrade {
        fragment: fragment.trim().to_string(),
    };

    let (grade_text, code) = text.split_once(GRADE_SEPARATOR).ok_or_else(grade_err)?;
    let min_grade = grade_text
        .trim()
        .strip_suffix('%')
        .and_then(|digits| digits.parse().ok())
        .ok_or_else(grade_err)?;

    let code = code.trim();
    if code.is_empty() {
        return Err(grade_err());
    }
    Ok((code, min_grade))
}

/// Parse a clause like `60% or higher in CSC165H1/CSC240H1`: the leading
/// qualifier's grade covers every option in the list
fn parse_option_list(text: &str, fragment: &str) -> Result<Requisite, ParseRequisiteError> {
    let list_err = || ParseRequisiteError::InvalidOptionList {
        fragment: fragment.trim().to_string(),
    };

    let (first, rest) = text.split_once('/').ok_or_else(list_err)?;
    if !first.contains(GRADE_SEPARATOR) {
        return Err(list_err());
    }
    let (code, min_grade) = parse_graded(first, fragment)?;

    let mut options = vec![Requisite::Course {
        code: code.to_string(),
        min_grade,
    }];
    for option in rest.split('/') {
        let option = option.trim();
        // Later options must be bare codes; the qualifier belongs to the
        // list head alone
        if option.is_empty() || option.contains('%') || option.contains(GRADE_SEPARATOR) {
            return Err(list_err());
        }
        options.push(Requisite::Course {
            code: option.to_string(),
            min_grade,
        });
    }
    Ok(Requisite::Any(options))
}

/// Parse a prerequisite description and return a structured requisite tree
pub fn parse_requisite(text: &str) -> Result<Requisite, ParseRequisiteError> {
    text.parse()
}

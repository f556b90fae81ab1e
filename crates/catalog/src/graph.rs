use models::course::Duration;
use models::requisite::Requisite;
use std::collections::{BTreeSet, HashMap};

/// One course in the catalog graph
#[derive(Debug, Clone)]
pub struct Course {
    code: String,
    duration: Duration,
    keywords: String,
    requisite: Requisite,
    /// Courses that list this one inside their requirement expression
    unlocks: BTreeSet<String>,
}

impl Course {
    fn new(code: &str) -> Self {
        Self {
            code: code.to_string(),
            duration: Duration::from_code(code),
            keywords: String::new(),
            requisite: Requisite::none(),
            unlocks: BTreeSet::new(),
        }
    }

    pub fn code(&self) -> &str {
        &self.code
    }

    pub fn duration(&self) -> Duration {
        self.duration
    }

    /// Credit weight of taking this course on its own
    pub fn credit_weight(&self) -> f64 {
        self.duration.credit_weight()
    }

    pub fn keywords(&self) -> &str {
        &self.keywords
    }

    pub fn requisite(&self) -> &Requisite {
        &self.requisite
    }

    /// Courses this one unlocks, i.e. the reverse prerequisite edges
    pub fn unlocks(&self) -> &BTreeSet<String> {
        &self.unlocks
    }
}

/// A graph representation of the course system, mapping each catalog code
/// to its course and maintaining the reverse unlock edges alongside the
/// stored requirement expressions
#[derive(Debug, Default)]
pub struct CourseGraph {
    courses: HashMap<String, Course>,
}

impl CourseGraph {
    pub fn new() -> Self {
        Self {
            courses: HashMap::new(),
        }
    }

    /// Register a course if absent; update its keywords when given
    pub fn ensure_course(&mut self, code: &str, keywords: Option<&str>) -> &Course {
        let course = self
            .courses
            .entry(code.to_string())
            .or_insert_with(|| Course::new(code));
        if let Some(keywords) = keywords {
            course.keywords = keywords.to_string();
        }
        course
    }

    /// Store a course's requirement expression, replacing any previous one.
    ///
    /// Every course referenced by a leaf is registered, and the unlock
    /// index is kept in step: leaves of the previous expression that no
    /// longer occur lose their edge, so the index always mirrors the
    /// stored expressions. Attaching the same expression twice changes
    /// nothing.
    pub fn attach_requirement(&mut self, code: &str, requisite: Requisite) {
        let new_leaves = requisite.leaf_codes();

        let course = self
            .courses
            .entry(code.to_string())
            .or_insert_with(|| Course::new(code));
        let old_leaves = course.requisite.leaf_codes();
        course.requisite = requisite;

        for stale in old_leaves.difference(&new_leaves) {
            if let Some(former) = self.courses.get_mut(stale) {
                former.unlocks.remove(code);
            }
        }

        for referenced in &new_leaves {
            let leaf = self
                .courses
                .entry(referenced.clone())
                .or_insert_with(|| Course::new(referenced));
            leaf.unlocks.insert(code.to_string());
        }
    }

    pub fn lookup(&self, code: &str) -> Option<&Course> {
        self.courses.get(code)
    }

    pub fn len(&self) -> usize {
        self.courses.len()
    }

    pub fn is_empty(&self) -> bool {
        self.courses.is_empty()
    }

    /// Every course code in the graph, in iteration order
    pub fn course_codes(&self) -> impl Iterator<Item = &str> {
        self.courses.keys().map(String::as_str)
    }

    /// Unlock edges `(prerequisite, unlocked)` with both endpoints inside
    /// `nodes`, for rendering partial subgraph views
    pub fn unlock_edges_within<'a>(&'a self, nodes: &BTreeSet<String>) -> Vec<(&'a str, &'a str)> {
        let mut edges = Vec::new();
        for code in nodes {
            if let Some(course) = self.courses.get(code) {
                for unlocked in course.unlocks.iter().filter(|target| nodes.contains(*target)) {
                    edges.push((course.code(), unlocked.as_str()));
                }
            }
        }
        edges
    }

    /// All courses whose keyword text contains `term`, case-insensitively.
    /// Order follows graph iteration and is not part of the contract.
    pub fn find_by_keyword(&self, term: &str) -> Vec<String> {
        let needle = term.to_lowercase();
        self.courses
            .values()
            .filter(|course| course.keywords.to_lowercase().contains(&needle))
            .map(|course| course.code.clone())
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn leaf(code: &str) -> Requisite {
        Requisite::Course {
            code: code.to_string(),
            min_grade: 50,
        }
    }

    #[test]
    fn test_ensure_course_is_idempotent() {
        let mut graph = CourseGraph::new();
        graph.ensure_course("CSC111H1", Some("foundations of computer science"));
        graph.ensure_course("CSC111H1", None);

        assert_eq!(graph.len(), 1);
        let course = graph.lookup("CSC111H1").unwrap();
        assert_eq!(course.keywords(), "foundations of computer science");
        assert!(course.requisite().is_empty());
    }

    #[test]
    fn test_ensure_course_updates_keywords() {
        let mut graph = CourseGraph::new();
        graph.ensure_course("CSC111H1", Some("old description"));
        graph.ensure_course("CSC111H1", Some("new description"));

        assert_eq!(graph.lookup("CSC111H1").unwrap().keywords(), "new description");
    }

    #[test]
    fn test_duration_comes_from_the_code() {
        let mut graph = CourseGraph::new();
        graph.ensure_course("MAT137Y1", None);
        graph.ensure_course("CSC111H1", None);

        assert_eq!(graph.lookup("MAT137Y1").unwrap().credit_weight(), 1.0);
        assert_eq!(graph.lookup("CSC111H1").unwrap().credit_weight(), 0.5);
    }

    #[test]
    fn test_attach_registers_leaves_and_edges() {
        let mut graph = CourseGraph::new();
        graph.attach_requirement(
            "CSC207H1",
            Requisite::Any(vec![leaf("CSC148H1"), leaf("CSC111H1")]),
        );

        assert_eq!(graph.len(), 3);
        for prerequisite in ["CSC148H1", "CSC111H1"] {
            let course = graph.lookup(prerequisite).unwrap();
            assert!(course.unlocks().contains("CSC207H1"));
        }
    }

    #[test]
    fn test_attach_twice_does_not_accumulate() {
        let mut graph = CourseGraph::new();
        let requisite = Requisite::All(vec![leaf("CSC148H1"), leaf("CSC165H1")]);

        graph.attach_requirement("CSC207H1", requisite.clone());
        let before: Vec<BTreeSet<String>> = ["CSC148H1", "CSC165H1"]
            .iter()
            .map(|code| graph.lookup(code).unwrap().unlocks().clone())
            .collect();

        graph.attach_requirement("CSC207H1", requisite);
        let after: Vec<BTreeSet<String>> = ["CSC148H1", "CSC165H1"]
            .iter()
            .map(|code| graph.lookup(code).unwrap().unlocks().clone())
            .collect();

        assert_eq!(before, after);
    }

    #[test]
    fn test_attach_replacement_drops_stale_edges() {
        let mut graph = CourseGraph::new();
        graph.attach_requirement("CSC207H1", leaf("CSC148H1"));
        assert!(graph.lookup("CSC148H1").unwrap().unlocks().contains("CSC207H1"));

        graph.attach_requirement("CSC207H1", leaf("CSC111H1"));

        // The old prerequisite no longer unlocks the course; the new one does
        assert!(!graph.lookup("CSC148H1").unwrap().unlocks().contains("CSC207H1"));
        assert!(graph.lookup("CSC111H1").unwrap().unlocks().contains("CSC207H1"));
    }

    #[test]
    fn test_find_by_keyword_is_case_normalized() {
        let mut graph = CourseGraph::new();
        graph.ensure_course("CSC111H1", Some("Foundations of Computer Science"));
        graph.ensure_course("MAT137Y1", Some("calculus with proofs"));
        graph.ensure_course("STA257H1", Some("Probability and Statistics"));

        let mut matches = graph.find_by_keyword("computer");
        matches.sort();
        assert_eq!(matches, vec!["CSC111H1".to_string()]);

        // All matches present, no duplicates; order is not asserted
        let matches = graph.find_by_keyword("S");
        assert_eq!(matches.len(), 3);
    }

    #[test]
    fn test_course_codes_lists_every_course() {
        let mut graph = CourseGraph::new();
        graph.ensure_course("CSC110Y1", Some("foundations"));
        graph.attach_requirement("CSC111H1", leaf("CSC110Y1"));
        graph.attach_requirement(
            "CSC207H1",
            Requisite::Any(vec![leaf("CSC111H1"), leaf("CSC148H1")]),
        );

        // Directly registered courses and referenced-only leaves both appear
        let codes: BTreeSet<&str> = graph.course_codes().collect();
        let expected: BTreeSet<&str> = ["CSC110Y1", "CSC111H1", "CSC148H1", "CSC207H1"]
            .into_iter()
            .collect();
        assert_eq!(codes, expected);
    }

    #[test]
    fn test_unlock_edges_within_subset() {
        let mut graph = CourseGraph::new();
        graph.attach_requirement("CSC207H1", leaf("CSC148H1"));
        graph.attach_requirement("CSC209H1", leaf("CSC207H1"));
        graph.attach_requirement("CSC343H1", leaf("CSC207H1"));

        let nodes: BTreeSet<String> = ["CSC148H1", "CSC207H1", "CSC209H1"]
            .iter()
            .map(|code| code.to_string())
            .collect();
        let edges = graph.unlock_edges_within(&nodes);

        // The edge into CSC343H1 is outside the subset
        assert_eq!(
            edges,
            vec![("CSC148H1", "CSC207H1"), ("CSC207H1", "CSC209H1")]
        );
    }
}

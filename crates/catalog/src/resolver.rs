use crate::graph::CourseGraph;
use models::requisite::Requisite;
use std::{
    collections::{BTreeSet, HashMap, HashSet},
    fmt::{Display, Formatter, Result as FmtResult},
};

/// Custom error type for graph queries
#[derive(Debug, Clone, PartialEq)]
pub enum CatalogError {
    /// The queried code was never registered or referenced
    UnknownCourse { code: String },
    /// A course's prerequisite chain leads back to itself
    CyclicPrerequisite { code: String },
}

impl Display for CatalogError {
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        match self {
            Self::UnknownCourse { code } => write!(f, "unknown course {code}"),
            Self::CyclicPrerequisite { code } => {
                write!(f, "cyclic prerequisite through {code}")
            }
        }
    }
}

/// Scratch state for one cost query.
///
/// `resolved` memoizes finished courses so shared sub-prerequisites are
/// evaluated once; `in_progress` holds the chain currently being expanded,
/// and re-entering it means the data has a prerequisite cycle.
struct CostEvaluation<'a> {
    graph: &'a CourseGraph,
    resolved: HashMap<String, (f64, BTreeSet<String>)>,
    in_progress: HashSet<String>,
}

impl<'a> CostEvaluation<'a> {
    fn new(graph: &'a CourseGraph) -> Self {
        Self {
            graph,
            resolved: HashMap::new(),
            in_progress: HashSet::new(),
        }
    }

    /// Total cost of taking a course: its own credit weight plus the
    /// cheapest way to satisfy its requirement expression
    fn course_cost(&mut self, code: &str) -> Result<(f64, BTreeSet<String>), CatalogError> {
        if let Some(resolved) = self.resolved.get(code) {
            return Ok(resolved.clone());
        }

        let course = self
            .graph
            .lookup(code)
            .ok_or_else(|| CatalogError::UnknownCourse {
                code: code.to_string(),
            })?;

        if !self.in_progress.insert(code.to_string()) {
            return Err(CatalogError::CyclicPrerequisite {
                code: code.to_string(),
            });
        }

        let (chain_cost, required) = self.requisite_cost(course.requisite())?;
        let resolved = (course.credit_weight() + chain_cost, required);

        self.in_progress.remove(code);
        self.resolved.insert(code.to_string(), resolved.clone());
        Ok(resolved)
    }

    /// Cheapest cost of satisfying one requirement expression, with the
    /// course set attaining it
    fn requisite_cost(&mut self, requisite: &Requisite) -> Result<(f64, BTreeSet<String>), CatalogError> {
        match requisite {
            Requisite::Course { code, .. } => {
                let (cost, mut required) = self.course_cost(code)?;
                required.insert(code.clone());
                Ok((cost, required))
            }

            Requisite::All(children) => {
                let mut cost = 0.0;
                let mut required = BTreeSet::new();
                for child in children {
                    let (child_cost, child_required) = self.requisite_cost(child)?;
                    cost += child_cost;
                    required.extend(child_required);
                }
                Ok((cost, required))
            }

            Requisite::Any(children) => {
                // Strict comparison keeps the first-declared child on ties
                let mut best: Option<(f64, BTreeSet<String>)> = None;
                for child in children {
                    let candidate = self.requisite_cost(child)?;
                    let improves = match &best {
                        Some((best_cost, _)) => candidate.0 < *best_cost,
                        None => true,
                    };
                    if improves {
                        best = Some(candidate);
                    }
                }
                Ok(best.unwrap_or((0.0, BTreeSet::new())))
            }
        }
    }
}

impl CourseGraph {
    /// Minimum total cost of taking `code`, counting the course itself and
    /// the cheapest way through its prerequisite chain, together with the
    /// set of courses attaining that minimum.
    ///
    /// The query borrows the graph immutably and keeps its own scratch, so
    /// a constructed graph can serve any number of concurrent callers.
    pub fn min_cost(&self, code: &str) -> Result<(f64, BTreeSet<String>), CatalogError> {
        CostEvaluation::new(self).course_cost(code)
    }

    /// Every course reachable through `code`'s requirement expressions,
    /// including alternatives the cost minimizer would not pick
    pub fn all_prerequisites(&self, code: &str) -> Result<BTreeSet<String>, CatalogError> {
        let mut closure = BTreeSet::new();
        let mut in_progress = HashSet::new();
        let mut done = HashSet::new();
        self.collect_prerequisites(code, &mut in_progress, &mut done, &mut closure)?;
        Ok(closure)
    }

    fn collect_prerequisites(
        &self,
        code: &str,
        in_progress: &mut HashSet<String>,
        done: &mut HashSet<String>,
        closure: &mut BTreeSet<String>,
    ) -> Result<(), CatalogError> {
        if done.contains(code) {
            return Ok(());
        }

        let course = self.lookup(code).ok_or_else(|| CatalogError::UnknownCourse {
            code: code.to_string(),
        })?;

        if !in_progress.insert(code.to_string()) {
            return Err(CatalogError::CyclicPrerequisite {
                code: code.to_string(),
            });
        }

        for leaf in course.requisite().leaf_codes() {
            closure.insert(leaf.clone());
            self.collect_prerequisites(&leaf, in_progress, done, closure)?;
        }

        in_progress.remove(code);
        done.insert(code.to_string());
        Ok(())
    }

    /// What the given completed courses unlock, as one set
    pub fn unlocked_by(&self, completed: &[String]) -> Result<BTreeSet<String>, CatalogError> {
        let mut unlocked = BTreeSet::new();
        for code in completed {
            let course = self.lookup(code).ok_or_else(|| CatalogError::UnknownCourse {
                code: code.clone(),
            })?;
            unlocked.extend(course.unlocks().iter().cloned());
        }
        Ok(unlocked)
    }
}

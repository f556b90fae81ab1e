use crate::graph::CourseGraph;
use models::requisite::{self, ParseRequisiteError};
use serde::{Deserialize, Serialize};
use std::fmt::{Display, Formatter, Result as FmtResult};

/// One catalog row as delivered by the scraping and CSV layers
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CatalogRow {
    pub code: String,
    pub keywords: String,
    pub prerequisites: String,
}

/// A row that failed to ingest, with its position in the batch
#[derive(Debug, Clone, PartialEq)]
pub struct RowFailure {
    /// 1-based position of the row in the batch
    pub row: usize,
    pub code: String,
    pub error: ParseRequisiteError,
}

impl Display for RowFailure {
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        write!(f, "row {} ({}): {}", self.row, self.code, self.error)
    }
}

impl CourseGraph {
    /// Ingest one catalog row: parse the prerequisite text and wire the
    /// course into the graph. A parse failure leaves the graph untouched
    /// for this row.
    pub fn register(
        &mut self,
        code: &str,
        keywords: &str,
        prerequisite_text: &str,
    ) -> Result<(), ParseRequisiteError> {
        let requisite = requisite::parse_requisite(prerequisite_text)?;
        self.ensure_course(code, Some(keywords));
        self.attach_requirement(code, requisite);
        Ok(())
    }

    /// Ingest a batch of rows into the shared graph. Rows from any number
    /// of subject files compose into one graph; failures are isolated per
    /// row and returned while every well-formed row still lands.
    pub fn ingest_rows(&mut self, rows: &[CatalogRow]) -> Vec<RowFailure> {
        let mut failures = Vec::new();
        for (index, row) in rows.iter().enumerate() {
            if let Err(error) = self.register(&row.code, &row.keywords, &row.prerequisites) {
                failures.push(RowFailure {
                    row: index + 1,
                    code: row.code.clone(),
                    error,
                });
            }
        }
        failures
    }
}

pub mod graph;
pub mod ingest;
pub mod resolver;

pub use graph::{Course, CourseGraph};
pub use ingest::{CatalogRow, RowFailure};
pub use resolver::CatalogError;

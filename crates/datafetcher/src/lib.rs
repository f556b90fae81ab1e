pub mod calendar;
pub mod catalog_csv;
pub mod subjects;
pub mod util;

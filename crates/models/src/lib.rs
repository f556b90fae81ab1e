pub mod course;
pub mod requisite;

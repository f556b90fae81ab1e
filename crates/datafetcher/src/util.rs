use csv::Writer;
use lazy_static::lazy_static;
use regex::Regex;
use std::{
    fs::{self, File},
    path::Path,
};

/// Output directory for data files
pub const DEFAULT_OUTPUT_DIR: &str = "./data/output";

lazy_static! {
    static ref NEWLINES_AND_SPACES: Regex = Regex::new(r"[\r\n]+\s*").unwrap();
    static ref WHITESPACE: Regex = Regex::new(r"\s+").unwrap();
}

/// Collapses newlines and runs of whitespace into single spaces
///
/// # Arguments
/// * `text` - The raw text to clean
///
/// # Returns
/// The cleaned text, trimmed at both ends
pub fn collapse_whitespace(text: &str) -> String {
    let cleaned = NEWLINES_AND_SPACES.replace_all(text, " ");
    WHITESPACE.replace_all(&cleaned, " ").trim().to_string()
}

/// Ensures a directory exists, creating it if necessary
///
/// # Arguments
/// * `dir_path` - Path to the directory
///
/// # Returns
/// Result indicating success or detailed error
pub fn ensure_dir(dir_path: &str) -> Result<(), String> {
    let path = Path::new(dir_path);
    if !path.exists() {
        fs::create_dir_all(path)
            .map_err(|e| format!("Failed to create directory '{dir_path}': {e}"))?;
    }

    Ok(())
}

/// Creates a CSV writer for the specified file
///
/// # Arguments
/// * `path` - Path of the CSV file to create
/// * `headers` - Column headers for the CSV
///
/// # Returns
/// Result containing the CSV writer or error message
pub fn create_csv_writer(path: &Path, headers: &[&str]) -> Result<Writer<File>, String> {
    if let Some(parent) = path.parent()
        && !parent.as_os_str().is_empty()
    {
        ensure_dir(&parent.to_string_lossy())?;
    }

    let file = File::create(path)
        .map_err(|e| format!("Failed to create CSV file '{}': {e}", path.display()))?;

    let mut writer = Writer::from_writer(file);
    writer
        .write_record(headers)
        .map_err(|e| format!("Failed to write CSV headers: {e}"))?;

    Ok(writer)
}

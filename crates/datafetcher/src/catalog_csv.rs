use crate::util::create_csv_writer;
use catalog::CatalogRow;
use std::path::Path;

/// Column headers of the catalog CSV, in field order
pub const CSV_HEADERS: [&str; 3] = ["code", "keywords", "prerequisites"];

/// Writes catalog rows to a CSV file
///
/// # Arguments
/// * `path` - Path of the CSV file to create
/// * `rows` - The rows to write
///
/// # Returns
/// Result indicating success or detailed error
pub fn write_rows(path: &Path, rows: &[CatalogRow]) -> Result<(), String> {
    let mut writer = create_csv_writer(path, &CSV_HEADERS)?;

    for row in rows {
        writer
            .write_record([
                row.code.as_str(),
                row.keywords.as_str(),
                row.prerequisites.as_str(),
            ])
            .map_err(|e| format!("Failed to write row for '{}': {e}", row.code))?;
    }

    writer
        .flush()
        .map_err(|e| format!("Failed to flush CSV file '{}': {e}", path.display()))?;

    Ok(())
}

/// Reads catalog rows back from a CSV file written by [`write_rows`]
///
/// # Arguments
/// * `path` - Path of the CSV file to read
///
/// # Returns
/// Result containing the rows or an error naming the malformed row
pub fn read_rows(path: &Path) -> Result<Vec<CatalogRow>, String> {
    let mut reader = csv::Reader::from_path(path)
        .map_err(|e| format!("Failed to open CSV file '{}': {e}", path.display()))?;

    let mut rows = Vec::new();
    for (index, record) in reader.deserialize().enumerate() {
        let row: CatalogRow = record
            .map_err(|e| format!("Malformed row {} in '{}': {e}", index + 1, path.display()))?;
        rows.push(row);
    }

    Ok(rows)
}

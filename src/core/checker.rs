use crate::core::export::COLUMNS;
use crate::utils::error::{FinderError, Result};
use calamine::{open_workbook, Data, Reader, Xlsx};
use std::path::Path;

/// Columns that must exist and carry data for the file to pass.
pub const REQUIRED_COLUMNS: [&str; 2] = ["Name", "Address"];

/// Outcome of inspecting one spreadsheet. A failed check is report data,
/// not an error; only an unreadable file errors out.
#[derive(Debug, Clone, Default)]
pub struct CheckReport {
    pub rows: usize,
    pub missing_columns: Vec<String>,
    pub extra_columns: Vec<String>,
    pub empty_columns: Vec<String>,
}

impl CheckReport {
    pub fn passed(&self) -> bool {
        self.missing_columns.is_empty() && self.empty_columns.is_empty()
    }

    /// Human-readable discrepancies, one line each.
    pub fn problems(&self) -> Vec<String> {
        let mut lines = Vec::new();
        for column in &self.missing_columns {
            lines.push(format!("missing column: {}", column));
        }
        for column in &self.empty_columns {
            lines.push(format!("column '{}' is empty in every row", column));
        }
        lines
    }
}

fn cell_is_empty(cell: &Data) -> bool {
    match cell {
        Data::Empty => true,
        Data::String(s) => s.trim().is_empty(),
        _ => false,
    }
}

/// Open a produced spreadsheet and verify its shape: the fixed column set
/// must be present, and no required column may be empty across all data
/// rows. Never mutates the file.
pub fn check_workbook<P: AsRef<Path>>(path: P) -> Result<CheckReport> {
    let mut workbook: Xlsx<_> = open_workbook(path)?;

    let sheet_name = workbook
        .sheet_names()
        .first()
        .cloned()
        .ok_or_else(|| FinderError::FileFormat("workbook contains no sheets".to_string()))?;
    let range = workbook.worksheet_range(&sheet_name)?;

    let mut rows = range.rows();
    let header: Vec<String> = rows
        .next()
        .map(|cells| {
            cells
                .iter()
                .map(|c| c.to_string().trim().to_string())
                .filter(|name| !name.is_empty())
                .collect()
        })
        .unwrap_or_default();

    let missing_columns: Vec<String> = COLUMNS
        .iter()
        .filter(|expected| !header.iter().any(|h| h == *expected))
        .map(|c| c.to_string())
        .collect();
    let extra_columns: Vec<String> = header
        .iter()
        .filter(|h| !COLUMNS.contains(&h.as_str()))
        .cloned()
        .collect();

    let data_rows: Vec<&[Data]> = rows.collect();

    // A header-only file is valid: an empty search still exports. Only a
    // non-empty row set can have an all-empty required column.
    let mut empty_columns = Vec::new();
    if !data_rows.is_empty() {
        for required in REQUIRED_COLUMNS {
            let Some(index) = header.iter().position(|h| h == required) else {
                continue; // already reported as missing
            };
            let all_empty = data_rows
                .iter()
                .all(|row| row.get(index).map(cell_is_empty).unwrap_or(true));
            if all_empty {
                empty_columns.push(required.to_string());
            }
        }
    }

    Ok(CheckReport {
        rows: data_rows.len(),
        missing_columns,
        extra_columns,
        empty_columns,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::export::{to_xlsx_bytes, SHEET_NAME};
    use crate::domain::model::ListingRecord;
    use rust_xlsxwriter::Workbook;
    use tempfile::TempDir;

    fn sample_record() -> ListingRecord {
        ListingRecord {
            name: "Dr. Mehta Clinic".to_string(),
            address: "12 DP Road, Aundh, Pune".to_string(),
            phone: "+91 20 1234 5678".to_string(),
            website: "https://mehta.example".to_string(),
            rating: Some(4.6),
            review_count: Some(210),
            specialty: "Cardiologist".to_string(),
        }
    }

    fn write_temp(dir: &TempDir, name: &str, bytes: &[u8]) -> String {
        let path = dir.path().join(name);
        std::fs::write(&path, bytes).unwrap();
        path.to_str().unwrap().to_string()
    }

    #[test]
    fn test_checker_accepts_exported_file() {
        let dir = TempDir::new().unwrap();
        let bytes = to_xlsx_bytes(&[sample_record(), sample_record()]).unwrap();
        let path = write_temp(&dir, "ok.xlsx", &bytes);

        let report = check_workbook(&path).unwrap();
        assert!(report.passed());
        assert_eq!(report.rows, 2);
        assert!(report.problems().is_empty());
    }

    #[test]
    fn test_checker_accepts_header_only_file() {
        let dir = TempDir::new().unwrap();
        let bytes = to_xlsx_bytes(&[]).unwrap();
        let path = write_temp(&dir, "empty.xlsx", &bytes);

        let report = check_workbook(&path).unwrap();
        assert!(report.passed());
        assert_eq!(report.rows, 0);
    }

    #[test]
    fn test_checker_rejects_missing_required_column() {
        // Build a workbook whose header drops "Address".
        let mut workbook = Workbook::new();
        let worksheet = workbook.add_worksheet();
        worksheet.set_name(SHEET_NAME).unwrap();
        let truncated = ["Name", "Phone", "Website", "Rating", "Review Count", "Specialty"];
        for (col, name) in truncated.iter().enumerate() {
            worksheet.write_string(0, col as u16, *name).unwrap();
        }
        worksheet.write_string(1, 0, "Dr. Mehta Clinic").unwrap();
        let bytes = workbook.save_to_buffer().unwrap();

        let dir = TempDir::new().unwrap();
        let path = write_temp(&dir, "no_address.xlsx", &bytes);

        let report = check_workbook(&path).unwrap();
        assert!(!report.passed());
        assert_eq!(report.missing_columns, vec!["Address".to_string()]);
        assert!(report
            .problems()
            .iter()
            .any(|p| p.contains("missing column: Address")));
    }

    #[test]
    fn test_checker_rejects_required_column_empty_in_every_row() {
        let mut record = sample_record();
        record.address = String::new();
        let bytes = to_xlsx_bytes(&[record.clone(), record]).unwrap();

        let dir = TempDir::new().unwrap();
        let path = write_temp(&dir, "blank_address.xlsx", &bytes);

        let report = check_workbook(&path).unwrap();
        assert!(!report.passed());
        assert_eq!(report.empty_columns, vec!["Address".to_string()]);
    }

    #[test]
    fn test_checker_reports_extra_columns_without_failing() {
        let mut workbook = Workbook::new();
        let worksheet = workbook.add_worksheet();
        worksheet.set_name(SHEET_NAME).unwrap();
        for (col, name) in COLUMNS.iter().enumerate() {
            worksheet.write_string(0, col as u16, *name).unwrap();
        }
        worksheet
            .write_string(0, COLUMNS.len() as u16, "Place ID")
            .unwrap();
        let bytes = workbook.save_to_buffer().unwrap();

        let dir = TempDir::new().unwrap();
        let path = write_temp(&dir, "extra.xlsx", &bytes);

        let report = check_workbook(&path).unwrap();
        assert!(report.passed());
        assert_eq!(report.extra_columns, vec!["Place ID".to_string()]);
    }

    #[test]
    fn test_checker_corrupt_file_is_file_format_error() {
        let dir = TempDir::new().unwrap();
        let path = write_temp(&dir, "corrupt.xlsx", b"this is not a zip archive");

        let err = check_workbook(&path).unwrap_err();
        assert!(matches!(err, FinderError::FileFormat(_)));
    }

    #[test]
    fn test_checker_missing_file_is_file_format_error() {
        let err = check_workbook("/nonexistent/nowhere.xlsx").unwrap_err();
        assert!(matches!(err, FinderError::FileFormat(_)));
    }
}

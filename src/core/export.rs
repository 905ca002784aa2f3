use crate::domain::model::ListingRecord;
use crate::utils::error::Result;
use rust_xlsxwriter::Workbook;

/// Header row of the exported sheet, in column order. The checker validates
/// produced files against the same set.
pub const COLUMNS: [&str; 7] = [
    "Name",
    "Address",
    "Phone",
    "Website",
    "Rating",
    "Review Count",
    "Specialty",
];

pub const SHEET_NAME: &str = "Listings";

/// Render the workbook in memory: one header row, one row per record in
/// input order. An empty record set still produces a valid workbook with
/// just the header. Persisting the bytes is the storage port's job.
pub fn to_xlsx_bytes(records: &[ListingRecord]) -> Result<Vec<u8>> {
    let mut workbook = Workbook::new();
    let worksheet = workbook.add_worksheet();
    worksheet.set_name(SHEET_NAME)?;

    for (col, name) in COLUMNS.iter().enumerate() {
        worksheet.write_string(0, col as u16, *name)?;
    }

    for (i, record) in records.iter().enumerate() {
        let row = (i + 1) as u32;
        worksheet.write_string(row, 0, &record.name)?;
        worksheet.write_string(row, 1, &record.address)?;
        worksheet.write_string(row, 2, &record.phone)?;
        worksheet.write_string(row, 3, &record.website)?;
        if let Some(rating) = record.rating {
            worksheet.write_number(row, 4, rating)?;
        }
        if let Some(count) = record.review_count {
            worksheet.write_number(row, 5, count as f64)?;
        }
        worksheet.write_string(row, 6, &record.specialty)?;
    }

    let buffer = workbook.save_to_buffer()?;
    Ok(buffer)
}

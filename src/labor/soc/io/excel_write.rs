use std::path::Path;

use rust_xlsxwriter::Workbook;

use crate::labor::soc::error::Result;
use crate::labor::soc::model::SocSummary;

/// Sheet name used for the categorized output.
pub const OUTPUT_SHEET: &str = "Sheet1";

/// Writes the aggregated table to `path` without an index column. Missing
/// medians are left as blank cells.
pub fn write_summary(path: &Path, summary: &SocSummary) -> Result<()> {
    let mut workbook_writer = Workbook::new();
    let worksheet = workbook_writer.add_worksheet();
    worksheet.set_name(OUTPUT_SHEET)?;

    for (col_idx, header) in SocSummary::header().iter().enumerate() {
        worksheet.write_string(0, col_idx as u16, *header)?;
    }

    for (row_idx, row) in summary.rows.iter().enumerate() {
        let excel_row = (row_idx + 1) as u32;
        worksheet.write_string(excel_row, 0, &row.key.soc_code)?;
        worksheet.write_string(excel_row, 1, &row.key.occupation)?;
        for (offset, value) in row.values.iter().enumerate() {
            if let Some(value) = value {
                worksheet.write_number(excel_row, (offset + 2) as u16, *value)?;
            }
        }
    }

    workbook_writer.save(path)?;
    Ok(())
}

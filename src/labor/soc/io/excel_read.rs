use std::path::Path;

use calamine::{CellErrorType, DataType, Range, Reader, Xlsx, open_workbook};
use tracing::debug;

use crate::labor::soc::catalog::{
    Category, OCCUPATION_CANDIDATES, OCCUPATION_COLUMN, SOC_CODE_CANDIDATES, SOC_CODE_COLUMN,
    VALUE_CANDIDATES, find_column,
};
use crate::labor::soc::error::{Result, SocError};
use crate::labor::soc::model::{CategoryTable, CellValue, OccupationKey};

/// Reads the first worksheet of a source workbook and projects it onto
/// `SOC_Code`, `Occupation` and the value column renamed to `category`.
pub fn read_category_file(path: &Path, category: Category) -> Result<CategoryTable> {
    let mut workbook: Xlsx<_> = open_workbook(path)?;
    let range = read_first_sheet(&mut workbook)?;
    let source = path
        .file_name()
        .map(|name| name.to_string_lossy().into_owned())
        .unwrap_or_default();
    table_from_range(&range, category, &source)
}

fn read_first_sheet<R: std::io::Read + std::io::Seek>(
    workbook: &mut Xlsx<R>,
) -> Result<Range<DataType>> {
    let name = workbook
        .sheet_names()
        .first()
        .cloned()
        .ok_or_else(|| SocError::InvalidWorkbook("workbook has no sheets".into()))?;
    let range_result = workbook
        .worksheet_range(&name)
        .ok_or_else(|| SocError::InvalidWorkbook(format!("missing sheet '{name}'")))?;
    let range = range_result.map_err(SocError::from)?;
    Ok(range)
}

/// Reconciles the header row of `range` and extracts one record per data row.
///
/// The value column is resolved first so a file without one is reported as
/// [`SocError::NoValueColumn`] even when its identity columns are also off.
pub fn table_from_range(
    range: &Range<DataType>,
    category: Category,
    source: &str,
) -> Result<CategoryTable> {
    let headers: Vec<String> = match range.rows().next() {
        Some(first_row) => first_row
            .iter()
            .map(|cell| cell_to_string(Some(cell)).trim().to_string())
            .collect(),
        None => {
            return Err(SocError::InvalidWorkbook(
                "worksheet has no header row".into(),
            ));
        }
    };

    let value_idx = find_column(&headers, &VALUE_CANDIDATES).ok_or(SocError::NoValueColumn)?;
    let code_idx = find_column(&headers, &SOC_CODE_CANDIDATES).ok_or_else(|| {
        SocError::MissingColumn {
            column: SOC_CODE_COLUMN.to_string(),
        }
    })?;
    let title_idx = find_column(&headers, &OCCUPATION_CANDIDATES).ok_or_else(|| {
        SocError::MissingColumn {
            column: OCCUPATION_COLUMN.to_string(),
        }
    })?;

    let mut records = Vec::new();
    let mut dropped = 0usize;
    for row in range.rows().skip(1) {
        let soc_code = normalize_optional(cell_to_string(row.get(code_idx)));
        let occupation = normalize_optional(cell_to_string(row.get(title_idx)));
        let (Some(soc_code), Some(occupation)) = (soc_code, occupation) else {
            dropped += 1;
            continue;
        };
        records.push((
            OccupationKey::new(soc_code, occupation),
            cell_to_value(row.get(value_idx)),
        ));
    }

    if dropped > 0 {
        debug!(source, dropped, "dropped rows with a blank occupation key");
    }

    Ok(CategoryTable::single(category, source, records))
}

fn cell_to_string(cell: Option<&DataType>) -> String {
    match cell {
        Some(DataType::String(value)) => value.clone(),
        Some(DataType::Float(value)) => value.to_string(),
        Some(DataType::Int(value)) => value.to_string(),
        Some(DataType::Bool(value)) => value.to_string(),
        Some(DataType::Empty) | None => String::new(),
        Some(other) => other.to_string(),
    }
}

fn cell_to_value(cell: Option<&DataType>) -> CellValue {
    match cell {
        Some(DataType::Float(value)) => CellValue::Number(*value),
        Some(DataType::Int(value)) => CellValue::Number(*value as f64),
        Some(DataType::Bool(value)) => CellValue::Number(if *value { 1.0 } else { 0.0 }),
        Some(DataType::String(value)) if value.trim().is_empty() => CellValue::Missing,
        Some(DataType::String(value)) => CellValue::Text(value.clone()),
        Some(DataType::Error(CellErrorType::NA)) | Some(DataType::Empty) | None => {
            CellValue::Missing
        }
        Some(other) => CellValue::Text(other.to_string()),
    }
}

fn normalize_optional(value: String) -> Option<String> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        None
    } else {
        Some(trimmed.to_string())
    }
}

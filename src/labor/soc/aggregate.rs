//! Collapses the merged table to one row per occupation.

use std::collections::BTreeMap;

use crate::labor::soc::catalog::Category;
use crate::labor::soc::error::{Result, SocError};
use crate::labor::soc::model::{CategoryTable, CellValue, OccupationKey, SocRow, SocSummary};

/// Statistical median: the middle value, or the mean of the two middle values
/// for an even count. `None` for an empty slice.
pub fn median(values: &[f64]) -> Option<f64> {
    if values.is_empty() {
        return None;
    }
    let mut sorted = values.to_vec();
    sorted.sort_by(f64::total_cmp);
    let mid = sorted.len() / 2;
    if sorted.len() % 2 == 0 {
        Some((sorted[mid - 1] + sorted[mid]) / 2.0)
    } else {
        Some(sorted[mid])
    }
}

/// Groups `table` by occupation and reduces each primary category to the
/// median of its non-missing cells across all rows and source columns of the
/// group.
///
/// Columns of non-primary categories are neither reduced nor validated. A text
/// cell in a primary column fails the whole run with
/// [`SocError::NonNumeric`].
pub fn collapse_to_soc(table: &CategoryTable) -> Result<SocSummary> {
    let column_sets: Vec<(Category, Vec<usize>)> = Category::PRIMARY
        .iter()
        .map(|category| (*category, table.columns_for(*category)))
        .collect();

    let mut groups: BTreeMap<&OccupationKey, Vec<usize>> = BTreeMap::new();
    for (idx, row) in table.rows.iter().enumerate() {
        groups.entry(&row.key).or_default().push(idx);
    }

    let mut rows = Vec::with_capacity(groups.len());
    for (key, members) in groups {
        let mut values = [None; 6];
        for (slot, (category, columns)) in column_sets.iter().enumerate() {
            let mut numbers = Vec::new();
            for &row_idx in &members {
                let cells = &table.rows[row_idx].cells;
                for &col_idx in columns {
                    match &cells[col_idx] {
                        CellValue::Number(value) => numbers.push(*value),
                        CellValue::Missing => {}
                        CellValue::Text(value) => {
                            return Err(SocError::NonNumeric {
                                soc_code: key.soc_code.clone(),
                                occupation: key.occupation.clone(),
                                category: category.label().to_string(),
                                value: value.clone(),
                            });
                        }
                    }
                }
            }
            values[slot] = median(&numbers);
        }
        rows.push(SocRow {
            key: key.clone(),
            values,
        });
    }

    Ok(SocSummary { rows })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::labor::soc::model::{TableRow, ValueColumn};

    fn key() -> OccupationKey {
        OccupationKey::new("15-1111", "Engineer")
    }

    fn table(columns: &[Category], rows: Vec<Vec<CellValue>>) -> CategoryTable {
        CategoryTable {
            columns: columns
                .iter()
                .enumerate()
                .map(|(idx, category)| ValueColumn {
                    category: *category,
                    source: format!("source_{idx}.xlsx"),
                })
                .collect(),
            rows: rows
                .into_iter()
                .map(|cells| TableRow { key: key(), cells })
                .collect(),
        }
    }

    #[test]
    fn median_handles_odd_even_and_empty() {
        assert_eq!(median(&[5.0, 1.0, 3.0]), Some(3.0));
        assert_eq!(median(&[4.0, 2.0]), Some(3.0));
        assert_eq!(median(&[7.5]), Some(7.5));
        assert_eq!(median(&[]), None);
    }

    #[test]
    fn duplicate_rows_collapse_to_their_median() {
        let merged = table(
            &[Category::Criticality],
            vec![vec![CellValue::Number(2.0)], vec![CellValue::Number(4.0)]],
        );

        let summary = collapse_to_soc(&merged).expect("collapsed");

        assert_eq!(summary.len(), 1);
        assert_eq!(summary.rows[0].value(Category::Criticality), Some(3.0));
    }

    #[test]
    fn all_missing_yields_missing_not_zero() {
        let merged = table(
            &[Category::Routine, Category::Skills],
            vec![
                vec![CellValue::Missing, CellValue::Number(2.0)],
                vec![CellValue::Missing, CellValue::Missing],
            ],
        );

        let summary = collapse_to_soc(&merged).expect("collapsed");

        assert_eq!(summary.rows[0].value(Category::Routine), None);
        assert_eq!(summary.rows[0].value(Category::Skills), Some(2.0));
        assert_eq!(summary.rows[0].value(Category::Communication), None);
    }

    #[test]
    fn sources_of_one_category_are_pooled() {
        let merged = table(
            &[Category::Communication, Category::Communication],
            vec![vec![CellValue::Number(1.0), CellValue::Number(5.0)]],
        );

        let summary = collapse_to_soc(&merged).expect("collapsed");

        assert_eq!(summary.rows[0].value(Category::Communication), Some(3.0));
    }

    #[test]
    fn auxiliary_column_is_excluded_and_not_validated() {
        let merged = table(
            &[Category::Aioe, Category::Physical],
            vec![vec![CellValue::Text("high".into()), CellValue::Number(2.0)]],
        );

        let summary = collapse_to_soc(&merged).expect("collapsed");

        assert_eq!(summary.rows[0].values, [None, None, Some(2.0), None, None, None]);
    }

    #[test]
    fn text_in_a_primary_column_fails() {
        let merged = table(
            &[Category::Responsibility],
            vec![vec![CellValue::Number(1.0)], vec![CellValue::Text("n/a".into())]],
        );

        let error = collapse_to_soc(&merged).unwrap_err();

        assert!(matches!(
            error,
            SocError::NonNumeric { ref category, ref value, .. }
                if category == "Responsibility" && value == "n/a"
        ));
    }

    #[test]
    fn groups_are_sorted_by_key() {
        let merged = CategoryTable {
            columns: vec![ValueColumn {
                category: Category::Skills,
                source: "zone.xlsx".into(),
            }],
            rows: vec![
                TableRow {
                    key: OccupationKey::new("47-2061", "Laborers"),
                    cells: vec![CellValue::Number(1.0)],
                },
                TableRow {
                    key: OccupationKey::new("11-1011", "Chief Executives"),
                    cells: vec![CellValue::Number(5.0)],
                },
            ],
        };

        let summary = collapse_to_soc(&merged).expect("collapsed");

        let codes: Vec<&str> = summary
            .rows
            .iter()
            .map(|row| row.key.soc_code.as_str())
            .collect();
        assert_eq!(codes, vec!["11-1011", "47-2061"]);
    }
}

//! Outer join of per-file tables on occupation identity.

use std::collections::{BTreeMap, HashSet};

use tracing::debug;

use crate::labor::soc::model::{CategoryTable, CellValue, OccupationKey, TableRow};

/// Full outer join of `left` and `right` on (`SOC_Code`, `Occupation`).
///
/// Every key of both sides is kept. A key present `m` times on the left and
/// `n` times on the right yields `m * n` rows. Cells without a partner are
/// [`CellValue::Missing`]. The result is stably sorted by key.
pub fn outer_join(left: CategoryTable, right: CategoryTable) -> CategoryTable {
    let left_width = left.columns.len();
    let right_width = right.columns.len();

    let mut right_index: BTreeMap<&OccupationKey, Vec<usize>> = BTreeMap::new();
    for (idx, row) in right.rows.iter().enumerate() {
        right_index.entry(&row.key).or_default().push(idx);
    }

    let mut rows = Vec::with_capacity(left.rows.len().max(right.rows.len()));
    let mut matched: HashSet<&OccupationKey> = HashSet::new();

    for left_row in &left.rows {
        match right_index.get(&left_row.key) {
            Some(partners) => {
                matched.insert(&left_row.key);
                for &partner in partners {
                    let mut cells = left_row.cells.clone();
                    cells.extend(right.rows[partner].cells.iter().cloned());
                    rows.push(TableRow {
                        key: left_row.key.clone(),
                        cells,
                    });
                }
            }
            None => {
                let mut cells = left_row.cells.clone();
                cells.extend(std::iter::repeat_n(CellValue::Missing, right_width));
                rows.push(TableRow {
                    key: left_row.key.clone(),
                    cells,
                });
            }
        }
    }

    for right_row in &right.rows {
        if matched.contains(&right_row.key) {
            continue;
        }
        let mut cells: Vec<CellValue> =
            std::iter::repeat_n(CellValue::Missing, left_width).collect();
        cells.extend(right_row.cells.iter().cloned());
        rows.push(TableRow {
            key: right_row.key.clone(),
            cells,
        });
    }

    rows.sort_by(|lhs, rhs| lhs.key.cmp(&rhs.key));

    let mut columns = left.columns;
    columns.extend(right.columns);
    CategoryTable { columns, rows }
}

/// Folds the tables left to right with [`outer_join`]. Returns an empty table
/// when `tables` is empty.
pub fn merge_all(tables: Vec<CategoryTable>) -> CategoryTable {
    let mut tables = tables.into_iter();
    let Some(first) = tables.next() else {
        return CategoryTable::empty();
    };

    tables.fold(first, |merged, table| {
        let merged = outer_join(merged, table);
        debug!(
            rows = merged.row_count(),
            columns = merged.column_count(),
            "joined table"
        );
        merged
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::labor::soc::catalog::Category;

    fn key(code: &str, title: &str) -> OccupationKey {
        OccupationKey::new(code, title)
    }

    #[test]
    fn shared_key_collects_both_categories() {
        let speaking = CategoryTable::single(
            Category::Communication,
            "Public_Speaking.xlsx",
            [
                (key("15-1111", "Engineer"), CellValue::Number(2.0)),
                (key("11-1011", "Chief Executives"), CellValue::Number(4.0)),
            ],
        );
        let proximity = CategoryTable::single(
            Category::Physical,
            "Physical_Proximity.xlsx",
            [
                (key("15-1111", "Engineer"), CellValue::Number(3.0)),
                (key("47-2061", "Laborers"), CellValue::Number(5.0)),
            ],
        );

        let merged = outer_join(speaking, proximity);

        assert_eq!(merged.columns.len(), 2);
        assert_eq!(
            merged.rows,
            vec![
                TableRow {
                    key: key("11-1011", "Chief Executives"),
                    cells: vec![CellValue::Number(4.0), CellValue::Missing],
                },
                TableRow {
                    key: key("15-1111", "Engineer"),
                    cells: vec![CellValue::Number(2.0), CellValue::Number(3.0)],
                },
                TableRow {
                    key: key("47-2061", "Laborers"),
                    cells: vec![CellValue::Missing, CellValue::Number(5.0)],
                },
            ]
        );
    }

    #[test]
    fn title_is_part_of_the_key() {
        let left = CategoryTable::single(
            Category::Routine,
            "a.xlsx",
            [(key("15-1111", "Engineer"), CellValue::Number(1.0))],
        );
        let right = CategoryTable::single(
            Category::Skills,
            "b.xlsx",
            [(key("15-1111", "Software Engineer"), CellValue::Number(2.0))],
        );

        let merged = outer_join(left, right);

        assert_eq!(merged.row_count(), 2);
    }

    #[test]
    fn duplicate_keys_multiply() {
        let left = CategoryTable::single(
            Category::Routine,
            "a.xlsx",
            [
                (key("15-1111", "Engineer"), CellValue::Number(1.0)),
                (key("15-1111", "Engineer"), CellValue::Number(3.0)),
            ],
        );
        let right = CategoryTable::single(
            Category::Skills,
            "b.xlsx",
            [
                (key("15-1111", "Engineer"), CellValue::Number(2.0)),
                (key("15-1111", "Engineer"), CellValue::Number(4.0)),
            ],
        );

        let merged = outer_join(left, right);

        assert_eq!(merged.row_count(), 4);
        assert!(merged.rows.iter().all(|row| row.cells.len() == 2));
    }

    #[test]
    fn merge_all_of_nothing_is_empty() {
        assert!(merge_all(Vec::new()).is_empty());
    }

    #[test]
    fn merge_all_unions_columns_in_order() {
        let tables = vec![
            CategoryTable::single(
                Category::Communication,
                "Public_Speaking.xlsx",
                [(key("15-1111", "Engineer"), CellValue::Number(1.0))],
            ),
            CategoryTable::single(
                Category::Aioe,
                "AIOE_DataAppendix.xlsx",
                [(key("15-1111", "Engineer"), CellValue::Number(0.7))],
            ),
            CategoryTable::single(
                Category::Communication,
                "Face-to-Face_Discussions_with_Individuals_and_Within_Teams.xlsx",
                [(key("15-1111", "Engineer"), CellValue::Number(5.0))],
            ),
        ];

        let merged = merge_all(tables);

        assert_eq!(merged.row_count(), 1);
        assert_eq!(merged.columns_for(Category::Communication), vec![0, 2]);
        assert_eq!(merged.columns_for(Category::Aioe), vec![1]);
    }
}

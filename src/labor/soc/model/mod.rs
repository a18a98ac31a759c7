//! In-memory tables: per-file and merged category tables and the collapsed summary.

use std::collections::BTreeSet;

use serde::Serialize;

use crate::labor::soc::catalog::{Category, OCCUPATION_COLUMN, SOC_CODE_COLUMN};

/// Occupation identity used as the join and grouping key. The title is part of
/// the key tuple, so the same code under two titles forms two occupations.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
pub struct OccupationKey {
    pub soc_code: String,
    pub occupation: String,
}

impl OccupationKey {
    pub fn new(soc_code: impl Into<String>, occupation: impl Into<String>) -> Self {
        Self {
            soc_code: soc_code.into(),
            occupation: occupation.into(),
        }
    }
}

/// A single cell as read from a source workbook.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "type", content = "value")]
pub enum CellValue {
    Number(f64),
    /// Non-numeric content. Kept verbatim so aggregation can report it.
    Text(String),
    Missing,
}

/// A value column of the merged table: the category it feeds and the file it
/// came from. Several files can feed the same category.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ValueColumn {
    pub category: Category,
    pub source: String,
}

/// One row of a [`CategoryTable`]. `cells` is aligned with the table columns.
#[derive(Debug, Clone, PartialEq)]
pub struct TableRow {
    pub key: OccupationKey,
    pub cells: Vec<CellValue>,
}

/// Table keyed by occupation with one or more category value columns. A
/// freshly loaded file is a single-column table; merging widens it.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct CategoryTable {
    pub columns: Vec<ValueColumn>,
    pub rows: Vec<TableRow>,
}

impl CategoryTable {
    /// Table with no columns and no rows, returned when nothing could be loaded.
    pub fn empty() -> Self {
        Self::default()
    }

    /// Builds the three-column projection of a single source file.
    pub fn single(
        category: Category,
        source: impl Into<String>,
        records: impl IntoIterator<Item = (OccupationKey, CellValue)>,
    ) -> Self {
        let rows = records
            .into_iter()
            .map(|(key, value)| TableRow {
                key,
                cells: vec![value],
            })
            .collect();
        Self {
            columns: vec![ValueColumn {
                category,
                source: source.into(),
            }],
            rows,
        }
    }

    pub fn is_empty(&self) -> bool {
        self.columns.is_empty() && self.rows.is_empty()
    }

    pub fn row_count(&self) -> usize {
        self.rows.len()
    }

    /// Width including the two identity columns.
    pub fn column_count(&self) -> usize {
        self.columns.len() + 2
    }

    /// Union of the categories present in the table.
    pub fn categories(&self) -> BTreeSet<Category> {
        self.columns.iter().map(|column| column.category).collect()
    }

    /// Indices of every column feeding `category`.
    pub fn columns_for(&self, category: Category) -> Vec<usize> {
        self.columns
            .iter()
            .enumerate()
            .filter(|(_, column)| column.category == category)
            .map(|(idx, _)| idx)
            .collect()
    }
}

/// One aggregated occupation. `values` follows [`Category::PRIMARY`] order.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SocRow {
    pub key: OccupationKey,
    pub values: [Option<f64>; 6],
}

impl SocRow {
    pub fn value(&self, category: Category) -> Option<f64> {
        Category::PRIMARY
            .iter()
            .position(|primary| *primary == category)
            .and_then(|idx| self.values[idx])
    }
}

/// The collapsed output: one row per occupation, sorted by key.
#[derive(Debug, Clone, PartialEq, Default, Serialize)]
pub struct SocSummary {
    pub rows: Vec<SocRow>,
}

impl SocSummary {
    /// Output header: identity columns then the primary category labels.
    pub fn header() -> Vec<&'static str> {
        let mut header = vec![SOC_CODE_COLUMN, OCCUPATION_COLUMN];
        header.extend(Category::PRIMARY.iter().map(|category| category.label()));
        header
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    pub fn find(&self, key: &OccupationKey) -> Option<&SocRow> {
        self.rows.iter().find(|row| &row.key == key)
    }

    /// Renders the first `limit` rows as an aligned text table with a leading
    /// row index, `NaN` marking missing medians.
    pub fn preview(&self, limit: usize) -> String {
        let header: Vec<String> = std::iter::once(String::new())
            .chain(Self::header().into_iter().map(str::to_string))
            .collect();

        let mut lines = vec![header];
        for (idx, row) in self.rows.iter().take(limit).enumerate() {
            let mut cells = vec![
                idx.to_string(),
                row.key.soc_code.clone(),
                row.key.occupation.clone(),
            ];
            cells.extend(row.values.iter().map(|value| match value {
                Some(number) => format_number(*number),
                None => "NaN".to_string(),
            }));
            lines.push(cells);
        }

        let widths: Vec<usize> = (0..lines[0].len())
            .map(|col| {
                lines
                    .iter()
                    .map(|line| line[col].chars().count())
                    .max()
                    .unwrap_or(0)
            })
            .collect();

        let mut out = String::new();
        for line in &lines {
            let rendered: Vec<String> = line
                .iter()
                .zip(&widths)
                .map(|(cell, &width)| format!("{cell:>width$}"))
                .collect();
            out.push_str(rendered.join("  ").trim_end());
            out.push('\n');
        }
        out
    }
}

fn format_number(value: f64) -> String {
    if value.fract() == 0.0 && value.abs() < 1e15 {
        format!("{value:.1}")
    } else {
        value.to_string()
    }
}

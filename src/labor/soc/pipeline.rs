use std::fs;
use std::path::{Path, PathBuf};

use tracing::{debug, error, info, instrument, warn};

use crate::labor::soc::aggregate::collapse_to_soc;
use crate::labor::soc::catalog::{OUTPUT_FILE_NAME, category_for};
use crate::labor::soc::error::{Result, SocError};
use crate::labor::soc::io::excel_read;
use crate::labor::soc::io::excel_write;
use crate::labor::soc::io::report::{self, LoadedFile, RunReport, SkippedFile};
use crate::labor::soc::merge::merge_all;
use crate::labor::soc::model::{CategoryTable, SocSummary};

/// Runtime parameters of a collapse run.
#[derive(Debug, Clone, PartialEq)]
pub struct PipelineConfig {
    /// Directory holding the source workbooks.
    pub data_dir: PathBuf,
    /// Output workbook. Defaults to `SOC_Categories_Phase1.xlsx` in `data_dir`.
    pub output: Option<PathBuf>,
    /// Optional JSON run report.
    pub report: Option<PathBuf>,
}

impl PipelineConfig {
    pub fn new(data_dir: impl Into<PathBuf>) -> Self {
        Self {
            data_dir: data_dir.into(),
            output: None,
            report: None,
        }
    }

    pub fn output_path(&self) -> PathBuf {
        self.output
            .clone()
            .unwrap_or_else(|| self.data_dir.join(OUTPUT_FILE_NAME))
    }
}

/// Merged table plus the bookkeeping of which files made it in.
#[derive(Debug, Clone, PartialEq)]
pub struct LoadOutcome {
    pub table: CategoryTable,
    pub loaded: Vec<LoadedFile>,
    pub skipped: Vec<SkippedFile>,
}

/// Result of a successful run.
#[derive(Debug, Clone, PartialEq)]
pub struct RunOutcome {
    pub summary: SocSummary,
    pub output: PathBuf,
    pub report: RunReport,
}

/// Loads every recognized workbook in `data_dir` and outer-joins them.
///
/// Unrecognized entries are ignored. A recognized file that cannot be read is
/// skipped with a warning. When nothing loads the returned table is empty.
#[instrument(level = "info", skip_all, fields(data_dir = %data_dir.display()))]
pub fn load_and_merge(data_dir: &Path) -> Result<LoadOutcome> {
    info!("Starting to load and merge data from Excel files...");

    let mut entries = fs::read_dir(data_dir)?
        .map(|entry| entry.map(|entry| entry.path()))
        .collect::<std::io::Result<Vec<_>>>()?;
    entries.sort();

    let mut tables = Vec::new();
    let mut loaded = Vec::new();
    let mut skipped = Vec::new();

    for path in entries {
        let Some(file_name) = path.file_name().map(|name| name.to_string_lossy().into_owned())
        else {
            continue;
        };
        let Some(category) = category_for(&file_name) else {
            debug!(file = %file_name, "ignoring unrecognized entry");
            continue;
        };

        match excel_read::read_category_file(&path, category) {
            Ok(table) => {
                info!("Loaded {file_name}");
                loaded.push(LoadedFile {
                    file: file_name,
                    category,
                    rows: table.row_count(),
                });
                tables.push(table);
            }
            Err(SocError::NoValueColumn) => {
                warn!("Skipping {file_name}: No recognized value column.");
                skipped.push(SkippedFile {
                    file: file_name,
                    reason: SocError::NoValueColumn.to_string(),
                });
            }
            Err(error) => {
                warn!("Could not load {file_name}: {error}");
                skipped.push(SkippedFile {
                    file: file_name,
                    reason: error.to_string(),
                });
            }
        }
    }

    if tables.is_empty() {
        error!("No relevant data files found to merge.");
        return Ok(LoadOutcome {
            table: CategoryTable::empty(),
            loaded,
            skipped,
        });
    }

    let table = merge_all(tables);
    info!(
        rows = table.row_count(),
        columns = table.column_count(),
        "All data merged"
    );

    Ok(LoadOutcome {
        table,
        loaded,
        skipped,
    })
}

/// Loads, merges, collapses and writes the categorized workbook.
///
/// Fails with [`SocError::NoInputFiles`] before writing anything when no
/// source file could be loaded or the loaded files held no data rows.
#[instrument(
    level = "info",
    skip_all,
    fields(data_dir = %config.data_dir.display())
)]
pub fn run(config: &PipelineConfig) -> Result<RunOutcome> {
    let LoadOutcome {
        table,
        loaded,
        skipped,
    } = load_and_merge(&config.data_dir)?;

    let mut run_report = RunReport {
        data_dir: config.data_dir.clone(),
        loaded,
        skipped,
        merged_rows: table.row_count(),
        ..RunReport::default()
    };

    if table.rows.is_empty() {
        if !table.is_empty() {
            error!("Recognized files held no data rows; nothing to collapse.");
        }
        if let Some(path) = &config.report {
            report::write_report(path, &run_report)?;
        }
        return Err(SocError::NoInputFiles(config.data_dir.clone()));
    }

    let summary = collapse_to_soc(&table)?;
    info!("Collapsed to SOC level: {} SOCs", summary.len());

    let output = config.output_path();
    excel_write::write_summary(&output, &summary)?;
    debug!(output = %output.display(), "categorized workbook written");

    run_report.soc_count = summary.len();
    run_report.output = Some(output.clone());
    if let Some(path) = &config.report {
        report::write_report(path, &run_report)?;
    }

    Ok(RunOutcome {
        summary,
        output,
        report: run_report,
    })
}

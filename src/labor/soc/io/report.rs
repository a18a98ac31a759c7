use std::fs;
use std::path::{Path, PathBuf};

use serde::Serialize;

use crate::labor::soc::catalog::Category;
use crate::labor::soc::error::Result;

/// A source file that contributed to the merged table.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct LoadedFile {
    pub file: String,
    pub category: Category,
    pub rows: usize,
}

/// A recognized source file that was skipped, with the reason it was skipped.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SkippedFile {
    pub file: String,
    pub reason: String,
}

/// Machine-readable summary of a run.
#[derive(Debug, Clone, PartialEq, Default, Serialize)]
pub struct RunReport {
    pub data_dir: PathBuf,
    pub loaded: Vec<LoadedFile>,
    pub skipped: Vec<SkippedFile>,
    pub merged_rows: usize,
    pub soc_count: usize,
    pub output: Option<PathBuf>,
}

/// Persists the report as pretty-printed JSON.
pub fn write_report(path: &Path, report: &RunReport) -> Result<()> {
    let json_string = serde_json::to_string_pretty(report)?;
    fs::write(path, json_string)?;
    Ok(())
}

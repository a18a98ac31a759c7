use std::path::PathBuf;

use thiserror::Error;

/// Convenient alias for fallible results returned throughout the crate.
pub type Result<T> = std::result::Result<T, SocError>;

/// Error type covering the failures that can occur while loading the source
/// workbooks, collapsing them, and writing the categorized output.
#[derive(Debug, Error)]
pub enum SocError {
    /// Wrapper for IO failures such as listing the data directory or writing files.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Raised when the JSON run report cannot be serialized.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// Errors bubbled up from the Excel writer implementation.
    #[error("Excel write error: {0}")]
    ExcelWrite(#[from] rust_xlsxwriter::XlsxError),

    /// Errors bubbled up from the Excel reader implementation.
    #[error("Excel read error: {0}")]
    ExcelRead(#[from] calamine::XlsxError),

    /// Raised when a workbook has no sheet or no header row.
    #[error("invalid workbook structure: {0}")]
    InvalidWorkbook(String),

    /// Raised when an identity column is still absent after reconciling names.
    #[error("missing required column '{column}'")]
    MissingColumn { column: String },

    /// Raised when none of the accepted value column names is present.
    #[error("no recognized value column")]
    NoValueColumn,

    /// Raised when a category cell cannot be reduced numerically.
    #[error(
        "non-numeric value '{value}' in column {category} for {soc_code} ({occupation})"
    )]
    NonNumeric {
        soc_code: String,
        occupation: String,
        category: String,
        value: String,
    },

    /// Raised when no recognized file in the data directory yielded any rows.
    #[error("no relevant data files found to merge in {0}")]
    NoInputFiles(PathBuf),

    /// Raised when the user provides a data directory that does not exist.
    #[error("input directory not found: {0}")]
    MissingInput(PathBuf),

    /// Raised when the tracing subscriber fails to initialise.
    #[error("failed to initialise logging: {0}")]
    Logging(String),
}

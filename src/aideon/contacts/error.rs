use std::path::PathBuf;

use thiserror::Error;

/// Convenient alias for fallible results returned throughout the crate.
pub type Result<T> = std::result::Result<T, ContactError>;

/// Error type covering the different failure cases that can occur when a
/// contact list is decoded, grouped, or exported.
#[derive(Debug, Error)]
pub enum ContactError {
    /// Wrapper for IO failures such as reading or writing files.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Raised when JSON serialization fails.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// Raised when delimited text cannot be tokenized or written.
    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    /// Errors bubbled up from the `.xlsx` reader implementation.
    #[error("Excel read error: {0}")]
    ExcelRead(#[from] calamine::XlsxError),

    /// Errors bubbled up from the legacy `.xls` reader implementation.
    #[error("Excel 97-2003 read error: {0}")]
    LegacyExcelRead(#[from] calamine::XlsError),

    /// Errors bubbled up from the Excel writer implementation.
    #[error("Excel write error: {0}")]
    ExcelWrite(#[from] rust_xlsxwriter::XlsxError),

    /// Raised when delimited text is structurally broken, such as an
    /// unterminated quoted field.
    #[error("malformed delimited text: {0}")]
    InvalidDelimited(String),

    /// Raised when a workbook does not contain usable data.
    #[error("invalid workbook structure: {0}")]
    InvalidWorkbook(String),

    /// Raised when an export document could not be assembled.
    #[error("export failed: {0}")]
    Export(String),

    /// Raised when the user provides a path that does not exist.
    #[error("input file not found: {0}")]
    MissingInput(PathBuf),

    /// Raised when a path has no usable file name component.
    #[error("input path has no file name: {0}")]
    InvalidSourceName(PathBuf),

    /// Raised when a group ordinal outside the computed range is requested.
    #[error("group {ordinal} does not exist ({available} groups available)")]
    GroupNotFound { ordinal: usize, available: usize },

    /// Raised when the tracing subscriber fails to initialise.
    #[error("failed to initialise logging: {0}")]
    Logging(String),
}

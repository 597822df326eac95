use std::path::PathBuf;

use thiserror::Error;

/// Convenient alias for fallible results returned throughout the crate.
pub type Result<T> = std::result::Result<T, MatchError>;

/// Error type covering the different failure cases that can occur when the
/// tool loads, matches, or emits tabular data.
#[derive(Debug, Error)]
pub enum MatchError {
    /// Wrapper for IO failures such as reading or writing files.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Raised when JSON serialization of a result table fails.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// Errors bubbled up from the Excel writer implementation.
    #[error("Excel write error: {0}")]
    ExcelWrite(#[from] rust_xlsxwriter::XlsxError),

    /// Errors bubbled up from the Excel reader implementation.
    #[error("Excel read error: {0}")]
    ExcelRead(#[from] calamine::XlsxError),

    /// Raised when a workbook does not contain the expected sheet or headers.
    #[error("invalid workbook structure: {0}")]
    InvalidWorkbook(String),

    /// Raised when a cell cannot be normalized into an article code.
    #[error("cell value '{value}' is not a valid article code")]
    InvalidCode { value: String },

    /// Raised when a column mapping references a column absent from a table.
    #[error("column '{column}' not found in the {table} table")]
    MissingColumn { table: String, column: String },

    /// Raised when no confident column mapping can be proposed and the caller
    /// supplied no explicit override.
    #[error("cannot infer columns for the {table} table: {reason}")]
    AmbiguousColumns { table: String, reason: String },

    /// Raised when pasted text contains no data at all.
    #[error("the pasted text is empty")]
    EmptyPaste,

    /// Raised when pasted text cannot be parsed into a table.
    #[error("malformed pasted data: {0}")]
    InvalidPaste(String),

    /// Raised when the user provides a path that does not exist.
    #[error("input file not found: {0}")]
    MissingInput(PathBuf),

    /// Raised when the tracing subscriber fails to initialise.
    #[error("failed to initialise logging: {0}")]
    Logging(String),
}

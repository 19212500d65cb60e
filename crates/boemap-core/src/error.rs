//! Error types for the boemap-core library.

use thiserror::Error;

/// Main error type for the boemap library.
#[derive(Error, Debug)]
pub enum BoemapError {
    /// Extraction rule error.
    #[error("rule error: {0}")]
    Rule(#[from] RuleError),

    /// Text format error (rule mapping, record, or cell location file).
    #[error("format error: {0}")]
    Format(#[from] FormatError),

    /// Spreadsheet read/write error.
    #[error("workbook error: {0}")]
    Workbook(#[from] WorkbookError),

    /// I/O error.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Configuration error.
    #[error("configuration error: {0}")]
    Config(String),

    /// No record data was available to populate the template.
    #[error("no record data loaded")]
    NoRecordData,
}

/// Errors related to extraction rule specifications.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum RuleError {
    /// The rule text matches none of the known shapes.
    #[error("unrecognized rule: {0:?}")]
    Unrecognized(String),
}

/// Errors related to the line-oriented text formats.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum FormatError {
    /// An entry appeared before any `[section]` header.
    #[error("line {line}: entry outside of any section")]
    MissingSection { line: usize },

    /// A cell location entry has a malformed `(row,col)` coordinate.
    #[error("line {line}: invalid cell location {text:?}")]
    CellLocation { line: usize, text: String },
}

/// Errors related to spreadsheet documents.
#[derive(Error, Debug)]
pub enum WorkbookError {
    /// Failed to open or parse a spreadsheet.
    #[error("failed to read workbook: {0}")]
    Read(String),

    /// Failed to write a spreadsheet.
    #[error("failed to write workbook: {0}")]
    Write(String),

    /// The workbook has no worksheets.
    #[error("workbook has no sheets")]
    NoSheets,

    /// A cell coordinate could not be parsed or is out of range.
    #[error("invalid cell coordinate: {0}")]
    InvalidCoordinate(String),
}

/// Result type for the boemap library.
pub type Result<T> = std::result::Result<T, BoemapError>;

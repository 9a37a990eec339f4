//! Error types for modelscan core.

use modelscan_grid::GridError;
use thiserror::Error;

/// Errors raised at the analysis boundary: loading, configuring and
/// publishing analyses. The classifiers themselves never fail.
#[derive(Error, Debug)]
pub enum ScanError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Parse error at line {line}: {message}")]
    Parse { line: usize, message: String },

    #[error("Cannot read workbook {path}: {reason}")]
    WorkbookUnreadable { path: String, reason: String },

    #[error("Unsupported workbook format: {0}")]
    UnsupportedFormat(String),

    #[error("Grid too large: {cells} cells exceeds the scan budget of {limit}")]
    GridTooLarge { cells: usize, limit: usize },

    #[error("Config error: {0}")]
    Config(String),

    #[error("Duplicate sheet name: {0}")]
    DuplicateSheet(String),

    #[error("Internal analysis error: {0}")]
    InternalAnalysis(String),
}

/// Coarse failure classes reported to callers.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ErrorKind {
    WorkbookUnreadable,
    UnsupportedFormat,
    InternalAnalysisError,
}

impl ScanError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            ScanError::Io(_)
            | ScanError::Parse { .. }
            | ScanError::WorkbookUnreadable { .. }
            | ScanError::DuplicateSheet(_) => ErrorKind::WorkbookUnreadable,
            ScanError::UnsupportedFormat(_) | ScanError::GridTooLarge { .. } => {
                ErrorKind::UnsupportedFormat
            }
            ScanError::Config(_) | ScanError::InternalAnalysis(_) => {
                ErrorKind::InternalAnalysisError
            }
        }
    }

    /// True when the caller can fix the input and retry.
    pub fn is_user_fixable(&self) -> bool {
        !matches!(self.kind(), ErrorKind::InternalAnalysisError)
    }
}

impl From<GridError> for ScanError {
    fn from(err: GridError) -> Self {
        match err {
            GridError::DuplicateSheet(name) => ScanError::DuplicateSheet(name),
        }
    }
}

pub type Result<T> = std::result::Result<T, ScanError>;

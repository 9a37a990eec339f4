//! Error types for the modelscan command line

use modelscan_core::{ErrorKind, ScanError};
use thiserror::Error;

/// Failures outside the analysis itself.
#[derive(Error, Debug)]
pub enum CliError {
    #[error("Cannot write {path}: {source}")]
    Output {
        path: String,
        #[source]
        source: std::io::Error,
    },
}

/// Process exit code for a failed run: 2 when the input is at fault, 1 otherwise.
pub fn exit_code(err: &anyhow::Error) -> i32 {
    match err.downcast_ref::<ScanError>().map(ScanError::kind) {
        Some(ErrorKind::WorkbookUnreadable | ErrorKind::UnsupportedFormat) => 2,
        _ => 1,
    }
}

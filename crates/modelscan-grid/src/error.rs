//! Error types for the cell grid.

use thiserror::Error;

#[derive(Error, Debug)]
pub enum GridError {
    #[error("Duplicate sheet name: {0}")]
    DuplicateSheet(String),
}

pub type Result<T> = std::result::Result<T, GridError>;

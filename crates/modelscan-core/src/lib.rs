//! modelscan-core - financial model layout analysis.
//!
//! Walks a workbook and recovers its sections, headings and fields, with
//! data-type and formula-pattern classification along the way.

pub mod analyzer;
pub mod classify;
pub mod config;
pub mod detect;
pub mod error;
pub mod export;
pub mod model;
pub mod storage;
pub mod store;

pub use analyzer::WorkbookAnalyzer;
pub use classify::{
    DataType, FormulaPattern, RowClassifier, RowKind, classify_data_type, classify_formula,
};
pub use config::{ScanConfig, load_config, user_config_path};
pub use detect::FieldDetector;
pub use error::{ErrorKind, Result, ScanError};
pub use export::{ExportDocument, write_fields_csv};
pub use model::{AnalysisResult, Field, FieldKind, FieldRef, HeadingGroup, Section};
pub use storage::load_workbook;
pub use store::{AnalysisId, AnalysisStore};

pub use modelscan_grid;

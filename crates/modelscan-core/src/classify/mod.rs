//! Classifiers used by the layout scan.
//!
//! - [`classify_data_type`] - literal value → [`DataType`]
//! - [`classify_formula`] - formula text → [`FormulaPattern`]
//! - [`RowClassifier`] - row → [`RowKind`]
//!
//! All three are total: every input maps to exactly one category.

mod data_type;
mod formula;
mod row;

pub use data_type::{DataType, classify_data_type};
pub use formula::{FormulaPattern, classify_formula};
pub use row::{RowClassifier, RowKind};

pub(crate) use row::is_label_text;

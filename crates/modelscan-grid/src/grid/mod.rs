//! Cell grid API.
//!
//! The read-only input the analyzer consumes:
//!
//! - [`CellRef`] - Cell reference parsing (A1 notation ↔ row/col indices)
//! - [`Cell`], [`CellValue`] - Stored cell contents
//! - [`SheetCell`] - A cell with its 1-based position and coordinate label
//! - [`CellGrid`], [`Sheet`], [`Grid`] - Sheet access and sparse storage
//! - [`Workbook`] - Ordered, name-addressed sheets

mod cell;
mod cell_ref;
mod sheet;
mod workbook;

pub use cell::{Cell, CellValue, SheetCell, format_number};
pub use cell_ref::CellRef;
pub use sheet::{CellGrid, Grid, Sheet};
pub use workbook::Workbook;

//! Sparse sheet storage and the read-only grid contract the analyzer consumes.

use dashmap::DashMap;

use super::cell::{Cell, SheetCell};
use super::cell_ref::CellRef;

/// Thread-safe sparse grid storage.
pub type Grid = DashMap<CellRef, Cell>;

/// Read-only view of one sheet: known extents plus 1-based cell access.
///
/// Cells outside the stored set (including past the extents) read as empty.
pub trait CellGrid {
    fn name(&self) -> &str;

    /// Highest populated 1-based row, 0 for an empty sheet.
    fn max_row(&self) -> usize;

    /// Highest populated 1-based column, 0 for an empty sheet.
    fn max_column(&self) -> usize;

    fn cell(&self, row: usize, column: usize) -> SheetCell;

    /// The cells of `row`, ordered from column 1 to `max_column`.
    fn row(&self, row: usize) -> Vec<SheetCell> {
        (1..=self.max_column())
            .map(|column| self.cell(row, column))
            .collect()
    }

    /// Number of cells a full scan visits.
    fn cell_count(&self) -> usize {
        self.max_row().saturating_mul(self.max_column())
    }
}

/// A named sheet backed by a [`Grid`].
#[derive(Debug)]
pub struct Sheet {
    name: String,
    grid: Grid,
    max_row: usize,
    max_column: usize,
}

impl Sheet {
    pub fn new(name: impl Into<String>) -> Self {
        Sheet {
            name: name.into(),
            grid: DashMap::new(),
            max_row: 0,
            max_column: 0,
        }
    }

    /// Store a cell. Empty cells are not stored and do not grow the extents.
    pub fn insert(&mut self, cell_ref: CellRef, cell: Cell) {
        if cell.value.is_empty() && cell.formula.is_none() {
            self.grid.remove(&cell_ref);
            return;
        }
        self.max_row = self.max_row.max(cell_ref.row_number());
        self.max_column = self.max_column.max(cell_ref.column_number());
        self.grid.insert(cell_ref, cell);
    }

    /// Store a cell by A1 coordinate. Returns false if the coordinate is invalid.
    pub fn set(&mut self, coordinate: &str, cell: Cell) -> bool {
        match CellRef::from_str(coordinate) {
            Some(cell_ref) => {
                self.insert(cell_ref, cell);
                true
            }
            None => false,
        }
    }

    pub fn get(&self, cell_ref: &CellRef) -> Option<Cell> {
        self.grid.get(cell_ref).map(|entry| entry.value().clone())
    }

    pub fn len(&self) -> usize {
        self.grid.len()
    }

    pub fn is_empty(&self) -> bool {
        self.grid.is_empty()
    }
}

impl CellGrid for Sheet {
    fn name(&self) -> &str {
        &self.name
    }

    fn max_row(&self) -> usize {
        self.max_row
    }

    fn max_column(&self) -> usize {
        self.max_column
    }

    fn cell(&self, row: usize, column: usize) -> SheetCell {
        let Some(cell_ref) = CellRef::from_one_based(row, column) else {
            return SheetCell {
                value: super::CellValue::Empty,
                formula: None,
                coordinate: String::new(),
                row,
                column,
            };
        };
        match self.grid.get(&cell_ref) {
            Some(entry) => SheetCell::new(cell_ref, entry.value().clone()),
            None => SheetCell::empty_at(cell_ref),
        }
    }
}

use super::sheet::{CellGrid, Sheet};
use crate::error::{GridError, Result};

/// Ordered collection of sheets; order is declaration order.
#[derive(Debug, Default)]
pub struct Workbook {
    sheets: Vec<Sheet>,
}

impl Workbook {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a sheet. Sheet names are unique within a workbook.
    pub fn push(&mut self, sheet: Sheet) -> Result<()> {
        if self.sheet(sheet.name()).is_some() {
            return Err(GridError::DuplicateSheet(sheet.name().to_string()));
        }
        self.sheets.push(sheet);
        Ok(())
    }

    pub fn sheet_names(&self) -> Vec<&str> {
        self.sheets.iter().map(|s| s.name()).collect()
    }

    pub fn sheet(&self, name: &str) -> Option<&Sheet> {
        self.sheets.iter().find(|s| s.name() == name)
    }

    pub fn sheets(&self) -> &[Sheet] {
        &self.sheets
    }

    pub fn len(&self) -> usize {
        self.sheets.len()
    }

    pub fn is_empty(&self) -> bool {
        self.sheets.is_empty()
    }

    /// Cells visited by a full scan of every sheet.
    pub fn cell_count(&self) -> usize {
        self.sheets
            .iter()
            .fold(0usize, |acc, s| acc.saturating_add(s.cell_count()))
    }
}

impl TryFrom<Vec<Sheet>> for Workbook {
    type Error = GridError;

    fn try_from(sheets: Vec<Sheet>) -> Result<Self> {
        let mut workbook = Workbook::new();
        for sheet in sheets {
            workbook.push(sheet)?;
        }
        Ok(workbook)
    }
}

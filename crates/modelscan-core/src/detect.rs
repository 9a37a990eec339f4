//! Field detection within a row of an open section.
//!
//! A row contributes at most one field. Candidate cells hold a formula or a
//! text value longer than two characters; they are tried left to right and
//! the first one that resolves a display name becomes the field. The name
//! comes from the closest qualifying text cell, up to three columns left,
//! then up to two columns right. Rows where no candidate resolves a name
//! contribute nothing.

use modelscan_grid::SheetCell;

use crate::classify::{classify_data_type, is_label_text};
use crate::config::ScanConfig;
use crate::model::{Field, FieldKind, GENERAL_HEADING};

const LABEL_LOOKBACK: usize = 3;
const LABEL_LOOKAHEAD: usize = 2;
const INDEX_MARKER: &str = "INDEX";

#[derive(Clone, Debug)]
pub struct FieldDetector {
    reference_prefix: String,
}

impl FieldDetector {
    pub fn new(config: &ScanConfig) -> Self {
        FieldDetector {
            reference_prefix: config.reference_prefix.clone(),
        }
    }

    /// Detect the field on `row`, which must already be known to be neither
    /// a section header nor a heading. `heading` is the open heading, if any.
    pub fn detect(
        &self,
        row: &[SheetCell],
        sheet: &str,
        section_id: &str,
        heading: Option<&str>,
    ) -> Option<Field> {
        row.iter()
            .enumerate()
            .filter(|(_, cell)| is_trigger(cell))
            .find_map(|(idx, _)| self.field_at(row, idx, sheet, section_id, heading))
    }

    fn field_at(
        &self,
        row: &[SheetCell],
        idx: usize,
        sheet: &str,
        section_id: &str,
        heading: Option<&str>,
    ) -> Option<Field> {
        let cell = row.get(idx)?;
        let name = self.find_label(row, idx)?;

        let kind = if cell.has_formula() {
            FieldKind::Calculated
        } else {
            FieldKind::Input
        };
        let is_named_cell = cell
            .formula
            .as_deref()
            .is_some_and(|f| f.contains(INDEX_MARKER));

        Some(Field {
            id: format!("field_{}", cell.row),
            name,
            row: cell.row,
            column: cell.coordinate.clone(),
            kind,
            data_type: classify_data_type(&cell.value),
            value: cell.value.clone(),
            formula: cell.formula.clone(),
            is_named_cell,
            named_cell_ref: is_named_cell.then(|| cell.coordinate.clone()),
            required: false,
            unit: None,
            section_id: section_id.to_string(),
            heading_name: heading.unwrap_or(GENERAL_HEADING).to_string(),
            sheet: sheet.to_string(),
        })
    }

    /// Closest qualifying text around `idx`: left offsets 1..=3 first, then
    /// right offsets 1..=2. Only text values are candidates.
    pub fn find_label(&self, row: &[SheetCell], idx: usize) -> Option<String> {
        let left = (1..=LABEL_LOOKBACK).filter_map(|offset| idx.checked_sub(offset));
        let right = (1..=LABEL_LOOKAHEAD)
            .map(|offset| idx + offset)
            .filter(|&i| i < row.len());

        left.chain(right)
            .filter_map(|i| row[i].value.as_text())
            .map(str::trim)
            .find(|text| is_label_text(text, 2, &self.reference_prefix))
            .map(str::to_string)
    }
}

fn is_trigger(cell: &SheetCell) -> bool {
    if cell.value.is_empty() {
        return false;
    }
    cell.has_formula()
        || cell
            .value
            .as_text()
            .is_some_and(|s| s.trim().chars().count() > 2)
}

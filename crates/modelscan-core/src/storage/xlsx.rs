//! Binary workbooks (xlsx, xlsm, xlsb, xls, ods) through calamine.
//!
//! Values and formulas come from separate ranges. A cell with a formula is
//! stored as that formula (prefixed with `=`); its cached result is dropped.

use calamine::{Data, Range, Reader, open_workbook_auto};
use modelscan_grid::{Cell, CellRef, Sheet, Workbook};
use std::path::Path;
use tracing::debug;

use crate::error::{Result, ScanError};

pub fn parse_xlsx(path: &Path) -> Result<Workbook> {
    let unreadable = |reason: String| ScanError::WorkbookUnreadable {
        path: path.display().to_string(),
        reason,
    };

    let mut source = open_workbook_auto(path).map_err(|e| unreadable(e.to_string()))?;
    let names = source.sheet_names().to_vec();

    let mut workbook = Workbook::new();
    for name in names {
        let values = source
            .worksheet_range(&name)
            .map_err(|e| unreadable(format!("sheet '{}': {}", name, e)))?;
        // Formula ranges are unavailable for some formats; values alone still scan.
        let formulas = source.worksheet_formula(&name).ok();

        let sheet = range_to_sheet(&name, &values, formulas.as_ref());
        debug!(sheet = %name, cells = sheet.len(), "decoded sheet");
        workbook.push(sheet)?;
    }
    Ok(workbook)
}

fn range_to_sheet(name: &str, values: &Range<Data>, formulas: Option<&Range<String>>) -> Sheet {
    let mut sheet = Sheet::new(name);

    let (start_row, start_col) = values.start().unwrap_or_default();
    for (row, col, data) in values.used_cells() {
        let cell_ref = CellRef::new(col + start_col as usize, row + start_row as usize);
        sheet.insert(cell_ref, convert_value(data));
    }

    if let Some(formulas) = formulas {
        let (start_row, start_col) = formulas.start().unwrap_or_default();
        for (row, col, formula) in formulas.used_cells() {
            if formula.is_empty() {
                continue;
            }
            let cell_ref = CellRef::new(col + start_col as usize, row + start_row as usize);
            sheet.insert(cell_ref, Cell::new_formula(formula));
        }
    }

    sheet
}

fn convert_value(data: &Data) -> Cell {
    match data {
        Data::Empty => Cell::new_empty(),
        Data::String(s) if s.is_empty() => Cell::new_empty(),
        Data::String(s) => Cell::new_text(s),
        Data::Float(f) => Cell::new_number(*f),
        Data::Int(i) => Cell::new_number(*i as f64),
        Data::Bool(b) => Cell::new_bool(*b),
        // Serial number, as stored
        Data::DateTime(dt) => Cell::new_number(dt.as_f64()),
        Data::DateTimeIso(s) | Data::DurationIso(s) => Cell::new_text(s),
        Data::Error(e) => Cell::new_text(&e.to_string()),
    }
}

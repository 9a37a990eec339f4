//! Parser for the multi-sheet .grd text grid format.
//!
//! ```text
//! # comment
//! [Inputs]
//! A1: "PROJECT COST ASSUMPTIONS"
//! B3: =INDEX(Rates!A1:A10,2)
//! C3: 45%
//! ```
//!
//! `[Name]` starts a sheet. Cells before the first sheet header belong to a
//! sheet named "Sheet1". Values follow `Cell::from_input`.

use crate::error::{Result, ScanError};
use modelscan_grid::{Cell, CellRef, Sheet, Workbook};
use std::fs;
use std::path::Path;

const DEFAULT_SHEET_NAME: &str = "Sheet1";

/// Parse a .grd file into a workbook.
pub fn parse_grd(path: &Path) -> Result<Workbook> {
    let content = fs::read_to_string(path)?;
    parse_grd_content(&content)
}

/// Parse .grd content from a string
pub fn parse_grd_content(content: &str) -> Result<Workbook> {
    let mut workbook = Workbook::new();
    let mut current: Option<Sheet> = None;

    for (line_num, line) in content.lines().enumerate() {
        let line = line.trim();

        // Skip empty lines and comments
        if line.is_empty() || line.starts_with('#') {
            continue;
        }

        if let Some(name) = line.strip_prefix('[').and_then(|l| l.strip_suffix(']')) {
            let name = name.trim();
            if name.is_empty() {
                return Err(ScanError::Parse {
                    line: line_num + 1,
                    message: "Empty sheet name".to_string(),
                });
            }
            if let Some(sheet) = current.take() {
                workbook.push(sheet)?;
            }
            current = Some(Sheet::new(name));
            continue;
        }

        // Parse "CELLREF: VALUE" format
        let Some((cell_ref_str, value_str)) = line.split_once(':') else {
            return Err(ScanError::Parse {
                line: line_num + 1,
                message: "Expected 'CELLREF: VALUE' or '[Sheet]'".to_string(),
            });
        };

        let cell_ref_str = cell_ref_str.trim();
        let cell_ref = CellRef::from_str(cell_ref_str).ok_or_else(|| ScanError::Parse {
            line: line_num + 1,
            message: format!("Invalid cell reference: {}", cell_ref_str),
        })?;

        let cell = parse_cell_value(value_str);
        current
            .get_or_insert_with(|| Sheet::new(DEFAULT_SHEET_NAME))
            .insert(cell_ref, cell);
    }

    if let Some(sheet) = current {
        workbook.push(sheet)?;
    }
    Ok(workbook)
}

fn parse_cell_value(value: &str) -> Cell {
    let value = value.trim();
    if value.starts_with('"') && value.ends_with('"') && value.len() >= 2 {
        return Cell::new_text(&unescape_grd_text(&value[1..value.len() - 1]));
    }
    Cell::from_input(value)
}

fn unescape_grd_text(input: &str) -> String {
    let mut out = String::with_capacity(input.len());
    let mut chars = input.chars();
    while let Some(ch) = chars.next() {
        if ch == '\\' {
            if let Some(next) = chars.next() {
                match next {
                    '\\' => out.push('\\'),
                    '"' => out.push('"'),
                    _ => {
                        out.push('\\');
                        out.push(next);
                    }
                }
            } else {
                out.push('\\');
            }
        } else {
            out.push(ch);
        }
    }
    out
}

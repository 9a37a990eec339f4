//! Cell data structures for the sheet grid.
//!
//! - [`CellValue`] - The literal stored in a cell (empty, text, number, boolean)
//! - [`Cell`] - Stored contents: a literal plus optional formula text
//! - [`SheetCell`] - A cell together with its 1-based position and A1 coordinate

use serde::{Serialize, Serializer};
use std::fmt;

use super::cell_ref::CellRef;

/// The literal value of a cell. `Empty` plays the role of "no value".
#[derive(Clone, Debug, PartialEq)]
pub enum CellValue {
    Empty,
    Text(String),
    Number(f64),
    Bool(bool),
}

impl CellValue {
    pub fn is_empty(&self) -> bool {
        matches!(self, CellValue::Empty)
    }

    pub fn as_text(&self) -> Option<&str> {
        match self {
            CellValue::Text(s) => Some(s),
            _ => None,
        }
    }
}

impl fmt::Display for CellValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CellValue::Empty => Ok(()),
            CellValue::Text(s) => f.write_str(s),
            CellValue::Number(n) => f.write_str(&format_number(*n)),
            CellValue::Bool(b) => f.write_str(if *b { "TRUE" } else { "FALSE" }),
        }
    }
}

impl Serialize for CellValue {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            CellValue::Empty => serializer.serialize_none(),
            CellValue::Text(s) => serializer.serialize_str(s),
            CellValue::Number(n) => serializer.serialize_f64(*n),
            CellValue::Bool(b) => serializer.serialize_bool(*b),
        }
    }
}

/// Format a number for display. Integral values drop the fractional part.
pub fn format_number(n: f64) -> String {
    if n.is_nan() {
        "#NAN!".to_string()
    } else if n.is_infinite() {
        "#INF!".to_string()
    } else if n.fract() == 0.0 && n.abs() < 1e15 {
        format!("{:.0}", n)
    } else {
        n.to_string()
    }
}

/// Stored contents of a grid cell.
///
/// A formula cell keeps the formula text in both `value` (as text) and
/// `formula`; the grid never holds evaluated results.
#[derive(Clone, Debug, PartialEq)]
pub struct Cell {
    pub value: CellValue,
    pub formula: Option<String>,
}

impl Cell {
    pub fn new_empty() -> Cell {
        Cell {
            value: CellValue::Empty,
            formula: None,
        }
    }

    pub fn new_text(text: &str) -> Cell {
        Cell {
            value: CellValue::Text(text.to_string()),
            formula: None,
        }
    }

    pub fn new_number(n: f64) -> Cell {
        Cell {
            value: CellValue::Number(n),
            formula: None,
        }
    }

    pub fn new_bool(b: bool) -> Cell {
        Cell {
            value: CellValue::Bool(b),
            formula: None,
        }
    }

    /// Create a formula cell. A leading '=' is added if missing.
    pub fn new_formula(formula: &str) -> Cell {
        let text = if formula.starts_with('=') {
            formula.to_string()
        } else {
            format!("={}", formula)
        };
        Cell {
            value: CellValue::Text(text.clone()),
            formula: Some(text),
        }
    }

    /// Parse user input and create the appropriate cell.
    /// - Empty string or whitespace -> Empty
    /// - Starts with '=' -> Formula
    /// - Quoted string -> Text (without quotes)
    /// - Valid number -> Number
    /// - TRUE / FALSE (any case) -> Bool
    /// - Otherwise -> Text
    pub fn from_input(input: &str) -> Cell {
        let trimmed = input.trim();
        if trimmed.is_empty() {
            return Cell::new_empty();
        }

        if trimmed.starts_with('=') {
            return Cell::new_formula(trimmed);
        }

        if trimmed.starts_with('"') && trimmed.ends_with('"') && trimmed.len() >= 2 {
            let text = &trimmed[1..trimmed.len() - 1];
            return Cell::new_text(text);
        }

        if let Ok(n) = trimmed.parse::<f64>() {
            return Cell::new_number(n);
        }

        if trimmed.eq_ignore_ascii_case("true") {
            return Cell::new_bool(true);
        }
        if trimmed.eq_ignore_ascii_case("false") {
            return Cell::new_bool(false);
        }

        Cell::new_text(trimmed)
    }

    pub fn is_formula(&self) -> bool {
        self.formula.is_some()
    }
}

impl Default for Cell {
    fn default() -> Self {
        Cell::new_empty()
    }
}

/// A cell as seen by the analyzer: contents plus its 1-based position.
#[derive(Clone, Debug, PartialEq)]
pub struct SheetCell {
    pub value: CellValue,
    pub formula: Option<String>,
    /// A1-style label, e.g. "C10".
    pub coordinate: String,
    pub row: usize,
    pub column: usize,
}

impl SheetCell {
    pub fn new(cell_ref: CellRef, cell: Cell) -> SheetCell {
        SheetCell {
            value: cell.value,
            formula: cell.formula,
            coordinate: cell_ref.to_string(),
            row: cell_ref.row_number(),
            column: cell_ref.column_number(),
        }
    }

    pub fn empty_at(cell_ref: CellRef) -> SheetCell {
        SheetCell::new(cell_ref, Cell::new_empty())
    }

    pub fn has_formula(&self) -> bool {
        self.formula.is_some()
    }
}

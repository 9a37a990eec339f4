//! Cell reference parsing and formatting.
//!
//! Converts between spreadsheet-style coordinates ("A1", "AB12") and
//! zero-indexed column/row indices. Sheets and the analyzer speak 1-based
//! row/column numbers; `CellRef` is the storage key underneath them.
//!
//! # Examples
//!
//! ```
//! use modelscan_grid::CellRef;
//!
//! let cell = CellRef::from_str("B3").unwrap();
//! assert_eq!(cell.col, 1);
//! assert_eq!(cell.row, 2);
//! assert_eq!(cell.to_string(), "B3");
//! ```

use regex::Regex;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::sync::OnceLock;

/// A reference to a cell by column and row indices (0-indexed).
#[derive(Clone, Copy, Debug, Hash, Eq, PartialEq, Ord, PartialOrd, Serialize, Deserialize)]
pub struct CellRef {
    pub row: usize,
    pub col: usize,
}

fn a1_re() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| {
        Regex::new(r"^(?<letters>[A-Za-z]+)(?<numbers>[0-9]+)$")
            .expect("A1 reference regex must compile")
    })
}

impl CellRef {
    pub fn new(col: usize, row: usize) -> CellRef {
        CellRef { row, col }
    }

    /// Build a reference from 1-based row and column numbers.
    /// Returns None for a zero row or column.
    pub fn from_one_based(row: usize, column: usize) -> Option<CellRef> {
        Some(CellRef::new(column.checked_sub(1)?, row.checked_sub(1)?))
    }

    /// Parse a cell reference from spreadsheet notation (e.g., "A1", "B2", "AA10").
    /// Returns None if the input is invalid.
    #[allow(clippy::should_implement_trait)]
    pub fn from_str(name: &str) -> Option<CellRef> {
        Self::parse_a1(name)
    }

    fn parse_a1(name: &str) -> Option<CellRef> {
        let caps = a1_re().captures(name)?;
        let col = Self::letters_to_col(&caps["letters"])?;
        let row = caps["numbers"].parse::<usize>().ok()?.checked_sub(1)?;
        Some(CellRef::new(col, row))
    }

    /// Convert column letters to a zero-indexed column (A -> 0, AA -> 26).
    pub fn letters_to_col(letters: &str) -> Option<usize> {
        if letters.is_empty() {
            return None;
        }
        let mut col_acc = 0usize;
        for c in letters.to_ascii_uppercase().bytes() {
            if !c.is_ascii_uppercase() {
                return None;
            }
            let digit = (c - b'A') as usize + 1;
            col_acc = col_acc.checked_mul(26)?.checked_add(digit)?;
        }
        col_acc.checked_sub(1)
    }

    /// Convert column index to spreadsheet-style letters (0 -> A, 25 -> Z, 26 -> AA).
    pub fn col_to_letters(col: usize) -> String {
        let mut result = String::new();
        let mut n = col as u128 + 1;
        while n > 0 {
            n -= 1;
            result.insert(0, (b'A' + (n % 26) as u8) as char);
            n /= 26;
        }
        result
    }

    /// 1-based row number.
    pub fn row_number(&self) -> usize {
        self.row + 1
    }

    /// 1-based column number.
    pub fn column_number(&self) -> usize {
        self.col + 1
    }
}

impl std::str::FromStr for CellRef {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse_a1(s).ok_or_else(|| format!("Invalid cell reference: {}", s))
    }
}

impl fmt::Display for CellRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{}", CellRef::col_to_letters(self.col), self.row + 1)
    }
}

#[cfg(test)]
mod tests {
    use super::CellRef;

    #[test]
    fn test_parse_a1_overflow_returns_none() {
        let huge = format!("{}1", "Z".repeat(40));
        assert!(CellRef::from_str(&huge).is_none());
    }

    #[test]
    fn test_col_to_letters_handles_max_usize() {
        let letters = CellRef::col_to_letters(usize::MAX);
        assert!(!letters.is_empty());
        assert!(letters.chars().all(|c| c.is_ascii_uppercase()));
    }

    #[test]
    fn test_letters_round_trip_boundaries() {
        for col in [0, 25, 26, 51, 52, 701, 702] {
            let letters = CellRef::col_to_letters(col);
            assert_eq!(CellRef::letters_to_col(&letters), Some(col));
        }
        assert_eq!(CellRef::letters_to_col(""), None);
        assert_eq!(CellRef::letters_to_col("A1"), None);
    }

    #[test]
    fn test_from_one_based_rejects_zero() {
        assert_eq!(CellRef::from_one_based(1, 1), Some(CellRef::new(0, 0)));
        assert_eq!(CellRef::from_one_based(0, 1), None);
        assert_eq!(CellRef::from_one_based(3, 0), None);
        let b10 = CellRef::from_one_based(10, 2).unwrap();
        assert_eq!(b10.to_string(), "B10");
        assert_eq!(b10.row_number(), 10);
        assert_eq!(b10.column_number(), 2);
    }
}

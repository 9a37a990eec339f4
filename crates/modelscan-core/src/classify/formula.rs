//! Coarse formula shape categories.

use regex::Regex;
use serde::Serialize;
use std::fmt;
use std::sync::OnceLock;

#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum FormulaPattern {
    Index,
    Edate,
    If,
    Arithmetic,
    CellRef,
    Unknown,
}

impl FormulaPattern {
    pub fn as_str(&self) -> &'static str {
        match self {
            FormulaPattern::Index => "INDEX",
            FormulaPattern::Edate => "EDATE",
            FormulaPattern::If => "IF",
            FormulaPattern::Arithmetic => "ARITHMETIC",
            FormulaPattern::CellRef => "CELL_REF",
            FormulaPattern::Unknown => "UNKNOWN",
        }
    }
}

impl fmt::Display for FormulaPattern {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.pad(self.as_str())
    }
}

fn cell_ref_re() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| {
        Regex::new(r"[A-Za-z]+[0-9]+").expect("cell reference shape regex must compile")
    })
}

/// Classify formula text. Rules are checked in order and the first match wins,
/// so `=INDEX(...)` inside an `IF(` is still `Index`.
pub fn classify_formula(formula: &str) -> FormulaPattern {
    if formula.contains("INDEX") {
        FormulaPattern::Index
    } else if formula.contains("EDATE") {
        FormulaPattern::Edate
    } else if formula.contains("IF(") {
        FormulaPattern::If
    } else if formula.contains(['+', '-', '*', '/']) {
        FormulaPattern::Arithmetic
    } else if cell_ref_re().is_match(formula) {
        FormulaPattern::CellRef
    } else {
        FormulaPattern::Unknown
    }
}

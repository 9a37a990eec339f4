//! modelscan_grid - Cell-grid abstraction consumed by the layout analyzer.

pub mod error;
pub mod grid;

pub use error::{GridError, Result};
pub use grid::{Cell, CellGrid, CellRef, CellValue, Grid, Sheet, SheetCell, Workbook};

#[cfg(test)]
mod tests {
    use crate::grid::*;

    #[test]
    fn test_from_str_single_letter_columns() {
        let a1 = CellRef::from_str("A1").unwrap();
        assert_eq!(a1.row, 0);
        assert_eq!(a1.col, 0);

        let z1 = CellRef::from_str("Z1").unwrap();
        assert_eq!(z1.row, 0);
        assert_eq!(z1.col, 25);
    }

    #[test]
    fn test_from_str_multi_letter_columns() {
        assert_eq!(CellRef::from_str("AA1").unwrap().col, 26);
        assert_eq!(CellRef::from_str("AZ1").unwrap().col, 51);
        assert_eq!(CellRef::from_str("BA1").unwrap().col, 52);
    }

    #[test]
    fn test_from_str_case_insensitive() {
        let mixed = CellRef::from_str("aA1").unwrap();
        assert_eq!(mixed.col, 26);
    }

    #[test]
    fn test_from_str_invalid_inputs() {
        assert!(CellRef::from_str("").is_none());
        assert!(CellRef::from_str("123").is_none());
        assert!(CellRef::from_str("ABC").is_none());
        assert!(CellRef::from_str("A0").is_none());
        assert!(CellRef::from_str("1A").is_none());
        assert!(CellRef::from_str("A 1").is_none());
    }

    #[test]
    fn test_from_input_formula_keeps_marker() {
        let cell = Cell::from_input("=INDEX(Sheet1!A1:A10,2)");
        assert_eq!(cell.formula.as_deref(), Some("=INDEX(Sheet1!A1:A10,2)"));
        assert_eq!(cell.value.as_text(), Some("=INDEX(Sheet1!A1:A10,2)"));
    }

    #[test]
    fn test_new_formula_adds_marker() {
        let cell = Cell::new_formula("A1+B2");
        assert_eq!(cell.formula.as_deref(), Some("=A1+B2"));
        assert!(cell.is_formula());
    }

    #[test]
    fn test_from_input_literals() {
        assert_eq!(Cell::from_input("  ").value, CellValue::Empty);
        assert_eq!(Cell::from_input("45").value, CellValue::Number(45.0));
        assert_eq!(Cell::from_input("TRUE").value, CellValue::Bool(true));
        assert_eq!(Cell::from_input("false").value, CellValue::Bool(false));
        assert_eq!(
            Cell::from_input("\"42\"").value,
            CellValue::Text("42".to_string())
        );
        assert_eq!(
            Cell::from_input("45%").value,
            CellValue::Text("45%".to_string())
        );
    }

    #[test]
    fn test_cell_value_display() {
        assert_eq!(CellValue::Number(45.0).to_string(), "45");
        assert_eq!(CellValue::Number(0.125).to_string(), "0.125");
        assert_eq!(CellValue::Bool(true).to_string(), "TRUE");
        assert_eq!(CellValue::Empty.to_string(), "");
    }

    #[test]
    fn test_cell_value_serializes_as_plain_json() {
        let values = vec![
            CellValue::Empty,
            CellValue::Text("a".to_string()),
            CellValue::Number(1.5),
            CellValue::Bool(false),
        ];
        let json = serde_json::to_string(&values).unwrap();
        assert_eq!(json, r#"[null,"a",1.5,false]"#);
    }

    #[test]
    fn test_workbook_preserves_order_and_rejects_duplicates() {
        let mut workbook = Workbook::new();
        workbook.push(Sheet::new("Inputs")).unwrap();
        workbook.push(Sheet::new("Timeline")).unwrap();
        assert_eq!(workbook.sheet_names(), vec!["Inputs", "Timeline"]);
        assert!(workbook.push(Sheet::new("Inputs")).is_err());
        assert!(workbook.sheet("Timeline").is_some());
        assert!(workbook.sheet("Missing").is_none());
    }
}

use crate::error::Result;
use modelscan_grid::{Cell, CellRef, Sheet};
use std::fs;
use std::path::Path;

/// Read a CSV file as a single sheet named after the file stem.
pub fn parse_csv(path: &Path) -> Result<Sheet> {
    let content = fs::read_to_string(path)?;
    let name = path
        .file_stem()
        .map(|s| s.to_string_lossy().into_owned())
        .unwrap_or_else(|| "Sheet1".to_string());
    Ok(parse_csv_content(&name, &content))
}

pub fn parse_csv_content(name: &str, content: &str) -> Sheet {
    let mut sheet = Sheet::new(name);
    for (row_idx, line) in content.lines().enumerate() {
        for (col_idx, field) in parse_csv_line(line).iter().enumerate() {
            sheet.insert(CellRef::new(col_idx, row_idx), parse_csv_field(field));
        }
    }
    sheet
}

pub(crate) fn parse_csv_line(line: &str) -> Vec<String> {
    let mut fields = Vec::new();
    let mut current = String::new();
    let mut in_quotes = false;
    let mut chars = line.chars().peekable();

    while let Some(c) = chars.next() {
        if in_quotes {
            if c == '"' {
                // Escaped quote
                if chars.peek() == Some(&'"') {
                    current.push('"');
                    chars.next();
                } else {
                    in_quotes = false;
                }
            } else {
                current.push(c);
            }
        } else {
            match c {
                '"' => in_quotes = true,
                ',' => fields.push(std::mem::take(&mut current)),
                _ => current.push(c),
            }
        }
    }
    fields.push(current);
    fields
}

pub(crate) fn parse_csv_field(field: &str) -> Cell {
    let trimmed = field.trim();

    if trimmed.is_empty() {
        return Cell::new_empty();
    }

    if trimmed.starts_with('=') {
        return Cell::new_formula(trimmed);
    }

    // Keep codes with leading zeros ("007") as text
    let mut chars = trimmed.chars();
    if chars.next() == Some('0') && chars.next().is_some_and(|c| c.is_ascii_digit()) {
        return Cell::new_text(field);
    }

    if let Ok(n) = trimmed.parse::<f64>() {
        return Cell::new_number(n);
    }

    Cell::new_text(field)
}

#[cfg(test)]
mod tests {
    use super::*;
    use modelscan_grid::{CellGrid, CellValue};

    #[test]
    fn test_parse_csv_line_simple() {
        assert_eq!(parse_csv_line("a,b,c"), vec!["a", "b", "c"]);
    }

    #[test]
    fn test_parse_csv_line_quoted() {
        assert_eq!(
            parse_csv_line("\"hello, world\",test"),
            vec!["hello, world", "test"]
        );
    }

    #[test]
    fn test_parse_csv_line_escaped_quotes() {
        assert_eq!(
            parse_csv_line("\"say \"\"hi\"\"\",x"),
            vec!["say \"hi\"", "x"]
        );
    }

    #[test]
    fn test_parse_csv_field_types() {
        assert_eq!(parse_csv_field("").value, CellValue::Empty);
        assert_eq!(parse_csv_field(" 45 ").value, CellValue::Number(45.0));
        assert_eq!(parse_csv_field("007").value, CellValue::Text("007".to_string()));
        assert_eq!(parse_csv_field("0.5").value, CellValue::Number(0.5));
        assert_eq!(parse_csv_field("45%").value, CellValue::Text("45%".to_string()));
        assert_eq!(
            parse_csv_field("=EDATE(A1,1)").formula.as_deref(),
            Some("=EDATE(A1,1)")
        );
    }

    #[test]
    fn test_parse_csv_content_positions() {
        let sheet = parse_csv_content("model", "TAXES,,\n,=B2*2,\"Rate, blended\"\n");
        assert_eq!(sheet.name(), "model");
        assert_eq!(sheet.max_row(), 2);
        assert_eq!(sheet.max_column(), 3);
        assert_eq!(sheet.cell(1, 1).value.as_text(), Some("TAXES"));
        assert!(sheet.cell(2, 2).has_formula());
        assert_eq!(sheet.cell(2, 3).value.as_text(), Some("Rate, blended"));
    }
}

//! Semantic data type of a cell's literal value.

use modelscan_grid::CellValue;
use regex::Regex;
use serde::Serialize;
use std::fmt;
use std::sync::OnceLock;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum DataType {
    Text,
    Number,
    Currency,
    Percentage,
    Date,
    Boolean,
}

impl DataType {
    pub fn as_str(&self) -> &'static str {
        match self {
            DataType::Text => "text",
            DataType::Number => "number",
            DataType::Currency => "currency",
            DataType::Percentage => "percentage",
            DataType::Date => "date",
            DataType::Boolean => "boolean",
        }
    }
}

impl fmt::Display for DataType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.pad(self.as_str())
    }
}

fn iso_date_prefix_re() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"^[0-9]{4}-[0-9]{2}-[0-9]{2}").expect("date regex must compile"))
}

/// Classify a literal value. First matching rule wins.
///
/// Booleans are numeric here: a stored TRUE/FALSE is a number, only the
/// strings "true"/"false" are `Boolean`.
pub fn classify_data_type(value: &CellValue) -> DataType {
    match value {
        CellValue::Empty => DataType::Text,
        CellValue::Number(_) | CellValue::Bool(_) => DataType::Number,
        CellValue::Text(s) => classify_text(s),
    }
}

fn classify_text(s: &str) -> DataType {
    if s.eq_ignore_ascii_case("true") || s.eq_ignore_ascii_case("false") {
        DataType::Boolean
    } else if s.contains('%') {
        DataType::Percentage
    } else if s.contains('$') || s.contains("USD") || s.contains("SAR") {
        DataType::Currency
    } else if iso_date_prefix_re().is_match(s) {
        DataType::Date
    } else {
        DataType::Text
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn text(s: &str) -> CellValue {
        CellValue::Text(s.to_string())
    }

    #[test]
    fn test_empty_is_text() {
        assert_eq!(classify_data_type(&CellValue::Empty), DataType::Text);
    }

    #[test]
    fn test_percentage_string_and_plain_number() {
        assert_eq!(classify_data_type(&text("45%")), DataType::Percentage);
        assert_eq!(classify_data_type(&CellValue::Number(45.0)), DataType::Number);
    }

    #[test]
    fn test_boolean_strings() {
        assert_eq!(classify_data_type(&text("TRUE")), DataType::Boolean);
        assert_eq!(classify_data_type(&text("False")), DataType::Boolean);
        assert_eq!(classify_data_type(&text(" true")), DataType::Text);
        assert_eq!(classify_data_type(&CellValue::Bool(true)), DataType::Number);
    }

    #[test]
    fn test_currency_markers() {
        assert_eq!(classify_data_type(&text("$1,200")), DataType::Currency);
        assert_eq!(classify_data_type(&text("1200 USD")), DataType::Currency);
        assert_eq!(classify_data_type(&text("SAR 5m")), DataType::Currency);
        assert_eq!(classify_data_type(&text("usd 5")), DataType::Text);
    }

    #[test]
    fn test_priority_percentage_before_currency() {
        assert_eq!(classify_data_type(&text("5% of $10")), DataType::Percentage);
    }

    #[test]
    fn test_iso_date_prefix() {
        assert_eq!(classify_data_type(&text("2024-01-31")), DataType::Date);
        assert_eq!(classify_data_type(&text("2024-01-31T10:00")), DataType::Date);
        assert_eq!(classify_data_type(&text("on 2024-01-31")), DataType::Text);
        assert_eq!(classify_data_type(&text("31/01/2024")), DataType::Text);
    }

    #[test]
    fn test_formula_text_is_classified_as_written() {
        assert_eq!(classify_data_type(&text("=A1*10%")), DataType::Percentage);
        assert_eq!(classify_data_type(&text("=A1+B1")), DataType::Text);
    }
}

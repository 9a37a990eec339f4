//! Flat export of an analysis: metadata, one row per section, one row per field.

use modelscan_grid::CellValue;
use serde::Serialize;
use std::io::Write;

use crate::classify::DataType;
use crate::error::Result;
use crate::model::{AnalysisResult, FieldKind};

#[derive(Clone, Debug, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ExportMetadata {
    pub sheet_count: usize,
    pub total_fields: usize,
    pub input_field_count: usize,
    pub calculated_field_count: usize,
    pub timestamp: String,
}

#[derive(Clone, Debug, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ExportSection {
    pub id: String,
    pub name: String,
    pub sheet: String,
    pub row: usize,
    pub field_count: usize,
}

#[derive(Clone, Debug, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ExportField {
    pub id: String,
    pub name: String,
    pub sheet: String,
    pub row: usize,
    pub column: String,
    pub kind: FieldKind,
    pub data_type: DataType,
    pub value: CellValue,
    pub formula: Option<String>,
    pub is_named_cell: bool,
    pub named_cell_ref: Option<String>,
    pub required: bool,
    pub unit: Option<String>,
    pub section: String,
    pub heading: String,
}

#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct ExportDocument {
    pub metadata: ExportMetadata,
    pub sections: Vec<ExportSection>,
    pub fields: Vec<ExportField>,
}

impl From<&AnalysisResult> for ExportDocument {
    fn from(analysis: &AnalysisResult) -> Self {
        let metadata = ExportMetadata {
            sheet_count: analysis.sheet_count,
            total_fields: analysis.total_fields,
            input_field_count: analysis.input_field_count,
            calculated_field_count: analysis.calculated_field_count,
            timestamp: analysis.timestamp.clone(),
        };

        let sections = analysis
            .sections
            .iter()
            .map(|s| ExportSection {
                id: s.id.clone(),
                name: s.name.clone(),
                sheet: s.sheet.clone(),
                row: s.row,
                field_count: s.fields.len(),
            })
            .collect();

        let fields = analysis
            .fields()
            .map(|f| ExportField {
                id: f.id.clone(),
                name: f.name.clone(),
                sheet: f.sheet.clone(),
                row: f.row,
                column: f.column.clone(),
                kind: f.kind,
                data_type: f.data_type,
                value: f.value.clone(),
                formula: f.formula.clone(),
                is_named_cell: f.is_named_cell,
                named_cell_ref: f.named_cell_ref.clone(),
                required: f.required,
                unit: f.unit.clone(),
                section: f.section_id.clone(),
                heading: f.heading_name.clone(),
            })
            .collect();

        ExportDocument {
            metadata,
            sections,
            fields,
        }
    }
}

const FIELD_COLUMNS: &[&str] = &[
    "id",
    "name",
    "sheet",
    "row",
    "column",
    "kind",
    "dataType",
    "value",
    "formula",
    "isNamedCell",
    "namedCellRef",
    "required",
    "unit",
    "section",
    "heading",
];

/// Write one CSV line per field, with a header line.
pub fn write_fields_csv<W: Write>(out: &mut W, doc: &ExportDocument) -> Result<()> {
    writeln!(out, "{}", FIELD_COLUMNS.join(","))?;
    for f in &doc.fields {
        let row = [
            f.id.clone(),
            f.name.clone(),
            f.sheet.clone(),
            f.row.to_string(),
            f.column.clone(),
            f.kind.to_string(),
            f.data_type.to_string(),
            f.value.to_string(),
            f.formula.clone().unwrap_or_default(),
            f.is_named_cell.to_string(),
            f.named_cell_ref.clone().unwrap_or_default(),
            f.required.to_string(),
            f.unit.clone().unwrap_or_default(),
            f.section.clone(),
            f.heading.clone(),
        ];
        let escaped: Vec<String> = row.iter().map(|v| escape_csv_field(v)).collect();
        writeln!(out, "{}", escaped.join(","))?;
    }
    Ok(())
}

/// Escape a field for CSV output
fn escape_csv_field(field: &str) -> String {
    // Guard against CSV formula injection in spreadsheet apps.
    let first_non_space = field.trim_start_matches([' ', '\t']).chars().next();
    let safe_field = if matches!(first_non_space, Some('=' | '+' | '-' | '@')) {
        format!("'{}", field)
    } else {
        field.to_string()
    };

    if safe_field.contains(',')
        || safe_field.contains('"')
        || safe_field.contains('\n')
        || safe_field.contains('\r')
    {
        format!("\"{}\"", safe_field.replace('"', "\"\""))
    } else {
        safe_field
    }
}

//! Plain-text summary of an analysis.

use modelscan_core::{AnalysisResult, FieldKind};
use std::fmt::Write;

/// Render `analysis` of the workbook at `source` as an indented outline:
/// sections, then each field with its heading, kind and data type.
pub fn render_summary(
    analysis: &AnalysisResult,
    source: &str,
) -> Result<String, std::fmt::Error> {
    let mut out = String::new();
    write_summary(&mut out, analysis, source)?;
    Ok(out)
}

fn write_summary(out: &mut String, analysis: &AnalysisResult, source: &str) -> std::fmt::Result {
    writeln!(out, "Workbook: {}", source)?;
    writeln!(
        out,
        "Sheets: {}  Sections: {}  Fields: {} ({} input, {} calculated)",
        analysis.sheet_count,
        analysis.sections.len(),
        analysis.total_fields,
        analysis.input_field_count,
        analysis.calculated_field_count
    )?;
    writeln!(out, "Analyzed: {}", analysis.timestamp)?;

    for section in &analysis.sections {
        writeln!(out)?;
        writeln!(
            out,
            "[{}] {} {} (row {})",
            section.sheet, section.id, section.name, section.row
        )?;
        if section.fields.is_empty() {
            writeln!(out, "  (no fields)")?;
            continue;
        }
        let mut heading: Option<&str> = None;
        for field in &section.fields {
            if heading != Some(field.heading_name.as_str()) {
                writeln!(out, "  {}", field.heading_name)?;
                heading = Some(field.heading_name.as_str());
            }
            let kind = match field.kind {
                FieldKind::Input => "input",
                FieldKind::Calculated => "calc",
            };
            let named = if field.is_named_cell { " *" } else { "" };
            writeln!(
                out,
                "    {:<6} {:<5} {:<10} {}{}",
                field.column, kind, field.data_type, field.name, named
            )?;
        }
    }

    if !analysis.formula_pattern_counts.is_empty() {
        writeln!(out)?;
        writeln!(out, "Formula patterns:")?;
        for (pattern, count) in &analysis.formula_pattern_counts {
            writeln!(out, "  {:<10} {}", pattern, count)?;
        }
    }
    Ok(())
}

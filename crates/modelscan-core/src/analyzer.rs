//! Workbook layout scan.
//!
//! Each sheet is scanned row by row with a two-state machine:
//!
//! - no section open: only section headers are looked for; everything else
//!   is skipped.
//! - section open: a section header closes it and opens the next one, a
//!   heading opens a heading group, any other row may yield a field.
//!
//! The open section is flushed at the end of the sheet. Totals and the
//! formula-pattern table are accumulated across all sheets.

use chrono::{SecondsFormat, Utc};
use modelscan_grid::{CellGrid, Workbook};
use std::collections::BTreeMap;
use tracing::{debug, info};

use crate::classify::{RowClassifier, RowKind, classify_formula};
use crate::config::ScanConfig;
use crate::detect::FieldDetector;
use crate::error::{Result, ScanError};
use crate::model::{AnalysisResult, FieldKind, Section};

#[derive(Clone, Debug)]
pub struct WorkbookAnalyzer {
    rows: RowClassifier,
    fields: FieldDetector,
    max_cells: Option<usize>,
}

enum ScanState {
    NoSection,
    InSection {
        section: Section,
        heading: Option<String>,
    },
}

impl WorkbookAnalyzer {
    pub fn new(config: &ScanConfig) -> Self {
        WorkbookAnalyzer {
            rows: RowClassifier::new(config),
            fields: FieldDetector::new(config),
            max_cells: config.max_cells,
        }
    }

    /// Analyze every sheet of `workbook`, stamping the result with the current time.
    pub fn analyze(&self, workbook: &Workbook) -> Result<AnalysisResult> {
        let timestamp = Utc::now().to_rfc3339_opts(SecondsFormat::Millis, true);
        self.analyze_at(workbook, timestamp)
    }

    /// Analyze with a caller-supplied timestamp.
    ///
    /// Fails only when the workbook is larger than the configured scan budget.
    pub fn analyze_at(&self, workbook: &Workbook, timestamp: String) -> Result<AnalysisResult> {
        if let Some(limit) = self.max_cells {
            let cells = workbook.cell_count();
            if cells > limit {
                return Err(ScanError::GridTooLarge { cells, limit });
            }
        }

        info!(sheets = workbook.len(), "analyzing workbook");

        let mut result = AnalysisResult {
            sheet_count: workbook.len(),
            total_fields: 0,
            input_field_count: 0,
            calculated_field_count: 0,
            sections: Vec::new(),
            formula_pattern_counts: BTreeMap::new(),
            timestamp,
        };

        let mut next_section_id = 1;
        for sheet in workbook.sheets() {
            for section in self.analyze_sheet(sheet, &mut next_section_id) {
                for field in &section.fields {
                    result.total_fields += 1;
                    match field.kind {
                        FieldKind::Input => result.input_field_count += 1,
                        FieldKind::Calculated => result.calculated_field_count += 1,
                    }
                    if let Some(formula) = field.formula.as_deref() {
                        *result
                            .formula_pattern_counts
                            .entry(classify_formula(formula))
                            .or_insert(0) += 1;
                    }
                }
                result.sections.push(section);
            }
        }

        info!(
            sections = result.sections.len(),
            fields = result.total_fields,
            "analysis complete"
        );
        Ok(result)
    }

    /// Scan one sheet. Section ids continue from `next_section_id`, which is
    /// advanced past every section opened here.
    pub fn analyze_sheet(&self, sheet: &dyn CellGrid, next_section_id: &mut usize) -> Vec<Section> {
        debug!(
            sheet = sheet.name(),
            rows = sheet.max_row(),
            columns = sheet.max_column(),
            "scanning sheet"
        );

        let mut sections = Vec::new();
        let mut state = ScanState::NoSection;

        for row_num in 1..=sheet.max_row() {
            let row = sheet.row(row_num);

            state = match (self.rows.classify(&row), state) {
                (RowKind::SectionHeader(name), previous) => {
                    if let ScanState::InSection { section, .. } = previous {
                        sections.push(section);
                    }
                    let id = format!("section_{}", *next_section_id);
                    *next_section_id += 1;
                    ScanState::InSection {
                        section: Section::new(id, &name, row_num, sheet.name()),
                        heading: None,
                    }
                }
                (RowKind::Heading(name), ScanState::InSection { mut section, .. }) => {
                    section.headings.open(&name);
                    ScanState::InSection {
                        section,
                        heading: Some(name),
                    }
                }
                (RowKind::None, ScanState::InSection { mut section, heading }) => {
                    if let Some(field) =
                        self.fields
                            .detect(&row, sheet.name(), &section.id, heading.as_deref())
                    {
                        section.push_field(field, heading.as_deref());
                    }
                    ScanState::InSection { section, heading }
                }
                (_, ScanState::NoSection) => ScanState::NoSection,
            };
        }

        if let ScanState::InSection { section, .. } = state {
            sections.push(section);
        }

        debug!(sheet = sheet.name(), sections = sections.len(), "sheet scanned");
        sections
    }
}

impl Default for WorkbookAnalyzer {
    fn default() -> Self {
        WorkbookAnalyzer::new(&ScanConfig::default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::classify::FormulaPattern;
    use modelscan_grid::{Cell, Sheet};

    fn sheet(name: &str, cells: &[(&str, &str)]) -> Sheet {
        let mut sheet = Sheet::new(name);
        for (coordinate, input) in cells {
            assert!(sheet.set(coordinate, Cell::from_input(input)));
        }
        sheet
    }

    fn analyze(sheets: Vec<Sheet>) -> AnalysisResult {
        let workbook = Workbook::try_from(sheets).unwrap();
        WorkbookAnalyzer::default()
            .analyze_at(&workbook, "2026-01-01T00:00:00.000Z".to_string())
            .unwrap()
    }

    // More than five words and no section vocabulary: never a header or heading.
    const LONG_LABEL: &str = "Number of months between signing and close";

    #[test]
    fn test_rows_before_first_section_are_skipped() {
        let result = analyze(vec![sheet(
            "Inputs",
            &[
                ("A1", "=B1*2"),
                ("B1", LONG_LABEL),
                ("A3", "PROJECT COST ASSUMPTIONS"),
                ("A4", "=B4/12"),
                ("B4", "24"),
                ("C4", LONG_LABEL),
            ],
        )]);
        assert_eq!(result.sections.len(), 1);
        let section = &result.sections[0];
        assert_eq!(section.name, "PROJECT COST ASSUMPTIONS");
        assert_eq!(section.row, 3);
        assert_eq!(section.fields.len(), 1);
        assert_eq!(section.fields[0].row, 4);
        assert_eq!(result.total_fields, 1);
    }

    #[test]
    fn test_section_closes_on_next_header_and_sheet_end() {
        let result = analyze(vec![sheet(
            "Inputs",
            &[
                ("A1", "PROJECT COST ASSUMPTIONS"),
                ("A3", "DEBT"),
                ("A5", "TAXES"),
            ],
        )]);
        let rows: Vec<_> = result.sections.iter().map(|s| s.row).collect();
        assert_eq!(rows, vec![1, 3, 5]);
        let ids: Vec<_> = result.sections.iter().map(|s| s.id.as_str()).collect();
        assert_eq!(ids, vec!["section_1", "section_2", "section_3"]);
    }

    #[test]
    fn test_heading_rows_group_fields() {
        let result = analyze(vec![sheet(
            "Inputs",
            &[
                ("A1", "DEBT ASSUMPTIONS"),
                ("B2", "=INDEX(Inputs!A1:A5,2)"),
                ("C2", LONG_LABEL),
                ("A3", "Senior Loan"),
                ("B4", "=IF(A1>0,B1,0)"),
                ("C4", "Margin over the base rate during the build"),
            ],
        )]);
        let section = &result.sections[0];
        assert_eq!(section.fields.len(), 2);
        assert_eq!(section.fields[0].heading_name, "general");
        assert_eq!(section.fields[0].name, LONG_LABEL);
        assert_eq!(section.fields[1].heading_name, "Senior Loan");

        let heading = section.headings.get("Senior Loan").unwrap();
        assert_eq!(heading.id, "senior_loan");
        assert_eq!(heading.fields.len(), 1);
        assert_eq!(heading.fields[0].id, "field_4");
    }

    #[test]
    fn test_totals_and_pattern_counts_span_sheets() {
        let result = analyze(vec![
            sheet(
                "Inputs",
                &[
                    ("A1", "REVENUE"),
                    ("A2", "=INDEX(A1:A2,1)"),
                    ("B2", LONG_LABEL),
                    ("A3", "$12.5m per year with annual escalation"),
                    ("B3", LONG_LABEL),
                ],
            ),
            sheet(
                "Calc",
                &[
                    ("A1", "CALCULATIONS"),
                    ("A2", "=A1+B2"),
                    ("B2", LONG_LABEL),
                    ("A3", "=EDATE(A1,1)"),
                    ("C3", LONG_LABEL),
                ],
            ),
        ]);
        assert_eq!(result.sheet_count, 2);
        assert_eq!(result.total_fields, 4);
        assert_eq!(result.calculated_field_count, 3);
        assert_eq!(result.input_field_count, 1);
        assert_eq!(result.formula_pattern_counts.get(&FormulaPattern::Index), Some(&1));
        assert_eq!(result.formula_pattern_counts.get(&FormulaPattern::Arithmetic), Some(&1));
        assert_eq!(result.formula_pattern_counts.get(&FormulaPattern::Edate), Some(&1));
        assert_eq!(result.formula_pattern_counts.get(&FormulaPattern::If), None);

        let input = &result.sections[0].fields[1];
        assert_eq!(input.kind, FieldKind::Input);
        assert_eq!(input.data_type, crate::classify::DataType::Currency);

        assert_eq!(result.sections[1].sheet, "Calc");
        assert_eq!(result.sections[1].id, "section_2");
        // Field ids are per-row, so they repeat across sheets.
        assert_eq!(result.sections[0].fields[0].id, result.sections[1].fields[0].id);
    }

    #[test]
    fn test_label_left_of_formula_names_the_formula() {
        let result = analyze(vec![sheet(
            "Inputs",
            &[
                ("A1", "PROJECT COST ASSUMPTIONS"),
                ("A2", LONG_LABEL),
                ("B2", "=B1*12"),
            ],
        )]);
        assert_eq!(result.total_fields, 1);
        assert_eq!(result.calculated_field_count, 1);
        let field = &result.sections[0].fields[0];
        assert_eq!(field.column, "B2");
        assert_eq!(field.name, LONG_LABEL);
        assert_eq!(field.kind, FieldKind::Calculated);
        assert_eq!(result.formula_pattern_counts.get(&FormulaPattern::Arithmetic), Some(&1));
    }

    #[test]
    fn test_row_without_label_is_silently_skipped() {
        let result = analyze(vec![sheet(
            "Inputs",
            &[("A1", "PROJECT"), ("A2", "=B2*2"), ("B2", "12")],
        )]);
        assert_eq!(result.sections.len(), 1);
        assert!(result.sections[0].fields.is_empty());
        assert_eq!(result.total_fields, 0);
    }

    #[test]
    fn test_scan_budget() {
        let workbook = Workbook::try_from(vec![sheet("Inputs", &[("J100", "1")])]).unwrap();
        let config = ScanConfig {
            max_cells: Some(999),
            ..ScanConfig::default()
        };
        let err = WorkbookAnalyzer::new(&config).analyze(&workbook).unwrap_err();
        assert!(matches!(err, ScanError::GridTooLarge { cells: 1000, limit: 999 }));

        let config = ScanConfig {
            max_cells: Some(1000),
            ..ScanConfig::default()
        };
        assert!(WorkbookAnalyzer::new(&config).analyze(&workbook).is_ok());
    }

    #[test]
    fn test_empty_workbook() {
        let result = analyze(Vec::new());
        assert_eq!(result.sheet_count, 0);
        assert!(result.sections.is_empty());
        assert_eq!(result.timestamp, "2026-01-01T00:00:00.000Z");
    }
}

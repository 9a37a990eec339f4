//! The structured layout produced by an analysis.

use modelscan_grid::CellValue;
use serde::ser::SerializeMap;
use serde::{Serialize, Serializer};
use std::collections::BTreeMap;
use std::fmt;

use crate::classify::{DataType, FormulaPattern};

/// Heading name used for fields found before any heading opens in a section.
pub const GENERAL_HEADING: &str = "general";

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum FieldKind {
    Input,
    Calculated,
}

impl fmt::Display for FieldKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            FieldKind::Input => "input",
            FieldKind::Calculated => "calculated",
        })
    }
}

/// One input or calculated value extracted from a row.
#[derive(Clone, Debug, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Field {
    /// `field_<row>`; unique within a sheet only, see `sheet`.
    pub id: String,
    pub name: String,
    pub row: usize,
    /// Coordinate of the trigger cell, e.g. "C10".
    pub column: String,
    pub kind: FieldKind,
    pub data_type: DataType,
    pub value: CellValue,
    pub formula: Option<String>,
    pub is_named_cell: bool,
    pub named_cell_ref: Option<String>,
    /// Reserved; always false.
    pub required: bool,
    /// Reserved; always None.
    pub unit: Option<String>,
    #[serde(rename = "section")]
    pub section_id: String,
    #[serde(rename = "heading")]
    pub heading_name: String,
    pub sheet: String,
}

/// Reference from a heading group to a field owned by the same section.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct FieldRef {
    pub id: String,
    /// Position in the owning section's `fields`.
    pub index: usize,
}

#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct HeadingGroup {
    pub id: String,
    pub name: String,
    pub fields: Vec<FieldRef>,
}

impl HeadingGroup {
    pub fn new(name: &str) -> Self {
        HeadingGroup {
            id: name.to_lowercase().replace(' ', "_"),
            name: name.to_string(),
            fields: Vec::new(),
        }
    }
}

/// Heading groups keyed by name, in the order they were first opened.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct Headings(Vec<HeadingGroup>);

impl Headings {
    /// Register `name`. Re-opening an existing name clears its fields but
    /// keeps its original position.
    pub fn open(&mut self, name: &str) -> &mut HeadingGroup {
        let idx = match self.0.iter().position(|h| h.name == name) {
            Some(idx) => {
                self.0[idx] = HeadingGroup::new(name);
                idx
            }
            None => {
                self.0.push(HeadingGroup::new(name));
                self.0.len() - 1
            }
        };
        &mut self.0[idx]
    }

    pub fn get(&self, name: &str) -> Option<&HeadingGroup> {
        self.0.iter().find(|h| h.name == name)
    }

    pub fn get_mut(&mut self, name: &str) -> Option<&mut HeadingGroup> {
        self.0.iter_mut().find(|h| h.name == name)
    }

    pub fn iter(&self) -> impl Iterator<Item = &HeadingGroup> {
        self.0.iter()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl Serialize for Headings {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.0.len()))?;
        for heading in &self.0 {
            map.serialize_entry(&heading.name, heading)?;
        }
        map.end()
    }
}

#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct Section {
    pub id: String,
    pub name: String,
    pub row: usize,
    pub sheet: String,
    pub headings: Headings,
    pub fields: Vec<Field>,
}

impl Section {
    pub fn new(id: String, name: &str, row: usize, sheet: &str) -> Self {
        Section {
            id,
            name: name.to_string(),
            row,
            sheet: sheet.to_string(),
            headings: Headings::default(),
            fields: Vec::new(),
        }
    }

    /// Append a field, linking it from `heading` when that group exists.
    pub fn push_field(&mut self, field: Field, heading: Option<&str>) {
        let field_ref = FieldRef {
            id: field.id.clone(),
            index: self.fields.len(),
        };
        self.fields.push(field);
        if let Some(group) = heading.and_then(|name| self.headings.get_mut(name)) {
            group.fields.push(field_ref);
        }
    }

    /// Resolve a heading group's references to the fields they point at.
    pub fn heading_fields<'a>(&'a self, heading: &'a HeadingGroup) -> impl Iterator<Item = &'a Field> {
        heading.fields.iter().filter_map(|r| self.fields.get(r.index))
    }
}

#[derive(Clone, Debug, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AnalysisResult {
    pub sheet_count: usize,
    pub total_fields: usize,
    pub input_field_count: usize,
    pub calculated_field_count: usize,
    pub sections: Vec<Section>,
    pub formula_pattern_counts: BTreeMap<FormulaPattern, usize>,
    /// ISO-8601 time the analysis finished.
    pub timestamp: String,
}

impl AnalysisResult {
    pub fn fields(&self) -> impl Iterator<Item = &Field> {
        self.sections.iter().flat_map(|s| s.fields.iter())
    }

    pub fn to_json_pretty(&self) -> serde_json::Result<String> {
        serde_json::to_string_pretty(self)
    }
}

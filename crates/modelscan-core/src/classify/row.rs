//! Row classification: section header, heading, or neither.

use modelscan_grid::SheetCell;

use crate::config::ScanConfig;

/// What a row opens, if anything.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum RowKind {
    SectionHeader(String),
    Heading(String),
    None,
}

/// Decides whether a row opens a section or a heading.
///
/// The whole row is checked for a section header before any cell is
/// considered as a heading, so a row yields at most one kind.
#[derive(Clone, Debug)]
pub struct RowClassifier {
    keywords: Vec<String>,
    reference_prefix: String,
}

impl RowClassifier {
    pub fn new(config: &ScanConfig) -> Self {
        RowClassifier {
            keywords: config
                .section_keywords
                .iter()
                .map(|k| k.to_lowercase())
                .collect(),
            reference_prefix: config.reference_prefix.clone(),
        }
    }

    pub fn classify(&self, row: &[SheetCell]) -> RowKind {
        if let Some(name) = self.section_header(row) {
            return RowKind::SectionHeader(name);
        }
        match self.heading(row) {
            Some(name) => RowKind::Heading(name),
            None => RowKind::None,
        }
    }

    /// First cell whose trimmed text qualifies as a section header.
    pub fn section_header(&self, row: &[SheetCell]) -> Option<String> {
        row.iter()
            .filter_map(|cell| cell.value.as_text())
            .map(str::trim)
            .find(|text| {
                is_label_text(text, 3, &self.reference_prefix)
                    && (is_upper(text) || self.has_keyword(text))
            })
            .map(str::to_string)
    }

    /// First cell whose trimmed text qualifies as a heading (at most five words).
    pub fn heading(&self, row: &[SheetCell]) -> Option<String> {
        row.iter()
            .filter_map(|cell| cell.value.as_text())
            .map(str::trim)
            .find(|text| {
                is_label_text(text, 2, &self.reference_prefix)
                    && text.split_whitespace().count() <= 5
            })
            .map(str::to_string)
    }

    fn has_keyword(&self, text: &str) -> bool {
        let lower = text.to_lowercase();
        self.keywords.iter().any(|k| lower.contains(k.as_str()))
    }
}

/// Shared text gate for headers, headings and field labels: longer than
/// `min_len` characters, not all digits, not a formula, and not starting
/// with the reserved reference prefix. `text` must already be trimmed.
pub(crate) fn is_label_text(text: &str, min_len: usize, reference_prefix: &str) -> bool {
    text.chars().count() > min_len
        && !text.chars().all(|c| c.is_ascii_digit())
        && !text.starts_with('=')
        && (reference_prefix.is_empty() || !text.starts_with(reference_prefix))
}

/// At least one cased character and no lower-case ones.
fn is_upper(text: &str) -> bool {
    text.chars().any(char::is_uppercase) && !text.chars().any(char::is_lowercase)
}

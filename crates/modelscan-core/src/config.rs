//! Scan configuration: the section-header vocabulary and scan limits.
//!
//! Loaded from `config.toml`, either an explicit path or the user config
//! directory. Problems never abort a scan; they come back as warnings and
//! the built-in defaults stay in effect.

use directories::ProjectDirs;
use serde::Deserialize;
use std::path::{Path, PathBuf};

use crate::error::ScanError;

const MAX_CONFIG_FILE_BYTES: u64 = 1_048_576; // 1 MiB
const MAX_SECTION_KEYWORDS: usize = 1_024;

/// Built-in section-header vocabulary (matched as lower-case substrings).
pub const DEFAULT_SECTION_KEYWORDS: &[&str] = &[
    "project",
    "cost",
    "debt",
    "equity",
    "revenue",
    "tax",
    "capacity",
    "technical",
    "operation",
    "construction",
    "financing",
    "macroeconomic",
    "assumption",
    "input",
    "output",
    "calculation",
    "timeline",
    "sponsor",
    "plant",
    "tariff",
    "sensitivity",
    "structure",
    "working",
    "capital",
    "performance",
    "service",
    "accounting",
    "liquidated",
    "damages",
];

/// Text starting with this prefix is never a header, heading or label.
pub const DEFAULT_REFERENCE_PREFIX: &str = "F";

#[derive(Clone, Debug, PartialEq)]
pub struct ScanConfig {
    /// Lower-case vocabulary; a cell containing any of these opens a section.
    pub section_keywords: Vec<String>,
    /// Reserved reference prefix. Empty disables the rule.
    pub reference_prefix: String,
    /// Upper bound on `rows × columns` summed over all sheets.
    pub max_cells: Option<usize>,
}

impl Default for ScanConfig {
    fn default() -> Self {
        ScanConfig {
            section_keywords: DEFAULT_SECTION_KEYWORDS
                .iter()
                .map(|k| k.to_string())
                .collect(),
            reference_prefix: DEFAULT_REFERENCE_PREFIX.to_string(),
            max_cells: None,
        }
    }
}

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
struct ConfigFile {
    scan: Option<ScanSection>,
}

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
struct ScanSection {
    section_keywords: Option<Vec<String>>,
    extra_section_keywords: Option<Vec<String>>,
    reference_prefix: Option<String>,
    max_cells: Option<usize>,
}

impl ScanConfig {
    /// Parse a config document. Keywords are trimmed, lower-cased and de-duplicated.
    pub fn from_toml_str(content: &str) -> crate::error::Result<Self> {
        let file: ConfigFile =
            toml::from_str(content).map_err(|e| ScanError::Config(e.to_string()))?;
        let mut config = ScanConfig::default();
        let Some(scan) = file.scan else {
            return Ok(config);
        };

        if let Some(keywords) = scan.section_keywords {
            config.section_keywords = keywords;
        }
        if let Some(extra) = scan.extra_section_keywords {
            config.section_keywords.extend(extra);
        }
        config.section_keywords = normalize_keywords(config.section_keywords);
        if config.section_keywords.len() > MAX_SECTION_KEYWORDS {
            return Err(ScanError::Config(format!(
                "too many section keywords ({}, max {})",
                config.section_keywords.len(),
                MAX_SECTION_KEYWORDS
            )));
        }

        if let Some(prefix) = scan.reference_prefix {
            config.reference_prefix = prefix;
        }
        config.max_cells = scan.max_cells.or(config.max_cells);
        Ok(config)
    }
}

fn normalize_keywords(keywords: Vec<String>) -> Vec<String> {
    let mut out: Vec<String> = Vec::with_capacity(keywords.len());
    for keyword in keywords {
        let keyword = keyword.trim().to_lowercase();
        if !keyword.is_empty() && !out.contains(&keyword) {
            out.push(keyword);
        }
    }
    out
}

/// Load the scan config from `config_file` or the user config directory.
///
/// Returns the config together with any warnings collected on the way.
pub fn load_config(config_file: Option<&Path>) -> (ScanConfig, Vec<String>) {
    let mut warnings: Vec<String> = Vec::new();
    let config_path = config_file.map(Path::to_path_buf).or_else(user_config_path);

    let Some(path) = config_path.as_ref() else {
        return (ScanConfig::default(), warnings);
    };

    if !path.exists() {
        if config_file.is_some() {
            let warning = format!("Config file not found: {}", path.display());
            tracing::warn!("{}", warning);
            warnings.push(warning);
        }
        return (ScanConfig::default(), warnings);
    }

    let config = match std::fs::metadata(path) {
        Ok(meta) if meta.len() > MAX_CONFIG_FILE_BYTES => {
            warnings.push(format!(
                "Refusing to read {}: file too large ({} bytes, max {})",
                path.display(),
                meta.len(),
                MAX_CONFIG_FILE_BYTES
            ));
            None
        }
        Ok(_) => match std::fs::read_to_string(path) {
            Ok(content) => match ScanConfig::from_toml_str(&content) {
                Ok(parsed) => Some(parsed),
                Err(err) => {
                    warnings.push(format!("Failed to parse {}: {}", path.display(), err));
                    None
                }
            },
            Err(err) => {
                warnings.push(format!("Failed to read {}: {}", path.display(), err));
                None
            }
        },
        Err(err) => {
            warnings.push(format!(
                "Failed to read metadata for {}: {}",
                path.display(),
                err
            ));
            None
        }
    };

    for warning in &warnings {
        tracing::warn!("{}", warning);
    }
    (config.unwrap_or_default(), warnings)
}

/// `<config_dir>/modelscan/config.toml`, if a home directory is known.
pub fn user_config_path() -> Option<PathBuf> {
    let proj = ProjectDirs::from("", "", "modelscan")?;
    let mut path = proj.config_dir().to_path_buf();
    path.push("config.toml");
    Some(path)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_default_vocabulary() {
        let config = ScanConfig::default();
        assert!(config.section_keywords.iter().any(|k| k == "sensitivity"));
        assert_eq!(config.reference_prefix, "F");
        assert_eq!(config.max_cells, None);
    }

    #[test]
    fn test_replace_and_extend_keywords() {
        let config = ScanConfig::from_toml_str(
            r#"
[scan]
section_keywords = ["Opex", " capex ", "opex"]
extra_section_keywords = ["Dividend"]
reference_prefix = ""
max_cells = 5000
"#,
        )
        .unwrap();
        assert_eq!(config.section_keywords, vec!["opex", "capex", "dividend"]);
        assert_eq!(config.reference_prefix, "");
        assert_eq!(config.max_cells, Some(5000));
    }

    #[test]
    fn test_missing_scan_table_keeps_defaults() {
        let config = ScanConfig::from_toml_str("").unwrap();
        assert_eq!(config, ScanConfig::default());
    }

    #[test]
    fn test_unknown_field_is_rejected() {
        let err = ScanConfig::from_toml_str("[scan]\nkeywords = []\n").unwrap_err();
        assert!(matches!(err, ScanError::Config(ref m) if m.contains("unknown field")));
        assert_eq!(err.kind(), crate::error::ErrorKind::InternalAnalysisError);
    }

    #[test]
    fn test_too_many_keywords_is_rejected() {
        let keywords: Vec<String> = (0..=MAX_SECTION_KEYWORDS).map(|i| format!("\"k{}\"", i)).collect();
        let content = format!("[scan]\nsection_keywords = [{}]\n", keywords.join(", "));
        let err = ScanConfig::from_toml_str(&content).unwrap_err();
        assert!(err.to_string().starts_with("Config error: too many section keywords"));
    }

    #[test]
    fn test_load_config_missing_explicit_file_warns() {
        let path = std::env::temp_dir().join("modelscan_config_does_not_exist.toml");
        let (config, warnings) = load_config(Some(&path));
        assert_eq!(config, ScanConfig::default());
        assert_eq!(warnings.len(), 1);
        assert!(warnings[0].contains("not found"));
    }

    #[test]
    fn test_load_config_from_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "[scan]\nextra_section_keywords = [\"opex\"]").unwrap();
        let (config, warnings) = load_config(Some(file.path()));
        assert!(warnings.is_empty());
        assert!(config.section_keywords.iter().any(|k| k == "opex"));
        assert!(config.section_keywords.iter().any(|k| k == "project"));
    }

    #[test]
    fn test_load_config_malformed_falls_back() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "[scan\nbroken").unwrap();
        let (config, warnings) = load_config(Some(file.path()));
        assert_eq!(config, ScanConfig::default());
        assert!(warnings[0].starts_with("Failed to parse"));
    }
}

//! Workbook loaders: .grd text grids, CSV and (with the `xlsx` feature)
//! binary spreadsheet formats.

mod csv;
mod grd;
#[cfg(feature = "xlsx")]
mod xlsx;

pub use csv::{parse_csv, parse_csv_content};
pub use grd::{parse_grd, parse_grd_content};
#[cfg(feature = "xlsx")]
pub use xlsx::parse_xlsx;

use modelscan_grid::Workbook;
use std::path::Path;
use tracing::info;

use crate::error::{Result, ScanError};

const MAX_WORKBOOK_FILE_BYTES: u64 = 256 * 1_048_576; // 256 MiB

#[cfg(feature = "xlsx")]
const SPREADSHEET_EXTENSIONS: &[&str] = &["xlsx", "xlsm", "xlsb", "xls", "ods"];

/// Load a workbook, choosing the decoder from the file extension.
pub fn load_workbook(path: &Path) -> Result<Workbook> {
    let display = path.display().to_string();
    let meta = std::fs::metadata(path).map_err(|e| ScanError::WorkbookUnreadable {
        path: display.clone(),
        reason: e.to_string(),
    })?;
    if meta.len() > MAX_WORKBOOK_FILE_BYTES {
        return Err(ScanError::WorkbookUnreadable {
            path: display,
            reason: format!(
                "file too large ({} bytes, limit {} bytes)",
                meta.len(),
                MAX_WORKBOOK_FILE_BYTES
            ),
        });
    }

    let ext = path
        .extension()
        .map(|e| e.to_string_lossy().to_ascii_lowercase())
        .unwrap_or_default();

    let workbook = match ext.as_str() {
        "grd" => parse_grd(path)?,
        "csv" => Workbook::try_from(vec![parse_csv(path)?])?,
        #[cfg(feature = "xlsx")]
        e if SPREADSHEET_EXTENSIONS.contains(&e) => parse_xlsx(path)?,
        "" => return Err(ScanError::UnsupportedFormat(display)),
        other => return Err(ScanError::UnsupportedFormat(format!(".{}", other))),
    };

    info!(path = %path.display(), sheets = workbook.len(), "loaded workbook");
    Ok(workbook)
}

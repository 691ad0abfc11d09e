//! Spreadsheet export
//!
//! [`XlsxExporter`] renders the whole workbook in memory, then moves it into
//! place through a temporary file in the output directory, so a failed run
//! never leaves a partial spreadsheet behind.

use super::sanitize::CellSanitizer;
use crate::config::ExportConfig;
use crate::domain::record::{Column, FlatRecord};
use crate::domain::{DjenError, Result};
use chrono::{Local, NaiveDateTime};
use rust_xlsxwriter::{Format, Workbook};
use std::io::{ErrorKind, Write};
use std::path::{Path, PathBuf};
use tempfile::NamedTempFile;

/// Worksheet row limit, header included
const MAX_ROWS: usize = 1_048_576;

/// Attempts at finding a free file name before giving up
const MAX_NAME_ATTEMPTS: u32 = 1000;

/// Consumer of projected records
///
/// Implementations write one file per call and keep no state between calls.
pub trait TabularSink: Send + Sync {
    /// Writes `records` and returns the name of the file produced
    ///
    /// # Errors
    ///
    /// Fails with [`DjenError::Export`] when `records` is empty; no file is
    /// created in that case.
    fn export(&self, records: &[FlatRecord]) -> Result<String>;
}

/// Shape of an export, logged before writing
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct DataStatistics {
    pub total_records: usize,
    pub total_columns: usize,
    /// Longest cell in characters, before sanitation
    pub largest_cell_size: usize,
}

impl DataStatistics {
    pub fn compute(records: &[FlatRecord]) -> Self {
        if records.is_empty() {
            return Self::default();
        }

        let largest_cell_size = records
            .iter()
            .flat_map(|record| Column::ALL.iter().map(move |c| record.value(*c)))
            .map(|value| value.chars().count())
            .max()
            .unwrap_or(0);

        Self {
            total_records: records.len(),
            total_columns: Column::ALL.len(),
            largest_cell_size,
        }
    }
}

/// File name for an export started at `timestamp`
///
/// ```
/// use chrono::NaiveDate;
/// use djen::core::export::file_name_for;
///
/// let ts = NaiveDate::from_ymd_opt(2024, 3, 5).unwrap().and_hms_opt(14, 7, 9).unwrap();
/// assert_eq!(file_name_for("comunicacoes_djen", ts, 0), "comunicacoes_djen_2024-03-05_14-07-09.xlsx");
/// assert_eq!(file_name_for("comunicacoes_djen", ts, 2), "comunicacoes_djen_2024-03-05_14-07-09_2.xlsx");
/// ```
pub fn file_name_for(prefix: &str, timestamp: NaiveDateTime, suffix: u32) -> String {
    let stamp = timestamp.format("%Y-%m-%d_%H-%M-%S");
    if suffix == 0 {
        format!("{prefix}_{stamp}.xlsx")
    } else {
        format!("{prefix}_{stamp}_{suffix}.xlsx")
    }
}

/// Writes `.xlsx` files with the fixed column layout
#[derive(Debug, Clone)]
pub struct XlsxExporter {
    output_dir: PathBuf,
    file_prefix: String,
    sheet_name: String,
}

impl XlsxExporter {
    pub fn new(
        output_dir: impl Into<PathBuf>,
        file_prefix: impl Into<String>,
        sheet_name: impl Into<String>,
    ) -> Self {
        Self {
            output_dir: output_dir.into(),
            file_prefix: file_prefix.into(),
            sheet_name: sheet_name.into(),
        }
    }

    /// Create from the `[export]` section
    pub fn from_config(config: &ExportConfig) -> Self {
        Self::new(&config.output_dir, &config.file_prefix, &config.sheet_name)
    }

    pub fn output_dir(&self) -> &Path {
        &self.output_dir
    }

    /// Renders the workbook into memory
    fn render(&self, records: &[FlatRecord]) -> Result<Vec<u8>> {
        let sanitizer = CellSanitizer::new()?;
        let header_format = Format::new().set_bold();

        let mut workbook = Workbook::new();
        let worksheet = workbook.add_worksheet();
        worksheet.set_name(&self.sheet_name)?;

        for (col, column) in Column::ALL.iter().enumerate() {
            let col = col as u16;
            worksheet.write_string_with_format(0, col, column.header(), &header_format)?;
            worksheet.set_column_width(col, column.width())?;
        }
        worksheet.set_freeze_panes(1, 0)?;

        let mut truncated_cells = 0usize;
        for (idx, record) in records.iter().enumerate() {
            let row = (idx + 1) as u32;
            for (col, column) in Column::ALL.iter().enumerate() {
                let (value, truncated) = sanitizer.clean(record.value(*column));
                if truncated {
                    truncated_cells += 1;
                    tracing::warn!(
                        row = row,
                        column = column.header(),
                        original_chars = record.value(*column).chars().count(),
                        "Cell exceeds spreadsheet limit, truncated"
                    );
                }
                worksheet.write_string(row, col as u16, value)?;
            }
        }

        if truncated_cells > 0 {
            tracing::info!(truncated_cells = truncated_cells, "Oversized cells truncated");
        }

        Ok(workbook.save_to_buffer()?)
    }

    /// Persists `buffer` under the first free file name
    fn persist(&self, buffer: &[u8]) -> Result<(String, PathBuf)> {
        std::fs::create_dir_all(&self.output_dir).map_err(|e| {
            DjenError::Export(format!(
                "Failed to create output directory {}: {}",
                self.output_dir.display(),
                e
            ))
        })?;

        let write_error = |e: std::io::Error| {
            DjenError::Export(format!(
                "Failed to write spreadsheet in {}: {e}",
                self.output_dir.display()
            ))
        };
        let mut temp_file = NamedTempFile::new_in(&self.output_dir).map_err(write_error)?;
        temp_file.write_all(buffer).map_err(write_error)?;
        temp_file.flush().map_err(write_error)?;

        let timestamp = Local::now().naive_local();
        for suffix in 0..MAX_NAME_ATTEMPTS {
            let file_name = file_name_for(&self.file_prefix, timestamp, suffix);
            let path = self.output_dir.join(&file_name);
            if path.exists() {
                continue;
            }

            match temp_file.persist_noclobber(&path) {
                Ok(_) => return Ok((file_name, path)),
                Err(e) if e.error.kind() == ErrorKind::AlreadyExists => {
                    temp_file = e.file;
                }
                Err(e) => {
                    return Err(DjenError::Export(format!(
                        "Failed to write {}: {}",
                        path.display(),
                        e.error
                    )))
                }
            }
        }

        Err(DjenError::Export(format!(
            "No free file name for prefix '{}' in {}",
            self.file_prefix,
            self.output_dir.display()
        )))
    }
}

impl TabularSink for XlsxExporter {
    fn export(&self, records: &[FlatRecord]) -> Result<String> {
        if records.is_empty() {
            return Err(DjenError::Export("No records to export".to_string()));
        }

        if records.len() >= MAX_ROWS {
            return Err(DjenError::Export(format!(
                "{} records exceed the worksheet row limit",
                records.len()
            )));
        }

        let stats = DataStatistics::compute(records);
        tracing::info!(
            records = stats.total_records,
            columns = stats.total_columns,
            largest_cell = stats.largest_cell_size,
            "Generating spreadsheet"
        );

        let buffer = self.render(records)?;
        let (file_name, path) = self.persist(&buffer)?;

        tracing::info!(
            file = %path.display(),
            bytes = buffer.len(),
            "Spreadsheet written"
        );

        Ok(file_name)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn record(id: &str) -> FlatRecord {
        FlatRecord {
            id: id.to_string(),
            court: "TJRJ".to_string(),
            text: "Intimação\r\n\r\n\r\n\r\nFim".to_string(),
            source: "Consulta Manual".to_string(),
            ..Default::default()
        }
    }

    #[test]
    fn test_statistics() {
        let mut long = record("2");
        long.text = "x".repeat(500);
        let stats = DataStatistics::compute(&[record("1"), long]);
        assert_eq!(stats.total_records, 2);
        assert_eq!(stats.total_columns, 16);
        assert_eq!(stats.largest_cell_size, 500);
        assert_eq!(DataStatistics::compute(&[]), DataStatistics::default());
    }

    #[test]
    fn test_export_writes_xlsx() {
        let dir = TempDir::new().unwrap();
        let exporter = XlsxExporter::new(dir.path(), "comunicacoes_djen", "Comunicações DJEN");

        let file_name = exporter.export(&[record("1"), record("2")]).unwrap();
        assert!(file_name.starts_with("comunicacoes_djen_"));
        assert!(file_name.ends_with(".xlsx"));

        let bytes = std::fs::read(dir.path().join(&file_name)).unwrap();
        assert_eq!(&bytes[..2], b"PK");
    }

    #[test]
    fn test_export_empty_creates_no_file() {
        let dir = TempDir::new().unwrap();
        let exporter = XlsxExporter::new(dir.path(), "comunicacoes_djen", "Comunicações DJEN");

        let err = exporter.export(&[]).unwrap_err();
        assert!(matches!(err, DjenError::Export(_)));
        assert_eq!(std::fs::read_dir(dir.path()).unwrap().count(), 0);
    }

    #[test]
    fn test_repeated_exports_do_not_overwrite() {
        let dir = TempDir::new().unwrap();
        let exporter = XlsxExporter::new(dir.path(), "run", "Sheet");

        let first = exporter.export(&[record("1")]).unwrap();
        let second = exporter.export(&[record("2")]).unwrap();
        assert_ne!(first, second);
        assert_eq!(std::fs::read_dir(dir.path()).unwrap().count(), 2);
    }

    #[cfg(target_os = "linux")]
    #[test]
    fn test_unwritable_output_dir_is_export_error() {
        // procfs directories exist but reject new files
        let exporter = XlsxExporter::new("/proc/self", "run", "Sheet");

        let err = exporter.export(&[record("1")]).unwrap_err();
        assert!(matches!(err, DjenError::Export(_)), "got {err:?}");
    }

    #[test]
    fn test_invalid_sheet_name_fails_without_file() {
        let dir = TempDir::new().unwrap();
        let exporter = XlsxExporter::new(dir.path(), "run", "bad[name]");

        assert!(exporter.export(&[record("1")]).is_err());
        assert_eq!(std::fs::read_dir(dir.path()).unwrap().count(), 0);
    }
}

//! Spreadsheet export
//!
//! - [`sanitize`] - cell cleaning and the per-cell size limit
//! - [`xlsx`] - the [`TabularSink`] port and its `.xlsx` implementation

pub mod sanitize;
pub mod xlsx;

pub use sanitize::{CellSanitizer, CELL_TRUNCATE_CHARS, CELL_TRUNCATION_MARKER, MAX_CELL_CHARS};
pub use xlsx::{file_name_for, DataStatistics, TabularSink, XlsxExporter};

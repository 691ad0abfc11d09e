//! Cell sanitation for spreadsheet output

use crate::domain::{DjenError, Result};
use regex::Regex;

/// Largest string a spreadsheet cell can hold
pub const MAX_CELL_CHARS: usize = 32_767;

/// Length kept when a cell exceeds [`MAX_CELL_CHARS`]
pub const CELL_TRUNCATE_CHARS: usize = 32_700;

/// Appended to cells cut to [`CELL_TRUNCATE_CHARS`]
pub const CELL_TRUNCATION_MARKER: &str = "... [TEXTO TRUNCADO]";

/// Cleans cell text before it is written
///
/// Control characters other than `\n` and `\t` are removed, line endings are
/// normalised to `\n`, runs of three or more newlines collapse to two, and the
/// result is trimmed. Oversized cells are then cut to fit.
#[derive(Debug, Clone)]
pub struct CellSanitizer {
    control_chars: Regex,
    blank_lines: Regex,
}

impl CellSanitizer {
    pub fn new() -> Result<Self> {
        let compile = |pattern: &str| {
            Regex::new(pattern)
                .map_err(|e| DjenError::Export(format!("Invalid sanitizer pattern: {e}")))
        };

        Ok(Self {
            control_chars: compile(r"[\x00-\x08\x0B\x0C\x0E-\x1F\x7F]")?,
            blank_lines: compile(r"\n{3,}")?,
        })
    }

    /// Returns the cleaned value and whether it had to be truncated
    pub fn clean(&self, value: &str) -> (String, bool) {
        let without_control = self.control_chars.replace_all(value, "");
        let normalised = without_control.replace("\r\n", "\n").replace('\r', "\n");
        let collapsed = self.blank_lines.replace_all(&normalised, "\n\n");
        let trimmed = collapsed.trim();

        match trimmed.char_indices().nth(MAX_CELL_CHARS) {
            Some(_) => {
                let cut = trimmed
                    .char_indices()
                    .nth(CELL_TRUNCATE_CHARS)
                    .map_or(trimmed.len(), |(idx, _)| idx);
                let mut truncated = trimmed[..cut].to_string();
                truncated.push_str(CELL_TRUNCATION_MARKER);
                (truncated, true)
            }
            None => (trimmed.to_string(), false),
        }
    }
}

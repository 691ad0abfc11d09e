//! Projection of raw notifications onto the spreadsheet columns

use crate::domain::record::{FlatRecord, RawRecord, SOURCE_FIELD};
use serde_json::Value;

/// Source label for records that did not come from a batch query
pub const MANUAL_SOURCE: &str = "Consulta Manual";

/// Appended to fields cut by the [`TruncationPolicy`]
pub const TRUNCATION_MARKER: &str = "... [TRUNCADO]";

/// Character caps applied to long text fields
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TruncationPolicy {
    pub issuing_body: usize,
    pub text: usize,
    pub class: usize,
    pub recipients: usize,
    pub attorneys: usize,
}

impl Default for TruncationPolicy {
    fn default() -> Self {
        Self {
            issuing_body: 500,
            text: 2000,
            class: 200,
            recipients: 1000,
            attorneys: 1000,
        }
    }
}

/// Cuts `value` to `max_chars` characters and appends the marker
///
/// Counts characters, not bytes.
pub fn truncate_text(value: String, max_chars: usize) -> String {
    match value.char_indices().nth(max_chars) {
        Some((byte_idx, _)) => {
            let mut truncated = value[..byte_idx].to_string();
            truncated.push_str(TRUNCATION_MARKER);
            truncated
        }
        None => value,
    }
}

/// Formats a 20-digit process number as `NNNNNNN-DD.YYYY.J.TR.OOOO`
///
/// Anything else is returned unchanged.
///
/// # Examples
///
/// ```
/// use djen::core::transform::format_process_number;
///
/// assert_eq!(format_process_number("12345678920231400001"), "1234567-89.2023.1.40.0001");
/// assert_eq!(format_process_number("123"), "123");
/// ```
pub fn format_process_number(number: &str) -> String {
    if number.len() != 20 || !number.bytes().all(|b| b.is_ascii_digit()) {
        return number.to_string();
    }

    format!(
        "{}-{}.{}.{}.{}.{}",
        &number[0..7],
        &number[7..9],
        &number[9..13],
        &number[13..14],
        &number[14..16],
        &number[16..20]
    )
}

/// Joins the non-empty names found at `path` inside each entry of `list`
fn join_names(record: &RawRecord, list: &str, paths: &[&[&str]]) -> String {
    let Some(Value::Array(entries)) = record.get(list) else {
        return String::new();
    };

    entries
        .iter()
        .filter_map(|entry| {
            paths.iter().find_map(|path| {
                path.iter()
                    .try_fold(entry, |value, key| value.get(key))
                    .and_then(Value::as_str)
                    .map(str::trim)
                    .filter(|name| !name.is_empty())
            })
        })
        .collect::<Vec<_>>()
        .join(", ")
}

/// Maps [`RawRecord`]s to [`FlatRecord`]s
#[derive(Debug, Clone, Default)]
pub struct RecordProjector {
    truncation: Option<TruncationPolicy>,
}

impl RecordProjector {
    /// Projector applying `truncation`, or none when `None`
    pub fn new(truncation: Option<TruncationPolicy>) -> Self {
        Self { truncation }
    }

    /// Projector with the default caps
    pub fn with_default_truncation() -> Self {
        Self::new(Some(TruncationPolicy::default()))
    }

    fn cap(&self, value: String, select: impl Fn(&TruncationPolicy) -> usize) -> String {
        match &self.truncation {
            Some(policy) => truncate_text(value, select(policy)),
            None => value,
        }
    }

    /// Projects one record
    pub fn project_one(&self, record: &RawRecord) -> FlatRecord {
        let field = |key: &str| record.get_str(key).unwrap_or_default();

        let recipients = join_names(record, "destinatarios", &[&["nome"]]);
        let attorneys = join_names(
            record,
            "destinatarioadvogados",
            &[&["advogado", "nome"], &["nome"]],
        );

        FlatRecord {
            id: record.id().unwrap_or_default(),
            availability_date: field("data_disponibilizacao"),
            court: field("siglaTribunal"),
            communication_type: field("tipoComunicacao"),
            issuing_body: self.cap(field("nomeOrgao"), |p| p.issuing_body),
            text: self.cap(field("texto"), |p| p.text),
            process_number: format_process_number(&field("numero_processo")),
            link: field("link"),
            document_type: field("tipoDocumento"),
            class: self.cap(field("nomeClasse"), |p| p.class),
            communication_number: field("numeroComunicacao"),
            status: field("status"),
            delivery_channel: field("meiocompleto"),
            recipients: self.cap(recipients, |p| p.recipients),
            attorneys: self.cap(attorneys, |p| p.attorneys),
            source: record
                .get_str(SOURCE_FIELD)
                .filter(|s| !s.is_empty())
                .unwrap_or_else(|| MANUAL_SOURCE.to_string()),
        }
    }

    /// Projects every record, preserving order
    pub fn project(&self, records: &[RawRecord]) -> Vec<FlatRecord> {
        tracing::debug!(count = records.len(), "Projecting records");
        records.iter().map(|r| self.project_one(r)).collect()
    }
}

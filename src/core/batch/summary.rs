//! Breakdown of a batch search

use crate::domain::errors::FetchErrorKind;
use crate::domain::record::{RawRecord, SOURCE_FIELD};
use crate::domain::DjenError;
use std::collections::BTreeMap;

/// Label used when a record lacks the grouped field
pub const UNKNOWN_LABEL: &str = "Desconhecido";

/// Record counts by source, court and communication type
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct BatchSummary {
    pub total: usize,
    pub by_source: BTreeMap<String, usize>,
    pub by_court: BTreeMap<String, usize>,
    pub by_communication_type: BTreeMap<String, usize>,
}

impl BatchSummary {
    pub fn new() -> Self {
        Self::default()
    }

    /// Builds the breakdown for `records`
    pub fn from_records(records: &[RawRecord]) -> Self {
        let mut summary = Self::new();
        for record in records {
            summary.add(record);
        }
        summary
    }

    /// Counts one record
    pub fn add(&mut self, record: &RawRecord) {
        let label = |key: &str| {
            record
                .get_str(key)
                .filter(|v| !v.trim().is_empty())
                .unwrap_or_else(|| UNKNOWN_LABEL.to_string())
        };

        self.total += 1;
        *self.by_source.entry(label(SOURCE_FIELD)).or_default() += 1;
        *self.by_court.entry(label("siglaTribunal")).or_default() += 1;
        *self
            .by_communication_type
            .entry(label("tipoComunicacao"))
            .or_default() += 1;
    }

    /// Log the summary
    pub fn log_summary(&self) {
        tracing::info!(
            total = self.total,
            by_source = ?self.by_source,
            by_court = ?self.by_court,
            by_communication_type = ?self.by_communication_type,
            "Batch search breakdown"
        );
    }
}

/// An identity whose query failed and was skipped
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IdentityFailure {
    /// Source label of the identity, e.g. `OAB 118093/RJ`
    pub label: String,

    /// Upstream error kind, `None` for validation failures
    pub kind: Option<FetchErrorKind>,

    /// Error message
    pub message: String,
}

impl IdentityFailure {
    pub fn new(label: impl Into<String>, error: &DjenError) -> Self {
        let kind = match error {
            DjenError::Fetch(e) => Some(e.kind()),
            _ => None,
        };
        Self {
            label: label.into(),
            kind,
            message: error.to_string(),
        }
    }
}

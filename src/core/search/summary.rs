//! Result of a search run

use crate::core::batch::{BatchSummary, IdentityFailure};
use crate::core::collect::StopReason;
use std::time::Duration;

/// Statistics returned to the caller after a search
#[derive(Debug, Clone, Default)]
pub struct SearchSummary {
    /// Records written (after deduplication)
    pub unique_records: usize,

    /// Records collected before deduplication
    pub original_total: usize,

    pub duplicates_removed: usize,

    /// Records dropped for lacking an identifier
    pub missing_identifier: usize,

    pub pages_processed: u32,

    pub pages_skipped: u32,

    /// Declared total, 0 when unknown
    pub expected_total: u64,

    /// Collected count matched the declared total
    pub collection_complete: bool,

    /// Why collection stopped, for single searches
    pub stop_reason: Option<StopReason>,

    /// Spreadsheet produced; `None` when nothing was found
    pub file_name: Option<String>,

    pub duration: Duration,

    /// Identities skipped during a batch search
    pub failures: Vec<IdentityFailure>,

    /// Breakdown for batch searches
    pub batch: Option<BatchSummary>,
}

impl SearchSummary {
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the duration
    pub fn with_duration(mut self, duration: Duration) -> Self {
        self.duration = duration;
        self
    }

    /// True when no records were found
    pub fn is_empty(&self) -> bool {
        self.unique_records == 0
    }

    /// Log the summary
    pub fn log_summary(&self) {
        tracing::info!(
            unique_records = self.unique_records,
            original_total = self.original_total,
            duplicates_removed = self.duplicates_removed,
            pages_processed = self.pages_processed,
            pages_skipped = self.pages_skipped,
            expected_total = self.expected_total,
            collection_complete = self.collection_complete,
            file = self.file_name.as_deref().unwrap_or("-"),
            duration_ms = self.duration.as_millis() as u64,
            "Search completed"
        );

        for failure in &self.failures {
            tracing::warn!(
                identity = %failure.label,
                kind = ?failure.kind,
                message = %failure.message,
                "Identity skipped"
            );
        }
    }
}

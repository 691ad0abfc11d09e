//! Batch search across the configured identities
//!
//! Each identity is collected by its own pagination run; one failing identity
//! never stops the others.

use super::summary::{BatchSummary, IdentityFailure};
use crate::core::collect::PaginationController;
use crate::domain::identity::{Identity, License, Party};
use crate::domain::query::DateRange;
use crate::domain::record::RawRecord;
use std::time::Duration;

/// Outcome of a batch search
#[derive(Debug, Clone, Default, PartialEq)]
pub struct BatchRunResult {
    /// Records from every successful identity, tagged with their source
    pub items: Vec<RawRecord>,
    pub summary: BatchSummary,
    pub failures: Vec<IdentityFailure>,
    /// Pages fetched across all identities
    pub pages_processed: u32,
    /// Sum of declared totals across successful identities
    pub expected_total: u64,
    pub queries_succeeded: usize,
}

impl BatchRunResult {
    /// Number of identities attempted
    pub fn total_queries(&self) -> usize {
        self.queries_succeeded + self.failures.len()
    }

    /// Whether every identity's declared total was collected
    pub fn collection_complete(&self) -> bool {
        self.items.len() as u64 == self.expected_total
    }
}

/// Runs one collection per identity over a shared date range
pub struct BatchQueryRunner {
    controller: PaginationController,
    identities: Vec<Identity>,
    inter_query_delay: Duration,
}

impl BatchQueryRunner {
    pub fn new(
        controller: PaginationController,
        identities: Vec<Identity>,
        inter_query_delay: Duration,
    ) -> Self {
        Self {
            controller,
            identities,
            inter_query_delay,
        }
    }

    /// Builds the identity list: licenses first, then parties
    pub fn identities_from(licenses: &[License], parties: &[Party]) -> Vec<Identity> {
        licenses
            .iter()
            .cloned()
            .map(Identity::License)
            .chain(parties.iter().cloned().map(Identity::Party))
            .collect()
    }

    pub fn identities(&self) -> &[Identity] {
        &self.identities
    }

    /// Collects every identity over `range`
    ///
    /// `on_progress` receives `(step, total_steps, label)` before each identity,
    /// with `step` starting at 1.
    pub async fn run<F>(&self, range: &DateRange, mut on_progress: F) -> BatchRunResult
    where
        F: FnMut(usize, usize, &str) + Send,
    {
        let total_steps = self.identities.len();
        let mut result = BatchRunResult::default();

        tracing::info!(
            identities = total_steps,
            range = %range,
            "Starting batch search"
        );

        for (idx, identity) in self.identities.iter().enumerate() {
            let label = identity.label();
            on_progress(idx + 1, total_steps, &label);

            let outcome = match identity.query(range) {
                Ok(params) => self.controller.collect(&params, |_, _| {}).await,
                Err(e) => Err(e),
            };

            match outcome {
                Ok(collection) => {
                    tracing::info!(
                        identity = %label,
                        items = collection.items.len(),
                        pages = collection.pages_processed,
                        "Identity collected"
                    );
                    result.pages_processed += collection.pages_processed;
                    result.expected_total += collection.expected_total;
                    result.queries_succeeded += 1;

                    let source_type = identity.source_type();
                    for item in collection.items {
                        let tagged = item.with_source(&label, source_type);
                        result.summary.add(&tagged);
                        result.items.push(tagged);
                    }
                }
                Err(e) => {
                    crate::log_error_with_context!(&e, label.as_str());
                    result.failures.push(IdentityFailure::new(label, &e));
                }
            }

            tokio::time::sleep(self.inter_query_delay).await;
        }

        result.summary.log_summary();
        if !result.failures.is_empty() {
            tracing::warn!(
                failed = result.failures.len(),
                succeeded = result.queries_succeeded,
                "Batch search finished with failures"
            );
        }

        result
    }
}

//! Search coordinator - runs a search from query to spreadsheet
//!
//! This module wires the collection, deduplication, projection and export
//! steps together and owns the loading indicator for the whole run.

use super::progress::{Progress, ProgressGuard, ProgressReporter};
use super::summary::SearchSummary;
use crate::adapters::comunica::{ComunicaClient, PageFetcher};
use crate::config::DjenConfig;
use crate::core::batch::BatchQueryRunner;
use crate::core::collect::{CollectorConfig, PaginationController};
use crate::core::export::{TabularSink, XlsxExporter};
use crate::core::transform::{dedupe, RecordProjector, TruncationPolicy};
use crate::domain::identity::Identity;
use crate::domain::query::{DateRange, QueryParameters};
use crate::domain::record::RawRecord;
use crate::domain::Result;
use std::sync::Arc;
use std::time::{Duration, Instant};

/// Settings for the quick search
#[derive(Debug, Clone, Default)]
pub struct QuickSearchOptions {
    pub identities: Vec<Identity>,
    pub inter_query_delay: Duration,
}

/// Search coordinator
pub struct SearchCoordinator {
    fetcher: Arc<dyn PageFetcher>,
    collector: CollectorConfig,
    projector: RecordProjector,
    sink: Arc<dyn TabularSink>,
    reporter: Arc<dyn ProgressReporter>,
    quick_search: QuickSearchOptions,
}

impl SearchCoordinator {
    pub fn new(
        fetcher: Arc<dyn PageFetcher>,
        collector: CollectorConfig,
        projector: RecordProjector,
        sink: Arc<dyn TabularSink>,
        reporter: Arc<dyn ProgressReporter>,
        quick_search: QuickSearchOptions,
    ) -> Self {
        Self {
            fetcher,
            collector,
            projector,
            sink,
            reporter,
            quick_search,
        }
    }

    /// Create a coordinator backed by the HTTP client and the `.xlsx` exporter
    ///
    /// # Errors
    ///
    /// Returns a configuration error when the API client cannot be built or a
    /// configured value cannot be parsed.
    pub fn from_config(config: &DjenConfig, reporter: Arc<dyn ProgressReporter>) -> Result<Self> {
        let fetcher = Arc::new(ComunicaClient::new(&config.api)?);
        let collector = CollectorConfig::from_config(&config.pagination)?;
        let projector = if config.export.truncate_long_fields {
            RecordProjector::new(Some(TruncationPolicy::default()))
        } else {
            RecordProjector::new(None)
        };
        let sink = Arc::new(XlsxExporter::from_config(&config.export));
        let quick_search = QuickSearchOptions {
            identities: BatchQueryRunner::identities_from(
                &config.quick_search.licenses,
                &config.quick_search.parties,
            ),
            inter_query_delay: Duration::from_millis(config.quick_search.inter_query_delay_ms),
        };

        Ok(Self::new(
            fetcher,
            collector,
            projector,
            sink,
            reporter,
            quick_search,
        ))
    }

    fn controller(&self) -> PaginationController {
        PaginationController::new(self.fetcher.clone(), self.collector.clone())
    }

    /// Execute a single search
    ///
    /// Collects every page for `params`, removes duplicates and writes the
    /// spreadsheet. No file is written when nothing is found.
    ///
    /// # Errors
    ///
    /// Returns the collection error when the run aborts, or an export error
    /// when the spreadsheet cannot be written.
    pub async fn execute_search(&self, params: &QueryParameters) -> Result<SearchSummary> {
        let start_time = Instant::now();
        let reporter = self.reporter.as_ref();
        let _guard = ProgressGuard::new(reporter);

        tracing::info!(query = %params.describe(), "Starting search");
        reporter.show("Querying DJEN...", None);

        let collection = self
            .controller()
            .collect(params, |current, expected| {
                let message = match expected {
                    Some(total) => format!("Fetching page {current} of {total}"),
                    None => format!("Fetching page {current}"),
                };
                reporter.show(&message, Some(Progress::pages(current, expected)));
            })
            .await?;

        let mut summary = SearchSummary {
            pages_processed: collection.pages_processed,
            pages_skipped: collection.pages_skipped,
            expected_total: collection.expected_total,
            collection_complete: collection.collection_complete,
            stop_reason: Some(collection.stop_reason),
            ..SearchSummary::new()
        };

        self.finish(collection.items, &mut summary)?;

        let summary = summary.with_duration(start_time.elapsed());
        summary.log_summary();
        Ok(summary)
    }

    /// Execute the quick search over the configured identities
    ///
    /// Failing identities are recorded in [`SearchSummary::failures`] and
    /// skipped; the others are still exported.
    ///
    /// # Errors
    ///
    /// Returns an export error when the spreadsheet cannot be written.
    pub async fn execute_quick_search(&self, range: &DateRange) -> Result<SearchSummary> {
        let start_time = Instant::now();
        let reporter = self.reporter.as_ref();
        let _guard = ProgressGuard::new(reporter);

        reporter.show("Running quick search...", None);

        let runner = BatchQueryRunner::new(
            self.controller(),
            self.quick_search.identities.clone(),
            self.quick_search.inter_query_delay,
        );

        let batch = runner
            .run(range, |step, total, label| {
                let message = format!("Querying {label} ({step}/{total})");
                reporter.show(&message, Some(Progress::steps(step, total, label)));
            })
            .await;

        let mut summary = SearchSummary {
            pages_processed: batch.pages_processed,
            expected_total: batch.expected_total,
            collection_complete: batch.collection_complete(),
            failures: batch.failures,
            batch: Some(batch.summary),
            ..SearchSummary::new()
        };

        self.finish(batch.items, &mut summary)?;

        let summary = summary.with_duration(start_time.elapsed());
        summary.log_summary();
        Ok(summary)
    }

    /// Deduplicates, projects and exports `items`, filling in `summary`
    fn finish(&self, items: Vec<RawRecord>, summary: &mut SearchSummary) -> Result<()> {
        self.reporter.show("Removing duplicates...", None);
        let deduplicated = dedupe(items);

        summary.original_total = deduplicated.original_total;
        summary.duplicates_removed = deduplicated.duplicates_removed;
        summary.missing_identifier = deduplicated.missing_identifier;
        summary.unique_records = deduplicated.unique_items.len();

        if deduplicated.unique_items.is_empty() {
            tracing::info!("No records found, skipping export");
            return Ok(());
        }

        self.reporter.show("Generating spreadsheet...", None);
        let rows = self.projector.project(&deduplicated.unique_items);
        summary.file_name = Some(self.sink.export(&rows)?);
        Ok(())
    }
}

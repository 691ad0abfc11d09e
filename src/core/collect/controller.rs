//! Paginated collection loop
//!
//! [`PaginationController`] walks the pages of one query until a termination
//! rule fires, retrying, skipping or aborting on failures by error kind.

use super::termination::{stop_reason, PageOutcome, StopReason, TerminationStrategy};
use crate::adapters::comunica::{DeclaredTotal, PageFetcher};
use crate::config::PaginationConfig;
use crate::domain::errors::FetchErrorKind;
use crate::domain::query::QueryParameters;
use crate::domain::record::RawRecord;
use crate::domain::Result;
use std::str::FromStr;
use std::sync::Arc;
use std::time::Duration;

/// Limits and pacing for one collection run
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CollectorConfig {
    /// Hard ceiling on pages fetched
    pub max_pages: u32,
    /// Consecutive failures tolerated; reaching it aborts
    pub max_error_retries: u32,
    /// Pause after each successful page
    pub request_delay: Duration,
    /// Pause before retrying a page after a server error
    pub retry_delay: Duration,
    pub strategy: TerminationStrategy,
}

impl CollectorConfig {
    /// Create from the `[pagination]` section
    pub fn from_config(config: &PaginationConfig) -> Result<Self> {
        Ok(Self {
            max_pages: config.max_pages,
            max_error_retries: config.max_error_retries,
            request_delay: Duration::from_millis(config.request_delay_ms),
            retry_delay: Duration::from_millis(config.retry_delay_ms),
            strategy: TerminationStrategy::from_str(&config.strategy)?,
        })
    }
}

impl Default for CollectorConfig {
    fn default() -> Self {
        Self {
            max_pages: 1000,
            max_error_retries: 3,
            request_delay: Duration::from_millis(300),
            retry_delay: Duration::from_millis(2000),
            strategy: TerminationStrategy::Adaptive,
        }
    }
}

/// Everything gathered by one run
#[derive(Debug, Clone, PartialEq)]
pub struct CollectionResult {
    pub items: Vec<RawRecord>,
    /// Pages fetched successfully
    pub pages_processed: u32,
    /// Pages given up on after a non-retryable error
    pub pages_skipped: u32,
    /// Declared item total, 0 when unknown
    pub expected_total: u64,
    pub expected_pages: Option<u32>,
    /// `items.len() == expected_total`; diagnostic only
    pub collection_complete: bool,
    pub stop_reason: StopReason,
}

/// Drives a [`PageFetcher`] across the pages of one query
pub struct PaginationController {
    fetcher: Arc<dyn PageFetcher>,
    config: CollectorConfig,
}

impl PaginationController {
    pub fn new(fetcher: Arc<dyn PageFetcher>, config: CollectorConfig) -> Self {
        Self { fetcher, config }
    }

    /// Collects every page of `params`
    ///
    /// `on_progress` receives `(current_page, expected_pages)` before every
    /// attempt, and once more on page 1 after the declared total is read.
    ///
    /// # Errors
    ///
    /// Returns the fetch error unchanged when the service is unavailable, the
    /// network fails, or the consecutive error budget is exhausted.
    pub async fn collect<F>(
        &self,
        params: &QueryParameters,
        mut on_progress: F,
    ) -> Result<CollectionResult>
    where
        F: FnMut(u32, Option<u32>) + Send,
    {
        let page_size = self.fetcher.page_size().max(1);
        let strategy = self.config.strategy;

        crate::log_collection_start!(params.describe(), page_size);

        let mut items: Vec<RawRecord> = Vec::new();
        let mut page: u32 = 1;
        let mut expected_pages: Option<u32> = None;
        let mut expected_total: Option<u64> = None;
        let mut consecutive_errors: u32 = 0;
        let mut pages_processed: u32 = 0;
        let mut pages_skipped: u32 = 0;
        let mut stop = StopReason::PageLimit;

        while page <= self.config.max_pages {
            on_progress(page, expected_pages);
            crate::log_page_progress!(page, expected_pages.unwrap_or(0));

            let result = match self.fetcher.fetch_page(params, page).await {
                Ok(result) => result,
                Err(error) => {
                    consecutive_errors += 1;
                    if consecutive_errors >= self.config.max_error_retries {
                        tracing::error!(
                            page = page,
                            errors = consecutive_errors,
                            error = %error,
                            "Error budget exhausted, aborting collection"
                        );
                        return Err(error.into());
                    }

                    match error.kind() {
                        FetchErrorKind::ServerError => {
                            crate::log_retry_attempt!(
                                consecutive_errors,
                                self.config.max_error_retries,
                                error
                            );
                            tokio::time::sleep(self.config.retry_delay).await;
                        }
                        FetchErrorKind::ServerUnavailable | FetchErrorKind::Network => {
                            tracing::error!(page = page, error = %error, "Aborting collection");
                            return Err(error.into());
                        }
                        FetchErrorKind::ClientError
                        | FetchErrorKind::InvalidResponse
                        | FetchErrorKind::UnknownServerError
                        | FetchErrorKind::Timeout => {
                            tracing::warn!(page = page, error = %error, "Skipping page");
                            pages_skipped += 1;
                            if expected_pages.is_some_and(|expected| page >= expected) {
                                stop = StopReason::ReachedExpectedPages;
                                break;
                            }
                            page += 1;
                        }
                    }
                    continue;
                }
            };

            consecutive_errors = 0;
            pages_processed += 1;

            if page == 1 && strategy.uses_declared_total() {
                match result.declared_total {
                    Some(total) if total.is_zero() => {
                        if !result.items.is_empty() {
                            tracing::warn!(
                                items = result.items.len(),
                                "Server declared zero results but returned items; ignoring them"
                            );
                        }
                        stop = StopReason::DeclaredEmpty;
                        break;
                    }
                    Some(DeclaredTotal::Items(total)) => {
                        expected_total = Some(total);
                        expected_pages =
                            Some(u32::try_from(total.div_ceil(page_size as u64)).unwrap_or(u32::MAX));
                    }
                    Some(DeclaredTotal::Pages(pages)) => {
                        expected_pages = Some(u32::try_from(pages).unwrap_or(u32::MAX));
                    }
                    None => {
                        tracing::debug!("No declared total, relying on short-page detection");
                    }
                }

                tracing::info!(
                    expected_total = expected_total.unwrap_or(0),
                    expected_pages = expected_pages.unwrap_or(0),
                    "Read declared total"
                );
                on_progress(page, expected_pages);
            }

            let page_len = result.items.len();
            items.extend(result.items);

            let outcome = PageOutcome {
                current_page: page,
                expected_pages,
                expected_total,
                accumulated: items.len(),
                page_len,
                page_size,
            };

            if let Some(reason) = stop_reason(strategy, &outcome) {
                stop = reason;
                break;
            }

            tokio::time::sleep(self.config.request_delay).await;
            page += 1;
        }

        if stop == StopReason::PageLimit {
            tracing::warn!(
                max_pages = self.config.max_pages,
                "Page limit reached before the results ended"
            );
        }

        let expected_total = expected_total.unwrap_or(0);
        let collection_complete = items.len() as u64 == expected_total;
        if expected_total > 0 && !collection_complete {
            tracing::warn!(
                collected = items.len(),
                expected_total = expected_total,
                "Collected item count differs from declared total"
            );
        }

        crate::log_collection_complete!(items.len(), pages_processed, expected_total, stop);

        Ok(CollectionResult {
            items,
            pages_processed,
            pages_skipped,
            expected_total,
            expected_pages,
            collection_complete,
            stop_reason: stop,
        })
    }
}

//! Shared helpers for the integration tests

#![allow(dead_code)]

use async_trait::async_trait;
use djen::adapters::comunica::{DeclaredTotal, PageFetcher, PageResult};
use djen::core::collect::{CollectorConfig, TerminationStrategy};
use djen::domain::{FetchError, QueryParameters, RawRecord};
use serde_json::json;
use std::collections::VecDeque;
use std::sync::Mutex;
use std::time::Duration;
use tokio::time::Instant;

pub type PageResponse = Result<PageResult, FetchError>;

/// Fetcher that replays scripted responses in order
///
/// Once the script runs out it keeps answering with `fallback`, or with an
/// empty page when none is set.
pub struct ScriptedFetcher {
    page_size: usize,
    responses: Mutex<VecDeque<PageResponse>>,
    fallback: Option<PageResponse>,
    calls: Mutex<Vec<(Option<String>, u32)>>,
    call_times: Mutex<Vec<Instant>>,
}

impl ScriptedFetcher {
    pub fn new(page_size: usize, responses: Vec<PageResponse>) -> Self {
        Self {
            page_size,
            responses: Mutex::new(responses.into()),
            fallback: None,
            calls: Mutex::new(Vec::new()),
            call_times: Mutex::new(Vec::new()),
        }
    }

    pub fn with_fallback(mut self, fallback: PageResponse) -> Self {
        self.fallback = Some(fallback);
        self
    }

    /// Pages requested so far
    pub fn pages_requested(&self) -> Vec<u32> {
        self.calls.lock().unwrap().iter().map(|(_, p)| *p).collect()
    }

    /// `(party or license number, page)` for every request
    pub fn calls(&self) -> Vec<(Option<String>, u32)> {
        self.calls.lock().unwrap().clone()
    }

    /// Milliseconds from `start` to each request
    pub fn call_offsets_ms(&self, start: Instant) -> Vec<u128> {
        self.call_times
            .lock()
            .unwrap()
            .iter()
            .map(|t| t.duration_since(start).as_millis())
            .collect()
    }
}

#[async_trait]
impl PageFetcher for ScriptedFetcher {
    async fn fetch_page(&self, params: &QueryParameters, page: u32) -> PageResponse {
        let who = params
            .party_name()
            .or(params.license_number())
            .map(str::to_string);
        self.calls.lock().unwrap().push((who, page));
        self.call_times.lock().unwrap().push(Instant::now());

        let next = self.responses.lock().unwrap().pop_front();
        match next {
            Some(response) => response,
            None => self
                .fallback
                .clone()
                .unwrap_or_else(|| Ok(PageResult::default())),
        }
    }

    fn page_size(&self) -> usize {
        self.page_size
    }
}

pub fn record(id: u64) -> RawRecord {
    RawRecord::from_value(json!({
        "id": id,
        "siglaTribunal": "TJRJ",
        "tipoComunicacao": "Intimação",
        "numero_processo": "12345678920231400001",
        "texto": format!("Comunicação {id}"),
    }))
    .unwrap()
}

/// A page holding records `ids`
pub fn page(ids: std::ops::Range<u64>, total: Option<DeclaredTotal>) -> PageResponse {
    Ok(PageResult::new(ids.map(record).collect(), total))
}

pub fn fast_config(strategy: TerminationStrategy) -> CollectorConfig {
    CollectorConfig {
        max_pages: 50,
        max_error_retries: 3,
        request_delay: Duration::ZERO,
        retry_delay: Duration::ZERO,
        strategy,
    }
}

pub fn party_query(name: &str) -> QueryParameters {
    QueryParameters::builder()
        .party_name(name)
        .start_date("2024-01-01")
        .end_date("2024-01-31")
        .build()
        .unwrap()
}

//! HTTP client for the communications endpoint
//!
//! This module provides the [`PageFetcher`] trait the pagination loop depends on
//! and its `reqwest` implementation, [`ComunicaClient`].

use super::models::{parse_page, PageResult, TotalCountFields};
use crate::config::ApiConfig;
use crate::domain::errors::{DjenError, FetchError};
use crate::domain::query::{QueryParameters, DATE_FORMAT};
use crate::domain::Result;
use async_trait::async_trait;
use reqwest::header::{ACCEPT, USER_AGENT};
use reqwest::{Client, ClientBuilder};
use std::time::Duration;
use url::Url;

/// Longest slice of an error body kept in error messages
const MAX_ERROR_BODY_CHARS: usize = 200;

/// Source of result pages
///
/// Implementations perform exactly one request per call and never retry;
/// retry policy belongs to the caller.
///
/// # Example
///
/// ```no_run
/// use djen::adapters::comunica::{ComunicaClient, PageFetcher};
/// use djen::config::ApiConfig;
/// use djen::domain::QueryParameters;
///
/// # async fn example() -> djen::domain::Result<()> {
/// let client = ComunicaClient::new(&ApiConfig::default())?;
/// let params = QueryParameters::builder().party_name("Fulano").build()?;
/// let page = client.fetch_page(&params, 1).await?;
/// println!("{} items", page.items.len());
/// # Ok(())
/// # }
/// ```
#[async_trait]
pub trait PageFetcher: Send + Sync {
    /// Fetches page `page` (1-based) for `params`
    async fn fetch_page(
        &self,
        params: &QueryParameters,
        page: u32,
    ) -> std::result::Result<PageResult, FetchError>;

    /// Number of items requested per page
    fn page_size(&self) -> usize;
}

/// `reqwest`-backed [`PageFetcher`]
#[derive(Debug, Clone)]
pub struct ComunicaClient {
    client: Client,
    base_url: Url,
    page_size: usize,
    user_agent: String,
    totals: TotalCountFields,
}

impl ComunicaClient {
    /// Create a client from the `[api]` section
    ///
    /// # Errors
    ///
    /// Returns a configuration error if the base URL cannot be parsed or the
    /// HTTP client cannot be built.
    pub fn new(config: &ApiConfig) -> Result<Self> {
        let base_url = Url::parse(&config.base_url).map_err(|e| {
            DjenError::Configuration(format!("Invalid api.base_url '{}': {e}", config.base_url))
        })?;

        let client = ClientBuilder::new()
            .timeout(Duration::from_secs(config.timeout_seconds))
            .build()
            .map_err(|e| DjenError::Configuration(format!("Failed to build HTTP client: {e}")))?;

        Ok(Self {
            client,
            base_url,
            page_size: config.page_size,
            user_agent: config.user_agent.clone(),
            totals: TotalCountFields::from_config(&config.total_count)?,
        })
    }

    /// Builds the request URL for one page
    ///
    /// Only parameters with a value are sent.
    pub fn build_url(&self, params: &QueryParameters, page: u32) -> Url {
        let mut url = self.base_url.clone();
        {
            let mut query = url.query_pairs_mut();
            query
                .append_pair("page", &page.to_string())
                .append_pair("size", &self.page_size.to_string());

            let optional = [
                ("nomeParte", params.party_name().map(str::to_string)),
                ("numeroOab", params.license_number().map(str::to_string)),
                ("ufOab", params.license_jurisdiction().map(str::to_string)),
                (
                    "dataDisponibilizacaoInicio",
                    params.start_date().map(|d| d.format(DATE_FORMAT).to_string()),
                ),
                (
                    "dataDisponibilizacaoFim",
                    params.end_date().map(|d| d.format(DATE_FORMAT).to_string()),
                ),
                ("texto", params.text().map(str::to_string)),
                ("siglaTribunal", params.court().map(str::to_string)),
            ];

            for (name, value) in optional {
                if let Some(value) = value {
                    query.append_pair(name, &value);
                }
            }
        }
        url
    }
}

/// Maps a non-success status to a [`FetchError`]
pub fn classify_status(status: u16, body: &str) -> FetchError {
    let message: String = body.chars().take(MAX_ERROR_BODY_CHARS).collect();
    match status {
        500 => FetchError::ServerError { status, message },
        502 | 503 => FetchError::ServerUnavailable { status },
        400..=499 => FetchError::ClientError { status, message },
        _ => FetchError::UnknownServerError { status, message },
    }
}

fn transport_error(err: reqwest::Error) -> FetchError {
    if err.is_timeout() {
        FetchError::Timeout(err.to_string())
    } else {
        FetchError::Network(err.to_string())
    }
}

#[async_trait]
impl PageFetcher for ComunicaClient {
    async fn fetch_page(
        &self,
        params: &QueryParameters,
        page: u32,
    ) -> std::result::Result<PageResult, FetchError> {
        let url = self.build_url(params, page);
        tracing::debug!(url = %url, page = page, "Fetching page");

        let response = self
            .client
            .get(url)
            .header(ACCEPT, "application/json")
            .header(USER_AGENT, &self.user_agent)
            .send()
            .await
            .map_err(transport_error)?;

        let status = response.status();
        let body = response.text().await.map_err(transport_error)?;

        if !status.is_success() {
            tracing::debug!(status = status.as_u16(), page = page, "Non-success response");
            return Err(classify_status(status.as_u16(), &body));
        }

        parse_page(&body, &self.totals)
    }

    fn page_size(&self) -> usize {
        self.page_size
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use test_case::test_case;

    fn client() -> ComunicaClient {
        ComunicaClient::new(&ApiConfig {
            base_url: "https://comunicaapi.example.com/api/v1/comunicacao".to_string(),
            ..ApiConfig::default()
        })
        .unwrap()
    }

    #[test]
    fn test_build_url_with_license() {
        let params = QueryParameters::builder()
            .license_number("118093")
            .license_jurisdiction("RJ")
            .start_date("2024-01-01")
            .end_date("2024-01-31")
            .build()
            .unwrap();

        let url = client().build_url(&params, 3);
        assert_eq!(
            url.as_str(),
            "https://comunicaapi.example.com/api/v1/comunicacao?page=3&size=100\
             &numeroOab=118093&ufOab=RJ\
             &dataDisponibilizacaoInicio=2024-01-01&dataDisponibilizacaoFim=2024-01-31"
        );
    }

    #[test]
    fn test_build_url_encodes_values() {
        let params = QueryParameters::builder()
            .party_name("42.789.521/0001-10")
            .text("citação urgente")
            .court("TJRJ")
            .build()
            .unwrap();

        let url = client().build_url(&params, 1);
        let pairs: Vec<(String, String)> = url.query_pairs().into_owned().collect();
        assert!(pairs.contains(&("nomeParte".to_string(), "42.789.521/0001-10".to_string())));
        assert!(pairs.contains(&("texto".to_string(), "citação urgente".to_string())));
        assert!(pairs.contains(&("siglaTribunal".to_string(), "TJRJ".to_string())));
        assert!(!pairs.iter().any(|(k, _)| k == "numeroOab"));
    }

    #[test]
    fn test_invalid_base_url() {
        let result = ComunicaClient::new(&ApiConfig {
            base_url: "not a url".to_string(),
            ..ApiConfig::default()
        });
        assert!(matches!(result, Err(DjenError::Configuration(_))));
    }

    #[test_case(500 => matches FetchError::ServerError { status: 500, .. }; "internal error")]
    #[test_case(502 => matches FetchError::ServerUnavailable { status: 502 }; "bad gateway")]
    #[test_case(503 => matches FetchError::ServerUnavailable { status: 503 }; "unavailable")]
    #[test_case(404 => matches FetchError::ClientError { status: 404, .. }; "not found")]
    #[test_case(429 => matches FetchError::ClientError { status: 429, .. }; "rate limited")]
    #[test_case(504 => matches FetchError::UnknownServerError { status: 504, .. }; "gateway timeout")]
    #[test_case(302 => matches FetchError::UnknownServerError { status: 302, .. }; "redirect")]
    fn test_classify_status(status: u16) -> FetchError {
        classify_status(status, "body")
    }

    #[test]
    fn test_classify_status_truncates_body() {
        let body = "x".repeat(1000);
        match classify_status(500, &body) {
            FetchError::ServerError { message, .. } => assert_eq!(message.len(), 200),
            other => panic!("unexpected {other:?}"),
        }
    }
}

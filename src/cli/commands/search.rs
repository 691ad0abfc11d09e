//! Search command implementation
//!
//! This module implements the `search` command: one query, every page,
//! one spreadsheet.

use super::{load_cli_config, print_summary, report_error};
use crate::cli::progress::ConsoleProgress;
use crate::core::search::SearchCoordinator;
use crate::domain::{QueryParameters, Result};
use clap::Args;
use std::sync::Arc;

/// Arguments for the search command
#[derive(Args, Debug, Default)]
pub struct SearchArgs {
    /// Party name (person, company or CNPJ)
    #[arg(long)]
    pub party: Option<String>,

    /// OAB number of the attorney
    #[arg(long)]
    pub oab: Option<String>,

    /// State (UF) of the OAB number, required with --oab
    #[arg(long)]
    pub uf: Option<String>,

    /// First availability date (YYYY-MM-DD)
    #[arg(long)]
    pub start: Option<String>,

    /// Last availability date (YYYY-MM-DD)
    #[arg(long)]
    pub end: Option<String>,

    /// Free text contained in the notification
    #[arg(long)]
    pub text: Option<String>,

    /// Court code, e.g. TJRJ
    #[arg(long)]
    pub court: Option<String>,

    /// Directory to write the spreadsheet to
    #[arg(short, long)]
    pub output_dir: Option<String>,

    /// Keep long text fields whole
    #[arg(long)]
    pub no_truncate: bool,
}

impl SearchArgs {
    /// Builds the validated query from the arguments
    pub fn query(&self) -> Result<QueryParameters> {
        let mut builder = QueryParameters::builder();
        if let Some(party) = &self.party {
            builder = builder.party_name(party.as_str());
        }
        if let Some(oab) = &self.oab {
            builder = builder.license_number(oab.as_str());
        }
        if let Some(uf) = &self.uf {
            builder = builder.license_jurisdiction(uf.as_str());
        }
        if let Some(start) = &self.start {
            builder = builder.start_date(start.as_str());
        }
        if let Some(end) = &self.end {
            builder = builder.end_date(end.as_str());
        }
        if let Some(text) = &self.text {
            builder = builder.text(text.as_str());
        }
        if let Some(court) = &self.court {
            builder = builder.court(court.as_str());
        }
        builder.build()
    }

    /// Execute the search command
    pub async fn execute(&self, config_path: Option<&str>) -> anyhow::Result<i32> {
        tracing::info!("Starting search command");

        // Validation happens before any configuration or network work
        let params = match self.query() {
            Ok(params) => params,
            Err(e) => return Ok(report_error(&e)),
        };

        let mut config = match load_cli_config(config_path) {
            Ok(config) => config,
            Err(e) => return Ok(report_error(&e)),
        };

        if let Some(output_dir) = &self.output_dir {
            tracing::info!(output_dir = %output_dir, "Overriding output directory from CLI");
            config.export.output_dir = output_dir.clone();
        }
        if self.no_truncate {
            config.export.truncate_long_fields = false;
        }

        let coordinator =
            match SearchCoordinator::from_config(&config, Arc::new(ConsoleProgress::new())) {
                Ok(c) => c,
                Err(e) => return Ok(report_error(&e)),
            };

        println!("🔍 Searching DJEN for {}", params.describe());

        match coordinator.execute_search(&params).await {
            Ok(summary) => {
                print_summary(&summary);
                Ok(0)
            }
            Err(e) => Ok(report_error(&e)),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::DjenError;

    #[test]
    fn test_query_from_args() {
        let args = SearchArgs {
            oab: Some("118093".to_string()),
            uf: Some("rj".to_string()),
            start: Some("2024-01-01".to_string()),
            end: Some("2024-01-31".to_string()),
            ..Default::default()
        };

        let params = args.query().unwrap();
        assert_eq!(params.license_number(), Some("118093"));
        assert_eq!(params.license_jurisdiction(), Some("RJ"));
    }

    #[test]
    fn test_query_requires_criterion() {
        let args = SearchArgs {
            start: Some("2024-01-01".to_string()),
            ..Default::default()
        };
        assert!(matches!(args.query(), Err(DjenError::Validation(_))));
    }

    #[tokio::test]
    async fn test_execute_with_invalid_query_returns_validation_code() {
        let args = SearchArgs {
            oab: Some("118093".to_string()),
            ..Default::default()
        };
        assert_eq!(args.execute(None).await.unwrap(), 2);
    }
}

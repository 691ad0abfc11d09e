//! Quick search command implementation
//!
//! This module implements the `quick-search` command, which queries every
//! configured OAB number and CNPJ over one date range and exports the merged
//! result.

use super::{load_cli_config, print_summary, report_error};
use crate::cli::progress::ConsoleProgress;
use crate::core::search::SearchCoordinator;
use crate::domain::DateRange;
use clap::Args;
use std::sync::Arc;

/// Arguments for the quick-search command
#[derive(Args, Debug)]
pub struct QuickSearchArgs {
    /// First availability date (YYYY-MM-DD)
    #[arg(long)]
    pub start: String,

    /// Last availability date (YYYY-MM-DD)
    #[arg(long)]
    pub end: String,

    /// Directory to write the spreadsheet to
    #[arg(short, long)]
    pub output_dir: Option<String>,
}

impl QuickSearchArgs {
    /// Execute the quick-search command
    pub async fn execute(&self, config_path: Option<&str>) -> anyhow::Result<i32> {
        tracing::info!("Starting quick-search command");

        let range = match DateRange::parse(&self.start, &self.end) {
            Ok(range) => range,
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

        let identities = config.quick_search.licenses.len() + config.quick_search.parties.len();
        let coordinator =
            match SearchCoordinator::from_config(&config, Arc::new(ConsoleProgress::new())) {
                Ok(c) => c,
                Err(e) => return Ok(report_error(&e)),
            };

        println!("⚡ Quick search: {identities} identities, {range}");

        match coordinator.execute_quick_search(&range).await {
            Ok(summary) => {
                print_summary(&summary);
                if identities > 0 && summary.failures.len() == identities {
                    // Nothing could be queried at all
                    return Ok(4);
                }
                Ok(0)
            }
            Err(e) => Ok(report_error(&e)),
        }
    }
}

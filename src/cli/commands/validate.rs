//! Validate config command implementation
//!
//! This module implements the `validate-config` command for validating
//! the configuration file.

use super::load_cli_config;
use crate::cli::DEFAULT_CONFIG_PATH;
use clap::Args;

/// Arguments for the validate-config command
#[derive(Args, Debug)]
pub struct ValidateArgs {}

impl ValidateArgs {
    /// Execute the validate-config command
    pub async fn execute(&self, config_path: Option<&str>) -> anyhow::Result<i32> {
        let shown_path = config_path.unwrap_or(DEFAULT_CONFIG_PATH);
        tracing::info!(config_path = %shown_path, "Validating configuration");

        println!("🔍 Validating configuration file: {shown_path}");
        println!();

        // Loading also validates
        let config = match load_cli_config(config_path) {
            Ok(c) => c,
            Err(e) => {
                println!("❌ Configuration validation failed");
                println!("   Error: {e}");
                println!();
                return Ok(2); // Configuration error exit code
            }
        };

        println!("✅ Configuration is valid");
        println!();
        println!("Configuration Summary:");
        println!("  Log Level: {}", config.application.log_level);
        println!("  API: {}", config.api.base_url);
        println!("  Timeout: {}s", config.api.timeout_seconds);
        println!("  Page Size: {}", config.api.page_size);
        println!(
            "  Declared Total Fields: {:?} ({})",
            config.api.total_count.fields, config.api.total_count.unit
        );
        println!("  Termination Strategy: {}", config.pagination.strategy);
        println!("  Max Pages: {}", config.pagination.max_pages);
        println!("  Max Error Retries: {}", config.pagination.max_error_retries);
        println!(
            "  Quick Search: {} OAB numbers, {} parties",
            config.quick_search.licenses.len(),
            config.quick_search.parties.len()
        );
        println!("  Output Directory: {}", config.export.output_dir);
        println!();
        Ok(0)
    }
}

//! Init command implementation
//!
//! This module implements the `init` command for generating a sample
//! configuration file.

use clap::Args;
use std::fs;
use std::path::Path;

/// Arguments for the init command
#[derive(Args, Debug)]
pub struct InitArgs {
    /// Path where to create the configuration file
    #[arg(short, long, default_value = "djen.toml")]
    pub output: String,

    /// Overwrite existing file
    #[arg(long)]
    pub force: bool,
}

impl InitArgs {
    /// Execute the init command
    pub async fn execute(&self) -> anyhow::Result<i32> {
        tracing::info!(output = %self.output, "Initializing configuration file");

        println!("📝 Initializing djen configuration");
        println!();

        if Path::new(&self.output).exists() && !self.force {
            println!("❌ Configuration file already exists: {}", self.output);
            println!("   Use --force to overwrite");
            return Ok(2); // Configuration error exit code
        }

        match fs::write(&self.output, Self::generate_config()) {
            Ok(_) => {
                println!("✅ Configuration file created: {}", self.output);
                println!();
                println!("Next steps:");
                println!("  1. Edit {} with your OAB numbers and CNPJs", self.output);
                println!("  2. Validate configuration: djen validate-config");
                println!("  3. Run a search: djen quick-search --start 2024-01-01 --end 2024-01-31");
                println!();
                Ok(0)
            }
            Err(e) => {
                println!("❌ Failed to write configuration file");
                println!("   Error: {}", e);
                Ok(5) // Fatal error exit code
            }
        }
    }

    /// Generate the sample configuration
    pub fn generate_config() -> String {
        r#"# djen configuration file
# DJEN legal notifications collector

[application]
log_level = "info"

[api]
base_url = "https://comunicaapi.pje.jus.br/api/v1/comunicacao"
timeout_seconds = 30
page_size = 100

# Fields probed, in order, for the declared total on page 1
[api.total_count]
fields = ["count", "totalElements", "totalPages"]
unit = "items"  # items | pages

[pagination]
max_pages = 1000
max_error_retries = 3
request_delay_ms = 300
retry_delay_ms = 2000
strategy = "adaptive"  # adaptive | declared_total | short_page

[quick_search]
inter_query_delay_ms = 1000

[[quick_search.licenses]]
number = "118093"
jurisdiction = "RJ"

[[quick_search.licenses]]
number = "109055"
jurisdiction = "RJ"

[[quick_search.licenses]]
number = "232861"
jurisdiction = "RJ"

[[quick_search.parties]]
name = "42.789.521/0001-10"
kind = "CNPJ"

[[quick_search.parties]]
name = "27.659.347/0001-05"
kind = "CNPJ"

[export]
output_dir = "."
file_prefix = "comunicacoes_djen"
sheet_name = "Comunicações DJEN"
truncate_long_fields = true

[logging]
local_enabled = false
local_path = "logs"
local_rotation = "daily"  # daily | hourly | never
"#
        .to_string()
    }
}

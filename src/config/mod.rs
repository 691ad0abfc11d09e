//! Configuration management for the DJEN collector.
//!
//! # Overview
//!
//! Configuration is read from a TOML file with support for:
//! - Environment variable substitution (`${VAR_NAME}`)
//! - `DJEN_<SECTION>_<KEY>` environment overrides
//! - Default values for every setting
//! - Validation on load
//!
//! # Quick Start
//!
//! ```rust,no_run
//! use djen::config::load_config;
//!
//! # fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let config = load_config("djen.toml")?;
//! println!("API: {}", config.api.base_url);
//! println!("Page size: {}", config.api.page_size);
//! # Ok(())
//! # }
//! ```
//!
//! # Configuration Structure
//!
//! - [`ApplicationConfig`] - Log level
//! - [`ApiConfig`] - Endpoint, timeout, page size, declared-total field
//! - [`PaginationConfig`] - Page ceiling, retry budget, delays, termination strategy
//! - [`QuickSearchConfig`] - Identities searched by `quick-search`
//! - [`ExportConfig`] - Output directory, file prefix, sheet name
//! - [`LoggingConfig`] - Log file settings
//!
//! # Example Configuration
//!
//! ```toml
//! [api]
//! base_url = "https://comunicaapi.pje.jus.br/api/v1/comunicacao"
//! timeout_seconds = 30
//! page_size = 100
//!
//! [pagination]
//! strategy = "adaptive"
//!
//! [[quick_search.licenses]]
//! number = "118093"
//! jurisdiction = "RJ"
//!
//! [export]
//! output_dir = "${HOME}/djen"
//! ```

pub mod loader;
pub mod schema;

// Re-export commonly used types
pub use loader::{load_config, load_config_or_default};
pub use schema::{
    ApiConfig, ApplicationConfig, DjenConfig, ExportConfig, LoggingConfig, PaginationConfig,
    QuickSearchConfig, TotalCountConfig,
};

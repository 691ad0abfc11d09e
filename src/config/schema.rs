//! Configuration schema types
//!
//! This module defines the configuration structure for the collector. Every
//! section has defaults, so an empty file is a valid configuration.

use crate::domain::identity::{License, Party};
use serde::{Deserialize, Serialize};

/// Main configuration
///
/// This is the root configuration structure that maps to the TOML file.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct DjenConfig {
    /// Application-level settings
    #[serde(default)]
    pub application: ApplicationConfig,

    /// Notifications API settings
    #[serde(default)]
    pub api: ApiConfig,

    /// Pagination loop limits and delays
    #[serde(default)]
    pub pagination: PaginationConfig,

    /// Identities and pacing for the quick search
    #[serde(default)]
    pub quick_search: QuickSearchConfig,

    /// Spreadsheet output settings
    #[serde(default)]
    pub export: ExportConfig,

    /// Logging configuration
    #[serde(default)]
    pub logging: LoggingConfig,
}

impl DjenConfig {
    /// Validates the configuration
    ///
    /// # Errors
    ///
    /// Returns an error if any configuration values are invalid
    pub fn validate(&self) -> Result<(), String> {
        self.application.validate()?;
        self.api.validate()?;
        self.pagination.validate()?;
        self.quick_search.validate()?;
        self.export.validate()?;
        self.logging.validate()?;
        Ok(())
    }
}

/// Application-level configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApplicationConfig {
    /// Log level (trace, debug, info, warn, error)
    #[serde(default = "default_log_level")]
    pub log_level: String,
}

impl ApplicationConfig {
    fn validate(&self) -> Result<(), String> {
        let valid_levels = ["trace", "debug", "info", "warn", "error"];
        if !valid_levels.contains(&self.log_level.as_str()) {
            return Err(format!(
                "Invalid log_level '{}'. Must be one of: {}",
                self.log_level,
                valid_levels.join(", ")
            ));
        }
        Ok(())
    }
}

impl Default for ApplicationConfig {
    fn default() -> Self {
        Self {
            log_level: default_log_level(),
        }
    }
}

/// Notifications API configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApiConfig {
    /// Endpoint of the communications resource
    #[serde(default = "default_base_url")]
    pub base_url: String,

    /// Per-request timeout in seconds
    #[serde(default = "default_timeout_seconds")]
    pub timeout_seconds: u64,

    /// Items requested per page
    #[serde(default = "default_page_size")]
    pub page_size: usize,

    /// User-Agent header sent with every request
    #[serde(default = "default_user_agent")]
    pub user_agent: String,

    /// Where the declared total is read from
    #[serde(default)]
    pub total_count: TotalCountConfig,
}

impl ApiConfig {
    fn validate(&self) -> Result<(), String> {
        if !self.base_url.starts_with("http://") && !self.base_url.starts_with("https://") {
            return Err(format!(
                "api.base_url must start with http:// or https://, got '{}'",
                self.base_url
            ));
        }

        if self.timeout_seconds == 0 {
            return Err("api.timeout_seconds must be > 0".to_string());
        }

        if self.page_size == 0 || self.page_size > 1000 {
            return Err(format!(
                "api.page_size must be between 1 and 1000, got {}",
                self.page_size
            ));
        }

        self.total_count.validate()
    }
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            base_url: default_base_url(),
            timeout_seconds: default_timeout_seconds(),
            page_size: default_page_size(),
            user_agent: default_user_agent(),
            total_count: TotalCountConfig::default(),
        }
    }
}

/// Declared-total field configuration
///
/// The API has reported its total under different names over time, sometimes
/// as an item count and sometimes as a page count.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TotalCountConfig {
    /// Candidate fields, probed in order
    #[serde(default = "default_total_fields")]
    pub fields: Vec<String>,

    /// Unit of the value found: "items" or "pages"
    #[serde(default = "default_total_unit")]
    pub unit: String,
}

impl TotalCountConfig {
    fn validate(&self) -> Result<(), String> {
        if self.fields.is_empty() || self.fields.iter().any(|f| f.trim().is_empty()) {
            return Err("api.total_count.fields must list at least one field name".to_string());
        }

        let valid_units = ["items", "pages"];
        if !valid_units.contains(&self.unit.as_str()) {
            return Err(format!(
                "Invalid api.total_count.unit '{}'. Must be one of: {}",
                self.unit,
                valid_units.join(", ")
            ));
        }
        Ok(())
    }
}

impl Default for TotalCountConfig {
    fn default() -> Self {
        Self {
            fields: default_total_fields(),
            unit: default_total_unit(),
        }
    }
}

/// Pagination configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PaginationConfig {
    /// Hard ceiling on pages fetched per query
    #[serde(default = "default_max_pages")]
    pub max_pages: u32,

    /// Consecutive failures tolerated before aborting
    #[serde(default = "default_max_error_retries")]
    pub max_error_retries: u32,

    /// Pause after each successful page
    #[serde(default = "default_request_delay_ms")]
    pub request_delay_ms: u64,

    /// Pause before retrying a page after a server error
    #[serde(default = "default_retry_delay_ms")]
    pub retry_delay_ms: u64,

    /// Termination strategy: "adaptive", "declared_total" or "short_page"
    #[serde(default = "default_strategy")]
    pub strategy: String,
}

impl PaginationConfig {
    fn validate(&self) -> Result<(), String> {
        if self.max_pages == 0 {
            return Err("pagination.max_pages must be > 0".to_string());
        }

        if self.max_error_retries == 0 {
            return Err("pagination.max_error_retries must be > 0".to_string());
        }

        let valid_strategies = ["adaptive", "declared_total", "short_page"];
        if !valid_strategies.contains(&self.strategy.as_str()) {
            return Err(format!(
                "Invalid pagination.strategy '{}'. Must be one of: {}",
                self.strategy,
                valid_strategies.join(", ")
            ));
        }
        Ok(())
    }
}

impl Default for PaginationConfig {
    fn default() -> Self {
        Self {
            max_pages: default_max_pages(),
            max_error_retries: default_max_error_retries(),
            request_delay_ms: default_request_delay_ms(),
            retry_delay_ms: default_retry_delay_ms(),
            strategy: default_strategy(),
        }
    }
}

/// Quick search configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct QuickSearchConfig {
    /// Pause after each identity
    #[serde(default = "default_inter_query_delay_ms")]
    pub inter_query_delay_ms: u64,

    /// License identities, searched first
    #[serde(default = "default_licenses")]
    pub licenses: Vec<License>,

    /// Party identities, searched by name
    #[serde(default = "default_parties")]
    pub parties: Vec<Party>,
}

impl QuickSearchConfig {
    fn validate(&self) -> Result<(), String> {
        if self.licenses.is_empty() && self.parties.is_empty() {
            return Err("quick_search must list at least one license or party".to_string());
        }

        for license in &self.licenses {
            if license.number.trim().is_empty() || license.jurisdiction.trim().is_empty() {
                return Err(
                    "quick_search.licenses entries need both number and jurisdiction".to_string(),
                );
            }
        }

        if self.parties.iter().any(|p| p.name.trim().is_empty()) {
            return Err("quick_search.parties entries need a name".to_string());
        }
        Ok(())
    }
}

impl Default for QuickSearchConfig {
    fn default() -> Self {
        Self {
            inter_query_delay_ms: default_inter_query_delay_ms(),
            licenses: default_licenses(),
            parties: default_parties(),
        }
    }
}

/// Export configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ExportConfig {
    /// Directory the spreadsheet is written to
    #[serde(default = "default_output_dir")]
    pub output_dir: String,

    /// File name prefix
    #[serde(default = "default_file_prefix")]
    pub file_prefix: String,

    /// Worksheet name
    #[serde(default = "default_sheet_name")]
    pub sheet_name: String,

    /// Cap long text fields before export
    #[serde(default = "default_true")]
    pub truncate_long_fields: bool,
}

impl ExportConfig {
    fn validate(&self) -> Result<(), String> {
        if self.output_dir.trim().is_empty() {
            return Err("export.output_dir cannot be empty".to_string());
        }

        if self.file_prefix.trim().is_empty()
            || self
                .file_prefix
                .contains(|c: char| matches!(c, '/' | '\\' | ':'))
        {
            return Err(format!(
                "export.file_prefix '{}' is not a valid file name prefix",
                self.file_prefix
            ));
        }

        // Worksheet names are limited to 31 characters and cannot contain []:*?/\
        let sheet_len = self.sheet_name.chars().count();
        if sheet_len == 0
            || sheet_len > 31
            || self
                .sheet_name
                .contains(|c: char| matches!(c, '[' | ']' | ':' | '*' | '?' | '/' | '\\'))
        {
            return Err(format!(
                "export.sheet_name '{}' is not a valid worksheet name",
                self.sheet_name
            ));
        }
        Ok(())
    }
}

impl Default for ExportConfig {
    fn default() -> Self {
        Self {
            output_dir: default_output_dir(),
            file_prefix: default_file_prefix(),
            sheet_name: default_sheet_name(),
            truncate_long_fields: true,
        }
    }
}

/// Logging configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoggingConfig {
    /// Enable JSON file logging next to the console output
    #[serde(default)]
    pub local_enabled: bool,

    /// Local log file path
    #[serde(default = "default_local_path")]
    pub local_path: String,

    /// Log rotation strategy
    #[serde(default = "default_local_rotation")]
    pub local_rotation: String,
}

impl LoggingConfig {
    fn validate(&self) -> Result<(), String> {
        let valid_rotations = ["daily", "hourly", "never"];
        if !valid_rotations.contains(&self.local_rotation.as_str()) {
            return Err(format!(
                "Invalid logging.local_rotation '{}'. Must be one of: {}",
                self.local_rotation,
                valid_rotations.join(", ")
            ));
        }

        if self.local_enabled && self.local_path.trim().is_empty() {
            return Err("logging.local_path cannot be empty when local_enabled".to_string());
        }
        Ok(())
    }
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            local_enabled: false,
            local_path: default_local_path(),
            local_rotation: default_local_rotation(),
        }
    }
}

// Default value functions
fn default_log_level() -> String {
    "info".to_string()
}

fn default_base_url() -> String {
    "https://comunicaapi.pje.jus.br/api/v1/comunicacao".to_string()
}

fn default_timeout_seconds() -> u64 {
    30
}

fn default_page_size() -> usize {
    100
}

fn default_user_agent() -> String {
    format!("djen/{}", env!("CARGO_PKG_VERSION"))
}

fn default_total_fields() -> Vec<String> {
    vec![
        "count".to_string(),
        "totalElements".to_string(),
        "totalPages".to_string(),
    ]
}

fn default_total_unit() -> String {
    "items".to_string()
}

fn default_max_pages() -> u32 {
    1000
}

fn default_max_error_retries() -> u32 {
    3
}

fn default_request_delay_ms() -> u64 {
    300
}

fn default_retry_delay_ms() -> u64 {
    2000
}

fn default_strategy() -> String {
    "adaptive".to_string()
}

fn default_inter_query_delay_ms() -> u64 {
    1000
}

fn default_licenses() -> Vec<License> {
    [("118093", "RJ"), ("109055", "RJ"), ("232861", "RJ")]
        .into_iter()
        .map(|(number, jurisdiction)| License {
            number: number.to_string(),
            jurisdiction: jurisdiction.to_string(),
        })
        .collect()
}

fn default_parties() -> Vec<Party> {
    ["42.789.521/0001-10", "27.659.347/0001-05"]
        .into_iter()
        .map(|name| Party {
            name: name.to_string(),
            kind: "CNPJ".to_string(),
        })
        .collect()
}

fn default_output_dir() -> String {
    ".".to_string()
}

fn default_file_prefix() -> String {
    "comunicacoes_djen".to_string()
}

fn default_sheet_name() -> String {
    "Comunicações DJEN".to_string()
}

fn default_true() -> bool {
    true
}

fn default_local_path() -> String {
    "logs".to_string()
}

fn default_local_rotation() -> String {
    "daily".to_string()
}

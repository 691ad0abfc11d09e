//! Configuration loader with TOML parsing and environment variable overrides

use super::schema::DjenConfig;
use crate::domain::errors::DjenError;
use crate::domain::result::Result;
use regex::Regex;
use std::fs;
use std::path::Path;

/// Loads configuration from a TOML file
///
/// This function:
/// 1. Reads the TOML file
/// 2. Performs environment variable substitution (${VAR} syntax)
/// 3. Parses the TOML into DjenConfig
/// 4. Applies environment variable overrides (DJEN_* prefix)
/// 5. Validates the configuration
///
/// # Errors
///
/// Returns an error if:
/// - File cannot be read
/// - TOML parsing fails
/// - A referenced environment variable is not set
/// - Configuration validation fails
///
/// # Examples
///
/// ```no_run
/// use djen::config::loader::load_config;
///
/// let config = load_config("djen.toml").expect("Failed to load config");
/// ```
pub fn load_config(path: impl AsRef<Path>) -> Result<DjenConfig> {
    let path = path.as_ref();

    if !path.exists() {
        return Err(DjenError::Configuration(format!(
            "Configuration file not found: {}",
            path.display()
        )));
    }

    let contents = fs::read_to_string(path).map_err(|e| {
        DjenError::Configuration(format!(
            "Failed to read configuration file {}: {}",
            path.display(),
            e
        ))
    })?;

    let contents = substitute_env_vars(&contents)?;

    let config: DjenConfig = toml::from_str(&contents)
        .map_err(|e| DjenError::Configuration(format!("Failed to parse TOML: {}", e)))?;

    finalize(config)
}

/// Loads `path` if it exists, otherwise starts from the built-in defaults
///
/// Used for the default config location so the CLI works without a file.
/// Environment overrides and validation apply either way.
pub fn load_config_or_default(path: impl AsRef<Path>) -> Result<DjenConfig> {
    let path = path.as_ref();
    if path.exists() {
        return load_config(path);
    }

    tracing::debug!(path = %path.display(), "Config file not found, using defaults");
    finalize(DjenConfig::default())
}

fn finalize(mut config: DjenConfig) -> Result<DjenConfig> {
    apply_env_overrides(&mut config)?;

    config.validate().map_err(|e| {
        DjenError::Configuration(format!("Configuration validation failed: {}", e))
    })?;

    Ok(config)
}

/// Substitutes environment variables in the format ${VAR_NAME}
///
/// Comment lines are left untouched.
///
/// # Errors
///
/// Returns an error if a referenced environment variable is not set
fn substitute_env_vars(input: &str) -> Result<String> {
    let re = Regex::new(r"\$\{([A-Z_][A-Z0-9_]*)\}")
        .map_err(|e| DjenError::Configuration(format!("Invalid substitution pattern: {e}")))?;
    let mut lines = Vec::new();
    let mut missing_vars: Vec<String> = Vec::new();

    for line in input.lines() {
        if line.trim_start().starts_with('#') {
            lines.push(line.to_string());
            continue;
        }

        let mut processed_line = line.to_string();
        for cap in re.captures_iter(line) {
            let var_name = &cap[1];
            match std::env::var(var_name) {
                Ok(value) => {
                    let placeholder = format!("${{{}}}", var_name);
                    processed_line = processed_line.replace(&placeholder, &value);
                }
                Err(_) => {
                    if !missing_vars.iter().any(|v| v == var_name) {
                        missing_vars.push(var_name.to_string());
                    }
                }
            }
        }
        lines.push(processed_line);
    }

    if !missing_vars.is_empty() {
        return Err(DjenError::Configuration(format!(
            "Missing required environment variables: {}",
            missing_vars.join(", ")
        )));
    }

    Ok(lines.join("\n"))
}

fn parse_override<T: std::str::FromStr>(name: &str, value: &str) -> Result<T> {
    value.trim().parse().map_err(|_| {
        DjenError::Configuration(format!("Invalid value '{}' for {}", value, name))
    })
}

/// Applies environment variable overrides using the DJEN_* prefix
///
/// Environment variables follow the pattern: DJEN_<SECTION>_<KEY>
/// For example: DJEN_API_BASE_URL, DJEN_PAGINATION_MAX_PAGES
fn apply_env_overrides(config: &mut DjenConfig) -> Result<()> {
    // Application overrides
    if let Ok(val) = std::env::var("DJEN_APPLICATION_LOG_LEVEL") {
        config.application.log_level = val;
    }

    // API overrides
    if let Ok(val) = std::env::var("DJEN_API_BASE_URL") {
        config.api.base_url = val;
    }
    if let Ok(val) = std::env::var("DJEN_API_TIMEOUT_SECONDS") {
        config.api.timeout_seconds = parse_override("DJEN_API_TIMEOUT_SECONDS", &val)?;
    }
    if let Ok(val) = std::env::var("DJEN_API_PAGE_SIZE") {
        config.api.page_size = parse_override("DJEN_API_PAGE_SIZE", &val)?;
    }
    if let Ok(val) = std::env::var("DJEN_API_USER_AGENT") {
        config.api.user_agent = val;
    }
    if let Ok(val) = std::env::var("DJEN_API_TOTAL_COUNT_UNIT") {
        config.api.total_count.unit = val;
    }

    // Pagination overrides
    if let Ok(val) = std::env::var("DJEN_PAGINATION_MAX_PAGES") {
        config.pagination.max_pages = parse_override("DJEN_PAGINATION_MAX_PAGES", &val)?;
    }
    if let Ok(val) = std::env::var("DJEN_PAGINATION_MAX_ERROR_RETRIES") {
        config.pagination.max_error_retries =
            parse_override("DJEN_PAGINATION_MAX_ERROR_RETRIES", &val)?;
    }
    if let Ok(val) = std::env::var("DJEN_PAGINATION_REQUEST_DELAY_MS") {
        config.pagination.request_delay_ms =
            parse_override("DJEN_PAGINATION_REQUEST_DELAY_MS", &val)?;
    }
    if let Ok(val) = std::env::var("DJEN_PAGINATION_RETRY_DELAY_MS") {
        config.pagination.retry_delay_ms = parse_override("DJEN_PAGINATION_RETRY_DELAY_MS", &val)?;
    }
    if let Ok(val) = std::env::var("DJEN_PAGINATION_STRATEGY") {
        config.pagination.strategy = val;
    }

    // Quick search overrides
    if let Ok(val) = std::env::var("DJEN_QUICK_SEARCH_INTER_QUERY_DELAY_MS") {
        config.quick_search.inter_query_delay_ms =
            parse_override("DJEN_QUICK_SEARCH_INTER_QUERY_DELAY_MS", &val)?;
    }

    // Export overrides
    if let Ok(val) = std::env::var("DJEN_EXPORT_OUTPUT_DIR") {
        config.export.output_dir = val;
    }
    if let Ok(val) = std::env::var("DJEN_EXPORT_FILE_PREFIX") {
        config.export.file_prefix = val;
    }
    if let Ok(val) = std::env::var("DJEN_EXPORT_TRUNCATE_LONG_FIELDS") {
        config.export.truncate_long_fields = val.parse().unwrap_or(true);
    }

    // Logging overrides
    if let Ok(val) = std::env::var("DJEN_LOGGING_LOCAL_ENABLED") {
        config.logging.local_enabled = val.parse().unwrap_or(false);
    }
    if let Ok(val) = std::env::var("DJEN_LOGGING_LOCAL_PATH") {
        config.logging.local_path = val;
    }
    if let Ok(val) = std::env::var("DJEN_LOGGING_LOCAL_ROTATION") {
        config.logging.local_rotation = val;
    }

    Ok(())
}

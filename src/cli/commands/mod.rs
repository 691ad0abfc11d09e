//! CLI command implementations
//!
//! Commands return process exit codes:
//! - 0: success, including searches that found nothing
//! - 2: configuration or validation error
//! - 4: the notifications API could not be queried
//! - 5: fatal error (export, I/O)

pub mod init;
pub mod quick_search;
pub mod search;
pub mod validate;

use super::DEFAULT_CONFIG_PATH;
use crate::config::{load_config, load_config_or_default, DjenConfig};
use crate::core::search::SearchSummary;
use crate::domain::{DjenError, Result};

/// Loads the configuration the way every command does
///
/// An explicit path must exist; the default path is optional.
pub fn load_cli_config(config_path: Option<&str>) -> Result<DjenConfig> {
    match config_path {
        Some(path) => load_config(path),
        None => load_config_or_default(DEFAULT_CONFIG_PATH),
    }
}

/// Exit code for an error
pub fn exit_code_for(error: &DjenError) -> i32 {
    match error {
        DjenError::Configuration(_) | DjenError::Validation(_) => 2,
        DjenError::Fetch(_) => 4,
        _ => 5,
    }
}

/// Prints the user-facing explanation of `error` and returns its exit code
pub fn report_error(error: &DjenError) -> i32 {
    tracing::error!(error = %error, "Search failed");

    let user_message = error.user_message();
    eprintln!();
    eprintln!("❌ {}", user_message.title);
    eprintln!("   {}", user_message.message);
    eprintln!("   Details: {error}");
    eprintln!();

    exit_code_for(error)
}

/// Prints the completion statistics of a search
pub fn print_summary(summary: &SearchSummary) {
    println!();
    match &summary.file_name {
        Some(file_name) => {
            println!("✅ Search completed");
            println!("   File: {file_name}");
        }
        None => {
            println!("ℹ️  No notifications found for the given criteria");
        }
    }

    println!("   Unique records: {}", summary.unique_records);
    println!("   Records collected: {}", summary.original_total);
    println!("   Duplicates removed: {}", summary.duplicates_removed);
    if summary.missing_identifier > 0 {
        println!("   Dropped without ID: {}", summary.missing_identifier);
    }
    println!("   Pages processed: {}", summary.pages_processed);
    if summary.pages_skipped > 0 {
        println!("   Pages skipped: {}", summary.pages_skipped);
    }
    if summary.expected_total > 0 {
        let marker = if summary.collection_complete {
            "✅"
        } else {
            "⚠️ "
        };
        println!(
            "   Declared total: {} {marker}",
            summary.expected_total
        );
    }
    println!("   Duration: {:.1}s", summary.duration.as_secs_f64());

    if let Some(batch) = &summary.batch {
        println!();
        println!("By source:");
        for (source, count) in &batch.by_source {
            println!("   {source}: {count}");
        }
        println!("By court:");
        for (court, count) in &batch.by_court {
            println!("   {court}: {count}");
        }
        println!("By communication type:");
        for (kind, count) in &batch.by_communication_type {
            println!("   {kind}: {count}");
        }
    }

    if !summary.failures.is_empty() {
        println!();
        println!("⚠️  Some queries failed and were skipped:");
        for failure in &summary.failures {
            let title = failure
                .kind
                .map(|k| k.user_message().title)
                .unwrap_or("Invalid search");
            println!("   {}: {} ({})", failure.label, title, failure.message);
        }
    }
    println!();
}

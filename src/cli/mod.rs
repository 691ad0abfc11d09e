//! CLI interface and argument parsing
//!
//! This module provides the command-line interface using clap.

pub mod commands;
pub mod progress;

use clap::{Parser, Subcommand};

/// Default configuration file, optional
pub const DEFAULT_CONFIG_PATH: &str = "djen.toml";

/// djen - DJEN legal notifications collector
#[derive(Parser, Debug)]
#[command(name = "djen")]
#[command(version, about, long_about = None)]
pub struct Cli {
    /// Path to configuration file [default: djen.toml, used only if present]
    #[arg(short, long, env = "DJEN_CONFIG")]
    pub config: Option<String>,

    /// Log level (trace, debug, info, warn, error)
    #[arg(short, long, env = "DJEN_LOG_LEVEL")]
    pub log_level: Option<String>,

    /// Subcommand to execute
    #[command(subcommand)]
    pub command: Commands,
}

/// Available commands
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Search notifications by party, OAB number or text and export them
    Search(commands::search::SearchArgs),

    /// Search every configured OAB number and CNPJ over a date range
    QuickSearch(commands::quick_search::QuickSearchArgs),

    /// Validate configuration file
    ValidateConfig(commands::validate::ValidateArgs),

    /// Initialize a new configuration file
    Init(commands::init::InitArgs),
}

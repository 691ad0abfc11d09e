// djen - DJEN legal notifications collector
// Copyright (c) 2025 djen Contributors
// Licensed under the MIT License

//! # djen - DJEN legal notifications collector
//!
//! djen queries the public DJEN communications API of the Brazilian courts,
//! walks every page of the result set, removes duplicates and writes the
//! notifications to a spreadsheet.
//!
//! ## Overview
//!
//! This library provides the core functionality for:
//! - **Collecting** paginated results from an API that reports its totals
//!   inconsistently and fails intermittently
//! - **Deduplicating** notifications by identifier, keeping first occurrences
//! - **Projecting** schema-tolerant JSON onto fixed spreadsheet columns
//! - **Exporting** one `.xlsx` file per run
//!
//! ## Architecture
//!
//! - [`cli`] - Command-line interface and argument parsing
//! - [`core`] - Business logic (collection, batch search, transform, export)
//! - [`adapters`] - External integrations (the communications API)
//! - [`domain`] - Core domain types and errors
//! - [`config`] - Configuration management
//! - [`logging`] - Structured logging
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use djen::config::load_config_or_default;
//! use djen::core::search::{NoopProgress, SearchCoordinator};
//! use djen::domain::QueryParameters;
//! use std::sync::Arc;
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let config = load_config_or_default("djen.toml")?;
//!     let coordinator = SearchCoordinator::from_config(&config, Arc::new(NoopProgress))?;
//!
//!     let params = QueryParameters::builder()
//!         .party_name("42.789.521/0001-10")
//!         .start_date("2024-01-01")
//!         .end_date("2024-01-31")
//!         .build()?;
//!
//!     let summary = coordinator.execute_search(&params).await?;
//!     println!("{} notifications in {:?}", summary.unique_records, summary.file_name);
//!     Ok(())
//! }
//! ```
//!
//! ## Error Handling
//!
//! Fallible operations return [`domain::Result`]. Upstream failures are
//! classified by [`domain::FetchErrorKind`], which drives the retry, skip and
//! abort policy of the pagination loop:
//!
//! ```rust
//! use djen::domain::{DjenError, FetchError, FetchErrorKind};
//!
//! let err: DjenError = FetchError::ServerUnavailable { status: 503 }.into();
//! if let DjenError::Fetch(fetch) = &err {
//!     assert_eq!(fetch.kind(), FetchErrorKind::ServerUnavailable);
//! }
//! ```

pub mod adapters;
pub mod cli;
pub mod config;
pub mod core;
pub mod domain;
pub mod logging;

//! Core business logic.
//!
//! # Modules
//!
//! - [`collect`] - Paginated collection with retry, skip and abort policies
//! - [`batch`] - Quick search across configured identities
//! - [`transform`] - Deduplication and projection to flat records
//! - [`export`] - Spreadsheet generation
//! - [`search`] - Orchestration of a full search run
//!
//! # Search Workflow
//!
//! 1. **Collect**: walk the result pages until a termination rule fires
//! 2. **Deduplicate**: keep the first record for each identifier
//! 3. **Project**: map records onto the fixed spreadsheet columns
//! 4. **Export**: write one `.xlsx` file
//! 5. **Report**: return a [`search::SearchSummary`]
//!
//! # Example
//!
//! ```rust,no_run
//! use djen::config::load_config;
//! use djen::core::search::{NoopProgress, SearchCoordinator};
//! use djen::domain::QueryParameters;
//! use std::sync::Arc;
//!
//! # async fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let config = load_config("djen.toml")?;
//! let coordinator = SearchCoordinator::from_config(&config, Arc::new(NoopProgress))?;
//!
//! let params = QueryParameters::builder()
//!     .license_number("118093")
//!     .license_jurisdiction("RJ")
//!     .start_date("2024-01-01")
//!     .end_date("2024-01-31")
//!     .build()?;
//!
//! let summary = coordinator.execute_search(&params).await?;
//! println!("Unique records: {}", summary.unique_records);
//! # Ok(())
//! # }
//! ```

pub mod batch;
pub mod collect;
pub mod export;
pub mod search;
pub mod transform;

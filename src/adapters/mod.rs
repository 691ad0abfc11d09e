//! External system integrations.
//!
//! - [`comunica`] - DJEN communications API (paginated JSON over HTTPS)
//!
//! # Design Pattern
//!
//! Adapters isolate external dependencies behind traits so the core loop can be
//! tested with stub implementations:
//!
//! ```rust,no_run
//! use djen::adapters::comunica::{ComunicaClient, PageFetcher};
//! use djen::config::ApiConfig;
//! use std::sync::Arc;
//!
//! # fn example() -> djen::domain::Result<()> {
//! let fetcher: Arc<dyn PageFetcher> = Arc::new(ComunicaClient::new(&ApiConfig::default())?);
//! # Ok(())
//! # }
//! ```

pub mod comunica;

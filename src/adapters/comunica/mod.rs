//! Adapter for the DJEN communications API
//!
//! This module provides:
//! - The [`PageFetcher`] trait consumed by the pagination loop
//! - [`ComunicaClient`], the HTTP implementation
//! - Response parsing with a configurable declared-total field

pub mod client;
pub mod models;

pub use client::{classify_status, ComunicaClient, PageFetcher};
pub use models::{parse_page, DeclaredTotal, PageResult, TotalCountFields, TotalUnit};

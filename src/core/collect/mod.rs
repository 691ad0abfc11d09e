//! Paginated collection
//!
//! - [`controller`] - the page loop and its error policy
//! - [`termination`] - stop rules and strategies

pub mod controller;
pub mod termination;

pub use controller::{CollectionResult, CollectorConfig, PaginationController};
pub use termination::{stop_reason, PageOutcome, StopReason, TerminationStrategy};

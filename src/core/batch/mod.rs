//! Batch ("quick") search over a fixed list of identities

pub mod runner;
pub mod summary;

pub use runner::{BatchQueryRunner, BatchRunResult};
pub use summary::{BatchSummary, IdentityFailure, UNKNOWN_LABEL};

//! Search orchestration
//!
//! - [`coordinator`] - single and quick searches, end to end
//! - [`progress`] - the loading-indicator port
//! - [`summary`] - statistics returned to the caller

pub mod coordinator;
pub mod progress;
pub mod summary;

pub use coordinator::{QuickSearchOptions, SearchCoordinator};
pub use progress::{NoopProgress, Progress, ProgressGuard, ProgressReporter};
pub use summary::SearchSummary;

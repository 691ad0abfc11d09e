//! Record transformation
//!
//! - [`dedupe`] - first-occurrence deduplication by identifier
//! - [`project`] - mapping to the fixed spreadsheet columns

pub mod dedupe;
pub mod project;

pub use dedupe::{dedupe, DeduplicationResult};
pub use project::{
    format_process_number, truncate_text, RecordProjector, TruncationPolicy, MANUAL_SOURCE,
    TRUNCATION_MARKER,
};

//! Identifier-based deduplication
//!
//! Pages can overlap when the upstream result set shifts between requests, and
//! batch queries can return the same notification for several identities.

use crate::domain::record::RawRecord;
use std::collections::HashSet;

/// Duplicates logged individually before going quiet
const MAX_LOGGED_DUPLICATES: usize = 10;

/// Outcome of [`dedupe`]
#[derive(Debug, Clone, PartialEq, Default)]
pub struct DeduplicationResult {
    /// First occurrence of each identifier, in input order
    pub unique_items: Vec<RawRecord>,
    pub duplicates_removed: usize,
    /// Number of inputs, including those without an identifier
    pub original_total: usize,
    /// Inputs dropped for lacking an identifier
    pub missing_identifier: usize,
}

/// Keeps the first record for each identifier
///
/// Records without a usable `id` (see [`RawRecord::id`]) are dropped and
/// counted separately.
pub fn dedupe(records: Vec<RawRecord>) -> DeduplicationResult {
    let original_total = records.len();
    let mut seen: HashSet<String> = HashSet::with_capacity(original_total);
    let mut unique_items = Vec::with_capacity(original_total);
    let mut duplicates_removed = 0;
    let mut missing_identifier = 0;

    for record in records {
        let Some(id) = record.id() else {
            missing_identifier += 1;
            continue;
        };

        if seen.insert(id.clone()) {
            unique_items.push(record);
        } else {
            duplicates_removed += 1;
            if duplicates_removed <= MAX_LOGGED_DUPLICATES {
                tracing::debug!(id = %id, "Duplicate record removed");
            }
        }
    }

    if missing_identifier > 0 {
        tracing::warn!(
            count = missing_identifier,
            "Dropped records without an identifier"
        );
    }

    tracing::info!(
        original_total = original_total,
        unique = unique_items.len(),
        duplicates_removed = duplicates_removed,
        "Deduplication finished"
    );

    DeduplicationResult {
        unique_items,
        duplicates_removed,
        original_total,
        missing_identifier,
    }
}

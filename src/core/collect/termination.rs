//! Termination rules for the pagination loop
//!
//! The endpoint does not reliably report how many results exist, so the loop
//! stops on whichever signal arrives first.

use crate::domain::DjenError;
use std::fmt;
use std::str::FromStr;

/// Which termination rules are active
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum TerminationStrategy {
    /// Declared totals when present, short pages otherwise
    #[default]
    Adaptive,
    /// Declared totals only; a short page does not end the run
    DeclaredTotal,
    /// Ignore declared totals and stop on the first short or empty page
    ShortPage,
}

impl TerminationStrategy {
    /// Whether the declared total on page 1 is read at all
    pub fn uses_declared_total(self) -> bool {
        !matches!(self, TerminationStrategy::ShortPage)
    }

    fn uses_short_page(self) -> bool {
        !matches!(self, TerminationStrategy::DeclaredTotal)
    }
}

impl FromStr for TerminationStrategy {
    type Err = DjenError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "adaptive" => Ok(Self::Adaptive),
            "declared_total" => Ok(Self::DeclaredTotal),
            "short_page" => Ok(Self::ShortPage),
            _ => Err(DjenError::Configuration(format!(
                "Invalid termination strategy: {s}. Expected 'adaptive', 'declared_total' or 'short_page'"
            ))),
        }
    }
}

/// Why a collection run ended
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StopReason {
    /// Page 1 declared a total of zero
    DeclaredEmpty,
    ReachedExpectedPages,
    ReachedExpectedTotal,
    EmptyPage,
    ShortPage,
    /// More than two pages past the expected count
    PastExpectedPages,
    /// The configured page ceiling was hit
    PageLimit,
}

impl fmt::Display for StopReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            StopReason::DeclaredEmpty => "declared_empty",
            StopReason::ReachedExpectedPages => "reached_expected_pages",
            StopReason::ReachedExpectedTotal => "reached_expected_total",
            StopReason::EmptyPage => "empty_page",
            StopReason::ShortPage => "short_page",
            StopReason::PastExpectedPages => "past_expected_pages",
            StopReason::PageLimit => "page_limit",
        };
        f.write_str(name)
    }
}

/// Loop state after a page has been appended
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PageOutcome {
    pub current_page: u32,
    pub expected_pages: Option<u32>,
    /// Declared item total; `None` when unknown
    pub expected_total: Option<u64>,
    pub accumulated: usize,
    pub page_len: usize,
    pub page_size: usize,
}

/// Evaluates the termination rules in order, returning the first that holds
pub fn stop_reason(strategy: TerminationStrategy, outcome: &PageOutcome) -> Option<StopReason> {
    if strategy.uses_declared_total() {
        if let Some(expected) = outcome.expected_pages {
            if outcome.current_page >= expected {
                return Some(StopReason::ReachedExpectedPages);
            }
        }

        if let Some(total) = outcome.expected_total.filter(|t| *t > 0) {
            if outcome.accumulated as u64 >= total {
                return Some(StopReason::ReachedExpectedTotal);
            }
        }
    }

    if outcome.page_len == 0 {
        return Some(StopReason::EmptyPage);
    }

    if strategy.uses_short_page() && outcome.page_len < outcome.page_size {
        return Some(StopReason::ShortPage);
    }

    if strategy.uses_declared_total() {
        if let Some(expected) = outcome.expected_pages {
            if outcome.current_page > expected.saturating_add(2) {
                return Some(StopReason::PastExpectedPages);
            }
        }
    }

    None
}

#[cfg(test)]
mod tests {
    use super::*;

    fn outcome() -> PageOutcome {
        PageOutcome {
            current_page: 1,
            expected_pages: None,
            expected_total: None,
            accumulated: 100,
            page_len: 100,
            page_size: 100,
        }
    }

    #[test]
    fn test_full_page_without_totals_continues() {
        assert_eq!(stop_reason(TerminationStrategy::Adaptive, &outcome()), None);
    }

    #[test]
    fn test_reached_expected_pages() {
        let state = PageOutcome {
            current_page: 3,
            expected_pages: Some(3),
            accumulated: 300,
            ..outcome()
        };
        assert_eq!(
            stop_reason(TerminationStrategy::Adaptive, &state),
            Some(StopReason::ReachedExpectedPages)
        );
    }

    #[test]
    fn test_reached_expected_total() {
        let state = PageOutcome {
            current_page: 2,
            expected_pages: Some(5),
            expected_total: Some(150),
            accumulated: 200,
            ..outcome()
        };
        assert_eq!(
            stop_reason(TerminationStrategy::Adaptive, &state),
            Some(StopReason::ReachedExpectedTotal)
        );
    }

    #[test]
    fn test_empty_page() {
        let state = PageOutcome {
            current_page: 2,
            page_len: 0,
            ..outcome()
        };
        assert_eq!(
            stop_reason(TerminationStrategy::DeclaredTotal, &state),
            Some(StopReason::EmptyPage)
        );
    }

    #[test]
    fn test_short_page_by_strategy() {
        let state = PageOutcome {
            current_page: 2,
            expected_pages: Some(10),
            expected_total: Some(1000),
            accumulated: 140,
            page_len: 40,
            ..outcome()
        };
        assert_eq!(
            stop_reason(TerminationStrategy::Adaptive, &state),
            Some(StopReason::ShortPage)
        );
        assert_eq!(stop_reason(TerminationStrategy::DeclaredTotal, &state), None);
        assert_eq!(
            stop_reason(TerminationStrategy::ShortPage, &state),
            Some(StopReason::ShortPage)
        );
    }

    #[test]
    fn test_short_page_strategy_ignores_totals() {
        let state = PageOutcome {
            current_page: 3,
            expected_pages: Some(3),
            expected_total: Some(300),
            accumulated: 300,
            ..outcome()
        };
        assert_eq!(stop_reason(TerminationStrategy::ShortPage, &state), None);
    }

    #[test]
    fn test_strategy_from_str() {
        assert_eq!(
            TerminationStrategy::from_str("declared_total").unwrap(),
            TerminationStrategy::DeclaredTotal
        );
        assert_eq!(
            TerminationStrategy::from_str("ADAPTIVE").unwrap(),
            TerminationStrategy::Adaptive
        );
        assert!(TerminationStrategy::from_str("eager").is_err());
    }

    #[test]
    fn test_stop_reason_display() {
        assert_eq!(StopReason::ReachedExpectedTotal.to_string(), "reached_expected_total");
        assert_eq!(StopReason::PageLimit.to_string(), "page_limit");
    }
}

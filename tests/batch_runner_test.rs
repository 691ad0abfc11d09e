//! Integration tests for the batch search

mod common;

use common::{fast_config, page, ScriptedFetcher};
use djen::adapters::comunica::DeclaredTotal;
use djen::core::batch::BatchQueryRunner;
use djen::core::collect::{PaginationController, TerminationStrategy};
use djen::domain::record::{SOURCE_FIELD, SOURCE_TYPE_FIELD};
use djen::domain::{DateRange, FetchError, FetchErrorKind, License, Party};
use std::sync::Arc;
use std::time::Duration;
use tokio::time::Instant;

fn license(number: &str, jurisdiction: &str) -> License {
    License {
        number: number.to_string(),
        jurisdiction: jurisdiction.to_string(),
    }
}

fn party() -> Party {
    Party {
        name: "42.789.521/0001-10".to_string(),
        kind: "CNPJ".to_string(),
    }
}

fn runner_with(
    fetcher: &Arc<ScriptedFetcher>,
    licenses: &[License],
    delay: Duration,
) -> BatchQueryRunner {
    BatchQueryRunner::new(
        PaginationController::new(fetcher.clone(), fast_config(TerminationStrategy::Adaptive)),
        BatchQueryRunner::identities_from(licenses, &[party()]),
        delay,
    )
}

fn runner(fetcher: &Arc<ScriptedFetcher>) -> BatchQueryRunner {
    runner_with(fetcher, &[license("118093", "RJ")], Duration::ZERO)
}

fn january() -> DateRange {
    DateRange::parse("2024-01-01", "2024-01-31").unwrap()
}

#[tokio::test]
async fn test_failing_identity_does_not_stop_the_others() {
    let fetcher = Arc::new(ScriptedFetcher::new(
        5,
        vec![
            Err(FetchError::ServerUnavailable { status: 503 }),
            page(1..3, Some(DeclaredTotal::Items(2))),
        ],
    ));

    let result = runner(&fetcher).run(&january(), |_, _, _| {}).await;

    assert_eq!(result.queries_succeeded, 1);
    assert_eq!(result.total_queries(), 2);
    assert_eq!(result.failures.len(), 1);
    assert_eq!(result.failures[0].label, "OAB 118093/RJ");
    assert_eq!(result.failures[0].kind, Some(FetchErrorKind::ServerUnavailable));

    assert_eq!(result.items.len(), 2);
    assert_eq!(result.expected_total, 2);
    assert!(result.collection_complete());
    for item in &result.items {
        assert_eq!(
            item.get_str(SOURCE_FIELD).as_deref(),
            Some("CNPJ 42.789.521/0001-10")
        );
        assert_eq!(item.get_str(SOURCE_TYPE_FIELD).as_deref(), Some("CNPJ"));
    }
}

#[tokio::test]
async fn test_identities_queried_in_order_with_shared_range() {
    let fetcher = Arc::new(ScriptedFetcher::new(
        5,
        vec![page(1..2, None), page(2..4, None)],
    ));

    let mut steps = Vec::new();
    let result = runner(&fetcher)
        .run(&january(), |step, total, label| {
            steps.push((step, total, label.to_string()))
        })
        .await;

    assert_eq!(
        fetcher.calls(),
        vec![
            (Some("118093".to_string()), 1),
            (Some("42.789.521/0001-10".to_string()), 1),
        ]
    );
    assert_eq!(
        steps,
        vec![
            (1, 2, "OAB 118093/RJ".to_string()),
            (2, 2, "CNPJ 42.789.521/0001-10".to_string()),
        ]
    );
    assert_eq!(result.pages_processed, 2);
    assert!(result.failures.is_empty());
}

#[tokio::test]
async fn test_summary_breakdown() {
    let fetcher = Arc::new(ScriptedFetcher::new(
        5,
        vec![page(1..2, None), page(2..4, None)],
    ));

    let result = runner(&fetcher).run(&january(), |_, _, _| {}).await;

    assert_eq!(result.summary.total, 3);
    assert_eq!(result.summary.by_source.get("OAB 118093/RJ"), Some(&1));
    assert_eq!(
        result.summary.by_source.get("CNPJ 42.789.521/0001-10"),
        Some(&2)
    );
    assert_eq!(result.summary.by_court.get("TJRJ"), Some(&3));
    assert_eq!(result.summary.by_communication_type.get("Intimação"), Some(&3));
}

#[tokio::test]
async fn test_all_identities_failing() {
    let fetcher = Arc::new(
        ScriptedFetcher::new(5, vec![])
            .with_fallback(Err(FetchError::Network("unreachable".to_string()))),
    );

    let result = runner(&fetcher).run(&january(), |_, _, _| {}).await;

    assert_eq!(result.queries_succeeded, 0);
    assert_eq!(result.failures.len(), 2);
    assert!(result.items.is_empty());
    assert!(result.failures.iter().all(|f| f.kind == Some(FetchErrorKind::Network)));
}

#[tokio::test]
async fn test_middle_identity_failure_merges_neighbours() {
    let fetcher = Arc::new(ScriptedFetcher::new(
        5,
        vec![
            page(1..3, None),
            Err(FetchError::ServerUnavailable { status: 503 }),
            page(10..13, None),
        ],
    ));
    let runner = runner_with(
        &fetcher,
        &[license("118093", "RJ"), license("200000", "SP")],
        Duration::ZERO,
    );

    let result = runner.run(&january(), |_, _, _| {}).await;

    assert_eq!(result.total_queries(), 3);
    assert_eq!(result.queries_succeeded, 2);
    assert_eq!(result.failures.len(), 1);
    assert_eq!(result.failures[0].label, "OAB 200000/SP");

    let sources: Vec<(Option<String>, Option<String>)> = result
        .items
        .iter()
        .map(|item| (item.id(), item.get_str(SOURCE_FIELD)))
        .collect();
    assert_eq!(
        sources,
        vec![
            (Some("1".to_string()), Some("OAB 118093/RJ".to_string())),
            (Some("2".to_string()), Some("OAB 118093/RJ".to_string())),
            (Some("10".to_string()), Some("CNPJ 42.789.521/0001-10".to_string())),
            (Some("11".to_string()), Some("CNPJ 42.789.521/0001-10".to_string())),
            (Some("12".to_string()), Some("CNPJ 42.789.521/0001-10".to_string())),
        ]
    );
}

#[tokio::test(start_paused = true)]
async fn test_pause_after_every_identity() {
    let fetcher = Arc::new(ScriptedFetcher::new(
        5,
        vec![
            page(1..2, None),
            Err(FetchError::ServerUnavailable { status: 503 }),
            page(2..3, None),
        ],
    ));
    let runner = runner_with(
        &fetcher,
        &[license("118093", "RJ"), license("200000", "SP")],
        Duration::from_millis(1000),
    );

    let start = Instant::now();
    let result = runner.run(&january(), |_, _, _| {}).await;

    assert_eq!(result.failures.len(), 1);
    // The pause follows failures too, and the last identity
    assert_eq!(fetcher.call_offsets_ms(start), vec![0, 1000, 2000]);
    assert_eq!(start.elapsed().as_millis(), 3000);
}

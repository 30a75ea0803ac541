//! Registry tests: session start rules, pool independence and configuration
//! round trips.
//!
//! Run with: `cargo test -p ticket-pool-runtime --test registry_test`

#![allow(clippy::unwrap_used, clippy::expect_used, clippy::panic)] // Test code can use unwrap/expect/panic

use std::time::Duration;
use ticket_pool_core::{ConfigDocument, PoolConfig, PoolKind};
use ticket_pool_runtime::{ExhaustionPolicy, PoolRegistry, SessionError};
use ticket_pool_testing::{fixtures, init_tracing};
use tokio_test::{assert_err, assert_ok};

fn registry() -> PoolRegistry {
    PoolRegistry::new(fixtures::test_settings(ExhaustionPolicy::SupplyDrained))
}

/// Scenario B: a pool with no supply is unconfigured and cannot start.
#[tokio::test]
async fn unconfigured_pool_cannot_start() {
    let mut registry = registry();

    assert_eq!(
        registry.start(PoolKind::Normal).await,
        Err(SessionError::NotConfigured(PoolKind::Normal))
    );

    registry.configure(PoolKind::Normal, fixtures::scenario_b()).await;
    assert_eq!(
        registry.start(PoolKind::Normal).await,
        Err(SessionError::NotConfigured(PoolKind::Normal))
    );
    assert!(!registry.is_running(PoolKind::Normal));
}

#[tokio::test(start_paused = true)]
async fn second_start_is_rejected_while_running() {
    init_tracing();
    let mut registry = registry();
    registry.configure(PoolKind::Vip, PoolConfig::new(1_000, 2, 1, 100)).await;

    assert_ok!(registry.start(PoolKind::Vip).await);
    assert_eq!(
        registry.start(PoolKind::Vip).await,
        Err(SessionError::AlreadyRunning(PoolKind::Vip))
    );

    let reports = assert_ok!(registry.stop_all().await);
    assert_eq!(reports.len(), 1);
    assert!(reports[0].is_graceful());
    assert!(!registry.is_running(PoolKind::Vip));
}

/// A session that ended on its own can be replaced by a new one.
#[tokio::test(start_paused = true)]
async fn finished_session_can_be_restarted() {
    init_tracing();
    let mut registry = registry();
    registry.configure(PoolKind::Normal, fixtures::scenario_c()).await;

    assert_ok!(registry.start(PoolKind::Normal).await);
    tokio::time::sleep(Duration::from_secs(10)).await;
    assert!(!registry.is_running(PoolKind::Normal));
    assert_err!(registry.stop(PoolKind::Normal).await);

    registry.configure(PoolKind::Normal, fixtures::scenario_c()).await;
    assert_ok!(registry.start(PoolKind::Normal).await);
    assert!(registry.is_running(PoolKind::Normal));

    registry.shutdown().await;
}

/// Stopping one pool leaves the other running.
#[tokio::test(start_paused = true)]
async fn pools_are_independent() {
    init_tracing();
    let mut registry = registry();
    for kind in PoolKind::ALL {
        registry.configure(kind, PoolConfig::new(10_000, 4, 2, 50)).await;
        assert_ok!(registry.start(kind).await);
    }

    tokio::time::sleep(Duration::from_secs(2)).await;

    let report = assert_ok!(registry.stop(PoolKind::Normal).await);
    assert_eq!(report.kind, PoolKind::Normal);
    assert!(report.is_graceful());

    assert!(!registry.is_running(PoolKind::Normal));
    assert!(registry.is_running(PoolKind::Vip));

    let before = registry.status(PoolKind::Vip).await.total_tickets;
    tokio::time::sleep(Duration::from_secs(2)).await;
    let after = registry.status(PoolKind::Vip).await.total_tickets;
    assert!(after < before, "VIP production continued after Normal stopped");

    let reports = assert_ok!(registry.stop_all().await);
    assert_eq!(reports.len(), 1);
    assert_eq!(reports[0].kind, PoolKind::Vip);
}

/// configure → export → JSON → parse → load into a fresh registry yields the
/// same configuration, with the pool emptied.
#[tokio::test]
async fn configuration_round_trip() {
    let source = registry();
    source.configure(PoolKind::Normal, PoolConfig::new(100, 5, 3, 20)).await;
    source.configure(PoolKind::Vip, PoolConfig::new(40, 2, 1, 8)).await;

    let before = [
        source.status(PoolKind::Normal).await,
        source.status(PoolKind::Vip).await,
    ];

    let text = assert_ok!(source.export_document().await.to_json());
    let document = assert_ok!(ConfigDocument::from_json(&text));

    let target = registry();
    target.load_document(&document).await;

    for status in before {
        let reloaded = target.status(status.kind).await;
        assert_eq!(reloaded.config(), status.config());
        assert_eq!(reloaded.current_tickets, 0);
    }
}

//! # Ticket Pool Testing
//!
//! Testing utilities for the ticket pool crates.
//!
//! This crate provides:
//! - Fixtures for the documented pool scenarios
//! - Settings tuned for paused-clock session tests
//! - proptest strategies for configurations and operation sequences
//! - Invariant and conservation assertions
//!
//! ## Example
//!
//! ```ignore
//! use ticket_pool_testing::{fixtures, assertions::PoolLedger};
//!
//! #[test]
//! fn fills_and_drains() {
//!     let mut pool = TicketPool::with_config(PoolKind::Normal, fixtures::scenario_a());
//!     let mut ledger = PoolLedger::new(pool.total_tickets());
//!
//!     ledger.record_add(pool.add_tickets());
//!     ledger.record_retrieve(pool.retrieve_tickets());
//!     ledger.assert_conserved(&pool.status());
//! }
//! ```

/// Fixtures for the documented scenarios
pub mod fixtures {
    use std::time::Duration;
    use ticket_pool_core::PoolConfig;
    use ticket_pool_runtime::{ExhaustionPolicy, RuntimeSettings};

    /// capacity 10, release 5, retrieval 3, supply 12
    #[must_use]
    pub const fn scenario_a() -> PoolConfig {
        PoolConfig::new(12, 5, 3, 10)
    }

    /// No supply: the pool can never be configured
    #[must_use]
    pub const fn scenario_b() -> PoolConfig {
        PoolConfig::new(0, 5, 3, 10)
    }

    /// supply 5, release 5, retrieval 2, capacity 100
    #[must_use]
    pub const fn scenario_c() -> PoolConfig {
        PoolConfig::new(5, 5, 2, 100)
    }

    /// Runtime settings for paused-clock tests.
    ///
    /// Uses the default one-second capacity wait with a short grace period.
    #[must_use]
    pub fn test_settings(policy: ExhaustionPolicy) -> RuntimeSettings {
        RuntimeSettings::default()
            .with_shutdown_grace(Duration::from_secs(2))
            .with_exhaustion_policy(policy)
    }
}

/// proptest strategies
pub mod strategies {
    use proptest::prelude::*;
    use ticket_pool_core::PoolConfig;

    /// A single pool operation
    #[derive(Debug, Clone, Copy, PartialEq, Eq)]
    pub enum PoolOp {
        /// `add_tickets`
        Add,
        /// `retrieve_tickets`
        Retrieve,
        /// `configure` with a new configuration
        Reconfigure(PoolConfig),
    }

    /// Configurations with every field strictly positive
    pub fn complete_config() -> impl Strategy<Value = PoolConfig> {
        (1_u32..=500, 1_u32..=50, 1_u32..=50, 1_u32..=100).prop_map(
            |(total, release, retrieval, capacity)| {
                PoolConfig::new(total, release, retrieval, capacity)
            },
        )
    }

    /// Configurations that may contain zeros
    pub fn any_config() -> impl Strategy<Value = PoolConfig> {
        (0_u32..=500, 0_u32..=50, 0_u32..=50, 0_u32..=100).prop_map(
            |(total, release, retrieval, capacity)| {
                PoolConfig::new(total, release, retrieval, capacity)
            },
        )
    }

    /// Sequences of adds and retrieves, without reconfiguration
    pub fn add_retrieve_ops(max_len: usize) -> impl Strategy<Value = Vec<PoolOp>> {
        prop::collection::vec(
            prop_oneof![Just(PoolOp::Add), Just(PoolOp::Retrieve)],
            0..max_len,
        )
    }

    /// Sequences that occasionally reconfigure the pool
    pub fn mixed_ops(max_len: usize) -> impl Strategy<Value = Vec<PoolOp>> {
        prop::collection::vec(
            prop_oneof![
                4 => Just(PoolOp::Add),
                4 => Just(PoolOp::Retrieve),
                1 => complete_config().prop_map(PoolOp::Reconfigure),
            ],
            0..max_len,
        )
    }
}

/// Invariant and conservation assertions
pub mod assertions {
    use ticket_pool_core::{AddOutcome, PoolStatus};

    /// Assert the capacity bound of a configured pool.
    ///
    /// # Panics
    ///
    /// Panics if `current_tickets` exceeds `max_ticket_capacity`.
    pub fn assert_within_capacity(status: &PoolStatus) {
        assert!(
            status.current_tickets <= status.max_ticket_capacity,
            "{} pool holds {} tickets over a capacity of {}",
            status.kind,
            status.current_tickets,
            status.max_ticket_capacity
        );
    }

    /// Running totals of what went in and out of one pool.
    #[derive(Debug, Clone, Copy, PartialEq, Eq)]
    pub struct PoolLedger {
        initial_total: u64,
        added: u64,
        retrieved: u64,
    }

    impl PoolLedger {
        /// Start a ledger for a freshly configured pool
        #[must_use]
        pub fn new(initial_total: u32) -> Self {
            Self {
                initial_total: u64::from(initial_total),
                added: 0,
                retrieved: 0,
            }
        }

        /// Record the outcome of `add_tickets`
        pub fn record_add(&mut self, outcome: AddOutcome) {
            if let AddOutcome::Added(batch) = outcome {
                self.added += u64::from(batch);
            }
        }

        /// Record the result of `retrieve_tickets`
        pub fn record_retrieve(&mut self, batch: u32) {
            self.retrieved += u64::from(batch);
        }

        /// Tickets added so far
        #[must_use]
        pub const fn added(&self) -> u64 {
            self.added
        }

        /// Tickets retrieved so far
        #[must_use]
        pub const fn retrieved(&self) -> u64 {
            self.retrieved
        }

        /// Assert `retrieved <= added <= initial_total` and that the pool
        /// accounts for every ticket.
        ///
        /// # Panics
        ///
        /// Panics if any ticket was created or lost.
        pub fn assert_conserved(&self, status: &PoolStatus) {
            assert!(self.retrieved <= self.added, "sold more than was added: {self:?}");
            assert!(self.added <= self.initial_total, "added more than the supply: {self:?}");
            assert_eq!(
                self.initial_total - u64::from(status.total_tickets),
                self.added,
                "supply does not match tickets added"
            );
            assert_eq!(
                self.added - self.retrieved,
                u64::from(status.current_tickets),
                "pool does not hold added minus retrieved"
            );
        }
    }
}

/// Install a test-friendly tracing subscriber.
///
/// Honors `RUST_LOG`. Safe to call from every test; only the first call
/// installs anything.
pub fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_test_writer()
        .try_init();
}

pub use assertions::{PoolLedger, assert_within_capacity};

#[cfg(test)]
mod tests {
    use super::*;
    use ticket_pool_core::{PoolKind, TicketPool};

    #[test]
    fn scenario_b_is_not_configurable() {
        assert!(!fixtures::scenario_b().is_complete());
        assert!(fixtures::scenario_a().is_complete());
    }

    #[test]
    fn ledger_tracks_scenario_c() {
        let mut pool = TicketPool::with_config(PoolKind::Normal, fixtures::scenario_c());
        let mut ledger = PoolLedger::new(pool.total_tickets());

        ledger.record_add(pool.add_tickets());
        ledger.record_retrieve(pool.retrieve_tickets());
        ledger.assert_conserved(&pool.status());
        assert_eq!((ledger.added(), ledger.retrieved()), (5, 2));
    }
}

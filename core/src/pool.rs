//! The bounded ticket pool state machine.

use crate::config::PoolConfig;
use crate::status::PoolStatus;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::time::Duration;

/// Identity of one of the two independent pools.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum PoolKind {
    /// General admission
    Normal,
    /// VIP admission
    Vip,
}

impl PoolKind {
    /// Both pools, in display order.
    pub const ALL: [Self; 2] = [Self::Normal, Self::Vip];

    /// Human readable label
    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::Normal => "Normal",
            Self::Vip => "VIP",
        }
    }

    /// Key of this pool's section in the persisted configuration document
    #[must_use]
    pub const fn section_key(self) -> &'static str {
        match self {
            Self::Normal => "normal",
            Self::Vip => "vip",
        }
    }
}

impl fmt::Display for PoolKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Result of a single production attempt.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AddOutcome {
    /// A batch of this many tickets moved from supply into the pool
    Added(u32),
    /// The pool already holds `max_ticket_capacity` tickets
    AtCapacity,
    /// No supply remains to release
    SupplyExhausted,
}

/// A named, bounded ticket inventory fed from a finite supply.
///
/// # Invariants
///
/// - `current_tickets <= max_ticket_capacity`
/// - `total_tickets` only decreases through [`TicketPool::add_tickets`]
/// - tickets are conserved: every ticket in the pool came out of the supply
///
/// Production batches are clipped to the remaining headroom, so the capacity
/// bound holds after every call regardless of the configured release rate.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TicketPool {
    kind: PoolKind,
    total_tickets: u32,
    current_tickets: u32,
    ticket_release_rate: u32,
    customer_retrieval_rate: u32,
    max_ticket_capacity: u32,
}

impl TicketPool {
    /// Create an unconfigured pool (every field zero).
    #[must_use]
    pub const fn new(kind: PoolKind) -> Self {
        Self {
            kind,
            total_tickets: 0,
            current_tickets: 0,
            ticket_release_rate: 0,
            customer_retrieval_rate: 0,
            max_ticket_capacity: 0,
        }
    }

    /// Create a pool and apply `config` to it.
    #[must_use]
    pub const fn with_config(kind: PoolKind, config: PoolConfig) -> Self {
        let mut pool = Self::new(kind);
        pool.configure(config);
        pool
    }

    /// Replace the configuration and empty the pool.
    ///
    /// Values are taken as-is. A zero anywhere leaves the pool unconfigured
    /// according to [`TicketPool::is_configured`].
    pub const fn configure(&mut self, config: PoolConfig) {
        self.total_tickets = config.total_tickets;
        self.ticket_release_rate = config.ticket_release_rate;
        self.customer_retrieval_rate = config.customer_retrieval_rate;
        self.max_ticket_capacity = config.max_ticket_capacity;
        self.current_tickets = 0;
    }

    /// True iff all four configuration fields are strictly positive.
    #[must_use]
    pub const fn is_configured(&self) -> bool {
        self.config().is_complete()
    }

    /// Release one batch of tickets from the supply into the pool.
    ///
    /// The batch is `min(total_tickets, ticket_release_rate, headroom)` where
    /// headroom is `max_ticket_capacity - current_tickets`.
    pub fn add_tickets(&mut self) -> AddOutcome {
        if self.total_tickets == 0 {
            return AddOutcome::SupplyExhausted;
        }
        if self.is_at_max_capacity() {
            return AddOutcome::AtCapacity;
        }

        let headroom = self.max_ticket_capacity - self.current_tickets;
        let batch = self
            .total_tickets
            .min(self.ticket_release_rate)
            .min(headroom);

        // Only reachable with a zero release rate.
        if batch == 0 {
            return AddOutcome::AtCapacity;
        }

        self.current_tickets += batch;
        self.total_tickets -= batch;
        AddOutcome::Added(batch)
    }

    /// Sell one batch of tickets out of the pool.
    ///
    /// Returns the number of tickets removed, `0` when the pool is empty.
    pub fn retrieve_tickets(&mut self) -> u32 {
        let batch = self.current_tickets.min(self.customer_retrieval_rate);
        self.current_tickets -= batch;
        batch
    }

    /// `current_tickets >= max_ticket_capacity`
    #[must_use]
    pub const fn is_at_max_capacity(&self) -> bool {
        self.current_tickets >= self.max_ticket_capacity
    }

    /// No supply left and nothing in the pool: nothing can ever be sold again.
    #[must_use]
    pub const fn is_exhausted(&self) -> bool {
        self.total_tickets == 0 && self.current_tickets == 0
    }

    /// Consistent copy of all six fields.
    #[must_use]
    pub fn status(&self) -> PoolStatus {
        PoolStatus {
            kind: self.kind,
            total_tickets: self.total_tickets,
            current_tickets: self.current_tickets,
            ticket_release_rate: self.ticket_release_rate,
            customer_retrieval_rate: self.customer_retrieval_rate,
            max_ticket_capacity: self.max_ticket_capacity,
            taken_at: chrono::Utc::now(),
        }
    }

    /// The four configuration fields as they currently stand.
    ///
    /// `total_tickets` is the remaining supply, not the originally configured one.
    #[must_use]
    pub const fn config(&self) -> PoolConfig {
        PoolConfig::new(
            self.total_tickets,
            self.ticket_release_rate,
            self.customer_retrieval_rate,
            self.max_ticket_capacity,
        )
    }

    /// Delay between production batches (`1s / ticket_release_rate`).
    ///
    /// `None` while the release rate is zero.
    #[must_use]
    pub fn production_cadence(&self) -> Option<Duration> {
        Duration::from_secs(1).checked_div(self.ticket_release_rate)
    }

    /// Delay between consumption batches (`1s / customer_retrieval_rate`).
    ///
    /// `None` while the retrieval rate is zero.
    #[must_use]
    pub fn retrieval_cadence(&self) -> Option<Duration> {
        Duration::from_secs(1).checked_div(self.customer_retrieval_rate)
    }

    /// Which pool this is
    #[must_use]
    pub const fn kind(&self) -> PoolKind {
        self.kind
    }

    /// Remaining supply
    #[must_use]
    pub const fn total_tickets(&self) -> u32 {
        self.total_tickets
    }

    /// Tickets currently available for purchase
    #[must_use]
    pub const fn current_tickets(&self) -> u32 {
        self.current_tickets
    }

    /// Capacity bound
    #[must_use]
    pub const fn max_ticket_capacity(&self) -> u32 {
        self.max_ticket_capacity
    }
}

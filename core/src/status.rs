//! Point-in-time view of a pool.

use crate::config::PoolConfig;
use crate::pool::PoolKind;
use chrono::{DateTime, Utc};
use serde::Serialize;

/// All six pool fields, read under a single lock acquisition.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PoolStatus {
    /// Which pool this snapshot describes
    pub kind: PoolKind,
    /// Remaining supply
    pub total_tickets: u32,
    /// Tickets available for purchase
    pub current_tickets: u32,
    /// Tickets produced per batch
    pub ticket_release_rate: u32,
    /// Tickets consumed per batch
    pub customer_retrieval_rate: u32,
    /// Capacity bound
    pub max_ticket_capacity: u32,
    /// When the snapshot was taken
    pub taken_at: DateTime<Utc>,
}

impl PoolStatus {
    /// The configuration fields of this snapshot.
    #[must_use]
    pub const fn config(&self) -> PoolConfig {
        PoolConfig::new(
            self.total_tickets,
            self.ticket_release_rate,
            self.customer_retrieval_rate,
            self.max_ticket_capacity,
        )
    }

    /// Whether the pool was configured when the snapshot was taken.
    #[must_use]
    pub const fn is_configured(&self) -> bool {
        self.config().is_complete()
    }

    /// Whether the pool was exhausted when the snapshot was taken.
    #[must_use]
    pub const fn is_exhausted(&self) -> bool {
        self.total_tickets == 0 && self.current_tickets == 0
    }
}

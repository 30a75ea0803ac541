//! The producer loop.
//!
//! ```text
//!            ┌──────────────── cadence sleep ───────────────┐
//!            ▼                                              │
//!      ┌───────────┐  pool full   ┌───────────────────┐     │
//!      │ Producing │─────────────▶│ WaitingForVacancy │─────┘
//!      └───────────┘              └───────────────────┘
//!            │ exhausted / flag cleared     │ flag cleared
//!            ▼                              ▼
//!      ┌─────────────────────────────────────────┐
//!      │                 Stopped                 │
//!      └─────────────────────────────────────────┘
//! ```

use crate::config::RuntimeSettings;
use crate::flag::RunFlag;
use crate::pool::PoolHandle;
use crate::session::{LoopReport, StopReason};
use std::time::Duration;
use ticket_pool_core::{AddOutcome, TicketPool};
use tokio::time::sleep;
use tracing::{debug, info};

/// Releases tickets into one pool at its configured rate.
#[derive(Debug)]
pub struct Producer {
    pool: PoolHandle,
    flag: RunFlag,
    capacity_wait: Duration,
}

impl Producer {
    /// Bind a producer to a pool and a session flag
    #[must_use]
    pub const fn new(pool: PoolHandle, flag: RunFlag, settings: &RuntimeSettings) -> Self {
        Self {
            pool,
            flag,
            capacity_wait: settings.capacity_wait,
        }
    }

    /// Run until the pool is exhausted or the flag is cleared.
    ///
    /// Exhaustion (no supply and nothing left to sell) clears the flag so the
    /// paired consumer stops as well.
    pub async fn run(self) -> LoopReport {
        let kind = self.pool.kind();
        let mut produced = 0_u64;
        let mut completion_logged = false;

        info!(pool = %kind, "Producer started");

        loop {
            if !self.flag.is_running() {
                return self.stopped(StopReason::Cancelled, produced);
            }

            let (total, current) = self
                .pool
                .read(|p| (p.total_tickets(), p.current_tickets()))
                .await;

            if total == 0 && current > 0 && !completion_logged {
                info!(pool = %kind, "Ticket production completed. No more tickets to add");
                completion_logged = true;
            }

            if total == 0 && current == 0 {
                info!(pool = %kind, "Ticket pool is empty. Stopping ticket operation");
                self.flag.stop();
                return self.stopped(StopReason::Exhausted, produced);
            }

            if let AddOutcome::Added(batch) = self.pool.add_tickets().await {
                produced += u64::from(batch);
            }

            if !self.wait_for_vacancy().await {
                return self.stopped(StopReason::Cancelled, produced);
            }

            let cadence = self.pool.read(TicketPool::production_cadence).await;
            sleep(cadence.unwrap_or(self.capacity_wait)).await;
        }
    }

    /// Block while the pool is full. Returns `false` if cancelled meanwhile.
    async fn wait_for_vacancy(&self) -> bool {
        while self.pool.is_at_max_capacity().await {
            if !self.flag.is_running() {
                return false;
            }
            sleep(self.capacity_wait).await;
            info!(pool = %self.pool.kind(), "Ticket pool is full. Waiting for vacancy");
        }
        true
    }

    fn stopped(&self, reason: StopReason, tickets: u64) -> LoopReport {
        debug!(pool = %self.pool.kind(), ?reason, tickets, "Producer stopped");
        LoopReport { reason, tickets }
    }
}

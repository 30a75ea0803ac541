//! The consumer loop.

use crate::config::{ExhaustionPolicy, RuntimeSettings};
use crate::flag::RunFlag;
use crate::pool::PoolHandle;
use crate::session::{LoopReport, StopReason};
use std::time::Duration;
use ticket_pool_core::TicketPool;
use tokio::time::sleep;
use tracing::{debug, info};

/// Sells tickets out of one pool at its configured rate.
#[derive(Debug)]
pub struct Consumer {
    pool: PoolHandle,
    flag: RunFlag,
    policy: ExhaustionPolicy,
    fallback_interval: Duration,
}

impl Consumer {
    /// Bind a consumer to a pool and a session flag
    #[must_use]
    pub const fn new(pool: PoolHandle, flag: RunFlag, settings: &RuntimeSettings) -> Self {
        Self {
            pool,
            flag,
            policy: settings.exhaustion_policy,
            fallback_interval: settings.capacity_wait,
        }
    }

    /// Run until the pool is considered empty for good or the flag is cleared.
    ///
    /// What "empty for good" means depends on the [`ExhaustionPolicy`]. When
    /// the consumer decides the pool is done it clears the flag, which stops
    /// the paired producer too.
    pub async fn run(self) -> LoopReport {
        let kind = self.pool.kind();
        let mut retrieved = 0_u64;

        info!(pool = %kind, policy = %self.policy, "Consumer started");

        loop {
            if !self.flag.is_running() {
                return self.stopped(StopReason::Cancelled, retrieved);
            }

            let batch = self.pool.retrieve_tickets().await;
            retrieved += u64::from(batch);

            if batch == 0 && self.is_done().await {
                info!(pool = %kind, "Ticket pool is empty. Stopping ticket retrieval");
                self.flag.stop();
                return self.stopped(StopReason::Exhausted, retrieved);
            }

            let cadence = self.pool.read(TicketPool::retrieval_cadence).await;
            sleep(cadence.unwrap_or(self.fallback_interval)).await;
        }
    }

    async fn is_done(&self) -> bool {
        match self.policy {
            ExhaustionPolicy::FirstEmpty => true,
            ExhaustionPolicy::SupplyDrained => {
                let exhausted = self.pool.read(TicketPool::is_exhausted).await;
                if !exhausted {
                    debug!(pool = %self.pool.kind(), "Ticket pool momentarily empty, waiting for producer");
                }
                exhausted
            },
        }
    }

    fn stopped(&self, reason: StopReason, tickets: u64) -> LoopReport {
        debug!(pool = %self.pool.kind(), ?reason, tickets, "Consumer stopped");
        LoopReport { reason, tickets }
    }
}

//! Shared access to a ticket pool.

use crate::metrics;
use std::sync::Arc;
use ticket_pool_core::{AddOutcome, PoolConfig, PoolKind, PoolStatus, TicketPool};
use tokio::sync::Mutex;
use tracing::{debug, info};

/// A ticket pool shared between a producer, a consumer and the control surface.
///
/// Every operation takes the same mutex for its whole duration, so no caller
/// can observe a half-applied batch. Cloning shares the pool.
#[derive(Debug, Clone)]
pub struct PoolHandle {
    kind: PoolKind,
    inner: Arc<Mutex<TicketPool>>,
}

impl PoolHandle {
    /// A new, unconfigured pool
    #[must_use]
    pub fn new(kind: PoolKind) -> Self {
        Self::from_pool(TicketPool::new(kind))
    }

    /// A new pool with `config` already applied
    #[must_use]
    pub fn with_config(kind: PoolKind, config: PoolConfig) -> Self {
        Self::from_pool(TicketPool::with_config(kind, config))
    }

    fn from_pool(pool: TicketPool) -> Self {
        Self {
            kind: pool.kind(),
            inner: Arc::new(Mutex::new(pool)),
        }
    }

    /// Which pool this is
    #[must_use]
    pub const fn kind(&self) -> PoolKind {
        self.kind
    }

    /// Replace the configuration and empty the pool.
    pub async fn configure(&self, config: PoolConfig) {
        self.inner.lock().await.configure(config);
        metrics::record_reset(self.kind);
        info!(
            pool = %self.kind,
            total = config.total_tickets,
            release_rate = config.ticket_release_rate,
            retrieval_rate = config.customer_retrieval_rate,
            capacity = config.max_ticket_capacity,
            "Ticket pool configured"
        );
    }

    /// Whether all four configuration fields are positive
    pub async fn is_configured(&self) -> bool {
        self.inner.lock().await.is_configured()
    }

    /// Release one batch from supply into the pool.
    pub async fn add_tickets(&self) -> AddOutcome {
        let mut pool = self.inner.lock().await;
        let outcome = pool.add_tickets();

        match outcome {
            AddOutcome::Added(batch) => {
                let current = pool.current_tickets();
                drop(pool);
                metrics::record_produced(self.kind, batch, current);
                debug!(pool = %self.kind, batch, current, "Tickets added");
            },
            AddOutcome::AtCapacity => debug!(pool = %self.kind, "Ticket pool is at capacity"),
            AddOutcome::SupplyExhausted => debug!(pool = %self.kind, "No supply left to add"),
        }

        outcome
    }

    /// Sell one batch out of the pool. Returns `0` when the pool is empty.
    pub async fn retrieve_tickets(&self) -> u32 {
        let mut pool = self.inner.lock().await;
        let batch = pool.retrieve_tickets();
        let current = pool.current_tickets();
        drop(pool);

        if batch > 0 {
            metrics::record_retrieved(self.kind, batch, current);
            debug!(pool = %self.kind, batch, current, "Tickets sold");
        } else {
            debug!(pool = %self.kind, "Ticket pool is empty");
        }

        batch
    }

    /// `current_tickets >= max_ticket_capacity`
    pub async fn is_at_max_capacity(&self) -> bool {
        self.inner.lock().await.is_at_max_capacity()
    }

    /// Consistent snapshot of all six fields
    pub async fn status(&self) -> PoolStatus {
        self.inner.lock().await.status()
    }

    /// Current configuration (with the remaining supply as `total_tickets`)
    pub async fn config(&self) -> PoolConfig {
        self.inner.lock().await.config()
    }

    /// Run a read-only closure under the pool lock.
    ///
    /// # Example
    ///
    /// ```
    /// # use ticket_pool_core::PoolKind;
    /// # use ticket_pool_runtime::PoolHandle;
    /// # async fn example(pool: PoolHandle) {
    /// let (total, current) = pool.read(|p| (p.total_tickets(), p.current_tickets())).await;
    /// # }
    /// ```
    pub async fn read<T>(&self, f: impl FnOnce(&TicketPool) -> T) -> T {
        f(&*self.inner.lock().await)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn clones_share_state() {
        let pool = PoolHandle::with_config(PoolKind::Normal, PoolConfig::new(12, 5, 3, 10));
        let producer_side = pool.clone();

        assert_eq!(producer_side.add_tickets().await, AddOutcome::Added(5));
        assert_eq!(pool.retrieve_tickets().await, 3);
        assert_eq!(producer_side.status().await.current_tickets, 2);
    }

    #[tokio::test]
    async fn configure_applies_to_every_clone() {
        let pool = PoolHandle::new(PoolKind::Vip);
        let other = pool.clone();
        assert!(!other.is_configured().await);

        pool.configure(PoolConfig::new(1, 1, 1, 1)).await;
        assert!(other.is_configured().await);
        assert_eq!(other.config().await, PoolConfig::new(1, 1, 1, 1));
    }

    #[tokio::test(flavor = "multi_thread", worker_threads = 4)]
    async fn concurrent_batches_respect_capacity() {
        let pool = PoolHandle::with_config(PoolKind::Normal, PoolConfig::new(10_000, 7, 5, 50));

        let mut tasks = Vec::new();
        for i in 0..8 {
            let pool = pool.clone();
            tasks.push(tokio::spawn(async move {
                let mut sold = 0_u64;
                for _ in 0..500 {
                    if i % 2 == 0 {
                        pool.add_tickets().await;
                    } else {
                        sold += u64::from(pool.retrieve_tickets().await);
                    }
                    let current = pool.read(TicketPool::current_tickets).await;
                    assert!(current <= 50);
                }
                sold
            }));
        }

        let mut sold = 0_u64;
        for task in futures::future::join_all(tasks).await {
            sold += task.unwrap_or_else(|e| std::panic::resume_unwind(e.into_panic()));
        }

        let status = pool.status().await;
        let produced = 10_000 - u64::from(status.total_tickets);
        assert_eq!(produced, sold + u64::from(status.current_tickets));
    }
}

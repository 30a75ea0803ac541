//! # Ticket Pool Runtime
//!
//! Concurrent driver for the bounded ticket pools defined in `ticket-pool-core`.
//!
//! ## Core Components
//!
//! - **[`PoolHandle`]**: a shared pool; every operation runs under one mutex
//! - **[`RunFlag`]**: the per-session running flag both loops poll
//! - **[`Producer`]**: releases batches at `ticket_release_rate`, waits while the pool is full
//! - **[`Consumer`]**: sells batches at `customer_retrieval_rate`
//! - **[`Session`]**: one producer/consumer pair bound to one pool and one flag
//! - **[`PoolRegistry`]**: the Normal and VIP pools, each with at most one session
//!
//! ## Cancellation
//!
//! Stopping is cooperative. A cleared [`RunFlag`] is observed at the top of
//! the next loop iteration or capacity-wait retry, so a loop exits at most
//! one sleep interval after the request. [`Session::stop`] waits up to a
//! grace period and then aborts whatever is still running.
//!
//! ## Example
//!
//! ```no_run
//! use ticket_pool_core::{PoolConfig, PoolKind};
//! use ticket_pool_runtime::{PoolRegistry, RuntimeSettings};
//!
//! # async fn example() -> Result<(), ticket_pool_runtime::SessionError> {
//! let mut registry = PoolRegistry::new(RuntimeSettings::default());
//! registry.configure(PoolKind::Vip, PoolConfig::new(50, 5, 3, 10)).await;
//! registry.start(PoolKind::Vip).await?;
//!
//! let status = registry.status(PoolKind::Vip).await;
//! println!("{} tickets on sale", status.current_tickets);
//!
//! registry.stop_all().await?;
//! # Ok(())
//! # }
//! ```

pub mod config;
pub mod consumer;
pub mod flag;
pub mod metrics;
pub mod pool;
pub mod producer;
pub mod registry;
pub mod session;

/// Error types for session control
pub mod error {
    use thiserror::Error;
    use ticket_pool_core::PoolKind;

    /// Errors returned when starting or stopping sessions
    ///
    /// All of these are operator errors. Pool state is never modified when
    /// one is returned.
    #[derive(Error, Debug, Clone, PartialEq, Eq)]
    pub enum SessionError {
        /// A session for this pool is still running
        #[error("{0} ticket operation is already running")]
        AlreadyRunning(PoolKind),

        /// The pool has a zero in its configuration
        #[error("Please configure the {0} ticket system first")]
        NotConfigured(PoolKind),

        /// No session for this pool is running
        #[error("{0} ticket operation is not running")]
        NotRunning(PoolKind),

        /// No session for any pool is running
        #[error("No ticket operations are currently running")]
        NothingRunning,
    }
}

pub use config::{ExhaustionPolicy, RuntimeSettings};
pub use consumer::Consumer;
pub use error::SessionError;
pub use flag::RunFlag;
pub use pool::PoolHandle;
pub use producer::Producer;
pub use registry::PoolRegistry;
pub use session::{LoopReport, Session, SessionReport, StopReason, TaskOutcome};

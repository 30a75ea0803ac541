//! Session lifecycle: one producer and one consumer bound to one pool.

use crate::config::RuntimeSettings;
use crate::consumer::Consumer;
use crate::error::SessionError;
use crate::flag::RunFlag;
use crate::metrics;
use crate::pool::PoolHandle;
use crate::producer::Producer;
use std::time::Duration;
use ticket_pool_core::PoolKind;
use tokio::task::JoinHandle;
use tokio::time::{Instant, timeout_at};
use tracing::{info, warn};

/// Why a loop left its running state.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StopReason {
    /// The loop decided the pool is done and cleared the flag itself
    Exhausted,
    /// The loop observed a flag cleared by someone else
    Cancelled,
}

/// Summary returned by a producer or consumer loop.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LoopReport {
    /// Why the loop stopped
    pub reason: StopReason,
    /// Tickets produced (producer) or retrieved (consumer) over the loop's lifetime
    pub tickets: u64,
}

/// How a loop task ended.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TaskOutcome {
    /// The loop returned on its own
    Completed(LoopReport),
    /// The loop outlived the grace period and was aborted
    Aborted,
    /// The task panicked or was cancelled by the runtime
    Failed(String),
}

impl TaskOutcome {
    /// The loop report, if the loop returned normally
    #[must_use]
    pub const fn report(&self) -> Option<LoopReport> {
        match self {
            Self::Completed(report) => Some(*report),
            Self::Aborted | Self::Failed(_) => None,
        }
    }
}

/// Result of stopping or awaiting a session.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SessionReport {
    /// Which pool the session drove
    pub kind: PoolKind,
    /// Producer task result
    pub producer: TaskOutcome,
    /// Consumer task result
    pub consumer: TaskOutcome,
}

impl SessionReport {
    /// Both loops returned on their own
    #[must_use]
    pub const fn is_graceful(&self) -> bool {
        matches!(
            (&self.producer, &self.consumer),
            (TaskOutcome::Completed(_), TaskOutcome::Completed(_))
        )
    }
}

/// A running producer/consumer pair.
///
/// Each session owns a fresh [`RunFlag`]. Either loop may clear it when the
/// pool is done, which ends the other loop on its next iteration.
#[derive(Debug)]
pub struct Session {
    kind: PoolKind,
    flag: RunFlag,
    producer: JoinHandle<LoopReport>,
    consumer: JoinHandle<LoopReport>,
}

impl Session {
    /// Launch a producer and a consumer on `pool`.
    ///
    /// # Errors
    ///
    /// Returns [`SessionError::NotConfigured`] if any configuration field of
    /// the pool is zero.
    pub async fn start(pool: PoolHandle, settings: &RuntimeSettings) -> Result<Self, SessionError> {
        let kind = pool.kind();
        if !pool.is_configured().await {
            return Err(SessionError::NotConfigured(kind));
        }

        let flag = RunFlag::running();
        let producer = tokio::spawn(Producer::new(pool.clone(), flag.clone(), settings).run());
        let consumer = tokio::spawn(Consumer::new(pool, flag.clone(), settings).run());

        metrics::record_session_started(kind);
        info!(pool = %kind, "Starting ticket operation");

        Ok(Self {
            kind,
            flag,
            producer,
            consumer,
        })
    }

    /// Which pool this session drives
    #[must_use]
    pub const fn kind(&self) -> PoolKind {
        self.kind
    }

    /// Whether the session flag is still set
    #[must_use]
    pub fn is_running(&self) -> bool {
        self.flag.is_running()
    }

    /// Clear the flag and wait up to `grace` for both loops to exit.
    ///
    /// Loops still running when the grace period elapses are aborted.
    pub async fn stop(self, grace: Duration) -> SessionReport {
        if self.flag.stop() {
            info!(pool = %self.kind, "Stopping ticket operation");
        }

        let deadline = Instant::now() + grace;
        let kind = self.kind;
        let producer = join_by(self.producer, deadline, kind).await;
        let consumer = join_by(self.consumer, deadline, kind).await;

        SessionReport {
            kind,
            producer,
            consumer,
        }
    }

    /// Wait for both loops to finish on their own.
    pub async fn wait(self) -> SessionReport {
        let (producer, consumer) = tokio::join!(self.producer, self.consumer);
        SessionReport {
            kind: self.kind,
            producer: outcome(producer),
            consumer: outcome(consumer),
        }
    }
}

async fn join_by(mut handle: JoinHandle<LoopReport>, deadline: Instant, kind: PoolKind) -> TaskOutcome {
    match timeout_at(deadline, &mut handle).await {
        Ok(joined) => outcome(joined),
        Err(_) => {
            warn!(pool = %kind, "Loop did not stop within the grace period, aborting");
            handle.abort();
            metrics::record_forced_stop(kind);
            TaskOutcome::Aborted
        },
    }
}

fn outcome(joined: Result<LoopReport, tokio::task::JoinError>) -> TaskOutcome {
    match joined {
        Ok(report) => TaskOutcome::Completed(report),
        Err(e) => TaskOutcome::Failed(e.to_string()),
    }
}

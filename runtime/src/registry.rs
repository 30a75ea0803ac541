//! The Normal and VIP pools with their sessions.

use crate::config::RuntimeSettings;
use crate::error::SessionError;
use crate::pool::PoolHandle;
use crate::session::{Session, SessionReport};
use futures::future::join_all;
use ticket_pool_core::{ConfigDocument, PoolConfig, PoolKind, PoolStatus};
use tracing::{info, warn};

#[derive(Debug)]
struct PoolSlot {
    pool: PoolHandle,
    session: Option<Session>,
}

impl PoolSlot {
    fn new(kind: PoolKind) -> Self {
        Self {
            pool: PoolHandle::new(kind),
            session: None,
        }
    }

    fn is_running(&self) -> bool {
        self.session.as_ref().is_some_and(Session::is_running)
    }
}

/// Owns both pools and at most one session per pool.
///
/// The pools share nothing: each has its own mutex, its own run flag and its
/// own tasks. Stopping or reconfiguring one never touches the other.
#[derive(Debug)]
pub struct PoolRegistry {
    settings: RuntimeSettings,
    normal: PoolSlot,
    vip: PoolSlot,
}

impl PoolRegistry {
    /// Two unconfigured pools
    #[must_use]
    pub fn new(settings: RuntimeSettings) -> Self {
        Self {
            settings,
            normal: PoolSlot::new(PoolKind::Normal),
            vip: PoolSlot::new(PoolKind::Vip),
        }
    }

    const fn slot(&self, kind: PoolKind) -> &PoolSlot {
        match kind {
            PoolKind::Normal => &self.normal,
            PoolKind::Vip => &self.vip,
        }
    }

    const fn slot_mut(&mut self, kind: PoolKind) -> &mut PoolSlot {
        match kind {
            PoolKind::Normal => &mut self.normal,
            PoolKind::Vip => &mut self.vip,
        }
    }

    /// Shared handle to a pool
    #[must_use]
    pub const fn pool(&self, kind: PoolKind) -> &PoolHandle {
        &self.slot(kind).pool
    }

    /// Replace a pool's configuration and empty it.
    ///
    /// Allowed while a session is running; the loops pick the new values up
    /// on their next iteration.
    pub async fn configure(&self, kind: PoolKind, config: PoolConfig) {
        if self.is_running(kind) {
            warn!(pool = %kind, "Reconfiguring a pool while its operation is running");
        }
        self.pool(kind).configure(config).await;
    }

    /// Start the producer/consumer session for a pool.
    ///
    /// A session that already finished on its own is replaced.
    ///
    /// # Errors
    ///
    /// - [`SessionError::AlreadyRunning`] if the pool's session is still running
    /// - [`SessionError::NotConfigured`] if the pool is not configured
    pub async fn start(&mut self, kind: PoolKind) -> Result<(), SessionError> {
        if self.is_running(kind) {
            return Err(SessionError::AlreadyRunning(kind));
        }

        let grace = self.settings.shutdown_grace;
        let session = Session::start(self.pool(kind).clone(), &self.settings).await?;

        if let Some(previous) = self.slot_mut(kind).session.replace(session) {
            previous.stop(grace).await;
        }
        Ok(())
    }

    /// Whether the pool's session is running
    #[must_use]
    pub fn is_running(&self, kind: PoolKind) -> bool {
        self.slot(kind).is_running()
    }

    /// Stop one pool's session.
    ///
    /// # Errors
    ///
    /// Returns [`SessionError::NotRunning`] if the pool has no running session.
    pub async fn stop(&mut self, kind: PoolKind) -> Result<SessionReport, SessionError> {
        if !self.is_running(kind) {
            return Err(SessionError::NotRunning(kind));
        }
        self.take_and_stop(kind)
            .await
            .ok_or(SessionError::NotRunning(kind))
    }

    /// Stop every running session, both pools concurrently.
    ///
    /// # Errors
    ///
    /// Returns [`SessionError::NothingRunning`] if neither pool is running.
    pub async fn stop_all(&mut self) -> Result<Vec<SessionReport>, SessionError> {
        if !PoolKind::ALL.iter().any(|kind| self.is_running(*kind)) {
            return Err(SessionError::NothingRunning);
        }
        let reports = self.shutdown().await;
        info!("All ticket operations stopped");
        Ok(reports)
    }

    /// Stop and reap every session, running or already finished.
    pub async fn shutdown(&mut self) -> Vec<SessionReport> {
        let grace = self.settings.shutdown_grace;
        let sessions = [self.normal.session.take(), self.vip.session.take()];

        join_all(sessions.into_iter().flatten().map(|s| s.stop(grace))).await
    }

    async fn take_and_stop(&mut self, kind: PoolKind) -> Option<SessionReport> {
        let grace = self.settings.shutdown_grace;
        let session = self.slot_mut(kind).session.take()?;
        Some(session.stop(grace).await)
    }

    /// Snapshot of one pool
    pub async fn status(&self, kind: PoolKind) -> PoolStatus {
        self.pool(kind).status().await
    }

    /// Current configuration of both pools, ready to persist.
    pub async fn export_document(&self) -> ConfigDocument {
        ConfigDocument::new(
            self.normal.pool.config().await,
            self.vip.pool.config().await,
        )
    }

    /// Apply a parsed configuration document to both pools.
    pub async fn load_document(&self, document: &ConfigDocument) {
        for kind in PoolKind::ALL {
            self.configure(kind, document.section(kind)).await;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn stop_all_without_sessions_reports_nothing_running() {
        let mut registry = PoolRegistry::new(RuntimeSettings::default());
        assert_eq!(registry.stop_all().await.err(), Some(SessionError::NothingRunning));
    }

    #[tokio::test]
    async fn stop_without_session_reports_not_running() {
        let mut registry = PoolRegistry::new(RuntimeSettings::default());
        assert_eq!(
            registry.stop(PoolKind::Vip).await.err(),
            Some(SessionError::NotRunning(PoolKind::Vip))
        );
    }

    #[tokio::test]
    async fn export_reflects_configuration() {
        let registry = PoolRegistry::new(RuntimeSettings::default());
        registry.configure(PoolKind::Vip, PoolConfig::new(9, 3, 2, 6)).await;

        let document = registry.export_document().await;
        assert_eq!(document.vip, PoolConfig::new(9, 3, 2, 6));
        assert_eq!(document.normal, PoolConfig::default());
    }
}

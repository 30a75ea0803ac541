//! Prometheus metrics for ticket pools and sessions.
//!
//! Every metric carries a `pool` label (`Normal` or `VIP`). Recording goes
//! through the `metrics` facade, so nothing is collected until a recorder is
//! installed with [`MetricsExporter::install`].
//!
//! # Example
//!
//! ```rust,no_run
//! use ticket_pool_runtime::metrics::MetricsExporter;
//!
//! # fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let exporter = MetricsExporter::install()?;
//! if let Some(text) = exporter.render() {
//!     println!("{text}");
//! }
//! # Ok(())
//! # }
//! ```

use metrics::{counter, describe_counter, describe_gauge, gauge};
use metrics_exporter_prometheus::{PrometheusBuilder, PrometheusHandle};
use thiserror::Error;
use ticket_pool_core::PoolKind;

/// Tickets moved from supply into a pool
pub const TICKETS_PRODUCED: &str = "ticket_pool_tickets_produced_total";
/// Tickets sold out of a pool
pub const TICKETS_RETRIEVED: &str = "ticket_pool_tickets_retrieved_total";
/// Tickets currently available in a pool
pub const CURRENT_TICKETS: &str = "ticket_pool_current_tickets";
/// Sessions started
pub const SESSIONS_STARTED: &str = "ticket_pool_sessions_started_total";
/// Session loops aborted after the grace period
pub const SESSIONS_FORCED_STOP: &str = "ticket_pool_sessions_forced_stop_total";

/// Errors from metrics operations.
#[derive(Error, Debug)]
pub enum MetricsError {
    /// Failed to install the Prometheus recorder
    #[error("Failed to install metrics recorder: {0}")]
    Install(String),
}

/// Installed Prometheus recorder.
pub struct MetricsExporter {
    handle: PrometheusHandle,
}

impl std::fmt::Debug for MetricsExporter {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("MetricsExporter").finish_non_exhaustive()
    }
}

impl MetricsExporter {
    /// Install the global Prometheus recorder and register metric descriptions.
    ///
    /// # Errors
    ///
    /// Returns [`MetricsError::Install`] if a global recorder is already set
    /// or the exporter cannot be built.
    pub fn install() -> Result<Self, MetricsError> {
        let handle = PrometheusBuilder::new()
            .install_recorder()
            .map_err(|e| MetricsError::Install(e.to_string()))?;

        register_metrics();
        tracing::debug!("Prometheus metrics recorder installed");

        Ok(Self { handle })
    }

    /// Render current metrics in Prometheus text format.
    #[must_use]
    pub fn render(&self) -> Option<String> {
        let text = self.handle.render();
        (!text.trim().is_empty()).then_some(text)
    }
}

fn register_metrics() {
    describe_counter!(TICKETS_PRODUCED, "Tickets released from supply into the pool");
    describe_counter!(TICKETS_RETRIEVED, "Tickets sold out of the pool");
    describe_gauge!(CURRENT_TICKETS, "Tickets currently available for purchase");
    describe_counter!(SESSIONS_STARTED, "Producer/consumer sessions started");
    describe_counter!(
        SESSIONS_FORCED_STOP,
        "Session loops aborted because they outlived the shutdown grace period"
    );
}

pub(crate) fn record_produced(kind: PoolKind, batch: u32, current: u32) {
    counter!(TICKETS_PRODUCED, "pool" => kind.label()).increment(u64::from(batch));
    gauge!(CURRENT_TICKETS, "pool" => kind.label()).set(f64::from(current));
}

pub(crate) fn record_retrieved(kind: PoolKind, batch: u32, current: u32) {
    counter!(TICKETS_RETRIEVED, "pool" => kind.label()).increment(u64::from(batch));
    gauge!(CURRENT_TICKETS, "pool" => kind.label()).set(f64::from(current));
}

pub(crate) fn record_session_started(kind: PoolKind) {
    counter!(SESSIONS_STARTED, "pool" => kind.label()).increment(1);
}

pub(crate) fn record_forced_stop(kind: PoolKind) {
    counter!(SESSIONS_FORCED_STOP, "pool" => kind.label()).increment(1);
}

pub(crate) fn record_reset(kind: PoolKind) {
    gauge!(CURRENT_TICKETS, "pool" => kind.label()).set(0.0);
}

#[cfg(test)]
mod tests {
    use super::*;

    // The recorder is process global, so this is the only test that installs it.
    #[test]
    fn exporter_renders_recorded_pool_metrics() {
        let Ok(exporter) = MetricsExporter::install() else {
            return;
        };

        record_produced(PoolKind::Vip, 5, 5);
        record_retrieved(PoolKind::Vip, 3, 2);
        record_session_started(PoolKind::Vip);

        let text = exporter.render().unwrap_or_default();
        assert!(text.contains(TICKETS_PRODUCED), "{text}");
        assert!(text.contains(TICKETS_RETRIEVED), "{text}");
        assert!(text.contains("pool=\"VIP\""), "{text}");
        assert!(MetricsExporter::install().is_err());
    }
}

//! Ticket system console.
//!
//! Reads menu choices from stdin. Logs go to stderr so they do not interleave
//! with prompts; filter them with `RUST_LOG`.

use ticket_pool_runtime::metrics::MetricsExporter;
use ticket_system::{AppConfig, TicketSystem};
use tokio::io::BufReader;
use tracing::{info, warn};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();

    // Initialize tracing
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "warn,ticket_pool_runtime=info,ticket_system=info".into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    let config = AppConfig::from_env();
    info!(
        shutdown_grace = ?config.runtime.shutdown_grace,
        capacity_wait = ?config.runtime.capacity_wait,
        exhaustion_policy = %config.runtime.exhaustion_policy,
        metrics = config.metrics_enabled,
        "Configuration loaded"
    );

    let mut system = TicketSystem::new(&config, BufReader::new(tokio::io::stdin()), tokio::io::stdout());
    if config.metrics_enabled {
        match MetricsExporter::install() {
            Ok(exporter) => system = system.with_metrics(exporter),
            Err(e) => warn!(error = %e, "Metrics disabled"),
        }
    }

    system.run().await?;
    Ok(())
}

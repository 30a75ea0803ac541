//! Configuration management for the ticket system.
//!
//! Loads configuration from environment variables with sensible defaults.

use std::env;
use std::time::Duration;
use ticket_pool_runtime::{ExhaustionPolicy, RuntimeSettings};

/// Application configuration loaded from environment variables.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AppConfig {
    /// Session timing and consumer policy
    pub runtime: RuntimeSettings,
    /// Install the Prometheus recorder at startup
    pub metrics_enabled: bool,
}

impl AppConfig {
    /// Load configuration from environment variables.
    ///
    /// | Variable | Default |
    /// |----------|---------|
    /// | `TICKET_SHUTDOWN_GRACE_SECS` | `5` |
    /// | `TICKET_CAPACITY_WAIT_MS` | `1000` |
    /// | `TICKET_EXHAUSTION_POLICY` | `first-empty` |
    /// | `TICKET_METRICS` | `true` |
    ///
    /// Unparseable values fall back to the default with a warning.
    #[must_use]
    pub fn from_env() -> Self {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Load configuration from an arbitrary key lookup.
    #[must_use]
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let defaults = RuntimeSettings::default();

        let shutdown_grace = parse_or(&lookup, "TICKET_SHUTDOWN_GRACE_SECS", defaults.shutdown_grace.as_secs());
        let capacity_wait = parse_or(
            &lookup,
            "TICKET_CAPACITY_WAIT_MS",
            u64::try_from(defaults.capacity_wait.as_millis()).unwrap_or(1_000),
        );
        let exhaustion_policy: ExhaustionPolicy =
            parse_or(&lookup, "TICKET_EXHAUSTION_POLICY", defaults.exhaustion_policy);
        let metrics_enabled = parse_or(&lookup, "TICKET_METRICS", true);

        Self {
            runtime: defaults
                .with_shutdown_grace(Duration::from_secs(shutdown_grace))
                .with_capacity_wait(Duration::from_millis(capacity_wait))
                .with_exhaustion_policy(exhaustion_policy),
            metrics_enabled,
        }
    }
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            runtime: RuntimeSettings::default(),
            metrics_enabled: true,
        }
    }
}

fn parse_or<T>(lookup: &impl Fn(&str) -> Option<String>, key: &str, default: T) -> T
where
    T: std::str::FromStr,
    T::Err: std::fmt::Display,
{
    match lookup(key) {
        None => default,
        Some(raw) => raw.trim().parse().unwrap_or_else(|e| {
            tracing::warn!(key, value = %raw, error = %e, "Ignoring invalid configuration value");
            default
        }),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| ((*k).to_string(), (*v).to_string()))
            .collect();
        move |key| map.get(key).cloned()
    }

    #[test]
    fn defaults_when_unset() {
        assert_eq!(AppConfig::from_lookup(lookup(&[])), AppConfig::default());
    }

    #[test]
    fn reads_every_variable() {
        let config = AppConfig::from_lookup(lookup(&[
            ("TICKET_SHUTDOWN_GRACE_SECS", "9"),
            ("TICKET_CAPACITY_WAIT_MS", "250"),
            ("TICKET_EXHAUSTION_POLICY", "supply-drained"),
            ("TICKET_METRICS", "false"),
        ]));

        assert_eq!(config.runtime.shutdown_grace, Duration::from_secs(9));
        assert_eq!(config.runtime.capacity_wait, Duration::from_millis(250));
        assert_eq!(config.runtime.exhaustion_policy, ExhaustionPolicy::SupplyDrained);
        assert!(!config.metrics_enabled);
    }

    #[test]
    fn invalid_values_fall_back_to_defaults() {
        let config = AppConfig::from_lookup(lookup(&[
            ("TICKET_SHUTDOWN_GRACE_SECS", "soon"),
            ("TICKET_EXHAUSTION_POLICY", "never"),
        ]));
        assert_eq!(config, AppConfig::default());
    }
}

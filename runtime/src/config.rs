//! Runtime settings shared by every session.

use std::fmt;
use std::str::FromStr;
use std::time::Duration;
use thiserror::Error;

/// How the consumer interprets an empty pool.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ExhaustionPolicy {
    /// The first empty retrieval ends the session, even if the producer
    /// still has supply to release.
    #[default]
    FirstEmpty,
    /// An empty retrieval ends the session only once the supply is gone too.
    /// Until then the consumer keeps polling at its own cadence.
    SupplyDrained,
}

impl ExhaustionPolicy {
    /// Name accepted by [`FromStr`]
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::FirstEmpty => "first-empty",
            Self::SupplyDrained => "supply-drained",
        }
    }
}

impl fmt::Display for ExhaustionPolicy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Unrecognized exhaustion policy name.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("unknown exhaustion policy \"{0}\" (expected \"first-empty\" or \"supply-drained\")")]
pub struct ParsePolicyError(pub String);

impl FromStr for ExhaustionPolicy {
    type Err = ParsePolicyError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "first-empty" => Ok(Self::FirstEmpty),
            "supply-drained" => Ok(Self::SupplyDrained),
            other => Err(ParsePolicyError(other.to_string())),
        }
    }
}

/// Timing and policy knobs for producer/consumer sessions.
///
/// # Default Values
///
/// - `shutdown_grace`: 5 seconds
/// - `capacity_wait`: 1 second
/// - `exhaustion_policy`: [`ExhaustionPolicy::FirstEmpty`]
///
/// # Example
///
/// ```
/// use std::time::Duration;
/// use ticket_pool_runtime::{ExhaustionPolicy, RuntimeSettings};
///
/// let settings = RuntimeSettings::default()
///     .with_shutdown_grace(Duration::from_secs(2))
///     .with_exhaustion_policy(ExhaustionPolicy::SupplyDrained);
/// assert_eq!(settings.capacity_wait, Duration::from_secs(1));
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RuntimeSettings {
    /// How long `stop` waits for both loops before aborting them
    pub shutdown_grace: Duration,
    /// Sleep between capacity re-checks while the pool is full.
    /// Also used as the loop delay when a rate has been reconfigured to zero.
    pub capacity_wait: Duration,
    /// Consumer behavior on an empty pool
    pub exhaustion_policy: ExhaustionPolicy,
}

impl RuntimeSettings {
    /// Set the shutdown grace period
    #[must_use]
    pub const fn with_shutdown_grace(mut self, grace: Duration) -> Self {
        self.shutdown_grace = grace;
        self
    }

    /// Set the capacity-wait interval
    #[must_use]
    pub const fn with_capacity_wait(mut self, wait: Duration) -> Self {
        self.capacity_wait = wait;
        self
    }

    /// Set the consumer exhaustion policy
    #[must_use]
    pub const fn with_exhaustion_policy(mut self, policy: ExhaustionPolicy) -> Self {
        self.exhaustion_policy = policy;
        self
    }
}

impl Default for RuntimeSettings {
    fn default() -> Self {
        Self {
            shutdown_grace: Duration::from_secs(5),
            capacity_wait: Duration::from_secs(1),
            exhaustion_policy: ExhaustionPolicy::default(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn policy_parses_known_names() {
        assert_eq!("first-empty".parse(), Ok(ExhaustionPolicy::FirstEmpty));
        assert_eq!(" Supply-Drained ".parse(), Ok(ExhaustionPolicy::SupplyDrained));
    }

    #[test]
    fn policy_rejects_unknown_names() {
        let err = "forever".parse::<ExhaustionPolicy>();
        assert_eq!(err, Err(ParsePolicyError("forever".to_string())));
    }

    #[test]
    fn policy_display_round_trips() {
        for policy in [ExhaustionPolicy::FirstEmpty, ExhaustionPolicy::SupplyDrained] {
            assert_eq!(policy.to_string().parse(), Ok(policy));
        }
    }
}

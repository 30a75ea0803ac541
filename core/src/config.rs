//! Pool configuration values.

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Errors raised when validating operator-supplied configuration.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ConfigError {
    /// A configuration value was zero
    #[error("{field} must be a positive number")]
    NonPositive {
        /// Name of the offending field
        field: &'static str,
    },
}

/// The four integers that configure a ticket pool.
///
/// Serialized with the field names used in the persisted configuration
/// document (`totalTickets`, `ticketReleaseRate`, ...).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PoolConfig {
    /// Supply not yet released into the pool
    pub total_tickets: u32,
    /// Tickets produced per batch, one batch per second
    pub ticket_release_rate: u32,
    /// Tickets consumed per batch, one batch per second
    pub customer_retrieval_rate: u32,
    /// Upper bound on tickets held in the pool at once
    pub max_ticket_capacity: u32,
}

impl PoolConfig {
    /// Persisted field names, in document order.
    pub const FIELD_NAMES: [&'static str; 4] = [
        "totalTickets",
        "ticketReleaseRate",
        "customerRetrievalRate",
        "maxTicketCapacity",
    ];

    /// Create a configuration without validation.
    ///
    /// Zero values are accepted and simply leave a pool unconfigured.
    #[must_use]
    pub const fn new(
        total_tickets: u32,
        ticket_release_rate: u32,
        customer_retrieval_rate: u32,
        max_ticket_capacity: u32,
    ) -> Self {
        Self {
            total_tickets,
            ticket_release_rate,
            customer_retrieval_rate,
            max_ticket_capacity,
        }
    }

    /// Create a configuration, rejecting zero values.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::NonPositive`] naming the first zero field.
    pub fn validated(
        total_tickets: u32,
        ticket_release_rate: u32,
        customer_retrieval_rate: u32,
        max_ticket_capacity: u32,
    ) -> Result<Self, ConfigError> {
        let config = Self::new(
            total_tickets,
            ticket_release_rate,
            customer_retrieval_rate,
            max_ticket_capacity,
        );

        match config.values().iter().position(|value| *value == 0) {
            Some(index) => Err(ConfigError::NonPositive {
                field: Self::FIELD_NAMES[index],
            }),
            None => Ok(config),
        }
    }

    /// True iff all four values are strictly positive.
    #[must_use]
    pub const fn is_complete(&self) -> bool {
        self.total_tickets > 0
            && self.ticket_release_rate > 0
            && self.customer_retrieval_rate > 0
            && self.max_ticket_capacity > 0
    }

    /// Values in [`Self::FIELD_NAMES`] order.
    #[must_use]
    pub const fn values(&self) -> [u32; 4] {
        [
            self.total_tickets,
            self.ticket_release_rate,
            self.customer_retrieval_rate,
            self.max_ticket_capacity,
        ]
    }
}

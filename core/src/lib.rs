//! # Ticket Pool Core
//!
//! Pure state and invariants for a bounded ticket pool.
//!
//! A [`TicketPool`] holds a finite supply (`total_tickets`) and an inventory of
//! tickets available for purchase (`current_tickets`) that never exceeds
//! `max_ticket_capacity`. Production moves tickets from supply into inventory,
//! consumption removes them from inventory. Both are rate limited per batch.
//!
//! This crate knows nothing about threads or tasks. Every mutation is a plain
//! `&mut self` method that preserves the invariants on its own; the runtime
//! crate is responsible for serializing access to a shared pool.
//!
//! ## Core Concepts
//!
//! - **Pool**: a named bounded inventory ([`PoolKind::Normal`] or [`PoolKind::Vip`])
//! - **Configuration**: four integers per pool ([`PoolConfig`])
//! - **Status**: a consistent copy of all six pool fields ([`PoolStatus`])
//! - **Document**: the persisted configuration of both pools ([`ConfigDocument`])
//!
//! ## Example
//!
//! ```
//! use ticket_pool_core::{AddOutcome, PoolConfig, PoolKind, TicketPool};
//!
//! let mut pool = TicketPool::new(PoolKind::Normal);
//! pool.configure(PoolConfig::new(12, 5, 3, 10));
//!
//! assert_eq!(pool.add_tickets(), AddOutcome::Added(5));
//! assert_eq!(pool.retrieve_tickets(), 3);
//! assert_eq!(pool.current_tickets(), 2);
//! ```

pub mod config;
pub mod document;
pub mod pool;
pub mod status;

pub use config::{ConfigError, PoolConfig};
pub use document::{ConfigDocument, DocumentError};
pub use pool::{AddOutcome, PoolKind, TicketPool};
pub use status::PoolStatus;

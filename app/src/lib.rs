//! Ticket System - operator console for two independent ticket pools
//!
//! The console drives a [`PoolRegistry`](ticket_pool_runtime::PoolRegistry)
//! holding a Normal and a VIP pool. Each pool is configured with four
//! integers, then started as a producer/consumer session that releases and
//! sells tickets at the configured rates until the supply runs out.
//!
//! # Menu
//!
//! ```text
//! 1. Configure Normal Ticket System     7. Normal Ticket Pool Status
//! 2. Configure VIP Ticket System        8. VIP Ticket Pool Status
//! 3. Start Normal Ticket Operation      9. Stop All Ticket Operation
//! 4. Start VIP Ticket Operation        10. Save Ticket System Configuration
//! 5. Change Normal Ticket Details      11. Load Ticket System Configuration
//! 6. Change VIP Ticket Details         12. Exit
//!                                      13. Show Metrics
//! ```
//!
//! All operator input is parsed here. The pool crates only ever see
//! well-typed, positive integers.

#![forbid(unsafe_code)]

pub mod app;
pub mod config;
pub mod console;
pub mod display;
pub mod error;
pub mod menu;
pub mod persistence;

pub use app::{Flow, TicketSystem};
pub use config::AppConfig;
pub use error::AppError;

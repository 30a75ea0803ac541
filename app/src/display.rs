//! Status formatting.

use ticket_pool_core::PoolStatus;

/// Render a status snapshot as console lines.
#[must_use]
pub fn status_lines(status: &PoolStatus, running: bool) -> Vec<String> {
    vec![
        format!("{} Ticket Pool Status:", status.kind),
        format!("Total Tickets: {}", status.total_tickets),
        format!("Current Tickets: {}", status.current_tickets),
        format!("Ticket Release Rate: {}", status.ticket_release_rate),
        format!("Customer Retrieval Rate: {}", status.customer_retrieval_rate),
        format!("Maximum Ticket Capacity: {}", status.max_ticket_capacity),
        format!("Operation: {}", if running { "running" } else { "stopped" }),
    ]
}

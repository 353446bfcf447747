//! Ticket notification sink backed by the tracing log.
//!
//! Stands in for the email/webhook delivery a production deployment would
//! wire here; both the customer confirmation and the internal alert are
//! emitted as structured log events.

use async_trait::async_trait;
use paydesk_core::error::Result;
use paydesk_core::ticket::{Ticket, TicketNotifier};

pub struct LoggingTicketNotifier;

impl LoggingTicketNotifier {
    pub fn new() -> Self {
        Self
    }
}

impl Default for LoggingTicketNotifier {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl TicketNotifier for LoggingTicketNotifier {
    async fn notify_created(&self, ticket: &Ticket) -> Result<()> {
        tracing::info!(
            ticket_id = %ticket.id,
            to = %ticket.email,
            "customer confirmation: your support ticket has been raised"
        );
        tracing::info!(
            ticket_id = %ticket.id,
            transaction_id = ?ticket.transaction_id,
            description = %ticket.description,
            "support team alert: new ticket awaiting triage"
        );
        Ok(())
    }
}

//! Ticket domain model and ticketing service seam.

use crate::error::Result;
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Opaque ticket identifier (e.g. `tic_a1b2c3d4`).
pub type TicketId = String;

/// Lifecycle status of a support ticket.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum TicketStatus {
    #[default]
    Open,
    InProgress,
    Resolved,
    Closed,
}

/// The slot values collected by the ticket sub-flow, ready for creation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TicketDraft {
    pub email: String,
    pub transaction_id: Option<String>,
    pub description: String,
}

/// A created support ticket. Never mutated by the dialogue engine.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Ticket {
    pub id: TicketId,
    pub email: String,
    pub transaction_id: Option<String>,
    pub description: String,
    pub status: TicketStatus,
    pub created_at: DateTime<Utc>,
}

/// Creates ticket records. The only engine-requested side effect with an
/// externally observable failure mode.
#[async_trait]
pub trait TicketingService: Send + Sync {
    /// Creates a ticket for the draft and returns the stored record.
    async fn create(&self, draft: &TicketDraft) -> Result<Ticket>;
}

/// Notifies the user and the support staff about a created ticket.
///
/// Outbound delivery (email etc.) is an external collaborator; a failure to
/// notify never fails the ticket itself.
#[async_trait]
pub trait TicketNotifier: Send + Sync {
    async fn notify_created(&self, ticket: &Ticket) -> Result<()>;
}

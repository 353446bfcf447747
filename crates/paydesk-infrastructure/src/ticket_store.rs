//! In-memory ticketing backend.

use async_trait::async_trait;
use chrono::Utc;
use paydesk_core::error::Result;
use paydesk_core::ticket::{Ticket, TicketDraft, TicketStatus, TicketingService};
use rand::Rng;
use std::collections::HashMap;
use std::sync::Arc;
use tokio::sync::RwLock;

/// Stores tickets in process memory and issues `tic_` ids.
pub struct InMemoryTicketStore {
    tickets: Arc<RwLock<HashMap<String, Ticket>>>,
}

impl InMemoryTicketStore {
    pub fn new() -> Self {
        Self {
            tickets: Arc::new(RwLock::new(HashMap::new())),
        }
    }

    fn next_id() -> String {
        let mut rng = rand::thread_rng();
        let suffix: String = (0..8)
            .map(|_| {
                let v: u8 = rng.gen_range(0..16);
                char::from_digit(v as u32, 16).unwrap_or('0')
            })
            .collect();
        format!("tic_{suffix}")
    }

    /// Returns all stored tickets.
    pub async fn list(&self) -> Vec<Ticket> {
        self.tickets.read().await.values().cloned().collect()
    }

    pub async fn find(&self, id: &str) -> Option<Ticket> {
        self.tickets.read().await.get(id).cloned()
    }

    pub async fn len(&self) -> usize {
        self.tickets.read().await.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.tickets.read().await.is_empty()
    }
}

impl Default for InMemoryTicketStore {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl TicketingService for InMemoryTicketStore {
    async fn create(&self, draft: &TicketDraft) -> Result<Ticket> {
        let ticket = Ticket {
            id: Self::next_id(),
            email: draft.email.clone(),
            transaction_id: draft.transaction_id.clone(),
            description: draft.description.clone(),
            status: TicketStatus::Open,
            created_at: Utc::now(),
        };
        let mut tickets = self.tickets.write().await;
        tickets.insert(ticket.id.clone(), ticket.clone());
        tracing::info!(ticket_id = %ticket.id, email = %ticket.email, "ticket created");
        Ok(ticket)
    }
}

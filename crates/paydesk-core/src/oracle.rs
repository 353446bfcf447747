//! Transaction status oracle seam.

use crate::error::Result;
use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Lifecycle state of a payment transaction.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TransactionState {
    Captured,
    Pending,
    Failed,
    Refunded,
}

impl fmt::Display for TransactionState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            TransactionState::Captured => "Captured",
            TransactionState::Pending => "Pending",
            TransactionState::Failed => "Failed",
            TransactionState::Refunded => "Refunded",
        };
        f.write_str(name)
    }
}

/// Status record for a single transaction, read-only from the engine's
/// perspective.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TransactionStatus {
    /// The transaction identifier (`pay_...`).
    pub id: String,
    /// Amount in minor units, when known.
    pub amount: Option<i64>,
    /// Current lifecycle state.
    pub state: TransactionState,
    /// Whether the state is expected to self-resolve without a ticket.
    pub solvable: bool,
}

/// Maps a transaction identifier to a status record or "not found".
#[async_trait]
pub trait TransactionOracle: Send + Sync {
    async fn status_of(&self, transaction_id: &str) -> Result<Option<TransactionStatus>>;
}

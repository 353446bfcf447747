//! Simulated transaction status oracle.
//!
//! Seeded reference records are checked first; unknown ids fall back to a
//! digit heuristic (odd final digit resolves to a self-solving Pending state,
//! even to Failed). Ids ending in a non-digit are reported as not found.

use async_trait::async_trait;
use paydesk_core::error::Result;
use paydesk_core::oracle::{TransactionOracle, TransactionState, TransactionStatus};
use std::collections::HashMap;

/// Deterministic oracle over a seeded record set plus a digit heuristic.
pub struct SimulatedTransactionOracle {
    seeded: HashMap<String, TransactionStatus>,
}

impl SimulatedTransactionOracle {
    /// Creates an oracle with the standard demo records.
    pub fn new() -> Self {
        let records = [
            ("pay_12345", 500, TransactionState::Captured, true),
            ("pay_67890", 1200, TransactionState::Failed, false),
            ("pay_abcde", 150, TransactionState::Refunded, true),
        ];
        let seeded = records
            .into_iter()
            .map(|(id, amount, state, solvable)| {
                (
                    id.to_string(),
                    TransactionStatus {
                        id: id.to_string(),
                        amount: Some(amount),
                        state,
                        solvable,
                    },
                )
            })
            .collect();
        Self { seeded }
    }

    /// Creates an oracle over caller-provided records only (heuristic still
    /// applies to unknown ids).
    pub fn with_records(records: impl IntoIterator<Item = TransactionStatus>) -> Self {
        Self {
            seeded: records
                .into_iter()
                .map(|status| (status.id.clone(), status))
                .collect(),
        }
    }
}

impl Default for SimulatedTransactionOracle {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl TransactionOracle for SimulatedTransactionOracle {
    async fn status_of(&self, transaction_id: &str) -> Result<Option<TransactionStatus>> {
        if let Some(status) = self.seeded.get(transaction_id) {
            return Ok(Some(status.clone()));
        }

        let last_digit = transaction_id
            .chars()
            .last()
            .and_then(|c| c.to_digit(10));

        Ok(last_digit.map(|digit| {
            if digit % 2 == 1 {
                TransactionStatus {
                    id: transaction_id.to_string(),
                    amount: None,
                    state: TransactionState::Pending,
                    solvable: true,
                }
            } else {
                TransactionStatus {
                    id: transaction_id.to_string(),
                    amount: None,
                    state: TransactionState::Failed,
                    solvable: false,
                }
            }
        }))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn seeded_records_win_over_the_heuristic() {
        let oracle = SimulatedTransactionOracle::new();
        // Ends in an even digit, but the seed says Failed with a known amount.
        let status = oracle.status_of("pay_67890").await.unwrap().unwrap();
        assert_eq!(status.state, TransactionState::Failed);
        assert_eq!(status.amount, Some(1200));
        assert!(!status.solvable);
    }

    #[tokio::test]
    async fn odd_final_digit_is_pending_and_solvable() {
        let oracle = SimulatedTransactionOracle::new();
        let status = oracle.status_of("pay_111111111").await.unwrap().unwrap();
        assert_eq!(status.state, TransactionState::Pending);
        assert!(status.solvable);
    }

    #[tokio::test]
    async fn even_final_digit_is_failed() {
        let oracle = SimulatedTransactionOracle::new();
        let status = oracle.status_of("pay_1234567892").await.unwrap().unwrap();
        assert_eq!(status.state, TransactionState::Failed);
        assert!(!status.solvable);
    }

    #[tokio::test]
    async fn non_digit_suffix_is_not_found() {
        let oracle = SimulatedTransactionOracle::new();
        assert!(oracle.status_of("pay_zzz").await.unwrap().is_none());
    }
}

//! In-memory feedback log.

use async_trait::async_trait;
use paydesk_core::error::Result;
use paydesk_core::feedback::{Feedback, FeedbackStore};
use std::sync::Arc;
use tokio::sync::RwLock;

/// Appends ratings to an in-process list.
pub struct InMemoryFeedbackStore {
    entries: Arc<RwLock<Vec<Feedback>>>,
}

impl InMemoryFeedbackStore {
    pub fn new() -> Self {
        Self {
            entries: Arc::new(RwLock::new(Vec::new())),
        }
    }

    /// Returns all recorded feedback, oldest first.
    pub async fn list(&self) -> Vec<Feedback> {
        self.entries.read().await.clone()
    }

    pub async fn len(&self) -> usize {
        self.entries.read().await.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.entries.read().await.is_empty()
    }
}

impl Default for InMemoryFeedbackStore {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl FeedbackStore for InMemoryFeedbackStore {
    async fn record(&self, feedback: Feedback) -> Result<()> {
        tracing::info!(rating = feedback.rating, comment = ?feedback.comment, "feedback recorded");
        self.entries.write().await.push(feedback);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn record_appends_in_order() {
        let store = InMemoryFeedbackStore::new();
        assert!(store.is_empty().await);
        store
            .record(Feedback::new(5, Some("Refund issue".to_string())).unwrap())
            .await
            .unwrap();
        store.record(Feedback::new(3, None).unwrap()).await.unwrap();

        let entries = store.list().await;
        assert_eq!(entries.len(), 2);
        assert_eq!(entries[0].rating, 5);
        assert_eq!(entries[0].comment.as_deref(), Some("Refund issue"));
        assert!(entries[1].comment.is_none());
    }
}

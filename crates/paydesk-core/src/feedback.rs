//! Satisfaction feedback model and store seam.

use crate::error::{PaydeskError, Result};
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// One satisfaction rating, recorded per completed feedback prompt.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Feedback {
    /// Rating from 1 to 5.
    pub rating: u8,
    /// Optional free-text tag (usually the last issue description).
    pub comment: Option<String>,
    pub created_at: DateTime<Utc>,
}

impl Feedback {
    /// Creates a feedback record, rejecting ratings outside 1..=5.
    pub fn new(rating: u8, comment: Option<String>) -> Result<Self> {
        if !(1..=5).contains(&rating) {
            return Err(PaydeskError::validation(format!(
                "rating must be between 1 and 5, got {rating}"
            )));
        }
        Ok(Self {
            rating,
            comment,
            created_at: Utc::now(),
        })
    }
}

/// Append-only store for feedback records.
#[async_trait]
pub trait FeedbackStore: Send + Sync {
    async fn record(&self, feedback: Feedback) -> Result<()>;
}

//! Content-safety guardrail seam.
//!
//! The actual classifier (keyword heuristic or a remote model) lives behind
//! [`GuardrailClassifier`]; the engine only consumes its verdict. The gate is
//! applied solely while a session is idle — inside a sub-flow any text is
//! accepted as the requested slot value.

use crate::error::Result;
use async_trait::async_trait;
use serde::{Deserialize, Serialize};

/// Coarse classification of an inbound message.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MessageCategory {
    /// A casual greeting or farewell.
    Greeting,
    /// An in-domain support inquiry.
    Inquiry,
    /// Off-topic for the support domain.
    Unrelated,
    /// A prompt-injection attempt.
    Injection,
}

/// Verdict returned by a guardrail classifier.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct GuardrailVerdict {
    pub safe: bool,
    pub category: MessageCategory,
}

impl GuardrailVerdict {
    pub fn safe(category: MessageCategory) -> Self {
        Self {
            safe: true,
            category,
        }
    }

    pub fn unsafe_as(category: MessageCategory) -> Self {
        Self {
            safe: false,
            category,
        }
    }
}

/// Maps raw message text to a safety verdict.
#[async_trait]
pub trait GuardrailClassifier: Send + Sync {
    async fn classify(&self, message: &str) -> Result<GuardrailVerdict>;
}

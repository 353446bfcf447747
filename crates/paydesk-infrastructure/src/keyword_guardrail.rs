//! Keyword-based guardrail classifier.
//!
//! A heuristic stand-in for an LLM classifier: substring matching against a
//! domain keyword list, plus a small set of prompt-injection patterns.

use async_trait::async_trait;
use paydesk_core::error::Result;
use paydesk_core::guardrail::{GuardrailClassifier, GuardrailVerdict, MessageCategory};

const DOMAIN_KEYWORDS: &[&str] = &[
    "payment",
    "transaction",
    "refund",
    "api",
    "dashboard",
    "webhook",
    "integration",
    "checkout",
    "settlement",
    "invoice",
    "link",
    "subscription",
    "order",
    "support",
    "ticket",
    "issue",
    "failed",
    "pending",
    "stuck",
    "deducted",
    "missing",
    "status",
    "id",
    "email",
    "help",
    "thanks",
    "thank",
    "bye",
    "ok",
    "okay",
    "done",
    "yes",
    "no",
    "one",
    "moment",
    "wait",
    "pricing",
    "fee",
    "charges",
    "sdk",
    "react",
    "node",
    "python",
    "mobile",
    "web",
    "code",
    "error",
    "money",
    "bank",
    "agent",
    "human",
    "captured",
    "authorized",
];

const INJECTION_PATTERNS: &[&str] = &[
    "ignore previous instructions",
    "system prompt",
    "you are a",
    "act as a",
    "jailbreak",
    "reveal your instructions",
];

const GREETINGS: &[&str] = &["hi", "hello", "hey", "ho", "good morning", "good evening"];

/// Substring-keyword guardrail classifier.
#[derive(Debug, Default, Clone, Copy)]
pub struct KeywordGuardrail;

impl KeywordGuardrail {
    pub fn new() -> Self {
        Self
    }
}

#[async_trait]
impl GuardrailClassifier for KeywordGuardrail {
    async fn classify(&self, message: &str) -> Result<GuardrailVerdict> {
        let lower = message.trim().to_lowercase();

        if INJECTION_PATTERNS.iter().any(|p| lower.contains(p)) {
            return Ok(GuardrailVerdict::unsafe_as(MessageCategory::Injection));
        }

        if GREETINGS.contains(&lower.as_str()) {
            return Ok(GuardrailVerdict::safe(MessageCategory::Greeting));
        }

        if DOMAIN_KEYWORDS.iter().any(|k| lower.contains(k)) {
            return Ok(GuardrailVerdict::safe(MessageCategory::Inquiry));
        }

        Ok(GuardrailVerdict::unsafe_as(MessageCategory::Unrelated))
    }
}

//! Ordered intent rules for the idle state.
//!
//! Idle intent detection is an explicit ordered list of (predicate, intent)
//! pairs evaluated top-to-bottom, first match wins, so the priority order is
//! visible and testable instead of being implied by nested conditionals.

use crate::config::EngineConfig;

/// The structural intents recognizable without consulting the knowledge base.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum IdleIntent {
    Greeting,
    Thanks,
    Ack,
    RequestAgent,
    RequestTicket,
    Diagnosis,
    TooShort,
}

/// A single classification rule.
#[derive(Debug, Clone)]
pub struct IntentRule {
    /// Stable rule name, used in logs and tests.
    pub name: &'static str,
    pub intent: IdleIntent,
    pub predicate: RulePredicate,
}

/// Predicate vocabulary for intent rules.
#[derive(Debug, Clone)]
pub enum RulePredicate {
    /// Whole trimmed lowercased message equals one of the words.
    ExactAnyOf(Vec<String>),
    /// Any word appears as a substring.
    ContainsAnyOf(Vec<String>),
    /// Every word appears as a substring.
    ContainsAllOf(Vec<String>),
    /// Message has fewer than this many whitespace-separated tokens.
    FewerTokensThan(usize),
}

impl RulePredicate {
    pub fn matches(&self, message: &str) -> bool {
        let lower = message.trim().to_lowercase();
        match self {
            RulePredicate::ExactAnyOf(words) => words.iter().any(|w| *w == lower),
            RulePredicate::ContainsAnyOf(words) => {
                words.iter().any(|w| lower.contains(w.as_str()))
            }
            RulePredicate::ContainsAllOf(words) => {
                words.iter().all(|w| lower.contains(w.as_str()))
            }
            RulePredicate::FewerTokensThan(n) => lower.split_whitespace().count() < *n,
        }
    }
}

/// Builds the default idle rule set from the configured word lists.
///
/// Order matters: small talk is handled before the short-query filter so a
/// bare "hi" greets instead of asking for details, and structural keywords
/// win over the knowledge base.
pub fn default_rules(config: &EngineConfig) -> Vec<IntentRule> {
    vec![
        IntentRule {
            name: "greeting",
            intent: IdleIntent::Greeting,
            predicate: RulePredicate::ExactAnyOf(config.greetings.words.clone()),
        },
        IntentRule {
            name: "thanks",
            intent: IdleIntent::Thanks,
            predicate: RulePredicate::ExactAnyOf(config.thanks.words.clone()),
        },
        IntentRule {
            name: "ack",
            intent: IdleIntent::Ack,
            predicate: RulePredicate::ExactAnyOf(config.acks.words.clone()),
        },
        IntentRule {
            name: "request_agent",
            intent: IdleIntent::RequestAgent,
            predicate: RulePredicate::ContainsAnyOf(config.agent_keywords.words.clone()),
        },
        IntentRule {
            name: "request_ticket",
            intent: IdleIntent::RequestTicket,
            predicate: RulePredicate::ContainsAnyOf(config.ticket_keywords.words.clone()),
        },
        IntentRule {
            name: "diagnosis_symptom",
            intent: IdleIntent::Diagnosis,
            predicate: RulePredicate::ContainsAnyOf(config.diagnosis_keywords.words.clone()),
        },
        IntentRule {
            name: "diagnosis_status_check",
            intent: IdleIntent::Diagnosis,
            predicate: RulePredicate::ContainsAllOf(config.status_check_pair.clone()),
        },
        IntentRule {
            name: "short_query",
            intent: IdleIntent::TooShort,
            predicate: RulePredicate::FewerTokensThan(config.min_tokens_for_lookup),
        },
    ]
}

/// Evaluates the rules top-to-bottom; first match wins.
pub fn classify(rules: &[IntentRule], message: &str) -> Option<IdleIntent> {
    rules
        .iter()
        .find(|rule| rule.predicate.matches(message))
        .map(|rule| rule.intent)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn rules() -> Vec<IntentRule> {
        default_rules(&EngineConfig::default())
    }

    #[test]
    fn greeting_wins_over_short_query_filter() {
        assert_eq!(classify(&rules(), "hi"), Some(IdleIntent::Greeting));
        assert_eq!(classify(&rules(), "Hello"), Some(IdleIntent::Greeting));
    }

    #[test]
    fn structural_keywords_are_detected() {
        let rules = rules();
        assert_eq!(
            classify(&rules, "connect me to a human please"),
            Some(IdleIntent::RequestAgent)
        );
        assert_eq!(
            classify(&rules, "I want to raise a ticket"),
            Some(IdleIntent::RequestTicket)
        );
        assert_eq!(
            classify(&rules, "my transaction failed yesterday"),
            Some(IdleIntent::Diagnosis)
        );
        assert_eq!(classify(&rules, "Check status"), Some(IdleIntent::Diagnosis));
    }

    #[test]
    fn status_alone_is_not_a_diagnosis() {
        // "status" without "check" falls through to the short-query filter.
        assert_eq!(classify(&rules(), "status"), Some(IdleIntent::TooShort));
    }

    #[test]
    fn long_unmatched_messages_fall_through() {
        assert_eq!(
            classify(&rules(), "when will my money be refunded to me"),
            None
        );
    }

    #[test]
    fn first_match_wins_in_declared_order() {
        // "raise" appears before the diagnosis keywords in the list, so a
        // message with both routes to the ticket sub-flow.
        assert_eq!(
            classify(&rules(), "raise something, it failed"),
            Some(IdleIntent::RequestTicket)
        );
    }
}

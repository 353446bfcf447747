//! Engine configuration.
//!
//! Every keyword set and affirmative/negative match site the dialogue engine
//! consults is named here, so the matching behavior is explicit and testable
//! rather than implied by nested conditionals. The defaults reproduce the
//! production word lists; deployments can override them via TOML.

use crate::error::Result;
use serde::{Deserialize, Serialize};

/// How a [`WordMatch`] compares its word set against an incoming message.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MatchStrategy {
    /// The whole (lowercased, trimmed) message must equal one of the words.
    Exact,
    /// One of the words must appear as a substring of the message.
    Substring,
}

/// A word set paired with an explicit match strategy.
///
/// Each transition that tests for affirmative/negative/cancel input names its
/// own `WordMatch`, so e.g. whether "yessir" counts as affirmative is a
/// configuration decision, not an accident of branch wording.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct WordMatch {
    pub words: Vec<String>,
    pub strategy: MatchStrategy,
}

impl WordMatch {
    pub fn exact<I: IntoIterator<Item = &'static str>>(words: I) -> Self {
        Self {
            words: words.into_iter().map(str::to_string).collect(),
            strategy: MatchStrategy::Exact,
        }
    }

    pub fn substring<I: IntoIterator<Item = &'static str>>(words: I) -> Self {
        Self {
            words: words.into_iter().map(str::to_string).collect(),
            strategy: MatchStrategy::Substring,
        }
    }

    /// Tests `message` against the word set. The message is lowercased and
    /// trimmed before comparison.
    pub fn matches(&self, message: &str) -> bool {
        let normalized = message.trim().to_lowercase();
        match self.strategy {
            MatchStrategy::Exact => self.words.iter().any(|w| *w == normalized),
            MatchStrategy::Substring => self.words.iter().any(|w| normalized.contains(w.as_str())),
        }
    }
}

/// Configuration for the dialogue engine and session lifecycle.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct EngineConfig {
    /// Exact-match small talk openers.
    pub greetings: WordMatch,
    /// Exact-match gratitude phrases.
    pub thanks: WordMatch,
    /// Exact-match bare acknowledgements ("yes", "ok", "done") in idle state.
    pub acks: WordMatch,
    /// Substring cues for requesting a live agent.
    pub agent_keywords: WordMatch,
    /// Substring cues for requesting a ticket.
    pub ticket_keywords: WordMatch,
    /// Substring symptoms that start a transaction diagnosis.
    pub diagnosis_keywords: WordMatch,
    /// Word pair that also starts a diagnosis when both appear ("status", "check").
    pub status_check_pair: Vec<String>,
    /// Substring terms marking an ambiguous payment query.
    pub payment_terms: WordMatch,

    /// Affirmative set when asking "does this answer your query?".
    pub satisfaction_affirmative: WordMatch,
    /// Affirmative set when offering to raise a ticket.
    pub ticket_offer_affirmative: WordMatch,
    /// Affirmative set when offering a live agent.
    pub agent_offer_affirmative: WordMatch,
    /// Affirmative set when asking "anything else?".
    pub anything_else_affirmative: WordMatch,
    /// Negative/closing set ("no", "bye", ...).
    pub negative_closing: WordMatch,
    /// Abort words while collecting a transaction id.
    pub cancel_words: WordMatch,
    /// Words attempting to skip the mandatory ticket transaction id.
    pub skip_words: WordMatch,

    /// Minimum whitespace-separated tokens before the knowledge base is consulted.
    pub min_tokens_for_lookup: usize,
    /// Idle seconds after which a session may be evicted.
    pub session_idle_timeout_secs: u64,
    /// Seconds between eviction sweeps.
    pub eviction_interval_secs: u64,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            greetings: WordMatch::exact(["hi", "hello", "hey", "ho"]),
            thanks: WordMatch::exact(["thanks", "thank you", "thx"]),
            acks: WordMatch::exact(["yes", "ok", "done"]),
            agent_keywords: WordMatch::substring(["agent", "human"]),
            ticket_keywords: WordMatch::substring(["ticket", "raise"]),
            diagnosis_keywords: WordMatch::substring([
                "failed", "stuck", "pending", "deducted", "missing",
            ]),
            status_check_pair: vec!["status".to_string(), "check".to_string()],
            payment_terms: WordMatch::substring([
                "payment",
                "transaction",
                "money",
                "refund",
                "status",
            ]),
            satisfaction_affirmative: WordMatch::exact(["yes", "sure", "yeah"]),
            ticket_offer_affirmative: WordMatch::exact(["yes", "sure", "ok"]),
            agent_offer_affirmative: WordMatch::exact(["yes", "sure", "please", "ok"]),
            anything_else_affirmative: WordMatch::exact(["yes", "yeah", "sure"]),
            negative_closing: WordMatch::substring(["no", "nah", "nope", "good", "nothing", "bye"]),
            cancel_words: WordMatch::exact(["cancel", "no", "stop"]),
            skip_words: WordMatch::substring(["skip", "no"]),
            min_tokens_for_lookup: 3,
            session_idle_timeout_secs: 30 * 60,
            eviction_interval_secs: 60,
        }
    }
}

impl EngineConfig {
    /// Parses a configuration from a TOML document. Missing fields fall back
    /// to the defaults.
    pub fn from_toml_str(raw: &str) -> Result<Self> {
        Ok(toml::from_str(raw)?)
    }

    /// Seconds between eviction sweeps, clamped to at least one second so a
    /// zero interval cannot panic the sweep task.
    pub fn sweep_interval_secs(&self) -> u64 {
        self.eviction_interval_secs.max(1)
    }
}

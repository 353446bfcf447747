//! Dialogue state enumeration.

use serde::{Deserialize, Serialize};
use std::fmt;

/// The finite set of dialogue states a session can be in.
///
/// Transitions between states are performed exclusively by the dialogue
/// engine; together with [`super::Scratch`] this fully determines the
/// engine's next decision.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum DialogueState {
    /// Neutral state: intent detection and the guardrail gate apply here.
    #[default]
    Idle,
    /// Waiting for a transaction id to diagnose.
    AwaitingTxId,
    /// A ticket (or satisfaction check) has been offered; see
    /// `Scratch::waiting_for_satisfaction` for which question is pending.
    OfferTicket,
    /// Collecting the ticket email slot.
    AwaitingEmail,
    /// Collecting the ticket transaction id slot (skipped if already known).
    AwaitingTxIdForTicket,
    /// Collecting the ticket issue description slot.
    AwaitingIssueDescription,
    /// Asking whether the raised ticket resolved the issue.
    CheckSatisfaction,
    /// A live agent connection has been offered.
    OfferAgent,
    /// Asking whether the user needs anything else.
    AwaitingAnythingElse,
    /// Waiting for a 1-5 rating.
    AwaitingFeedback,
}

impl DialogueState {
    /// True when the session has no sub-flow in progress, i.e. the guardrail
    /// gate and intent rules apply to the next message.
    pub fn is_idle(&self) -> bool {
        matches!(self, DialogueState::Idle)
    }
}

impl fmt::Display for DialogueState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            DialogueState::Idle => "IDLE",
            DialogueState::AwaitingTxId => "AWAITING_TX_ID",
            DialogueState::OfferTicket => "OFFER_TICKET",
            DialogueState::AwaitingEmail => "AWAITING_EMAIL",
            DialogueState::AwaitingTxIdForTicket => "AWAITING_TX_ID_FOR_TICKET",
            DialogueState::AwaitingIssueDescription => "AWAITING_ISSUE_DESCRIPTION",
            DialogueState::CheckSatisfaction => "CHECK_SATISFACTION",
            DialogueState::OfferAgent => "OFFER_AGENT",
            DialogueState::AwaitingAnythingElse => "AWAITING_ANYTHING_ELSE",
            DialogueState::AwaitingFeedback => "AWAITING_FEEDBACK",
        };
        f.write_str(name)
    }
}

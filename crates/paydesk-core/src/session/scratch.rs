//! Transient slot values for an in-progress sub-flow.

use serde::{Deserialize, Serialize};

/// Slot values being collected for the in-progress sub-flow.
///
/// Slots are populated in a fixed order (email, then transaction id, then
/// description); a later slot is never filled while an earlier required slot
/// is absent. Cleared whenever a sub-flow completes or aborts.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Scratch {
    /// Contact email for the ticket sub-flow.
    pub email: Option<String>,
    /// Transaction id, from diagnosis or from the ticket sub-flow.
    pub transaction_id: Option<String>,
    /// Free-text issue description for the ticket sub-flow.
    pub issue_description: Option<String>,
    /// Last completed issue description, kept as a feedback tag.
    pub last_issue: Option<String>,
    /// In `OfferTicket`, whether the pending question is a satisfaction check
    /// (true) or an explicit ticket offer (false).
    #[serde(default)]
    pub waiting_for_satisfaction: bool,
    /// Whether the ambiguous-payment branch already asked for details once.
    #[serde(default)]
    pub clarification_requested: bool,
}

impl Scratch {
    /// Resets every slot and flag.
    pub fn clear(&mut self) {
        *self = Scratch::default();
    }
}

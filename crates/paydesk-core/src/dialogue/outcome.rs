//! Engine decision types.
//!
//! The engine never performs side effects itself: it either replies directly,
//! replies while requesting a fire-and-forget effect, or hands the caller a
//! ticket draft and waits for the result to be fed back via
//! [`super::DialogueEngine::resume_ticket`].

use crate::feedback::Feedback;
use crate::ticket::TicketDraft;

/// A side effect the engine asks its caller to execute.
#[derive(Debug, Clone, PartialEq)]
pub enum EffectRequest {
    /// Hand the conversation (with transcript) to a live agent.
    HandoffToAgent { transcript: String },
    /// Record a satisfaction rating.
    RecordFeedback(Feedback),
}

/// One engine decision for one inbound message.
#[derive(Debug, Clone, PartialEq)]
pub enum EngineStep {
    /// Reply to the user; nothing else to do.
    Reply(String),
    /// Reply to the user and execute the requested effect. The reply does not
    /// depend on the effect's outcome.
    Effect { reply: String, request: EffectRequest },
    /// Create a ticket from the draft, then call `resume_ticket` with the
    /// result to obtain the reply.
    CreateTicket(TicketDraft),
}

impl EngineStep {
    /// The reply text, when this step carries one.
    pub fn reply_text(&self) -> Option<&str> {
        match self {
            EngineStep::Reply(text) => Some(text),
            EngineStep::Effect { reply, .. } => Some(reply),
            EngineStep::CreateTicket(_) => None,
        }
    }
}

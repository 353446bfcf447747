//! Session domain model.

use super::message::{ConversationMessage, MessageRole};
use super::scratch::Scratch;
use super::state::DialogueState;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// A single support conversation.
///
/// The session id is issued server-side; the client-supplied session key is
/// kept only as the store lookup key and never trusted as identity. History
/// is append-only and is used solely as context shipped to a live agent on
/// handoff.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Session {
    /// Server-issued unique identifier (UUID format).
    pub id: String,
    /// The untrusted client-side key this session is looked up by.
    pub client_key: String,
    /// Current dialogue state. Mutated only by the dialogue engine.
    pub state: DialogueState,
    /// Transient slots for the in-progress sub-flow.
    #[serde(default)]
    pub scratch: Scratch,
    /// Append-only conversation transcript.
    #[serde(default)]
    pub history: Vec<ConversationMessage>,
    /// When the session was created.
    pub created_at: DateTime<Utc>,
    /// When a message was last processed; drives idle eviction.
    pub last_active_at: DateTime<Utc>,
}

impl Session {
    /// Creates a fresh idle session for the given client key, issuing a new
    /// server-side id.
    pub fn new(client_key: impl Into<String>) -> Self {
        let now = Utc::now();
        Self {
            id: Uuid::new_v4().to_string(),
            client_key: client_key.into(),
            state: DialogueState::Idle,
            scratch: Scratch::default(),
            history: Vec::new(),
            created_at: now,
            last_active_at: now,
        }
    }

    /// Appends a user message to the transcript.
    pub fn push_user(&mut self, content: impl Into<String>) {
        self.history
            .push(ConversationMessage::now(MessageRole::User, content));
    }

    /// Appends a bot message to the transcript.
    pub fn push_bot(&mut self, content: impl Into<String>) {
        self.history
            .push(ConversationMessage::now(MessageRole::Bot, content));
    }

    /// Marks the session as active now.
    pub fn touch(&mut self) {
        self.last_active_at = Utc::now();
    }

    /// Renders the transcript for a live-agent handoff.
    pub fn transcript(&self) -> String {
        self.history
            .iter()
            .map(|m| {
                let role = match m.role {
                    MessageRole::User => "user",
                    MessageRole::Bot => "bot",
                };
                format!("{}: {}", role, m.content)
            })
            .collect::<Vec<_>>()
            .join("\n")
    }
}

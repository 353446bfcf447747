//! Paydesk application layer.
//!
//! Orchestrates the dialogue engine against the pluggable backends: one
//! [`ChatService`] per deployment, handling the message pipeline and the
//! session eviction scheduler.

mod chat_service;

pub use chat_service::{ChatReply, ChatService};

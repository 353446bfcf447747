//! Session domain module.
//!
//! - `model`: the core [`Session`] entity
//! - `state`: the [`DialogueState`] enumeration
//! - `scratch`: transient sub-flow slots ([`Scratch`])
//! - `message`: conversation transcript types
//! - `store`: the [`SessionStore`] persistence trait

mod message;
mod model;
mod scratch;
mod state;
mod store;

pub use message::{ConversationMessage, MessageRole};
pub use model::Session;
pub use scratch::Scratch;
pub use state::DialogueState;
pub use store::SessionStore;

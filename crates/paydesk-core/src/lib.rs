//! Paydesk core domain layer.
//!
//! Contains the dialogue state machine, session model, validation helpers,
//! and the trait seams for every external collaborator (guardrail classifier,
//! knowledge lookup, transaction oracle, ticketing, feedback, sessions).
//! Implementations live in `paydesk-infrastructure`; orchestration lives in
//! `paydesk-application`.

pub mod config;
pub mod dialogue;
pub mod error;
pub mod feedback;
pub mod guardrail;
pub mod knowledge;
pub mod oracle;
pub mod session;
pub mod ticket;
pub mod validation;

// Re-export common error type
pub use error::{PaydeskError, Result};

//! In-memory and simulated implementations of the paydesk-core collaborator
//! traits: session storage, guardrail classification, knowledge lookup, the
//! transaction oracle, ticketing, and feedback recording.

pub mod feedback_store;
pub mod in_memory_session_store;
pub mod keyword_guardrail;
pub mod keyword_knowledge;
pub mod notifier;
pub mod simulated_oracle;
pub mod ticket_store;

pub use feedback_store::InMemoryFeedbackStore;
pub use in_memory_session_store::InMemorySessionStore;
pub use keyword_guardrail::KeywordGuardrail;
pub use keyword_knowledge::KeywordKnowledgeBase;
pub use notifier::LoggingTicketNotifier;
pub use simulated_oracle::SimulatedTransactionOracle;
pub use ticket_store::InMemoryTicketStore;

//! Dialogue engine module.
//!
//! - `engine`: the canonical state machine ([`DialogueEngine`])
//! - `rules`: ordered idle-intent rules
//! - `outcome`: engine decision types ([`EngineStep`], [`EffectRequest`])
//! - `reply`: the reply catalog

pub mod reply;
pub mod rules;

mod engine;
mod outcome;

pub use engine::DialogueEngine;
pub use outcome::{EffectRequest, EngineStep};
pub use rules::{IdleIntent, IntentRule, RulePredicate};

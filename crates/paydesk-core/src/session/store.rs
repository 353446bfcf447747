//! Session store trait.
//!
//! Defines the interface for session persistence, decoupling the dialogue
//! engine from the backing store (in-memory map for tests and single-node
//! deployments, an external cache in production).

use super::model::Session;
use crate::error::Result;
use async_trait::async_trait;
use chrono::Duration;

/// An abstract store for short-lived conversation sessions.
///
/// # Concurrency
///
/// Implementations must support safe concurrent insertion of new sessions.
/// The store does not serialize message delivery within one session; callers
/// are expected to deliver at most one in-flight message per session (e.g.
/// via a per-session queue or mutex) to preserve the engine's
/// sequential-transition assumption.
#[async_trait]
pub trait SessionStore: Send + Sync {
    /// Looks up the session for `client_key`, creating a fresh idle session
    /// (with a server-issued id) on first sight.
    async fn resolve(&self, client_key: &str) -> Result<Session>;

    /// Finds an existing session without creating one.
    async fn find(&self, client_key: &str) -> Result<Option<Session>>;

    /// Persists a session snapshot.
    async fn save(&self, session: &Session) -> Result<()>;

    /// Removes a session. Removing an absent session is not an error.
    async fn delete(&self, client_key: &str) -> Result<()>;

    /// Evicts every session idle for longer than `max_idle`, returning the
    /// number of sessions removed.
    async fn evict_idle(&self, max_idle: Duration) -> Result<usize>;

    /// Number of live sessions.
    async fn len(&self) -> usize;

    /// True when no sessions are live.
    async fn is_empty(&self) -> bool {
        self.len().await == 0
    }
}

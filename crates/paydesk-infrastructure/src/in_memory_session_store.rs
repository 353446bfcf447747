//! In-memory session store.
//!
//! The default backing for tests and single-node deployments. A production
//! deployment can put an external cache behind the same trait.

use async_trait::async_trait;
use chrono::{Duration, Utc};
use paydesk_core::error::Result;
use paydesk_core::session::{Session, SessionStore};
use std::collections::HashMap;
use std::sync::Arc;
use tokio::sync::RwLock;

/// Process-local session store keyed by the untrusted client key.
///
/// Each stored session carries its own server-issued id; the client key is
/// only the lookup key. Concurrent insertion of new sessions is safe; callers
/// must still serialize message delivery per session.
#[derive(Default, Clone)]
pub struct InMemorySessionStore {
    sessions: Arc<RwLock<HashMap<String, Session>>>,
}

impl InMemorySessionStore {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl SessionStore for InMemorySessionStore {
    async fn resolve(&self, client_key: &str) -> Result<Session> {
        let mut sessions = self.sessions.write().await;
        let session = sessions
            .entry(client_key.to_string())
            .or_insert_with(|| Session::new(client_key));
        Ok(session.clone())
    }

    async fn find(&self, client_key: &str) -> Result<Option<Session>> {
        let sessions = self.sessions.read().await;
        Ok(sessions.get(client_key).cloned())
    }

    async fn save(&self, session: &Session) -> Result<()> {
        let mut sessions = self.sessions.write().await;
        sessions.insert(session.client_key.clone(), session.clone());
        Ok(())
    }

    async fn delete(&self, client_key: &str) -> Result<()> {
        let mut sessions = self.sessions.write().await;
        sessions.remove(client_key);
        Ok(())
    }

    async fn evict_idle(&self, max_idle: Duration) -> Result<usize> {
        let cutoff = Utc::now() - max_idle;
        let mut sessions = self.sessions.write().await;
        let before = sessions.len();
        sessions.retain(|_, session| session.last_active_at > cutoff);
        let evicted = before - sessions.len();
        if evicted > 0 {
            tracing::info!(evicted, remaining = sessions.len(), "evicted idle sessions");
        }
        Ok(evicted)
    }

    async fn len(&self) -> usize {
        self.sessions.read().await.len()
    }
}

//! Chat orchestration service.
//!
//! `ChatService` owns the full per-message pipeline: session resolution, the
//! idle-state guardrail gate, dialogue engine dispatch, and execution of the
//! effects the engine requests (ticket creation, agent handoff, feedback
//! recording). The engine itself stays pure; everything with an external
//! failure mode happens here.

use paydesk_core::config::EngineConfig;
use paydesk_core::dialogue::{reply, DialogueEngine, EffectRequest, EngineStep};
use paydesk_core::error::{PaydeskError, Result};
use paydesk_core::feedback::{Feedback, FeedbackStore};
use paydesk_core::guardrail::{GuardrailClassifier, MessageCategory};
use paydesk_core::knowledge::KnowledgeLookup;
use paydesk_core::oracle::TransactionOracle;
use paydesk_core::session::{DialogueState, Session, SessionStore};
use paydesk_core::ticket::{TicketDraft, TicketNotifier, TicketingService};
use paydesk_infrastructure::{
    InMemoryFeedbackStore, InMemorySessionStore, InMemoryTicketStore, KeywordGuardrail,
    KeywordKnowledgeBase, LoggingTicketNotifier, SimulatedTransactionOracle,
};
use serde::Serialize;
use std::sync::Arc;

/// What the transport layer sends back for one inbound message.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ChatReply {
    /// The bot's reply text (may contain `**bold**` emphasis).
    pub response: String,
    /// True when the session now expects a 1-5 rating, so the client can
    /// render a rating prompt.
    pub feedback_request: bool,
}

pub struct ChatService {
    engine: DialogueEngine,
    sessions: Arc<dyn SessionStore>,
    guardrail: Arc<dyn GuardrailClassifier>,
    ticketing: Arc<dyn TicketingService>,
    notifier: Arc<dyn TicketNotifier>,
    feedback: Arc<dyn FeedbackStore>,
}

impl ChatService {
    #[allow(clippy::too_many_arguments)]
    pub fn new(
        config: EngineConfig,
        sessions: Arc<dyn SessionStore>,
        guardrail: Arc<dyn GuardrailClassifier>,
        knowledge: Arc<dyn KnowledgeLookup>,
        oracle: Arc<dyn TransactionOracle>,
        ticketing: Arc<dyn TicketingService>,
        notifier: Arc<dyn TicketNotifier>,
        feedback: Arc<dyn FeedbackStore>,
    ) -> Self {
        Self {
            engine: DialogueEngine::new(config, knowledge, oracle),
            sessions,
            guardrail,
            ticketing,
            notifier,
            feedback,
        }
    }

    /// Wires the service with the in-memory/simulated backends. Suitable for
    /// the CLI and single-node deployments.
    pub fn in_memory(config: EngineConfig) -> Self {
        Self::new(
            config,
            Arc::new(InMemorySessionStore::new()),
            Arc::new(KeywordGuardrail::new()),
            Arc::new(KeywordKnowledgeBase::new()),
            Arc::new(SimulatedTransactionOracle::new()),
            Arc::new(InMemoryTicketStore::new()),
            Arc::new(LoggingTicketNotifier::new()),
            Arc::new(InMemoryFeedbackStore::new()),
        )
    }

    /// Processes one inbound message for the session keyed by `client_key`.
    pub async fn handle_message(&self, client_key: &str, message: &str) -> Result<ChatReply> {
        let client_key = client_key.trim();
        let message = message.trim();
        if client_key.is_empty() {
            return Err(PaydeskError::validation("session key must not be empty"));
        }
        if message.is_empty() {
            return Err(PaydeskError::validation("message must not be empty"));
        }

        let mut session = self.sessions.resolve(client_key).await?;
        session.push_user(message);

        // The guardrail gates only fresh topics; inside a sub-flow any text
        // is the slot value being collected.
        if session.state.is_idle() {
            if let Some(blocked_reply) = self.gate(&session, message).await {
                session.push_bot(&blocked_reply);
                session.touch();
                self.sessions.save(&session).await?;
                return Ok(ChatReply {
                    response: blocked_reply,
                    feedback_request: false,
                });
            }
        }

        let step = self.engine.handle(&mut session, message).await?;
        let response = match step {
            EngineStep::Reply(text) => text,
            EngineStep::Effect { reply, request } => {
                self.execute_effect(&session, request).await;
                reply
            }
            EngineStep::CreateTicket(draft) => self.create_ticket(&mut session, draft).await,
        };

        session.push_bot(&response);
        session.touch();
        let feedback_request = session.state == DialogueState::AwaitingFeedback;
        self.sessions.save(&session).await?;

        Ok(ChatReply {
            response,
            feedback_request,
        })
    }

    /// Records a rating submitted out of band (e.g. a widget the client shows
    /// when `feedback_request` was true). Independent of session state.
    pub async fn submit_rating(
        &self,
        client_key: &str,
        rating: u8,
        comment: Option<String>,
    ) -> Result<()> {
        let feedback = Feedback::new(rating, comment)?;
        tracing::info!(%client_key, rating, "rating submitted");
        self.feedback.record(feedback).await
    }

    /// Runs the guardrail and returns the canned reply for blocked input, or
    /// `None` to let the message through. Classifier failures let the message
    /// through; the engine's own fallbacks are safer than refusing service.
    async fn gate(&self, session: &Session, message: &str) -> Option<String> {
        let verdict = match self.guardrail.classify(message).await {
            Ok(verdict) => verdict,
            Err(error) => {
                tracing::warn!(session_id = %session.id, %error, "guardrail classifier failed");
                return None;
            }
        };
        match verdict.category {
            MessageCategory::Injection => Some(reply::injection_refusal()),
            // Very short off-topic messages ("ok", "hm") fall through to the
            // engine rather than being lectured about scope.
            MessageCategory::Unrelated if message.split_whitespace().count() > 2 => {
                Some(reply::off_topic_redirect())
            }
            _ => None,
        }
    }

    async fn create_ticket(&self, session: &mut Session, draft: TicketDraft) -> String {
        match self.ticketing.create(&draft).await {
            Ok(ticket) => {
                if let Err(error) = self.notifier.notify_created(&ticket).await {
                    // The ticket exists; a missed notification is not fatal.
                    tracing::warn!(ticket_id = %ticket.id, %error, "ticket notification failed");
                }
                self.engine.resume_ticket(session, Ok(ticket.id))
            }
            Err(error) => self.engine.resume_ticket(session, Err(error)),
        }
    }

    async fn execute_effect(&self, session: &Session, request: EffectRequest) {
        match request {
            EffectRequest::HandoffToAgent { transcript } => {
                tracing::info!(session_id = %session.id, "live agent handoff requested");
                tracing::debug!(session_id = %session.id, %transcript, "handoff transcript");
            }
            EffectRequest::RecordFeedback(feedback) => {
                if let Err(error) = self.feedback.record(feedback).await {
                    tracing::error!(session_id = %session.id, %error, "failed to record feedback");
                }
            }
        }
    }

    /// Starts the background sweep that evicts idle sessions, using the
    /// timeout and interval from the engine configuration. Idempotent: a
    /// second call is a no-op.
    pub fn start_eviction_scheduler(self: &Arc<Self>) {
        use std::sync::atomic::{AtomicBool, Ordering};
        use std::time::Duration;
        use tokio::time::interval;

        static SCHEDULER_RUNNING: AtomicBool = AtomicBool::new(false);
        if SCHEDULER_RUNNING.swap(true, Ordering::SeqCst) {
            tracing::warn!("eviction scheduler already running, skipping");
            return;
        }

        let service = Arc::clone(self);
        let max_idle = chrono::Duration::seconds(
            self.engine.config().session_idle_timeout_secs as i64,
        );
        let interval_secs = self.engine.config().sweep_interval_secs();

        tokio::spawn(async move {
            let mut ticker = interval(Duration::from_secs(interval_secs));
            tracing::info!(interval_secs, "eviction scheduler started");
            loop {
                ticker.tick().await;
                match service.sessions.evict_idle(max_idle).await {
                    Ok(0) => {}
                    Ok(evicted) => tracing::info!(evicted, "idle sessions evicted"),
                    Err(error) => tracing::error!(%error, "eviction sweep failed"),
                }
            }
        });
    }
}

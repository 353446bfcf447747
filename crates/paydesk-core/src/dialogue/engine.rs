//! The dialogue state machine.
//!
//! One canonical transition table, parameterized by a pluggable knowledge
//! lookup and transaction oracle. The engine's decision is a function of
//! (state, scratch, input, lookup results) only; side effects with an
//! observable failure mode (ticket creation) are requested from the caller
//! and their result fed back via [`DialogueEngine::resume_ticket`].

use super::outcome::{EffectRequest, EngineStep};
use super::reply;
use super::rules::{self, IdleIntent, IntentRule};
use crate::config::EngineConfig;
use crate::error::{PaydeskError, Result};
use crate::feedback::Feedback;
use crate::knowledge::KnowledgeLookup;
use crate::oracle::TransactionOracle;
use crate::session::{DialogueState, Session};
use crate::ticket::{TicketDraft, TicketId};
use crate::validation::{is_valid_email, is_valid_transaction_id};
use once_cell::sync::Lazy;
use regex::Regex;
use std::sync::Arc;

static DIGIT_RUN_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"\d+").expect("digit regex"));

/// The dialogue engine.
///
/// Thread-safe and stateless across calls; all conversation state lives in
/// the [`Session`] passed to [`handle`](Self::handle).
pub struct DialogueEngine {
    config: EngineConfig,
    rules: Vec<IntentRule>,
    knowledge: Arc<dyn KnowledgeLookup>,
    oracle: Arc<dyn TransactionOracle>,
}

impl DialogueEngine {
    pub fn new(
        config: EngineConfig,
        knowledge: Arc<dyn KnowledgeLookup>,
        oracle: Arc<dyn TransactionOracle>,
    ) -> Self {
        let rules = rules::default_rules(&config);
        Self {
            config,
            rules,
            knowledge,
            oracle,
        }
    }

    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    /// Dispatches one inbound message against the current session state.
    ///
    /// Lookup failures (knowledge base, oracle) are degraded to misses at
    /// this boundary; they never reach the user as raw errors.
    pub async fn handle(&self, session: &mut Session, message: &str) -> Result<EngineStep> {
        let step = match session.state {
            DialogueState::Idle => self.on_idle(session, message).await?,
            DialogueState::AwaitingTxId => self.on_awaiting_tx_id(session, message).await,
            DialogueState::OfferTicket => self.on_offer_ticket(session, message),
            DialogueState::AwaitingEmail => self.on_awaiting_email(session, message),
            DialogueState::AwaitingTxIdForTicket => {
                self.on_awaiting_tx_id_for_ticket(session, message)
            }
            DialogueState::AwaitingIssueDescription => {
                self.on_awaiting_issue_description(session, message)
            }
            DialogueState::CheckSatisfaction => self.on_check_satisfaction(session, message),
            DialogueState::OfferAgent => self.on_offer_agent(session, message),
            DialogueState::AwaitingAnythingElse => self.on_awaiting_anything_else(session, message),
            DialogueState::AwaitingFeedback => self.on_awaiting_feedback(session, message)?,
        };
        tracing::debug!(
            session_id = %session.id,
            state = %session.state,
            "dialogue transition"
        );
        Ok(step)
    }

    /// Feeds the result of a requested ticket creation back into the machine
    /// and returns the user-facing reply.
    ///
    /// On success the ticket sub-flow slots are cleared (the description is
    /// retained as the feedback tag) and the session moves to the post-ticket
    /// satisfaction check. On failure the session resets to idle; the
    /// creation is not retried.
    pub fn resume_ticket(
        &self,
        session: &mut Session,
        result: std::result::Result<TicketId, PaydeskError>,
    ) -> String {
        match result {
            Ok(ticket_id) => {
                session.scratch.last_issue = session.scratch.issue_description.take();
                session.scratch.email = None;
                session.scratch.transaction_id = None;
                session.scratch.waiting_for_satisfaction = false;
                session.scratch.clarification_requested = false;
                session.state = DialogueState::CheckSatisfaction;
                reply::ticket_created(&ticket_id)
            }
            Err(error) => {
                tracing::error!(session_id = %session.id, %error, "ticket creation failed");
                session.state = DialogueState::Idle;
                session.scratch.clear();
                reply::ticket_failed()
            }
        }
    }

    async fn on_idle(&self, session: &mut Session, message: &str) -> Result<EngineStep> {
        match rules::classify(&self.rules, message) {
            Some(IdleIntent::Greeting) => Ok(EngineStep::Reply(reply::greeting())),
            Some(IdleIntent::Thanks) => Ok(EngineStep::Reply(reply::thanks())),
            Some(IdleIntent::Ack) => Ok(EngineStep::Reply(reply::acknowledged())),
            Some(IdleIntent::RequestAgent) => {
                session.state = DialogueState::OfferAgent;
                Ok(EngineStep::Reply(reply::offer_agent()))
            }
            Some(IdleIntent::RequestTicket) => {
                session.state = DialogueState::AwaitingEmail;
                Ok(EngineStep::Reply(reply::ask_email_for_ticket()))
            }
            Some(IdleIntent::Diagnosis) => {
                session.state = DialogueState::AwaitingTxId;
                session.scratch.clarification_requested = false;
                Ok(EngineStep::Reply(reply::ask_transaction_id()))
            }
            // Too little to search on; ask for more without changing state.
            Some(IdleIntent::TooShort) => Ok(EngineStep::Reply(reply::clarify_short_query())),
            None => Ok(self.on_idle_lookup(session, message).await),
        }
    }

    /// No structural intent matched: consult the knowledge base, then fall
    /// back to the two-stage ambiguous-payment clarification.
    async fn on_idle_lookup(&self, session: &mut Session, message: &str) -> EngineStep {
        let passage = match self.knowledge.search(message).await {
            Ok(passage) => passage,
            Err(error) => {
                tracing::warn!(%error, "knowledge lookup failed; treating as miss");
                None
            }
        };

        if let Some(passage) = passage {
            session.state = DialogueState::OfferTicket;
            session.scratch.waiting_for_satisfaction = true;
            session.scratch.clarification_requested = false;
            return EngineStep::Reply(reply::knowledge_answer(&passage));
        }

        if self.config.payment_terms.matches(message) {
            if session.scratch.clarification_requested {
                // Already asked once; move on to offering a ticket.
                session.state = DialogueState::OfferTicket;
                session.scratch.waiting_for_satisfaction = false;
                session.scratch.clarification_requested = false;
                return EngineStep::Reply(reply::offer_ticket_after_clarification());
            }
            session.scratch.clarification_requested = true;
            return EngineStep::Reply(reply::clarify_payment_issue());
        }

        EngineStep::Reply(reply::fallback())
    }

    async fn on_awaiting_tx_id(&self, session: &mut Session, message: &str) -> EngineStep {
        let candidate = message.trim();
        if is_valid_transaction_id(candidate) {
            let status = match self.oracle.status_of(candidate).await {
                Ok(status) => status,
                Err(error) => {
                    tracing::warn!(%error, "transaction oracle failed; treating as not found");
                    None
                }
            };
            return match status {
                Some(status) if status.solvable => {
                    session.scratch.transaction_id = Some(candidate.to_string());
                    session.state = DialogueState::OfferTicket;
                    session.scratch.waiting_for_satisfaction = true;
                    EngineStep::Reply(format!(
                        "{}{}",
                        reply::transaction_status(&status),
                        reply::status_solvable_epilogue()
                    ))
                }
                Some(status) => {
                    session.scratch.transaction_id = Some(candidate.to_string());
                    session.state = DialogueState::OfferTicket;
                    session.scratch.waiting_for_satisfaction = false;
                    EngineStep::Reply(format!(
                        "{}{}",
                        reply::transaction_status(&status),
                        reply::status_needs_ticket_epilogue()
                    ))
                }
                // Lookup miss is a normal branch; keep waiting for an id.
                None => EngineStep::Reply(reply::transaction_not_found(candidate)),
            };
        }

        if self.config.cancel_words.matches(message) {
            session.state = DialogueState::Idle;
            session.scratch.clear();
            return EngineStep::Reply(reply::cancelled());
        }

        EngineStep::Reply(reply::invalid_transaction_id())
    }

    fn on_offer_ticket(&self, session: &mut Session, message: &str) -> EngineStep {
        if session.scratch.waiting_for_satisfaction {
            // Pending question: "does this answer your query?"
            if self.config.satisfaction_affirmative.matches(message) {
                session.state = DialogueState::AwaitingAnythingElse;
                session.scratch.clear();
                return EngineStep::Reply(reply::satisfied_anything_else());
            }
            session.scratch.waiting_for_satisfaction = false;
            return EngineStep::Reply(reply::still_concerned_offer_ticket());
        }

        // Pending question: "would you like to raise a ticket?"
        if self.config.ticket_offer_affirmative.matches(message) {
            session.state = DialogueState::AwaitingEmail;
            return EngineStep::Reply(reply::lets_raise_ticket());
        }
        session.state = DialogueState::OfferAgent;
        EngineStep::Reply(reply::offer_agent_instead())
    }

    fn on_awaiting_email(&self, session: &mut Session, message: &str) -> EngineStep {
        let candidate = message.trim();
        if !is_valid_email(candidate) {
            return EngineStep::Reply(reply::invalid_email());
        }
        session.scratch.email = Some(candidate.to_string());
        if session.scratch.transaction_id.is_some() {
            // Id already known from diagnosis; skip straight to the description.
            session.state = DialogueState::AwaitingIssueDescription;
            EngineStep::Reply(reply::ask_issue_description())
        } else {
            session.state = DialogueState::AwaitingTxIdForTicket;
            EngineStep::Reply(reply::ask_transaction_id_for_ticket())
        }
    }

    fn on_awaiting_tx_id_for_ticket(&self, session: &mut Session, message: &str) -> EngineStep {
        let candidate = message.trim();
        if is_valid_transaction_id(candidate) {
            session.scratch.transaction_id = Some(candidate.to_string());
            session.state = DialogueState::AwaitingIssueDescription;
            return EngineStep::Reply(reply::got_id_ask_description());
        }
        if self.config.skip_words.matches(message) {
            return EngineStep::Reply(reply::transaction_id_required());
        }
        EngineStep::Reply(reply::invalid_ticket_transaction_id())
    }

    fn on_awaiting_issue_description(&self, session: &mut Session, message: &str) -> EngineStep {
        let Some(email) = session.scratch.email.clone() else {
            // Slot-order invariant broken; abort the sub-flow.
            tracing::error!(session_id = %session.id, "description received without email slot");
            session.state = DialogueState::Idle;
            session.scratch.clear();
            return EngineStep::Reply(reply::ticket_failed());
        };
        session.scratch.issue_description = Some(message.trim().to_string());
        EngineStep::CreateTicket(TicketDraft {
            email,
            transaction_id: session.scratch.transaction_id.clone(),
            description: message.trim().to_string(),
        })
    }

    fn on_check_satisfaction(&self, session: &mut Session, message: &str) -> EngineStep {
        if self.config.satisfaction_affirmative.matches(message) {
            session.state = DialogueState::AwaitingFeedback;
            return EngineStep::Reply(reply::post_ticket_satisfied_ask_rating());
        }
        session.state = DialogueState::OfferAgent;
        EngineStep::Reply(reply::unsatisfied_offer_agent())
    }

    fn on_offer_agent(&self, session: &mut Session, message: &str) -> EngineStep {
        if self.config.agent_offer_affirmative.matches(message) {
            let transcript = session.transcript();
            session.state = DialogueState::AwaitingFeedback;
            session.scratch.clear();
            return EngineStep::Effect {
                reply: reply::agent_handoff(),
                request: EffectRequest::HandoffToAgent { transcript },
            };
        }
        session.state = DialogueState::Idle;
        EngineStep::Reply(reply::declined_agent())
    }

    fn on_awaiting_anything_else(&self, session: &mut Session, message: &str) -> EngineStep {
        if self.config.negative_closing.matches(message) {
            session.state = DialogueState::AwaitingFeedback;
            return EngineStep::Reply(reply::ask_rating());
        }
        if self.config.anything_else_affirmative.matches(message) {
            session.state = DialogueState::Idle;
            return EngineStep::Reply(reply::new_topic());
        }
        session.state = DialogueState::Idle;
        EngineStep::Reply(reply::listening())
    }

    fn on_awaiting_feedback(&self, session: &mut Session, message: &str) -> Result<EngineStep> {
        let rating = DIGIT_RUN_RE
            .find(message)
            .and_then(|m| m.as_str().parse::<u32>().ok())
            .filter(|n| (1..=5).contains(n));

        let step = match rating {
            Some(rating) => {
                let comment = session
                    .scratch
                    .last_issue
                    .clone()
                    .unwrap_or_else(|| "General".to_string());
                EngineStep::Effect {
                    reply: reply::feedback_thanks(),
                    request: EffectRequest::RecordFeedback(Feedback::new(
                        rating as u8,
                        Some(comment),
                    )?),
                }
            }
            None => EngineStep::Reply(reply::feedback_skipped()),
        };
        session.state = DialogueState::Idle;
        session.scratch.clear();
        Ok(step)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::oracle::{TransactionState, TransactionStatus};
    use async_trait::async_trait;

    struct MockKnowledge {
        passage: Option<String>,
    }

    #[async_trait]
    impl KnowledgeLookup for MockKnowledge {
        async fn search(&self, _query: &str) -> Result<Option<String>> {
            Ok(self.passage.clone())
        }
    }

    struct MockOracle {
        status: Option<TransactionStatus>,
    }

    #[async_trait]
    impl TransactionOracle for MockOracle {
        async fn status_of(&self, _transaction_id: &str) -> Result<Option<TransactionStatus>> {
            Ok(self.status.clone())
        }
    }

    struct FailingKnowledge;

    #[async_trait]
    impl KnowledgeLookup for FailingKnowledge {
        async fn search(&self, _query: &str) -> Result<Option<String>> {
            Err(PaydeskError::internal("index offline"))
        }
    }

    fn engine(passage: Option<&str>, status: Option<TransactionStatus>) -> DialogueEngine {
        DialogueEngine::new(
            EngineConfig::default(),
            Arc::new(MockKnowledge {
                passage: passage.map(str::to_string),
            }),
            Arc::new(MockOracle { status }),
        )
    }

    fn pending_status(id: &str) -> TransactionStatus {
        TransactionStatus {
            id: id.to_string(),
            amount: Some(500),
            state: TransactionState::Pending,
            solvable: true,
        }
    }

    fn failed_status(id: &str) -> TransactionStatus {
        TransactionStatus {
            id: id.to_string(),
            amount: Some(1200),
            state: TransactionState::Failed,
            solvable: false,
        }
    }

    fn reply_of(step: EngineStep) -> String {
        step.reply_text().expect("step should carry a reply").to_string()
    }

    #[tokio::test]
    async fn diagnosis_keyword_moves_to_awaiting_tx_id() {
        let engine = engine(None, None);
        let mut session = Session::new("k");
        let step = engine
            .handle(&mut session, "my payment is stuck")
            .await
            .unwrap();
        assert_eq!(session.state, DialogueState::AwaitingTxId);
        assert!(reply_of(step).contains("Transaction ID"));
    }

    #[tokio::test]
    async fn greeting_keeps_idle() {
        let engine = engine(None, None);
        let mut session = Session::new("k");
        let step = engine.handle(&mut session, "hello").await.unwrap();
        assert_eq!(session.state, DialogueState::Idle);
        assert!(reply_of(step).contains("Hello"));
    }

    #[tokio::test]
    async fn short_message_asks_for_details_without_state_change() {
        let engine = engine(None, None);
        let mut session = Session::new("k");
        let step = engine.handle(&mut session, "refund").await.unwrap();
        assert_eq!(session.state, DialogueState::Idle);
        assert!(reply_of(step).contains("details"));
    }

    #[tokio::test]
    async fn knowledge_hit_offers_satisfaction_check() {
        let engine = engine(Some("Refunds take 5-7 working days."), None);
        let mut session = Session::new("k");
        let step = engine
            .handle(&mut session, "when will my money be refunded?")
            .await
            .unwrap();
        assert_eq!(session.state, DialogueState::OfferTicket);
        assert!(session.scratch.waiting_for_satisfaction);
        let text = reply_of(step);
        assert!(text.contains("working days"));
        assert!(text.contains("Does this answer your query?"));
    }

    #[tokio::test]
    async fn ambiguous_payment_clarifies_once_then_offers_ticket() {
        let engine = engine(None, None);
        let mut session = Session::new("k");

        let first = engine
            .handle(&mut session, "something about my payment looks odd")
            .await
            .unwrap();
        assert_eq!(session.state, DialogueState::Idle);
        assert!(session.scratch.clarification_requested);
        assert!(reply_of(first).contains("details"));

        let second = engine
            .handle(&mut session, "the payment just looks odd to me")
            .await
            .unwrap();
        assert_eq!(session.state, DialogueState::OfferTicket);
        assert!(!session.scratch.waiting_for_satisfaction);
        assert!(reply_of(second).contains("raise a ticket"));
    }

    #[tokio::test]
    async fn unmatched_idle_message_gets_fallback() {
        let engine = engine(None, None);
        let mut session = Session::new("k");
        let step = engine
            .handle(&mut session, "tell me something nice today")
            .await
            .unwrap();
        assert_eq!(session.state, DialogueState::Idle);
        assert!(reply_of(step).contains("transaction status"));
    }

    #[tokio::test]
    async fn knowledge_failure_degrades_to_miss() {
        let engine = DialogueEngine::new(
            EngineConfig::default(),
            Arc::new(FailingKnowledge),
            Arc::new(MockOracle { status: None }),
        );
        let mut session = Session::new("k");
        let step = engine
            .handle(&mut session, "when will my money be refunded?")
            .await
            .unwrap();
        // Falls through to the ambiguous-payment clarification.
        assert_eq!(session.state, DialogueState::Idle);
        assert!(reply_of(step).contains("details"));
    }

    #[tokio::test]
    async fn valid_id_with_solvable_status_asks_satisfaction() {
        let engine = engine(None, Some(pending_status("pay_111111111")));
        let mut session = Session::new("k");
        session.state = DialogueState::AwaitingTxId;

        let step = engine.handle(&mut session, "pay_111111111").await.unwrap();
        assert_eq!(session.state, DialogueState::OfferTicket);
        assert!(session.scratch.waiting_for_satisfaction);
        assert_eq!(session.scratch.transaction_id.as_deref(), Some("pay_111111111"));
        assert!(reply_of(step).contains("Pending"));
    }

    #[tokio::test]
    async fn valid_id_with_failed_status_offers_ticket() {
        let engine = engine(None, Some(failed_status("pay_67890")));
        let mut session = Session::new("k");
        session.state = DialogueState::AwaitingTxId;

        let step = engine.handle(&mut session, "pay_67890").await.unwrap();
        assert_eq!(session.state, DialogueState::OfferTicket);
        assert!(!session.scratch.waiting_for_satisfaction);
        let text = reply_of(step);
        assert!(text.contains("Failed"));
        assert!(text.contains("raise a ticket"));
    }

    #[tokio::test]
    async fn unknown_id_reports_not_found_and_keeps_state() {
        let engine = engine(None, None);
        let mut session = Session::new("k");
        session.state = DialogueState::AwaitingTxId;

        let step = engine.handle(&mut session, "pay_zzz").await.unwrap();
        assert_eq!(session.state, DialogueState::AwaitingTxId);
        assert_eq!(session.scratch.transaction_id, None);
        assert!(reply_of(step).contains("couldn't find"));
    }

    #[tokio::test]
    async fn invalid_id_reprompts_without_state_change() {
        let engine = engine(None, None);
        let mut session = Session::new("k");
        session.state = DialogueState::AwaitingTxId;

        let step = engine.handle(&mut session, "abc123").await.unwrap();
        assert_eq!(session.state, DialogueState::AwaitingTxId);
        assert!(reply_of(step).contains("pay_"));
    }

    #[tokio::test]
    async fn cancel_word_aborts_diagnosis() {
        let engine = engine(None, None);
        let mut session = Session::new("k");
        session.state = DialogueState::AwaitingTxId;

        engine.handle(&mut session, "cancel").await.unwrap();
        assert_eq!(session.state, DialogueState::Idle);
        assert_eq!(session.scratch, Default::default());
    }

    #[tokio::test]
    async fn satisfied_offer_ticket_moves_to_anything_else() {
        let engine = engine(None, None);
        let mut session = Session::new("k");
        session.state = DialogueState::OfferTicket;
        session.scratch.waiting_for_satisfaction = true;

        let step = engine.handle(&mut session, "Yes").await.unwrap();
        assert_eq!(session.state, DialogueState::AwaitingAnythingElse);
        assert!(reply_of(step).contains("anything else"));
    }

    #[tokio::test]
    async fn unsatisfied_offer_ticket_flips_flag_and_offers_ticket() {
        let engine = engine(None, None);
        let mut session = Session::new("k");
        session.state = DialogueState::OfferTicket;
        session.scratch.waiting_for_satisfaction = true;

        let step = engine.handle(&mut session, "No").await.unwrap();
        assert_eq!(session.state, DialogueState::OfferTicket);
        assert!(!session.scratch.waiting_for_satisfaction);
        assert!(reply_of(step).contains("raise a ticket"));
    }

    #[tokio::test]
    async fn yessir_is_not_affirmative_for_satisfaction() {
        let engine = engine(None, None);
        let mut session = Session::new("k");
        session.state = DialogueState::OfferTicket;
        session.scratch.waiting_for_satisfaction = true;

        engine.handle(&mut session, "yessir").await.unwrap();
        // Exact-match strategy: treated as "not satisfied".
        assert_eq!(session.state, DialogueState::OfferTicket);
        assert!(!session.scratch.waiting_for_satisfaction);
    }

    #[tokio::test]
    async fn accepted_ticket_offer_asks_for_email() {
        let engine = engine(None, None);
        let mut session = Session::new("k");
        session.state = DialogueState::OfferTicket;

        let step = engine.handle(&mut session, "yes").await.unwrap();
        assert_eq!(session.state, DialogueState::AwaitingEmail);
        assert!(reply_of(step).contains("Email"));
    }

    #[tokio::test]
    async fn declined_ticket_offer_offers_agent() {
        let engine = engine(None, None);
        let mut session = Session::new("k");
        session.state = DialogueState::OfferTicket;

        let step = engine.handle(&mut session, "no").await.unwrap();
        assert_eq!(session.state, DialogueState::OfferAgent);
        assert!(reply_of(step).contains("Live Agent"));
    }

    #[tokio::test]
    async fn email_slot_skips_tx_id_when_already_known() {
        let engine = engine(None, None);
        let mut session = Session::new("k");
        session.state = DialogueState::AwaitingEmail;
        session.scratch.transaction_id = Some("pay_67890".to_string());

        let step = engine
            .handle(&mut session, "test@example.com")
            .await
            .unwrap();
        assert_eq!(session.state, DialogueState::AwaitingIssueDescription);
        assert!(reply_of(step).contains("issue"));
    }

    #[tokio::test]
    async fn email_slot_asks_for_tx_id_when_unknown() {
        let engine = engine(None, None);
        let mut session = Session::new("k");
        session.state = DialogueState::AwaitingEmail;

        let step = engine
            .handle(&mut session, "test@example.com")
            .await
            .unwrap();
        assert_eq!(session.state, DialogueState::AwaitingTxIdForTicket);
        assert!(reply_of(step).contains("Transaction ID"));
    }

    #[tokio::test]
    async fn invalid_email_reprompts() {
        let engine = engine(None, None);
        let mut session = Session::new("k");
        session.state = DialogueState::AwaitingEmail;

        let step = engine.handle(&mut session, "not-an-email").await.unwrap();
        assert_eq!(session.state, DialogueState::AwaitingEmail);
        assert_eq!(session.scratch.email, None);
        assert!(reply_of(step).contains("valid"));
    }

    #[tokio::test]
    async fn ticket_tx_id_cannot_be_skipped() {
        let engine = engine(None, None);
        let mut session = Session::new("k");
        session.state = DialogueState::AwaitingTxIdForTicket;
        session.scratch.email = Some("test@example.com".to_string());

        let step = engine.handle(&mut session, "skip").await.unwrap();
        assert_eq!(session.state, DialogueState::AwaitingTxIdForTicket);
        assert!(reply_of(step).contains("need a valid"));
    }

    #[tokio::test]
    async fn description_yields_ticket_draft_with_collected_slots() {
        let engine = engine(None, None);
        let mut session = Session::new("k");
        session.state = DialogueState::AwaitingIssueDescription;
        session.scratch.email = Some("test@example.com".to_string());
        session.scratch.transaction_id = Some("pay_1234567891".to_string());

        let step = engine
            .handle(&mut session, "Money deducted but failed")
            .await
            .unwrap();
        match step {
            EngineStep::CreateTicket(draft) => {
                assert_eq!(draft.email, "test@example.com");
                assert_eq!(draft.transaction_id.as_deref(), Some("pay_1234567891"));
                assert_eq!(draft.description, "Money deducted but failed");
            }
            other => panic!("expected CreateTicket, got {other:?}"),
        }
    }

    #[tokio::test]
    async fn resume_ticket_success_moves_to_satisfaction_check() {
        let engine = engine(None, None);
        let mut session = Session::new("k");
        session.state = DialogueState::AwaitingIssueDescription;
        session.scratch.email = Some("test@example.com".to_string());
        session.scratch.issue_description = Some("Money deducted but failed".to_string());

        let text = engine.resume_ticket(&mut session, Ok("tic_a1b2c3d4".to_string()));
        assert_eq!(session.state, DialogueState::CheckSatisfaction);
        assert!(text.contains("Ticket raised"));
        assert!(text.contains("tic_a1b2c3d4"));
        // Sub-flow slots are cleared; the description survives as a tag.
        assert_eq!(session.scratch.email, None);
        assert_eq!(
            session.scratch.last_issue.as_deref(),
            Some("Money deducted but failed")
        );
    }

    #[tokio::test]
    async fn resume_ticket_failure_resets_to_idle() {
        let engine = engine(None, None);
        let mut session = Session::new("k");
        session.state = DialogueState::AwaitingIssueDescription;
        session.scratch.email = Some("test@example.com".to_string());

        let text = engine.resume_ticket(
            &mut session,
            Err(PaydeskError::ticketing("store unavailable")),
        );
        assert_eq!(session.state, DialogueState::Idle);
        assert_eq!(session.scratch, Default::default());
        assert!(text.contains("Sorry"));
    }

    #[tokio::test]
    async fn post_ticket_satisfaction_yes_asks_rating() {
        let engine = engine(None, None);
        let mut session = Session::new("k");
        session.state = DialogueState::CheckSatisfaction;

        let step = engine.handle(&mut session, "Yes").await.unwrap();
        assert_eq!(session.state, DialogueState::AwaitingFeedback);
        assert!(reply_of(step).contains("rate"));
    }

    #[tokio::test]
    async fn post_ticket_satisfaction_no_offers_agent() {
        let engine = engine(None, None);
        let mut session = Session::new("k");
        session.state = DialogueState::CheckSatisfaction;

        let step = engine.handle(&mut session, "No").await.unwrap();
        assert_eq!(session.state, DialogueState::OfferAgent);
        assert!(reply_of(step).contains("Live Agent"));
    }

    #[tokio::test]
    async fn accepted_agent_offer_hands_off_with_transcript() {
        let engine = engine(None, None);
        let mut session = Session::new("k");
        session.push_user("my payment failed");
        session.push_bot("Please provide the Transaction ID.");
        session.state = DialogueState::OfferAgent;

        let step = engine.handle(&mut session, "yes").await.unwrap();
        assert_eq!(session.state, DialogueState::AwaitingFeedback);
        match step {
            EngineStep::Effect {
                reply,
                request: EffectRequest::HandoffToAgent { transcript },
            } => {
                assert!(reply.contains("rate"));
                assert!(transcript.contains("user: my payment failed"));
            }
            other => panic!("expected handoff effect, got {other:?}"),
        }
    }

    #[tokio::test]
    async fn declined_agent_offer_returns_to_idle() {
        let engine = engine(None, None);
        let mut session = Session::new("k");
        session.state = DialogueState::OfferAgent;

        engine.handle(&mut session, "nah").await.unwrap();
        assert_eq!(session.state, DialogueState::Idle);
    }

    #[tokio::test]
    async fn anything_else_closing_word_asks_rating() {
        let engine = engine(None, None);
        let mut session = Session::new("k");
        session.state = DialogueState::AwaitingAnythingElse;

        let step = engine.handle(&mut session, "no, all good").await.unwrap();
        assert_eq!(session.state, DialogueState::AwaitingFeedback);
        assert!(reply_of(step).contains("rate"));
    }

    #[tokio::test]
    async fn anything_else_affirmative_invites_new_topic() {
        let engine = engine(None, None);
        let mut session = Session::new("k");
        session.state = DialogueState::AwaitingAnythingElse;

        let step = engine.handle(&mut session, "yes").await.unwrap();
        assert_eq!(session.state, DialogueState::Idle);
        assert!(reply_of(step).contains("what else"));
    }

    #[tokio::test]
    async fn anything_else_other_text_returns_to_idle_listening() {
        let engine = engine(None, None);
        let mut session = Session::new("k");
        session.state = DialogueState::AwaitingAnythingElse;

        let step = engine
            .handle(&mut session, "hmm let me think")
            .await
            .unwrap();
        assert_eq!(session.state, DialogueState::Idle);
        assert!(reply_of(step).contains("listening"));
    }

    #[tokio::test]
    async fn in_range_rating_is_recorded_with_last_issue_tag() {
        let engine = engine(None, None);
        let mut session = Session::new("k");
        session.state = DialogueState::AwaitingFeedback;
        session.scratch.last_issue = Some("Money deducted but failed".to_string());

        let step = engine.handle(&mut session, "I'd say 4").await.unwrap();
        assert_eq!(session.state, DialogueState::Idle);
        match step {
            EngineStep::Effect {
                request: EffectRequest::RecordFeedback(feedback),
                ..
            } => {
                assert_eq!(feedback.rating, 4);
                assert_eq!(
                    feedback.comment.as_deref(),
                    Some("Money deducted but failed")
                );
            }
            other => panic!("expected feedback effect, got {other:?}"),
        }
    }

    #[tokio::test]
    async fn out_of_range_rating_is_skipped() {
        let engine = engine(None, None);
        let mut session = Session::new("k");
        session.state = DialogueState::AwaitingFeedback;

        let step = engine.handle(&mut session, "10 out of 10").await.unwrap();
        assert_eq!(session.state, DialogueState::Idle);
        assert!(matches!(step, EngineStep::Reply(_)));
    }

    #[tokio::test]
    async fn non_numeric_feedback_is_acknowledged_without_recording() {
        let engine = engine(None, None);
        let mut session = Session::new("k");
        session.state = DialogueState::AwaitingFeedback;

        let step = engine.handle(&mut session, "it was fine").await.unwrap();
        assert_eq!(session.state, DialogueState::Idle);
        assert!(matches!(step, EngineStep::Reply(_)));
    }
}

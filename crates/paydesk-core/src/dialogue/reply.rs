//! Reply catalog.
//!
//! Every user-visible line the engine can say lives here. Replies may embed
//! `**bold**` emphasis, the only markup the presentation layer renders; no
//! other markup is permitted in engine-authored text.

use crate::oracle::{TransactionState, TransactionStatus};

/// Wraps text in the paired emphasis delimiter.
pub fn bold(text: &str) -> String {
    format!("**{text}**")
}

pub fn greeting() -> String {
    "Hello! I'm Penny, your payments support assistant. How can I help you today?".to_string()
}

pub fn thanks() -> String {
    "You're welcome!".to_string()
}

pub fn acknowledged() -> String {
    "Great!".to_string()
}

pub fn offer_agent() -> String {
    format!("Would you like to connect to a {}?", bold("Live Agent"))
}

pub fn ask_email_for_ticket() -> String {
    format!(
        "I can help you raise a ticket. First, please provide your {}.",
        bold("Email ID")
    )
}

pub fn ask_transaction_id() -> String {
    format!(
        "I can check the status for you. Please provide the {} (starting with {}).",
        bold("Transaction ID"),
        bold("pay_...")
    )
}

pub fn clarify_short_query() -> String {
    "Could you please provide a few more details so I can assist you better?".to_string()
}

pub fn knowledge_answer(passage: &str) -> String {
    format!(
        "{passage}\n\nDoes this answer your query? (Reply {} or {})",
        bold("Yes"),
        bold("No")
    )
}

pub fn clarify_payment_issue() -> String {
    format!(
        "Could you please provide more details about the {} you are facing?",
        bold("issue")
    )
}

pub fn offer_ticket_after_clarification() -> String {
    format!(
        "I see. Would you like to {} for this issue?",
        bold("raise a ticket")
    )
}

pub fn fallback() -> String {
    format!(
        "I'm not sure. Would you like to check a {} or connect to an {}?",
        bold("transaction status"),
        bold("agent")
    )
}

pub fn injection_refusal() -> String {
    "I cannot comply with that request. I'm Penny, your payments support assistant.".to_string()
}

pub fn off_topic_redirect() -> String {
    "I can only assist with payments-related inquiries. Please ask about payments, refunds, or transaction status.".to_string()
}

pub fn transaction_status(status: &TransactionStatus) -> String {
    match status.state {
        TransactionState::Pending => format!(
            "Current status is {}. This is usually processed within 24-48 hours. Please check back after that time.",
            bold("Pending")
        ),
        TransactionState::Captured => format!(
            "Current status is {}. The payment completed successfully.",
            bold("Captured")
        ),
        TransactionState::Refunded => format!(
            "Current status is {}. The amount is on its way back and usually reflects within 5-7 working days.",
            bold("Refunded")
        ),
        TransactionState::Failed => format!(
            "Current status is {} or {}. This requires manual intervention.",
            bold("Failed"),
            bold("Stuck")
        ),
    }
}

pub fn status_solvable_epilogue() -> String {
    format!(
        "\n\nSince this is within the expected timeframe, you don't need to raise a ticket. Does this answer your query? (Reply {} or {})",
        bold("Yes"),
        bold("No")
    )
}

pub fn status_needs_ticket_epilogue() -> String {
    format!(
        "\n\nWe should raise a ticket for this. Would you like to proceed? (Reply {} or {})",
        bold("Yes"),
        bold("No")
    )
}

pub fn transaction_not_found(transaction_id: &str) -> String {
    format!(
        "I couldn't find any transaction with ID {transaction_id}. Please double-check the ID and try again, or type 'cancel'."
    )
}

pub fn invalid_transaction_id() -> String {
    format!(
        "That doesn't look like a valid ID. It should start with {}. (Or type 'cancel')",
        bold("pay_")
    )
}

pub fn cancelled() -> String {
    "Okay. How else can I help you?".to_string()
}

pub fn satisfied_anything_else() -> String {
    "Great! Is there anything else I can help you with?".to_string()
}

pub fn still_concerned_offer_ticket() -> String {
    format!(
        "I understand you still have concerns. Would you like to {} for this?",
        bold("raise a ticket")
    )
}

pub fn lets_raise_ticket() -> String {
    format!(
        "Okay, let's raise a ticket. Please provide your {}.",
        bold("Email ID")
    )
}

pub fn offer_agent_instead() -> String {
    format!(
        "Okay. Would you like to connect to a {} instead?",
        bold("Live Agent")
    )
}

pub fn unsatisfied_offer_agent() -> String {
    format!(
        "I'm sorry to hear that. Would you like to connect to a {} for further assistance?",
        bold("Live Agent")
    )
}

pub fn invalid_email() -> String {
    format!(
        "That doesn't look like a valid email. Please provide a valid {}.",
        bold("email address")
    )
}

pub fn ask_transaction_id_for_ticket() -> String {
    format!(
        "Thanks. Now, please provide the {} (starting with {}).",
        bold("Transaction ID"),
        bold("pay_...")
    )
}

pub fn ask_issue_description() -> String {
    format!("Thanks. Please briefly describe the {}.", bold("issue"))
}

pub fn got_id_ask_description() -> String {
    format!("Got it. Please briefly describe the {}.", bold("issue"))
}

pub fn transaction_id_required() -> String {
    format!(
        "I need a valid {} starting with {} to proceed.",
        bold("Transaction ID"),
        bold("pay_")
    )
}

pub fn invalid_ticket_transaction_id() -> String {
    format!(
        "Invalid format. Transaction ID must start with {}.",
        bold("pay_")
    )
}

pub fn ticket_created(ticket_id: &str) -> String {
    format!(
        "Ticket raised successfully! Ticket ID: {}. Check your email.\n\nAre you satisfied with this resolution? (Reply {} or {})",
        bold(ticket_id),
        bold("Yes"),
        bold("No")
    )
}

pub fn ticket_failed() -> String {
    "Sorry, something went wrong while raising your ticket. Please try again later.".to_string()
}

pub fn post_ticket_satisfied_ask_rating() -> String {
    "Great! Before you go, please rate your experience with me from 1 to 5.".to_string()
}

pub fn agent_handoff() -> String {
    "Connecting you to a live agent...\n\nI have shared your conversation history so they know the context. An agent will be with you shortly.\n\nBefore you go, please rate your experience with me from 1 to 5.".to_string()
}

pub fn declined_agent() -> String {
    "Okay. Let me know if you need anything else.".to_string()
}

pub fn ask_rating() -> String {
    "Okay. Before you go, please rate your experience from 1 to 5.".to_string()
}

pub fn new_topic() -> String {
    "Sure, what else can I help you with?".to_string()
}

pub fn listening() -> String {
    "I am listening. How can I help?".to_string()
}

pub fn feedback_thanks() -> String {
    "Thank you for your feedback! If you need anything else, I'm here.".to_string()
}

pub fn feedback_skipped() -> String {
    "Thanks! Let me know if you need anything else.".to_string()
}

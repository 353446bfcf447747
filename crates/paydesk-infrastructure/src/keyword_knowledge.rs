//! Keyword-matched knowledge base.
//!
//! Simulates a document store: each article carries trigger keywords, and a
//! query matches an article when any keyword appears as a substring of the
//! query. Multiple matches are joined into one passage.

use async_trait::async_trait;
use paydesk_core::error::Result;
use paydesk_core::knowledge::KnowledgeLookup;

struct Article {
    keywords: &'static [&'static str],
    content: &'static str,
}

const ARTICLES: &[Article] = &[
    Article {
        keywords: &["refund", "money back", "return", "reversed"],
        content: "Refunds usually take 5-7 working days to reflect in the customer's account. You can track refunds from the Dashboard > Transactions > Refunds.",
    },
    Article {
        keywords: &["settlement", "bank", "account", "deposit"],
        content: "Settlements are processed according to your cycle (T+2 days by default). Check the 'Settlements' tab in the dashboard. If a settlement is on hold, check your KYC status.",
    },
    Article {
        keywords: &["failure", "declined", "error"],
        content: "Payment failures can happen due to bank downtime, insufficient funds, or a wrong OTP. If money was debited for a failed transaction, it is usually auto-refunded within 5-7 working days.",
    },
    Article {
        keywords: &["integration", "api", "sdk", "webhook", "react", "node", "python"],
        content: "SDKs are available for the common platforms (React, Node.js, Python, and more). Your API keys live in the Dashboard under Settings > API Keys; the developer docs carry detailed guides.",
    },
    Article {
        keywords: &["webhook", "event", "captured", "authorized"],
        content: "Webhooks let your server receive real-time updates. Common events: 'payment.captured', 'payment.failed'. Configure them in Dashboard > Settings > Webhooks.",
    },
    Article {
        keywords: &["error", "code", "bad_request", "gateway"],
        content: "Common errors: 'BAD_REQUEST_ERROR' (invalid data), 'GATEWAY_ERROR' (bank issue). Check the 'error.description' field in the response for details.",
    },
    Article {
        keywords: &["pricing", "fee", "charges", "rate", "cost"],
        content: "Standard pricing is 2% per transaction for domestic debit/credit cards and bank transfers. International payments are charged at 3%.",
    },
    Article {
        keywords: &["create order", "order id"],
        content: "It is best practice to create an Order ID on your server using the Orders API before initiating a payment on the client side.",
    },
    Article {
        keywords: &["virtual account", "neft", "imps", "smart collect"],
        content: "Smart Collect accepts payments via NEFT/RTGS/IMPS using virtual accounts created per customer.",
    },
    Article {
        keywords: &["contact", "call", "talk"],
        content: "You can raise a ticket with our support team or request a live agent connection for unresolved issues.",
    },
    Article {
        keywords: &["international", "global", "foreign", "currency"],
        content: "To accept international payments, ensure 'International Payments' is enabled in your Dashboard settings. It may require additional KYC.",
    },
    Article {
        keywords: &["chargeback", "dispute", "fraud"],
        content: "A chargeback occurs when a customer disputes a payment. You can contest it via the Dispute Dashboard by providing proof of delivery.",
    },
    Article {
        keywords: &["payment link", "invoice"],
        content: "You can send Payment Links via email or SMS from the Dashboard. No coding required.",
    },
    Article {
        keywords: &["subscription", "recurring", "auto debit"],
        content: "Subscriptions charge customers automatically on a schedule. You need to create a Plan first.",
    },
];

/// In-process knowledge base with substring keyword matching.
#[derive(Debug, Default, Clone, Copy)]
pub struct KeywordKnowledgeBase;

impl KeywordKnowledgeBase {
    pub fn new() -> Self {
        Self
    }
}

#[async_trait]
impl KnowledgeLookup for KeywordKnowledgeBase {
    async fn search(&self, query: &str) -> Result<Option<String>> {
        let lower = query.to_lowercase();
        let matches: Vec<&str> = ARTICLES
            .iter()
            .filter(|article| article.keywords.iter().any(|k| lower.contains(k)))
            .map(|article| article.content)
            .collect();

        if matches.is_empty() {
            Ok(None)
        } else {
            Ok(Some(matches.join("\n")))
        }
    }
}

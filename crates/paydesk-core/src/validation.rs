//! Input-format validation helpers.
//!
//! Pure, total functions: same input always yields the same boolean and
//! nothing is ever thrown. Partial matches are rejected.

use once_cell::sync::Lazy;
use regex::Regex;

static EMAIL_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^[^\s@]+@[^\s@]+\.[^\s@]+$").expect("email regex"));

static TRANSACTION_ID_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^pay_[a-zA-Z0-9]+$").expect("transaction id regex"));

/// Returns true if `email` has the `local@domain.tld` shape.
pub fn is_valid_email(email: &str) -> bool {
    EMAIL_RE.is_match(email.trim())
}

/// Returns true if `id` is a `pay_` prefix followed by one or more
/// alphanumerics, with nothing else around it.
pub fn is_valid_transaction_id(id: &str) -> bool {
    TRANSACTION_ID_RE.is_match(id.trim())
}

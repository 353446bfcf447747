//! Knowledge-base lookup seam.

use crate::error::Result;
use async_trait::async_trait;

/// Maps free text to zero-or-more matching reference passages.
///
/// A miss (`Ok(None)`) is a normal branch for the engine, never an error.
#[async_trait]
pub trait KnowledgeLookup: Send + Sync {
    /// Returns the matching passage text, if any. Multiple matching passages
    /// may be joined into one reply by the implementation.
    async fn search(&self, query: &str) -> Result<Option<String>>;
}

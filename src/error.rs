//! Typed failure taxonomy for per-item extraction outcomes.

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// What went wrong for a single page.
///
/// Every variant is caught at the per-URL boundary inside the batch driver
/// and recorded as that item's outcome; none of them aborts a batch. Shape
/// irregularities inside a located table are not errors at all: the decoder
/// recovers by padding or truncating rows.
#[derive(Debug, Clone, PartialEq, Eq, Error, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum ExtractError {
    /// The page never satisfied the readiness predicate within the ceiling.
    #[error("page did not reach ready state within {timeout_ms} ms: {url}")]
    RenderTimeout { url: String, timeout_ms: u64 },

    /// No table with the requested id exists in the sanitized markup.
    /// Lookup is exact; another table is never substituted.
    #[error("no table with id '{table_id}' on {url}")]
    TableNotFound { url: String, table_id: String },

    /// The rendering collaborator failed before a document was available:
    /// navigation error, context creation failure, renderer already gone.
    #[error("navigation failed for {url}: {message}")]
    Navigation { url: String, message: String },
}

impl ExtractError {
    /// The URL the failing item was for.
    pub fn url(&self) -> &str {
        match self {
            ExtractError::RenderTimeout { url, .. } => url,
            ExtractError::TableNotFound { url, .. } => url,
            ExtractError::Navigation { url, .. } => url,
        }
    }
}

use super::BackendError;

/// Reranking errors. The engine falls back to fused order on any of these.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum RerankError {
    #[error("reranker backend failed: {0}")]
    Backend(#[from] BackendError),

    #[error("reranker timed out after {timeout_ms}ms")]
    Timeout { timeout_ms: u64 },

    #[error("reranker produced an invalid ordering: {reason}")]
    InvalidOrdering { reason: String },

    #[error("reranker panicked: {reason}")]
    Panicked { reason: String },
}

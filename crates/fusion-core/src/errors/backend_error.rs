/// Failure reported by an external collaborator (store client, LLM, embedder).
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum BackendError {
    #[error("backend unreachable: {reason}")]
    Unreachable { reason: String },

    #[error("backend rejected credentials: {reason}")]
    Unauthorized { reason: String },

    #[error("backend returned an invalid response: {reason}")]
    InvalidResponse { reason: String },

    #[error("backend failure: {reason}")]
    Other { reason: String },
}

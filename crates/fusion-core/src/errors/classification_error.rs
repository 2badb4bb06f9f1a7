/// LLM classification errors. Always recoverable through the rule-based path.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ClassificationError {
    #[error("classification LLM unavailable: {reason}")]
    Unavailable { reason: String },

    #[error("classification LLM timed out after {timeout_ms}ms")]
    Timeout { timeout_ms: u64 },

    #[error("classification response could not be parsed: {response}")]
    Unparseable { response: String },
}

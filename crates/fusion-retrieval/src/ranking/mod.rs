//! RerankStage: optional reorder of the fused top-N.
//!
//! The reranker sees only the first `top_n` fused results; anything beyond
//! keeps its fused position. Output must be a permutation of the input.
//! Any failure keeps fused order, including a panic inside the reranker.

pub mod llm_reranker;

use std::any::Any;
use std::collections::HashSet;
use std::panic::AssertUnwindSafe;
use std::time::Duration;

use futures::FutureExt;
use tracing::warn;

use fusion_core::errors::RerankError;
use fusion_core::models::FusedResult;
use fusion_core::traits::Reranker;

pub use llm_reranker::LlmReranker;

/// Outcome of a rerank attempt.
#[derive(Debug, Clone, PartialEq)]
pub struct RerankOutcome {
    pub results: Vec<FusedResult>,
    pub reranked: bool,
    pub error: Option<RerankError>,
}

impl RerankOutcome {
    pub fn fell_back(&self) -> bool {
        self.error.is_some()
    }
}

/// Rerank the head of `fused` within `timeout`, falling back on failure.
pub async fn apply(
    reranker: &dyn Reranker,
    query: &str,
    fused: Vec<FusedResult>,
    top_n: usize,
    timeout: Duration,
) -> RerankOutcome {
    if fused.is_empty() || top_n == 0 {
        return RerankOutcome {
            results: fused,
            reranked: false,
            error: None,
        };
    }

    let split = top_n.min(fused.len());
    let head = &fused[..split];

    let guarded = AssertUnwindSafe(reranker.rerank(query, head)).catch_unwind();
    let attempt = match tokio::time::timeout(timeout, guarded).await {
        Ok(Ok(Ok(reordered))) => validate_permutation(head, &reordered).map(|()| reordered),
        Ok(Ok(Err(e))) => Err(e),
        Ok(Err(payload)) => Err(RerankError::Panicked {
            reason: panic_reason(payload.as_ref()),
        }),
        Err(_) => Err(RerankError::Timeout {
            timeout_ms: u64::try_from(timeout.as_millis()).unwrap_or(u64::MAX),
        }),
    };

    match attempt {
        Ok(mut reordered) => {
            reordered.extend_from_slice(&fused[split..]);
            RerankOutcome {
                results: reordered,
                reranked: true,
                error: None,
            }
        }
        Err(e) => {
            warn!(reranker = reranker.name(), error = %e, "rerank failed, keeping fused order");
            RerankOutcome {
                results: fused,
                reranked: false,
                error: Some(e),
            }
        }
    }
}

fn panic_reason(payload: &(dyn Any + Send)) -> String {
    payload
        .downcast_ref::<&str>()
        .map(|s| (*s).to_string())
        .or_else(|| payload.downcast_ref::<String>().cloned())
        .unwrap_or_else(|| "unknown panic payload".to_string())
}

/// `output` must contain exactly the ids of `input`, each once.
pub fn validate_permutation(
    input: &[FusedResult],
    output: &[FusedResult],
) -> Result<(), RerankError> {
    if input.len() != output.len() {
        return Err(RerankError::InvalidOrdering {
            reason: format!("expected {} items, got {}", input.len(), output.len()),
        });
    }
    let expected: HashSet<&str> = input.iter().map(|r| r.item_id.as_str()).collect();
    let mut seen = HashSet::with_capacity(output.len());
    for r in output {
        if !expected.contains(r.item_id.as_str()) {
            return Err(RerankError::InvalidOrdering {
                reason: format!("unknown item {}", r.item_id),
            });
        }
        if !seen.insert(r.item_id.as_str()) {
            return Err(RerankError::InvalidOrdering {
                reason: format!("item {} repeated", r.item_id),
            });
        }
    }
    Ok(())
}

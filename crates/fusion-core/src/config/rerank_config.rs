use std::time::Duration;

use serde::{Deserialize, Serialize};

use super::defaults;

/// Optional reranking stage.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RerankConfig {
    pub enabled: bool,
    /// Only the fused top-N are reranked; the tail keeps fused order.
    pub top_n: usize,
    pub timeout_ms: u64,
}

impl Default for RerankConfig {
    fn default() -> Self {
        Self {
            enabled: defaults::DEFAULT_RERANK_ENABLED,
            top_n: defaults::DEFAULT_RERANK_TOP_N,
            timeout_ms: defaults::DEFAULT_RERANK_TIMEOUT_MS,
        }
    }
}

impl RerankConfig {
    pub fn timeout(&self) -> Duration {
        Duration::from_millis(self.timeout_ms)
    }
}

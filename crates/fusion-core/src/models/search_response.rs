use serde::{Deserialize, Serialize};

use super::{ChannelKind, ChannelStatus, ClassificationSource, FusedResult};
use crate::intent::{Intent, IntentWeights};

/// Per-stage wall-clock latency in milliseconds.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct StageLatency {
    pub classification_ms: u64,
    pub channels_ms: u64,
    pub fusion_ms: u64,
    pub rerank_ms: u64,
    pub assembly_ms: u64,
}

/// Execution record for one launched channel.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChannelReport {
    pub channel: ChannelKind,
    pub status: ChannelStatus,
    pub latency_ms: u64,
    pub item_count: usize,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SearchMetadata {
    pub intent: Intent,
    /// The fixed profile for `intent`.
    pub weights: IntentWeights,
    /// Weights actually applied during fusion (differs from `weights` only
    /// when renormalization on degradation is enabled).
    pub effective_weights: IntentWeights,
    pub classification_source: ClassificationSource,
    pub classification_confidence: f64,
    pub channels_executed: Vec<ChannelKind>,
    pub channels_failed: Vec<ChannelKind>,
    /// Channels disabled by config and never launched.
    pub channels_skipped: Vec<ChannelKind>,
    pub channel_reports: Vec<ChannelReport>,
    pub total_latency_ms: u64,
    pub stage_latency: StageLatency,
    /// Classification was served from the cache.
    pub cache_hit: bool,
    pub reranked: bool,
    /// Reranking was requested but failed; fused order was kept.
    pub rerank_fallback: bool,
    /// Every launched channel failed. The result list is empty.
    pub degraded: bool,
}

impl SearchMetadata {
    /// Some, but not all, launched channels failed.
    pub fn is_partial(&self) -> bool {
        !self.channels_failed.is_empty() && !self.channels_executed.is_empty()
    }
}

/// The unified response returned by `search()`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SearchResponse {
    /// Ordered, at most `top_k` entries.
    pub results: Vec<FusedResult>,
    pub metadata: SearchMetadata,
}

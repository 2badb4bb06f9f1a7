use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use super::ChannelKind;

/// An item after weighted RRF fusion.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FusedResult {
    pub item_id: String,
    pub fused_score: f64,
    /// Channels the item appeared in, in channel discovery order.
    pub contributing_channels: Vec<ChannelKind>,
    /// 1-indexed rank of the item within each contributing channel.
    pub per_channel_rank: BTreeMap<ChannelKind, usize>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub content: Option<String>,
    /// Relevance score assigned by the reranker, if it ran and succeeded.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub rerank_score: Option<f64>,
}

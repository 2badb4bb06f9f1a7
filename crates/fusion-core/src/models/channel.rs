use std::fmt;

use serde::{Deserialize, Serialize};

use crate::errors::ChannelError;

/// One of the four independent retrieval backends.
///
/// Declaration order is the discovery order used for fusion tie-breaks.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ChannelKind {
    Vector,
    Sparse,
    GraphLocal,
    GraphGlobal,
}

impl ChannelKind {
    pub const ALL: [ChannelKind; 4] = [
        ChannelKind::Vector,
        ChannelKind::Sparse,
        ChannelKind::GraphLocal,
        ChannelKind::GraphGlobal,
    ];

    pub fn name(self) -> &'static str {
        match self {
            ChannelKind::Vector => "vector",
            ChannelKind::Sparse => "sparse",
            ChannelKind::GraphLocal => "graph_local",
            ChannelKind::GraphGlobal => "graph_global",
        }
    }
}

impl fmt::Display for ChannelKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Settled state of a channel call.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ChannelStatus {
    Success,
    Failed,
    Timeout,
}

/// A single ranked hit as returned by a backend.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScoredItem {
    pub item_id: String,
    /// Backend-native score. Only the position in the list matters for fusion.
    pub raw_score: f64,
    /// Chunk text, when the backend returns it. Used by the reranker.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub content: Option<String>,
}

impl ScoredItem {
    pub fn new(item_id: impl Into<String>, raw_score: f64) -> Self {
        Self {
            item_id: item_id.into(),
            raw_score,
            content: None,
        }
    }

    pub fn with_content(mut self, content: impl Into<String>) -> Self {
        self.content = Some(content.into());
        self
    }
}

/// Outcome of one channel call. Rank is the 1-indexed list position.
#[derive(Debug, Clone, PartialEq)]
pub struct ChannelResult {
    pub channel: ChannelKind,
    pub items: Vec<ScoredItem>,
    pub status: ChannelStatus,
    pub latency_ms: u64,
    pub error: Option<ChannelError>,
}

impl ChannelResult {
    pub fn success(channel: ChannelKind, items: Vec<ScoredItem>, latency_ms: u64) -> Self {
        Self {
            channel,
            items,
            status: ChannelStatus::Success,
            latency_ms,
            error: None,
        }
    }

    /// A failed result. `Timeout` errors map to `ChannelStatus::Timeout`.
    pub fn failure(error: ChannelError, latency_ms: u64) -> Self {
        let status = match error {
            ChannelError::Timeout { .. } => ChannelStatus::Timeout,
            _ => ChannelStatus::Failed,
        };
        Self {
            channel: error.channel(),
            items: Vec::new(),
            status,
            latency_ms,
            error: Some(error),
        }
    }

    pub fn is_success(&self) -> bool {
        self.status == ChannelStatus::Success
    }
}

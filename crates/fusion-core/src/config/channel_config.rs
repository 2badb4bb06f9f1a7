use std::time::Duration;

use serde::{Deserialize, Serialize};

use super::defaults;
use crate::models::ChannelKind;

/// Channel fan-out configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ChannelConfig {
    /// Outer deadline for the whole fan-out. Each channel's effective timeout
    /// is the smaller of its own timeout and the time left on this deadline.
    pub overall_timeout_ms: u64,
    /// Each channel fetches `top_k * fetch_multiplier` candidates.
    pub fetch_multiplier: usize,
    /// Traversal depth for graph-local search, clamped to 1..=2.
    pub graph_hops: u8,
    pub per_channel_timeout_ms: ChannelTimeouts,
    pub enabled: ChannelToggles,
}

impl Default for ChannelConfig {
    fn default() -> Self {
        Self {
            overall_timeout_ms: defaults::DEFAULT_OVERALL_TIMEOUT_MS,
            fetch_multiplier: defaults::DEFAULT_FETCH_MULTIPLIER,
            graph_hops: defaults::DEFAULT_GRAPH_HOPS,
            per_channel_timeout_ms: ChannelTimeouts::default(),
            enabled: ChannelToggles::default(),
        }
    }
}

impl ChannelConfig {
    pub fn timeout_for(&self, channel: ChannelKind) -> Duration {
        Duration::from_millis(self.per_channel_timeout_ms.get(channel))
    }

    pub fn overall_timeout(&self) -> Duration {
        Duration::from_millis(self.overall_timeout_ms)
    }

    pub fn is_enabled(&self, channel: ChannelKind) -> bool {
        self.enabled.get(channel)
    }
}

/// Independent per-channel timeouts (milliseconds).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ChannelTimeouts {
    pub vector: u64,
    pub sparse: u64,
    pub graph_local: u64,
    pub graph_global: u64,
}

impl Default for ChannelTimeouts {
    fn default() -> Self {
        Self {
            vector: defaults::DEFAULT_VECTOR_TIMEOUT_MS,
            sparse: defaults::DEFAULT_SPARSE_TIMEOUT_MS,
            graph_local: defaults::DEFAULT_GRAPH_LOCAL_TIMEOUT_MS,
            graph_global: defaults::DEFAULT_GRAPH_GLOBAL_TIMEOUT_MS,
        }
    }
}

impl ChannelTimeouts {
    /// The same timeout for every channel.
    pub fn uniform(ms: u64) -> Self {
        Self {
            vector: ms,
            sparse: ms,
            graph_local: ms,
            graph_global: ms,
        }
    }

    pub fn get(&self, channel: ChannelKind) -> u64 {
        match channel {
            ChannelKind::Vector => self.vector,
            ChannelKind::Sparse => self.sparse,
            ChannelKind::GraphLocal => self.graph_local,
            ChannelKind::GraphGlobal => self.graph_global,
        }
    }
}

/// Which channels are launched at all.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ChannelToggles {
    pub vector: bool,
    pub sparse: bool,
    pub graph_local: bool,
    pub graph_global: bool,
}

impl Default for ChannelToggles {
    fn default() -> Self {
        Self {
            vector: true,
            sparse: true,
            graph_local: true,
            graph_global: true,
        }
    }
}

impl ChannelToggles {
    pub fn get(&self, channel: ChannelKind) -> bool {
        match channel {
            ChannelKind::Vector => self.vector,
            ChannelKind::Sparse => self.sparse,
            ChannelKind::GraphLocal => self.graph_local,
            ChannelKind::GraphGlobal => self.graph_global,
        }
    }
}

//! Golden fusion scenarios.

use std::collections::BTreeMap;

use serde::Deserialize;

use fusion_core::models::{ChannelKind, ScoredItem};
use fusion_core::Intent;

use crate::mocks::items_from_ids;

/// One end-to-end scenario: canned channel outputs and the expected result.
#[derive(Debug, Clone, Deserialize)]
pub struct GoldenScenario {
    pub name: String,
    #[serde(default)]
    pub description: String,
    pub query: String,
    pub top_k: usize,
    #[serde(default)]
    pub intent_override: Option<Intent>,
    /// Ranked item ids per channel, best first.
    pub channels: BTreeMap<ChannelKind, Vec<String>>,
    #[serde(default)]
    pub failing_channels: Vec<ChannelKind>,
    pub expected: GoldenExpectation,
}

#[derive(Debug, Clone, Deserialize)]
pub struct GoldenExpectation {
    pub intent: Intent,
    pub ordered_ids: Vec<String>,
    #[serde(default)]
    pub top_score: Option<f64>,
    #[serde(default)]
    pub channels_failed: Vec<ChannelKind>,
    #[serde(default)]
    pub degraded: bool,
}

impl GoldenScenario {
    /// Canned items for a channel; empty when the channel has no entry.
    pub fn items(&self, channel: ChannelKind) -> Vec<ScoredItem> {
        self.channels
            .get(&channel)
            .map(|ids| items_from_ids(ids))
            .unwrap_or_default()
    }

    pub fn fails(&self, channel: ChannelKind) -> bool {
        self.failing_channels.contains(&channel)
    }
}

#![allow(dead_code)]

use std::sync::Arc;

use fusion_core::models::ChannelKind;
use fusion_core::FusionConfig;
use fusion_retrieval::{SearchEngine, SearchEngineBuilder};
use test_fixtures::mocks::{
    Behavior, MockEmbedder, MockGraphStore, MockSparseIndex, MockVectorStore,
};

/// Mock backends wired into an engine builder.
pub struct Harness {
    pub vector: Arc<MockVectorStore>,
    pub sparse: Arc<MockSparseIndex>,
    pub graph: Arc<MockGraphStore>,
    pub embedder: Arc<MockEmbedder>,
}

impl Harness {
    pub fn with_ids(vector: &[&str], sparse: &[&str], local: &[&str], global: &[&str]) -> Self {
        Self {
            vector: Arc::new(MockVectorStore::with_ids(vector)),
            sparse: Arc::new(MockSparseIndex::with_ids(sparse)),
            graph: Arc::new(MockGraphStore::with_ids(local, global)),
            embedder: Arc::new(MockEmbedder::default()),
        }
    }

    /// The FACTUAL worked example: A is rank 1/2/1 in vector/sparse/graph_local.
    pub fn worked_example() -> Self {
        Self::with_ids(&["A", "B", "C"], &["B", "A", "D"], &["A", "E"], &["F"])
    }

    pub fn builder(&self) -> SearchEngineBuilder {
        SearchEngine::builder()
            .vector_store(self.vector.clone(), self.embedder.clone())
            .sparse_index(self.sparse.clone())
            .graph_store(self.graph.clone())
    }

    pub fn engine(&self) -> SearchEngine {
        self.builder().config(rules_only_config()).build().unwrap()
    }

    pub fn set(&self, channel: ChannelKind, behavior: Behavior) {
        match channel {
            ChannelKind::Vector => self.vector.responder.set(behavior),
            ChannelKind::Sparse => self.sparse.responder.set(behavior),
            ChannelKind::GraphLocal => self.graph.local.set(behavior),
            ChannelKind::GraphGlobal => self.graph.global.set(behavior),
        }
    }

    pub fn set_delay(&self, channel: ChannelKind, delay: std::time::Duration) {
        match channel {
            ChannelKind::Vector => self.vector.responder.set_delay(delay),
            ChannelKind::Sparse => self.sparse.responder.set_delay(delay),
            ChannelKind::GraphLocal => self.graph.local.set_delay(delay),
            ChannelKind::GraphGlobal => self.graph.global.set_delay(delay),
        }
    }
}

pub fn rules_only_config() -> FusionConfig {
    let mut config = FusionConfig::default();
    config.classifier.llm_enabled = false;
    config
}

pub fn ids(response: &fusion_core::SearchResponse) -> Vec<&str> {
    response.results.iter().map(|r| r.item_id.as_str()).collect()
}

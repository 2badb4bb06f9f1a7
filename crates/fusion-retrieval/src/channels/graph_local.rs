//! Entity-anchored neighborhood traversal.

use std::sync::Arc;

use async_trait::async_trait;
use tracing::debug;

use fusion_core::constants::MAX_GRAPH_HOPS;
use fusion_core::errors::BackendError;
use fusion_core::models::{ChannelKind, ScoredItem};
use fusion_core::traits::GraphStoreClient;

use super::{query_terms, Channel, ChannelQuery};

pub struct GraphLocalChannel {
    graph: Arc<dyn GraphStoreClient>,
}

impl GraphLocalChannel {
    pub fn new(graph: Arc<dyn GraphStoreClient>) -> Self {
        Self { graph }
    }
}

#[async_trait]
impl Channel for GraphLocalChannel {
    fn kind(&self) -> ChannelKind {
        ChannelKind::GraphLocal
    }

    async fn fetch(&self, query: &ChannelQuery) -> Result<Vec<ScoredItem>, BackendError> {
        let entities = query_terms::entities(&query.text);
        if entities.is_empty() {
            debug!("no entity anchors, skipping graph traversal");
            return Ok(Vec::new());
        }
        let hops = query.graph_hops.clamp(1, MAX_GRAPH_HOPS);
        let mut items = self.graph.local_search(&entities, hops).await?;
        items.truncate(query.limit);
        Ok(items)
    }
}

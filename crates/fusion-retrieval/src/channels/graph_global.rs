//! Community-level graph retrieval.

use std::sync::Arc;

use async_trait::async_trait;

use fusion_core::errors::BackendError;
use fusion_core::models::{ChannelKind, ScoredItem};
use fusion_core::traits::{CommunityQuery, GraphStoreClient};

use super::{Channel, ChannelQuery};

pub struct GraphGlobalChannel {
    graph: Arc<dyn GraphStoreClient>,
}

impl GraphGlobalChannel {
    pub fn new(graph: Arc<dyn GraphStoreClient>) -> Self {
        Self { graph }
    }
}

#[async_trait]
impl Channel for GraphGlobalChannel {
    fn kind(&self) -> ChannelKind {
        ChannelKind::GraphGlobal
    }

    async fn fetch(&self, query: &ChannelQuery) -> Result<Vec<ScoredItem>, BackendError> {
        let community_query = CommunityQuery {
            text: query.text.clone(),
            top_k: query.limit,
        };
        self.graph.global_search(&community_query).await
    }
}

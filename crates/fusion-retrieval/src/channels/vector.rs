//! Dense embedding channel: embed the query, then nearest-neighbor search.

use std::sync::Arc;

use async_trait::async_trait;

use fusion_core::errors::BackendError;
use fusion_core::models::{ChannelKind, ScoredItem};
use fusion_core::traits::{QueryEmbedder, VectorStoreClient};

use super::{Channel, ChannelQuery};

pub struct VectorChannel {
    store: Arc<dyn VectorStoreClient>,
    embedder: Arc<dyn QueryEmbedder>,
}

impl VectorChannel {
    pub fn new(store: Arc<dyn VectorStoreClient>, embedder: Arc<dyn QueryEmbedder>) -> Self {
        Self { store, embedder }
    }
}

#[async_trait]
impl Channel for VectorChannel {
    fn kind(&self) -> ChannelKind {
        ChannelKind::Vector
    }

    async fn fetch(&self, query: &ChannelQuery) -> Result<Vec<ScoredItem>, BackendError> {
        let embedding = self.embedder.embed(&query.text).await?;
        if embedding.is_empty() {
            return Err(BackendError::InvalidResponse {
                reason: "embedder returned an empty vector".to_string(),
            });
        }
        self.store
            .search(&embedding, query.limit, query.filters.as_ref())
            .await
    }
}

//! Lexical channel over the sparse term index.

use std::sync::Arc;

use async_trait::async_trait;
use tracing::debug;

use fusion_core::errors::BackendError;
use fusion_core::models::{ChannelKind, ScoredItem};
use fusion_core::traits::SparseIndexClient;

use super::{query_terms, Channel, ChannelQuery};

pub struct SparseChannel {
    index: Arc<dyn SparseIndexClient>,
}

impl SparseChannel {
    pub fn new(index: Arc<dyn SparseIndexClient>) -> Self {
        Self { index }
    }
}

#[async_trait]
impl Channel for SparseChannel {
    fn kind(&self) -> ChannelKind {
        ChannelKind::Sparse
    }

    async fn fetch(&self, query: &ChannelQuery) -> Result<Vec<ScoredItem>, BackendError> {
        let terms = query_terms::terms(&query.text);
        if terms.is_empty() {
            debug!("no content terms, skipping sparse lookup");
            return Ok(Vec::new());
        }
        self.index.search(&terms, query.limit).await
    }
}

//! External collaborators. Each backend fails independently; errors are
//! reported as [`BackendError`] and captured by the calling channel.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use crate::errors::BackendError;
use crate::models::{Filters, ScoredItem};

/// Dense embedding similarity search.
#[async_trait]
pub trait VectorStoreClient: Send + Sync {
    async fn search(
        &self,
        embedding: &[f32],
        top_k: usize,
        filters: Option<&Filters>,
    ) -> Result<Vec<ScoredItem>, BackendError>;
}

/// Lexical / sparse term search.
#[async_trait]
pub trait SparseIndexClient: Send + Sync {
    async fn search(&self, terms: &[String], top_k: usize)
        -> Result<Vec<ScoredItem>, BackendError>;
}

/// Community-level query against precomputed graph communities.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CommunityQuery {
    pub text: String,
    pub top_k: usize,
}

/// Knowledge graph store.
#[async_trait]
pub trait GraphStoreClient: Send + Sync {
    /// Entity-anchored neighborhood traversal returning associated chunks.
    async fn local_search(
        &self,
        entities: &[String],
        hops: u8,
    ) -> Result<Vec<ScoredItem>, BackendError>;

    /// Community/cluster-level retrieval.
    async fn global_search(&self, query: &CommunityQuery)
        -> Result<Vec<ScoredItem>, BackendError>;
}

/// Text completion, used for classification and optional reranking.
#[async_trait]
pub trait LlmClient: Send + Sync {
    async fn complete(&self, prompt: &str) -> Result<String, BackendError>;
}

/// Query embedding generation.
#[async_trait]
pub trait QueryEmbedder: Send + Sync {
    async fn embed(&self, text: &str) -> Result<Vec<f32>, BackendError>;
}

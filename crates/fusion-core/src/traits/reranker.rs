use async_trait::async_trait;

use crate::errors::RerankError;
use crate::models::FusedResult;

/// Higher-cost relevance model applied to the fused top-N.
#[async_trait]
pub trait Reranker: Send + Sync {
    fn name(&self) -> &str;

    /// Return `candidates` reordered by relevance to `query`.
    ///
    /// Implementations may set `rerank_score`. The caller validates that the
    /// output is a permutation of the input and falls back otherwise.
    async fn rerank(
        &self,
        query: &str,
        candidates: &[FusedResult],
    ) -> Result<Vec<FusedResult>, RerankError>;
}

//! Retrieval channels.
//!
//! A channel wraps one external backend and turns a query into a ranked list
//! of [`ScoredItem`]s. [`Channel::execute`] adds timing, the timeout ceiling,
//! and error capture: it always returns a [`ChannelResult`], never an error.

pub mod graph_global;
pub mod graph_local;
pub mod query_terms;
pub mod sparse;
pub mod vector;

use std::time::{Duration, Instant};

use async_trait::async_trait;

use fusion_core::errors::{BackendError, ChannelError};
use fusion_core::models::{ChannelKind, ChannelResult, Filters, ScoredItem};

use crate::elapsed_ms;

pub use graph_global::GraphGlobalChannel;
pub use graph_local::GraphLocalChannel;
pub use sparse::SparseChannel;
pub use vector::VectorChannel;

/// Per-search input handed to every channel.
#[derive(Debug, Clone, PartialEq)]
pub struct ChannelQuery {
    /// Trimmed query text.
    pub text: String,
    /// Number of candidates to fetch (already over-fetched).
    pub limit: usize,
    pub filters: Option<Filters>,
    /// Graph-local traversal depth, 1..=2.
    pub graph_hops: u8,
}

/// One retrieval source.
#[async_trait]
pub trait Channel: Send + Sync {
    fn kind(&self) -> ChannelKind;

    /// Fetch ranked candidates, best first.
    async fn fetch(&self, query: &ChannelQuery) -> Result<Vec<ScoredItem>, BackendError>;

    /// Run [`Channel::fetch`] under `timeout` and capture the outcome.
    async fn execute(&self, query: &ChannelQuery, timeout: Duration) -> ChannelResult {
        let kind = self.kind();
        let start = Instant::now();
        match tokio::time::timeout(timeout, self.fetch(query)).await {
            Ok(Ok(mut items)) => {
                items.truncate(query.limit);
                ChannelResult::success(kind, items, elapsed_ms(start))
            }
            Ok(Err(source)) => ChannelResult::failure(
                ChannelError::Unavailable {
                    channel: kind,
                    source,
                },
                elapsed_ms(start),
            ),
            Err(_) => ChannelResult::failure(
                ChannelError::Timeout {
                    channel: kind,
                    timeout_ms: u64::try_from(timeout.as_millis()).unwrap_or(u64::MAX),
                },
                elapsed_ms(start),
            ),
        }
    }
}

use crate::models::{ChannelResult, SearchRequest, SearchResponse};

/// Receives search outcomes for logging and metrics.
///
/// Called synchronously on the search path; implementations must be cheap
/// and must not panic.
pub trait SearchObserver: Send + Sync {
    /// Called once per search, after assembly.
    fn on_search(&self, request: &SearchRequest, response: &SearchResponse);

    /// Called for each channel that failed, timed out, or was cancelled,
    /// before `on_search`.
    fn on_channel_failure(&self, result: &ChannelResult) {
        let _ = result;
    }
}

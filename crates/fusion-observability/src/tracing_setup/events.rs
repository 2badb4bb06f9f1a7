//! Structured log events emitted by the observer.

use fusion_core::models::ChannelKind;

pub fn query_logged(query_hash: &str, intent: &str, latency_ms: u64, results: usize) {
    tracing::debug!(
        event = "query_logged",
        query_hash = %query_hash,
        intent = %intent,
        latency_ms = latency_ms,
        result_count = results,
        "query logged"
    );
}

pub fn channel_degraded(channel: ChannelKind, failure: &str) {
    tracing::warn!(
        event = "channel_degraded",
        channel = %channel,
        failure = %failure,
        "channel degraded"
    );
}

pub fn channel_recovered(channel: ChannelKind, degraded_for_ms: i64) {
    tracing::info!(
        event = "channel_recovered",
        channel = %channel,
        degraded_for_ms = degraded_for_ms,
        "channel recovered"
    );
}

pub fn search_degraded(query_hash: &str, failed: usize) {
    tracing::error!(
        event = "search_degraded",
        query_hash = %query_hash,
        channels_failed = failed,
        "every channel failed"
    );
}

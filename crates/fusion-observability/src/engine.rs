//! [`ObservabilityEngine`]: owns the query log and degradation tracker and
//! observes every search.

use std::collections::HashMap;
use std::sync::{Mutex, MutexGuard};

use fusion_core::config::ObservabilityConfig;
use fusion_core::errors::FusionResult;
use fusion_core::models::{
    ChannelKind, ChannelResult, ChannelStatus, SearchRequest, SearchResponse,
};
use fusion_core::traits::SearchObserver;

use crate::degradation::DegradationTracker;
use crate::query_log::{QueryLog, QueryLogEntry};
use crate::tracing_setup::events;

/// Shared observability state. Cheap to call from the search path.
#[derive(Debug, Default)]
pub struct ObservabilityEngine {
    query_log: Mutex<QueryLog>,
    degradation: Mutex<DegradationTracker>,
    failure_counts: Mutex<HashMap<ChannelKind, u64>>,
}

fn lock<T>(m: &Mutex<T>) -> MutexGuard<'_, T> {
    m.lock().unwrap_or_else(|e| e.into_inner())
}

impl ObservabilityEngine {
    pub fn new(config: &ObservabilityConfig) -> Self {
        Self {
            query_log: Mutex::new(QueryLog::with_capacity(config.query_log_capacity)),
            degradation: Mutex::new(DegradationTracker::new()),
            failure_counts: Mutex::default(),
        }
    }

    /// Run `f` against the query log.
    pub fn with_query_log<R>(&self, f: impl FnOnce(&QueryLog) -> R) -> R {
        f(&lock(&self.query_log))
    }

    /// Run `f` against the degradation tracker.
    pub fn with_degradation<R>(&self, f: impl FnOnce(&DegradationTracker) -> R) -> R {
        f(&lock(&self.degradation))
    }

    pub fn is_channel_degraded(&self, channel: ChannelKind) -> bool {
        lock(&self.degradation).is_degraded(channel)
    }

    /// Total failures observed for a channel since startup.
    pub fn failure_count(&self, channel: ChannelKind) -> u64 {
        lock(&self.failure_counts).get(&channel).copied().unwrap_or(0)
    }

    /// Serialize summary stats to JSON.
    pub fn snapshot(&self) -> FusionResult<serde_json::Value> {
        let (count, avg_ms, p95_ms, cache_hit_rate, degraded_rate, intents) = {
            let log = lock(&self.query_log);
            (
                log.count(),
                log.avg_latency().as_millis() as u64,
                log.latency_percentile(0.95).as_millis() as u64,
                log.cache_hit_rate(),
                log.degraded_rate(),
                log.intent_distribution(),
            )
        };
        let degraded_channels: Vec<ChannelKind> = {
            let tracker = lock(&self.degradation);
            ChannelKind::ALL
                .into_iter()
                .filter(|c| tracker.is_degraded(*c))
                .collect()
        };
        let failure_counts: HashMap<String, u64> = lock(&self.failure_counts)
            .iter()
            .map(|(channel, n)| (channel.to_string(), *n))
            .collect();
        Ok(serde_json::json!({
            "query_count": count,
            "avg_latency_ms": avg_ms,
            "p95_latency_ms": p95_ms,
            "cache_hit_rate": cache_hit_rate,
            "degraded_rate": degraded_rate,
            "intent_distribution": serde_json::to_value(intents)?,
            "degraded_channels": serde_json::to_value(degraded_channels)?,
            "channel_failures": serde_json::to_value(failure_counts)?,
        }))
    }
}

impl SearchObserver for ObservabilityEngine {
    fn on_channel_failure(&self, result: &ChannelResult) {
        *lock(&self.failure_counts).entry(result.channel).or_insert(0) += 1;
    }

    fn on_search(&self, request: &SearchRequest, response: &SearchResponse) {
        let entry = QueryLogEntry::from_search(request, response);
        let meta = &response.metadata;
        if meta.degraded {
            events::search_degraded(&entry.query_hash, meta.channels_failed.len());
        }
        lock(&self.query_log).record(entry);

        let mut tracker = lock(&self.degradation);
        for report in &meta.channel_reports {
            match report.status {
                ChannelStatus::Success => tracker.mark_recovered(report.channel),
                status => tracker.record(
                    report.channel,
                    status,
                    report.error.clone().unwrap_or_else(|| status_name(status).to_string()),
                ),
            }
        }
    }
}

fn status_name(status: ChannelStatus) -> &'static str {
    match status {
        ChannelStatus::Success => "success",
        ChannelStatus::Failed => "failed",
        ChannelStatus::Timeout => "timeout",
    }
}

//! Query performance log: fingerprint, intent, latency, result count, cache hits, failures.

use std::collections::{BTreeMap, VecDeque};
use std::time::Duration;

use serde::{Deserialize, Serialize};

use fusion_core::models::{ChannelKind, ClassificationSource, SearchRequest, SearchResponse};
use fusion_core::Intent;

use crate::tracing_setup::events;

/// A single query log entry. Holds a query fingerprint, never the text.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct QueryLogEntry {
    pub query_hash: String,
    pub intent: Intent,
    pub source: ClassificationSource,
    pub latency: Duration,
    pub result_count: usize,
    pub cache_hit: bool,
    pub channels_failed: Vec<ChannelKind>,
    pub degraded: bool,
    pub reranked: bool,
    pub timestamp_epoch_ms: i64,
}

impl QueryLogEntry {
    /// Build an entry from a completed search, timestamped now.
    pub fn from_search(request: &SearchRequest, response: &SearchResponse) -> Self {
        let meta = &response.metadata;
        Self {
            query_hash: request.fingerprint(),
            intent: meta.intent,
            source: meta.classification_source,
            latency: Duration::from_millis(meta.total_latency_ms),
            result_count: response.results.len(),
            cache_hit: meta.cache_hit,
            channels_failed: meta.channels_failed.clone(),
            degraded: meta.degraded,
            reranked: meta.reranked,
            timestamp_epoch_ms: chrono::Utc::now().timestamp_millis(),
        }
    }
}

/// Bounded query log. Oldest entries are evicted first.
#[derive(Debug, Clone)]
pub struct QueryLog {
    entries: VecDeque<QueryLogEntry>,
    max_entries: usize,
}

impl Default for QueryLog {
    fn default() -> Self {
        Self::with_capacity(fusion_core::config::defaults::DEFAULT_QUERY_LOG_CAPACITY)
    }
}

impl QueryLog {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_capacity(max_entries: usize) -> Self {
        Self {
            entries: VecDeque::new(),
            max_entries: max_entries.max(1),
        }
    }

    pub fn record(&mut self, entry: QueryLogEntry) {
        events::query_logged(
            &entry.query_hash,
            entry.intent.name(),
            u64::try_from(entry.latency.as_millis()).unwrap_or(u64::MAX),
            entry.result_count,
        );
        self.entries.push_back(entry);
        while self.entries.len() > self.max_entries {
            self.entries.pop_front();
        }
    }

    pub fn entries(&self) -> impl Iterator<Item = &QueryLogEntry> {
        self.entries.iter()
    }

    pub fn count(&self) -> usize {
        self.entries.len()
    }

    pub fn avg_latency(&self) -> Duration {
        if self.entries.is_empty() {
            return Duration::ZERO;
        }
        let total: Duration = self.entries.iter().map(|e| e.latency).sum();
        total / self.entries.len() as u32
    }

    /// Latency at the given percentile (0.0–1.0).
    pub fn latency_percentile(&self, p: f64) -> Duration {
        if self.entries.is_empty() {
            return Duration::ZERO;
        }
        let mut latencies: Vec<Duration> = self.entries.iter().map(|e| e.latency).collect();
        latencies.sort();
        let idx = ((p.clamp(0.0, 1.0) * (latencies.len() - 1) as f64).round() as usize)
            .min(latencies.len() - 1);
        latencies[idx]
    }

    /// Fraction of queries whose classification came from cache.
    pub fn cache_hit_rate(&self) -> f64 {
        self.rate(|e| e.cache_hit)
    }

    /// Fraction of queries where every channel failed.
    pub fn degraded_rate(&self) -> f64 {
        self.rate(|e| e.degraded)
    }

    pub fn intent_distribution(&self) -> BTreeMap<Intent, usize> {
        let mut counts = BTreeMap::new();
        for entry in &self.entries {
            *counts.entry(entry.intent).or_default() += 1;
        }
        counts
    }

    fn rate(&self, pred: impl Fn(&QueryLogEntry) -> bool) -> f64 {
        if self.entries.is_empty() {
            return 0.0;
        }
        self.entries.iter().filter(|e| pred(e)).count() as f64 / self.entries.len() as f64
    }
}

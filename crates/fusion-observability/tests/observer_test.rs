//! ObservabilityEngine as a SearchObserver: query log and degradation tracking.

use fusion_core::config::ObservabilityConfig;
use fusion_core::intent::weights::default_profile;
use fusion_core::models::{
    ChannelKind, ChannelReport, ChannelStatus, ClassificationSource, SearchMetadata,
    SearchRequest, SearchResponse, StageLatency,
};
use fusion_core::traits::SearchObserver;
use fusion_core::Intent;
use fusion_observability::ObservabilityEngine;

fn report(channel: ChannelKind, status: ChannelStatus) -> ChannelReport {
    ChannelReport {
        channel,
        status,
        latency_ms: 5,
        item_count: usize::from(status == ChannelStatus::Success),
        error: (status != ChannelStatus::Success).then(|| format!("{channel} down")),
    }
}

fn response(reports: Vec<ChannelReport>) -> SearchResponse {
    let executed: Vec<_> = reports
        .iter()
        .filter(|r| r.status == ChannelStatus::Success)
        .map(|r| r.channel)
        .collect();
    let failed: Vec<_> = reports
        .iter()
        .filter(|r| r.status != ChannelStatus::Success)
        .map(|r| r.channel)
        .collect();
    let weights = default_profile(Intent::Factual);
    SearchResponse {
        results: vec![],
        metadata: SearchMetadata {
            intent: Intent::Factual,
            weights,
            effective_weights: weights,
            classification_source: ClassificationSource::Rule,
            classification_confidence: 0.8,
            degraded: executed.is_empty() && !reports.is_empty(),
            channels_executed: executed,
            channels_failed: failed,
            channels_skipped: vec![],
            channel_reports: reports,
            total_latency_ms: 12,
            stage_latency: StageLatency::default(),
            cache_hit: false,
            reranked: false,
            rerank_fallback: false,
        },
    }
}

#[test]
fn logs_each_search_without_query_text() {
    let engine = ObservabilityEngine::new(&ObservabilityConfig::default());
    let request = SearchRequest::new("What is the secret project?", 5);
    engine.on_search(&request, &response(vec![report(ChannelKind::Vector, ChannelStatus::Success)]));

    engine.with_query_log(|log| {
        assert_eq!(log.count(), 1);
        let entry = log.entries().next().unwrap();
        assert_eq!(entry.query_hash, request.fingerprint());
        assert!(!entry.query_hash.contains("secret"));
    });
}

#[test]
fn failures_tracked_until_channel_succeeds() {
    let engine = ObservabilityEngine::new(&ObservabilityConfig::default());
    let request = SearchRequest::new("q", 5);

    engine.on_search(
        &request,
        &response(vec![
            report(ChannelKind::Vector, ChannelStatus::Success),
            report(ChannelKind::Sparse, ChannelStatus::Timeout),
        ]),
    );
    assert!(engine.is_channel_degraded(ChannelKind::Sparse));
    assert!(!engine.is_channel_degraded(ChannelKind::Vector));

    engine.on_search(
        &request,
        &response(vec![report(ChannelKind::Sparse, ChannelStatus::Success)]),
    );
    assert!(!engine.is_channel_degraded(ChannelKind::Sparse));
    engine.with_degradation(|t| assert_eq!(t.events().len(), 1));
}

#[test]
fn snapshot_reports_rates() {
    let engine = ObservabilityEngine::new(&ObservabilityConfig::default());
    let request = SearchRequest::new("q", 5);
    let all_failed: Vec<_> = ChannelKind::ALL
        .into_iter()
        .map(|c| report(c, ChannelStatus::Failed))
        .collect();
    engine.on_search(&request, &response(all_failed));
    engine.on_search(&request, &response(vec![report(ChannelKind::Vector, ChannelStatus::Success)]));

    let snap = engine.snapshot().unwrap();
    assert_eq!(snap["query_count"], 2);
    assert_eq!(snap["degraded_rate"], 0.5);
    assert_eq!(snap["intent_distribution"]["factual"], 2);
    let degraded = snap["degraded_channels"].as_array().unwrap();
    assert_eq!(degraded.len(), 3);
}

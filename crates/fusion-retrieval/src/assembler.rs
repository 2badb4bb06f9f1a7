//! Builds the final [`SearchResponse`] and its metadata.

use fusion_core::models::{
    ChannelKind, ChannelReport, ChannelResult, FusedResult, SearchMetadata, SearchResponse,
    StageLatency,
};
use fusion_core::IntentWeights;

use crate::intent::Classification;
use crate::search::degradation;

/// Everything the assembler needs from the earlier stages.
#[derive(Debug, Clone)]
pub struct AssemblyInput<'a> {
    pub classification: &'a Classification,
    pub effective_weights: IntentWeights,
    pub channel_results: &'a [ChannelResult],
    pub channels_skipped: Vec<ChannelKind>,
    pub results: Vec<FusedResult>,
    pub reranked: bool,
    pub rerank_fallback: bool,
    pub stage_latency: StageLatency,
    pub total_latency_ms: u64,
}

/// Assemble a response. `degraded` is set when channels were launched and
/// none succeeded; the result list is then empty.
pub fn assemble(input: AssemblyInput<'_>) -> SearchResponse {
    let channels_executed = degradation::succeeded(input.channel_results);
    let channels_failed = degradation::failed(input.channel_results);
    let degraded = !input.channel_results.is_empty() && channels_executed.is_empty();

    let channel_reports = input.channel_results.iter().map(report).collect();
    let classification = &input.classification.result;

    let results = if degraded { Vec::new() } else { input.results };

    SearchResponse {
        results,
        metadata: SearchMetadata {
            intent: classification.intent,
            weights: classification.weights,
            effective_weights: input.effective_weights,
            classification_source: classification.source,
            classification_confidence: classification.confidence,
            channels_executed,
            channels_failed,
            channels_skipped: input.channels_skipped,
            channel_reports,
            total_latency_ms: input.total_latency_ms,
            stage_latency: input.stage_latency,
            cache_hit: input.classification.cache_hit,
            reranked: input.reranked,
            rerank_fallback: input.rerank_fallback,
            degraded,
        },
    }
}

fn report(result: &ChannelResult) -> ChannelReport {
    ChannelReport {
        channel: result.channel,
        status: result.status,
        latency_ms: result.latency_ms,
        item_count: result.items.len(),
        error: result.error.as_ref().map(ToString::to_string),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use fusion_core::errors::{BackendError, ChannelError};
    use fusion_core::intent::weights::default_profile;
    use fusion_core::models::{ClassificationSource, IntentClassificationResult, ScoredItem};
    use fusion_core::Intent;

    fn classification() -> Classification {
        Classification {
            result: IntentClassificationResult {
                intent: Intent::Factual,
                weights: default_profile(Intent::Factual),
                confidence: 0.8,
                source: ClassificationSource::Rule,
                latency_ms: 0,
            },
            cache_hit: false,
        }
    }

    fn unavailable(kind: ChannelKind) -> ChannelResult {
        ChannelResult::failure(
            ChannelError::Unavailable {
                channel: kind,
                source: BackendError::Unreachable {
                    reason: "down".into(),
                },
            },
            3,
        )
    }

    fn input<'a>(c: &'a Classification, results: &'a [ChannelResult]) -> AssemblyInput<'a> {
        AssemblyInput {
            classification: c,
            effective_weights: c.result.weights,
            channel_results: results,
            channels_skipped: vec![],
            results: vec![],
            reranked: false,
            rerank_fallback: false,
            stage_latency: StageLatency::default(),
            total_latency_ms: 10,
        }
    }

    #[test]
    fn all_failed_is_degraded() {
        let c = classification();
        let results: Vec<_> = ChannelKind::ALL.into_iter().map(unavailable).collect();
        let response = assemble(input(&c, &results));
        assert!(response.metadata.degraded);
        assert!(response.results.is_empty());
        assert_eq!(response.metadata.channels_failed.len(), 4);
        assert!(response.metadata.channel_reports[0]
            .error
            .as_deref()
            .unwrap()
            .contains("down"));
    }

    #[test]
    fn partial_failure_is_not_degraded() {
        let c = classification();
        let results = vec![
            ChannelResult::success(ChannelKind::Vector, vec![ScoredItem::new("a", 1.0)], 2),
            unavailable(ChannelKind::Sparse),
        ];
        let response = assemble(input(&c, &results));
        assert!(!response.metadata.degraded);
        assert!(response.metadata.is_partial());
        assert_eq!(response.metadata.channel_reports[0].item_count, 1);
    }

    #[test]
    fn nothing_launched_is_not_degraded() {
        let c = classification();
        let response = assemble(input(&c, &[]));
        assert!(!response.metadata.degraded);
    }
}

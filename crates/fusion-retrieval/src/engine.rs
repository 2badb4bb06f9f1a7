//! SearchEngine: the end-to-end search entry point.
//!
//! classify → fan out → fuse → rerank → assemble.
//!
//! `search` never returns an error. Every failure below the engine degrades
//! into metadata: failed channels are listed, a failed rerank keeps fused
//! order, and when every channel fails the response is empty and marked
//! `degraded`.

use std::sync::Arc;
use std::time::Instant;

use tokio_util::sync::CancellationToken;
use tracing::{debug, info, info_span, warn, Instrument};

use fusion_core::constants::MAX_TOP_K;
use fusion_core::models::{
    query_fingerprint, ChannelKind, ChannelResult, SearchRequest, SearchResponse, StageLatency,
};
use fusion_core::traits::{ConfigProvider, Reranker, SearchObserver};
use fusion_core::FusionConfig;

use crate::assembler::{self, AssemblyInput};
use crate::builder::SearchEngineBuilder;
use crate::channels::{Channel, ChannelQuery};
use crate::elapsed_ms;
use crate::intent::{Classification, IntentClassifier};
use crate::ranking;
use crate::search::rrf_fusion::WeightedRrfFuser;
use crate::search::{self, degradation, FanOutOutcome};

/// Stateless per request. Safe to share across tasks behind an `Arc`.
pub struct SearchEngine {
    pub(crate) classifier: IntentClassifier,
    pub(crate) channels: Vec<Arc<dyn Channel>>,
    pub(crate) reranker: Option<Arc<dyn Reranker>>,
    pub(crate) config: Arc<dyn ConfigProvider>,
    pub(crate) observer: Option<Arc<dyn SearchObserver>>,
}

impl SearchEngine {
    pub fn builder() -> SearchEngineBuilder {
        SearchEngineBuilder::new()
    }

    /// Run a search.
    pub async fn search(&self, request: SearchRequest) -> SearchResponse {
        self.run(request, None).await
    }

    /// Run a search that stops waiting on channels once `cancel` fires.
    ///
    /// Channels still in flight are aborted and reported as failed; whatever
    /// already returned is fused as usual.
    pub async fn search_with_cancellation(
        &self,
        request: SearchRequest,
        cancel: &CancellationToken,
    ) -> SearchResponse {
        self.run(request, Some(cancel)).await
    }

    pub fn classifier(&self) -> &IntentClassifier {
        &self.classifier
    }

    /// Registered channels, in channel order.
    pub fn channel_kinds(&self) -> Vec<ChannelKind> {
        self.channels.iter().map(|c| c.kind()).collect()
    }

    pub fn config(&self) -> Arc<FusionConfig> {
        self.config.get()
    }

    async fn run(&self, request: SearchRequest, cancel: Option<&CancellationToken>) -> SearchResponse {
        let span = info_span!(
            "fusion.search",
            query_hash = %query_fingerprint(&request.query),
            top_k = request.top_k,
        );
        let (response, failures) = self.execute(&request, cancel).instrument(span).await;
        if let Some(observer) = &self.observer {
            for failure in &failures {
                observer.on_channel_failure(failure);
            }
            observer.on_search(&request, &response);
        }
        response
    }

    async fn execute(
        &self,
        request: &SearchRequest,
        cancel: Option<&CancellationToken>,
    ) -> (SearchResponse, Vec<ChannelResult>) {
        let started = Instant::now();
        let config = self.config.get();
        let top_k = request.top_k.min(MAX_TOP_K);
        let query = request.query.trim();
        let mut stages = StageLatency::default();

        // Stage 1: classification.
        let stage = Instant::now();
        let classification = match request.intent_override {
            Some(intent) => Classification {
                result: self.classifier.resolve_override(intent),
                cache_hit: false,
            },
            None => self.classifier.classify_with(query, &config.classifier).await,
        };
        stages.classification_ms = elapsed_ms(stage);

        if query.is_empty() || top_k == 0 {
            return self.finish(
                &classification,
                FanOutOutcome {
                    results: Vec::new(),
                    skipped: ChannelKind::ALL.to_vec(),
                    cancelled: false,
                },
                classification.result.weights,
                Vec::new(),
                RerankFlags::default(),
                stages,
                started,
            );
        }

        // Stage 2: concurrent channel fan-out.
        let stage = Instant::now();
        let channel_query = ChannelQuery {
            text: query.to_string(),
            limit: top_k.saturating_mul(config.channels.fetch_multiplier),
            filters: request.filters.clone().filter(|f| !f.is_empty()),
            graph_hops: config.channels.graph_hops,
        };
        let outcome = search::fan_out(&self.channels, channel_query, &config.channels, cancel).await;
        stages.channels_ms = elapsed_ms(stage);
        debug!(
            ms = stages.channels_ms,
            succeeded = degradation::succeeded(&outcome.results).len(),
            cancelled = outcome.cancelled,
            "channel fan-out settled"
        );

        // Stage 3: weighted RRF.
        let stage = Instant::now();
        let weights = degradation::effective_weights(
            &classification.result.weights,
            &outcome.results,
            config.fusion.renormalize_on_degradation,
        );
        let fused = WeightedRrfFuser::new(config.fusion.rrf_k)
            .fuse(&outcome.results, &weights, top_k)
            .results;
        stages.fusion_ms = elapsed_ms(stage);
        debug!(ms = stages.fusion_ms, fused = fused.len(), "fusion complete");

        // Stage 4: optional rerank.
        let stage = Instant::now();
        let wants_rerank = request.rerank.unwrap_or(config.rerank.enabled);
        let (fused, flags) = match (&self.reranker, wants_rerank && !fused.is_empty()) {
            (Some(reranker), true) => {
                let out = ranking::apply(
                    reranker.as_ref(),
                    query,
                    fused,
                    config.rerank.top_n,
                    config.rerank.timeout(),
                )
                .await;
                let flags = RerankFlags {
                    reranked: out.reranked,
                    fallback: out.fell_back(),
                };
                (out.results, flags)
            }
            (None, true) => {
                warn!("rerank requested but no reranker is configured");
                (
                    fused,
                    RerankFlags {
                        reranked: false,
                        fallback: true,
                    },
                )
            }
            (_, false) => (fused, RerankFlags::default()),
        };
        stages.rerank_ms = elapsed_ms(stage);

        self.finish(
            &classification,
            outcome,
            weights,
            fused,
            flags,
            stages,
            started,
        )
    }

    #[allow(clippy::too_many_arguments)]
    fn finish(
        &self,
        classification: &Classification,
        outcome: FanOutOutcome,
        effective_weights: fusion_core::IntentWeights,
        results: Vec<fusion_core::FusedResult>,
        flags: RerankFlags,
        mut stages: StageLatency,
        started: Instant,
    ) -> (SearchResponse, Vec<ChannelResult>) {
        let stage = Instant::now();
        let mut response = assembler::assemble(AssemblyInput {
            classification,
            effective_weights,
            channel_results: &outcome.results,
            channels_skipped: outcome.skipped,
            results,
            reranked: flags.reranked,
            rerank_fallback: flags.fallback,
            stage_latency: stages,
            total_latency_ms: 0,
        });
        stages.assembly_ms = elapsed_ms(stage);
        response.metadata.stage_latency = stages;
        response.metadata.total_latency_ms = elapsed_ms(started);

        let meta = &response.metadata;
        if meta.degraded {
            warn!(
                channels_failed = meta.channels_failed.len(),
                "all channels failed, returning empty result"
            );
        }
        info!(
            intent = %meta.intent,
            source = ?meta.classification_source,
            cache_hit = meta.cache_hit,
            executed = meta.channels_executed.len(),
            failed = meta.channels_failed.len(),
            results = response.results.len(),
            reranked = meta.reranked,
            latency_ms = meta.total_latency_ms,
            "search complete"
        );
        let failures = outcome.results.into_iter().filter(|r| !r.is_success()).collect();
        (response, failures)
    }
}

#[derive(Debug, Clone, Copy, Default)]
struct RerankFlags {
    reranked: bool,
    fallback: bool,
}

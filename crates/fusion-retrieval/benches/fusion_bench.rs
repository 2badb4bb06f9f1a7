use std::sync::Arc;

use criterion::{black_box, criterion_group, criterion_main, Criterion};

use fusion_core::intent::weights::default_profile;
use fusion_core::models::{ChannelKind, ChannelResult, SearchRequest};
use fusion_core::{FusionConfig, Intent};
use fusion_retrieval::intent::rules;
use fusion_retrieval::{SearchEngine, WeightedRrfFuser};
use test_fixtures::mocks::{
    items_from_ids, MockEmbedder, MockGraphStore, MockSparseIndex, MockVectorStore,
};

/// Four channels of 200 items each with ~50% overlap between neighbors.
fn channel_results() -> Vec<ChannelResult> {
    ChannelKind::ALL
        .into_iter()
        .enumerate()
        .map(|(c, kind)| {
            let ids: Vec<String> = (0..200).map(|i| format!("doc-{}", i + c * 100)).collect();
            ChannelResult::success(kind, items_from_ids(&ids), 1)
        })
        .collect()
}

fn bench_fuse_800(c: &mut Criterion) {
    let results = channel_results();
    let weights = default_profile(Intent::Exploratory);
    let fuser = WeightedRrfFuser::default();

    c.bench_function("rrf_fuse_4x200_top20", |b| {
        b.iter(|| fuser.fuse(black_box(&results), &weights, 20));
    });
}

fn bench_rule_classification(c: &mut Criterion) {
    let queries = [
        "What is the capital of France?",
        "how does the scheduler interact with the io driver",
        "max_retry_count in RRF config",
        "summarize the main points of the design review",
        "vector databases",
    ];
    c.bench_function("rule_classify_5_queries", |b| {
        b.iter(|| {
            for q in &queries {
                black_box(rules::classify(q));
            }
        });
    });
}

fn bench_end_to_end(c: &mut Criterion) {
    let ids: Vec<String> = (0..100).map(|i| format!("doc-{i}")).collect();
    let mut config = FusionConfig::default();
    config.classifier.llm_enabled = false;
    let engine = SearchEngine::builder()
        .vector_store(
            Arc::new(MockVectorStore::with_ids(&ids)),
            Arc::new(MockEmbedder::default()),
        )
        .sparse_index(Arc::new(MockSparseIndex::with_ids(&ids)))
        .graph_store(Arc::new(MockGraphStore::with_ids(&ids, &ids)))
        .config(config)
        .build()
        .expect("bench engine");
    let runtime = tokio::runtime::Runtime::new().expect("runtime");

    c.bench_function("search_mock_backends_top10", |b| {
        b.to_async(&runtime).iter(|| async {
            black_box(
                engine
                    .search(SearchRequest::new("What is the capital of France?", 10))
                    .await,
            )
        });
    });
}

criterion_group!(
    benches,
    bench_fuse_800,
    bench_rule_classification,
    bench_end_to_end
);
criterion_main!(benches);

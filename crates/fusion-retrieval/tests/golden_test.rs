//! Golden scenarios: canned channel outputs → expected fused order.

mod common;

use fusion_core::models::{ChannelKind, SearchRequest};
use test_fixtures::golden::GoldenScenario;
use test_fixtures::mocks::{unreachable, Behavior};
use test_fixtures::{list_fixtures, load_fixture};

use common::{ids, Harness};

fn harness_for(scenario: &GoldenScenario) -> Harness {
    let harness = Harness::with_ids(&[], &[], &[], &[]);
    for kind in ChannelKind::ALL {
        let behavior = if scenario.fails(kind) {
            Behavior::Fail(unreachable("golden failure"))
        } else {
            Behavior::Items(scenario.items(kind))
        };
        harness.set(kind, behavior);
    }
    harness
}

async fn run(file: &str) {
    let scenario: GoldenScenario = load_fixture(file);
    let engine = harness_for(&scenario).engine();

    let mut request = SearchRequest::new(&scenario.query, scenario.top_k);
    request.intent_override = scenario.intent_override;
    let response = engine.search(request).await;

    let expected = &scenario.expected;
    assert_eq!(response.metadata.intent, expected.intent, "{}: intent", scenario.name);
    assert_eq!(ids(&response), expected.ordered_ids, "{}: order", scenario.name);
    assert_eq!(
        response.metadata.channels_failed, expected.channels_failed,
        "{}: failed channels",
        scenario.name
    );
    assert_eq!(response.metadata.degraded, expected.degraded, "{}: degraded", scenario.name);
    if let Some(top) = expected.top_score {
        let actual = response.results[0].fused_score;
        assert!((actual - top).abs() < 1e-9, "{}: top score {actual} != {top}", scenario.name);
    }
}

#[tokio::test]
async fn golden_factual_worked_example() {
    run("factual_worked_example.json").await;
}

#[tokio::test]
async fn golden_summary_global_dominates() {
    run("summary_global_dominates.json").await;
}

#[tokio::test]
async fn golden_keyword_sparse_leads() {
    run("keyword_sparse_leads.json").await;
}

#[tokio::test]
async fn golden_partial_failure() {
    run("partial_failure.json").await;
}

#[tokio::test]
async fn golden_all_channels_fail() {
    run("all_channels_fail.json").await;
}

#[tokio::test]
async fn golden_override_top_k() {
    run("override_top_k.json").await;
}

#[tokio::test]
async fn every_golden_file_has_a_test() {
    let names: Vec<String> = list_fixtures()
        .iter()
        .map(|p| p.file_name().unwrap().to_string_lossy().to_string())
        .collect();
    assert_eq!(names.len(), 6, "new golden file needs a test: {names:?}");
}

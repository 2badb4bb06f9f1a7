//! Property tests for weighted RRF fusion.

use std::collections::HashSet;

use proptest::prelude::*;

use fusion_core::models::{ChannelKind, ChannelResult, ScoredItem};
use fusion_core::IntentWeights;
use fusion_retrieval::WeightedRrfFuser;

fn arb_weights() -> impl Strategy<Value = IntentWeights> {
    (0u32..=100, 0u32..=100, 0u32..=100, 0u32..=100)
        .prop_filter("non-zero", |(a, b, c, d)| a + b + c + d > 0)
        .prop_map(|(a, b, c, d)| {
            let total = f64::from(a + b + c + d);
            IntentWeights {
                vector: f64::from(a) / total,
                sparse: f64::from(b) / total,
                graph_local: f64::from(c) / total,
                graph_global: f64::from(d) / total,
            }
        })
}

fn arb_channel(kind: ChannelKind) -> impl Strategy<Value = ChannelResult> {
    prop::collection::vec(0u8..30, 0..20).prop_map(move |ids| {
        let items = ids
            .into_iter()
            .enumerate()
            .map(|(i, id)| ScoredItem::new(format!("doc-{id}"), 100.0 - i as f64))
            .collect();
        ChannelResult::success(kind, items, 1)
    })
}

fn arb_results() -> impl Strategy<Value = Vec<ChannelResult>> {
    (
        arb_channel(ChannelKind::Vector),
        arb_channel(ChannelKind::Sparse),
        arb_channel(ChannelKind::GraphLocal),
        arb_channel(ChannelKind::GraphGlobal),
    )
        .prop_map(|(a, b, c, d)| vec![a, b, c, d])
}

proptest! {
    #[test]
    fn output_is_bounded_sorted_and_unique(
        results in arb_results(),
        weights in arb_weights(),
        top_k in 0usize..40,
    ) {
        let out = WeightedRrfFuser::default().fuse(&results, &weights, top_k);
        prop_assert!(out.results.len() <= top_k);
        prop_assert!(out.input_errors.is_empty());
        for w in out.results.windows(2) {
            prop_assert!(w[0].fused_score >= w[1].fused_score);
        }
        let ids: HashSet<_> = out.results.iter().map(|r| &r.item_id).collect();
        prop_assert_eq!(ids.len(), out.results.len());
    }

    #[test]
    fn scores_never_exceed_rank_one_everywhere(
        results in arb_results(),
        weights in arb_weights(),
    ) {
        let out = WeightedRrfFuser::new(60).fuse(&results, &weights, 100);
        let ceiling = weights.sum() / 61.0 + 1e-12;
        for r in &out.results {
            prop_assert!(r.fused_score >= 0.0);
            prop_assert!(r.fused_score <= ceiling);
            prop_assert!(!r.contributing_channels.is_empty());
            prop_assert_eq!(r.contributing_channels.len(), r.per_channel_rank.len());
        }
    }

    #[test]
    fn input_order_does_not_matter(
        results in arb_results(),
        weights in arb_weights(),
    ) {
        let fuser = WeightedRrfFuser::default();
        let forward = fuser.fuse(&results, &weights, 50);
        let mut reversed = results.clone();
        reversed.reverse();
        let backward = fuser.fuse(&reversed, &weights, 50);
        prop_assert_eq!(forward.results, backward.results);
    }

    #[test]
    fn every_distinct_item_survives_with_large_top_k(results in arb_results()) {
        let weights = IntentWeights::new(0.25, 0.25, 0.25, 0.25).unwrap();
        let distinct: HashSet<String> = results
            .iter()
            .flat_map(|r| r.items.iter().map(|i| i.item_id.clone()))
            .collect();
        let out = WeightedRrfFuser::default().fuse(&results, &weights, 1_000);
        prop_assert_eq!(out.results.len(), distinct.len());
    }

    #[test]
    fn item_ranked_first_everywhere_wins(
        mut results in arb_results(),
        weights in (1u32..=100, 1u32..=100, 1u32..=100, 1u32..=100),
    ) {
        let (a, b, c, d) = weights;
        let total = f64::from(a + b + c + d);
        let weights = IntentWeights {
            vector: f64::from(a) / total,
            sparse: f64::from(b) / total,
            graph_local: f64::from(c) / total,
            graph_global: f64::from(d) / total,
        };
        for result in &mut results {
            result.items.insert(0, ScoredItem::new("shared", 1_000.0));
        }
        let out = WeightedRrfFuser::default().fuse(&results, &weights, 10);
        prop_assert_eq!(out.results[0].item_id.as_str(), "shared");
        prop_assert_eq!(out.results[0].contributing_channels.len(), 4);
        if let Some(runner_up) = out.results.get(1) {
            prop_assert!(out.results[0].fused_score > runner_up.fused_score);
        }
    }
}

//! Weighted Reciprocal Rank Fusion: score = Σ w_c / (k + rank_c)
//!
//! Rank-based, so raw channel scores on incompatible scales never need to be
//! normalized against each other. Ranks are 1-based. Items are deduplicated
//! by canonical id (the trimmed id); ties keep discovery order, i.e. channel
//! order first, then rank within the channel.

use std::collections::{BTreeMap, HashMap};

use tracing::error;

use fusion_core::constants::DEFAULT_RRF_K;
use fusion_core::errors::FusionInputError;
use fusion_core::models::{ChannelKind, ChannelResult, FusedResult};
use fusion_core::IntentWeights;

/// Contribution of one appearance at `rank` in a channel weighted `weight`.
pub fn rrf_contribution(weight: f64, k: u32, rank: usize) -> f64 {
    weight / (f64::from(k) + rank as f64)
}

/// Identity used for deduplication across channels.
pub fn canonical_id(item_id: &str) -> &str {
    item_id.trim()
}

/// Fused ranking plus any malformed input that was skipped.
#[derive(Debug, Clone, PartialEq)]
pub struct FusionOutcome {
    pub results: Vec<FusedResult>,
    pub input_errors: Vec<FusionInputError>,
}

/// Stateless weighted RRF fuser.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct WeightedRrfFuser {
    k: u32,
}

impl Default for WeightedRrfFuser {
    fn default() -> Self {
        Self::new(DEFAULT_RRF_K)
    }
}

impl WeightedRrfFuser {
    pub fn new(k: u32) -> Self {
        Self { k }
    }

    pub fn k(&self) -> u32 {
        self.k
    }

    /// Fuse channel results into at most `top_k` items, best first.
    ///
    /// Only successful results contribute. A channel appearing twice, an
    /// empty id, or a non-finite score is a caller bug: the offending entry is
    /// skipped and reported in [`FusionOutcome::input_errors`].
    pub fn fuse(
        &self,
        results: &[ChannelResult],
        weights: &IntentWeights,
        top_k: usize,
    ) -> FusionOutcome {
        let mut ordered: Vec<&ChannelResult> = results.iter().collect();
        ordered.sort_by_key(|r| r.channel);

        let mut input_errors = Vec::new();
        let mut seen_channels: Vec<ChannelKind> = Vec::with_capacity(ordered.len());
        let mut entries: Vec<FusedResult> = Vec::new();
        let mut index: HashMap<String, usize> = HashMap::new();

        for result in ordered {
            if seen_channels.contains(&result.channel) {
                input_errors.push(FusionInputError::DuplicateChannel {
                    channel: result.channel,
                });
                continue;
            }
            seen_channels.push(result.channel);
            if !result.is_success() {
                continue;
            }

            let weight = weights.get(result.channel);
            for (pos, item) in result.items.iter().enumerate() {
                let rank = pos + 1;
                let id = canonical_id(&item.item_id);
                if id.is_empty() {
                    input_errors.push(FusionInputError::EmptyItemId {
                        channel: result.channel,
                        rank,
                    });
                    continue;
                }
                if !item.raw_score.is_finite() {
                    input_errors.push(FusionInputError::NonFiniteScore {
                        channel: result.channel,
                        item_id: id.to_string(),
                    });
                    continue;
                }

                let slot = *index.entry(id.to_string()).or_insert_with(|| {
                    entries.push(FusedResult {
                        item_id: id.to_string(),
                        fused_score: 0.0,
                        contributing_channels: Vec::new(),
                        per_channel_rank: BTreeMap::new(),
                        content: None,
                        rerank_score: None,
                    });
                    entries.len() - 1
                });
                let fused = &mut entries[slot];

                // Repeats within one channel keep their best (first) rank.
                if fused.per_channel_rank.contains_key(&result.channel) {
                    continue;
                }
                fused.fused_score += rrf_contribution(weight, self.k, rank);
                fused.contributing_channels.push(result.channel);
                fused.per_channel_rank.insert(result.channel, rank);
                if fused.content.is_none() {
                    fused.content.clone_from(&item.content);
                }
            }
        }

        for e in &input_errors {
            error!(error = %e, "malformed channel result skipped during fusion");
        }

        let mut fused = entries;
        // Stable sort: equal scores keep discovery order.
        fused.sort_by(|a, b| b.fused_score.total_cmp(&a.fused_score));
        fused.truncate(top_k);

        FusionOutcome {
            results: fused,
            input_errors,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use fusion_core::errors::ChannelError;
    use fusion_core::intent::weights::default_profile;
    use fusion_core::models::ScoredItem;
    use fusion_core::Intent;

    fn channel(kind: ChannelKind, ids: &[&str]) -> ChannelResult {
        let items = ids
            .iter()
            .enumerate()
            .map(|(i, id)| ScoredItem::new(*id, 1.0 - i as f64 * 0.01))
            .collect();
        ChannelResult::success(kind, items, 5)
    }

    #[test]
    fn contribution_formula() {
        assert!((rrf_contribution(1.0, 60, 1) - 1.0 / 61.0).abs() < 1e-15);
        assert_eq!(rrf_contribution(0.0, 60, 1), 0.0);
    }

    #[test]
    fn dedup_on_trimmed_id() {
        let fuser = WeightedRrfFuser::default();
        let results = vec![
            channel(ChannelKind::Vector, &["doc-1"]),
            channel(ChannelKind::Sparse, &[" doc-1 "]),
        ];
        let out = fuser.fuse(&results, &default_profile(Intent::Factual), 10);
        assert_eq!(out.results.len(), 1);
        assert_eq!(out.results[0].item_id, "doc-1");
        assert_eq!(out.results[0].contributing_channels.len(), 2);
    }

    #[test]
    fn repeated_item_in_one_channel_counts_once() {
        let fuser = WeightedRrfFuser::default();
        let results = vec![channel(ChannelKind::Vector, &["a", "a", "b"])];
        let w = default_profile(Intent::Factual);
        let out = fuser.fuse(&results, &w, 10);
        assert_eq!(out.results[0].per_channel_rank[&ChannelKind::Vector], 1);
        assert!((out.results[0].fused_score - 0.3 / 61.0).abs() < 1e-12);
        assert_eq!(out.results[1].per_channel_rank[&ChannelKind::Vector], 3);
    }

    #[test]
    fn ties_keep_discovery_order() {
        let fuser = WeightedRrfFuser::default();
        let w = IntentWeights::new(0.5, 0.5, 0.0, 0.0).unwrap();
        // Input order deliberately reversed; channel order decides.
        let results = vec![
            channel(ChannelKind::Sparse, &["s1"]),
            channel(ChannelKind::Vector, &["v1"]),
        ];
        let out = fuser.fuse(&results, &w, 10);
        let ids: Vec<_> = out.results.iter().map(|r| r.item_id.as_str()).collect();
        assert_eq!(ids, vec!["v1", "s1"]);
    }

    #[test]
    fn failed_channels_contribute_nothing() {
        let fuser = WeightedRrfFuser::default();
        let failed = ChannelResult::failure(
            ChannelError::Cancelled {
                channel: ChannelKind::Sparse,
            },
            1,
        );
        let results = vec![channel(ChannelKind::Vector, &["a"]), failed];
        let out = fuser.fuse(&results, &default_profile(Intent::Factual), 10);
        assert_eq!(out.results.len(), 1);
        assert_eq!(out.results[0].contributing_channels, vec![ChannelKind::Vector]);
        assert!(out.input_errors.is_empty());
    }

    #[test]
    fn malformed_input_is_skipped_and_reported() {
        let fuser = WeightedRrfFuser::default();
        let mut bad = channel(ChannelKind::Sparse, &["  ", "ok"]);
        bad.items.push(ScoredItem::new("nan", f64::NAN));
        let results = vec![
            channel(ChannelKind::Vector, &["v"]),
            channel(ChannelKind::Vector, &["dup"]),
            bad,
        ];
        let out = fuser.fuse(&results, &default_profile(Intent::Keyword), 10);
        let ids: Vec<_> = out.results.iter().map(|r| r.item_id.as_str()).collect();
        assert_eq!(ids, vec!["ok", "v"]);
        assert_eq!(out.input_errors.len(), 3);
        assert!(out.input_errors.contains(&FusionInputError::DuplicateChannel {
            channel: ChannelKind::Vector
        }));
    }

    #[test]
    fn content_taken_from_first_channel_that_has_it() {
        let fuser = WeightedRrfFuser::default();
        let v = ChannelResult::success(ChannelKind::Vector, vec![ScoredItem::new("a", 0.9)], 1);
        let s = ChannelResult::success(
            ChannelKind::Sparse,
            vec![ScoredItem::new("a", 3.0).with_content("alpha")],
            1,
        );
        let out = fuser.fuse(&[v, s], &default_profile(Intent::Factual), 10);
        assert_eq!(out.results[0].content.as_deref(), Some("alpha"));
    }

    #[test]
    fn truncates_to_top_k() {
        let fuser = WeightedRrfFuser::default();
        let results = vec![channel(ChannelKind::Vector, &["a", "b", "c", "d"])];
        let out = fuser.fuse(&results, &default_profile(Intent::Factual), 2);
        assert_eq!(out.results.len(), 2);
        let zero = fuser.fuse(&results, &default_profile(Intent::Factual), 0);
        assert!(zero.results.is_empty());
    }
}

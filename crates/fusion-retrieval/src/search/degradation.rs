//! Effective weights under partial channel failure.
//!
//! By default failed channels simply contribute nothing and the surviving
//! channels keep their configured weights, so scores are not comparable
//! across queries with different failure sets. With renormalization enabled
//! the surviving weights are rescaled to sum to 1.

use fusion_core::models::{ChannelKind, ChannelResult};
use fusion_core::IntentWeights;

/// Channels that returned successfully, in channel order.
pub fn succeeded(results: &[ChannelResult]) -> Vec<ChannelKind> {
    results
        .iter()
        .filter(|r| r.is_success())
        .map(|r| r.channel)
        .collect()
}

/// Channels that were launched and did not succeed.
pub fn failed(results: &[ChannelResult]) -> Vec<ChannelKind> {
    results
        .iter()
        .filter(|r| !r.is_success())
        .map(|r| r.channel)
        .collect()
}

/// Weights to fuse with, given which channels succeeded.
pub fn effective_weights(
    weights: &IntentWeights,
    results: &[ChannelResult],
    renormalize: bool,
) -> IntentWeights {
    if !renormalize || failed(results).is_empty() {
        return *weights;
    }
    weights.renormalized(&succeeded(results))
}

#[cfg(test)]
mod tests {
    use super::*;
    use fusion_core::errors::ChannelError;
    use fusion_core::intent::weights::default_profile;
    use fusion_core::Intent;

    fn results() -> Vec<ChannelResult> {
        vec![
            ChannelResult::success(ChannelKind::Vector, vec![], 1),
            ChannelResult::failure(
                ChannelError::Timeout {
                    channel: ChannelKind::Sparse,
                    timeout_ms: 500,
                },
                500,
            ),
            ChannelResult::success(ChannelKind::GraphLocal, vec![], 1),
        ]
    }

    #[test]
    fn partitions_by_status() {
        let r = results();
        assert_eq!(succeeded(&r), vec![ChannelKind::Vector, ChannelKind::GraphLocal]);
        assert_eq!(failed(&r), vec![ChannelKind::Sparse]);
    }

    #[test]
    fn no_renormalization_keeps_configured_weights() {
        let w = default_profile(Intent::Factual);
        assert_eq!(effective_weights(&w, &results(), false), w);
    }

    #[test]
    fn renormalization_rescales_survivors() {
        let w = default_profile(Intent::Factual);
        let eff = effective_weights(&w, &results(), true);
        assert_eq!(eff.sparse, 0.0);
        assert!((eff.vector - 0.3 / 0.7).abs() < 1e-12);
        assert!((eff.graph_local - 0.4 / 0.7).abs() < 1e-12);
    }
}

//! Intent → channel weight profiles.
//!
//! Each intent maps to one fixed [`IntentWeights`] profile. Defaults are
//! hardcoded; a profile can be replaced via config overrides. Every profile is
//! validated when the table is built, never per query.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};

use super::Intent;
use crate::constants::WEIGHT_SUM_TOLERANCE;
use crate::errors::ConfigError;
use crate::models::ChannelKind;

/// Per-channel fusion weights for one intent.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct IntentWeights {
    pub vector: f64,
    pub sparse: f64,
    pub graph_local: f64,
    pub graph_global: f64,
}

impl IntentWeights {
    /// Build a validated profile. Each weight must be in `[0, 1]` and the sum
    /// must be `1.0 ± 0.01`.
    pub fn new(
        vector: f64,
        sparse: f64,
        graph_local: f64,
        graph_global: f64,
    ) -> Result<Self, ConfigError> {
        let weights = Self::from_parts_unchecked(vector, sparse, graph_local, graph_global);
        weights.validate()?;
        Ok(weights)
    }

    const fn from_parts_unchecked(
        vector: f64,
        sparse: f64,
        graph_local: f64,
        graph_global: f64,
    ) -> Self {
        Self {
            vector,
            sparse,
            graph_local,
            graph_global,
        }
    }

    /// Check the range and sum invariants.
    pub fn validate(&self) -> Result<(), ConfigError> {
        for kind in ChannelKind::ALL {
            let w = self.get(kind);
            if !w.is_finite() || !(0.0..=1.0).contains(&w) {
                return Err(ConfigError::InvalidWeights {
                    reason: format!("{kind} weight {w} outside [0, 1]"),
                });
            }
        }
        let sum = self.sum();
        if (sum - 1.0).abs() > WEIGHT_SUM_TOLERANCE {
            return Err(ConfigError::InvalidWeights {
                reason: format!("weights sum to {sum:.4}, expected 1.0 ± {WEIGHT_SUM_TOLERANCE}"),
            });
        }
        Ok(())
    }

    /// Weight for a single channel.
    pub fn get(&self, channel: ChannelKind) -> f64 {
        match channel {
            ChannelKind::Vector => self.vector,
            ChannelKind::Sparse => self.sparse,
            ChannelKind::GraphLocal => self.graph_local,
            ChannelKind::GraphGlobal => self.graph_global,
        }
    }

    pub fn sum(&self) -> f64 {
        self.vector + self.sparse + self.graph_local + self.graph_global
    }

    /// Rescale so that only `surviving` channels carry weight and they sum to 1.
    ///
    /// Returns `self` unchanged if the surviving channels carry no weight.
    pub fn renormalized(&self, surviving: &[ChannelKind]) -> Self {
        let kept = |kind: ChannelKind| {
            if surviving.contains(&kind) {
                self.get(kind)
            } else {
                0.0
            }
        };
        let total: f64 = ChannelKind::ALL.into_iter().map(kept).sum();
        if total <= f64::EPSILON {
            return *self;
        }
        Self::from_parts_unchecked(
            kept(ChannelKind::Vector) / total,
            kept(ChannelKind::Sparse) / total,
            kept(ChannelKind::GraphLocal) / total,
            kept(ChannelKind::GraphGlobal) / total,
        )
    }
}

/// Hardcoded default profile for an intent.
pub const fn default_profile(intent: Intent) -> IntentWeights {
    match intent {
        Intent::Factual => IntentWeights::from_parts_unchecked(0.3, 0.3, 0.4, 0.0),
        Intent::Keyword => IntentWeights::from_parts_unchecked(0.1, 0.6, 0.3, 0.0),
        Intent::Exploratory => IntentWeights::from_parts_unchecked(0.2, 0.1, 0.2, 0.5),
        Intent::Summary => IntentWeights::from_parts_unchecked(0.1, 0.0, 0.1, 0.8),
    }
}

/// The fixed intent → weights table used for every query.
#[derive(Debug, Clone, PartialEq)]
pub struct WeightProfiles {
    profiles: [IntentWeights; Intent::COUNT],
}

impl WeightProfiles {
    /// Build the table from defaults plus overrides keyed by intent name.
    ///
    /// Unknown intent names and invalid profiles are errors: this runs once
    /// at startup and a bad table must stop the process.
    pub fn new(overrides: &HashMap<String, IntentWeights>) -> Result<Self, ConfigError> {
        let mut profiles = Intent::ALL.map(default_profile);

        for (name, weights) in overrides {
            let intent: Intent = name.parse().map_err(|reason| ConfigError::Invalid {
                field: "weight_profile_overrides".to_string(),
                reason,
            })?;
            weights.validate().map_err(|e| ConfigError::InvalidWeights {
                reason: format!("{intent}: {e}"),
            })?;
            profiles[Self::slot(intent)] = *weights;
        }

        Ok(Self { profiles })
    }

    /// Profile for a resolved intent.
    pub fn get(&self, intent: Intent) -> IntentWeights {
        self.profiles[Self::slot(intent)]
    }

    fn slot(intent: Intent) -> usize {
        match intent {
            Intent::Factual => 0,
            Intent::Keyword => 1,
            Intent::Exploratory => 2,
            Intent::Summary => 3,
        }
    }
}

impl Default for WeightProfiles {
    fn default() -> Self {
        Self {
            profiles: Intent::ALL.map(default_profile),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn renormalize_drops_failed_channels() {
        let w = default_profile(Intent::Factual);
        let r = w.renormalized(&[ChannelKind::Vector, ChannelKind::Sparse]);
        assert!((r.vector - 0.5).abs() < 1e-12);
        assert!((r.sparse - 0.5).abs() < 1e-12);
        assert_eq!(r.graph_local, 0.0);
        assert!((r.sum() - 1.0).abs() < 1e-12);
    }

    #[test]
    fn renormalize_with_zero_weight_survivors_is_identity() {
        let w = default_profile(Intent::Summary);
        assert_eq!(w.renormalized(&[ChannelKind::Sparse]), w);
    }

    #[test]
    fn negative_weight_rejected() {
        assert!(IntentWeights::new(-0.1, 0.6, 0.5, 0.0).is_err());
    }
}

//! Configuration for the fusion core.
//!
//! Every section is `#[serde(default)]`, so an empty TOML document yields a
//! fully-populated config.

mod channel_config;
mod classifier_config;
pub mod defaults;
mod observability_config;
mod provider;
mod rerank_config;

use std::collections::HashMap;

use serde::{Deserialize, Serialize};

pub use channel_config::{ChannelConfig, ChannelTimeouts, ChannelToggles};
pub use classifier_config::ClassifierConfig;
pub use observability_config::ObservabilityConfig;
pub use provider::{StaticConfigProvider, TomlFileConfigProvider};
pub use rerank_config::RerankConfig;

use crate::constants::{MAX_GRAPH_HOPS, MAX_TOP_K};
use crate::errors::ConfigError;
use crate::intent::{IntentWeights, WeightProfiles};

/// Fusion stage settings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FusionSection {
    /// RRF smoothing constant `k`.
    pub rrf_k: u32,
    /// Rescale surviving channel weights to sum to 1 when channels fail.
    pub renormalize_on_degradation: bool,
}

impl Default for FusionSection {
    fn default() -> Self {
        Self {
            rrf_k: defaults::DEFAULT_RRF_K,
            renormalize_on_degradation: defaults::DEFAULT_RENORMALIZE_ON_DEGRADATION,
        }
    }
}

/// Top-level config.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FusionConfig {
    pub fusion: FusionSection,
    pub channels: ChannelConfig,
    pub classifier: ClassifierConfig,
    pub rerank: RerankConfig,
    pub observability: ObservabilityConfig,
    /// Intent name → replacement weight profile.
    pub weight_profile_overrides: HashMap<String, IntentWeights>,
}

impl FusionConfig {
    /// Parse and validate a TOML document.
    pub fn from_toml(toml_str: &str) -> Result<Self, ConfigError> {
        let config: Self = toml::from_str(toml_str)?;
        config.validate()?;
        Ok(config)
    }

    /// Read, parse, and validate a TOML file.
    pub fn from_file(path: impl AsRef<std::path::Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let contents = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.display().to_string(),
            source,
        })?;
        Self::from_toml(&contents)
    }

    /// Build the intent weight table from defaults plus overrides.
    pub fn weight_profiles(&self) -> Result<WeightProfiles, ConfigError> {
        WeightProfiles::new(&self.weight_profile_overrides)
    }

    /// Check every field that has a valid range.
    pub fn validate(&self) -> Result<(), ConfigError> {
        let channels = &self.channels;
        for (field, value) in [
            ("channels.per_channel_timeout_ms.vector", channels.per_channel_timeout_ms.vector),
            ("channels.per_channel_timeout_ms.sparse", channels.per_channel_timeout_ms.sparse),
            (
                "channels.per_channel_timeout_ms.graph_local",
                channels.per_channel_timeout_ms.graph_local,
            ),
            (
                "channels.per_channel_timeout_ms.graph_global",
                channels.per_channel_timeout_ms.graph_global,
            ),
            ("channels.overall_timeout_ms", channels.overall_timeout_ms),
            ("classifier.llm_timeout_ms", self.classifier.llm_timeout_ms),
            ("rerank.timeout_ms", self.rerank.timeout_ms),
        ] {
            if value == 0 {
                return Err(invalid(field, "must be greater than 0"));
            }
        }
        if channels.fetch_multiplier == 0 || channels.fetch_multiplier > MAX_TOP_K {
            return Err(invalid(
                "channels.fetch_multiplier",
                format!("must be in 1..={MAX_TOP_K}"),
            ));
        }
        if channels.graph_hops == 0 || channels.graph_hops > MAX_GRAPH_HOPS {
            return Err(invalid(
                "channels.graph_hops",
                format!("must be in 1..={MAX_GRAPH_HOPS}"),
            ));
        }
        if self.classifier.cache_max_size == 0 {
            return Err(invalid("classifier.cache_max_size", "must be greater than 0"));
        }
        if self.rerank.top_n == 0 {
            return Err(invalid("rerank.top_n", "must be greater than 0"));
        }
        self.weight_profiles()?;
        Ok(())
    }
}

fn invalid(field: &str, reason: impl Into<String>) -> ConfigError {
    ConfigError::Invalid {
        field: field.to_string(),
        reason: reason.into(),
    }
}

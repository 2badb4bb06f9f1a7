use std::time::Duration;

use serde::{Deserialize, Serialize};

use super::defaults;

/// Intent classifier configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ClassifierConfig {
    /// Try the LLM before the rule-based engine (requires an LLM client).
    pub llm_enabled: bool,
    pub llm_timeout_ms: u64,
    /// Maximum entries in the normalized-query classification cache.
    pub cache_max_size: u64,
}

impl Default for ClassifierConfig {
    fn default() -> Self {
        Self {
            llm_enabled: defaults::DEFAULT_LLM_CLASSIFICATION,
            llm_timeout_ms: defaults::DEFAULT_LLM_TIMEOUT_MS,
            cache_max_size: defaults::DEFAULT_CACHE_MAX_SIZE,
        }
    }
}

impl ClassifierConfig {
    pub fn llm_timeout(&self) -> Duration {
        Duration::from_millis(self.llm_timeout_ms)
    }
}

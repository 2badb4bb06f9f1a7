use serde::{Deserialize, Serialize};

use crate::intent::{Intent, IntentWeights};

/// Which path produced a classification.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ClassificationSource {
    Rule,
    Llm,
    /// The caller passed an explicit intent; the classifier was not consulted.
    Override,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct IntentClassificationResult {
    pub intent: Intent,
    /// Always the fixed profile for `intent`.
    pub weights: IntentWeights,
    /// [0.0, 1.0].
    pub confidence: f64,
    pub source: ClassificationSource,
    pub latency_ms: u64,
}

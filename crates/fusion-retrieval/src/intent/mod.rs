//! Intent classification.
//!
//! Order of resolution for a query:
//! 1. empty query → EXPLORATORY at minimal confidence, never cached
//! 2. cache hit on the normalized query
//! 3. LLM (when enabled and configured), bounded by its own timeout
//! 4. rule engine
//!
//! Classification never fails. LLM errors and unparseable responses degrade
//! to the rule engine with a warning.

pub mod cache;
pub mod llm;
pub mod parser;
pub mod rules;

use std::sync::Arc;
use std::time::Instant;

use tracing::{debug, warn};

use fusion_core::config::ClassifierConfig;
use fusion_core::constants::EMPTY_QUERY_CONFIDENCE;
use fusion_core::models::{ClassificationSource, IntentClassificationResult};
use fusion_core::traits::LlmClient;
use fusion_core::{Intent, WeightProfiles};

use crate::elapsed_ms;
use cache::{normalize_query, ClassificationCache};

/// A classification plus whether it was served from cache.
#[derive(Debug, Clone, PartialEq)]
pub struct Classification {
    pub result: IntentClassificationResult,
    pub cache_hit: bool,
}

/// Maps a query to an intent and its weight profile.
pub struct IntentClassifier {
    profiles: WeightProfiles,
    llm: Option<Arc<dyn LlmClient>>,
    cache: ClassificationCache,
    settings: ClassifierConfig,
}

impl IntentClassifier {
    pub fn new(
        profiles: WeightProfiles,
        llm: Option<Arc<dyn LlmClient>>,
        settings: ClassifierConfig,
    ) -> Self {
        Self {
            cache: ClassificationCache::new(settings.cache_max_size),
            profiles,
            llm,
            settings,
        }
    }

    /// Classify with the settings given at construction.
    pub async fn classify(&self, query: &str) -> IntentClassificationResult {
        self.classify_with(query, &self.settings).await.result
    }

    /// Classify with per-call settings (LLM toggle and timeout).
    ///
    /// Cache capacity is fixed at construction; `settings.cache_max_size` is
    /// ignored here.
    pub async fn classify_with(&self, query: &str, settings: &ClassifierConfig) -> Classification {
        let start = Instant::now();
        let key = normalize_query(query);

        if key.is_empty() {
            return Classification {
                result: self.build(
                    Intent::default(),
                    EMPTY_QUERY_CONFIDENCE,
                    ClassificationSource::Rule,
                    start,
                ),
                cache_hit: false,
            };
        }

        if let Some(result) = self.cache.get(&key) {
            debug!(intent = %result.intent, "classification cache hit");
            return Classification {
                result,
                cache_hit: true,
            };
        }

        let result = match self.classify_llm(query, settings, start).await {
            Some(result) => result,
            None => self.classify_rules_from(query, start),
        };

        self.cache.insert(key, result.clone());
        Classification {
            result,
            cache_hit: false,
        }
    }

    /// Rule-engine classification only. Deterministic, no cache.
    pub fn classify_rules(&self, query: &str) -> IntentClassificationResult {
        let start = Instant::now();
        if query.trim().is_empty() {
            return self.build(
                Intent::default(),
                EMPTY_QUERY_CONFIDENCE,
                ClassificationSource::Rule,
                start,
            );
        }
        self.classify_rules_from(query, start)
    }

    /// Result for a caller-supplied intent. Bypasses cache and classifiers.
    pub fn resolve_override(&self, intent: Intent) -> IntentClassificationResult {
        IntentClassificationResult {
            intent,
            weights: self.profiles.get(intent),
            confidence: 1.0,
            source: ClassificationSource::Override,
            latency_ms: 0,
        }
    }

    pub fn profiles(&self) -> &WeightProfiles {
        &self.profiles
    }

    pub fn cache(&self) -> &ClassificationCache {
        &self.cache
    }

    pub fn clear_cache(&self) {
        self.cache.clear();
    }

    async fn classify_llm(
        &self,
        query: &str,
        settings: &ClassifierConfig,
        start: Instant,
    ) -> Option<IntentClassificationResult> {
        if !settings.llm_enabled {
            return None;
        }
        let llm = self.llm.as_deref()?;

        match llm::classify(llm, query.trim(), settings.llm_timeout()).await {
            Ok(parsed) => Some(self.build(
                parsed.intent(),
                parsed.confidence(),
                ClassificationSource::Llm,
                start,
            )),
            Err(e) => {
                warn!(error = %e, "LLM classification failed, using rules");
                None
            }
        }
    }

    fn classify_rules_from(&self, query: &str, start: Instant) -> IntentClassificationResult {
        let collapsed = query.split_whitespace().collect::<Vec<_>>().join(" ");
        let matched = rules::classify(&collapsed);
        debug!(intent = %matched.intent, rule = ?matched.rule, "rule classification");
        self.build(
            matched.intent,
            matched.confidence,
            ClassificationSource::Rule,
            start,
        )
    }

    fn build(
        &self,
        intent: Intent,
        confidence: f64,
        source: ClassificationSource,
        start: Instant,
    ) -> IntentClassificationResult {
        IntentClassificationResult {
            intent,
            weights: self.profiles.get(intent),
            confidence,
            source,
            latency_ms: elapsed_ms(start),
        }
    }
}

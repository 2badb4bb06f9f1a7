//! Classification cache keyed by normalized query text.
//!
//! In-process, bounded, thread-safe LRU. Entries never go stale within a
//! process lifetime because the weight table is frozen at startup.

use moka::policy::EvictionPolicy;
use moka::sync::Cache;

use fusion_core::models::IntentClassificationResult;

pub use fusion_core::models::normalize_query;

/// Bounded normalized-query → classification cache.
pub struct ClassificationCache {
    cache: Cache<String, IntentClassificationResult>,
    max_size: u64,
}

impl ClassificationCache {
    pub fn new(max_size: u64) -> Self {
        Self {
            cache: Cache::builder()
                .max_capacity(max_size)
                .eviction_policy(EvictionPolicy::lru())
                .build(),
            max_size,
        }
    }

    /// Look up an already-normalized key.
    pub fn get(&self, key: &str) -> Option<IntentClassificationResult> {
        self.cache.get(key)
    }

    pub fn insert(&self, key: String, result: IntentClassificationResult) {
        self.cache.insert(key, result);
    }

    pub fn contains(&self, key: &str) -> bool {
        self.cache.contains_key(key)
    }

    pub fn clear(&self) {
        self.cache.invalidate_all();
    }

    /// Approximate entry count. Pending maintenance is flushed first.
    pub fn len(&self) -> u64 {
        self.cache.run_pending_tasks();
        self.cache.entry_count()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn max_size(&self) -> u64 {
        self.max_size
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use fusion_core::intent::weights::default_profile;
    use fusion_core::models::ClassificationSource;
    use fusion_core::Intent;

    fn result(intent: Intent) -> IntentClassificationResult {
        IntentClassificationResult {
            intent,
            weights: default_profile(intent),
            confidence: 0.8,
            source: ClassificationSource::Rule,
            latency_ms: 0,
        }
    }

    #[test]
    fn insert_get_clear() {
        let cache = ClassificationCache::new(16);
        cache.insert("what is rrf?".into(), result(Intent::Factual));
        assert_eq!(cache.get("what is rrf?").unwrap().intent, Intent::Factual);
        assert_eq!(cache.len(), 1);
        cache.clear();
        assert!(cache.get("what is rrf?").is_none());
        assert!(cache.is_empty());
    }

    #[test]
    fn full_cache_evicts_least_recently_used() {
        let cache = ClassificationCache::new(2);
        cache.insert("alpha".into(), result(Intent::Factual));
        cache.len();
        cache.insert("beta".into(), result(Intent::Keyword));
        cache.len();
        assert!(cache.get("alpha").is_some());
        cache.len();

        cache.insert("gamma".into(), result(Intent::Summary));
        assert_eq!(cache.len(), 2);
        assert!(cache.contains("gamma"));
        assert!(cache.contains("alpha"));
        assert!(!cache.contains("beta"));
    }

    #[test]
    fn new_key_admitted_over_frequently_read_keys() {
        let cache = ClassificationCache::new(2);
        for key in ["alpha", "beta"] {
            cache.insert(key.into(), result(Intent::Factual));
            for _ in 0..5 {
                cache.get(key);
            }
        }
        cache.len();

        cache.insert("gamma".into(), result(Intent::Exploratory));
        assert_eq!(cache.len(), 2);
        assert_eq!(cache.get("gamma").unwrap().intent, Intent::Exploratory);
    }
}

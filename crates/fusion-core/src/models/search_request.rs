use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::intent::Intent;

/// Metadata filters forwarded to the vector store.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Filters(pub BTreeMap<String, serde_json::Value>);

impl Filters {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with(mut self, key: impl Into<String>, value: impl Into<serde_json::Value>) -> Self {
        self.0.insert(key.into(), value.into());
        self
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

/// Arguments to the single `search()` entry point.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SearchRequest {
    pub query: String,
    pub top_k: usize,
    #[serde(default)]
    pub filters: Option<Filters>,
    /// Bypass the classifier and use this intent's fixed profile.
    #[serde(default)]
    pub intent_override: Option<Intent>,
    /// Per-call rerank toggle. `None` defers to config.
    #[serde(default)]
    pub rerank: Option<bool>,
}

impl SearchRequest {
    pub fn new(query: impl Into<String>, top_k: usize) -> Self {
        Self {
            query: query.into(),
            top_k,
            filters: None,
            intent_override: None,
            rerank: None,
        }
    }

    pub fn with_filters(mut self, filters: Filters) -> Self {
        self.filters = Some(filters);
        self
    }

    pub fn with_intent(mut self, intent: Intent) -> Self {
        self.intent_override = Some(intent);
        self
    }

    pub fn with_rerank(mut self, rerank: bool) -> Self {
        self.rerank = Some(rerank);
        self
    }

    /// See [`query_fingerprint`].
    pub fn fingerprint(&self) -> String {
        query_fingerprint(&self.query)
    }
}

/// Collapse runs of whitespace and lowercase. Queries that differ only in
/// case or spacing normalize to the same string.
pub fn normalize_query(query: &str) -> String {
    query
        .split_whitespace()
        .collect::<Vec<_>>()
        .join(" ")
        .to_lowercase()
}

/// Short blake3 hash of the normalized query. Logged instead of query text.
pub fn query_fingerprint(query: &str) -> String {
    let hash = blake3::hash(normalize_query(query).as_bytes());
    hash.to_hex()[..16].to_string()
}

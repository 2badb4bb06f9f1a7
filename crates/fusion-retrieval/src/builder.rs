//! SearchEngineBuilder: composition root for the search pipeline.
//!
//! Clients, config provider, reranker, and observer are injected here and
//! nowhere else. `build()` is the only place a weight-table or config error
//! can surface; once built, the engine never fails a search.

use std::sync::Arc;

use tracing::info;

use fusion_core::config::StaticConfigProvider;
use fusion_core::errors::ConfigError;
use fusion_core::traits::{
    ConfigProvider, GraphStoreClient, LlmClient, QueryEmbedder, Reranker, SearchObserver,
    SparseIndexClient, VectorStoreClient,
};
use fusion_core::{FusionConfig, FusionResult};

use crate::channels::{
    Channel, GraphGlobalChannel, GraphLocalChannel, SparseChannel, VectorChannel,
};
use crate::engine::SearchEngine;
use crate::intent::IntentClassifier;
use crate::ranking::LlmReranker;

#[derive(Default)]
pub struct SearchEngineBuilder {
    channels: Vec<Arc<dyn Channel>>,
    llm: Option<Arc<dyn LlmClient>>,
    reranker: Option<Arc<dyn Reranker>>,
    use_llm_reranker: bool,
    config_provider: Option<Arc<dyn ConfigProvider>>,
    config: Option<FusionConfig>,
    observer: Option<Arc<dyn SearchObserver>>,
}

impl SearchEngineBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Dense channel: the embedder turns the query into a vector for the store.
    pub fn vector_store(
        self,
        store: Arc<dyn VectorStoreClient>,
        embedder: Arc<dyn QueryEmbedder>,
    ) -> Self {
        self.channel(Arc::new(VectorChannel::new(store, embedder)))
    }

    pub fn sparse_index(self, index: Arc<dyn SparseIndexClient>) -> Self {
        self.channel(Arc::new(SparseChannel::new(index)))
    }

    /// Registers both graph channels (local traversal and global communities).
    pub fn graph_store(self, graph: Arc<dyn GraphStoreClient>) -> Self {
        self.channel(Arc::new(GraphLocalChannel::new(Arc::clone(&graph))))
            .channel(Arc::new(GraphGlobalChannel::new(graph)))
    }

    /// Register a custom channel implementation.
    pub fn channel(mut self, channel: Arc<dyn Channel>) -> Self {
        self.channels.push(channel);
        self
    }

    /// LLM used for intent classification.
    pub fn llm(mut self, llm: Arc<dyn LlmClient>) -> Self {
        self.llm = Some(llm);
        self
    }

    pub fn reranker(mut self, reranker: Arc<dyn Reranker>) -> Self {
        self.reranker = Some(reranker);
        self
    }

    /// Rerank with the classification LLM. Ignored if no LLM is set.
    pub fn llm_reranker(mut self) -> Self {
        self.use_llm_reranker = true;
        self
    }

    pub fn config(mut self, config: FusionConfig) -> Self {
        self.config = Some(config);
        self
    }

    /// Takes precedence over [`SearchEngineBuilder::config`].
    pub fn config_provider(mut self, provider: Arc<dyn ConfigProvider>) -> Self {
        self.config_provider = Some(provider);
        self
    }

    pub fn observer(mut self, observer: Arc<dyn SearchObserver>) -> Self {
        self.observer = Some(observer);
        self
    }

    /// Validate config and weight profiles and wire the engine.
    ///
    /// The weight table is frozen here; later config reloads change
    /// timeouts and toggles but not the profiles.
    pub fn build(self) -> FusionResult<SearchEngine> {
        let provider: Arc<dyn ConfigProvider> = match self.config_provider {
            Some(provider) => provider,
            None => Arc::new(StaticConfigProvider::new(self.config.unwrap_or_default())?),
        };
        let config = provider.get();
        config.validate()?;
        let profiles = config.weight_profiles()?;

        let mut channels = self.channels;
        channels.sort_by_key(|c| c.kind());
        if let Some(pair) = channels.windows(2).find(|w| w[0].kind() == w[1].kind()) {
            return Err(ConfigError::Invalid {
                field: "channels".to_string(),
                reason: format!("{} channel registered twice", pair[0].kind()),
            }
            .into());
        }

        let reranker = match (self.reranker, self.use_llm_reranker, &self.llm) {
            (Some(reranker), _, _) => Some(reranker),
            (None, true, Some(llm)) => {
                Some(Arc::new(LlmReranker::new(Arc::clone(llm))) as Arc<dyn Reranker>)
            }
            _ => None,
        };

        info!(
            channels = channels.len(),
            llm_classification = self.llm.is_some() && config.classifier.llm_enabled,
            reranker = reranker.as_ref().map(|r| r.name()).unwrap_or("none"),
            rrf_k = config.fusion.rrf_k,
            "search engine built"
        );

        Ok(SearchEngine {
            classifier: IntentClassifier::new(profiles, self.llm, config.classifier.clone()),
            channels,
            reranker,
            config: provider,
            observer: self.observer,
        })
    }
}

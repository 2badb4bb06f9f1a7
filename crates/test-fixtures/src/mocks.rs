//! Mock implementations of the external client traits.

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Mutex;
use std::time::Duration;

use async_trait::async_trait;

use fusion_core::errors::BackendError;
use fusion_core::models::{Filters, ScoredItem};
use fusion_core::traits::{
    CommunityQuery, GraphStoreClient, LlmClient, QueryEmbedder, SparseIndexClient,
    VectorStoreClient,
};

/// Scored items in the given order with strictly decreasing raw scores.
pub fn items_from_ids<S: AsRef<str>>(ids: &[S]) -> Vec<ScoredItem> {
    ids.iter()
        .enumerate()
        .map(|(i, id)| ScoredItem::new(id.as_ref(), 1.0 / (1.0 + i as f64)))
        .collect()
}

/// What a mock does when called.
#[derive(Debug, Clone, Default)]
pub enum Behavior {
    #[default]
    Empty,
    Items(Vec<ScoredItem>),
    Fail(BackendError),
    Panic,
}

/// Canned response with optional delay and a call counter.
#[derive(Debug, Default)]
pub struct Responder {
    behavior: Mutex<Behavior>,
    delay: Mutex<Option<Duration>>,
    calls: AtomicUsize,
}

impl Responder {
    pub fn new(behavior: Behavior) -> Self {
        Self {
            behavior: Mutex::new(behavior),
            ..Self::default()
        }
    }

    pub fn set(&self, behavior: Behavior) {
        *self.behavior.lock().unwrap() = behavior;
    }

    pub fn set_delay(&self, delay: Duration) {
        *self.delay.lock().unwrap() = Some(delay);
    }

    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }

    async fn respond(&self, limit: usize) -> Result<Vec<ScoredItem>, BackendError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        let delay = *self.delay.lock().unwrap();
        if let Some(delay) = delay {
            tokio::time::sleep(delay).await;
        }
        let behavior = self.behavior.lock().unwrap().clone();
        match behavior {
            Behavior::Empty => Ok(Vec::new()),
            Behavior::Items(mut items) => {
                items.truncate(limit);
                Ok(items)
            }
            Behavior::Fail(e) => Err(e),
            Behavior::Panic => panic!("mock backend panicked"),
        }
    }
}

pub fn unreachable(reason: &str) -> BackendError {
    BackendError::Unreachable {
        reason: reason.to_string(),
    }
}

#[derive(Debug, Default)]
pub struct MockVectorStore {
    pub responder: Responder,
    pub last_filters: Mutex<Option<Filters>>,
    pub last_top_k: AtomicUsize,
}

impl MockVectorStore {
    pub fn with_ids<S: AsRef<str>>(ids: &[S]) -> Self {
        Self::with(Behavior::Items(items_from_ids(ids)))
    }

    pub fn with(behavior: Behavior) -> Self {
        Self {
            responder: Responder::new(behavior),
            ..Self::default()
        }
    }
}

#[async_trait]
impl VectorStoreClient for MockVectorStore {
    async fn search(
        &self,
        _embedding: &[f32],
        top_k: usize,
        filters: Option<&Filters>,
    ) -> Result<Vec<ScoredItem>, BackendError> {
        *self.last_filters.lock().unwrap() = filters.cloned();
        self.last_top_k.store(top_k, Ordering::SeqCst);
        self.responder.respond(top_k).await
    }
}

#[derive(Debug, Default)]
pub struct MockSparseIndex {
    pub responder: Responder,
    pub last_terms: Mutex<Vec<String>>,
}

impl MockSparseIndex {
    pub fn with_ids<S: AsRef<str>>(ids: &[S]) -> Self {
        Self::with(Behavior::Items(items_from_ids(ids)))
    }

    pub fn with(behavior: Behavior) -> Self {
        Self {
            responder: Responder::new(behavior),
            ..Self::default()
        }
    }
}

#[async_trait]
impl SparseIndexClient for MockSparseIndex {
    async fn search(
        &self,
        terms: &[String],
        top_k: usize,
    ) -> Result<Vec<ScoredItem>, BackendError> {
        *self.last_terms.lock().unwrap() = terms.to_vec();
        self.responder.respond(top_k).await
    }
}

/// Graph store with independent local and global behavior.
#[derive(Debug, Default)]
pub struct MockGraphStore {
    pub local: Responder,
    pub global: Responder,
    pub last_entities: Mutex<Vec<String>>,
    pub last_hops: Mutex<Option<u8>>,
}

impl MockGraphStore {
    pub fn with_ids<L: AsRef<str>, G: AsRef<str>>(local: &[L], global: &[G]) -> Self {
        Self::with(
            Behavior::Items(items_from_ids(local)),
            Behavior::Items(items_from_ids(global)),
        )
    }

    pub fn with(local: Behavior, global: Behavior) -> Self {
        Self {
            local: Responder::new(local),
            global: Responder::new(global),
            ..Self::default()
        }
    }
}

#[async_trait]
impl GraphStoreClient for MockGraphStore {
    async fn local_search(
        &self,
        entities: &[String],
        hops: u8,
    ) -> Result<Vec<ScoredItem>, BackendError> {
        *self.last_entities.lock().unwrap() = entities.to_vec();
        *self.last_hops.lock().unwrap() = Some(hops);
        self.local.respond(usize::MAX).await
    }

    async fn global_search(
        &self,
        query: &CommunityQuery,
    ) -> Result<Vec<ScoredItem>, BackendError> {
        self.global.respond(query.top_k).await
    }
}

/// Deterministic embedder: a fixed-size vector derived from the text bytes.
#[derive(Debug)]
pub struct MockEmbedder {
    dims: usize,
    fail: Option<BackendError>,
    calls: AtomicUsize,
}

impl MockEmbedder {
    pub fn new(dims: usize) -> Self {
        Self {
            dims,
            fail: None,
            calls: AtomicUsize::new(0),
        }
    }

    pub fn failing(error: BackendError) -> Self {
        Self {
            fail: Some(error),
            ..Self::new(8)
        }
    }

    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

impl Default for MockEmbedder {
    fn default() -> Self {
        Self::new(8)
    }
}

#[async_trait]
impl QueryEmbedder for MockEmbedder {
    async fn embed(&self, text: &str) -> Result<Vec<f32>, BackendError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        if let Some(e) = &self.fail {
            return Err(e.clone());
        }
        let mut v = vec![0.0f32; self.dims];
        for (i, b) in text.bytes().enumerate() {
            v[i % self.dims] += f32::from(b) / 255.0;
        }
        Ok(v)
    }
}

/// LLM returning a fixed reply, with optional delay and failure.
#[derive(Debug)]
pub struct MockLlm {
    reply: Mutex<Result<String, BackendError>>,
    delay: Option<Duration>,
    calls: AtomicUsize,
    prompts: Mutex<Vec<String>>,
}

impl MockLlm {
    pub fn replying(reply: impl Into<String>) -> Self {
        Self {
            reply: Mutex::new(Ok(reply.into())),
            delay: None,
            calls: AtomicUsize::new(0),
            prompts: Mutex::new(Vec::new()),
        }
    }

    pub fn failing(error: BackendError) -> Self {
        let llm = Self::replying("");
        *llm.reply.lock().unwrap() = Err(error);
        llm
    }

    pub fn with_delay(mut self, delay: Duration) -> Self {
        self.delay = Some(delay);
        self
    }

    pub fn set_reply(&self, reply: impl Into<String>) {
        *self.reply.lock().unwrap() = Ok(reply.into());
    }

    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }

    pub fn prompts(&self) -> Vec<String> {
        self.prompts.lock().unwrap().clone()
    }
}

#[async_trait]
impl LlmClient for MockLlm {
    async fn complete(&self, prompt: &str) -> Result<String, BackendError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        self.prompts.lock().unwrap().push(prompt.to_string());
        if let Some(delay) = self.delay {
            tokio::time::sleep(delay).await;
        }
        self.reply.lock().unwrap().clone()
    }
}

//! # fusion-retrieval
//!
//! The retrieval-fusion pipeline:
//! classify → fan out to four channels concurrently → join → weighted RRF
//! → optional rerank → assemble a [`SearchResponse`](fusion_core::SearchResponse).
//!
//! [`SearchEngineBuilder`] is the composition root: it takes the external
//! clients, a config provider, and an optional observer, validates the
//! weight table, and produces a [`SearchEngine`].

pub mod adapters;
pub mod assembler;
pub mod builder;
pub mod channels;
pub mod engine;
pub mod intent;
pub mod ranking;
pub mod search;

pub use builder::SearchEngineBuilder;
pub use engine::SearchEngine;
pub use intent::IntentClassifier;
pub use search::rrf_fusion::WeightedRrfFuser;

/// Milliseconds elapsed since `start`, saturating.
pub(crate) fn elapsed_ms(start: std::time::Instant) -> u64 {
    u64::try_from(start.elapsed().as_millis()).unwrap_or(u64::MAX)
}

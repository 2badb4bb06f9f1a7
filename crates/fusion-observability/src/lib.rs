//! # fusion-observability
//!
//! Structured tracing setup, a bounded query log, and per-channel
//! degradation tracking. [`ObservabilityEngine`] implements
//! [`SearchObserver`](fusion_core::traits::SearchObserver) and can be handed
//! straight to the search engine builder.

pub mod degradation;
pub mod engine;
pub mod query_log;
pub mod tracing_setup;

pub use engine::ObservabilityEngine;
pub use query_log::{QueryLog, QueryLogEntry};
pub use tracing_setup::init_tracing;

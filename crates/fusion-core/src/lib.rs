//! # fusion-core
//!
//! Foundation crate for the fusion retrieval core.
//! Defines intents and weight profiles, channel/result models, the external
//! client traits, errors, config, and constants.
//! Every other crate in the workspace depends on this.

pub mod config;
pub mod constants;
pub mod errors;
pub mod intent;
pub mod models;
pub mod traits;

// Re-export the most commonly used types at the crate root.
pub use config::FusionConfig;
pub use errors::{FusionError, FusionResult};
pub use intent::{Intent, IntentWeights, WeightProfiles};
pub use models::{
    ChannelKind, ChannelResult, ChannelStatus, FusedResult, ScoredItem, SearchRequest,
    SearchResponse,
};

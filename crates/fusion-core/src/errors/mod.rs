mod backend_error;
mod channel_error;
mod classification_error;
mod config_error;
mod fusion_input_error;
mod rerank_error;

pub use backend_error::BackendError;
pub use channel_error::ChannelError;
pub use classification_error::ClassificationError;
pub use config_error::ConfigError;
pub use fusion_input_error::FusionInputError;
pub use rerank_error::RerankError;

/// Top-level error for the fusion core.
///
/// The search path never surfaces this: channel, classification, and rerank
/// failures are folded into response metadata. It is returned from
/// construction (builder, config loading) and from the individual stages
/// that the engine then absorbs.
#[derive(Debug, thiserror::Error)]
pub enum FusionError {
    #[error("configuration error: {0}")]
    Config(#[from] ConfigError),

    #[error("channel error: {0}")]
    Channel(#[from] ChannelError),

    #[error("classification error: {0}")]
    Classification(#[from] ClassificationError),

    #[error("fusion input error: {0}")]
    FusionInput(#[from] FusionInputError),

    #[error("rerank error: {0}")]
    Rerank(#[from] RerankError),

    #[error("backend error: {0}")]
    Backend(#[from] BackendError),

    #[error("serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

/// Convenience alias used throughout the workspace.
pub type FusionResult<T> = Result<T, FusionError>;

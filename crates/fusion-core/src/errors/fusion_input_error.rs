use crate::models::ChannelKind;

/// A malformed `ChannelResult` reached the fuser. Indicates a bug upstream;
/// the offending entry is skipped and the error is logged.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum FusionInputError {
    #[error("channel {channel} supplied more than once")]
    DuplicateChannel { channel: ChannelKind },

    #[error("channel {channel} returned an empty item id at rank {rank}")]
    EmptyItemId { channel: ChannelKind, rank: usize },

    #[error("channel {channel} returned non-finite score for item {item_id}")]
    NonFiniteScore { channel: ChannelKind, item_id: String },
}

use super::BackendError;
use crate::models::ChannelKind;

/// Channel execution errors. Captured into a `ChannelResult`, never thrown.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum ChannelError {
    #[error("{channel} channel timed out after {timeout_ms}ms")]
    Timeout { channel: ChannelKind, timeout_ms: u64 },

    #[error("{channel} channel unavailable: {source}")]
    Unavailable {
        channel: ChannelKind,
        #[source]
        source: BackendError,
    },

    #[error("{channel} channel cancelled by caller")]
    Cancelled { channel: ChannelKind },

    #[error("{channel} channel task panicked: {reason}")]
    Panicked { channel: ChannelKind, reason: String },
}

impl ChannelError {
    pub fn channel(&self) -> ChannelKind {
        match self {
            ChannelError::Timeout { channel, .. }
            | ChannelError::Unavailable { channel, .. }
            | ChannelError::Cancelled { channel }
            | ChannelError::Panicked { channel, .. } => *channel,
        }
    }
}

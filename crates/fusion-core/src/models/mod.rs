mod channel;
mod classification;
mod fused_result;
mod search_request;
mod search_response;

pub use channel::{ChannelKind, ChannelResult, ChannelStatus, ScoredItem};
pub use classification::{ClassificationSource, IntentClassificationResult};
pub use fused_result::FusedResult;
pub use search_request::{normalize_query, query_fingerprint, Filters, SearchRequest};
pub use search_response::{ChannelReport, SearchMetadata, SearchResponse, StageLatency};

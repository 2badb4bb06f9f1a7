/// Fusion core version.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Default RRF smoothing constant.
pub const DEFAULT_RRF_K: u32 = 60;

/// Allowed deviation of an intent weight profile sum from 1.0.
pub const WEIGHT_SUM_TOLERANCE: f64 = 0.01;

/// Number of retrieval channels.
pub const CHANNEL_COUNT: usize = 4;

/// Upper bound on graph traversal hops for local neighborhood search.
pub const MAX_GRAPH_HOPS: u8 = 2;

/// Hard ceiling on `top_k` accepted by `search()`.
pub const MAX_TOP_K: usize = 1000;

/// Confidence assigned to the empty-query default classification.
pub const EMPTY_QUERY_CONFIDENCE: f64 = 0.1;

//! Default values for every config field.

// Fusion
pub const DEFAULT_RRF_K: u32 = crate::constants::DEFAULT_RRF_K;
pub const DEFAULT_RENORMALIZE_ON_DEGRADATION: bool = false;

// Channels
pub const DEFAULT_VECTOR_TIMEOUT_MS: u64 = 500;
pub const DEFAULT_SPARSE_TIMEOUT_MS: u64 = 500;
pub const DEFAULT_GRAPH_LOCAL_TIMEOUT_MS: u64 = 1_500;
pub const DEFAULT_GRAPH_GLOBAL_TIMEOUT_MS: u64 = 2_000;
pub const DEFAULT_OVERALL_TIMEOUT_MS: u64 = 3_000;
pub const DEFAULT_FETCH_MULTIPLIER: usize = 2;
pub const DEFAULT_GRAPH_HOPS: u8 = 2;

// Classifier
pub const DEFAULT_LLM_CLASSIFICATION: bool = true;
pub const DEFAULT_LLM_TIMEOUT_MS: u64 = 400;
pub const DEFAULT_CACHE_MAX_SIZE: u64 = 1_024;

// Rerank
pub const DEFAULT_RERANK_ENABLED: bool = false;
pub const DEFAULT_RERANK_TOP_N: usize = 20;
pub const DEFAULT_RERANK_TIMEOUT_MS: u64 = 1_500;

// Observability
pub const DEFAULT_LOG_LEVEL: &str = "info";
pub const DEFAULT_JSON_LOGS: bool = false;
pub const DEFAULT_QUERY_LOG_CAPACITY: usize = 50_000;

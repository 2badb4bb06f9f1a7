mod clients;
mod config_provider;
mod observer;
mod reranker;

pub use clients::{
    CommunityQuery, GraphStoreClient, LlmClient, QueryEmbedder, SparseIndexClient,
    VectorStoreClient,
};
pub use config_provider::ConfigProvider;
pub use observer::SearchObserver;
pub use reranker::Reranker;

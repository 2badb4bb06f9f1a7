//! Concrete client adapters for external services.

pub mod http_llm;

pub use http_llm::{HttpLlmClient, HttpLlmConfig};

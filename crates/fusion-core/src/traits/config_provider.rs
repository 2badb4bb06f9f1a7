use std::sync::Arc;

use crate::config::FusionConfig;

/// Source of the current config. Read once per search call.
pub trait ConfigProvider: Send + Sync {
    fn get(&self) -> Arc<FusionConfig>;
}

//! [`ConfigProvider`] implementations.

use std::path::PathBuf;
use std::sync::{Arc, Mutex, RwLock};
use std::time::{Duration, Instant};

use tracing::{debug, warn};

use super::FusionConfig;
use crate::errors::ConfigError;
use crate::traits::ConfigProvider;

/// In-memory provider. The config can be swapped atomically at runtime.
#[derive(Debug)]
pub struct StaticConfigProvider {
    current: RwLock<Arc<FusionConfig>>,
}

impl StaticConfigProvider {
    /// Wrap an already-validated config.
    pub fn new(config: FusionConfig) -> Result<Self, ConfigError> {
        config.validate()?;
        Ok(Self {
            current: RwLock::new(Arc::new(config)),
        })
    }

    /// Replace the config. Invalid configs are rejected and the old one kept.
    pub fn replace(&self, config: FusionConfig) -> Result<(), ConfigError> {
        config.validate()?;
        let mut guard = self.current.write().unwrap_or_else(|e| e.into_inner());
        *guard = Arc::new(config);
        Ok(())
    }
}

impl Default for StaticConfigProvider {
    fn default() -> Self {
        Self {
            current: RwLock::new(Arc::new(FusionConfig::default())),
        }
    }
}

impl ConfigProvider for StaticConfigProvider {
    fn get(&self) -> Arc<FusionConfig> {
        self.current
            .read()
            .unwrap_or_else(|e| e.into_inner())
            .clone()
    }
}

struct FileState {
    config: Arc<FusionConfig>,
    last_checked: Instant,
}

/// Reads a TOML file and re-reads it at most once per refresh interval.
///
/// A reload that fails to read, parse, or validate is logged and the last
/// good config stays in effect.
pub struct TomlFileConfigProvider {
    path: PathBuf,
    refresh_interval: Duration,
    state: Mutex<FileState>,
}

impl TomlFileConfigProvider {
    /// Load the file once. Failure here is fatal to the caller.
    pub fn open(path: impl Into<PathBuf>, refresh_interval: Duration) -> Result<Self, ConfigError> {
        let path = path.into();
        let config = FusionConfig::from_file(&path)?;
        Ok(Self {
            path,
            refresh_interval,
            state: Mutex::new(FileState {
                config: Arc::new(config),
                last_checked: Instant::now(),
            }),
        })
    }
}

impl ConfigProvider for TomlFileConfigProvider {
    fn get(&self) -> Arc<FusionConfig> {
        let mut state = self.state.lock().unwrap_or_else(|e| e.into_inner());
        if state.last_checked.elapsed() >= self.refresh_interval {
            state.last_checked = Instant::now();
            match FusionConfig::from_file(&self.path) {
                Ok(fresh) => {
                    if *state.config != fresh {
                        debug!(path = %self.path.display(), "config reloaded");
                        state.config = Arc::new(fresh);
                    }
                }
                Err(e) => {
                    warn!(path = %self.path.display(), error = %e, "config reload failed, keeping previous");
                }
            }
        }
        state.config.clone()
    }
}

//! Tracing setup: subscriber initialization and structured events.

pub mod events;

use std::sync::Once;

use tracing_subscriber::{fmt, prelude::*, EnvFilter};

use fusion_core::config::ObservabilityConfig;

/// Environment variable consulted before `ObservabilityConfig::log_level`.
pub const LOG_ENV: &str = "FUSION_LOG";

static INIT: Once = Once::new();

/// Build the filter: `FUSION_LOG` if set and valid, else the configured level.
pub fn env_filter(config: &ObservabilityConfig) -> EnvFilter {
    EnvFilter::try_from_env(LOG_ENV)
        .or_else(|_| EnvFilter::try_new(&config.log_level))
        .unwrap_or_else(|_| EnvFilter::new("info"))
}

/// Install the global subscriber. JSON lines when `json_logs` is set.
///
/// Idempotent. Does nothing if another subscriber is already installed.
pub fn init_tracing(config: &ObservabilityConfig) {
    INIT.call_once(|| {
        let filter = env_filter(config);
        let result = if config.json_logs {
            tracing_subscriber::registry()
                .with(
                    fmt::layer()
                        .json()
                        .with_target(true)
                        .with_thread_ids(true)
                        .with_current_span(true),
                )
                .with(filter)
                .try_init()
        } else {
            tracing_subscriber::registry()
                .with(fmt::layer().with_target(true).with_thread_ids(true))
                .with(filter)
                .try_init()
        };
        if result.is_err() {
            tracing::debug!("global tracing subscriber already set");
        }
    });
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn init_is_idempotent() {
        let config = ObservabilityConfig::default();
        init_tracing(&config);
        init_tracing(&config);
    }

    #[test]
    fn bad_level_falls_back() {
        let config = ObservabilityConfig {
            log_level: "not a level ===".to_string(),
            ..ObservabilityConfig::default()
        };
        // Must not panic.
        let _ = env_filter(&config);
    }
}

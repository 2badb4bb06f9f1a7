//! Concurrent channel fan-out.
//!
//! Every enabled channel runs in its own task. The join waits for all of
//! them, bounded by each channel's timeout (capped at the overall deadline).
//! Failures, timeouts, panics, and cancellation are all captured as
//! [`ChannelResult`]s so one channel can never block or fail the others.

pub mod degradation;
pub mod rrf_fusion;

use std::sync::Arc;
use std::time::Instant;

use futures::stream::{FuturesUnordered, StreamExt};
use tokio::task::JoinError;
use tokio_util::sync::CancellationToken;
use tokio_util::task::AbortOnDropHandle;
use tracing::{debug, warn};

use fusion_core::config::ChannelConfig;
use fusion_core::errors::ChannelError;
use fusion_core::models::{ChannelKind, ChannelResult};

use crate::channels::{Channel, ChannelQuery};
use crate::elapsed_ms;

/// Results of one fan-out, ordered by channel.
#[derive(Debug, Clone, PartialEq)]
pub struct FanOutOutcome {
    pub results: Vec<ChannelResult>,
    /// Channels not launched: disabled in config or not registered.
    pub skipped: Vec<ChannelKind>,
    pub cancelled: bool,
}

impl FanOutOutcome {
    pub fn launched(&self) -> impl Iterator<Item = ChannelKind> + '_ {
        self.results.iter().map(|r| r.channel)
    }
}

/// Run all enabled channels concurrently and wait for every one to settle.
pub async fn fan_out(
    channels: &[Arc<dyn Channel>],
    query: ChannelQuery,
    config: &ChannelConfig,
    cancel: Option<&CancellationToken>,
) -> FanOutOutcome {
    let start = Instant::now();
    let query = Arc::new(query);
    let overall = config.overall_timeout();

    let mut pending = FuturesUnordered::new();
    let mut launched = Vec::new();
    for channel in channels {
        let kind = channel.kind();
        if !config.is_enabled(kind) {
            continue;
        }
        let timeout = config.timeout_for(kind).min(overall);
        let channel = Arc::clone(channel);
        let query = Arc::clone(&query);
        let handle = AbortOnDropHandle::new(tokio::spawn(async move {
            channel.execute(&query, timeout).await
        }));
        launched.push(kind);
        pending.push(async move { (kind, handle.await) });
    }

    let skipped = ChannelKind::ALL
        .into_iter()
        .filter(|kind| !launched.contains(kind))
        .collect();

    let mut results = Vec::with_capacity(launched.len());
    let mut cancelled = false;
    loop {
        tokio::select! {
            biased;
            _ = wait_cancelled(cancel) => {
                cancelled = true;
                break;
            }
            next = pending.next() => match next {
                Some((kind, joined)) => results.push(settle(kind, joined, start)),
                None => break,
            },
        }
    }
    // Dropping the remaining handles aborts their tasks.
    drop(pending);

    if cancelled {
        for kind in &launched {
            if !results.iter().any(|r| r.channel == *kind) {
                results.push(ChannelResult::failure(
                    ChannelError::Cancelled { channel: *kind },
                    elapsed_ms(start),
                ));
            }
        }
        debug!("channel fan-out cancelled by caller");
    }

    results.sort_by_key(|r| r.channel);
    for result in results.iter().filter(|r| !r.is_success()) {
        if let Some(error) = &result.error {
            warn!(channel = %result.channel, latency_ms = result.latency_ms, error = %error, "channel failed");
        }
    }

    FanOutOutcome {
        results,
        skipped,
        cancelled,
    }
}

fn settle(
    kind: ChannelKind,
    joined: Result<ChannelResult, JoinError>,
    start: Instant,
) -> ChannelResult {
    match joined {
        Ok(result) => result,
        Err(e) if e.is_cancelled() => {
            ChannelResult::failure(ChannelError::Cancelled { channel: kind }, elapsed_ms(start))
        }
        Err(e) => ChannelResult::failure(
            ChannelError::Panicked {
                channel: kind,
                reason: panic_reason(e),
            },
            elapsed_ms(start),
        ),
    }
}

fn panic_reason(error: JoinError) -> String {
    match error.try_into_panic() {
        Ok(payload) => payload
            .downcast_ref::<&str>()
            .map(|s| (*s).to_string())
            .or_else(|| payload.downcast_ref::<String>().cloned())
            .unwrap_or_else(|| "unknown panic payload".to_string()),
        Err(e) => e.to_string(),
    }
}

async fn wait_cancelled(cancel: Option<&CancellationToken>) {
    match cancel {
        Some(token) => token.cancelled().await,
        None => std::future::pending().await,
    }
}

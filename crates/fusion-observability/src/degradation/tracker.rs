//! Record every channel failure: channel, failure mode, timestamp, recovery status.
//!
//! A channel is degraded from its first failure until its next success.

use chrono::{DateTime, Duration, Utc};
use serde::{Deserialize, Serialize};

use fusion_core::models::{ChannelKind, ChannelStatus};

use crate::tracing_setup::events;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RecoveryStatus {
    /// Still failing.
    Active,
    Recovered,
}

/// One recorded channel failure.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChannelDegradation {
    pub channel: ChannelKind,
    pub status: ChannelStatus,
    pub failure: String,
    pub timestamp: DateTime<Utc>,
    pub recovery_status: RecoveryStatus,
    pub recovered_at: Option<DateTime<Utc>>,
}

#[derive(Debug, Clone)]
pub struct DegradationTracker {
    events: Vec<ChannelDegradation>,
    max_events: usize,
}

impl Default for DegradationTracker {
    fn default() -> Self {
        Self::with_capacity(10_000)
    }
}

impl DegradationTracker {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_capacity(max_events: usize) -> Self {
        Self {
            events: Vec::new(),
            max_events: max_events.max(1),
        }
    }

    /// Record a failure. Consecutive failures of an already-degraded channel
    /// are recorded as separate events.
    pub fn record(&mut self, channel: ChannelKind, status: ChannelStatus, failure: impl Into<String>) {
        let failure = failure.into();
        events::channel_degraded(channel, &failure);
        self.events.push(ChannelDegradation {
            channel,
            status,
            failure,
            timestamp: Utc::now(),
            recovery_status: RecoveryStatus::Active,
            recovered_at: None,
        });
        if self.events.len() > self.max_events {
            let excess = self.events.len() - self.max_events;
            self.events.drain(..excess);
        }
    }

    /// Close every active event for `channel`. No-op if it wasn't degraded.
    pub fn mark_recovered(&mut self, channel: ChannelKind) {
        let Some(since) = self.degraded_duration(channel) else {
            return;
        };
        let now = Utc::now();
        for tracked in self
            .events
            .iter_mut()
            .filter(|t| t.channel == channel && t.recovery_status == RecoveryStatus::Active)
        {
            tracked.recovery_status = RecoveryStatus::Recovered;
            tracked.recovered_at = Some(now);
        }
        events::channel_recovered(channel, since.num_milliseconds());
    }

    pub fn events(&self) -> &[ChannelDegradation] {
        &self.events
    }

    pub fn active_degradations(&self) -> Vec<&ChannelDegradation> {
        self.events
            .iter()
            .filter(|t| t.recovery_status == RecoveryStatus::Active)
            .collect()
    }

    pub fn is_degraded(&self, channel: ChannelKind) -> bool {
        self.events
            .iter()
            .any(|t| t.channel == channel && t.recovery_status == RecoveryStatus::Active)
    }

    /// Events for `channel` in the last `window_secs` seconds.
    pub fn count_recent(&self, channel: ChannelKind, window_secs: i64) -> usize {
        let cutoff = Utc::now() - Duration::seconds(window_secs);
        self.events
            .iter()
            .filter(|t| t.channel == channel && t.timestamp > cutoff)
            .count()
    }

    /// How long `channel` has been continuously degraded, or None.
    pub fn degraded_duration(&self, channel: ChannelKind) -> Option<Duration> {
        let earliest = self
            .events
            .iter()
            .filter(|t| t.channel == channel && t.recovery_status == RecoveryStatus::Active)
            .map(|t| t.timestamp)
            .min()?;
        Some(Utc::now() - earliest)
    }
}

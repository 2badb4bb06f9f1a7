//! Per-channel degradation tracking.

pub mod tracker;

pub use tracker::{ChannelDegradation, DegradationTracker, RecoveryStatus};

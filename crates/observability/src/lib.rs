//! Tracing and logging setup shared by every binary and test harness.

/// Initialize process-wide logging from the environment.
///
/// This is safe to call multiple times; subsequent calls become no-ops.
pub fn init() {
    tracing::init(&ObservabilityConfig::from_env());
}

pub mod config;
pub mod tracing;

pub use config::{LogFormat, ObservabilityConfig};

//! Sink backed by the `tracing` crate.

use super::{LogSink, Severity};

/// Forwards messages to `tracing` under the `filesem` target.
///
/// Critical messages are emitted at `ERROR` level.
#[derive(Debug, Clone, Copy, Default)]
pub struct TracingSink;

impl LogSink for TracingSink {
    fn log(&self, severity: Severity, message: &str) {
        match severity {
            Severity::Info => tracing::info!(target: "filesem", "{}", message),
            Severity::Warning => tracing::warn!(target: "filesem", "{}", message),
            Severity::Critical => tracing::error!(target: "filesem", "{}", message),
        }
    }
}

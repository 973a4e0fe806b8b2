//! Log sinks for filesem.
//!
//! The lock store reports what it does as human-readable status lines to a
//! [`LogSink`] handed to it at construction. A sink is a passive observer:
//! nothing it does (or fails to do) changes the outcome of an operation.
//!
//! Provided sinks:
//! - [`TracingSink`]: forwards to the `tracing` ecosystem
//! - [`NdjsonSink`]: appends one JSON object per line to an audit file
//! - [`FanoutSink`]: forwards to several sinks
//! - [`MemorySink`]: keeps entries in memory
//! - [`NullSink`]: discards everything

mod memory;
mod ndjson;
mod tracing_sink;

pub use memory::MemorySink;
pub use ndjson::{LogRecord, NdjsonSink};
pub use tracing_sink::TracingSink;

use serde::{Deserialize, Serialize};
use std::sync::Arc;

/// Severity of a log line.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Severity {
    Info,
    Warning,
    /// Infrastructure failure; always emitted before an error propagates.
    Critical,
}

impl std::fmt::Display for Severity {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Severity::Info => write!(f, "info"),
            Severity::Warning => write!(f, "warning"),
            Severity::Critical => write!(f, "critical"),
        }
    }
}

/// Receiver of severity-tagged status messages.
pub trait LogSink: Send + Sync {
    fn log(&self, severity: Severity, message: &str);

    fn info(&self, message: &str) {
        self.log(Severity::Info, message);
    }

    fn warning(&self, message: &str) {
        self.log(Severity::Warning, message);
    }

    fn critical(&self, message: &str) {
        self.log(Severity::Critical, message);
    }
}

/// Sink that discards every message.
#[derive(Debug, Clone, Copy, Default)]
pub struct NullSink;

impl LogSink for NullSink {
    fn log(&self, _severity: Severity, _message: &str) {}
}

/// Sink that forwards each message to every inner sink, in order.
#[derive(Clone, Default)]
pub struct FanoutSink {
    sinks: Vec<Arc<dyn LogSink>>,
}

impl FanoutSink {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with(mut self, sink: Arc<dyn LogSink>) -> Self {
        self.sinks.push(sink);
        self
    }

    pub fn len(&self) -> usize {
        self.sinks.len()
    }

    pub fn is_empty(&self) -> bool {
        self.sinks.is_empty()
    }
}

impl LogSink for FanoutSink {
    fn log(&self, severity: Severity, message: &str) {
        for sink in &self.sinks {
            sink.log(severity, message);
        }
    }
}

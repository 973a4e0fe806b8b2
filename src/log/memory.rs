//! In-memory sink.

use super::{LogSink, Severity};
use std::sync::Mutex;

/// Sink that keeps every entry in memory, in emission order.
#[derive(Debug, Default)]
pub struct MemorySink {
    entries: Mutex<Vec<(Severity, String)>>,
}

impl MemorySink {
    pub fn new() -> Self {
        Self::default()
    }

    /// Snapshot of all recorded entries.
    pub fn entries(&self) -> Vec<(Severity, String)> {
        self.lock().clone()
    }

    /// Recorded messages without their severity.
    pub fn messages(&self) -> Vec<String> {
        self.lock().iter().map(|(_, m)| m.clone()).collect()
    }

    /// Recorded messages of one severity.
    pub fn messages_at(&self, severity: Severity) -> Vec<String> {
        self.lock()
            .iter()
            .filter(|(s, _)| *s == severity)
            .map(|(_, m)| m.clone())
            .collect()
    }

    pub fn clear(&self) {
        self.lock().clear();
    }

    fn lock(&self) -> std::sync::MutexGuard<'_, Vec<(Severity, String)>> {
        // A panicking writer cannot leave the Vec half-updated.
        self.entries
            .lock()
            .unwrap_or_else(|poison| poison.into_inner())
    }
}

impl LogSink for MemorySink {
    fn log(&self, severity: Severity, message: &str) {
        self.lock().push((severity, message.to_string()));
    }
}

//! Append-only NDJSON audit sink.
//!
//! Each message becomes one JSON object on its own line:
//! - `ts`: RFC3339 timestamp
//! - `severity`: `info`, `warning` or `critical`
//! - `actor`: `user@HOST` of the emitting process
//! - `pid`: emitting process ID
//! - `message`: the status line
//!
//! Several processes may append to the same file; every record is written
//! with a single `write` call on an `O_APPEND` handle.

use super::{LogSink, Severity};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fs::{self, OpenOptions};
use std::io::{self, Write};
use std::path::{Path, PathBuf};

/// One line of the audit file.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LogRecord {
    pub ts: DateTime<Utc>,
    pub severity: Severity,
    pub actor: String,
    pub pid: u32,
    pub message: String,
}

impl LogRecord {
    pub fn new(severity: Severity, message: &str) -> Self {
        Self {
            ts: Utc::now(),
            severity,
            actor: actor_string(),
            pid: std::process::id(),
            message: message.to_string(),
        }
    }

    /// Serialize to a single-line JSON string (no trailing newline).
    pub fn to_ndjson_line(&self) -> serde_json::Result<String> {
        serde_json::to_string(self)
    }
}

/// Appends every message to an NDJSON file.
///
/// Write failures go to stderr and are otherwise ignored.
#[derive(Debug, Clone)]
pub struct NdjsonSink {
    path: PathBuf,
}

impl NdjsonSink {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Append a record to the file, creating the file and its parent as needed.
    pub fn append(&self, record: &LogRecord) -> io::Result<()> {
        let mut line = record.to_ndjson_line().map_err(io::Error::other)?;
        line.push('\n');

        if let Some(parent) = self.path.parent()
            && !parent.as_os_str().is_empty()
            && !parent.exists()
        {
            fs::create_dir_all(parent)?;
        }

        let mut file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(&self.path)?;

        file.write_all(line.as_bytes())
    }

    /// Read back every record in the file.
    pub fn read_all(&self) -> io::Result<Vec<LogRecord>> {
        let content = fs::read_to_string(&self.path)?;
        content
            .lines()
            .filter(|l| !l.trim().is_empty())
            .map(|l| serde_json::from_str(l).map_err(io::Error::other))
            .collect()
    }
}

impl LogSink for NdjsonSink {
    fn log(&self, severity: Severity, message: &str) {
        if let Err(e) = self.append(&LogRecord::new(severity, message)) {
            eprintln!(
                "Warning: failed to append to log '{}': {}",
                self.path.display(),
                e
            );
        }
    }
}

fn actor_string() -> String {
    let user = std::env::var("USER")
        .or_else(|_| std::env::var("USERNAME"))
        .unwrap_or_else(|_| "unknown".to_string());

    let host = hostname::get()
        .map(|h| h.to_string_lossy().to_string())
        .unwrap_or_else(|_| "unknown".to_string());

    format!("{}@{}", user, host)
}

//! Config struct definition and default implementation.

use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// File name looked up by [`Config::discover`].
pub const CONFIG_FILE_NAME: &str = "filesem.yaml";

/// Configuration for a filesem lock store.
///
/// Unknown fields in the YAML are ignored for forward compatibility.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Directory holding one lease record per key.
    #[serde(default = "default_root")]
    pub root: PathBuf,

    /// Seconds a lease lasts after a successful acquire.
    #[serde(default = "default_lease_seconds")]
    pub lease_seconds: u64,

    /// Optional NDJSON file receiving every status line.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub event_log: Option<PathBuf>,

    /// `tracing` filter directive used when `FILESEM_LOG` is unset.
    #[serde(default = "default_log_filter")]
    pub log_filter: String,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            root: default_root(),
            lease_seconds: default_lease_seconds(),
            event_log: None,
            log_filter: default_log_filter(),
        }
    }
}

pub(crate) fn default_root() -> PathBuf {
    PathBuf::from(".filesem")
}

pub(crate) fn default_lease_seconds() -> u64 {
    3600
}

pub(crate) fn default_log_filter() -> String {
    "info".to_string()
}

//! The keyed file lock store.

use super::guard::LeaseGuard;
use super::key::validate_key;
use super::lease::{LeaseInfo, LeaseRecord, LeaseState};
use crate::error::{Result, SemaphoreError};
use crate::fs::{atomic_write, ensure_writable_dir};
use crate::log::LogSink;
use chrono::Utc;
use std::fmt;
use std::fs;
use std::path::{Path, PathBuf};
use std::sync::Arc;

/// A store of expiring leases, one file per key under a root directory.
///
/// Cloning is cheap and every clone refers to the same root; processes that
/// point at the same root contend for the same keys.
///
/// The acquire sequence (read, compare, write) is not atomic across
/// processes. Two callers that both observe an absent or expired lease can
/// both write one and both return `true`.
#[derive(Clone)]
pub struct KeyedFileLock {
    root: PathBuf,
    lease_seconds: u64,
    sink: Arc<dyn LogSink>,
}

impl fmt::Debug for KeyedFileLock {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("KeyedFileLock")
            .field("root", &self.root)
            .field("lease_seconds", &self.lease_seconds)
            .finish_non_exhaustive()
    }
}

impl KeyedFileLock {
    /// Bind a store to `root`, creating the directory if needed.
    ///
    /// A `lease_seconds` of zero is accepted, but every lease is then
    /// expired the moment it is written and provides no exclusion.
    ///
    /// # Errors
    ///
    /// * `SemaphoreError::Provisioning` - `root` is a file, is not writable,
    ///   or could not be created. The failure is logged as critical first.
    pub fn new(
        root: impl Into<PathBuf>,
        lease_seconds: u64,
        sink: Arc<dyn LogSink>,
    ) -> Result<Self> {
        let root = root.into();

        if let Err(e) = ensure_writable_dir(&root) {
            sink.critical(&e.to_string());
            return Err(e);
        }

        Ok(Self {
            root,
            lease_seconds,
            sink,
        })
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    pub fn lease_seconds(&self) -> u64 {
        self.lease_seconds
    }

    /// Path of the lease record for `key`.
    pub fn lease_path(&self, key: &str) -> Result<PathBuf> {
        validate_key(key)?;
        Ok(self.root.join(key))
    }

    /// Try to take `key` for `lease_seconds` from now. Never waits.
    ///
    /// # Returns
    ///
    /// * `Ok(true)` - The caller holds the lease until its new expiry
    /// * `Ok(false)` - Someone else holds an unexpired lease
    /// * `Err(SemaphoreError::InvalidKey)` - The key is not a single path segment
    /// * `Err(SemaphoreError::Acquisition)` - The lease record could not be written
    pub fn acquire(&self, key: &str) -> Result<bool> {
        self.acquire_at(key, Utc::now().timestamp())
    }

    pub(crate) fn acquire_at(&self, key: &str, now: i64) -> Result<bool> {
        let path = self.checked_path(key)?;

        match LeaseState::read(&path, now) {
            LeaseState::Absent => {}
            LeaseState::Held { .. } => {
                self.sink
                    .info(&format!("key \"{}\" exists and expires in future", key));
                return Ok(false);
            }
            LeaseState::Expired { .. } | LeaseState::Corrupt => {
                self.sink.info(&format!("key \"{}\" exists, but expired", key));
            }
        }

        let record = LeaseRecord::starting_at(now, self.lease_seconds);
        if let Err(e) = atomic_write(&path, record.to_content().as_bytes()) {
            let message = format!("Failed to acquire key \"{}\"", key);
            self.sink.critical(&message);
            return Err(SemaphoreError::Acquisition(format!("{}: {}", message, e)));
        }

        self.sink.info(&format!("Acquired new key \"{}\"", key));
        Ok(true)
    }

    /// Remove the lease record for `key`, whoever took it.
    ///
    /// Returns `false` when nothing was removed (no record, invalid key,
    /// or an I/O failure). Never returns an error.
    pub fn release(&self, key: &str) -> bool {
        let removed = match self.checked_path(key) {
            Ok(path) => fs::remove_file(path).is_ok(),
            Err(_) => false,
        };

        if removed {
            self.sink.info(&format!("Released key \"{}\"", key));
        } else {
            self.sink.info(&format!("Failed to release key \"{}\"", key));
        }

        removed
    }

    /// Current state of `key`. Read-only and silent.
    pub fn inspect(&self, key: &str) -> Result<LeaseState> {
        let path = self.lease_path(key)?;
        Ok(LeaseState::read(&path, Utc::now().timestamp()))
    }

    /// Every lease record under the root, sorted by key.
    ///
    /// Entries that are not regular files or whose names are not valid keys
    /// (such as leftover temporary files) are skipped.
    pub fn list(&self) -> Result<Vec<LeaseInfo>> {
        let now = Utc::now().timestamp();

        let entries = fs::read_dir(&self.root).map_err(|e| {
            SemaphoreError::Provisioning(format!(
                "failed to read root directory '{}': {}",
                self.root.display(),
                e
            ))
        })?;

        let mut leases = Vec::new();
        for entry in entries {
            let entry = entry.map_err(|e| {
                SemaphoreError::Provisioning(format!("failed to read directory entry: {}", e))
            })?;

            if !entry.file_type().is_ok_and(|t| t.is_file()) {
                continue;
            }

            let Some(key) = entry.file_name().to_str().map(str::to_string) else {
                continue;
            };
            if validate_key(&key).is_err() {
                continue;
            }

            let path = entry.path();
            let state = LeaseState::read(&path, now);
            // Released between read_dir and read
            if state == LeaseState::Absent {
                continue;
            }

            leases.push(LeaseInfo { key, path, state });
        }

        leases.sort_by(|a, b| a.key.cmp(&b.key));
        Ok(leases)
    }

    /// Acquire `key` and wrap the lease in a guard that releases it on drop.
    ///
    /// `Ok(None)` when the key is currently held.
    pub fn try_lock(&self, key: &str) -> Result<Option<LeaseGuard>> {
        if self.acquire(key)? {
            Ok(Some(LeaseGuard::new(self.clone(), key.to_string())))
        } else {
            Ok(None)
        }
    }

    /// Like `lease_path`, but reports rejected keys to the sink.
    fn checked_path(&self, key: &str) -> Result<PathBuf> {
        self.lease_path(key).inspect_err(|e| {
            self.sink.warning(&e.to_string());
        })
    }
}

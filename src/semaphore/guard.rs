//! RAII lease guard.

use super::store::KeyedFileLock;

/// Holds a lease taken by [`KeyedFileLock::try_lock`].
///
/// When dropped, the lease record is deleted. Leases carry no owner, so a
/// guard that outlives its lease deletes whatever record is there at drop
/// time, including one written by a later holder.
#[derive(Debug)]
pub struct LeaseGuard {
    store: KeyedFileLock,
    key: String,
    released: bool,
}

impl LeaseGuard {
    pub(super) fn new(store: KeyedFileLock, key: String) -> Self {
        Self {
            store,
            key,
            released: false,
        }
    }

    pub fn key(&self) -> &str {
        &self.key
    }

    /// Release now and report whether a record was removed.
    pub fn release(mut self) -> bool {
        self.released = true;
        self.store.release(&self.key)
    }
}

impl Drop for LeaseGuard {
    fn drop(&mut self) {
        if !self.released {
            self.store.release(&self.key);
        }
    }
}

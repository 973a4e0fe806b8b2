//! Filesystem utilities for filesem.
//!
//! Lease records live directly in the root directory. This module provides
//! the two filesystem concerns the store needs beyond plain reads and
//! deletes: provisioning the root and replacing a record atomically.

pub mod atomic;
mod provision;

pub use atomic::atomic_write;
pub use provision::ensure_writable_dir;

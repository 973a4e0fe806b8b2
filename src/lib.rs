//! filesem: an expiring semaphore kept as plain files on a shared filesystem.
//!
//! Processes that can see the same directory, on one host or many hosts
//! sharing a mount, coordinate on named keys without a coordination service.
//! Each key is a file whose content is the lease's expiry timestamp; a
//! holder that crashes is recovered from once its lease runs out.
//!
//! ```no_run
//! use filesem::log::TracingSink;
//! use filesem::semaphore::KeyedFileLock;
//! use std::sync::Arc;
//!
//! let store = KeyedFileLock::new("/mnt/shared/locks", 300, Arc::new(TracingSink))?;
//! if store.acquire("nightly-report")? {
//!     // critical section
//!     store.release("nightly-report");
//! }
//! # Ok::<(), filesem::error::SemaphoreError>(())
//! ```

pub mod config;
pub mod error;
pub mod exit_codes;
pub mod fs;
pub mod log;
pub mod semaphore;

pub use error::{Result, SemaphoreError};
pub use semaphore::KeyedFileLock;

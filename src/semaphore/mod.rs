//! File-backed expiring semaphore.
//!
//! # Lease Records
//!
//! Each key maps to one file directly under the store's root directory:
//! `<root>/<key>`. The file's entire content is the decimal UNIX timestamp
//! (seconds, UTC) at which the lease expires. There is no header and no
//! owner information.
//!
//! # Protocol
//!
//! - `acquire` reads the record. A future expiry means the key is held and
//!   the call returns `false`. A missing, past, unreadable or unparsable
//!   record is overwritten with `now + lease_seconds` and the call returns
//!   `true`.
//! - `release` deletes the record.
//!
//! A holder that crashes leaves its record behind; the next `acquire` after
//! expiry reclaims it.
//!
//! # Known Weakness
//!
//! The read-compare-write in `acquire` is not atomic across processes, so
//! two contenders can both observe a free key and both win.

mod guard;
mod key;
mod lease;
mod store;


pub use guard::LeaseGuard;
pub use key::validate_key;
pub use lease::{LeaseInfo, LeaseRecord, LeaseState, format_timestamp, lease_expiry};
pub use store::KeyedFileLock;

//! Exit code constants for the filesem CLI.
//!
//! - 0: Success
//! - 1: User error (bad key, bad config)
//! - 2: Declined (lease held, or nothing to release)
//! - 3: Root directory provisioning failure
//! - 4: Lease write failure

/// Successful execution.
pub const SUCCESS: i32 = 0;

/// User error: invalid key, unreadable or invalid configuration.
pub const USER_ERROR: i32 = 1;

/// The lease is held by someone else, or there was no lease to release.
pub const DECLINED: i32 = 2;

/// The root directory could not be created or is not writable.
pub const PROVISIONING_FAILURE: i32 = 3;

/// The lease record could not be written.
pub const ACQUISITION_FAILURE: i32 = 4;

//! Error types for filesem.
//!
//! Uses thiserror for derive macros. Only infrastructure failures are errors;
//! the lock's business outcomes (held, nothing to release) are booleans.

use crate::exit_codes;
use thiserror::Error;

/// Main error type for semaphore operations.
#[derive(Error, Debug)]
pub enum SemaphoreError {
    /// The root directory cannot be established as a writable directory.
    #[error("Provisioning failed: {0}")]
    Provisioning(String),

    /// A lease record write failed after the caller was found eligible.
    #[error("{0}")]
    Acquisition(String),

    /// The key cannot be used as a lease record filename.
    #[error("Invalid key: {0}")]
    InvalidKey(String),

    /// Configuration could not be read, parsed or validated.
    #[error("Configuration error: {0}")]
    Config(String),
}

impl SemaphoreError {
    /// Returns the process exit code for this error type.
    pub fn exit_code(&self) -> i32 {
        match self {
            SemaphoreError::InvalidKey(_) => exit_codes::USER_ERROR,
            SemaphoreError::Config(_) => exit_codes::USER_ERROR,
            SemaphoreError::Provisioning(_) => exit_codes::PROVISIONING_FAILURE,
            SemaphoreError::Acquisition(_) => exit_codes::ACQUISITION_FAILURE,
        }
    }
}

/// Result type alias for semaphore operations.
pub type Result<T> = std::result::Result<T, SemaphoreError>;

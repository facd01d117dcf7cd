//! Error types for the vault shim

use thiserror::Error;

/// Errors that can occur while resolving a credential
#[derive(Error, Debug)]
pub enum VaultError {
    /// The rbw binary could not be started
    #[error("failed to spawn rbw: {0}")]
    Spawn(String),

    /// The vault is locked and unlocking is disabled
    #[error("vault is locked and unlocking is disabled")]
    Locked,

    /// The unlock attempt was rejected
    #[error("unlock failed: {0}")]
    UnlockFailed(String),

    /// The credential lookup itself failed
    #[error("lookup failed for {credential}: {stderr}")]
    LookupFailed {
        /// Credential name that was requested
        credential: String,
        /// Stderr output from rbw
        stderr: String,
    },
}

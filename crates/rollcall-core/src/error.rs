//! Error types for rollcall-core

use thiserror::Error;

/// Errors surfaced by inventory lookup
///
/// Construction itself recovers locally from bad input: malformed attributes
/// are omitted and nameless records are skipped and counted.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum InventoryError {
    /// Requested host is not present in the built inventory
    #[error("no matching host found for {0}")]
    UnknownHost(String),
}

//! Single-host lookup against a built document

use crate::document::{FlatDocument, HostVars, NestedDocument};
use crate::error::InventoryError;

/// Documents that can answer a single-host query.
///
/// Lookups are pure reads against the already-built document; nothing is
/// re-fetched or rebuilt.
pub trait HostLookup {
    /// Find a host's variable mapping.
    ///
    /// `None` means the host is absent from the inventory. A host that is
    /// present but carries no variables yields an empty mapping instead.
    fn lookup(&self, name: &str) -> Option<&HostVars>;

    /// Like [`HostLookup::lookup`], with an explicit not-found error.
    ///
    /// # Errors
    /// Returns [`InventoryError::UnknownHost`] when the host is absent.
    fn host_vars(&self, name: &str) -> Result<&HostVars, InventoryError> {
        self.lookup(name)
            .ok_or_else(|| InventoryError::UnknownHost(name.to_string()))
    }
}

impl HostLookup for FlatDocument {
    fn lookup(&self, name: &str) -> Option<&HostVars> {
        self.meta.hostvars.get(name)
    }
}

impl HostLookup for NestedDocument {
    fn lookup(&self, name: &str) -> Option<&HostVars> {
        self.all.hosts.get(name)
    }
}

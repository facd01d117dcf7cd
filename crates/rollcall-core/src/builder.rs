//! Record-to-inventory transformation
//!
//! Two grouping policies are implemented. [`InventoryBuilder`] groups by a
//! record-level key (a DNS view, typically) and produces the flat
//! `_meta`/per-group document. [`ManagedRoleBuilder`] is driven by a managed
//! flag and a role attribute and produces the nested `all`/`children`
//! document. Both run a single forward pass in input order.

use serde_json::Value;
use tracing::{debug, warn};

use crate::attrs::flatten_extattrs;
use crate::config::{BuilderConfig, HostFilter, ManagedRoleConfig};
use crate::document::{FlatDocument, HostVars, NestedDocument};
use crate::record::RawRecord;

/// Result of one build pass.
#[derive(Debug, Clone)]
pub struct BuiltInventory<D> {
    /// The assembled document.
    pub document: D,
    /// Records dropped for lacking a usable name.
    pub skipped: usize,
}

/// Builds the flat document, grouping hosts by a record-level key.
#[derive(Debug, Clone, Default)]
pub struct InventoryBuilder {
    config: BuilderConfig,
}

impl InventoryBuilder {
    /// Create a builder with the given policy.
    #[must_use]
    pub fn new(config: BuilderConfig) -> Self {
        Self { config }
    }

    /// Run a single pass over `records` and assemble the document.
    ///
    /// Records without a usable name are skipped and counted, never fatal.
    /// When the same name shows up in several records, later variable writes
    /// win per key while group membership from every record is kept.
    #[must_use]
    pub fn build(&self, records: &[RawRecord], filter: &HostFilter) -> BuiltInventory<FlatDocument> {
        let mut document = FlatDocument::default();
        let mut skipped = 0usize;

        for record in records {
            let Some(name) = record.host_name() else {
                skipped += 1;
                warn!(
                    group_key = record.group_key.as_deref(),
                    "record has no usable name, skipping"
                );
                continue;
            };
            if !filter.matches(name) {
                continue;
            }
            let name = name.to_string();

            let group_key = record
                .group_key
                .as_deref()
                .map(str::trim)
                .filter(|key| !key.is_empty());

            if let Some(group) = group_key {
                document
                    .groups
                    .entry(group.to_string())
                    .or_default()
                    .hosts
                    .push(name.clone());
            }

            let vars = document.meta.hostvars.entry(name).or_default();
            if let Some(group) = group_key {
                vars.insert(
                    self.config.group_var.clone(),
                    Value::String(group.to_string()),
                );
            }

            for (key, value) in flatten_extattrs(&record.extattrs) {
                if key.starts_with(&self.config.attribute_prefix) {
                    vars.insert(key, value);
                } else {
                    let nested = vars
                        .entry(self.config.nested_key.clone())
                        .or_insert_with(|| Value::Object(HostVars::new()));
                    if let Value::Object(map) = nested {
                        map.insert(key, value);
                    }
                }
            }
        }

        debug!(
            hosts = document.meta.hostvars.len(),
            groups = document.groups.len(),
            skipped,
            "inventory built"
        );

        BuiltInventory { document, skipped }
    }
}

/// Builds the nested document from a managed flag and a role attribute.
#[derive(Debug, Clone, Default)]
pub struct ManagedRoleBuilder {
    config: ManagedRoleConfig,
}

impl ManagedRoleBuilder {
    /// Create a builder with the given policy.
    #[must_use]
    pub fn new(config: ManagedRoleConfig) -> Self {
        Self { config }
    }

    fn address_vars(&self, address: &str) -> HostVars {
        let mut vars = HostVars::new();
        vars.insert(
            self.config.address_var.clone(),
            Value::String(address.to_string()),
        );
        vars
    }

    /// Run a single pass over `records` and assemble the document.
    ///
    /// The record's identifier is its address; records without one are
    /// skipped and counted. Role membership and the managed gate are decided
    /// independently from the same record, so a host can sit in a child
    /// group without being in the umbrella host collection and vice versa.
    #[must_use]
    pub fn build(
        &self,
        records: &[RawRecord],
        filter: &HostFilter,
    ) -> BuiltInventory<NestedDocument> {
        let mut document = NestedDocument::default();
        let mut skipped = 0usize;

        for record in records {
            let Some(address) = record
                .identifier
                .as_deref()
                .map(str::trim)
                .filter(|addr| !addr.is_empty())
            else {
                skipped += 1;
                warn!("record has no address, skipping");
                continue;
            };
            let name = record.host_name().unwrap_or(address).to_string();
            if !filter.matches(&name) {
                continue;
            }

            let flat = flatten_extattrs(&record.extattrs);

            let role = flat
                .get(&self.config.role_attr)
                .and_then(Value::as_str)
                .map(str::trim)
                .filter(|role| !role.is_empty());

            if let Some(role) = role {
                document
                    .all
                    .children
                    .entry(role.to_string())
                    .or_default()
                    .hosts
                    .insert(name.clone(), self.address_vars(address));
            }

            let managed = flat.get(&self.config.managed_attr).and_then(Value::as_str)
                == Some(self.config.managed_value.as_str());

            if managed {
                document
                    .all
                    .hosts
                    .insert(name, self.address_vars(address));
            }
        }

        debug!(
            hosts = document.all.hosts.len(),
            children = document.all.children.len(),
            skipped,
            "inventory built"
        );

        BuiltInventory { document, skipped }
    }
}

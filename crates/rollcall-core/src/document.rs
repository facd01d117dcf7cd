//! Inventory document shapes
//!
//! Two output formats exist in the wild: a flat document with `_meta.hostvars`
//! plus one top-level key per group, and a nested document with a single
//! `all` umbrella group carrying hosts and child groups.

use std::collections::BTreeMap;

use serde::Serialize;
use serde_json::{Map, Value};

/// Per-host variable mapping.
pub type HostVars = Map<String, Value>;

/// A named group of hosts.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct Group {
    /// Host names in the order records produced them. Not deduplicated;
    /// a host appears twice only if the source yielded it twice.
    pub hosts: Vec<String>,
}

/// Inventory document with top-level groups and `_meta.hostvars`.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct FlatDocument {
    /// The `_meta` block consumed by the automation controller.
    #[serde(rename = "_meta")]
    pub meta: Meta,
    /// Groups keyed by name, serialized as top-level keys.
    #[serde(flatten)]
    pub groups: BTreeMap<String, Group>,
}

/// The `_meta` block of a flat document.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct Meta {
    /// Variable mappings keyed by host name.
    pub hostvars: BTreeMap<String, HostVars>,
}

/// Inventory document in the nested `all`/`children` shape.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct NestedDocument {
    /// The umbrella group.
    pub all: UmbrellaGroup,
}

/// The `all` umbrella group of a nested document.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct UmbrellaGroup {
    /// Hosts that passed the managed gate, with their variables.
    pub hosts: BTreeMap<String, HostVars>,
    /// Child groups keyed by role.
    pub children: BTreeMap<String, ChildGroup>,
}

/// One child group under the umbrella group.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct ChildGroup {
    /// Member hosts with their variables.
    pub hosts: BTreeMap<String, HostVars>,
}

//! Builder policy configuration
//!
//! The builders take explicit policy structs instead of reading process
//! environment, so a build run is a pure function of (records, config).

use serde::{Deserialize, Serialize};

/// Policy knobs for the group-key inventory builder.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BuilderConfig {
    /// Host variable name the group key is recorded under.
    #[serde(default = "default_group_var")]
    pub group_var: String,
    /// Flattened attributes starting with this prefix become top-level
    /// host variables, prefix retained.
    #[serde(default = "default_attribute_prefix")]
    pub attribute_prefix: String,
    /// Sub-mapping key collecting attributes without the prefix.
    #[serde(default = "default_nested_key")]
    pub nested_key: String,
}

fn default_group_var() -> String {
    "view".to_string()
}

fn default_attribute_prefix() -> String {
    "ansible_".to_string()
}

fn default_nested_key() -> String {
    "extattrs".to_string()
}

impl Default for BuilderConfig {
    fn default() -> Self {
        Self {
            group_var: default_group_var(),
            attribute_prefix: default_attribute_prefix(),
            nested_key: default_nested_key(),
        }
    }
}

/// Policy knobs for the managed/role inventory builder.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ManagedRoleConfig {
    /// Attribute gating membership in the umbrella host collection.
    #[serde(default = "default_managed_attr")]
    pub managed_attr: String,
    /// Value the managed attribute must equal, compared verbatim.
    #[serde(default = "default_managed_value")]
    pub managed_value: String,
    /// Attribute assigning the host to a child group.
    #[serde(default = "default_role_attr")]
    pub role_attr: String,
    /// Host variable carrying the record's address.
    #[serde(default = "default_address_var")]
    pub address_var: String,
}

fn default_managed_attr() -> String {
    "custom_managed".to_string()
}

fn default_managed_value() -> String {
    "Yes".to_string()
}

fn default_role_attr() -> String {
    "custom_role".to_string()
}

fn default_address_var() -> String {
    "ansible_host".to_string()
}

impl Default for ManagedRoleConfig {
    fn default() -> Self {
        Self {
            managed_attr: default_managed_attr(),
            managed_value: default_managed_value(),
            role_attr: default_role_attr(),
            address_var: default_address_var(),
        }
    }
}

/// Which hosts a build run is interested in.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum HostFilter {
    /// Build the full inventory.
    #[default]
    All,
    /// Restrict to a single host name.
    Host(String),
}

impl HostFilter {
    /// Check whether a resolved host name passes the filter.
    #[must_use]
    pub fn matches(&self, name: &str) -> bool {
        match self {
            HostFilter::All => true,
            HostFilter::Host(wanted) => wanted == name,
        }
    }
}

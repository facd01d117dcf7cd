//! rollcall-core: record-to-inventory normalization
//!
//! Turns raw address/host records into Ansible dynamic-inventory documents:
//! groups, host lists, and per-host variable mappings. The crate is pure and
//! single-pass; fetching records is the job of `rollcall-source`.

pub mod attrs;
pub mod builder;
pub mod config;
pub mod document;
pub mod error;
pub mod query;
pub mod record;

pub use builder::{BuiltInventory, InventoryBuilder, ManagedRoleBuilder};
pub use config::{BuilderConfig, HostFilter, ManagedRoleConfig};
pub use document::{ChildGroup, FlatDocument, Group, HostVars, NestedDocument, UmbrellaGroup};
pub use error::InventoryError;
pub use query::HostLookup;
pub use record::{AttributeValue, RawRecord};

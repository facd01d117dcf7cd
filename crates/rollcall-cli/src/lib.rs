//! rollcall-cli: dynamic-inventory entry points
//!
//! The binaries live under `src/bin`; this library carries the shared
//! configuration loading.

pub mod config;

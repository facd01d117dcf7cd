//! rollcall-source: HTTP record sources
//!
//! Fetches raw address/host records from IPAM and DNS systems and converts
//! them to the shared record shape consumed by `rollcall-core`.

pub mod error;
pub mod ipam;
pub mod nios;
pub mod traits;

pub use error::SourceError;
pub use traits::RecordSource;

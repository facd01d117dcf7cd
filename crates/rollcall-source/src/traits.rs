//! Record source trait

use async_trait::async_trait;

use rollcall_core::{HostFilter, RawRecord};

use crate::error::SourceError;

/// A system that can be asked for raw inventory records.
///
/// Implementations own their transport, auth, and query details; callers only
/// ever see an already-materialized sequence of records.
#[async_trait]
pub trait RecordSource: Send + Sync {
    /// Fetch all records matching the filter, converted to the shared shape.
    ///
    /// # Errors
    /// Returns an error if the source is unreachable, rejects the request,
    /// or answers with a malformed payload.
    async fn fetch(&self, filter: &HostFilter) -> Result<Vec<RawRecord>, SourceError>;

    /// Short label for logs.
    fn source_type(&self) -> &'static str;
}

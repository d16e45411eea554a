//! Core trait for record storage backends.

use crate::error::RemoteError;
use roster_core::{Record, RecordFields, RecordId};

/// The four operations the client can perform against the record collection.
///
/// All implementations must be `Send + Sync` so the controller can be driven
/// from a tokio task.
#[async_trait::async_trait]
pub trait RecordStore: Send + Sync {
    /// Fetch the full collection in server order.
    async fn list(&self) -> Result<Vec<Record>, RemoteError>;

    /// Create a record and return it with its server-assigned id.
    async fn create(&self, fields: &RecordFields) -> Result<Record, RemoteError>;

    /// Replace the editable fields of an existing record.
    async fn update(&self, id: &RecordId, fields: &RecordFields) -> Result<Record, RemoteError>;

    /// Remove a record.
    async fn delete(&self, id: &RecordId) -> Result<(), RemoteError>;
}

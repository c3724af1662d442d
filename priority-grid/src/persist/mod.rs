//! Write-back of priority changes
//!
//! Reorders produce [`PersistenceRequest`]s; a [`WriteDispatcher`] hands each
//! one to the host's [`RecordWriter`] as an independent background task and
//! never waits for, retries or rolls back any of them.

mod dispatch;
mod limiter;
mod memory;
mod request;

pub use dispatch::*;
pub use limiter::*;
pub use memory::*;
pub use request::*;

use async_trait::async_trait;

use crate::error::WriteError;
use crate::model::Record;
use crate::model::RecordReference;

/// The host's write API.
///
/// `changes` is a partial record holding only the fields to update.
///
/// # Example
///
/// ```ignore
/// use priority_grid::persist::RecordWriter;
///
/// struct WebApiWriter { client: DataverseClient }
///
/// #[async_trait]
/// impl RecordWriter for WebApiWriter {
///     async fn update_record(&self, reference: &RecordReference, changes: Record) -> Result<(), WriteError> {
///         self.client
///             .update(Entity::set(&reference.entity_collection), reference.id.parse()?, changes)
///             .await
///             .map_err(|e| WriteError::rejected(reference.clone(), e.to_string()))
///     }
/// }
/// ```
#[async_trait]
pub trait RecordWriter: Send + Sync {
    /// Applies a partial update to one record.
    async fn update_record(
        &self,
        reference: &RecordReference,
        changes: Record,
    ) -> Result<(), WriteError>;
}

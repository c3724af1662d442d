//! Errors raised by the host write API

use crate::model::RecordReference;

/// Error returned when a priority update could not be applied by the host.
///
/// The grid never acts on these; they are surfaced to whoever settles a
/// [`Dispatched`](crate::persist::Dispatched) batch and are otherwise only logged.
#[derive(Debug, Clone, thiserror::Error)]
pub enum WriteError {
    /// The host refused the update.
    #[error("Update of {reference} rejected: {message}")]
    Rejected {
        reference: RecordReference,
        message: String,
    },

    /// The target record no longer exists in the host store.
    #[error("Record {reference} not found")]
    NotFound { reference: RecordReference },

    /// The dispatcher's concurrency limiter was closed before the write started.
    #[error("Write dispatcher closed")]
    Closed,

    /// The spawned write task panicked or was cancelled.
    #[error("Write task failed: {0}")]
    Task(String),
}

impl WriteError {
    /// Creates a new rejection error.
    pub fn rejected(reference: RecordReference, message: impl Into<String>) -> Self {
        Self::Rejected {
            reference,
            message: message.into(),
        }
    }

    /// Creates a new not found error.
    pub fn not_found(reference: RecordReference) -> Self {
        Self::NotFound { reference }
    }
}

//! Errors raised while loading a dataset snapshot

/// Error loading a [`DatasetSnapshot`](crate::source::DatasetSnapshot) from an
/// OData collection payload.
#[derive(Debug, thiserror::Error)]
pub enum SnapshotError {
    /// The payload is not valid JSON or a record could not be decoded.
    #[error("Invalid snapshot JSON: {0}")]
    Json(#[from] serde_json::Error),

    /// The payload has no `value` array.
    #[error("Snapshot payload has no 'value' collection")]
    MissingCollection,

    /// A record has no usable primary key.
    #[error("Record {index} has no primary key '{primary_key}'")]
    MissingPrimaryKey { index: usize, primary_key: String },
}

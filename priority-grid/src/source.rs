//! Host-side collaborator contracts
//!
//! The grid never owns host data. It reads records through [`SourceRecord`]
//! and whole datasets through [`Dataset`]; [`DatasetSnapshot`] is the owned
//! implementation used by the in-memory store and the CLI.

use crate::error::FieldError;
use crate::error::SnapshotError;
use crate::model::Column;
use crate::model::Record;
use crate::model::RecordReference;
use crate::model::Value;

/// Read access to one host record.
///
/// Accessors may fail; the projection degrades every failure to an empty
/// display string instead of propagating it.
pub trait SourceRecord {
    /// Raw value of a field (`Value::Null` when the host has none).
    fn value(&self, field: &str) -> Result<Value, FieldError>;

    /// Host-formatted display value of a field, if the host provides one.
    fn formatted_value(&self, field: &str) -> Result<Option<String>, FieldError>;

    /// Write-back handle of the record.
    fn reference(&self) -> Result<RecordReference, FieldError>;
}

/// A host dataset: records, columns and a refresh token.
pub trait Dataset {
    type Record: SourceRecord;

    /// Records in host order.
    fn records(&self) -> &[Self::Record];

    /// Columns to display.
    fn columns(&self) -> &[Column];

    /// Monotonically increasing version, bumped whenever the host refreshes.
    fn version(&self) -> u64;

    /// The host's own current ordering, when it provides one.
    fn sorted_record_ids(&self) -> Option<&[String]> {
        None
    }
}

/// A [`Record`] bound to the entity set it is written back through.
#[derive(Debug, Clone, PartialEq)]
pub struct HostRecord {
    pub entity_set: String,
    pub record: Record,
}

impl HostRecord {
    /// Binds a record to an entity set.
    pub fn new(entity_set: impl Into<String>, record: Record) -> Self {
        Self {
            entity_set: entity_set.into(),
            record,
        }
    }
}

impl SourceRecord for HostRecord {
    fn value(&self, field: &str) -> Result<Value, FieldError> {
        self.record
            .get(field)
            .cloned()
            .ok_or_else(|| FieldError::missing(field))
    }

    fn formatted_value(&self, field: &str) -> Result<Option<String>, FieldError> {
        Ok(self.record.get_formatted(field).map(str::to_string))
    }

    fn reference(&self) -> Result<RecordReference, FieldError> {
        let id = self.record.id().ok_or_else(|| FieldError::missing("id"))?;
        Ok(RecordReference::new(&self.entity_set, id.to_string()))
    }
}

/// An owned dataset captured at one version.
///
/// # Example
///
/// ```
/// use priority_grid::model::Column;
/// use priority_grid::source::{Dataset, DatasetSnapshot};
///
/// let payload = r#"{"value": [
///     {"taskid": "6f9619ff-8b86-d011-b42d-00c04fc964ff", "name": "Draft", "sort_order": 1}
/// ]}"#;
///
/// let snapshot = DatasetSnapshot::from_odata(payload, "tasks", "taskid")
///     .unwrap()
///     .with_columns(vec![Column::new("name", "Name")])
///     .with_version(7);
///
/// assert_eq!(snapshot.records().len(), 1);
/// assert_eq!(snapshot.version(), 7);
/// ```
#[derive(Debug, Clone, Default, PartialEq)]
pub struct DatasetSnapshot {
    records: Vec<HostRecord>,
    columns: Vec<Column>,
    version: u64,
    sorted_record_ids: Option<Vec<String>>,
}

impl DatasetSnapshot {
    /// Creates a snapshot from records and columns at version 0.
    pub fn new(records: Vec<HostRecord>, columns: Vec<Column>) -> Self {
        Self {
            records,
            columns,
            version: 0,
            sorted_record_ids: None,
        }
    }

    /// Loads the records of an OData collection response (`{"value": [...]}`).
    ///
    /// Every record takes its id from the `primary_key` attribute and is
    /// bound to `entity_set` for write-back.
    pub fn from_odata(
        payload: &str,
        entity_set: &str,
        primary_key: &str,
    ) -> Result<Self, SnapshotError> {
        let mut body: serde_json::Value = serde_json::from_str(payload)?;
        let serde_json::Value::Array(items) = body
            .get_mut("value")
            .map(serde_json::Value::take)
            .ok_or(SnapshotError::MissingCollection)?
        else {
            return Err(SnapshotError::MissingCollection);
        };

        let mut records = Vec::with_capacity(items.len());
        for (index, item) in items.into_iter().enumerate() {
            let mut record: Record = serde_json::from_value(item)?;
            let id = record
                .get_guid(primary_key)
                .ok()
                .flatten()
                .ok_or_else(|| SnapshotError::MissingPrimaryKey {
                    index,
                    primary_key: primary_key.to_string(),
                })?;
            record.set_id(id);
            records.push(HostRecord::new(entity_set, record));
        }

        Ok(Self::new(records, Vec::new()))
    }

    /// Sets the columns.
    pub fn with_columns(mut self, columns: Vec<Column>) -> Self {
        self.columns = columns;
        self
    }

    /// Sets the version token.
    pub fn with_version(mut self, version: u64) -> Self {
        self.version = version;
        self
    }

    /// Sets the host's own record ordering.
    pub fn with_sorted_record_ids(mut self, ids: Vec<String>) -> Self {
        self.sorted_record_ids = Some(ids);
        self
    }

    /// Consumes the snapshot, returning its records.
    pub fn into_records(self) -> Vec<HostRecord> {
        self.records
    }
}

impl Dataset for DatasetSnapshot {
    type Record = HostRecord;

    fn records(&self) -> &[HostRecord] {
        &self.records
    }

    fn columns(&self) -> &[Column] {
        &self.columns
    }

    fn version(&self) -> u64 {
        self.version
    }

    fn sorted_record_ids(&self) -> Option<&[String]> {
        self.sorted_record_ids.as_deref()
    }
}

//! Dynamic host record

use std::collections::HashMap;

use uuid::Uuid;

use super::Value;
use crate::error::FieldError;

/// A dynamic record as handed over by the host.
///
/// Records hold raw field values plus the host's formatted display values.
/// The grid only reads them; writes go through a
/// [`RecordWriter`](crate::persist::RecordWriter) as partial update records.
/// The entity set a record belongs to lives next to it in a
/// [`HostRecord`](crate::source::HostRecord).
///
/// # Example
///
/// ```
/// use priority_grid::model::Record;
///
/// let mut record = Record::new()
///     .set("name", "Ship it")
///     .set("sort_order", 2);
/// record.set_formatted("sort_order", "2");
///
/// assert_eq!(record.get_long("sort_order").unwrap(), Some(2));
/// assert_eq!(record.get_formatted("sort_order"), Some("2"));
/// ```
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Record {
    /// The unique identifier of the record.
    pub(crate) id: Option<Uuid>,

    /// The field values.
    pub(crate) fields: HashMap<String, Value>,

    /// Formatted display values (from @OData.Community.Display.V1.FormattedValue).
    pub(crate) formatted_values: HashMap<String, String>,
}

impl Record {
    /// Creates a new empty record.
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a new record with the given ID.
    pub fn with_id(id: Uuid) -> Self {
        Self {
            id: Some(id),
            ..Self::default()
        }
    }

    /// Returns the record ID, if set.
    pub fn id(&self) -> Option<Uuid> {
        self.id
    }

    /// Sets the record ID.
    pub fn set_id(&mut self, id: Uuid) {
        self.id = Some(id);
    }

    /// Returns a reference to the field value, if it exists.
    pub fn get(&self, field: &str) -> Option<&Value> {
        self.fields.get(field)
    }

    /// Returns the formatted value for a field, if available.
    pub fn get_formatted(&self, field: &str) -> Option<&str> {
        self.formatted_values.get(field).map(|s| s.as_str())
    }

    // =========================================================================
    // Setters
    // =========================================================================

    /// Sets a field value (builder pattern).
    pub fn set(mut self, field: impl Into<String>, value: impl Into<Value>) -> Self {
        self.fields.insert(field.into(), value.into());
        self
    }

    /// Sets a formatted value.
    pub fn set_formatted(&mut self, field: impl Into<String>, value: impl Into<String>) {
        self.formatted_values.insert(field.into(), value.into());
    }

    /// Merges the fields of a partial update into this record.
    ///
    /// Formatted values of the written fields are replaced by the raw
    /// display string, mirroring what the host shows until it re-reads
    /// the record.
    pub fn apply(&mut self, changes: &Record) {
        for (key, value) in &changes.fields {
            match value.display() {
                Some(display) => {
                    self.formatted_values.insert(key.clone(), display);
                }
                None => {
                    self.formatted_values.remove(key);
                }
            }
            self.fields.insert(key.clone(), value.clone());
        }
    }

    // =========================================================================
    // Typed getters
    //
    // Return Err if field is missing or wrong type.
    // Return Ok(None) only if the field exists and is Value::Null.
    // =========================================================================

    /// Gets an i64 field value.
    pub fn get_long(&self, field: &str) -> Result<Option<i64>, FieldError> {
        match self.fields.get(field) {
            None => Err(FieldError::missing(field)),
            Some(Value::Null) => Ok(None),
            Some(Value::Long(n)) => Ok(Some(*n)),
            Some(Value::Int(n)) => Ok(Some(i64::from(*n))), // Allow widening
            Some(other) => Err(FieldError::type_mismatch(field, "long", other.type_name())),
        }
    }

    /// Gets a UUID field value.
    pub fn get_guid(&self, field: &str) -> Result<Option<Uuid>, FieldError> {
        match self.fields.get(field) {
            None => Err(FieldError::missing(field)),
            Some(Value::Null) => Ok(None),
            Some(Value::Guid(g)) => Ok(Some(*g)),
            Some(other) => Err(FieldError::type_mismatch(field, "guid", other.type_name())),
        }
    }
}

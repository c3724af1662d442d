//! In-memory host store using DashMap

use std::sync::atomic::AtomicU64;
use std::sync::atomic::Ordering;

use async_trait::async_trait;
use dashmap::DashMap;
use log::debug;

use super::RecordWriter;
use crate::error::FieldError;
use crate::error::WriteError;
use crate::model::Column;
use crate::model::Record;
use crate::model::RecordReference;
use crate::source::Dataset;
use crate::source::DatasetSnapshot;
use crate::source::HostRecord;

#[derive(Debug, Clone)]
struct StoredRecord {
    /// Insertion sequence, the store's natural order.
    seq: u64,
    record: Record,
}

/// A host data store backed by a concurrent hash map.
///
/// Holds the records of one entity set, applies priority writes, and bumps
/// its version on every change so a grid can be refreshed from
/// [`snapshot`](Self::snapshot). Writes to selected records can be made to
/// fail.
///
/// # Example
///
/// ```
/// use priority_grid::model::{Column, Record};
/// use priority_grid::persist::InMemoryStore;
/// use uuid::Uuid;
///
/// let store = InMemoryStore::new("tasks", vec![Column::new("name", "Name")]);
/// store.insert(Record::with_id(Uuid::new_v4()).set("name", "Draft")).unwrap();
///
/// assert_eq!(store.len(), 1);
/// assert_eq!(store.version(), 1);
/// ```
#[derive(Debug)]
pub struct InMemoryStore {
    entity_set: String,
    columns: Vec<Column>,
    records: DashMap<String, StoredRecord>,
    failures: DashMap<String, String>,
    next_seq: AtomicU64,
    version: AtomicU64,
}

impl InMemoryStore {
    /// Creates an empty store for an entity set.
    pub fn new(entity_set: impl Into<String>, columns: Vec<Column>) -> Self {
        Self {
            entity_set: entity_set.into(),
            columns,
            records: DashMap::new(),
            failures: DashMap::new(),
            next_seq: AtomicU64::new(0),
            version: AtomicU64::new(0),
        }
    }

    /// Creates a store holding the records and columns of a snapshot.
    pub fn from_snapshot(entity_set: impl Into<String>, snapshot: DatasetSnapshot) -> Self {
        let store = Self::new(entity_set, snapshot.columns().to_vec());
        for HostRecord { record, .. } in snapshot.into_records() {
            if let Err(e) = store.insert(record) {
                debug!("Not storing record: {}", e);
            }
        }
        store
    }

    /// Inserts or replaces a record. The record must have an id.
    pub fn insert(&self, record: Record) -> Result<RecordReference, FieldError> {
        let id = record.id().ok_or_else(|| FieldError::missing("id"))?.to_string();
        let seq = self.next_seq.fetch_add(1, Ordering::SeqCst);
        let seq = self
            .records
            .get(&id)
            .map(|existing| existing.seq)
            .unwrap_or(seq);

        self.records.insert(id.clone(), StoredRecord { seq, record });
        self.bump();
        Ok(RecordReference::new(&self.entity_set, id))
    }

    /// Returns a copy of a record.
    pub fn get(&self, id: &str) -> Option<Record> {
        self.records.get(id).map(|stored| stored.record.clone())
    }

    /// Makes every write to `id` fail with `message`.
    pub fn fail_writes_for(&self, id: impl Into<String>, message: impl Into<String>) {
        self.failures.insert(id.into(), message.into());
    }

    /// Removes all injected write failures.
    pub fn clear_failures(&self) {
        self.failures.clear();
    }

    /// Returns the current version.
    pub fn version(&self) -> u64 {
        self.version.load(Ordering::SeqCst)
    }

    /// Returns the number of records.
    pub fn len(&self) -> usize {
        self.records.len()
    }

    /// Returns `true` if the store is empty.
    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Captures the current records, in insertion order, at the current version.
    pub fn snapshot(&self) -> DatasetSnapshot {
        let version = self.version();
        let mut stored: Vec<StoredRecord> = self
            .records
            .iter()
            .map(|entry| entry.value().clone())
            .collect();
        stored.sort_by_key(|s| s.seq);

        let records = stored
            .into_iter()
            .map(|s| HostRecord::new(&self.entity_set, s.record))
            .collect();
        DatasetSnapshot::new(records, self.columns.clone()).with_version(version)
    }

    fn bump(&self) {
        self.version.fetch_add(1, Ordering::SeqCst);
    }
}

#[async_trait]
impl RecordWriter for InMemoryStore {
    async fn update_record(
        &self,
        reference: &RecordReference,
        changes: Record,
    ) -> Result<(), WriteError> {
        if reference.entity_collection != self.entity_set {
            return Err(WriteError::not_found(reference.clone()));
        }
        if let Some(message) = self.failures.get(&reference.id) {
            return Err(WriteError::rejected(reference.clone(), message.value().clone()));
        }

        let mut stored = self
            .records
            .get_mut(&reference.id)
            .ok_or_else(|| WriteError::not_found(reference.clone()))?;
        stored.record.apply(&changes);
        drop(stored);

        self.bump();
        Ok(())
    }
}

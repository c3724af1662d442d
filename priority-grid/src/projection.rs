//! Projection of host records into display rows
//!
//! Pure functions: the same records and columns always yield the same rows.

use std::collections::HashMap;

use log::debug;
use log::warn;

use crate::config::GridConfig;
use crate::model::Column;
use crate::model::RecordReference;
use crate::model::Row;
use crate::source::Dataset;
use crate::source::SourceRecord;

/// How the host communicates the current record order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RecordOrdering {
    /// Ascending by a numeric priority field; missing values count as 0 and
    /// ties keep the host's relative order.
    Priority { field: String },

    /// The host's own id sequence, used verbatim.
    HostSorted(Vec<String>),
}

impl RecordOrdering {
    /// Orders by the given priority field.
    pub fn priority(field: impl Into<String>) -> Self {
        Self::Priority {
            field: field.into(),
        }
    }

    /// Picks the ordering a dataset supports: its sorted id sequence when it
    /// has one, the configured priority field otherwise.
    pub fn for_dataset<D: Dataset>(dataset: &D, config: &GridConfig) -> Self {
        match dataset.sorted_record_ids() {
            Some(ids) => Self::HostSorted(ids.to_vec()),
            None => Self::priority(&config.priority_field),
        }
    }
}

/// Builds the rows of a dataset using the ordering it supports.
pub fn build_dataset<D: Dataset>(dataset: &D, config: &GridConfig) -> Vec<Row> {
    let ordering = RecordOrdering::for_dataset(dataset, config);
    build(dataset.records(), dataset.columns(), &ordering)
}

/// Builds ordered display rows from host records.
///
/// Records without a resolvable reference cannot be written back and are
/// left out.
pub fn build<R: SourceRecord>(
    records: &[R],
    columns: &[Column],
    ordering: &RecordOrdering,
) -> Vec<Row> {
    let resolved: Vec<(RecordReference, &R)> = records
        .iter()
        .filter_map(|record| match record.reference() {
            Ok(reference) => Some((reference, record)),
            Err(e) => {
                warn!("Skipping record without reference: {}", e);
                None
            }
        })
        .collect();

    let ordered: Vec<(RecordReference, &R)> = match ordering {
        RecordOrdering::Priority { field } => {
            let mut keyed: Vec<(f64, RecordReference, &R)> = resolved
                .into_iter()
                .map(|(reference, record)| (priority_of(record, field), reference, record))
                .collect();
            // sort_by is stable, ties keep host order
            keyed.sort_by(|a, b| a.0.total_cmp(&b.0));
            keyed
                .into_iter()
                .map(|(_, reference, record)| (reference, record))
                .collect()
        }
        RecordOrdering::HostSorted(ids) => {
            let mut by_id: HashMap<String, (RecordReference, &R)> = resolved
                .into_iter()
                .map(|(reference, record)| (reference.id.clone(), (reference, record)))
                .collect();
            let ordered: Vec<_> = ids.iter().filter_map(|id| by_id.remove(id)).collect();
            if ordered.len() != ids.len() {
                debug!(
                    "Host order lists {} ids, {} matched a record",
                    ids.len(),
                    ordered.len()
                );
            }
            ordered
        }
    };

    ordered
        .into_iter()
        .map(|(reference, record)| project_row(reference, record, columns))
        .collect()
}

fn project_row<R: SourceRecord>(reference: RecordReference, record: &R, columns: &[Column]) -> Row {
    let mut row = Row::new(reference);
    for column in columns {
        row.fields
            .insert(column.key.clone(), display_value(record, &column.key));
    }
    row
}

/// Resolves the display string of a field.
///
/// Tries the formatted value, then the raw value, then gives `""`. Accessor
/// errors fall through to the next step.
pub fn display_value<R: SourceRecord>(record: &R, field: &str) -> String {
    if let Ok(Some(formatted)) = record.formatted_value(field) {
        return formatted;
    }
    record
        .value(field)
        .ok()
        .and_then(|value| value.display())
        .unwrap_or_default()
}

/// Numeric priority of a record; missing or non-numeric counts as 0.
fn priority_of<R: SourceRecord>(record: &R, field: &str) -> f64 {
    record
        .value(field)
        .ok()
        .and_then(|value| value.as_priority())
        .unwrap_or(0.0)
}

//! End-to-end tests driving the control against the in-memory store.

use std::sync::Arc;

use priority_grid::model::Column;
use priority_grid::model::Record;
use priority_grid::model::Value;
use priority_grid::persist::InMemoryStore;
use priority_grid::source::DatasetSnapshot;
use priority_grid::{DragHandler, GridConfig, PriorityControl, RenderOutput};
use uuid::Uuid;

fn task(n: u128, name: &str, sort_order: Option<i64>) -> Record {
    Record::with_id(Uuid::from_u128(n))
        .set("name", name)
        .set("sort_order", Value::from(sort_order))
}

fn store(tasks: Vec<Record>) -> Arc<InMemoryStore> {
    let store = InMemoryStore::new(
        "tasks",
        vec![Column::new("name", "Name"), Column::new("sort_order", "Order")],
    );
    for record in tasks {
        store.insert(record).unwrap();
    }
    Arc::new(store)
}

fn names(output: &RenderOutput) -> Vec<&str> {
    output.rows.iter().map(|r| r.field("name")).collect()
}

fn stored_order(store: &InMemoryStore, n: u128) -> Option<i64> {
    store
        .get(&Uuid::from_u128(n).to_string())
        .and_then(|r| r.get_long("sort_order").ok().flatten())
}

#[tokio::test]
async fn test_reorder_persists_dense_priorities() {
    let store = store(vec![
        task(1, "a", Some(3)),
        task(2, "b", Some(1)),
        task(3, "c", None),
        task(4, "d", Some(2)),
    ]);
    let mut control = PriorityControl::new(GridConfig::default(), store.clone());

    let output = control.on_init(&store.snapshot());
    assert_eq!(names(&output), vec!["c", "b", "d", "a"]);

    let summary = control.on_drag_end(0, Some(3)).settle().await;
    assert!(summary.is_success());
    assert_eq!(summary.succeeded, 4);

    // Optimistic local order
    let output = control.render();
    assert_eq!(names(&output), vec!["b", "d", "a", "c"]);
    let shown: Vec<&str> = output.rows.iter().map(|r| r.field("sort_order")).collect();
    assert_eq!(shown, vec!["1", "2", "3", "4"]);

    assert_eq!(stored_order(&store, 2), Some(1));
    assert_eq!(stored_order(&store, 4), Some(2));
    assert_eq!(stored_order(&store, 1), Some(3));
    assert_eq!(stored_order(&store, 3), Some(4));

    // The host refresh agrees with the local order
    let output = control.on_dataset_updated(&store.snapshot());
    assert_eq!(names(&output), vec!["b", "d", "a", "c"]);
}

#[tokio::test]
async fn test_noop_drags_write_nothing() {
    let store = store(vec![task(1, "a", Some(1)), task(2, "b", Some(2))]);
    let mut control = PriorityControl::new(GridConfig::default(), store.clone());
    control.on_init(&store.snapshot());
    let version = store.version();

    assert!(control.on_drag_end(1, Some(1)).is_empty());
    assert!(control.on_drag_end(1, None).is_empty());
    assert!(control.on_drag_end(0, Some(9)).is_empty());

    assert_eq!(store.version(), version);
    assert_eq!(names(&control.render()), vec!["a", "b"]);
}

#[tokio::test]
async fn test_failed_write_is_not_reverted_until_refresh() {
    let store = store(vec![
        task(1, "a", Some(1)),
        task(2, "b", Some(2)),
        task(3, "c", Some(3)),
    ]);
    store.fail_writes_for(Uuid::from_u128(3).to_string(), "record is locked");
    let mut control = PriorityControl::new(GridConfig::default(), store.clone());
    control.on_init(&store.snapshot());

    let summary = control.on_drag_end(2, Some(0)).settle().await;
    assert_eq!(summary.succeeded, 2);
    assert_eq!(summary.failed.len(), 1);

    // Local state keeps the optimistic order
    assert_eq!(names(&control.render()), vec!["c", "a", "b"]);

    // a=2, b=3, c kept 3; the refresh overwrites the local order
    let output = control.on_dataset_updated(&store.snapshot());
    assert_eq!(names(&output), vec!["a", "b", "c"]);
}

#[tokio::test]
async fn test_refresh_keeps_sort_and_search() {
    let store = store(vec![
        task(1, "Task one", Some(1)),
        task(2, "Chore", Some(2)),
        task(3, "task two", Some(3)),
    ]);
    let mut control = PriorityControl::new(GridConfig::default(), store.clone());
    control.on_init(&store.snapshot());
    control.on_column_click("name");
    control.on_column_click("name");
    let output = control.on_search("TASK");
    assert_eq!(names(&output), vec!["task two", "Task one"]);

    store.insert(task(4, "Task zero", Some(0))).unwrap();
    let output = control.on_dataset_updated(&store.snapshot());

    assert_eq!(names(&output), vec!["Task zero", "task two", "Task one"]);
}

#[tokio::test]
async fn test_odata_payload_with_host_order() {
    let payload = r#"{
        "value": [
            {
                "taskid": "00000000-0000-0000-0000-000000000001",
                "name": "Write docs",
                "sort_order": 2,
                "sort_order@OData.Community.Display.V1.FormattedValue": "2"
            },
            {
                "taskid": "00000000-0000-0000-0000-000000000002",
                "name": "Fix build",
                "sort_order": 1,
                "sort_order@OData.Community.Display.V1.FormattedValue": "1"
            }
        ]
    }"#;
    let columns = vec![Column::new("name", "Name"), Column::new("sort_order", "Order")];

    let by_priority = DatasetSnapshot::from_odata(payload, "tasks", "taskid")
        .unwrap()
        .with_columns(columns.clone())
        .with_version(1);
    let store = Arc::new(InMemoryStore::from_snapshot("tasks", by_priority.clone()));
    let mut control = PriorityControl::new(GridConfig::default(), store.clone());

    let output = control.on_init(&by_priority);
    assert_eq!(names(&output), vec!["Fix build", "Write docs"]);

    let host_sorted = by_priority
        .with_sorted_record_ids(vec![
            "00000000-0000-0000-0000-000000000001".to_string(),
            "00000000-0000-0000-0000-000000000002".to_string(),
        ])
        .with_version(2);
    let output = control.on_dataset_updated(&host_sorted);
    assert_eq!(names(&output), vec!["Write docs", "Fix build"]);

    let summary = control.on_drag_end(1, Some(0)).settle().await;
    assert!(summary.is_success());
    assert_eq!(stored_order(&store, 2), Some(1));
    assert_eq!(stored_order(&store, 1), Some(2));
}

//! Tests for the workspace and history stores.

use super::{HistoryStore, WorkspaceStore, HISTORY_LIMIT};
use crate::domain::WorkspaceConfig;
use crate::error::StoreError;
use std::io::Write;
use tempfile::TempDir;

fn sample(id: &str, name: &str) -> WorkspaceConfig {
    WorkspaceConfig {
        id: id.to_string(),
        name: name.to_string(),
        working_directory: "/tmp/proj".to_string(),
        model: Some("opus".to_string()),
        allowed_tools: vec!["Bash".to_string(), "Read".to_string()],
        ..WorkspaceConfig::default()
    }
}

#[test]
fn missing_file_reads_as_empty_store() {
    let tmp = TempDir::new().unwrap();
    let store = WorkspaceStore::open(tmp.path().join("workspaces.json")).unwrap();
    assert!(store.list().is_empty());
}

#[test]
fn upsert_then_get_round_trips_all_fields() {
    let tmp = TempDir::new().unwrap();
    let path = tmp.path().join("workspaces.json");

    let mut ws = sample("w1", "Project");
    ws.environment_variables
        .insert("RUST_LOG".to_string(), "debug".to_string());
    ws.debug_categories = vec!["api".to_string(), "hooks".to_string()];

    let mut store = WorkspaceStore::open(&path).unwrap();
    store.upsert(ws.clone()).unwrap();
    // createdAt is stamped on first insert.
    ws.created_at = store.get("w1").unwrap().created_at;
    assert!(ws.created_at.is_some());
    assert_eq!(store.get("w1").unwrap(), &ws);

    // And again through a fresh open, exercising the on-disk document.
    let reopened = WorkspaceStore::open(&path).unwrap();
    assert_eq!(reopened.get("w1").unwrap(), &ws);
}

#[test]
fn list_preserves_insertion_order() {
    let tmp = TempDir::new().unwrap();
    let mut store = WorkspaceStore::open(tmp.path().join("workspaces.json")).unwrap();

    for id in ["b", "a", "c"] {
        store.upsert(sample(id, id)).unwrap();
    }

    let ids: Vec<&str> = store.list().iter().map(|ws| ws.id.as_str()).collect();
    assert_eq!(ids, vec!["b", "a", "c"]);
}

#[test]
fn upsert_same_id_replaces_in_place() {
    let tmp = TempDir::new().unwrap();
    let mut store = WorkspaceStore::open(tmp.path().join("workspaces.json")).unwrap();

    store.upsert(sample("w1", "first")).unwrap();
    store.upsert(sample("w2", "other")).unwrap();
    let created = store.get("w1").unwrap().created_at;

    store.upsert(sample("w1", "second")).unwrap();

    assert_eq!(store.list().len(), 2);
    let ws = store.get("w1").unwrap();
    assert_eq!(ws.name, "second");
    // Position and creation stamp survive replacement.
    assert_eq!(store.list()[0].id, "w1");
    assert_eq!(ws.created_at, created);
}

#[test]
fn upsert_rejects_empty_id() {
    let tmp = TempDir::new().unwrap();
    let mut store = WorkspaceStore::open(tmp.path().join("workspaces.json")).unwrap();

    let err = store.upsert(sample("", "no id")).unwrap_err();
    assert!(matches!(err, StoreError::EmptyId));
    assert!(store.list().is_empty());
}

#[test]
fn delete_missing_id_is_not_found_and_idempotent_in_effect() {
    let tmp = TempDir::new().unwrap();
    let mut store = WorkspaceStore::open(tmp.path().join("workspaces.json")).unwrap();
    store.upsert(sample("w1", "Project")).unwrap();

    store.delete("w1").unwrap();
    let err = store.delete("w1").unwrap_err();
    assert!(matches!(err, StoreError::NotFound(id) if id == "w1"));
    assert!(store.list().is_empty());

    let err = store.delete("never-existed").unwrap_err();
    assert!(matches!(err, StoreError::NotFound(_)));
}

#[test]
fn corrupt_document_errors_without_rewriting_the_file() {
    let tmp = TempDir::new().unwrap();
    let path = tmp.path().join("workspaces.json");
    let mut f = std::fs::File::create(&path).unwrap();
    write!(f, "{{ not json").unwrap();

    let err = WorkspaceStore::open(&path).unwrap_err();
    assert!(matches!(err, StoreError::Corrupt { .. }));
    assert_eq!(std::fs::read_to_string(&path).unwrap(), "{ not json");
}

#[test]
fn duplicate_ids_in_a_hand_edited_document_are_rejected() {
    let tmp = TempDir::new().unwrap();
    let path = tmp.path().join("workspaces.json");

    let content =
        serde_json::to_string(&vec![sample("w1", "first"), sample("w1", "second")]).unwrap();
    std::fs::write(&path, &content).unwrap();

    let err = WorkspaceStore::open(&path).unwrap_err();
    assert!(matches!(err, StoreError::DuplicateId { id, .. } if id == "w1"));
    // The document is left as it was.
    assert_eq!(std::fs::read_to_string(&path).unwrap(), content);
}

#[test]
fn persisted_document_is_a_top_level_array() {
    let tmp = TempDir::new().unwrap();
    let path = tmp.path().join("workspaces.json");
    let mut store = WorkspaceStore::open(&path).unwrap();
    store.upsert(sample("w1", "Project")).unwrap();

    let value: serde_json::Value =
        serde_json::from_str(&std::fs::read_to_string(&path).unwrap()).unwrap();
    assert!(value.is_array());
    assert_eq!(value[0]["id"], "w1");
    assert_eq!(value[0]["workingDirectory"], "/tmp/proj");
    // No temp file is left behind after a successful write.
    assert!(!path.with_extension("json.tmp").exists());
}

#[test]
fn touch_usage_bumps_count_and_stamp() {
    let tmp = TempDir::new().unwrap();
    let mut store = WorkspaceStore::open(tmp.path().join("workspaces.json")).unwrap();
    store.upsert(sample("w1", "Project")).unwrap();

    store.touch_usage("w1").unwrap();
    store.touch_usage("w1").unwrap();

    let ws = store.get("w1").unwrap();
    assert_eq!(ws.use_count, 2);
    assert!(ws.last_used_at.is_some());

    let err = store.touch_usage("nope").unwrap_err();
    assert!(matches!(err, StoreError::NotFound(_)));
}

#[test]
fn history_is_newest_first_and_trimmed() {
    let tmp = TempDir::new().unwrap();
    let mut history = HistoryStore::open(tmp.path().join("history.json")).unwrap();

    for i in 0..(HISTORY_LIMIT + 5) {
        history
            .record_launch("w1", &format!("launch-{i}"), "/tmp/proj")
            .unwrap();
    }

    let recent = history.recent(HISTORY_LIMIT);
    assert_eq!(recent.len(), HISTORY_LIMIT);
    assert_eq!(recent[0].workspace_name, format!("launch-{}", HISTORY_LIMIT + 4));

    assert_eq!(history.recent(3).len(), 3);

    history.clear().unwrap();
    assert!(history.recent(HISTORY_LIMIT).is_empty());
}

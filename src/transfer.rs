//! Workspace import and export.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::domain::WorkspaceConfig;
use crate::error::StoreError;
use crate::store::WorkspaceStore;

pub const EXPORT_VERSION: u32 = 1;

/// Document produced by export and consumed by import.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ExportDocument {
    pub export_version: u32,
    pub export_date: DateTime<Utc>,
    pub workspaces: Vec<WorkspaceConfig>,
}

/// What to do when an imported id already exists in the store.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, clap::ValueEnum)]
pub enum ConflictPolicy {
    /// Leave the existing workspace untouched.
    #[default]
    Skip,
    /// Replace the existing workspace.
    Overwrite,
    /// Import under a fresh id with a suffixed name.
    Copy,
}

/// Per-id outcome of an import. The four lists are disjoint: a record lands
/// in exactly one of them.
#[derive(Debug, Default, PartialEq)]
pub struct ImportOutcome {
    /// Ids imported under their own id, new or overwritten.
    pub imported: Vec<String>,
    /// Conflicting ids left untouched under [`ConflictPolicy::Skip`].
    pub skipped: Vec<String>,
    /// Names of records that carried no id at all.
    pub invalid: Vec<String>,
    /// `(original id, fresh id)` pairs from [`ConflictPolicy::Copy`].
    pub copied: Vec<(String, String)>,
}

/// Export one workspace.
pub fn export_workspace(store: &WorkspaceStore, id: &str) -> Result<ExportDocument, StoreError> {
    let ws = store.get(id)?;
    Ok(ExportDocument {
        export_version: EXPORT_VERSION,
        export_date: Utc::now(),
        workspaces: vec![ws.clone()],
    })
}

/// Export every workspace.
pub fn export_all(store: &WorkspaceStore) -> ExportDocument {
    ExportDocument {
        export_version: EXPORT_VERSION,
        export_date: Utc::now(),
        workspaces: store.list().to_vec(),
    }
}

/// Import workspaces into the store under the given conflict policy.
///
/// Records without an id are reported as invalid rather than failing the
/// whole batch.
pub fn import(
    store: &mut WorkspaceStore,
    document: ExportDocument,
    policy: ConflictPolicy,
) -> Result<ImportOutcome, StoreError> {
    let mut outcome = ImportOutcome::default();

    for mut ws in document.workspaces {
        if ws.id.trim().is_empty() {
            outcome.invalid.push(ws.name);
            continue;
        }

        let mut was_copied = false;
        if store.get(&ws.id).is_ok() {
            match policy {
                ConflictPolicy::Skip => {
                    outcome.skipped.push(ws.id);
                    continue;
                }
                ConflictPolicy::Overwrite => {}
                ConflictPolicy::Copy => {
                    let original = ws.id.clone();
                    ws.id = uuid::Uuid::new_v4().to_string();
                    ws.name = copy_name(store, &ws.name);
                    outcome.copied.push((original, ws.id.clone()));
                    was_copied = true;
                }
            }
        }

        let id = ws.id.clone();
        store.upsert(ws)?;
        if !was_copied {
            outcome.imported.push(id);
        }
    }

    Ok(outcome)
}

/// First `name-N` not already taken by a stored workspace.
fn copy_name(store: &WorkspaceStore, name: &str) -> String {
    let mut counter = 1;
    loop {
        let candidate = format!("{name}-{counter}");
        if !store.list().iter().any(|ws| ws.name == candidate) {
            return candidate;
        }
        counter += 1;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn sample(id: &str, name: &str) -> WorkspaceConfig {
        WorkspaceConfig {
            id: id.to_string(),
            name: name.to_string(),
            working_directory: "/tmp/proj".to_string(),
            ..WorkspaceConfig::default()
        }
    }

    fn store_with(ids: &[(&str, &str)]) -> (TempDir, WorkspaceStore) {
        let tmp = TempDir::new().unwrap();
        let mut store = WorkspaceStore::open(tmp.path().join("workspaces.json")).unwrap();
        for (id, name) in ids {
            store.upsert(sample(id, name)).unwrap();
        }
        (tmp, store)
    }

    fn document(workspaces: Vec<WorkspaceConfig>) -> ExportDocument {
        ExportDocument {
            export_version: EXPORT_VERSION,
            export_date: Utc::now(),
            workspaces,
        }
    }

    #[test]
    fn export_one_and_all() {
        let (_tmp, store) = store_with(&[("w1", "one"), ("w2", "two")]);

        let one = export_workspace(&store, "w1").unwrap();
        assert_eq!(one.export_version, EXPORT_VERSION);
        assert_eq!(one.workspaces.len(), 1);
        assert_eq!(one.workspaces[0].id, "w1");

        let all = export_all(&store);
        assert_eq!(all.workspaces.len(), 2);

        assert!(matches!(
            export_workspace(&store, "nope"),
            Err(StoreError::NotFound(_))
        ));
    }

    #[test]
    fn skip_policy_keeps_existing_record() {
        let (_tmp, mut store) = store_with(&[("w1", "original")]);

        let outcome = import(
            &mut store,
            document(vec![sample("w1", "incoming"), sample("w2", "new")]),
            ConflictPolicy::Skip,
        )
        .unwrap();

        assert_eq!(outcome.skipped, vec!["w1"]);
        assert_eq!(outcome.imported, vec!["w2"]);
        assert_eq!(store.get("w1").unwrap().name, "original");
    }

    #[test]
    fn overwrite_policy_replaces_existing_record() {
        let (_tmp, mut store) = store_with(&[("w1", "original")]);

        let outcome = import(
            &mut store,
            document(vec![sample("w1", "incoming")]),
            ConflictPolicy::Overwrite,
        )
        .unwrap();

        assert_eq!(outcome.imported, vec!["w1"]);
        assert_eq!(store.get("w1").unwrap().name, "incoming");
    }

    #[test]
    fn copy_policy_mints_fresh_id_and_suffixed_name() {
        let (_tmp, mut store) = store_with(&[("w1", "proj"), ("w2", "proj-1")]);

        let outcome = import(
            &mut store,
            document(vec![sample("w1", "proj")]),
            ConflictPolicy::Copy,
        )
        .unwrap();

        assert_eq!(outcome.copied.len(), 1);
        let (original, fresh) = &outcome.copied[0];
        assert_eq!(original, "w1");
        assert_ne!(fresh, "w1");
        // A copy is reported once, not also under `imported`.
        assert!(outcome.imported.is_empty());

        // proj-1 is taken, so the copy lands on proj-2.
        assert_eq!(store.get(fresh).unwrap().name, "proj-2");
        assert_eq!(store.get("w1").unwrap().name, "proj");
        assert_eq!(store.list().len(), 3);
    }

    #[test]
    fn records_without_ids_are_invalid_not_fatal() {
        let (_tmp, mut store) = store_with(&[]);

        let outcome = import(
            &mut store,
            document(vec![sample("", "anonymous"), sample("w1", "fine")]),
            ConflictPolicy::Skip,
        )
        .unwrap();

        assert_eq!(outcome.imported, vec!["w1"]);
        assert_eq!(outcome.invalid, vec!["anonymous"]);
        // Id-less records are not lumped in with id conflicts.
        assert!(outcome.skipped.is_empty());
    }
}

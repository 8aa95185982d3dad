//! Launch history, kept in its own file next to the workspaces document.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::path::PathBuf;
use tracing::debug;

use crate::error::StoreError;

/// Newest-first history is trimmed to this many entries.
pub const HISTORY_LIMIT: usize = 20;

/// One recorded launch.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct HistoryEntry {
    pub id: String,
    pub workspace_id: String,
    pub workspace_name: String,
    pub working_directory: String,
    pub launched_at: DateTime<Utc>,
}

/// Launch history store, newest entries first.
pub struct HistoryStore {
    path: PathBuf,
    entries: Vec<HistoryEntry>,
}

impl HistoryStore {
    pub fn open(path: impl Into<PathBuf>) -> Result<Self, StoreError> {
        let path = path.into();

        let entries = if path.exists() {
            let content = std::fs::read_to_string(&path).map_err(|source| StoreError::Io {
                path: path.clone(),
                source,
            })?;
            serde_json::from_str(&content).map_err(|source| StoreError::Corrupt {
                path: path.clone(),
                source,
            })?
        } else {
            Vec::new()
        };

        Ok(Self { path, entries })
    }

    /// Up to `limit` most recent launches.
    pub fn recent(&self, limit: usize) -> &[HistoryEntry] {
        &self.entries[..self.entries.len().min(limit)]
    }

    /// Prepend a launch and trim to [`HISTORY_LIMIT`].
    pub fn record_launch(
        &mut self,
        workspace_id: &str,
        workspace_name: &str,
        working_directory: &str,
    ) -> Result<(), StoreError> {
        let entry = HistoryEntry {
            id: uuid::Uuid::new_v4().to_string()[..8].to_string(),
            workspace_id: workspace_id.to_string(),
            workspace_name: workspace_name.to_string(),
            working_directory: working_directory.to_string(),
            launched_at: Utc::now(),
        };

        debug!(workspace = %workspace_name, "recording launch");
        self.entries.insert(0, entry);
        self.entries.truncate(HISTORY_LIMIT);
        self.persist()
    }

    pub fn clear(&mut self) -> Result<(), StoreError> {
        self.entries.clear();
        self.persist()
    }

    fn persist(&self) -> Result<(), StoreError> {
        let content = serde_json::to_string_pretty(&self.entries).map_err(|source| {
            StoreError::Corrupt {
                path: self.path.clone(),
                source,
            }
        })?;
        super::write_atomic(&self.path, content.as_bytes())
    }
}

//! Persistence for workspace records.
//!
//! The backing document is a single JSON array of workspaces in insertion
//! order. Every mutation rewrites the whole document through a temp file in
//! the same directory followed by a rename, so a crash mid-write never
//! leaves a half-written file behind. Single process, single writer; no
//! locking.

mod history;
#[cfg(test)]
mod tests;

pub use history::{HistoryEntry, HistoryStore, HISTORY_LIMIT};

use chrono::Utc;
use std::path::{Path, PathBuf};
use tracing::{debug, info, warn};

use crate::domain::WorkspaceConfig;
use crate::error::StoreError;

/// Workspace store backed by a JSON document.
///
/// Holds the record list in memory between calls; `open` reads the document
/// once and every mutating call persists it in full.
#[derive(Debug)]
pub struct WorkspaceStore {
    path: PathBuf,
    workspaces: Vec<WorkspaceConfig>,
}

impl WorkspaceStore {
    /// Open the store at `path`, loading the existing document if present.
    ///
    /// A missing file reads as an empty store. An unparseable file, or one
    /// that repeats an id (hand-edits are the only way that happens), is an
    /// error; the document is never reset or rewritten in that case.
    pub fn open(path: impl Into<PathBuf>) -> Result<Self, StoreError> {
        let path = path.into();

        let workspaces: Vec<WorkspaceConfig> = if path.exists() {
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

        {
            let mut seen = std::collections::HashSet::new();
            for ws in &workspaces {
                if !seen.insert(ws.id.as_str()) {
                    return Err(StoreError::DuplicateId {
                        path: path.clone(),
                        id: ws.id.clone(),
                    });
                }
            }
        }

        debug!(path = %path.display(), count = workspaces.len(), "workspace store opened");

        Ok(Self { path, workspaces })
    }

    /// All workspaces, in insertion order.
    pub fn list(&self) -> &[WorkspaceConfig] {
        &self.workspaces
    }

    /// Look up one workspace by id.
    pub fn get(&self, id: &str) -> Result<&WorkspaceConfig, StoreError> {
        self.workspaces
            .iter()
            .find(|ws| ws.id == id)
            .ok_or_else(|| StoreError::NotFound(id.to_string()))
    }

    /// Create or fully replace a workspace, then persist.
    ///
    /// A new record keeps its position at the end of the document; replacing
    /// an existing id keeps its original position. `createdAt` is stamped on
    /// first insert and preserved across replacements.
    pub fn upsert(&mut self, mut record: WorkspaceConfig) -> Result<(), StoreError> {
        if record.id.trim().is_empty() {
            return Err(StoreError::EmptyId);
        }

        match self.workspaces.iter_mut().find(|ws| ws.id == record.id) {
            Some(existing) => {
                record.created_at = existing.created_at.or(record.created_at);
                info!(id = %record.id, name = %record.name, "workspace updated");
                *existing = record;
            }
            None => {
                if record.created_at.is_none() {
                    record.created_at = Some(Utc::now());
                }
                info!(id = %record.id, name = %record.name, "workspace created");
                self.workspaces.push(record);
            }
        }

        self.persist()
    }

    /// Remove a workspace by id, returning the removed record.
    pub fn delete(&mut self, id: &str) -> Result<WorkspaceConfig, StoreError> {
        let pos = self
            .workspaces
            .iter()
            .position(|ws| ws.id == id)
            .ok_or_else(|| StoreError::NotFound(id.to_string()))?;

        let removed = self.workspaces.remove(pos);
        self.persist()?;
        info!(id = %id, name = %removed.name, "workspace deleted");
        Ok(removed)
    }

    /// Record a launch: bump `useCount` and stamp `lastUsedAt`.
    pub fn touch_usage(&mut self, id: &str) -> Result<(), StoreError> {
        let ws = self
            .workspaces
            .iter_mut()
            .find(|ws| ws.id == id)
            .ok_or_else(|| StoreError::NotFound(id.to_string()))?;

        ws.last_used_at = Some(Utc::now());
        ws.use_count += 1;
        self.persist()
    }

    fn persist(&self) -> Result<(), StoreError> {
        let content = serde_json::to_string_pretty(&self.workspaces).map_err(|source| {
            StoreError::Corrupt {
                path: self.path.clone(),
                source,
            }
        })?;
        write_atomic(&self.path, content.as_bytes())
    }
}

/// Write `bytes` to `path` via a temp file in the same directory and an
/// atomic rename. Also used by the history and template stores.
pub(crate) fn write_atomic(path: &Path, bytes: &[u8]) -> Result<(), StoreError> {
    let tmp = path.with_extension("json.tmp");

    let io_err = |source| StoreError::Io {
        path: path.to_path_buf(),
        source,
    };

    std::fs::write(&tmp, bytes).map_err(io_err)?;
    if let Err(source) = std::fs::rename(&tmp, path) {
        // Leave no stray temp file behind on failure.
        if let Err(e) = std::fs::remove_file(&tmp) {
            warn!(tmp = %tmp.display(), error = %e, "failed to clean up temp file");
        }
        return Err(io_err(source));
    }
    Ok(())
}

//! Error taxonomy for the store and the launch dispatcher.
//!
//! Validation failures are not errors in this sense: the composer returns
//! them as a structured list so the caller can show every problem at once.

use std::path::PathBuf;
use thiserror::Error;

/// Failures of the workspace store.
#[derive(Debug, Error)]
pub enum StoreError {
    #[error("workspace not found: {0}")]
    NotFound(String),

    #[error("workspace id must not be empty")]
    EmptyId,

    #[error("failed to read or write {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("{path} is not a valid workspaces document: {source}")]
    Corrupt {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    #[error("{path} contains workspace id `{id}` more than once")]
    DuplicateId { path: PathBuf, id: String },
}

/// Failures of the launch dispatcher.
#[derive(Debug, Error)]
pub enum LaunchError {
    #[error("working directory does not exist: {0}")]
    DirectoryNotFound(PathBuf),

    #[error(
        "no supported terminal emulator found; install one of gnome-terminal, \
         konsole, xfce4-terminal or xterm"
    )]
    NoTerminalAvailable,

    #[error("editor command `{0}` is not on PATH; is the IDE installed?")]
    IdeNotAvailable(&'static str),

    #[error("failed to write launch script {path}: {source}")]
    Script {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to start {what}: {source}")]
    Spawn {
        what: String,
        #[source]
        source: std::io::Error,
    },
}

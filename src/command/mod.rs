//! CLI subcommand handlers.

mod delete;
mod export;
mod history;
mod import;
mod launch;
mod list;
mod new;
mod preview;
mod show;
mod templates;

pub use delete::run_delete;
pub use export::run_export;
pub use history::run_history;
pub use import::run_import;
pub use launch::run_launch;
pub use list::run_list;
pub use new::run_new;
pub use preview::run_preview;
pub use show::run_show;
pub use templates::{run_templates, run_templates_delete, run_templates_save};

use anyhow::{bail, Context, Result};
use std::path::Path;

use crate::cli;
use crate::domain::WorkspaceConfig;
use crate::store::WorkspaceStore;

fn open_store(config_dir: &Path) -> Result<WorkspaceStore> {
    WorkspaceStore::open(cli::workspaces_path(config_dir))
        .context("failed to open the workspace store")
}

/// Find a workspace by id, or by exact name when that is unambiguous.
fn resolve<'a>(store: &'a WorkspaceStore, id_or_name: &str) -> Result<&'a WorkspaceConfig> {
    if let Ok(ws) = store.get(id_or_name) {
        return Ok(ws);
    }

    let matches: Vec<&WorkspaceConfig> = store
        .list()
        .iter()
        .filter(|ws| ws.name == id_or_name)
        .collect();

    match matches.as_slice() {
        [ws] => Ok(ws),
        [] => bail!("no workspace with id or name `{id_or_name}`; try `ccw list`"),
        many => bail!(
            "name `{id_or_name}` is ambiguous; use one of the ids: {}",
            many.iter()
                .map(|ws| ws.id.as_str())
                .collect::<Vec<_>>()
                .join(", ")
        ),
    }
}

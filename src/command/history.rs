use anyhow::Result;
use std::path::Path;

use crate::cli;
use crate::store::{HistoryStore, HISTORY_LIMIT};

pub async fn run_history(config_dir: &Path, clear: bool, limit: usize) -> Result<()> {
    let mut history = HistoryStore::open(cli::history_path(config_dir))?;

    if clear {
        history.clear()?;
        println!("✅ Launch history cleared");
        return Ok(());
    }

    let recent = history.recent(limit.min(HISTORY_LIMIT));
    if recent.is_empty() {
        println!("No launches recorded yet.");
        return Ok(());
    }

    for entry in recent {
        println!(
            "{}  {:<20} {}",
            entry.launched_at.format("%Y-%m-%d %H:%M:%S"),
            entry.workspace_name,
            entry.working_directory
        );
    }

    Ok(())
}

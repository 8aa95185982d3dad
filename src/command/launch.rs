use anyhow::Result;
use std::path::Path;

use crate::cli;
use crate::compose;
use crate::launch;
use crate::store::HistoryStore;

pub async fn run_launch(config_dir: &Path, id_or_name: &str) -> Result<()> {
    let mut store = super::open_store(config_dir)?;
    let ws = super::resolve(&store, id_or_name)?.clone();

    let cmd = match compose::compose(&ws) {
        Ok(cmd) => cmd,
        Err(issues) => {
            eprintln!("Workspace `{}` does not validate:", ws.name);
            for issue in &issues {
                eprintln!("  - {issue}");
            }
            anyhow::bail!("not launching; fix the fields above first");
        }
    };

    let working_dir = launch::launch(&ws, &cmd, config_dir).await?;

    // Bookkeeping only after the spawn succeeded.
    store.touch_usage(&ws.id)?;
    let mut history = HistoryStore::open(cli::history_path(config_dir))?;
    history.record_launch(&ws.id, &ws.name, &working_dir.to_string_lossy())?;

    println!(
        "🚀 Launched `{}` in {}",
        ws.name,
        working_dir.display()
    );

    Ok(())
}

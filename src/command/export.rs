use anyhow::{Context, Result};
use std::path::Path;

use crate::transfer;

pub async fn run_export(
    config_dir: &Path,
    id_or_name: Option<&str>,
    output: Option<&Path>,
) -> Result<()> {
    let store = super::open_store(config_dir)?;

    let document = match id_or_name {
        Some(id_or_name) => {
            let id = super::resolve(&store, id_or_name)?.id.clone();
            transfer::export_workspace(&store, &id)?
        }
        None => transfer::export_all(&store),
    };

    let json = serde_json::to_string_pretty(&document).context("failed to render export")?;

    match output {
        Some(path) => {
            std::fs::write(path, &json)
                .with_context(|| format!("failed to write {}", path.display()))?;
            println!(
                "✅ Exported {} workspace(s) to {}",
                document.workspaces.len(),
                path.display()
            );
        }
        None => println!("{json}"),
    }

    Ok(())
}

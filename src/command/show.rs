use anyhow::{Context, Result};
use std::path::Path;

pub async fn run_show(config_dir: &Path, id_or_name: &str) -> Result<()> {
    let store = super::open_store(config_dir)?;
    let ws = super::resolve(&store, id_or_name)?;

    let json = serde_json::to_string_pretty(ws).context("failed to render workspace")?;
    println!("{json}");

    Ok(())
}

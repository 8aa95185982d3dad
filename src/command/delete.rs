use anyhow::Result;
use std::path::Path;

pub async fn run_delete(config_dir: &Path, id_or_name: &str) -> Result<()> {
    let mut store = super::open_store(config_dir)?;
    let id = super::resolve(&store, id_or_name)?.id.clone();

    let removed = store.delete(&id)?;
    println!("✅ Deleted workspace `{}` ({})", removed.name, removed.id);

    Ok(())
}

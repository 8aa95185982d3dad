use anyhow::Result;
use std::path::Path;

pub async fn run_list(config_dir: &Path) -> Result<()> {
    let store = super::open_store(config_dir)?;

    if store.list().is_empty() {
        println!("No workspaces yet. Create one with `ccw new <name> --dir <path>`.");
        return Ok(());
    }

    println!("{:<38} {:<20} {:<10} {}", "ID", "NAME", "MODEL", "DIRECTORY");
    for ws in store.list() {
        println!(
            "{:<38} {:<20} {:<10} {}",
            ws.id,
            ws.name,
            ws.model.as_deref().unwrap_or("-"),
            ws.working_directory
        );
    }

    Ok(())
}

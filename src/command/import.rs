use anyhow::{Context, Result};
use std::path::Path;

use crate::transfer::{self, ConflictPolicy, ExportDocument};

pub async fn run_import(config_dir: &Path, file: &Path, policy: ConflictPolicy) -> Result<()> {
    let content = std::fs::read_to_string(file)
        .with_context(|| format!("failed to read {}", file.display()))?;
    let document: ExportDocument = serde_json::from_str(&content)
        .with_context(|| format!("{} is not a valid export document", file.display()))?;

    let mut store = super::open_store(config_dir)?;
    let outcome = transfer::import(&mut store, document, policy)?;

    println!(
        "✅ Imported {} workspace(s)",
        outcome.imported.len() + outcome.copied.len()
    );
    if !outcome.skipped.is_empty() {
        println!("   Skipped (id already present): {}", outcome.skipped.join(", "));
    }
    if !outcome.invalid.is_empty() {
        println!("   Skipped (record has no id): {}", outcome.invalid.join(", "));
    }
    for (original, fresh) in &outcome.copied {
        println!("   Copied {original} -> {fresh}");
    }

    Ok(())
}

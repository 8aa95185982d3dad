use anyhow::{bail, Result};
use std::path::Path;

use crate::cli;
use crate::compose;
use crate::domain::{WorkspaceConfig, BUILTIN_TOOLS};
use crate::templates::{instantiate, TemplateStore};

pub async fn run_new(
    config_dir: &Path,
    name: &str,
    dir: &str,
    template: Option<&str>,
    model: Option<&str>,
    description: Option<&str>,
    allow: Option<&str>,
) -> Result<()> {
    let mut store = super::open_store(config_dir)?;

    let mut ws = match template {
        Some(template_id) => {
            let templates = TemplateStore::open(cli::templates_path(config_dir))?;
            let Some(template) = templates.get(template_id) else {
                bail!(
                    "unknown template `{template_id}`; run `ccw templates` to see what exists"
                );
            };
            instantiate(template_id, &template, name, dir)
        }
        None => {
            let mut ws = WorkspaceConfig::new(name);
            ws.working_directory = dir.to_string();
            ws
        }
    };

    if let Some(model) = model {
        ws.model = Some(model.to_string());
    }
    if let Some(description) = description {
        ws.description = description.to_string();
    }
    if let Some(allow) = allow {
        ws.allowed_tools = allow
            .split(',')
            .map(str::trim)
            .filter(|t| !t.is_empty())
            .map(ToString::to_string)
            .collect();
        for tool in &ws.allowed_tools {
            if !BUILTIN_TOOLS.contains(&tool.as_str()) {
                println!("⚠️  `{tool}` is not a built-in Claude Code tool; allowing it anyway");
            }
        }
    }

    // Surface every problem now rather than at first launch.
    let issues = compose::validate(&ws);
    if !issues.is_empty() {
        eprintln!("Workspace has validation problems:");
        for issue in &issues {
            eprintln!("  - {issue}");
        }
        bail!("fix the fields above and try again");
    }

    let id = ws.id.clone();
    store.upsert(ws)?;

    println!("✅ Created workspace `{name}` ({id})");
    println!("   Launch it with `ccw launch {name}`");

    Ok(())
}

use anyhow::{bail, Result};
use std::path::Path;

use crate::cli;
use crate::templates::{builtin_templates, TemplateConfig, TemplateStore, WorkspaceTemplate};

pub async fn run_templates(config_dir: &Path) -> Result<()> {
    let store = TemplateStore::open(cli::templates_path(config_dir))?;

    println!("{:<18} {:<22} {:<8} {}", "ID", "NAME", "SOURCE", "DESCRIPTION");
    for (id, template) in store.all() {
        println!(
            "{:<18} {:<22} {:<8} {}",
            id,
            template.name,
            if template.builtin { "builtin" } else { "user" },
            template.description
        );
    }
    println!("\nCreate a workspace from one with `ccw new <name> --dir <path> --template <id>`.");

    Ok(())
}

/// Save a user-defined template under `id`.
pub async fn run_templates_save(
    config_dir: &Path,
    id: &str,
    name: &str,
    description: Option<&str>,
    model: Option<&str>,
    allow: Option<&str>,
    append_prompt: Option<&str>,
) -> Result<()> {
    if builtin_templates().contains_key(id) {
        bail!("`{id}` is a built-in template; pick another id");
    }

    let allowed_tools = allow
        .map(|allow| {
            allow
                .split(',')
                .map(str::trim)
                .filter(|t| !t.is_empty())
                .map(ToString::to_string)
                .collect()
        })
        .unwrap_or_default();

    let template = WorkspaceTemplate {
        name: name.to_string(),
        description: description.unwrap_or_default().to_string(),
        builtin: false,
        config: TemplateConfig {
            model: model.map(ToString::to_string),
            permission_mode: None,
            allowed_tools,
            system_prompt_append: append_prompt.map(ToString::to_string),
        },
    };

    let mut store = TemplateStore::open(cli::templates_path(config_dir))?;
    store.save_user_template(id, template)?;

    println!("✅ Saved template `{id}`");
    println!("   Use it with `ccw new <name> --dir <path> --template {id}`");

    Ok(())
}

/// Delete a user-defined template. Built-ins stay.
pub async fn run_templates_delete(config_dir: &Path, id: &str) -> Result<()> {
    if builtin_templates().contains_key(id) {
        bail!("`{id}` is a built-in template and cannot be deleted");
    }

    let mut store = TemplateStore::open(cli::templates_path(config_dir))?;
    if let Err(err) = store.delete_user_template(id) {
        match err {
            crate::error::StoreError::NotFound(_) => bail!("no user template `{id}`"),
            other => return Err(other.into()),
        }
    }

    println!("✅ Deleted template `{id}`");

    Ok(())
}

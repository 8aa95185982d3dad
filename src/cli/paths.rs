use anyhow::{Context, Result};
use std::path::{Path, PathBuf};

/// Resolve the configuration directory, creating it if needed.
///
/// Defaults to `~/.claude-workspaces`; an explicit override (from
/// `--config-dir` or tests) wins.
pub fn config_dir(override_dir: Option<&str>) -> Result<PathBuf> {
    let dir = match override_dir {
        Some(dir) => expand_tilde(dir),
        None => dirs::home_dir()
            .context("could not determine home directory")?
            .join(".claude-workspaces"),
    };

    std::fs::create_dir_all(&dir)
        .with_context(|| format!("failed to create config directory {}", dir.display()))?;

    Ok(dir)
}

pub fn workspaces_path(config_dir: &Path) -> PathBuf {
    config_dir.join("workspaces.json")
}

pub fn history_path(config_dir: &Path) -> PathBuf {
    config_dir.join("history.json")
}

pub fn templates_path(config_dir: &Path) -> PathBuf {
    config_dir.join("templates.json")
}

/// Where the generated launch script lands.
pub fn launch_script_path(config_dir: &Path) -> PathBuf {
    if cfg!(windows) {
        config_dir.join("launch.bat")
    } else {
        config_dir.join("launch.sh")
    }
}

/// Expand a leading `~` to the user's home directory.
pub fn expand_tilde(path: &str) -> PathBuf {
    if let Some(rest) = path.strip_prefix("~/") {
        if let Some(home) = dirs::home_dir() {
            return home.join(rest);
        }
    } else if path == "~" {
        if let Some(home) = dirs::home_dir() {
            return home;
        }
    }
    PathBuf::from(path)
}

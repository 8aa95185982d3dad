//! Launch dispatching.
//!
//! Takes a composed command plus the workspace's working directory and IDE
//! choice, renders the launch script, and starts the platform terminal (and
//! optionally the editor) as detached processes. Fire-and-forget: once the
//! child handles exist the dispatcher is done with them.

mod script;
mod terminal;

pub use terminal::{find_in_path, TerminalEmulator};

use std::path::{Path, PathBuf};
use tokio::process::Command;
use tracing::{debug, info};

use crate::cli::{expand_tilde, launch_script_path};
use crate::compose::ComposedCommand;
use crate::domain::WorkspaceConfig;
use crate::error::LaunchError;

/// Launch a workspace's composed command in a terminal window.
///
/// Preflight checks run before anything is spawned: a missing working
/// directory or editor binary aborts the launch with nothing started.
/// Returns the resolved working directory for history recording.
pub async fn launch(
    workspace: &WorkspaceConfig,
    command: &ComposedCommand,
    config_dir: &Path,
) -> Result<PathBuf, LaunchError> {
    let working_dir = expand_tilde(&workspace.working_directory);
    if !working_dir.is_dir() {
        return Err(LaunchError::DirectoryNotFound(working_dir));
    }

    // Resolve the editor before spawning anything, so a missing IDE fails
    // the whole launch instead of half of it happening.
    let editor = match workspace.ide_integration.editor_command() {
        Some(bin) => match find_in_path(bin) {
            Some(path) => Some(path),
            None => return Err(LaunchError::IdeNotAvailable(bin)),
        },
        None => None,
    };

    let script_path = write_launch_script(command, &working_dir, config_dir)?;

    if let Some(editor) = editor {
        spawn_detached(
            Command::new(&editor).arg(&working_dir),
            &editor.to_string_lossy(),
        )?;
        info!(editor = %editor.display(), dir = %working_dir.display(), "editor opened");
    }

    open_terminal(&script_path, &working_dir).await?;
    info!(workspace = %workspace.name, dir = %working_dir.display(), "workspace launched");

    Ok(working_dir)
}

/// Render the launch script into the config directory and mark it
/// executable.
fn write_launch_script(
    command: &ComposedCommand,
    working_dir: &Path,
    config_dir: &Path,
) -> Result<PathBuf, LaunchError> {
    let path = launch_script_path(config_dir);
    let content = if cfg!(windows) {
        script::render_batch(command, working_dir)
    } else {
        script::render_posix(command, working_dir)
    };

    let script_err = |source| LaunchError::Script {
        path: path.clone(),
        source,
    };

    std::fs::write(&path, content).map_err(script_err)?;

    #[cfg(unix)]
    {
        use std::os::unix::fs::PermissionsExt;
        std::fs::set_permissions(&path, std::fs::Permissions::from_mode(0o755))
            .map_err(script_err)?;
    }

    debug!(script = %path.display(), "launch script written");
    Ok(path)
}

#[cfg(target_os = "macos")]
async fn open_terminal(script_path: &Path, _working_dir: &Path) -> Result<(), LaunchError> {
    // The script cds itself; Terminal.app only needs to run it.
    let shell_cmd = format!("bash {}", shell_words::quote(&script_path.to_string_lossy()));
    let applescript = format!(
        "tell application \"Terminal\"\n    do script \"{}\"\n    activate\nend tell",
        applescript_escape(&shell_cmd)
    );

    spawn_detached(Command::new("osascript").arg("-e").arg(applescript), "osascript")
}

#[cfg(target_os = "macos")]
fn applescript_escape(s: &str) -> String {
    s.replace('\\', "\\\\").replace('"', "\\\"")
}

#[cfg(windows)]
async fn open_terminal(script_path: &Path, working_dir: &Path) -> Result<(), LaunchError> {
    spawn_detached(
        Command::new("cmd")
            .args(["/c", "start", "cmd", "/k"])
            .arg(script_path)
            .current_dir(working_dir),
        "cmd",
    )
}

#[cfg(all(unix, not(target_os = "macos")))]
async fn open_terminal(script_path: &Path, _working_dir: &Path) -> Result<(), LaunchError> {
    let emulator = terminal::detect()?;
    let argv = emulator.invocation(script_path);
    debug!(terminal = emulator.binary(), "terminal emulator selected");

    spawn_detached(Command::new(&argv[0]).args(&argv[1..]), emulator.binary())
}

/// Start a child and let go of the handle.
fn spawn_detached(command: &mut Command, what: &str) -> Result<(), LaunchError> {
    command
        .stdin(std::process::Stdio::null())
        .stdout(std::process::Stdio::null())
        .stderr(std::process::Stdio::null())
        .spawn()
        .map(drop)
        .map_err(|source| LaunchError::Spawn {
            what: what.to_string(),
            source,
        })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::compose::compose;
    use crate::domain::IdeIntegration;
    use tempfile::TempDir;

    fn workspace(dir: &str) -> WorkspaceConfig {
        WorkspaceConfig {
            id: "w1".to_string(),
            name: "proj".to_string(),
            working_directory: dir.to_string(),
            model: Some("opus".to_string()),
            ..WorkspaceConfig::default()
        }
    }

    #[tokio::test]
    async fn missing_working_directory_aborts_before_spawning() {
        let cfg = TempDir::new().unwrap();
        let ws = workspace("/does/not/exist");
        let cmd = compose(&ws).unwrap();

        let err = launch(&ws, &cmd, cfg.path()).await.unwrap_err();
        assert!(matches!(err, LaunchError::DirectoryNotFound(p) if p == Path::new("/does/not/exist")));
        // Nothing was spawned, so no script was rendered either.
        assert!(!launch_script_path(cfg.path()).exists());
    }

    #[tokio::test]
    async fn missing_editor_binary_aborts_the_launch() {
        let cfg = TempDir::new().unwrap();
        let dir = TempDir::new().unwrap();
        let mut ws = workspace(dir.path().to_str().unwrap());
        ws.ide_integration = IdeIntegration::Cursor;

        // Assumes the test host does not have the Cursor CLI installed.
        if find_in_path("cursor").is_none() {
            let cmd = compose(&ws).unwrap();
            let err = launch(&ws, &cmd, cfg.path()).await.unwrap_err();
            assert!(matches!(err, LaunchError::IdeNotAvailable("cursor")));
            assert!(!launch_script_path(cfg.path()).exists());
        }
    }

    #[test]
    fn launch_script_lands_in_config_dir_executable() {
        let cfg = TempDir::new().unwrap();
        let dir = TempDir::new().unwrap();
        let ws = workspace(dir.path().to_str().unwrap());
        let cmd = compose(&ws).unwrap();

        let path = write_launch_script(&cmd, dir.path(), cfg.path()).unwrap();
        let content = std::fs::read_to_string(&path).unwrap();
        assert!(content.contains("claude --model opus"));

        #[cfg(unix)]
        {
            use std::os::unix::fs::PermissionsExt;
            let mode = std::fs::metadata(&path).unwrap().permissions().mode();
            assert_eq!(mode & 0o755, 0o755);
        }
    }
}

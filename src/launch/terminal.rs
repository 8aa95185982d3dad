//! Terminal emulator detection.

use std::path::{Path, PathBuf};

use crate::error::LaunchError;

/// A Linux terminal emulator and how to hand it a command.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TerminalEmulator {
    GnomeTerminal,
    Konsole,
    Xfce4Terminal,
    Xterm,
}

impl TerminalEmulator {
    pub fn binary(&self) -> &'static str {
        match self {
            TerminalEmulator::GnomeTerminal => "gnome-terminal",
            TerminalEmulator::Konsole => "konsole",
            TerminalEmulator::Xfce4Terminal => "xfce4-terminal",
            TerminalEmulator::Xterm => "xterm",
        }
    }

    /// Full argv for running `script` in a window that stays open after the
    /// command finishes.
    pub fn invocation(&self, script: &Path) -> Vec<String> {
        let run = format!("bash {}; exec bash", shell_words::quote(&script.to_string_lossy()));
        match self {
            TerminalEmulator::GnomeTerminal => vec![
                "gnome-terminal".into(),
                "--".into(),
                "bash".into(),
                "-c".into(),
                run,
            ],
            TerminalEmulator::Konsole => {
                vec!["konsole".into(), "-e".into(), "bash".into(), "-c".into(), run]
            }
            TerminalEmulator::Xfce4Terminal => {
                vec!["xfce4-terminal".into(), "-e".into(), format!("bash -c {}", shell_words::quote(&run))]
            }
            TerminalEmulator::Xterm => {
                vec!["xterm".into(), "-e".into(), "bash".into(), "-c".into(), run]
            }
        }
    }
}

/// Detection chain, in preference order.
const CHAIN: &[TerminalEmulator] = &[
    TerminalEmulator::GnomeTerminal,
    TerminalEmulator::Konsole,
    TerminalEmulator::Xfce4Terminal,
    TerminalEmulator::Xterm,
];

/// Pick the first terminal emulator present on PATH.
pub fn detect() -> Result<TerminalEmulator, LaunchError> {
    CHAIN
        .iter()
        .copied()
        .find(|t| find_in_path(t.binary()).is_some())
        .ok_or(LaunchError::NoTerminalAvailable)
}

/// Locate an executable on PATH, like `which`.
pub fn find_in_path(binary: &str) -> Option<PathBuf> {
    let path_var = std::env::var_os("PATH")?;
    for dir in std::env::split_paths(&path_var) {
        let candidate = dir.join(binary);
        if is_executable(&candidate) {
            return Some(candidate);
        }
        if cfg!(windows) {
            let exe = dir.join(format!("{binary}.exe"));
            if exe.is_file() {
                return Some(exe);
            }
        }
    }
    None
}

#[cfg(unix)]
fn is_executable(path: &Path) -> bool {
    use std::os::unix::fs::PermissionsExt;
    path.metadata()
        .map(|m| m.is_file() && m.permissions().mode() & 0o111 != 0)
        .unwrap_or(false)
}

#[cfg(not(unix))]
fn is_executable(path: &Path) -> bool {
    path.is_file()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn find_in_path_locates_a_common_binary() {
        // `sh` exists on any unix worth testing on.
        #[cfg(unix)]
        assert!(find_in_path("sh").is_some());
        assert!(find_in_path("definitely-not-a-real-binary-xyz").is_none());
    }

    #[test]
    fn invocations_quote_the_script_path() {
        let script = Path::new("/tmp/dir with space/launch.sh");

        let argv = TerminalEmulator::GnomeTerminal.invocation(script);
        assert_eq!(argv[0], "gnome-terminal");
        assert!(argv.last().unwrap().contains("'/tmp/dir with space/launch.sh'"));

        let argv = TerminalEmulator::Xfce4Terminal.invocation(script);
        assert_eq!(argv[..2], ["xfce4-terminal", "-e"]);
        assert!(argv[2].starts_with("bash -c "));
    }
}

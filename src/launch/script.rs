//! Launch script rendering.
//!
//! The dispatcher never passes user text to a shell directly: the composed
//! tokens and environment are rendered into a script with every token
//! quoted, and the terminal emulator runs that script. All quoting in the
//! crate lives in this file.

use std::path::Path;

use crate::compose::ComposedCommand;

/// Render the POSIX launch script: cd, exports, then the command.
pub fn render_posix(command: &ComposedCommand, working_dir: &Path) -> String {
    let mut lines = vec!["#!/bin/bash".to_string(), String::new()];

    lines.push(format!(
        "cd {}",
        shell_words::quote(&working_dir.to_string_lossy())
    ));
    lines.push(String::new());

    if !command.env.is_empty() {
        lines.push("# Environment variables".to_string());
        for (name, value) in &command.env {
            lines.push(format!("export {}={}", name, shell_words::quote(value)));
        }
        lines.push(String::new());
    }

    let mut argv = vec![command.program.to_string()];
    argv.extend(command.args.iter().cloned());
    lines.push(shell_words::join(argv.iter().map(String::as_str)));
    lines.push(String::new());

    lines.join("\n")
}

/// Render the Windows batch equivalent.
pub fn render_batch(command: &ComposedCommand, working_dir: &Path) -> String {
    let mut lines = vec!["@echo off".to_string(), String::new()];

    lines.push(format!("cd /d \"{}\"", working_dir.display()));
    lines.push(String::new());

    if !command.env.is_empty() {
        for (name, value) in &command.env {
            lines.push(format!("set \"{name}={value}\""));
        }
        lines.push(String::new());
    }

    let mut argv = vec![command.program.to_string()];
    argv.extend(command.args.iter().cloned());
    let joined: Vec<String> = argv.iter().map(|t| batch_quote(t)).collect();
    lines.push(joined.join(" "));
    lines.push(String::new());

    lines.join("\r\n")
}

/// Quote one token for `cmd.exe`. Doubles embedded quotes.
fn batch_quote(token: &str) -> String {
    if token.is_empty() {
        return "\"\"".to_string();
    }
    if token.contains(' ') || token.contains('"') {
        format!("\"{}\"", token.replace('"', "\"\""))
    } else {
        token.to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::BTreeMap;
    use std::path::PathBuf;

    fn command(args: &[&str]) -> ComposedCommand {
        ComposedCommand {
            program: "claude",
            args: args.iter().map(ToString::to_string).collect(),
            env: BTreeMap::new(),
        }
    }

    #[test]
    fn posix_script_quotes_spaces_and_single_quotes() {
        let mut cmd = command(&["--append-system-prompt", "it's a test, isn't it"]);
        cmd.env
            .insert("API_BASE".to_string(), "http://localhost:1234/v1 beta".to_string());

        let script = render_posix(&cmd, &PathBuf::from("/tmp/my proj"));

        assert!(script.starts_with("#!/bin/bash"));
        assert!(script.contains("cd '/tmp/my proj'"));
        assert!(script.contains("export API_BASE='http://localhost:1234/v1 beta'"));
        // shell-words escapes the embedded single quotes.
        assert!(script.contains("--append-system-prompt"));
        assert!(!script.contains("it's a test, isn't it\n"));
    }

    #[test]
    fn posix_script_plain_tokens_stay_bare() {
        let script = render_posix(&command(&["--model", "opus"]), &PathBuf::from("/tmp/proj"));
        assert!(script.contains("claude --model opus"));
    }

    #[test]
    fn batch_quote_doubles_embedded_quotes() {
        assert_eq!(batch_quote("plain"), "plain");
        assert_eq!(batch_quote("has space"), "\"has space\"");
        assert_eq!(batch_quote("say \"hi\""), "\"say \"\"hi\"\"\"");
        assert_eq!(batch_quote(""), "\"\"");
    }

    #[test]
    fn batch_script_sets_env_and_cds() {
        let mut cmd = command(&["--verbose"]);
        cmd.env.insert("FOO".to_string(), "bar".to_string());

        let script = render_batch(&cmd, &PathBuf::from("C:\\work"));
        assert!(script.starts_with("@echo off"));
        assert!(script.contains("cd /d \"C:\\work\""));
        assert!(script.contains("set \"FOO=bar\""));
        assert!(script.contains("claude --verbose"));
    }
}

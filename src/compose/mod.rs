//! Command composition.
//!
//! `compose` is a pure, deterministic mapping from a workspace record to the
//! argv tokens of a `claude` invocation. Tokens stay structured all the way
//! to the dispatcher, which owns quoting; nothing here is ever joined into a
//! shell string. Environment variables ride alongside the tokens and are
//! applied to the child process by the dispatcher, never emitted as argv.

use regex::Regex;
use serde::Serialize;
use std::collections::BTreeMap;
use std::fmt;
use std::sync::OnceLock;

use crate::domain::{WorkspaceConfig, MODEL_ALIASES};

/// Program the composed tokens belong to.
pub const CLAUDE_BIN: &str = "claude";

/// One field-level validation failure, suitable for inline display next to
/// the offending form field.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ValidationIssue {
    pub field: &'static str,
    pub message: String,
}

impl fmt::Display for ValidationIssue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.field, self.message)
    }
}

/// A fully composed launch command: program, ordered argv tokens, and the
/// environment to apply to the child process.
#[derive(Debug, Clone, PartialEq)]
pub struct ComposedCommand {
    pub program: &'static str,
    pub args: Vec<String>,
    pub env: BTreeMap<String, String>,
}

fn env_name_pattern() -> &'static Regex {
    static PATTERN: OnceLock<Regex> = OnceLock::new();
    PATTERN.get_or_init(|| Regex::new(r"^[A-Za-z_][A-Za-z0-9_]*$").unwrap())
}

fn is_known_model(name: &str) -> bool {
    MODEL_ALIASES.contains(&name) || name.starts_with("claude-")
}

/// Check every invariant of a record and return all violations at once.
pub fn validate(ws: &WorkspaceConfig) -> Vec<ValidationIssue> {
    let mut issues = Vec::new();

    if ws.working_directory.trim().is_empty() {
        issues.push(ValidationIssue {
            field: "workingDirectory",
            message: "a working directory is required".to_string(),
        });
    }

    if ws.permission_mode.is_some() && ws.skip_permissions {
        issues.push(ValidationIssue {
            field: "permissionMode",
            message: "permissionMode and skipPermissions are mutually exclusive; unset one"
                .to_string(),
        });
    }

    let overlap: Vec<&str> = ws
        .allowed_tools
        .iter()
        .filter(|tool| ws.disallowed_tools.contains(tool))
        .map(String::as_str)
        .collect();
    if !overlap.is_empty() {
        issues.push(ValidationIssue {
            field: "allowedTools",
            message: format!(
                "tools cannot be both allowed and disallowed: {}",
                overlap.join(", ")
            ),
        });
    }

    if let Some(model) = ws.model.as_deref() {
        if !is_known_model(model) {
            issues.push(ValidationIssue {
                field: "model",
                message: format!(
                    "unknown model `{model}`; expected one of {} or a claude-* name",
                    MODEL_ALIASES.join(", ")
                ),
            });
        }
    }
    if let Some(model) = ws.fallback_model.as_deref() {
        if !is_known_model(model) {
            issues.push(ValidationIssue {
                field: "fallbackModel",
                message: format!(
                    "unknown model `{model}`; expected one of {} or a claude-* name",
                    MODEL_ALIASES.join(", ")
                ),
            });
        }
    }

    for name in ws.environment_variables.keys() {
        if !env_name_pattern().is_match(name) {
            issues.push(ValidationIssue {
                field: "environmentVariables",
                message: format!("`{name}` is not a valid environment variable name"),
            });
        }
    }

    issues
}

/// Map a valid record to its launch command.
///
/// Token order is a contract: model flags, permission flags, tool lists,
/// prompt/MCP flags, misc flags, directory flags. Absent fields emit
/// nothing; list fields become one comma-joined value token in input order.
pub fn compose(ws: &WorkspaceConfig) -> Result<ComposedCommand, Vec<ValidationIssue>> {
    let issues = validate(ws);
    if !issues.is_empty() {
        return Err(issues);
    }

    let mut args = Vec::new();

    if let Some(model) = &ws.model {
        args.push("--model".to_string());
        args.push(model.clone());
    }
    if let Some(model) = &ws.fallback_model {
        args.push("--fallback-model".to_string());
        args.push(model.clone());
    }

    if let Some(mode) = ws.permission_mode {
        args.push("--permission-mode".to_string());
        args.push(mode.as_str().to_string());
    }
    if ws.skip_permissions {
        args.push("--dangerously-skip-permissions".to_string());
    }

    if !ws.allowed_tools.is_empty() {
        args.push("--allowedTools".to_string());
        args.push(ws.allowed_tools.join(","));
    }
    if !ws.disallowed_tools.is_empty() {
        args.push("--disallowedTools".to_string());
        args.push(ws.disallowed_tools.join(","));
    }

    if let Some(text) = &ws.system_prompt_append {
        args.push("--append-system-prompt".to_string());
        args.push(text.clone());
    }
    if let Some(path) = &ws.system_prompt_file {
        args.push("--system-prompt-file".to_string());
        args.push(path.clone());
    }
    if let Some(path) = &ws.mcp_config_path {
        args.push("--mcp-config".to_string());
        args.push(path.clone());
    }
    if ws.strict_mcp_config {
        args.push("--strict-mcp-config".to_string());
    }

    if let Some(agent) = &ws.agent {
        args.push("--agent".to_string());
        args.push(agent.clone());
    }
    if ws.verbose {
        args.push("--verbose".to_string());
    }
    if !ws.debug_categories.is_empty() {
        args.push("--debug".to_string());
        args.push(ws.debug_categories.join(","));
    }

    if !ws.additional_dirs.is_empty() {
        args.push("--add-dir".to_string());
        args.push(ws.additional_dirs.join(","));
    }

    Ok(ComposedCommand {
        program: CLAUDE_BIN,
        args,
        env: ws.environment_variables.clone(),
    })
}

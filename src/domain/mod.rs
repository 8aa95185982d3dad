//! Domain types shared across modules.
//!
//! This module contains the workspace record and its enums, used by the
//! store, the command composer, and the launch dispatcher. Keeping them
//! here avoids circular dependencies between those modules.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Model aliases the Claude CLI accepts. Fully qualified `claude-*` names
/// are also valid and pass through unchanged.
pub const MODEL_ALIASES: &[&str] = &["sonnet", "opus", "haiku"];

/// Built-in tools of the Claude Code CLI, offered as choices for the
/// allowed/disallowed tool lists.
pub const BUILTIN_TOOLS: &[&str] = &[
    "Read", "Edit", "Write", "Bash", "Glob", "Grep", "LS", "Task", "WebFetch", "WebSearch",
    "TodoRead", "TodoWrite",
];

/// Permission mode passed through to `claude --permission-mode`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum PermissionMode {
    Default,
    Plan,
    AcceptEdits,
    BypassPermissions,
}

impl PermissionMode {
    /// Value token emitted after `--permission-mode`.
    pub fn as_str(&self) -> &'static str {
        match self {
            PermissionMode::Default => "default",
            PermissionMode::Plan => "plan",
            PermissionMode::AcceptEdits => "acceptEdits",
            PermissionMode::BypassPermissions => "bypassPermissions",
        }
    }
}

/// Which surface a launch opens in addition to the terminal.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum IdeIntegration {
    #[default]
    None,
    Vscode,
    Cursor,
    VscodeInsiders,
}

impl IdeIntegration {
    /// The editor's own CLI binary, if this variant has one.
    pub fn editor_command(&self) -> Option<&'static str> {
        match self {
            IdeIntegration::None => None,
            IdeIntegration::Vscode => Some("code"),
            IdeIntegration::Cursor => Some("cursor"),
            IdeIntegration::VscodeInsiders => Some("code-insiders"),
        }
    }
}

/// One persisted workspace: everything needed to launch the Claude CLI with
/// a particular directory, model, permission setup, and environment.
///
/// Serialized camelCase into the workspaces document. `id` is assigned at
/// creation and never changes; everything else is replaced wholesale on save.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct WorkspaceConfig {
    pub id: String,
    pub name: String,
    pub description: String,
    pub working_directory: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub model: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub fallback_model: Option<String>,
    pub skip_permissions: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub permission_mode: Option<PermissionMode>,
    pub allowed_tools: Vec<String>,
    pub disallowed_tools: Vec<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub system_prompt_append: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub system_prompt_file: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub mcp_config_path: Option<String>,
    pub strict_mcp_config: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub agent: Option<String>,
    pub verbose: bool,
    pub debug_categories: Vec<String>,
    pub additional_dirs: Vec<String>,
    pub environment_variables: BTreeMap<String, String>,
    pub ide_integration: IdeIntegration,

    // Usage metadata, maintained by the store.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub created_at: Option<DateTime<Utc>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub last_used_at: Option<DateTime<Utc>>,
    pub use_count: u64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub template_source: Option<String>,
}

impl Default for WorkspaceConfig {
    fn default() -> Self {
        Self {
            id: String::new(),
            name: String::new(),
            description: String::new(),
            working_directory: String::new(),
            model: None,
            fallback_model: None,
            skip_permissions: false,
            permission_mode: None,
            allowed_tools: Vec::new(),
            disallowed_tools: Vec::new(),
            system_prompt_append: None,
            system_prompt_file: None,
            mcp_config_path: None,
            strict_mcp_config: false,
            agent: None,
            verbose: false,
            debug_categories: Vec::new(),
            additional_dirs: Vec::new(),
            environment_variables: BTreeMap::new(),
            ide_integration: IdeIntegration::None,
            created_at: None,
            last_used_at: None,
            use_count: 0,
            template_source: None,
        }
    }
}

impl WorkspaceConfig {
    /// New empty workspace with a freshly generated id.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            id: uuid::Uuid::new_v4().to_string(),
            name: name.into(),
            created_at: Some(Utc::now()),
            ..Self::default()
        }
    }
}

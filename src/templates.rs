//! Workspace templates.
//!
//! Built-in templates ship in the binary; user-defined ones live in
//! `templates.json` next to the workspaces document. Instantiating a
//! template mints a fresh workspace with its own id.

use chrono::Utc;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::path::PathBuf;

use crate::domain::{PermissionMode, WorkspaceConfig};
use crate::error::StoreError;

/// The launch-relevant subset of a workspace a template can preset.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct TemplateConfig {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub model: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub permission_mode: Option<PermissionMode>,
    pub allowed_tools: Vec<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub system_prompt_append: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WorkspaceTemplate {
    pub name: String,
    pub description: String,
    #[serde(default)]
    pub builtin: bool,
    pub config: TemplateConfig,
}

fn tools(names: &[&str]) -> Vec<String> {
    names.iter().map(ToString::to_string).collect()
}

/// Templates compiled into the binary. Ids are stable; the UI and CLI refer
/// to templates by these keys.
pub fn builtin_templates() -> BTreeMap<String, WorkspaceTemplate> {
    let entries = [
        (
            "python-project",
            "Python Project",
            "Python development with best practices",
            Some("This is a Python project. Follow PEP 8 style guidelines and use type hints where appropriate."),
        ),
        (
            "nodejs-project",
            "Node.js Project",
            "Node.js/npm development setup",
            Some("This is a Node.js project using npm. Follow modern ES6+ conventions."),
        ),
        (
            "react-app",
            "React Application",
            "React frontend development",
            Some("This is a React application. Use functional components and hooks. Follow React best practices."),
        ),
        (
            "rust-project",
            "Rust Project",
            "Rust development with Cargo",
            Some("This is a Rust project using Cargo. Follow Rust idioms and ensure memory safety."),
        ),
        (
            "general",
            "General Purpose",
            "Basic workspace with common tools",
            None,
        ),
    ];

    entries
        .into_iter()
        .map(|(id, name, description, prompt)| {
            let mut allowed = tools(&["Read", "Edit", "Write", "Bash", "Glob", "Grep"]);
            if id == "react-app" {
                allowed.push("WebFetch".to_string());
            }
            (
                id.to_string(),
                WorkspaceTemplate {
                    name: name.to_string(),
                    description: description.to_string(),
                    builtin: true,
                    config: TemplateConfig {
                        model: (id != "general").then(|| "sonnet".to_string()),
                        permission_mode: None,
                        allowed_tools: allowed,
                        system_prompt_append: prompt.map(ToString::to_string),
                    },
                },
            )
        })
        .collect()
}

/// User-defined templates layered under the built-ins. A user template
/// cannot shadow a builtin id.
pub struct TemplateStore {
    path: PathBuf,
    user: BTreeMap<String, WorkspaceTemplate>,
}

impl TemplateStore {
    pub fn open(path: impl Into<PathBuf>) -> Result<Self, StoreError> {
        let path = path.into();

        let user = if path.exists() {
            let content = std::fs::read_to_string(&path).map_err(|source| StoreError::Io {
                path: path.clone(),
                source,
            })?;
            serde_json::from_str(&content).map_err(|source| StoreError::Corrupt {
                path: path.clone(),
                source,
            })?
        } else {
            BTreeMap::new()
        };

        Ok(Self { path, user })
    }

    /// All templates, built-ins first.
    pub fn all(&self) -> BTreeMap<String, WorkspaceTemplate> {
        let mut all = builtin_templates();
        for (id, template) in &self.user {
            let mut template = template.clone();
            template.builtin = false;
            all.entry(id.clone()).or_insert(template);
        }
        all
    }

    pub fn get(&self, id: &str) -> Option<WorkspaceTemplate> {
        self.all().get(id).cloned()
    }

    pub fn save_user_template(
        &mut self,
        id: &str,
        mut template: WorkspaceTemplate,
    ) -> Result<(), StoreError> {
        template.builtin = false;
        self.user.insert(id.to_string(), template);
        self.persist()
    }

    /// Delete a user template. Built-ins cannot be deleted.
    pub fn delete_user_template(&mut self, id: &str) -> Result<(), StoreError> {
        if builtin_templates().contains_key(id) || self.user.remove(id).is_none() {
            return Err(StoreError::NotFound(id.to_string()));
        }
        self.persist()
    }

    fn persist(&self) -> Result<(), StoreError> {
        let content = serde_json::to_string_pretty(&self.user).map_err(|source| {
            StoreError::Corrupt {
                path: self.path.clone(),
                source,
            }
        })?;
        crate::store::write_atomic(&self.path, content.as_bytes())
    }
}

/// Stamp out a workspace from a template.
pub fn instantiate(
    template_id: &str,
    template: &WorkspaceTemplate,
    name: &str,
    working_directory: &str,
) -> WorkspaceConfig {
    WorkspaceConfig {
        id: uuid::Uuid::new_v4().to_string(),
        name: name.to_string(),
        description: template.description.clone(),
        working_directory: working_directory.to_string(),
        model: template.config.model.clone(),
        permission_mode: template.config.permission_mode,
        allowed_tools: template.config.allowed_tools.clone(),
        system_prompt_append: template.config.system_prompt_append.clone(),
        template_source: Some(template_id.to_string()),
        created_at: Some(Utc::now()),
        ..WorkspaceConfig::default()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn builtins_are_present_and_marked() {
        let builtins = builtin_templates();
        for id in ["python-project", "nodejs-project", "react-app", "rust-project", "general"] {
            assert!(builtins[id].builtin, "{id} should be builtin");
        }
        assert_eq!(builtins["general"].config.model, None);
        assert!(builtins["react-app"]
            .config
            .allowed_tools
            .contains(&"WebFetch".to_string()));
    }

    #[test]
    fn instantiate_copies_config_and_mints_identity() {
        let builtins = builtin_templates();
        let template = &builtins["rust-project"];

        let ws = instantiate("rust-project", template, "my-crate", "/tmp/crate");

        assert!(!ws.id.is_empty());
        assert_eq!(ws.name, "my-crate");
        assert_eq!(ws.working_directory, "/tmp/crate");
        assert_eq!(ws.model.as_deref(), Some("sonnet"));
        assert_eq!(ws.template_source.as_deref(), Some("rust-project"));
        assert!(ws.created_at.is_some());

        let again = instantiate("rust-project", template, "my-crate", "/tmp/crate");
        assert_ne!(ws.id, again.id);
    }

    #[test]
    fn user_templates_persist_and_builtins_resist_deletion() {
        let tmp = TempDir::new().unwrap();
        let path = tmp.path().join("templates.json");

        let mut store = TemplateStore::open(&path).unwrap();
        store
            .save_user_template(
                "go-project",
                WorkspaceTemplate {
                    name: "Go Project".to_string(),
                    description: "Go development".to_string(),
                    builtin: true, // ignored on save
                    config: TemplateConfig::default(),
                },
            )
            .unwrap();

        let mut reopened = TemplateStore::open(&path).unwrap();
        let all = reopened.all();
        assert!(!all["go-project"].builtin);
        assert!(all.contains_key("general"));

        assert!(reopened.delete_user_template("general").is_err());
        reopened.delete_user_template("go-project").unwrap();
        assert!(!reopened.all().contains_key("go-project"));
    }
}

//! CLI support utilities.

mod paths;

pub use paths::{config_dir, expand_tilde, history_path, launch_script_path, templates_path, workspaces_path};

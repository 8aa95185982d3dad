use anyhow::Result;
use clap::{Parser, Subcommand};
use std::path::PathBuf;
use tracing_subscriber::{fmt, EnvFilter};

mod cli;
mod command;
mod compose;
mod domain;
mod error;
mod launch;
mod store;
mod templates;
mod transfer;

use transfer::ConflictPolicy;

/// ccw - workspace configuration manager and launcher for the Claude Code CLI
#[derive(Parser)]
#[command(name = "ccw")]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Enable verbose logging
    #[arg(short, long)]
    verbose: bool,

    /// Directory holding workspaces.json and friends. Defaults to ~/.claude-workspaces
    #[arg(long, env = "CCW_CONFIG_DIR")]
    config_dir: Option<String>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// List all workspaces
    List,
    /// Show one workspace as JSON
    Show {
        /// Workspace id or name
        workspace: String,
    },
    /// Create a workspace
    New {
        /// Display name
        name: String,

        /// Working directory the CLI starts in
        #[arg(short, long)]
        dir: String,

        /// Template id to start from (see `ccw templates`)
        #[arg(short, long)]
        template: Option<String>,

        /// Model alias or full claude-* name
        #[arg(short, long)]
        model: Option<String>,

        /// Free-text description
        #[arg(long)]
        description: Option<String>,

        /// Comma-separated tools to auto-approve, e.g. "Read,Edit,Bash"
        #[arg(long)]
        allow: Option<String>,
    },
    /// Delete a workspace
    Delete {
        /// Workspace id or name
        workspace: String,
    },
    /// Show the command a workspace would launch
    Preview {
        /// Workspace id or name
        workspace: String,
    },
    /// Open a terminal (and IDE, if configured) running the workspace's command
    Launch {
        /// Workspace id or name
        workspace: String,
    },
    /// Show recent launches
    History {
        /// Clear the history instead of listing it
        #[arg(long)]
        clear: bool,

        /// How many entries to show
        #[arg(short = 'n', long, default_value_t = 20)]
        limit: usize,
    },
    /// List or manage workspace templates
    Templates {
        #[command(subcommand)]
        action: Option<TemplatesAction>,
    },
    /// Export workspaces as JSON
    Export {
        /// Workspace id or name; exports everything when absent
        workspace: Option<String>,

        /// Write to a file instead of stdout
        #[arg(short, long)]
        output: Option<PathBuf>,
    },
    /// Import workspaces from an export document
    Import {
        /// Path to the export document
        file: PathBuf,

        /// What to do when an imported id already exists
        #[arg(long, value_enum, default_value = "skip")]
        on_conflict: ConflictPolicy,
    },
}

#[derive(Subcommand)]
enum TemplatesAction {
    /// Save a user-defined template
    Save {
        /// Template id, e.g. "go-project"
        id: String,

        /// Display name
        #[arg(long)]
        name: String,

        /// Free-text description
        #[arg(long)]
        description: Option<String>,

        /// Model alias or full claude-* name
        #[arg(short, long)]
        model: Option<String>,

        /// Comma-separated tools to auto-approve
        #[arg(long)]
        allow: Option<String>,

        /// Text appended to the system prompt
        #[arg(long)]
        append_prompt: Option<String>,
    },
    /// Delete a user-defined template
    Delete {
        /// Template id
        id: String,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    let args = Cli::parse();

    // Initialize logging
    let filter = if args.verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::new("info")
    };

    fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();

    let config_dir = cli::config_dir(args.config_dir.as_deref())?;

    match args.command {
        Commands::List => command::run_list(&config_dir).await,
        Commands::Show { workspace } => command::run_show(&config_dir, &workspace).await,
        Commands::New {
            name,
            dir,
            template,
            model,
            description,
            allow,
        } => {
            command::run_new(
                &config_dir,
                &name,
                &dir,
                template.as_deref(),
                model.as_deref(),
                description.as_deref(),
                allow.as_deref(),
            )
            .await
        }
        Commands::Delete { workspace } => command::run_delete(&config_dir, &workspace).await,
        Commands::Preview { workspace } => command::run_preview(&config_dir, &workspace).await,
        Commands::Launch { workspace } => command::run_launch(&config_dir, &workspace).await,
        Commands::History { clear, limit } => command::run_history(&config_dir, clear, limit).await,
        Commands::Templates { action } => match action {
            None => command::run_templates(&config_dir).await,
            Some(TemplatesAction::Save {
                id,
                name,
                description,
                model,
                allow,
                append_prompt,
            }) => {
                command::run_templates_save(
                    &config_dir,
                    &id,
                    &name,
                    description.as_deref(),
                    model.as_deref(),
                    allow.as_deref(),
                    append_prompt.as_deref(),
                )
                .await
            }
            Some(TemplatesAction::Delete { id }) => {
                command::run_templates_delete(&config_dir, &id).await
            }
        },
        Commands::Export { workspace, output } => {
            command::run_export(&config_dir, workspace.as_deref(), output.as_deref()).await
        }
        Commands::Import { file, on_conflict } => {
            command::run_import(&config_dir, &file, on_conflict).await
        }
    }
}

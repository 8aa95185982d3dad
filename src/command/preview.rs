use anyhow::Result;
use std::path::Path;

use crate::compose;

/// Print the command a workspace would launch, without launching it.
pub async fn run_preview(config_dir: &Path, id_or_name: &str) -> Result<()> {
    let store = super::open_store(config_dir)?;
    let ws = super::resolve(&store, id_or_name)?;

    match compose::compose(ws) {
        Ok(cmd) => {
            println!("Working directory: {}", ws.working_directory);
            if !cmd.env.is_empty() {
                println!("Environment:");
                for (name, value) in &cmd.env {
                    println!("  {name}={value}");
                }
            }

            let mut argv = vec![cmd.program.to_string()];
            argv.extend(cmd.args);
            println!("Command:");
            println!("  {}", shell_words::join(argv.iter().map(String::as_str)));
        }
        Err(issues) => {
            eprintln!("Workspace `{}` does not validate:", ws.name);
            for issue in &issues {
                eprintln!("  - {issue}");
            }
            anyhow::bail!("{} validation problem(s)", issues.len());
        }
    }

    Ok(())
}

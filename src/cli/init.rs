//! `nacplan init` - scaffold the workspace

use crate::models::NacplanConfig;
use crate::Result;
use colored::Colorize;
use std::env;

pub async fn run() -> Result<()> {
    let cwd = env::current_dir()?;
    let config = NacplanConfig::default();
    let workspace = config.workspace_dir(&cwd);

    if workspace.exists() {
        println!("{}", "⚠️  nacplan is already initialized here".yellow());
        return Ok(());
    }

    println!("{}", "🧭 Initializing nacplan workspace...".cyan().bold());
    println!();

    std::fs::create_dir_all(workspace.join("projects"))?;
    std::fs::create_dir_all(workspace.join("exports"))?;
    std::fs::create_dir_all(workspace.join("templates"))?;
    println!("   ✓ nacplan/projects/");
    println!("   ✓ nacplan/exports/");
    println!("   ✓ nacplan/templates/");

    let config_path = cwd.join("nacplan.toml");
    if !config_path.exists() {
        std::fs::write(&config_path, NacplanConfig::starter_toml())?;
        println!("   ✓ nacplan.toml");
    }

    println!();
    println!("{}", "Done. Create your first project with:".green());
    println!("   nacplan new");
    Ok(())
}

//! `nacplan list` - cached project summaries

use crate::models::ProjectStatus;
use crate::store::{FsProjectStore, ProjectStore};
use crate::ui::tables;
use crate::Result;
use colored::Colorize;

pub async fn run(json: bool) -> Result<()> {
    let (_config, _cwd, workspace) = super::workspace_context()?;
    let store = FsProjectStore::new(&workspace);
    let projects = store.list_projects().await?;

    if json {
        println!("{}", serde_json::to_string_pretty(&projects)?);
        return Ok(());
    }

    if projects.is_empty() {
        println!("{}", "No projects yet. Run 'nacplan new' to create one.".yellow());
        return Ok(());
    }

    let rows: Vec<Vec<String>> = projects
        .iter()
        .map(|p| {
            let status = match p.status {
                ProjectStatus::Planning => "planning",
                ProjectStatus::Scoped => "scoped",
            };
            let updated = p
                .updated_at
                .map(|t| t.format("%Y-%m-%d").to_string())
                .unwrap_or_else(|| "-".to_string());
            vec![
                p.slug.clone(),
                p.name.clone(),
                p.client_name.clone(),
                status.to_string(),
                updated,
            ]
        })
        .collect();

    print!(
        "{}",
        tables::render(&["SLUG", "NAME", "CLIENT", "STATUS", "UPDATED"], &rows)
    );
    Ok(())
}

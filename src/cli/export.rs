//! `nacplan export` - write the plan document for a stored project

use crate::ai::HttpGenerator;
use crate::export::MarkdownExporter;
use crate::forms::project;
use crate::store::{FsProjectStore, ProjectStore};
use crate::wizard::{ActionDispatcher, FormState};
use crate::Result;
use std::path::{Path, PathBuf};

pub async fn run(slug: &str, output: Option<&Path>) -> Result<()> {
    let (config, cwd, workspace) = super::workspace_context()?;
    let store = FsProjectStore::new(&workspace);

    let record = store.load_project(slug).await?;
    let discovery = store.load_discovery(slug).await?;
    let completion = project::definition().completion_score(&FormState::from_typed(&record)?);

    let path: PathBuf = match output {
        Some(path) => path.to_path_buf(),
        None => config.export_dir(&cwd).join(format!("{}-plan.md", slug)),
    };

    let generator = HttpGenerator::from_config(&config.ai)?;
    let exporter = MarkdownExporter::new(&workspace);
    let mut dispatcher = ActionDispatcher::new(store, generator, exporter);

    dispatcher.export_plan(&record, discovery.as_ref(), completion, &path)?;
    dispatcher.notifications_mut().flush();
    Ok(())
}

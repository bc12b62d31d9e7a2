//! `nacplan generate` - AI enrichment for a stored project

use crate::ai::HttpGenerator;
use crate::export::MarkdownExporter;
use crate::store::{FsProjectStore, ProjectStore};
use crate::wizard::ActionDispatcher;
use crate::Result;

pub async fn run(slug: &str, recommendations: bool) -> Result<()> {
    let (config, _cwd, workspace) = super::workspace_context()?;
    let store = FsProjectStore::new(&workspace);

    let mut record = store.load_project(slug).await?;
    let discovery = store.load_discovery(slug).await?;

    let generator = HttpGenerator::from_config(&config.ai)?;
    let exporter = MarkdownExporter::new(&workspace);
    let mut dispatcher = ActionDispatcher::new(store, generator, exporter);

    let wrote = if recommendations {
        dispatcher
            .generate_recommendations(&mut record, discovery.as_ref())
            .await?
    } else {
        dispatcher.generate_summary(&mut record).await?
    };

    if wrote {
        dispatcher.store().update_project(slug, record).await?;
        dispatcher.store().invalidate_list_cache();
    }

    dispatcher.notifications_mut().flush();
    Ok(())
}

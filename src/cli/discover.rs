//! `nacplan discover` - run the environment discovery wizard for a project

use crate::ai::HttpGenerator;
use crate::export::MarkdownExporter;
use crate::forms::discovery;
use crate::store::{FsProjectStore, LibraryCache, ProjectStore};
use crate::ui::prompts::{self, DriveOutcome};
use crate::wizard::{ActionDispatcher, SubmissionResult, WizardSession};
use crate::Result;
use colored::Colorize;
use std::path::Path;

pub async fn run(slug: &str, answers: Option<&Path>, assume_yes: bool) -> Result<()> {
    let (config, _cwd, workspace) = super::workspace_context()?;
    let store = FsProjectStore::new(&workspace);

    // Discovery attaches to an existing project
    let project = store.load_project(slug).await?;
    let library = LibraryCache::new(&workspace).load()?;

    let mut session = WizardSession::new(discovery::definition(), discovery::defaults()?);
    let interactive = answers.is_none();

    if let Some(path) = answers {
        super::apply_answers(&mut session, path)?;
        super::walk_to_terminal(&mut session)?;
    } else {
        println!(
            "{}",
            format!("🔍 Environment discovery for '{}'", project.name)
                .cyan()
                .bold()
        );
        let outcome = prompts::drive(&mut session, |step_id, session| {
            discovery::prompt_step(step_id, session, &library)
        })?;
        if outcome == DriveOutcome::Cancelled {
            println!("{}", "Wizard cancelled; nothing was saved".yellow());
            return Ok(());
        }
    }

    let generator = HttpGenerator::from_config(&config.ai)?;
    let exporter = MarkdownExporter::new(&workspace);
    let mut dispatcher = ActionDispatcher::new(store, generator, exporter);
    if !interactive {
        dispatcher = dispatcher.quiet();
    }

    if interactive && !assume_yes && !prompts::confirm("Attach these findings?", true)? {
        println!("{}", "Wizard cancelled; nothing was saved".yellow());
        return Ok(());
    }

    loop {
        let result = dispatcher.submit_discovery(slug, &mut session).await?;
        dispatcher.notifications_mut().flush();

        match result {
            SubmissionResult::Created { .. } => {
                println!();
                println!(
                    "{}",
                    format!("Next: nacplan generate {} --recommendations", slug).bright_black()
                );
                return Ok(());
            }
            SubmissionResult::Failed { reason } => {
                if interactive && prompts::confirm("Submission failed. Try again?", false)? {
                    continue;
                }
                anyhow::bail!("discovery submission failed: {}", reason);
            }
        }
    }
}

//! `nacplan new` - run the project creation wizard

use crate::ai::HttpGenerator;
use crate::export::MarkdownExporter;
use crate::forms::project;
use crate::store::{FsProjectStore, LibraryCache};
use crate::ui::prompts::{self, DriveOutcome};
use crate::wizard::{ActionDispatcher, SubmissionResult, WizardSession};
use crate::Result;
use colored::Colorize;
use std::path::Path;

pub async fn run(answers: Option<&Path>, assume_yes: bool) -> Result<()> {
    let (config, _cwd, workspace) = super::workspace_context()?;
    let library = LibraryCache::new(&workspace).load()?;

    let mut session = WizardSession::new(project::definition(), project::defaults()?);
    let interactive = answers.is_none();

    if let Some(path) = answers {
        super::apply_answers(&mut session, path)?;
        super::walk_to_terminal(&mut session)?;
    } else {
        println!("{}", "🧭 New NAC deployment project".cyan().bold());
        let outcome = prompts::drive(&mut session, |step_id, session| {
            project::prompt_step(step_id, session, &library)
        })?;
        if outcome == DriveOutcome::Cancelled {
            println!("{}", "Wizard cancelled; nothing was saved".yellow());
            return Ok(());
        }
    }

    let store = FsProjectStore::new(&workspace);
    let generator = HttpGenerator::from_config(&config.ai)?;
    let exporter = MarkdownExporter::new(&workspace);
    let mut dispatcher = ActionDispatcher::new(store, generator, exporter);
    if !interactive {
        dispatcher = dispatcher.quiet();
    }

    if interactive && !assume_yes && !prompts::confirm("Create this project?", true)? {
        println!("{}", "Wizard cancelled; nothing was saved".yellow());
        return Ok(());
    }

    // No automatic retry: a failed submission is only re-fired when the
    // user asks for it, with the form state intact.
    loop {
        let result = dispatcher.submit_project(&mut session).await?;
        dispatcher.notifications_mut().flush();

        match result {
            SubmissionResult::Created { slug, .. } => {
                println!();
                println!("{}", format!("Next: nacplan status {}", slug).bright_black());
                return Ok(());
            }
            SubmissionResult::Failed { reason } => {
                if interactive && prompts::confirm("Submission failed. Try again?", false)? {
                    continue;
                }
                anyhow::bail!("project submission failed: {}", reason);
            }
        }
    }
}

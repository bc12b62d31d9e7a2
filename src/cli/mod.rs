//! CLI command handlers, one module per subcommand

pub mod discover;
pub mod export;
pub mod generate;
pub mod init;
pub mod list;
pub mod new;
pub mod status;

use crate::models::NacplanConfig;
use crate::ui::prompts;
use crate::wizard::{StepOutcome, WizardSession};
use crate::{Context, Result};
use serde_json::Value;
use std::env;
use std::path::{Path, PathBuf};

/// Resolve config, working directory and workspace for a command
pub(crate) fn workspace_context() -> Result<(NacplanConfig, PathBuf, PathBuf)> {
    let cwd = env::current_dir()?;
    let config = NacplanConfig::load(&cwd)?;
    let workspace = config.workspace_dir(&cwd);
    Ok((config, cwd, workspace))
}

/// Merge a YAML answers file into a fresh wizard session. Top-level keys
/// replace their subtree; fields left out keep their defaults.
pub(crate) fn apply_answers(session: &mut WizardSession, path: &Path) -> Result<()> {
    let content = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read answers file {}", path.display()))?;
    let answers: Value = serde_yaml::from_str(&content)
        .with_context(|| format!("Failed to parse answers file {}", path.display()))?;

    let Value::Object(entries) = answers else {
        anyhow::bail!("answers file must be a mapping of form fields");
    };
    for (key, value) in entries {
        session.form_mut().set(&key, value);
    }
    Ok(())
}

/// Advance a pre-filled session to its final step, surfacing the first
/// validation gate that rejects.
pub(crate) fn walk_to_terminal(session: &mut WizardSession) -> Result<()> {
    loop {
        match session.advance() {
            StepOutcome::Moved(_) => continue,
            StepOutcome::AtTerminal => return Ok(()),
            StepOutcome::Rejected(violations) => {
                prompts::print_violations(&violations);
                let title = session
                    .current_spec()
                    .map(|spec| spec.title)
                    .unwrap_or_default();
                anyhow::bail!(
                    "step {} ('{}') is incomplete",
                    session.current_step(),
                    title
                );
            }
        }
    }
}

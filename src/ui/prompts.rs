//! Interactive prompt helpers driving a wizard session
//!
//! Thin wrappers over dialoguer plus the shared step loop: render the step,
//! let the wizard-specific filler collect input, then navigate. Forward
//! navigation goes through the session's validation gate; violations are
//! printed and the cursor stays put.

use crate::wizard::{StepOutcome, Violation, WizardSession};
use crate::Result;
use colored::Colorize;
use dialoguer::{Confirm, Input, MultiSelect, Select};

/// Navigation choice offered after each step
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StepNav {
    Next,
    Back,
    Cancel,
}

/// Outcome of driving a wizard interactively
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DriveOutcome {
    /// User reached the final step and chose to submit
    ReadyToSubmit,
    Cancelled,
}

/// Free-text input with the current value as the editable default
pub fn input_text(label: &str, current: &str) -> Result<String> {
    let value: String = Input::new()
        .with_prompt(label)
        .with_initial_text(current)
        .allow_empty(true)
        .interact_text()?;
    Ok(value.trim().to_string())
}

/// Unsigned number input; empty keeps the current value
pub fn input_u64(label: &str, current: u64) -> Result<u64> {
    let raw: String = Input::new()
        .with_prompt(label)
        .with_initial_text(current.to_string())
        .allow_empty(true)
        .interact_text()?;
    if raw.trim().is_empty() {
        return Ok(current);
    }
    raw.trim()
        .parse::<u64>()
        .map_err(|_| anyhow::anyhow!("'{}' is not a number", raw.trim()))
}

pub fn select(label: &str, options: &[String], default: usize) -> Result<usize> {
    let index = Select::new()
        .with_prompt(label)
        .items(options)
        .default(default.min(options.len().saturating_sub(1)))
        .interact()?;
    Ok(index)
}

pub fn multi_select(label: &str, options: &[String], checked: &[bool]) -> Result<Vec<usize>> {
    let defaults: Vec<bool> = if checked.len() == options.len() {
        checked.to_vec()
    } else {
        vec![false; options.len()]
    };
    let indices = MultiSelect::new()
        .with_prompt(label)
        .items(options)
        .defaults(&defaults)
        .interact()?;
    Ok(indices)
}

pub fn confirm(label: &str, default: bool) -> Result<bool> {
    Ok(Confirm::new()
        .with_prompt(label)
        .default(default)
        .interact()?)
}

/// Print the step banner: position, title, description, completion score
pub fn step_header(session: &WizardSession) {
    let Some(spec) = session.current_spec() else {
        return;
    };
    println!();
    println!(
        "{}",
        format!(
            "Step {}/{} - {}",
            session.current_step(),
            session.total_steps(),
            spec.title
        )
        .cyan()
        .bold()
    );
    if !spec.description.is_empty() {
        println!("{}", spec.description.bright_black());
    }
    println!(
        "{}",
        format!("Completion: {}%", session.completion_score()).bright_black()
    );
    println!();
}

/// Print a violation list the way validation errors are reported everywhere
pub fn print_violations(violations: &[Violation]) {
    println!();
    println!("{}", "Cannot continue yet:".yellow().bold());
    for violation in violations {
        println!("  {} {}", "✖".red(), violation.message);
    }
}

/// Ask where to go after a step
pub fn step_nav(session: &WizardSession) -> Result<StepNav> {
    let mut options: Vec<String> = Vec::new();
    if session.is_terminal() {
        options.push("Submit".to_string());
    } else {
        options.push("Next".to_string());
    }
    if !session.is_first() {
        options.push("Back".to_string());
    }
    options.push("Cancel".to_string());

    let index = Select::new().items(&options).default(0).interact()?;
    match options[index].as_str() {
        "Next" | "Submit" => Ok(StepNav::Next),
        "Back" => Ok(StepNav::Back),
        _ => Ok(StepNav::Cancel),
    }
}

/// Drive a session through its steps with a wizard-specific filler.
/// The filler collects input for the step the cursor is on; navigation and
/// validation stay here.
pub fn drive<F>(session: &mut WizardSession, mut fill: F) -> Result<DriveOutcome>
where
    F: FnMut(&str, &mut WizardSession) -> Result<()>,
{
    loop {
        step_header(session);

        let step_id = session
            .current_spec()
            .map(|spec| spec.id)
            .unwrap_or_default();
        fill(step_id, session)?;

        match step_nav(session)? {
            StepNav::Cancel => {
                if confirm("Discard this wizard run?", false)? {
                    return Ok(DriveOutcome::Cancelled);
                }
            }
            StepNav::Back => {
                session.retreat();
            }
            StepNav::Next => {
                if session.is_terminal() {
                    let violations = session.validate_current();
                    if !violations.is_empty() {
                        print_violations(&violations);
                        continue;
                    }
                    return Ok(DriveOutcome::ReadyToSubmit);
                }
                match session.advance() {
                    StepOutcome::Moved(_) | StepOutcome::AtTerminal => {}
                    StepOutcome::Rejected(violations) => print_violations(&violations),
                }
            }
        }
    }
}

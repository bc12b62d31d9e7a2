//! `nacplan status` - record details and completion score

use crate::forms::project;
use crate::models::{ProjectStatus, RolloutPlan};
use crate::store::{FsProjectStore, ProjectStore};
use crate::wizard::FormState;
use crate::Result;
use colored::Colorize;

pub async fn run(slug: &str, json: bool) -> Result<()> {
    let (_config, _cwd, workspace) = super::workspace_context()?;
    let store = FsProjectStore::new(&workspace);

    let record = store.load_project(slug).await?;
    let discovery = store.load_discovery(slug).await?;
    let completion = project::definition().completion_score(&FormState::from_typed(&record)?);

    if json {
        let mut value = serde_json::to_value(&record)?;
        if let Some(object) = value.as_object_mut() {
            object.insert("completion".to_string(), serde_json::json!(completion));
            object.insert(
                "has_discovery".to_string(),
                serde_json::json!(discovery.is_some()),
            );
        }
        println!("{}", serde_json::to_string_pretty(&value)?);
        return Ok(());
    }

    println!("{}", format!("Status for: {}", slug).cyan().bold());
    println!();

    let (status_icon, status_label) = match record.status {
        ProjectStatus::Planning => ("📝", "planning".yellow()),
        ProjectStatus::Scoped => ("🔍", "scoped".green()),
    };

    println!("   Project:    {}", record.name);
    println!("   Client:     {}", record.client_name);
    println!("   Industry:   {}", record.industry);
    println!("   Status:     {} {}", status_icon, status_label);
    println!("   Completion: {}%", completion);
    println!("   Devices:    {}", record.network.total_devices);
    println!("   Sites:      {}", record.network.sites.len());
    println!("   People:     {}", record.stakeholders.len());

    match &record.rollout {
        None => println!("   Rollout:    {}", "undecided".bright_black()),
        Some(RolloutPlan::Phased { phases }) => {
            println!("   Rollout:    phased ({} phase(s))", phases.len())
        }
        Some(RolloutPlan::BigBang { target_date }) => {
            println!("   Rollout:    big bang ({})", target_date)
        }
    }

    if discovery.is_some() {
        println!("   Discovery:  attached");
    } else {
        println!(
            "   Discovery:  {}",
            format!("none (run 'nacplan discover {}')", slug).bright_black()
        );
    }

    if !record.summary.executive.is_empty() {
        println!();
        println!("{}", "Executive summary".cyan());
        println!("{}", record.summary.executive);
    }

    if let Some(updated) = record.updated_at {
        println!();
        println!(
            "{}",
            format!("Updated {}", updated.format("%Y-%m-%d %H:%M:%S")).bright_black()
        );
    }

    Ok(())
}

//! Project creation wizard
//!
//! Nine steps from project basics to the rollout plan. Stakeholders, sites,
//! pain points and requirements are derived collections; the rollout step is
//! a tagged variant whose active fields depend on the chosen approach.

use crate::models::{ProjectRecord, SIZE_BANDS};
use crate::store::ReferenceLibrary;
use crate::ui::prompts;
use crate::wizard::{
    CollectionSpec, FieldRule, FormState, ScoredField, StepSpec, Violation, WizardDefinition,
    WizardSession,
};
use crate::Result;
use colored::Colorize;
use serde_json::{json, Value};

pub const STAKEHOLDERS: CollectionSpec = CollectionSpec::new("stakeholders", "email");
pub const SITES: CollectionSpec = CollectionSpec::new("network.sites", "name");
pub const PAIN_POINTS: CollectionSpec = CollectionSpec::new("pain_points", "title");
pub const REQUIREMENTS: CollectionSpec = CollectionSpec::new("requirements", "title");

/// The project-creation step sequence
pub fn definition() -> WizardDefinition {
    WizardDefinition::new(
        "project",
        vec![
            StepSpec::new("basics", "Project Basics", "Name the project and its client.")
                .with_rules(vec![
                    FieldRule::Required { path: "name", label: "Project name" },
                    FieldRule::Required { path: "client_name", label: "Client name" },
                    FieldRule::Required { path: "industry", label: "Industry" },
                    FieldRule::Email { path: "contact_email", label: "Contact email" },
                ]),
            StepSpec::new("organization", "Company Profile", "Size and footprint of the client organization.")
                .with_rules(vec![
                    FieldRule::OneOf {
                        path: "organization.size",
                        label: "Company size",
                        allowed: SIZE_BANDS,
                    },
                    FieldRule::Required { path: "organization.size", label: "Company size" },
                ]),
            // No declared requirements: stakeholders can be added later
            StepSpec::new("stakeholders", "Stakeholders", "Who sponsors, owns and operates this deployment."),
            StepSpec::new("network", "Network Scope", "How many devices and where they live.")
                .with_rules(vec![FieldRule::PositiveNumber {
                    path: "network.total_devices",
                    label: "Total device count",
                }]),
            StepSpec::new("compliance", "Compliance", "Frameworks the deployment must satisfy."),
            StepSpec::new("pain_points", "Pain Points", "What hurts today."),
            StepSpec::new("requirements", "Requirements", "What the deployment must deliver."),
            StepSpec::new("rollout", "Rollout Plan", "Phased enforcement or a single cutover.")
                .with_check(check_rollout),
            StepSpec::new("review", "Review & Submit", "Check the plan before creating the project."),
        ],
        vec![
            ScoredField { path: "name", weight: 2 },
            ScoredField { path: "client_name", weight: 2 },
            ScoredField { path: "industry", weight: 1 },
            ScoredField { path: "organization.size", weight: 1 },
            ScoredField { path: "network.total_devices", weight: 2 },
            ScoredField { path: "rollout", weight: 2 },
        ],
    )
}

/// Default form state: the serialized default record
pub fn defaults() -> Result<FormState> {
    FormState::from_typed(&ProjectRecord::default())
}

/// Rollout is a required tagged choice; each variant gates its own fields
fn check_rollout(state: &FormState) -> Vec<Violation> {
    match state.get_str("rollout.approach") {
        None => vec![Violation::field("rollout", "Choose a rollout approach")],
        Some("phased") => {
            let phases = state.get_array("rollout.phases").map(Vec::len).unwrap_or(0);
            if phases == 0 {
                vec![Violation::field(
                    "rollout.phases",
                    "A phased rollout needs at least one phase",
                )]
            } else {
                Vec::new()
            }
        }
        Some("bigbang") => {
            let has_date = state
                .get_str("rollout.target_date")
                .map(|d| !d.trim().is_empty())
                .unwrap_or(false);
            if has_date {
                Vec::new()
            } else {
                vec![Violation::field(
                    "rollout.target_date",
                    "A big-bang rollout needs a target date",
                )]
            }
        }
        Some(other) => vec![Violation::field(
            "rollout",
            format!("Unknown rollout approach '{}'", other),
        )],
    }
}

/// Interactive filler for one step; called by the shared drive loop
pub fn prompt_step(step_id: &str, session: &mut WizardSession, library: &ReferenceLibrary) -> Result<()> {
    match step_id {
        "basics" => prompt_basics(session, library),
        "organization" => prompt_organization(session, library),
        "stakeholders" => prompt_stakeholders(session),
        "network" => prompt_network(session),
        "compliance" => prompt_compliance(session, library),
        "pain_points" => prompt_pain_points(session, library),
        "requirements" => prompt_requirements(session),
        "rollout" => prompt_rollout(session),
        "review" => {
            print_review(session);
            Ok(())
        }
        _ => Ok(()),
    }
}

fn current_str(session: &WizardSession, path: &str) -> String {
    session.form().get_str(path).unwrap_or_default().to_string()
}

fn prompt_basics(session: &mut WizardSession, library: &ReferenceLibrary) -> Result<()> {
    let name = prompts::input_text("Project name", &current_str(session, "name"))?;
    session.form_mut().set("name", json!(name));

    let client = prompts::input_text("Client name", &current_str(session, "client_name"))?;
    session.form_mut().set("client_name", json!(client));

    let mut options: Vec<String> = library.industries.iter().map(|i| i.name.clone()).collect();
    options.push("Other".to_string());
    let current_industry = current_str(session, "industry");
    let default = library
        .industries
        .iter()
        .position(|i| i.id == current_industry)
        .unwrap_or(0);
    let picked = prompts::select("Industry", &options, default)?;
    let industry = if picked < library.industries.len() {
        library.industries[picked].id.clone()
    } else {
        prompts::input_text("Industry", &current_industry)?
    };
    session.form_mut().set("industry", json!(industry));

    let email = prompts::input_text(
        "Primary contact email (optional)",
        &current_str(session, "contact_email"),
    )?;
    session.form_mut().set("contact_email", json!(email));
    Ok(())
}

fn prompt_organization(session: &mut WizardSession, library: &ReferenceLibrary) -> Result<()> {
    let labels: Vec<String> = library.size_bands.iter().map(|b| b.label.clone()).collect();
    let current = current_str(session, "organization.size");
    let default = library
        .size_bands
        .iter()
        .position(|b| b.id == current)
        .unwrap_or(0);
    let picked = prompts::select("Company size", &labels, default)?;
    if let Some(band) = library.size_bands.get(picked) {
        session.form_mut().set("organization.size", json!(band.id));
    }

    let region = prompts::input_text("Region", &current_str(session, "organization.region"))?;
    session.form_mut().set("organization.region", json!(region));

    let employees = prompts::input_u64(
        "Employee count",
        session.form().get_u64("organization.employees").unwrap_or(0),
    )?;
    session.form_mut().set("organization.employees", json!(employees));
    Ok(())
}

fn prompt_stakeholders(session: &mut WizardSession) -> Result<()> {
    loop {
        let count = STAKEHOLDERS.len(session.form());
        println!("{}", format!("{} stakeholder(s) captured", count).bright_black());

        let mut options = vec!["Add stakeholder".to_string()];
        if count > 0 {
            options.push("Remove stakeholder".to_string());
        }
        options.push("Done".to_string());

        match prompts::select("Stakeholders", &options, options.len() - 1)? {
            0 => {
                let name = prompts::input_text("Name", "")?;
                let email = prompts::input_text("Email", "")?;
                if !email.is_empty() && !crate::wizard::is_valid_email(&email) {
                    println!("{}", "✖ That does not look like an email address".red());
                    continue;
                }
                let role = prompts::input_text("Role", "")?;
                let added = STAKEHOLDERS.add(
                    session.form_mut(),
                    json!({"name": name, "email": email, "role": role}),
                );
                if !added {
                    println!("{}", "✖ A stakeholder with that email already exists".yellow());
                }
            }
            1 if count > 0 => {
                let labels: Vec<String> = STAKEHOLDERS
                    .items(session.form())
                    .iter()
                    .map(|item| {
                        format!(
                            "{} <{}>",
                            item.get("name").and_then(Value::as_str).unwrap_or("-"),
                            item.get("email").and_then(Value::as_str).unwrap_or("-"),
                        )
                    })
                    .collect();
                let picked = prompts::select("Remove which stakeholder?", &labels, 0)?;
                STAKEHOLDERS.remove_at(session.form_mut(), picked);
            }
            _ => return Ok(()),
        }
    }
}

fn prompt_network(session: &mut WizardSession) -> Result<()> {
    let devices = prompts::input_u64(
        "Total device count",
        session.form().get_u64("network.total_devices").unwrap_or(0),
    )?;
    session.form_mut().set("network.total_devices", json!(devices));

    for (path, label) in [
        ("network.wired", "Wired access in scope?"),
        ("network.wireless", "Wireless access in scope?"),
        ("network.vpn", "VPN access in scope?"),
    ] {
        let current = session.form().get_bool(path).unwrap_or(false);
        let answer = prompts::confirm(label, current)?;
        session.form_mut().set(path, json!(answer));
    }

    loop {
        let count = SITES.len(session.form());
        let mut options = vec!["Add site".to_string()];
        if count > 0 {
            options.push("Remove site".to_string());
        }
        options.push("Done".to_string());

        match prompts::select(
            &format!("Sites ({} captured)", count),
            &options,
            options.len() - 1,
        )? {
            0 => {
                let name = prompts::input_text("Site name", "")?;
                let location = prompts::input_text("Location", "")?;
                let device_count = prompts::input_u64("Devices at this site", 0)?;
                let added = SITES.add(
                    session.form_mut(),
                    json!({"name": name, "location": location, "device_count": device_count}),
                );
                if !added {
                    println!("{}", "✖ A site with that name already exists".yellow());
                }
            }
            1 if count > 0 => {
                let labels: Vec<String> = SITES
                    .items(session.form())
                    .iter()
                    .map(|item| {
                        item.get("name")
                            .and_then(Value::as_str)
                            .unwrap_or("-")
                            .to_string()
                    })
                    .collect();
                let picked = prompts::select("Remove which site?", &labels, 0)?;
                SITES.remove_at(session.form_mut(), picked);
            }
            _ => return Ok(()),
        }
    }
}

fn prompt_compliance(session: &mut WizardSession, library: &ReferenceLibrary) -> Result<()> {
    let labels: Vec<String> = library
        .compliance_frameworks
        .iter()
        .map(|f| format!("{} - {}", f.name, f.description))
        .collect();
    let selected: Vec<String> = session
        .form()
        .get_array("compliance")
        .map(|items| {
            items
                .iter()
                .filter_map(Value::as_str)
                .map(str::to_string)
                .collect()
        })
        .unwrap_or_default();
    let checked: Vec<bool> = library
        .compliance_frameworks
        .iter()
        .map(|f| selected.contains(&f.id))
        .collect();

    let picked = prompts::multi_select("Compliance frameworks", &labels, &checked)?;
    let ids: Vec<String> = picked
        .into_iter()
        .filter_map(|i| library.compliance_frameworks.get(i))
        .map(|f| f.id.clone())
        .collect();
    session.form_mut().set("compliance", json!(ids));
    Ok(())
}

fn prompt_pain_points(session: &mut WizardSession, library: &ReferenceLibrary) -> Result<()> {
    let labels: Vec<String> = library.pain_points.iter().map(|p| p.title.clone()).collect();
    let existing: Vec<String> = PAIN_POINTS
        .items(session.form())
        .iter()
        .filter_map(|item| item.get("title").and_then(Value::as_str))
        .map(str::to_string)
        .collect();
    let checked: Vec<bool> = library
        .pain_points
        .iter()
        .map(|p| existing.contains(&p.title))
        .collect();

    let picked = prompts::multi_select("Common pain points", &labels, &checked)?;
    for index in picked {
        if let Some(entry) = library.pain_points.get(index) {
            // add() dedups re-selected entries by title
            PAIN_POINTS.add(
                session.form_mut(),
                json!({"title": entry.title, "impact": "medium"}),
            );
        }
    }

    while prompts::confirm("Add a custom pain point?", false)? {
        let title = prompts::input_text("Pain point", "")?;
        let impact_options: Vec<String> =
            ["low", "medium", "high"].iter().map(|s| s.to_string()).collect();
        let impact = impact_options[prompts::select("Impact", &impact_options, 1)?].clone();
        let added = PAIN_POINTS.add(
            session.form_mut(),
            json!({"title": title, "impact": impact}),
        );
        if !added {
            println!("{}", "✖ That pain point is already listed".yellow());
        }
    }
    Ok(())
}

fn prompt_requirements(session: &mut WizardSession) -> Result<()> {
    loop {
        let count = REQUIREMENTS.len(session.form());
        let mut options = vec!["Add requirement".to_string()];
        if count > 0 {
            options.push("Remove requirement".to_string());
        }
        options.push("Done".to_string());

        match prompts::select(
            &format!("Requirements ({} captured)", count),
            &options,
            options.len() - 1,
        )? {
            0 => {
                let title = prompts::input_text("Requirement", "")?;
                let priorities: Vec<String> = ["must-have", "should-have", "nice-to-have"]
                    .iter()
                    .map(|s| s.to_string())
                    .collect();
                let priority = priorities[prompts::select("Priority", &priorities, 0)?].clone();
                let added = REQUIREMENTS.add(
                    session.form_mut(),
                    json!({"title": title, "priority": priority}),
                );
                if !added {
                    println!("{}", "✖ That requirement is already listed".yellow());
                }
            }
            1 if count > 0 => {
                let labels: Vec<String> = REQUIREMENTS
                    .items(session.form())
                    .iter()
                    .map(|item| {
                        item.get("title")
                            .and_then(Value::as_str)
                            .unwrap_or("-")
                            .to_string()
                    })
                    .collect();
                let picked = prompts::select("Remove which requirement?", &labels, 0)?;
                REQUIREMENTS.remove_at(session.form_mut(), picked);
            }
            _ => return Ok(()),
        }
    }
}

fn prompt_rollout(session: &mut WizardSession) -> Result<()> {
    let options: Vec<String> = vec![
        "Phased (site by site)".to_string(),
        "Big bang (single cutover)".to_string(),
    ];
    let current = current_str(session, "rollout.approach");
    let default = if current == "bigbang" { 1 } else { 0 };

    match prompts::select("Rollout approach", &options, default)? {
        0 => {
            let mut phases: Vec<Value> = session
                .form()
                .get_array("rollout.phases")
                .cloned()
                .unwrap_or_default();
            loop {
                let mut phase_options = vec!["Add phase".to_string()];
                if !phases.is_empty() {
                    phase_options.push("Clear phases".to_string());
                }
                phase_options.push("Done".to_string());

                match prompts::select(
                    &format!("Phases ({} captured)", phases.len()),
                    &phase_options,
                    phase_options.len() - 1,
                )? {
                    0 => {
                        let name = prompts::input_text("Phase name", "")?;
                        let target = prompts::input_text("Target date (YYYY-MM)", "")?;
                        phases.push(json!({"name": name, "target_date": target}));
                    }
                    1 if !phases.is_empty() => phases.clear(),
                    _ => break,
                }
            }
            session
                .form_mut()
                .set("rollout", json!({"approach": "phased", "phases": phases}));
        }
        _ => {
            let current_date = current_str(session, "rollout.target_date");
            let date = prompts::input_text("Cutover date (YYYY-MM)", &current_date)?;
            session
                .form_mut()
                .set("rollout", json!({"approach": "bigbang", "target_date": date}));
        }
    }
    Ok(())
}

fn print_review(session: &WizardSession) {
    let form = session.form();
    println!("   Project:    {}", form.get_str("name").unwrap_or("-"));
    println!("   Client:     {}", form.get_str("client_name").unwrap_or("-"));
    println!("   Industry:   {}", form.get_str("industry").unwrap_or("-"));
    println!(
        "   Devices:    {}",
        form.get_u64("network.total_devices").unwrap_or(0)
    );
    println!("   Sites:      {}", SITES.len(form));
    println!("   People:     {}", STAKEHOLDERS.len(form));
    println!(
        "   Rollout:    {}",
        form.get_str("rollout.approach").unwrap_or("undecided")
    );
}
